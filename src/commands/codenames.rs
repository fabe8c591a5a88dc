// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::commands::print_json;
use crate::error::Result;
use crate::platforms::PlatformCatalog;
use serde::Serialize;

#[derive(Serialize)]
struct CodenameOutput {
    codename: &'static str,
    platform: &'static str,
    version: &'static str,
}

pub struct CodenamesCommand<'a> {
    catalog: &'a PlatformCatalog,
}

impl<'a> CodenamesCommand<'a> {
    pub fn new(catalog: &'a PlatformCatalog) -> Result<Self> {
        Ok(Self { catalog })
    }

    pub fn execute(&self, json: bool) -> Result<()> {
        let mut output = Vec::new();
        for codename in self.catalog.all_codenames() {
            let (platform, version) = self.catalog.codename_to_platform_version(codename)?;
            output.push(CodenameOutput {
                codename,
                platform,
                version,
            });
        }

        if json {
            return print_json(&output);
        }

        for item in &output {
            println!("{:<10} {}-{}", item.codename, item.platform, item.version);
        }
        Ok(())
    }
}
