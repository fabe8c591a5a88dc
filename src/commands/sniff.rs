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
use crate::platforms::{ArtifactPathSniffer, PlatformCatalog};
use serde::Serialize;

#[derive(Serialize)]
struct SniffOutput<'p> {
    path: &'p str,
    tag: Option<String>,
}

pub struct SniffCommand<'a> {
    sniffer: ArtifactPathSniffer<'a>,
}

impl<'a> SniffCommand<'a> {
    pub fn new(catalog: &'a PlatformCatalog) -> Result<Self> {
        Ok(Self {
            sniffer: ArtifactPathSniffer::new(catalog),
        })
    }

    /// Classifies every path; the first path that cannot be classified aborts
    /// the run.
    pub fn execute(&self, paths: &[String], json: bool) -> Result<()> {
        let mut output = Vec::with_capacity(paths.len());
        for path in paths {
            let tag = self.sniffer.tag_from(path)?;
            output.push(SniffOutput {
                path,
                tag: tag.map(|tag| tag.to_string()),
            });
        }

        if json {
            return print_json(&output);
        }

        for item in &output {
            println!("{}\t{}", item.tag.as_deref().unwrap_or("-"), item.path);
        }
        Ok(())
    }
}
