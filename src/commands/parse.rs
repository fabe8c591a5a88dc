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
use crate::models::{PackageFormat, SignatureFormat};
use crate::platforms::PlatformTag;
use serde::Serialize;

#[derive(Serialize)]
struct TagOutput {
    tag: String,
    platform: &'static str,
    version: &'static str,
    architecture: Option<&'static str>,
    package_format: PackageFormat,
    codename: Option<&'static str>,
    signature_format: Option<SignatureFormat>,
    repo: bool,
}

impl From<&PlatformTag> for TagOutput {
    fn from(tag: &PlatformTag) -> Self {
        let entry = tag.entry();
        TagOutput {
            tag: tag.to_string(),
            platform: tag.platform(),
            version: tag.version(),
            architecture: tag.architecture(),
            package_format: tag.package_format(),
            codename: tag.codename(),
            signature_format: entry.signature_format,
            repo: entry.repo,
        }
    }
}

pub struct ParseCommand;

impl ParseCommand {
    pub fn new() -> Result<Self> {
        Ok(Self)
    }

    pub fn execute(&self, tag: &str, json: bool) -> Result<()> {
        let parsed = PlatformTag::parse(tag)?;
        let output = TagOutput::from(&parsed);

        if json {
            return print_json(&output);
        }

        println!("Tag:            {}", output.tag);
        println!("Platform:       {}", output.platform);
        println!("Version:        {}", output.version);
        println!(
            "Architecture:   {}",
            output.architecture.unwrap_or("(none)")
        );
        println!("Package format: {}", output.package_format);
        if let Some(codename) = output.codename {
            println!("Codename:       {codename}");
        }
        if let Some(signature) = output.signature_format {
            println!("Signature:      {signature}");
        }
        println!("Repository:     {}", if output.repo { "yes" } else { "no" });
        Ok(())
    }
}
