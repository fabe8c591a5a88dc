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
use crate::config::PackagingConfig;
use crate::error::{PackagingError, Result};
use crate::models::PackageFormat;
use crate::paths::{PathResolver, debian_component_from_path};
use crate::platforms::PlatformTag;
use serde::Serialize;
use std::str::FromStr;

#[derive(Serialize)]
struct PathOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<String>,
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    link: Option<String>,
}

/// Layout queries against the loaded configuration.
pub struct PathsCommand<'a> {
    resolver: PathResolver<'a, PackagingConfig>,
    json: bool,
}

impl<'a> PathsCommand<'a> {
    pub fn new(config: &'a PackagingConfig, json: bool) -> Result<Self> {
        Ok(Self {
            resolver: PathResolver::new(config),
            json,
        })
    }

    pub fn artifacts_path(
        &self,
        tag: &str,
        prefix: &str,
        nonfinal: bool,
        link: bool,
    ) -> Result<()> {
        let tag = PlatformTag::parse(tag)?;
        let path = self.resolver.artifacts_path(&tag, prefix, nonfinal)?;
        let link = if link {
            self.resolver
                .artifacts_path_and_link_path(&tag, prefix, nonfinal)?
                .1
        } else {
            None
        };
        self.print(Some(&tag), Some(path), link)
    }

    pub fn repo_path(&self, tag: &str, legacy: bool, nonfinal: bool) -> Result<()> {
        let tag = PlatformTag::parse(tag)?;
        let path = self.resolver.repo_path(&tag, legacy, nonfinal)?;
        self.print(Some(&tag), Some(path), None)
    }

    pub fn repo_config_path(&self, tag: &str) -> Result<()> {
        let tag = PlatformTag::parse(tag)?;
        let path = self.resolver.repo_config_path(&tag)?;
        self.print(Some(&tag), path, None)
    }

    pub fn remote_base(
        &self,
        tag: Option<&str>,
        format: Option<&str>,
        nonfinal: bool,
    ) -> Result<()> {
        match (tag, format) {
            (Some(tag), None) => {
                let tag = PlatformTag::parse(tag)?;
                let path = self.resolver.remote_repository_base_for(&tag, nonfinal)?;
                self.print(Some(&tag), Some(path), None)
            }
            (None, Some(format)) => {
                let format = PackageFormat::from_str(format)?;
                let path = self.resolver.remote_repository_base(format, nonfinal)?;
                self.print(None, Some(path), None)
            }
            _ => Err(PackagingError::ConfigurationError(
                "remote-base needs either a platform tag or --format".to_string(),
            )),
        }
    }

    pub fn deb_base_path(
        &self,
        tag: &str,
        repository: &str,
        project: &str,
        nonfinal: bool,
    ) -> Result<()> {
        let tag = PlatformTag::parse(tag)?;
        let path = self
            .resolver
            .debian_package_base_path(&tag, repository, project, nonfinal)?;
        self.print(Some(&tag), Some(path), None)
    }

    pub fn release_link(&self, tag: &str, nonfinal: bool) -> Result<()> {
        let tag = PlatformTag::parse(tag)?;
        let path = self.resolver.release_package_link_path(&tag, nonfinal)?;
        self.print(Some(&tag), path, None)
    }

    pub fn component(&self, path: &str) -> Result<()> {
        let component = debian_component_from_path(path)?;
        if self.json {
            return print_json(&serde_json::json!({
                "path": path,
                "component": component,
            }));
        }
        println!("{component}");
        Ok(())
    }

    fn print(
        &self,
        tag: Option<&PlatformTag>,
        path: Option<String>,
        link: Option<String>,
    ) -> Result<()> {
        if self.json {
            return print_json(&PathOutput {
                tag: tag.map(ToString::to_string),
                path,
                link,
            });
        }

        if let Some(path) = path {
            println!("{path}");
        }
        if let Some(link) = link {
            println!("{link}");
        }
        Ok(())
    }
}
