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

//! Apt pool layout on the distribution server.

use crate::config::RepositorySettings;
use crate::error::{PackagingError, Result};
use crate::models::PackageFormat;
use crate::paths::repository::{is_legacy_repo, is_new_layout_repo};
use crate::paths::resolver::PathResolver;
use crate::paths::shared::join_segments;
use crate::platforms::PlatformTag;
use regex::Regex;
use std::sync::LazyLock;

static COMPONENT_SOURCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+\.\d+|master|main)/(\w+)").expect("valid component pattern")
});

impl<S: RepositorySettings> PathResolver<'_, S> {
    /// Pool directory that receives `project`'s packages for `tag`.
    ///
    /// New-layout repositories own their apt tree
    /// (`<base>/puppet7/pool/bionic/p/puppet-agent`); legacy repositories
    /// share one pool (`<base>/pool/bionic/puppet6/p/puppet-agent`).
    pub fn debian_package_base_path(
        &self,
        tag: &PlatformTag,
        repository: &str,
        project: &str,
        nonfinal: bool,
    ) -> Result<String> {
        if tag.package_format() != PackageFormat::Deb {
            return Err(PackagingError::NotDebianPlatform(tag.to_string()));
        }
        let Some(first_letter) = project.chars().next() else {
            return Err(PackagingError::ConfigurationError(format!(
                "Cannot determine pool path for {tag} without a project name"
            )));
        };
        let first_letter = first_letter.to_string();
        let codename = tag.require_codename()?;

        let layout_new = is_new_layout_repo(repository);
        if !layout_new && !is_legacy_repo(repository) {
            return Err(PackagingError::UnknownDebianRepository {
                repository: repository.to_string(),
                project: project.to_string(),
            });
        }

        let base = self.remote_repository_base(PackageFormat::Deb, nonfinal)?;
        let path = if layout_new {
            join_segments([
                base.as_str(),
                repository,
                "pool",
                codename,
                first_letter.as_str(),
                project,
            ])
        } else {
            join_segments([
                base.as_str(),
                "pool",
                codename,
                repository,
                first_letter.as_str(),
                project,
            ])
        };
        log::debug!("Pool path for {project} on {tag}: {path}");
        Ok(path)
    }
}

/// Apt component derived from a branch or version directory, e.g.
/// `builds/6.4/puppet-agent` becomes `6_4_puppet`.
pub fn debian_component_from_path(path: &str) -> Result<String> {
    let Some(found) = COMPONENT_SOURCE.find(path) else {
        return Err(PackagingError::CannotDetermineComponent(path.to_string()));
    };
    Ok(found.as_str().replace(['.', '/'], "_"))
}
