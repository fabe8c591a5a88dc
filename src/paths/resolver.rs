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

use crate::config::RepositorySettings;
use crate::error::{PackagingError, Result};
use crate::models::PackageFormat;
use crate::paths::repository::{RepositoryNames, is_new_layout_repo};
use crate::paths::shared::join_segments;
use crate::platforms::{self, PlatformTag};
use regex::Regex;
use std::sync::LazyLock;

pub const ARTIFACTS_PREFIX: &str = "artifacts";
pub const REPOS_PREFIX: &str = "repos";
pub const REPO_CONFIGS_PREFIX: &str = "repo_configs";

const DOWNLOADS_ROOT: &str = "/opt/downloads";
const LEGACY_REPO_WILDCARD: &str = "**";

static DOWNLOADS_PROJECT_DIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/opt/downloads/[^/]+/?$").expect("valid downloads directory pattern")
});

/// Inputs of a single base/link path computation.
#[derive(Debug, Clone, Copy)]
pub struct PathRequest<'p> {
    pub package_format: PackageFormat,
    pub prefix: &'p str,
    pub is_nonfinal: bool,
    pub platform_name: &'p str,
    pub platform_tag: PlatformTag,
    pub link_target: Option<&'p str>,
}

impl<'p> PathRequest<'p> {
    pub fn for_tag(platform_tag: PlatformTag, prefix: &'p str, is_nonfinal: bool) -> Self {
        Self {
            package_format: platform_tag.package_format(),
            prefix,
            is_nonfinal,
            platform_name: platform_tag.platform(),
            platform_tag,
            link_target: None,
        }
    }

    pub fn with_link_target(mut self, link_target: Option<&'p str>) -> Self {
        self.link_target = link_target;
        self
    }
}

/// Maps platform tags to the on-disk and remote layout of artifacts and
/// repositories.
pub struct PathResolver<'a, S: RepositorySettings> {
    settings: &'a S,
    names: RepositoryNames<'a, S>,
}

impl<'a, S: RepositorySettings> PathResolver<'a, S> {
    pub fn new(settings: &'a S) -> Self {
        Self {
            settings,
            names: RepositoryNames::new(settings),
        }
    }

    pub fn repository_display_name(&self, nonfinal: bool) -> Result<String> {
        self.names.display_name(nonfinal)
    }

    pub fn yum_repository_name(&self, nonfinal: bool) -> Result<String> {
        self.names.yum_name(nonfinal)
    }

    pub fn apt_repository_name(&self, nonfinal: bool) -> Result<String> {
        self.names.apt_name(nonfinal)
    }

    pub fn link_name(&self, nonfinal: bool) -> Option<String> {
        self.names.link_name(nonfinal)
    }

    pub fn base_path(&self, request: &PathRequest<'_>) -> Result<String> {
        let prefix = request.prefix;
        let nonfinal = request.is_nonfinal;

        let path = match request.package_format {
            PackageFormat::Deb => {
                let codename = request.platform_tag.require_codename()?;
                let repo = self.apt_repository_name(nonfinal)?;
                if is_new_layout_repo(&repo) {
                    join_segments([prefix, "deb", repo.as_str(), codename])
                } else {
                    join_segments([prefix, "deb", codename, repo.as_str()])
                }
            }
            PackageFormat::Dmg => {
                let repo = self.repository_display_name(nonfinal)?;
                join_segments([prefix, "mac", repo.as_str()])
            }
            PackageFormat::Msi | PackageFormat::Swix => {
                let repo = self.repository_display_name(nonfinal)?;
                join_segments([prefix, request.platform_name, repo.as_str()])
            }
            PackageFormat::Rpm => {
                let repo = self.yum_repository_name(nonfinal)?;
                join_segments([prefix, repo.as_str()])
            }
            PackageFormat::Svr4 | PackageFormat::Ips => {
                let repo = self.repository_display_name(nonfinal)?;
                join_segments([prefix, "solaris", repo.as_str()])
            }
        };

        log::debug!(
            "Base path for {} ({}): {path}",
            request.platform_tag,
            request.package_format
        );
        Ok(path)
    }

    /// `None` when the request carries no link target.
    pub fn link_path(&self, request: &PathRequest<'_>) -> Result<Option<String>> {
        let Some(link) = request.link_target else {
            return Ok(None);
        };
        let prefix = request.prefix;

        let path = match request.package_format {
            PackageFormat::Rpm => join_segments([prefix, link]),
            PackageFormat::Swix | PackageFormat::Msi => {
                join_segments([prefix, request.platform_name, link])
            }
            PackageFormat::Deb => {
                let codename = request.platform_tag.require_codename()?;
                join_segments([prefix, "deb", codename, link])
            }
            PackageFormat::Svr4 | PackageFormat::Ips => join_segments([prefix, "solaris", link]),
            PackageFormat::Dmg => join_segments([prefix, "mac", link]),
        };
        Ok(Some(path))
    }

    pub fn artifacts_path_and_link_path(
        &self,
        tag: &PlatformTag,
        prefix: &str,
        nonfinal: bool,
    ) -> Result<(String, Option<String>)> {
        let link = self.link_name(nonfinal);
        let request =
            PathRequest::for_tag(*tag, prefix, nonfinal).with_link_target(link.as_deref());
        Ok((self.base_path(&request)?, self.link_path(&request)?))
    }

    pub fn artifacts_path(
        &self,
        tag: &PlatformTag,
        prefix: &str,
        nonfinal: bool,
    ) -> Result<String> {
        let request = PathRequest::for_tag(*tag, prefix, nonfinal);
        let base = self.base_path(&request)?;
        let architecture = tag.architecture().unwrap_or_default();

        let path = match tag.package_format() {
            PackageFormat::Rpm => join_segments([
                base.as_str(),
                tag.platform(),
                tag.version(),
                architecture,
            ]),
            PackageFormat::Swix | PackageFormat::Dmg => {
                join_segments([base.as_str(), tag.version(), architecture])
            }
            PackageFormat::Deb | PackageFormat::Msi => base,
            PackageFormat::Svr4 | PackageFormat::Ips => {
                join_segments([base.as_str(), tag.version()])
            }
        };
        Ok(path)
    }

    /// Repository storage path. `legacy` selects the ordering used by
    /// repositories created before the repository name moved to the top.
    pub fn repo_path(&self, tag: &PlatformTag, legacy: bool, nonfinal: bool) -> Result<String> {
        let mut repo = self.repository_display_name(nonfinal)?;
        if repo.is_empty() && legacy {
            repo = LEGACY_REPO_WILDCARD.to_string();
        }
        let repo = repo.as_str();
        let platform = tag.platform();
        let version = tag.version();
        let architecture = tag.architecture().unwrap_or_default();

        let path = match tag.package_format() {
            PackageFormat::Rpm | PackageFormat::Swix => {
                if legacy {
                    join_segments([REPOS_PREFIX, platform, version, repo, architecture])
                } else {
                    join_segments([REPOS_PREFIX, repo, platform, version, architecture])
                }
            }
            PackageFormat::Deb => {
                let codename = tag.require_codename()?;
                join_segments([REPOS_PREFIX, "apt", codename, "pool", repo])
            }
            PackageFormat::Svr4 | PackageFormat::Ips => {
                if legacy {
                    join_segments([REPOS_PREFIX, "solaris", version])
                } else {
                    join_segments([REPOS_PREFIX, "solaris", repo, version])
                }
            }
            PackageFormat::Dmg => {
                if legacy {
                    join_segments([REPOS_PREFIX, "apple", version, repo, architecture])
                } else {
                    join_segments([REPOS_PREFIX, "mac", repo, version, architecture])
                }
            }
            PackageFormat::Msi => {
                if legacy {
                    join_segments([REPOS_PREFIX, "windows"])
                } else {
                    join_segments([REPOS_PREFIX, "windows", repo])
                }
            }
        };
        Ok(path)
    }

    /// Glob matching the client configuration generated for `tag`.
    pub fn repo_config_path(&self, tag: &PlatformTag) -> Result<Option<String>> {
        let path = match tag.package_format() {
            PackageFormat::Rpm => Some(join_segments([
                REPO_CONFIGS_PREFIX,
                "rpm",
                format!("*{tag}*.repo").as_str(),
            ])),
            PackageFormat::Deb => {
                let codename = tag.require_codename()?;
                Some(join_segments([
                    REPO_CONFIGS_PREFIX,
                    "deb",
                    format!("*{codename}*.list").as_str(),
                ]))
            }
            PackageFormat::Msi
            | PackageFormat::Swix
            | PackageFormat::Dmg
            | PackageFormat::Svr4
            | PackageFormat::Ips => None,
        };
        Ok(path)
    }

    pub fn remote_repository_base(&self, format: PackageFormat, nonfinal: bool) -> Result<String> {
        let configured = match format {
            PackageFormat::Rpm
            | PackageFormat::Deb
            | PackageFormat::Dmg
            | PackageFormat::Swix
            | PackageFormat::Msi => self.settings.remote_repo_path(format, nonfinal),
            PackageFormat::Svr4 | PackageFormat::Ips => {
                return Err(PackagingError::ConfigurationError(format!(
                    "Can't determine remote repo base path for package format '{format}'"
                )));
            }
        };

        let Some(base) = configured else {
            let channel = if nonfinal { "nonfinal " } else { "" };
            return Err(PackagingError::ConfigurationError(format!(
                "No {channel}remote repository path configured for package format '{format}'"
            )));
        };

        // Projects shipping to the downloads server share its root
        if DOWNLOADS_PROJECT_DIR.is_match(&base) {
            log::debug!("Collapsing {base} to {DOWNLOADS_ROOT}");
            return Ok(DOWNLOADS_ROOT.to_string());
        }
        Ok(base)
    }

    pub fn remote_repository_base_for(&self, tag: &PlatformTag, nonfinal: bool) -> Result<String> {
        self.remote_repository_base(tag.package_format(), nonfinal)
    }

    /// Remote location of the `<link>-release` bootstrap package, if the
    /// tag's format has one.
    pub fn release_package_link_path(
        &self,
        tag: &PlatformTag,
        nonfinal: bool,
    ) -> Result<Option<String>> {
        let file_name = match tag.package_format() {
            PackageFormat::Rpm => format!(
                "{}-release-{}-{}.noarch.rpm",
                self.required_link_name(nonfinal)?,
                tag.platform(),
                tag.version()
            ),
            PackageFormat::Deb => format!(
                "{}-release-{}.deb",
                self.required_link_name(nonfinal)?,
                tag.require_codename()?
            ),
            format @ (PackageFormat::Dmg
            | PackageFormat::Msi
            | PackageFormat::Swix
            | PackageFormat::Svr4
            | PackageFormat::Ips) => {
                log::warn!("No release packages for package format '{format}', skipping");
                return Ok(None);
            }
        };

        let base = self.remote_repository_base_for(tag, nonfinal)?;
        Ok(Some(join_segments([base.as_str(), file_name.as_str()])))
    }

    pub fn package_architecture_alias<'s>(&self, platform: &str, architecture: &'s str) -> &'s str {
        platforms::package_architecture_alias(platform, architecture)
    }

    fn required_link_name(&self, nonfinal: bool) -> Result<String> {
        self.link_name(nonfinal).ok_or_else(|| {
            let key = if nonfinal {
                "nonfinal_repo_link_target"
            } else {
                "repo_link_target"
            };
            PackagingError::ConfigurationError(format!("{key} is unset"))
        })
    }
}
