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

pub const DEFAULT_YUM_REPO_NAME: &str = "products";
pub const DEFAULT_APT_REPO_NAME: &str = "main";

/// Repositories that own a whole apt tree per release (name above codename).
pub const NEW_LAYOUT_REPO_NAMES: &[&str] = &[
    "puppet7",
    "puppet7-nightly",
    "puppet8",
    "puppet8-nightly",
    "puppet",
    "puppet-nightly",
    "puppet-tools",
];

/// Repositories published into the shared apt pool (codename above name).
pub const LEGACY_REPO_NAMES: &[&str] = &[
    "PC1",
    "main",
    "stable",
    "puppet5",
    "puppet5-nightly",
    "puppet6",
    "puppet6-nightly",
];

pub fn is_new_layout_repo(name: &str) -> bool {
    NEW_LAYOUT_REPO_NAMES.contains(&name)
}

pub fn is_legacy_repo(name: &str) -> bool {
    LEGACY_REPO_NAMES.contains(&name)
}

/// Repository names derived from [`RepositorySettings`].
pub struct RepositoryNames<'a, S: RepositorySettings> {
    settings: &'a S,
}

impl<'a, S: RepositorySettings> RepositoryNames<'a, S> {
    pub fn new(settings: &'a S) -> Self {
        Self { settings }
    }

    /// The configured repository name; empty when unset and `nonfinal` is false.
    pub fn display_name(&self, nonfinal: bool) -> Result<String> {
        if nonfinal {
            return self.nonfinal_name();
        }
        Ok(self.settings.repo_name().unwrap_or_default())
    }

    /// `repo_name` wins over the legacy `yum_repo_name`.
    pub fn yum_name(&self, nonfinal: bool) -> Result<String> {
        if nonfinal {
            return self.nonfinal_name();
        }
        Ok(self
            .settings
            .repo_name()
            .or_else(|| self.settings.yum_repo_name())
            .unwrap_or_else(|| DEFAULT_YUM_REPO_NAME.to_string()))
    }

    /// `repo_name` wins over the legacy `apt_repo_name`.
    pub fn apt_name(&self, nonfinal: bool) -> Result<String> {
        if nonfinal {
            return self.nonfinal_name();
        }
        Ok(self
            .settings
            .repo_name()
            .or_else(|| self.settings.apt_repo_name())
            .unwrap_or_else(|| DEFAULT_APT_REPO_NAME.to_string()))
    }

    pub fn link_name(&self, nonfinal: bool) -> Option<String> {
        if nonfinal {
            self.settings.nonfinal_repo_link_target()
        } else {
            self.settings.repo_link_target()
        }
    }

    fn nonfinal_name(&self) -> Result<String> {
        self.settings.nonfinal_repo_name().ok_or_else(|| {
            PackagingError::ConfigurationError(
                "nonfinal is set but nonfinal_repo_name is unset".to_string(),
            )
        })
    }
}
