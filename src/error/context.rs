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

use crate::error::PackagingError;
use std::fmt;

pub struct ErrorContext<'a> {
    pub error: &'a PackagingError,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl<'a> ErrorContext<'a> {
    pub fn new(error: &'a PackagingError) -> Self {
        let (suggestion, details) = match error {
            PackagingError::UnknownPlatform(_) => {
                let suggestion = Some(
                    "Run 'packaging platforms' to list the supported platforms.".to_string(),
                );
                (suggestion, None)
            }
            PackagingError::UnknownPlatformVersion { platform, .. } => {
                let suggestion = Some(format!(
                    "Run 'packaging platforms' to list the supported versions of '{platform}'."
                ));
                (suggestion, None)
            }
            PackagingError::UnknownCodename(_) => {
                let suggestion =
                    Some("Run 'packaging codenames' to list the known codenames.".to_string());
                (suggestion, None)
            }
            PackagingError::MissingAttribute { attribute, .. } => {
                let details = Some(format!(
                    "Platform attributes are sparse; '{attribute}' only exists for some entries."
                ));
                (None, details)
            }
            PackagingError::InvalidPlatformTag(_) => {
                let suggestion = Some(
                    "Platform tags look like '<platform>-<version>-<architecture>' (e.g., \
                     'el-7-x86_64' or 'ubuntu-18.04-amd64')."
                        .to_string(),
                );
                (suggestion, None)
            }
            PackagingError::UnknownPackageFormat(format) => {
                let suggestion =
                    Some("Known package formats: rpm, deb, dmg, msi, swix, svr4, ips.".to_string());
                let details = Some(format!("Refusing to guess a layout for '{format}'."));
                (suggestion, details)
            }
            PackagingError::ConfigurationError(msg) => {
                let suggestion = Some(
                    "Set the value in ext/build_defaults.toml or export it with the PACKAGING_ \
                     prefix (e.g., PACKAGING_NONFINAL_REPO_NAME=puppet7-nightly)."
                        .to_string(),
                );
                let details = Some(msg.clone());
                (suggestion, details)
            }
            PackagingError::ConfigFile(msg) => {
                let suggestion =
                    Some("Check that the configuration file exists and is valid TOML.".to_string());
                let details = Some(msg.clone());
                (suggestion, details)
            }
            PackagingError::Config(config_err) => {
                let suggestion =
                    Some("Check the configuration file and PACKAGING_* variables.".to_string());
                let details = Some(format!("Config error: {config_err}"));
                (suggestion, details)
            }
            PackagingError::NotDebianPlatform(_) => {
                let suggestion = Some(
                    "Debian package paths only exist for deb platforms such as \
                     'ubuntu-18.04-amd64' or 'debian-10-amd64'."
                        .to_string(),
                );
                (suggestion, None)
            }
            PackagingError::UnknownDebianRepository { repository, .. } => {
                let suggestion = Some(
                    "Use a release repository name such as 'puppet7' or 'puppet6'.".to_string(),
                );
                let details = Some(format!(
                    "'{repository}' is neither a current nor a legacy apt repository name."
                ));
                (suggestion, details)
            }
            PackagingError::CannotDetermineComponent(_) => {
                let details = Some(
                    "Expected a '<major.minor>/<name>', 'main/<name>' or 'master/<name>' segment \
                     pair."
                        .to_string(),
                );
                (None, details)
            }
            PackagingError::CannotDetermineTag(_) => {
                let suggestion = Some(
                    "Artifacts must live under a platform directory (e.g., 'pkg/el/7/...') or \
                     carry the platform in their file name."
                        .to_string(),
                );
                (suggestion, None)
            }
            PackagingError::Io(io_err) => {
                let suggestion = match io_err.kind() {
                    std::io::ErrorKind::NotFound => Some(
                        "Ensure the file or directory exists and the path is correct.".to_string(),
                    ),
                    std::io::ErrorKind::PermissionDenied => {
                        Some("Check file permissions.".to_string())
                    }
                    _ => None,
                };
                let details = Some(format!("I/O error: {io_err}"));
                (suggestion, details)
            }
            _ => (None, None),
        };

        ErrorContext {
            error,
            suggestion,
            details,
        }
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    pub fn with_details(mut self, details: String) -> Self {
        self.details = Some(details);
        self
    }
}

impl<'a> fmt::Display for ErrorContext<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\n\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}
