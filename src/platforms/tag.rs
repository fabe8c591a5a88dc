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

//! `<platform>-<version>-<architecture>` tags.
//!
//! Platform names and versions may contain hyphens themselves
//! (`cisco-wrlinux-7-x86_64`), so a tag cannot be split at fixed positions.
//! Parsing walks the possible split points, longest platform name first, and
//! accepts the first decomposition the catalog confirms.

use crate::error::{PackagingError, Result};
use crate::models::PackageFormat;
use crate::platforms::catalog::{PlatformCatalog, PlatformEntry};
use std::fmt;
use std::str::FromStr;

/// A catalog-validated build target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformTag {
    entry: &'static PlatformEntry,
    architecture: Option<&'static str>,
}

impl PlatformTag {
    pub fn parse(tag: &str) -> Result<Self> {
        Self::parse_with(PlatformCatalog::global(), tag)
    }

    pub fn parse_with(catalog: &PlatformCatalog, tag: &str) -> Result<Self> {
        let segments: Vec<&str> = tag.split('-').collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(PackagingError::InvalidPlatformTag(tag.to_string()));
        }

        for split in (1..=segments.len()).rev() {
            let platform = segments[..split].join("-");
            if !catalog.has_platform(&platform) {
                continue;
            }
            if let Some(parsed) = match_version(catalog, &platform, &segments[split..]) {
                log::trace!("Parsed '{tag}' as {parsed:?}");
                return Ok(parsed);
            }
        }

        // Debian-family tags may lead with the codename instead ("xenial-amd64")
        for split in (1..=segments.len()).rev() {
            let codename = segments[..split].join("-");
            let Some(entry) = catalog.find_codename_entry(&codename) else {
                continue;
            };
            if let Some(architecture) = match_architecture(entry, &segments[split..]) {
                return Ok(PlatformTag {
                    entry,
                    architecture,
                });
            }
        }

        Err(PackagingError::InvalidPlatformTag(tag.to_string()))
    }

    /// Builds a tag from already separated parts, validating each of them.
    pub fn from_parts(platform: &str, version: &str, architecture: Option<&str>) -> Result<Self> {
        let catalog = PlatformCatalog::global();
        let entry = catalog.entry(platform, version)?;
        let architecture = match architecture {
            None => None,
            Some(arch) => Some(
                entry
                    .architectures(true)
                    .into_iter()
                    .find(|candidate| *candidate == arch)
                    .ok_or_else(|| {
                        PackagingError::InvalidPlatformTag(format_platform_tag(
                            platform,
                            version,
                            Some(arch),
                        ))
                    })?,
            ),
        };
        Ok(PlatformTag {
            entry,
            architecture,
        })
    }

    pub(crate) fn from_entry(
        entry: &'static PlatformEntry,
        architecture: Option<&'static str>,
    ) -> Self {
        PlatformTag {
            entry,
            architecture,
        }
    }

    pub fn platform(&self) -> &'static str {
        self.entry.platform
    }

    pub fn version(&self) -> &'static str {
        self.entry.version
    }

    pub fn architecture(&self) -> Option<&'static str> {
        self.architecture
    }

    pub fn entry(&self) -> &'static PlatformEntry {
        self.entry
    }

    pub fn package_format(&self) -> PackageFormat {
        self.entry.package_format
    }

    pub fn codename(&self) -> Option<&'static str> {
        self.entry.codename
    }

    /// Codename lookup for operations that only make sense on Debian-family tags.
    pub fn require_codename(&self) -> Result<&'static str> {
        self.entry.codename.ok_or_else(|| PackagingError::MissingAttribute {
            platform: self.platform().to_string(),
            version: self.version().to_string(),
            attribute: "codename".to_string(),
        })
    }
}

fn match_version(
    catalog: &PlatformCatalog,
    platform: &str,
    rest: &[&str],
) -> Option<PlatformTag> {
    for split in (1..=rest.len()).rev() {
        let version = rest[..split].join("-");
        let Some(entry) = catalog.find_entry(platform, &version) else {
            continue;
        };
        if let Some(architecture) = match_architecture(entry, &rest[split..]) {
            return Some(PlatformTag {
                entry,
                architecture,
            });
        }
    }
    None
}

/// `Some(None)` when no architecture segment is present, `None` when the
/// remaining segments do not name one of the entry's architectures.
fn match_architecture(
    entry: &'static PlatformEntry,
    rest: &[&str],
) -> Option<Option<&'static str>> {
    if rest.is_empty() {
        return Some(None);
    }
    let candidate = rest.join("-");
    entry
        .architectures(true)
        .into_iter()
        .find(|arch| *arch == candidate)
        .map(Some)
}

pub fn format_platform_tag(platform: &str, version: &str, architecture: Option<&str>) -> String {
    match architecture {
        Some(arch) => format!("{platform}-{version}-{arch}"),
        None => format!("{platform}-{version}"),
    }
}

impl FromStr for PlatformTag {
    type Err = PackagingError;

    fn from_str(s: &str) -> Result<Self> {
        PlatformTag::parse(s)
    }
}

impl fmt::Display for PlatformTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            format_platform_tag(self.platform(), self.version(), self.architecture)
        )
    }
}
