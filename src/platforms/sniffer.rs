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

//! Recovers the platform tag a build artifact was produced for from the
//! artifact's path.
//!
//! Callers use this to sort heterogeneous file listings, so there are two ways
//! to fail: paths that look like packages but cannot be classified are an
//! error, while platform-independent files (checksums, tarballs) yield `None`.

use crate::error::{PackagingError, Result};
use crate::models::PackageFormat;
use crate::platforms::catalog::{PlatformCatalog, PlatformEntry};
use crate::platforms::package_architecture_alias;
use crate::platforms::tag::PlatformTag;
use std::path::Path;

const WINDOWS_FIPS: &str = "windowsfips";
/// The only Windows Server release in the catalog.
const WINDOWS_VERSION: &str = "2012";

#[derive(Debug, Clone, Copy)]
pub struct ArtifactPathSniffer<'c> {
    catalog: &'c PlatformCatalog,
}

impl Default for ArtifactPathSniffer<'static> {
    fn default() -> Self {
        Self::new(PlatformCatalog::global())
    }
}

impl<'c> ArtifactPathSniffer<'c> {
    pub fn new(catalog: &'c PlatformCatalog) -> Self {
        Self { catalog }
    }

    /// Infers the tag of the artifact at `path`.
    ///
    /// Returns `Ok(None)` for files that carry no platform marker and do not
    /// look like packages.
    pub fn tag_from(&self, path: &str) -> Result<Option<PlatformTag>> {
        let Some(entry) = self.entry_for(path)? else {
            return self.unclassified(path);
        };

        let architecture = self.architecture_for(entry, path);
        let tag = PlatformTag::from_entry(entry, Some(architecture));
        log::debug!("Classified {path} as {tag}");
        Ok(Some(tag))
    }

    fn entry_for(&self, path: &str) -> Result<Option<&'static PlatformEntry>> {
        let Some(platform) = self.platform_in(path) else {
            return Ok(self.codename_entry_in(path, None));
        };

        let version = if platform.starts_with("windows") {
            Some(WINDOWS_VERSION)
        } else {
            self.version_in(platform, path)?
        };
        if let Some(version) = version {
            return self.catalog.entry(platform, version).map(Some);
        }

        // Apt trees name the release by codename, e.g. pkg/ubuntu/bionic/
        match self.codename_entry_in(path, Some(platform)) {
            Some(entry) => Ok(Some(entry)),
            None => Err(PackagingError::CannotDetermineTag(path.to_string())),
        }
    }

    fn platform_in(&self, path: &str) -> Option<&'static str> {
        // "windows" is a prefix of "windowsfips"; check the longer name first
        if path.contains(WINDOWS_FIPS) && self.catalog.has_platform(WINDOWS_FIPS) {
            return Some(WINDOWS_FIPS);
        }

        let mut found: Option<&'static str> = None;
        for platform in self.catalog.all_platforms() {
            if has_platform_marker(path, platform) {
                log::trace!("{path}: platform candidate {platform}");
                if found.is_none_or(|current| platform.len() > current.len()) {
                    found = Some(platform);
                }
            }
        }
        found
    }

    /// Entry of the first codename found as a path segment, restricted to
    /// `platform` when one was already identified.
    fn codename_entry_in(
        &self,
        path: &str,
        platform: Option<&str>,
    ) -> Option<&'static PlatformEntry> {
        self.catalog
            .all_codenames()
            .into_iter()
            .filter(|codename| has_codename_segment(path, codename))
            .filter_map(|codename| self.catalog.find_codename_entry(codename))
            .find(|entry| platform.is_none_or(|platform| entry.platform == platform))
    }

    fn version_in(&self, platform: &str, path: &str) -> Result<Option<&'static str>> {
        let mut found: Option<&'static str> = None;
        for version in self.catalog.versions_for(platform)? {
            let matched = ["/", "-", ""].iter().any(|separator| {
                let needle = format!("{platform}{separator}{version}");
                path.match_indices(&needle).any(|(index, _)| {
                    !path[index + needle.len()..]
                        .starts_with(|c: char| c.is_ascii_digit())
                })
            });
            if matched && found.is_none_or(|current| version.len() > current.len()) {
                found = Some(version);
            }
        }
        Ok(found)
    }

    fn architecture_for(&self, entry: &'static PlatformEntry, path: &str) -> &'static str {
        if entry.is_source_package(path)
            && let Some(source) = entry.source_architecture
        {
            return source;
        }

        let mut found: Option<&'static str> = None;
        for &arch in entry.architectures {
            let published = package_architecture_alias(entry.platform, arch);
            if path.contains(published) && found.is_none_or(|current| arch.len() > current.len()) {
                found = Some(arch);
            }
        }

        found.unwrap_or_else(|| {
            log::debug!(
                "No architecture for {} {} in {path}, using {}",
                entry.platform,
                entry.version,
                entry.architectures[0]
            );
            entry.architectures[0]
        })
    }

    fn unclassified(&self, path: &str) -> Result<Option<PlatformTag>> {
        if PackageFormat::from_file_name(path).is_some() {
            return Err(PackagingError::CannotDetermineTag(path.to_string()));
        }

        // An extensionless entry inside a package-format tree (".../deb/<x>")
        // is an unrecognised platform directory, not a loose file.
        let has_extension = Path::new(path).extension().is_some();
        let mut directories = path.trim_end_matches('/').split('/').rev().skip(1);
        if !has_extension
            && directories.any(|segment| segment.parse::<PackageFormat>().is_ok())
        {
            return Err(PackagingError::CannotDetermineTag(path.to_string()));
        }

        log::debug!("{path} is not platform specific");
        Ok(None)
    }
}

/// Convenience wrapper over the global catalog.
pub fn tag_from_artifact_path(path: &str) -> Result<Option<PlatformTag>> {
    ArtifactPathSniffer::default().tag_from(path)
}

/// `name` preceded by a path separator or a dot (or at the start) and not
/// running on into a longer word.
fn has_platform_marker(path: &str, name: &str) -> bool {
    path.match_indices(name).any(|(index, _)| {
        let before = path[..index].chars().next_back();
        let after = path[index + name.len()..].chars().next();
        matches!(before, None | Some('/') | Some('.'))
            && !matches!(after, Some(c) if c.is_ascii_alphabetic() || c == '.')
    })
}

fn has_codename_segment(path: &str, codename: &str) -> bool {
    path.match_indices(codename).any(|(index, _)| {
        let before = path[..index].chars().next_back();
        let after = path[index + codename.len()..].chars().next();
        matches!(before, None | Some('/')) && !matches!(after, Some(c) if c.is_ascii_alphanumeric())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sniff(path: &str) -> Option<String> {
        tag_from_artifact_path(path)
            .unwrap()
            .map(|tag| tag.to_string())
    }

    #[test]
    fn test_windows_msi() {
        assert_eq!(
            sniff("pkg/windows/puppet-agent-1.9.0-x86.msi").as_deref(),
            Some("windows-2012-x86")
        );
        assert_eq!(
            sniff("pkg/windows/puppet-agent-1.9.0-x64.msi").as_deref(),
            Some("windows-2012-x64")
        );
    }

    #[test]
    fn test_windowsfips_is_not_windows() {
        assert_eq!(
            sniff("pkg/windowsfips/puppet-agent-1.9.0-x64.msi").as_deref(),
            Some("windowsfips-2012-x64")
        );
    }

    #[test]
    fn test_rpm_paths() {
        assert_eq!(
            sniff("pkg/el/7/puppet6/x86_64/puppet-agent-6.0.0-1.el7.x86_64.rpm").as_deref(),
            Some("el-7-x86_64")
        );
        assert_eq!(
            sniff("pkg/sles/12/puppet6/ppc64le/puppet-agent-6.0.0-1.sles12.ppc64le.rpm")
                .as_deref(),
            Some("sles-12-ppc64le")
        );
        assert_eq!(
            sniff("pkg/puppet-agent-6.0.0-1.el6.i386.rpm").as_deref(),
            Some("el-6-i386")
        );
    }

    #[test]
    fn test_longest_platform_wins() {
        // "el7" in the file name must not beat the redhatfips directory
        assert_eq!(
            sniff("pkg/redhatfips/7/puppet6/x86_64/puppet-agent-6.0.0-1.el7.x86_64.rpm")
                .as_deref(),
            Some("redhatfips-7-x86_64")
        );
    }

    #[test]
    fn test_source_rpm_uses_source_architecture() {
        assert_eq!(
            sniff("pkg/el/7/puppet6/SRPMS/puppet-agent-6.0.0-1.el7.src.rpm").as_deref(),
            Some("el-7-SRPMS")
        );
    }

    #[test]
    fn test_debian_codename_paths() {
        assert_eq!(
            sniff("pkg/deb/bionic/puppet6/puppet-agent_6.0.0-1bionic_amd64.deb").as_deref(),
            Some("ubuntu-18.04-amd64")
        );
        assert_eq!(
            sniff("pkg/deb/stretch/puppet6/puppet-agent_6.0.0-1stretch_i386.deb").as_deref(),
            Some("debian-9-i386")
        );
        assert_eq!(
            sniff("pkg/deb/buster/puppet6/puppet-agent_6.0.0.orig.tar.gz").as_deref(),
            Some("debian-10-source")
        );
    }

    #[test]
    fn test_platform_directory_with_codename_release() {
        assert_eq!(
            sniff("pkg/deb/cumulus/PC1/puppet-agent_1.10.0-1cumulus_amd64.deb").as_deref(),
            Some("cumulus-2.2-amd64")
        );
        assert_eq!(
            sniff("pkg/ubuntu/bionic/puppet6/puppet-agent_6.0.0-1bionic_amd64.deb").as_deref(),
            Some("ubuntu-18.04-amd64")
        );
    }

    #[test]
    fn test_codename_of_another_platform_is_an_error() {
        assert!(matches!(
            tag_from_artifact_path("pkg/debian/bionic/puppet-agent_6.0.0-1bionic_amd64.deb"),
            Err(PackagingError::CannotDetermineTag(_))
        ));
    }

    #[test]
    fn test_ubuntu_arm64_is_published_as_aarch64() {
        assert_eq!(
            sniff("pkg/deb/bionic/puppet6/puppet-agent_6.0.0-1bionic_arm64.deb").as_deref(),
            Some("ubuntu-18.04-aarch64")
        );
    }

    #[test]
    fn test_fallback_to_first_architecture() {
        assert_eq!(
            sniff("pkg/apple/10.14/puppet6/puppet-agent-6.0.0-1.osx10.14.dmg").as_deref(),
            Some("osx-10.14-x86_64")
        );
        assert_eq!(
            sniff("pkg/solaris/11/puppet-agent@6.0.0,5.11-1.p5p").as_deref(),
            Some("solaris-11-i386")
        );
    }

    #[test]
    fn test_longest_version_wins() {
        assert_eq!(
            sniff("pkg/fedora/f26/puppet6/x86_64/puppet-agent-6.0.0-1.fc26.x86_64.rpm")
                .as_deref(),
            Some("fedora-f26-x86_64")
        );
        assert_eq!(
            sniff("pkg/aix/7.2/puppet6/ppc/puppet-agent-6.0.0-1.aix7.2.ppc.rpm").as_deref(),
            Some("aix-7.2-power")
        );
    }

    #[test]
    fn test_platform_without_version_is_an_error() {
        assert!(matches!(
            tag_from_artifact_path("pkg/el/puppet-agent-6.0.0.x86_64.rpm"),
            Err(PackagingError::CannotDetermineTag(_))
        ));
    }

    #[test]
    fn test_package_without_platform_is_an_error() {
        assert!(matches!(
            tag_from_artifact_path("pkg/puppet-agent-6.0.0.x86_64.rpm"),
            Err(PackagingError::CannotDetermineTag(ref p))
                if p == "pkg/puppet-agent-6.0.0.x86_64.rpm"
        ));
        assert!(matches!(
            tag_from_artifact_path("pkg/deb/preice/puppet-agent_6.0.0_amd64.deb"),
            Err(PackagingError::CannotDetermineTag(_))
        ));
    }

    #[test]
    fn test_unknown_directory_in_package_tree_is_an_error() {
        assert!(matches!(
            tag_from_artifact_path("pkg/pe/deb/preice"),
            Err(PackagingError::CannotDetermineTag(_))
        ));
    }

    #[test]
    fn test_platform_independent_files() {
        assert_eq!(sniff("pkg/SHA256SUMS"), None);
        assert_eq!(sniff("pkg/puppet-agent-6.0.0.tar.gz"), None);
        assert_eq!(sniff("pkg/puppet-agent-6.0.0.tar.gz.asc"), None);
        assert_eq!(sniff("pkg/deb/README.txt"), None);
    }

    #[test]
    fn test_platform_marker_boundaries() {
        assert!(has_platform_marker("pkg/el/7", "el"));
        assert!(has_platform_marker("a-1.el7.x86_64.rpm", "el"));
        assert!(has_platform_marker("el/7", "el"));
        assert!(!has_platform_marker("pkg/elastic/7", "el"));
        assert!(!has_platform_marker("pkg/windowsfips/x", "windows"));
        assert!(!has_platform_marker("pkg/model/7", "el"));
    }
}
