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

//! Static registry of every platform/version combination the build tooling
//! can produce packages for.
//!
//! The table is plain `'static` data. Every query is a read over it, so the
//! catalog can be shared freely between threads.

use crate::error::{PackagingError, Result};
use crate::models::{PackageFormat, SignatureFormat};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

const RPM_SOURCE_FORMATS: &[&str] = &["src.rpm"];
const DEBIAN_SOURCE_FORMATS: &[&str] = &["debian.tar.gz", "orig.tar.gz", "dsc", "changes"];

/// One supported (platform, version) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformEntry {
    pub platform: &'static str,
    pub version: &'static str,
    pub codename: Option<&'static str>,
    /// Ordered; the first element is the fallback architecture.
    pub architectures: &'static [&'static str],
    pub source_architecture: Option<&'static str>,
    pub source_package_formats: &'static [&'static str],
    pub package_format: PackageFormat,
    pub signature_format: Option<SignatureFormat>,
    pub repo: bool,
}

impl PlatformEntry {
    pub fn architectures(&self, include_source: bool) -> Vec<&'static str> {
        let mut architectures = self.architectures.to_vec();
        if include_source && let Some(source) = self.source_architecture {
            architectures.push(source);
        }
        architectures
    }

    pub fn supports_architecture(&self, architecture: &str) -> bool {
        self.architectures.iter().any(|arch| *arch == architecture)
            || self.source_architecture == Some(architecture)
    }

    /// Whether `path` names one of this entry's source package kinds.
    pub fn is_source_package(&self, path: &str) -> bool {
        self.source_package_formats
            .iter()
            .any(|suffix| path.ends_with(suffix))
    }

    pub fn attribute(&self, attribute: PlatformAttribute) -> Result<AttributeValue> {
        let value = match attribute {
            PlatformAttribute::Architectures => {
                Some(AttributeValue::List(self.architectures.to_vec()))
            }
            PlatformAttribute::Codename => self.codename.map(AttributeValue::Text),
            PlatformAttribute::PackageFormat => Some(AttributeValue::Format(self.package_format)),
            PlatformAttribute::SignatureFormat => {
                self.signature_format.map(AttributeValue::Signature)
            }
            PlatformAttribute::Repo => Some(AttributeValue::Flag(self.repo)),
            PlatformAttribute::SourceArchitecture => {
                self.source_architecture.map(AttributeValue::Text)
            }
            PlatformAttribute::SourcePackageFormats => {
                if self.source_package_formats.is_empty() {
                    None
                } else {
                    Some(AttributeValue::List(self.source_package_formats.to_vec()))
                }
            }
        };

        value.ok_or_else(|| PackagingError::MissingAttribute {
            platform: self.platform.to_string(),
            version: self.version.to_string(),
            attribute: attribute.to_string(),
        })
    }
}

/// Named, possibly absent, fields of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformAttribute {
    Architectures,
    Codename,
    PackageFormat,
    SignatureFormat,
    Repo,
    SourceArchitecture,
    SourcePackageFormats,
}

impl FromStr for PlatformAttribute {
    type Err = PackagingError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "architectures" => Ok(PlatformAttribute::Architectures),
            "codename" => Ok(PlatformAttribute::Codename),
            "package_format" => Ok(PlatformAttribute::PackageFormat),
            "signature_format" => Ok(PlatformAttribute::SignatureFormat),
            "repo" => Ok(PlatformAttribute::Repo),
            "source_architecture" => Ok(PlatformAttribute::SourceArchitecture),
            "source_package_formats" => Ok(PlatformAttribute::SourcePackageFormats),
            _ => Err(PackagingError::ConfigurationError(format!(
                "Unknown platform attribute: {s}"
            ))),
        }
    }
}

impl fmt::Display for PlatformAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlatformAttribute::Architectures => "architectures",
            PlatformAttribute::Codename => "codename",
            PlatformAttribute::PackageFormat => "package_format",
            PlatformAttribute::SignatureFormat => "signature_format",
            PlatformAttribute::Repo => "repo",
            PlatformAttribute::SourceArchitecture => "source_architecture",
            PlatformAttribute::SourcePackageFormats => "source_package_formats",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(&'static str),
    List(Vec<&'static str>),
    Format(PackageFormat),
    Signature(SignatureFormat),
    Flag(bool),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Text(text) => write!(f, "{text}"),
            AttributeValue::List(items) => write!(f, "{}", items.join(", ")),
            AttributeValue::Format(format) => write!(f, "{format}"),
            AttributeValue::Signature(signature) => write!(f, "{signature}"),
            AttributeValue::Flag(flag) => write!(f, "{flag}"),
        }
    }
}

macro_rules! rpm {
    ($platform:expr, $version:expr, [$($arch:expr),+], $signature:ident, $repo:expr) => {
        PlatformEntry {
            platform: $platform,
            version: $version,
            codename: None,
            architectures: &[$($arch),+],
            source_architecture: Some("SRPMS"),
            source_package_formats: RPM_SOURCE_FORMATS,
            package_format: PackageFormat::Rpm,
            signature_format: Some(SignatureFormat::$signature),
            repo: $repo,
        }
    };
}

macro_rules! deb {
    ($platform:expr, $version:expr, $codename:expr, [$($arch:expr),+]) => {
        PlatformEntry {
            platform: $platform,
            version: $version,
            codename: Some($codename),
            architectures: &[$($arch),+],
            source_architecture: Some("source"),
            source_package_formats: DEBIAN_SOURCE_FORMATS,
            package_format: PackageFormat::Deb,
            signature_format: None,
            repo: true,
        }
    };
}

macro_rules! download {
    ($platform:expr, $version:expr, [$($arch:expr),+], $format:ident, $signature:expr) => {
        PlatformEntry {
            platform: $platform,
            version: $version,
            codename: None,
            architectures: &[$($arch),+],
            source_architecture: None,
            source_package_formats: &[],
            package_format: PackageFormat::$format,
            signature_format: $signature,
            repo: false,
        }
    };
}

const PLATFORMS: &[PlatformEntry] = &[
    rpm!("aix", "7.1", ["power"], V3, false),
    rpm!("aix", "7.2", ["power"], V3, false),
    rpm!("cisco-wrlinux", "5", ["x86_64"], V4, false),
    rpm!("cisco-wrlinux", "7", ["x86_64"], V4, false),
    deb!("cumulus", "2.2", "cumulus", ["amd64"]),
    deb!("debian", "8", "jessie", ["amd64", "i386", "powerpc"]),
    deb!("debian", "9", "stretch", ["amd64", "i386"]),
    deb!("debian", "10", "buster", ["amd64", "i386"]),
    deb!("debian", "11", "bullseye", ["amd64"]),
    rpm!("el", "5", ["x86_64", "i386"], V3, true),
    rpm!("el", "6", ["x86_64", "i386", "s390x"], V4, true),
    rpm!("el", "7", ["x86_64", "s390x", "ppc64le", "aarch64"], V4, true),
    rpm!("el", "8", ["x86_64", "ppc64le", "aarch64"], V4, true),
    download!("eos", "4", ["i386"], Swix, Some(SignatureFormat::V4)),
    rpm!("fedora", "f25", ["x86_64", "i386"], V4, true),
    rpm!("fedora", "f26", ["x86_64"], V4, true),
    rpm!("fedora", "30", ["x86_64"], V4, true),
    rpm!("fedora", "31", ["x86_64"], V4, true),
    rpm!("fedora", "32", ["x86_64"], V4, true),
    download!("osx", "10.12", ["x86_64"], Dmg, None),
    download!("osx", "10.13", ["x86_64"], Dmg, None),
    download!("osx", "10.14", ["x86_64"], Dmg, None),
    download!("osx", "10.15", ["x86_64"], Dmg, None),
    rpm!("redhatfips", "7", ["x86_64"], V4, true),
    rpm!("sles", "11", ["x86_64", "i386", "s390x"], V3, true),
    rpm!("sles", "12", ["x86_64", "s390x", "ppc64le"], V4, true),
    rpm!("sles", "15", ["x86_64"], V4, true),
    download!("solaris", "10", ["i386", "sparc"], Svr4, None),
    download!("solaris", "11", ["i386", "sparc"], Ips, None),
    deb!("ubuntu", "14.04", "trusty", ["amd64", "i386"]),
    deb!("ubuntu", "16.04", "xenial", ["amd64", "i386", "ppc64el"]),
    deb!("ubuntu", "18.04", "bionic", ["amd64", "ppc64el", "aarch64"]),
    deb!("ubuntu", "20.04", "focal", ["amd64", "aarch64"]),
    download!("windows", "2012", ["x86", "x64"], Msi, None),
    download!("windowsfips", "2012", ["x64"], Msi, None),
];

static CATALOG: PlatformCatalog = PlatformCatalog { entries: PLATFORMS };

/// Read-only queries over the platform table.
#[derive(Debug)]
pub struct PlatformCatalog {
    entries: &'static [PlatformEntry],
}

impl PlatformCatalog {
    /// The process-wide catalog of supported platforms.
    pub fn global() -> &'static PlatformCatalog {
        &CATALOG
    }

    pub fn entries(&self) -> &'static [PlatformEntry] {
        self.entries
    }

    pub fn has_platform(&self, platform: &str) -> bool {
        self.entries.iter().any(|entry| entry.platform == platform)
    }

    pub fn all_platforms(&self) -> BTreeSet<&'static str> {
        self.entries.iter().map(|entry| entry.platform).collect()
    }

    pub fn platforms_by_format(&self, format: PackageFormat) -> BTreeSet<&'static str> {
        self.entries
            .iter()
            .filter(|entry| entry.package_format == format)
            .map(|entry| entry.platform)
            .collect()
    }

    pub fn all_package_formats(&self) -> BTreeSet<PackageFormat> {
        self.entries.iter().map(|entry| entry.package_format).collect()
    }

    pub fn versions_for(&self, platform: &str) -> Result<Vec<&'static str>> {
        let versions: Vec<_> = self
            .entries
            .iter()
            .filter(|entry| entry.platform == platform)
            .map(|entry| entry.version)
            .collect();

        if versions.is_empty() {
            return Err(PackagingError::UnknownPlatform(platform.to_string()));
        }
        Ok(versions)
    }

    pub fn find_entry(&self, platform: &str, version: &str) -> Option<&'static PlatformEntry> {
        self.entries
            .iter()
            .find(|entry| entry.platform == platform && entry.version == version)
    }

    pub fn entry(&self, platform: &str, version: &str) -> Result<&'static PlatformEntry> {
        self.find_entry(platform, version)
            .ok_or_else(|| PackagingError::UnknownPlatformVersion {
                platform: platform.to_string(),
                version: version.to_string(),
            })
    }

    pub fn architectures_for(
        &self,
        platform: &str,
        version: &str,
        include_source: bool,
    ) -> Result<Vec<&'static str>> {
        Ok(self.entry(platform, version)?.architectures(include_source))
    }

    pub fn attribute(
        &self,
        platform: &str,
        version: &str,
        attribute: PlatformAttribute,
    ) -> Result<AttributeValue> {
        self.entry(platform, version)?.attribute(attribute)
    }

    pub fn package_format_for(&self, platform: &str, version: &str) -> Result<PackageFormat> {
        Ok(self.entry(platform, version)?.package_format)
    }

    pub fn signature_format_for(&self, platform: &str, version: &str) -> Result<SignatureFormat> {
        let entry = self.entry(platform, version)?;
        entry
            .signature_format
            .ok_or_else(|| PackagingError::MissingAttribute {
                platform: platform.to_string(),
                version: version.to_string(),
                attribute: PlatformAttribute::SignatureFormat.to_string(),
            })
    }

    pub fn codename_for(&self, platform: &str, version: &str) -> Result<&'static str> {
        let entry = self.entry(platform, version)?;
        entry.codename.ok_or_else(|| PackagingError::MissingAttribute {
            platform: platform.to_string(),
            version: version.to_string(),
            attribute: PlatformAttribute::Codename.to_string(),
        })
    }

    pub fn is_repo_platform(&self, platform: &str, version: &str) -> Result<bool> {
        Ok(self.entry(platform, version)?.repo)
    }

    pub fn all_codenames(&self) -> Vec<&'static str> {
        let codenames: BTreeSet<_> = self
            .entries
            .iter()
            .filter_map(|entry| entry.codename)
            .collect();
        codenames.into_iter().collect()
    }

    pub fn find_codename_entry(&self, codename: &str) -> Option<&'static PlatformEntry> {
        self.entries
            .iter()
            .find(|entry| entry.codename == Some(codename))
    }

    pub fn codename_entry(&self, codename: &str) -> Result<&'static PlatformEntry> {
        self.find_codename_entry(codename)
            .ok_or_else(|| PackagingError::UnknownCodename(codename.to_string()))
    }

    pub fn codename_to_platform_version(
        &self,
        codename: &str,
    ) -> Result<(&'static str, &'static str)> {
        let entry = self.codename_entry(codename)?;
        Ok((entry.platform, entry.version))
    }

    pub fn architectures_for_codename(
        &self,
        codename: &str,
        include_source: bool,
    ) -> Result<Vec<&'static str>> {
        Ok(self.codename_entry(codename)?.architectures(include_source))
    }

    pub fn codename_to_tags(&self, codename: &str) -> Result<Vec<String>> {
        let entry = self.codename_entry(codename)?;
        Ok(tags_for_entry(entry).collect())
    }

    /// Every binary-architecture tag of the given format.
    pub fn platform_tags_for_format(&self, format: PackageFormat) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| entry.package_format == format)
            .flat_map(tags_for_entry)
            .collect()
    }

    /// Every (platform, version, architecture) triple in the table.
    pub fn all_platform_tags(&self) -> Vec<(&'static str, &'static str, &'static str)> {
        self.entries
            .iter()
            .flat_map(|entry| {
                entry
                    .architectures
                    .iter()
                    .map(move |arch| (entry.platform, entry.version, *arch))
            })
            .collect()
    }

    /// A representative tag for `platform`: its first version and that
    /// version's first architecture.
    pub fn generic_platform_tag(&self, platform: &str) -> Result<String> {
        let version = self.versions_for(platform)?[0];
        let entry = self.entry(platform, version)?;
        Ok(format!("{}-{}-{}", entry.platform, entry.version, entry.architectures[0]))
    }
}

fn tags_for_entry(entry: &'static PlatformEntry) -> impl Iterator<Item = String> {
    entry
        .architectures
        .iter()
        .map(move |arch| format!("{}-{}-{arch}", entry.platform, entry.version))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> &'static PlatformCatalog {
        PlatformCatalog::global()
    }

    #[test]
    fn every_entry_has_architectures() {
        for entry in catalog().entries() {
            assert!(
                !entry.architectures.is_empty(),
                "{} {} has no architectures",
                entry.platform,
                entry.version
            );
        }
    }

    #[test]
    fn platform_version_pairs_are_unique() {
        let mut seen = BTreeSet::new();
        for entry in catalog().entries() {
            assert!(seen.insert((entry.platform, entry.version)));
        }
    }

    #[test]
    fn codenames_only_on_debian_family() {
        for entry in catalog().entries() {
            assert_eq!(
                entry.codename.is_some(),
                entry.package_format == PackageFormat::Deb,
                "{} {}",
                entry.platform,
                entry.version
            );
        }
    }

    #[test]
    fn test_versions_for() {
        assert_eq!(catalog().versions_for("el").unwrap(), vec!["5", "6", "7", "8"]);
        assert_eq!(catalog().versions_for("windows").unwrap(), vec!["2012"]);
        assert!(matches!(
            catalog().versions_for("beos"),
            Err(PackagingError::UnknownPlatform(ref p)) if p == "beos"
        ));
    }

    #[test]
    fn test_architectures_for() {
        assert_eq!(
            catalog().architectures_for("el", "6", false).unwrap(),
            vec!["x86_64", "i386", "s390x"]
        );
        assert_eq!(
            catalog().architectures_for("el", "6", true).unwrap(),
            vec!["x86_64", "i386", "s390x", "SRPMS"]
        );
        assert_eq!(
            catalog().architectures_for("ubuntu", "16.04", true).unwrap(),
            vec!["amd64", "i386", "ppc64el", "source"]
        );
        // No source architecture to append
        assert_eq!(
            catalog().architectures_for("windows", "2012", true).unwrap(),
            vec!["x86", "x64"]
        );
        assert!(matches!(
            catalog().architectures_for("el", "4", false),
            Err(PackagingError::UnknownPlatformVersion { .. })
        ));
    }

    #[test]
    fn test_attribute_lookup() {
        assert_eq!(
            catalog()
                .attribute("ubuntu", "18.04", PlatformAttribute::Codename)
                .unwrap(),
            AttributeValue::Text("bionic")
        );
        assert_eq!(
            catalog()
                .attribute("el", "5", PlatformAttribute::SignatureFormat)
                .unwrap(),
            AttributeValue::Signature(SignatureFormat::V3)
        );
        assert_eq!(
            catalog()
                .attribute("solaris", "11", PlatformAttribute::Repo)
                .unwrap(),
            AttributeValue::Flag(false)
        );
        assert!(matches!(
            catalog().attribute("el", "7", PlatformAttribute::Codename),
            Err(PackagingError::MissingAttribute { ref attribute, .. }) if attribute == "codename"
        ));
        assert!(matches!(
            catalog().attribute("osx", "10.14", PlatformAttribute::SourcePackageFormats),
            Err(PackagingError::MissingAttribute { .. })
        ));
    }

    #[test]
    fn test_attribute_names_parse() {
        let attribute: PlatformAttribute = "source_architecture".parse().unwrap();
        assert_eq!(attribute, PlatformAttribute::SourceArchitecture);
        assert_eq!(attribute.to_string(), "source_architecture");
        assert!("flavour".parse::<PlatformAttribute>().is_err());
    }

    #[test]
    fn test_package_format_for() {
        assert_eq!(catalog().package_format_for("el", "7").unwrap(), PackageFormat::Rpm);
        assert_eq!(catalog().package_format_for("eos", "4").unwrap(), PackageFormat::Swix);
        assert_eq!(catalog().package_format_for("solaris", "10").unwrap(), PackageFormat::Svr4);
        assert_eq!(catalog().package_format_for("solaris", "11").unwrap(), PackageFormat::Ips);
    }

    #[test]
    fn test_platforms_by_format() {
        let debs = catalog().platforms_by_format(PackageFormat::Deb);
        assert_eq!(debs.into_iter().collect::<Vec<_>>(), vec!["cumulus", "debian", "ubuntu"]);

        let msis = catalog().platforms_by_format(PackageFormat::Msi);
        assert!(msis.contains("windows"));
        assert!(msis.contains("windowsfips"));
    }

    #[test]
    fn test_all_package_formats_is_closed_set() {
        let formats = catalog().all_package_formats();
        assert_eq!(formats.len(), PackageFormat::ALL.len());
    }

    #[test]
    fn test_codenames() {
        let codenames = catalog().all_codenames();
        let mut sorted = codenames.clone();
        sorted.sort();
        assert_eq!(codenames, sorted);
        assert!(codenames.contains(&"bionic"));
        assert!(codenames.contains(&"buster"));

        assert_eq!(
            catalog().codename_to_platform_version("xenial").unwrap(),
            ("ubuntu", "16.04")
        );
        assert!(matches!(
            catalog().codename_to_platform_version("preice"),
            Err(PackagingError::UnknownCodename(ref c)) if c == "preice"
        ));
    }

    #[test]
    fn test_codename_helpers() {
        assert_eq!(catalog().codename_for("debian", "10").unwrap(), "buster");
        assert!(catalog().codename_for("sles", "12").is_err());
        assert_eq!(
            catalog().architectures_for_codename("stretch", true).unwrap(),
            vec!["amd64", "i386", "source"]
        );
        assert_eq!(
            catalog().codename_to_tags("trusty").unwrap(),
            vec!["ubuntu-14.04-amd64", "ubuntu-14.04-i386"]
        );
    }

    #[test]
    fn test_signature_format_for() {
        assert_eq!(
            catalog().signature_format_for("sles", "11").unwrap(),
            SignatureFormat::V3
        );
        assert_eq!(
            catalog().signature_format_for("el", "8").unwrap(),
            SignatureFormat::V4
        );
        assert!(catalog().signature_format_for("ubuntu", "18.04").is_err());
    }

    #[test]
    fn test_platform_tags_for_format() {
        let tags = catalog().platform_tags_for_format(PackageFormat::Dmg);
        assert_eq!(
            tags,
            vec![
                "osx-10.12-x86_64",
                "osx-10.13-x86_64",
                "osx-10.14-x86_64",
                "osx-10.15-x86_64"
            ]
        );
    }

    #[test]
    fn test_generic_platform_tag() {
        assert_eq!(catalog().generic_platform_tag("el").unwrap(), "el-5-x86_64");
        assert_eq!(catalog().generic_platform_tag("solaris").unwrap(), "solaris-10-i386");
        assert!(catalog().generic_platform_tag("plan9").is_err());
    }

    #[test]
    fn test_is_repo_platform() {
        assert!(catalog().is_repo_platform("el", "7").unwrap());
        assert!(!catalog().is_repo_platform("osx", "10.15").unwrap());
    }

    #[test]
    fn test_source_package_detection() {
        let el7 = catalog().entry("el", "7").unwrap();
        assert!(el7.is_source_package("pkg/el/7/puppet-agent-6.0.0-1.el7.src.rpm"));
        assert!(!el7.is_source_package("pkg/el/7/puppet-agent-6.0.0-1.el7.x86_64.rpm"));
        assert!(el7.supports_architecture("SRPMS"));
        assert!(!el7.supports_architecture("amd64"));
    }
}
