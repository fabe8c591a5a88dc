//! Supported build platforms: the static catalog, platform tags, and the
//! reverse mapping from artifact paths to tags.

pub mod catalog;
pub mod sniffer;
pub mod tag;

pub use catalog::{AttributeValue, PlatformAttribute, PlatformCatalog, PlatformEntry};
pub use sniffer::{ArtifactPathSniffer, tag_from_artifact_path};
pub use tag::{PlatformTag, format_platform_tag};

/// Architecture name a package is published under.
///
/// Ubuntu builds for `aarch64` are shipped with the Debian architecture name
/// `arm64`. Every other combination is returned unchanged.
pub fn package_architecture_alias<'a>(platform: &str, architecture: &'a str) -> &'a str {
    match (platform, architecture) {
        ("ubuntu", "aarch64") => "arm64",
        _ => architecture,
    }
}
