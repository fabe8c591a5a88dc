use packaging::config::PackagingConfig;
use packaging::paths::{ARTIFACTS_PREFIX, PathResolver};
use packaging::platforms::PlatformTag;

fn tag(value: &str) -> PlatformTag {
    PlatformTag::parse(value).unwrap()
}

fn shipping_config() -> PackagingConfig {
    PackagingConfig {
        repo_name: Some("puppet6".to_string()),
        nonfinal_repo_name: Some("puppet6-nightly".to_string()),
        repo_link_target: Some("puppet".to_string()),
        nonfinal_repo_link_target: Some("puppet-nightly".to_string()),
        yum_repo_path: Some("/opt/repository/yum".to_string()),
        apt_repo_path: Some("/opt/repository/apt".to_string()),
        dmg_path: Some("/opt/downloads/mac".to_string()),
        swix_path: Some("/opt/downloads/eos".to_string()),
        msi_path: Some("/opt/downloads/windows".to_string()),
        ..Default::default()
    }
}

#[test]
fn path_layout_snapshot_matches_expected_structure() {
    let config = shipping_config();
    let resolver = PathResolver::new(&config);

    let snapshot = [
        (
            "el-7-x86_64",
            "artifacts/puppet6/el/7/x86_64",
            "repos/puppet6/el/7/x86_64",
        ),
        (
            "sles-15-x86_64",
            "artifacts/puppet6/sles/15/x86_64",
            "repos/puppet6/sles/15/x86_64",
        ),
        (
            "cisco-wrlinux-7-x86_64",
            "artifacts/puppet6/cisco-wrlinux/7/x86_64",
            "repos/puppet6/cisco-wrlinux/7/x86_64",
        ),
        (
            "ubuntu-20.04-amd64",
            "artifacts/deb/focal/puppet6",
            "repos/apt/focal/pool/puppet6",
        ),
        (
            "eos-4-i386",
            "artifacts/eos/puppet6/4/i386",
            "repos/puppet6/eos/4/i386",
        ),
        (
            "osx-10.15-x86_64",
            "artifacts/mac/puppet6/10.15/x86_64",
            "repos/mac/puppet6/10.15/x86_64",
        ),
        (
            "windows-2012-x64",
            "artifacts/windows/puppet6",
            "repos/windows/puppet6",
        ),
        (
            "solaris-11-sparc",
            "artifacts/solaris/puppet6/11",
            "repos/solaris/puppet6/11",
        ),
    ];

    for (value, artifacts, repo) in snapshot {
        let tag = tag(value);
        assert_eq!(
            resolver.artifacts_path(&tag, ARTIFACTS_PREFIX, false).unwrap(),
            artifacts,
            "artifacts path of {value}"
        );
        assert_eq!(
            resolver.repo_path(&tag, false, false).unwrap(),
            repo,
            "repo path of {value}"
        );
    }
}

#[test]
fn legacy_repo_layout_snapshot() {
    let config = shipping_config();
    let resolver = PathResolver::new(&config);

    let snapshot = [
        ("el-7-x86_64", "repos/el/7/puppet6/x86_64"),
        ("ubuntu-20.04-amd64", "repos/apt/focal/pool/puppet6"),
        ("osx-10.15-x86_64", "repos/apple/10.15/puppet6/x86_64"),
        ("windows-2012-x64", "repos/windows"),
        ("solaris-10-i386", "repos/solaris/10"),
    ];
    for (value, expected) in snapshot {
        assert_eq!(resolver.repo_path(&tag(value), true, false).unwrap(), expected);
    }
}

#[test]
fn nonfinal_layout_snapshot() {
    let config = shipping_config();
    let resolver = PathResolver::new(&config);

    let (base, link) = resolver
        .artifacts_path_and_link_path(&tag("debian-10-amd64"), ARTIFACTS_PREFIX, true)
        .unwrap();
    assert_eq!(base, "artifacts/deb/buster/puppet6-nightly");
    assert_eq!(link.as_deref(), Some("artifacts/deb/buster/puppet-nightly"));

    assert_eq!(
        resolver.repo_path(&tag("el-8-aarch64"), false, true).unwrap(),
        "repos/puppet6-nightly/el/8/aarch64"
    );
}

#[test]
fn remote_layout_snapshot() {
    let config = shipping_config();
    let resolver = PathResolver::new(&config);

    assert_eq!(
        resolver
            .release_package_link_path(&tag("el-8-x86_64"), false)
            .unwrap()
            .as_deref(),
        Some("/opt/repository/yum/puppet-release-el-8.noarch.rpm")
    );
    assert_eq!(
        resolver
            .release_package_link_path(&tag("ubuntu-18.04-amd64"), false)
            .unwrap()
            .as_deref(),
        Some("/opt/repository/apt/puppet-release-bionic.deb")
    );
    assert_eq!(
        resolver
            .debian_package_base_path(&tag("ubuntu-18.04-amd64"), "puppet7", "puppet-agent", false)
            .unwrap(),
        "/opt/repository/apt/puppet7/pool/bionic/p/puppet-agent"
    );
    assert_eq!(
        resolver
            .repo_config_path(&tag("sles-12-s390x"))
            .unwrap()
            .as_deref(),
        Some("repo_configs/rpm/*sles-12-s390x*.repo")
    );
}
