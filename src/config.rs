use crate::error::{PackagingError, Result};
use crate::models::PackageFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "ext";
const CONFIG_FILE_NAME: &str = "build_defaults.toml";
const ENV_PREFIX: &str = "PACKAGING";

/// Settings the path resolver reads but does not own.
#[cfg_attr(test, mockall::automock)]
pub trait RepositorySettings {
    fn repo_name(&self) -> Option<String>;
    fn nonfinal_repo_name(&self) -> Option<String>;
    /// Legacy yum-only spelling of `repo_name`.
    fn yum_repo_name(&self) -> Option<String>;
    /// Legacy apt-only spelling of `repo_name`.
    fn apt_repo_name(&self) -> Option<String>;
    fn repo_link_target(&self) -> Option<String>;
    fn nonfinal_repo_link_target(&self) -> Option<String>;
    /// Root of the published repository for `format` on the distribution server.
    fn remote_repo_path(&self, format: PackageFormat, nonfinal: bool) -> Option<String>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackagingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonfinal_repo_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yum_repo_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apt_repo_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_link_target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonfinal_repo_link_target: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yum_repo_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonfinal_yum_repo_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apt_repo_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonfinal_apt_repo_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dmg_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonfinal_dmg_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swix_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonfinal_swix_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msi_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonfinal_msi_path: Option<String>,
}

/// Location of the project's build defaults relative to its root.
pub fn default_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join(CONFIG_FILE_NAME)
}

impl PackagingConfig {
    /// Loads `ext/build_defaults.toml` under `project_root` when present,
    /// then applies `PACKAGING_*` environment overrides.
    pub fn load(project_root: &Path) -> Result<Self> {
        Self::load_layers(&default_config_path(project_root))
    }

    /// Like [`PackagingConfig::load`] for an explicit file, which must exist.
    pub fn load_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PackagingError::ConfigFile(format!(
                "{} does not exist",
                path.display()
            )));
        }
        Self::load_layers(path)
    }

    fn load_layers(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("Config file not found at {path:?}, using defaults");
        }

        let settings = config::Config::builder()
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(config::Environment::with_prefix(ENV_PREFIX).prefix_separator("_"))
            .build()
            .map_err(|e| {
                PackagingError::ConfigFile(format!("Failed to read {}: {e}", path.display()))
            })?;

        let config: PackagingConfig = settings.try_deserialize()?;
        log::debug!("Loaded config from {path:?}");
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        log::debug!("Saved config to {path:?}");
        Ok(())
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

impl RepositorySettings for PackagingConfig {
    fn repo_name(&self) -> Option<String> {
        non_empty(&self.repo_name)
    }

    fn nonfinal_repo_name(&self) -> Option<String> {
        non_empty(&self.nonfinal_repo_name)
    }

    fn yum_repo_name(&self) -> Option<String> {
        non_empty(&self.yum_repo_name)
    }

    fn apt_repo_name(&self) -> Option<String> {
        non_empty(&self.apt_repo_name)
    }

    fn repo_link_target(&self) -> Option<String> {
        non_empty(&self.repo_link_target)
    }

    fn nonfinal_repo_link_target(&self) -> Option<String> {
        non_empty(&self.nonfinal_repo_link_target)
    }

    fn remote_repo_path(&self, format: PackageFormat, nonfinal: bool) -> Option<String> {
        let value = match (format, nonfinal) {
            (PackageFormat::Rpm, false) => &self.yum_repo_path,
            (PackageFormat::Rpm, true) => &self.nonfinal_yum_repo_path,
            (PackageFormat::Deb, false) => &self.apt_repo_path,
            (PackageFormat::Deb, true) => &self.nonfinal_apt_repo_path,
            (PackageFormat::Dmg, false) => &self.dmg_path,
            (PackageFormat::Dmg, true) => &self.nonfinal_dmg_path,
            (PackageFormat::Swix, false) => &self.swix_path,
            (PackageFormat::Swix, true) => &self.nonfinal_swix_path,
            (PackageFormat::Msi, false) => &self.msi_path,
            (PackageFormat::Msi, true) => &self.nonfinal_msi_path,
            (PackageFormat::Svr4 | PackageFormat::Ips, _) => return None,
        };
        non_empty(value)
    }
}
