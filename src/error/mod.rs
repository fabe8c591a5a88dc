mod context;
mod exit_codes;
mod format;

pub use context::ErrorContext;
pub use exit_codes::get_exit_code;
pub use format::{error_kind, format_error_chain, format_error_with_color};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PackagingError {
    #[error("Unknown platform '{0}'")]
    UnknownPlatform(String),

    #[error("Unknown version '{version}' for platform '{platform}'")]
    UnknownPlatformVersion { platform: String, version: String },

    #[error("Unknown codename '{0}'")]
    UnknownCodename(String),

    #[error("Attribute '{attribute}' is not defined for {platform} {version}")]
    MissingAttribute {
        platform: String,
        version: String,
        attribute: String,
    },

    #[error("Could not verify that '{0}' is a valid platform tag")]
    InvalidPlatformTag(String),

    #[error("Unknown package format '{0}'")]
    UnknownPackageFormat(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("'{0}' is not a Debian-based platform")]
    NotDebianPlatform(String),

    #[error("Cannot determine the apt path to '{project}' for repository '{repository}'")]
    UnknownDebianRepository { repository: String, project: String },

    #[error("Could not determine a Debian component from path '{0}'")]
    CannotDetermineComponent(String),

    #[error("Cannot determine platform tag from '{0}'")]
    CannotDetermineTag(String),

    #[error("Configuration file error: {0}")]
    ConfigFile(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    TomlSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, PackagingError>;
