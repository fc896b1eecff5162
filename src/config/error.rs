//! Errors raised while resolving line-notify settings

use std::path::PathBuf;

use thiserror::Error;

/// Where a configuration value came from, for error messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// A file given with `--config` or `LINE_NOTIFY_CONFIG_FILE`
    File(PathBuf),
    /// The layered files of a profile directory
    Layered { dir: PathBuf, profile: String },
}

impl std::fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigOrigin::File(path) => write!(f, "{}", path.display()),
            ConfigOrigin::Layered { dir, profile } => {
                write!(f, "{} (profile {})", dir.display(), profile)
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested configuration file is absent
    #[error("Configuration file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    /// The `config` crate could not read or merge a source
    #[error("Failed to load configuration from {origin}")]
    Load {
        origin: ConfigOrigin,
        #[source]
        source: config::ConfigError,
    },

    /// Sources merged, but the values do not fit `Settings`
    #[error("Invalid configuration values from {origin}")]
    Deserialize {
        origin: ConfigOrigin,
        #[source]
        source: config::ConfigError,
    },

    /// A setting is present but unusable
    #[error("Invalid value for {field}: {message}")]
    Invalid { field: &'static str, message: String },

    /// Unknown profile name in `LINE_NOTIFY_APP_ENV` or `--env`
    #[error("Unknown profile '{value}', expected one of: development, test, staging, production")]
    InvalidEnvironment { value: String },

    /// The `config` crate only accepts UTF-8 file names
    #[error("Configuration path is not valid UTF-8: {}", .path.display())]
    NonUtf8Path { path: PathBuf },
}

impl ConfigError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            message: message.into(),
        }
    }

    /// Dotted settings key the error refers to, when there is one
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ConfigError::Invalid { field, .. } => Some(*field),
            _ => None,
        }
    }
}
