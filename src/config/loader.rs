//! Configuration loader for line-notify
//!
//! This module provides the `ConfigLoader` struct that handles loading
//! configuration from multiple sources with proper precedence.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::{ConfigError, ConfigOrigin};
use crate::config::settings::Settings;

/// Environment variable for configuration directory
const CONFIG_DIR_ENV: &str = "LINE_NOTIFY_CONFIG_DIR";

/// Environment variable for specific configuration file
const CONFIG_FILE_ENV: &str = "LINE_NOTIFY_CONFIG_FILE";

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "LINE_NOTIFY";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader that handles layered configuration loading
///
/// Sources in order of priority (lowest first):
/// 1. `default.toml` (optional)
/// 2. `{environment}.toml` (optional)
/// 3. `local.toml` (optional)
/// 4. `LINE_NOTIFY_*` environment variables
///
/// A specific configuration file replaces steps 1-3 and must exist.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    config_file: Option<PathBuf>,
    /// `None` defers to `LINE_NOTIFY_APP_ENV` when loading
    environment: Option<AppEnvironment>,
}

impl ConfigLoader {
    /// Create a loader from `LINE_NOTIFY_CONFIG_DIR` and `LINE_NOTIFY_CONFIG_FILE`
    pub fn new() -> Self {
        let config_dir = std::env::var(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));

        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        Self {
            config_dir,
            config_file,
            environment: None,
        }
    }

    /// Load only the given file (plus environment overrides)
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Use another directory for layered loading
    pub fn with_config_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_dir = path.into();
        self
    }

    /// Override the environment picked from `LINE_NOTIFY_APP_ENV`
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Active profile: the explicit one, else `LINE_NOTIFY_APP_ENV`
    pub fn environment(&self) -> Result<AppEnvironment, ConfigError> {
        match self.environment {
            Some(environment) => Ok(environment),
            None => AppEnvironment::from_env(),
        }
    }

    /// Describes the sources `load` reads, for error reports
    pub fn origin(&self) -> Result<ConfigOrigin, ConfigError> {
        match &self.config_file {
            Some(path) => Ok(ConfigOrigin::File(path.clone())),
            None => Ok(ConfigOrigin::Layered {
                dir: self.config_dir.clone(),
                profile: self.environment()?.to_string(),
            }),
        }
    }

    /// Load and validate configuration from all sources
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `LINE_NOTIFY_APP_ENV` names an unknown profile
    /// - the explicit configuration file does not exist
    /// - a file or environment value fails to parse
    /// - the resulting settings fail validation
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let origin = self.origin()?;
        let config = Self::build_config(&origin)?;
        let settings: Settings = config
            .try_deserialize()
            .map_err(|source| ConfigError::Deserialize { origin, source })?;

        settings.validate()?;

        Ok(settings)
    }

    fn build_config(origin: &ConfigOrigin) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match origin {
            ConfigOrigin::File(path) => Self::add_file_source(builder, path, true)?,
            ConfigOrigin::Layered { dir, profile } => {
                Self::build_layered_config(builder, dir, profile)?
            }
        };

        // LINE_NOTIFY_API__TOKEN -> api.token
        let builder = Self::add_env_source(builder);

        builder.build().map_err(|source| ConfigError::Load {
            origin: origin.clone(),
            source,
        })
    }

    fn build_layered_config(
        builder: ConfigBuilder<DefaultState>,
        dir: &Path,
        profile: &str,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let builder = Self::add_file_source(builder, &dir.join("default.toml"), false)?;
        let builder = Self::add_file_source(builder, &dir.join(format!("{profile}.toml")), false)?;
        Self::add_file_source(builder, &dir.join("local.toml"), false)
    }

    fn add_file_source(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let name = path.to_str().ok_or_else(|| ConfigError::NonUtf8Path {
            path: path.to_path_buf(),
        })?;

        Ok(builder.add_source(File::new(name, FileFormat::Toml).required(required)))
    }

    fn add_env_source(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        )
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
