//! CLI module for line-notify
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing with clap
//! - Configuration merging (CLI args + config files)
//! - Command execution

pub mod executor;
pub mod parser;

pub use executor::{execute_command, execute_send};
pub use parser::{Cli, Commands, LogLevel};

use crate::config::{ConfigError, ConfigLoader, Settings};
use crate::logger::init_logger;

/// Load configuration and apply CLI argument overrides
///
/// 1. Load layered configuration (or the `--config` file)
/// 2. Apply global and `send` flag overrides
/// 3. Validate the final configuration
pub fn load_and_merge_config(cli: &Cli) -> Result<Settings, ConfigError> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_file(path);
    }
    if let Some(environment) = cli.env {
        loader = loader.with_environment(environment);
    }

    let settings = loader.load()?;
    merge_cli_args(settings, cli)
}

/// Apply CLI overrides on top of loaded settings and re-validate
pub fn merge_cli_args(mut settings: Settings, cli: &Cli) -> Result<Settings, ConfigError> {
    if let Some(level) = cli.effective_log_level() {
        settings.logger.level = level.to_string();
    }

    if let Commands::Send {
        token,
        endpoint,
        timeout,
        ..
    } = &cli.command
    {
        if let Some(token) = token {
            settings.api.token = token.clone();
        }
        if let Some(endpoint) = endpoint {
            settings.api.endpoint = endpoint.clone();
        }
        if let Some(timeout) = timeout {
            settings.api.timeout_seconds = *timeout;
        }
    }

    settings.validate()?;
    Ok(settings)
}

/// Initialize logger from settings
pub fn init_logger_from_settings(settings: &Settings) -> anyhow::Result<()> {
    let logger_config = settings.logger.clone().into_logger_config()?;
    init_logger(logger_config)
}
