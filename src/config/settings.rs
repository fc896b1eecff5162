//! Configuration settings structures for line-notify
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::error::NotifyResult;
use crate::logger::{LogFormat, LoggerConfig};
use crate::notify::{LineNotifier, NOTIFY_API_URL};

/// Upper bound for `api.timeout_seconds`
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "line-notify".to_string()
}

fn default_app_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_endpoint() -> String {
    NOTIFY_API_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "full".to_string()
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    #[serde(default = "default_app_name")]
    pub name: String,

    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Notify API Configuration
// ============================================================================

/// Notify API access configuration
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Access token; may be left empty here and supplied on the command line
    #[serde(default)]
    pub token: String,

    /// Endpoint receiving the form POST
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request deadline in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            endpoint: default_endpoint(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("token", &self.redacted_token())
            .field("endpoint", &self.endpoint)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl ApiConfig {
    /// Validate endpoint and timeout
    ///
    /// The token is not checked here; `LineNotifier::new` rejects an empty one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.endpoint).map_err(|e| {
            ConfigError::invalid("api.endpoint", format!("Invalid URL format: {}", e))
        })?;

        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(ConfigError::invalid(
                "api.endpoint",
                "URL must use http or https protocol",
            ));
        }

        if self.timeout_seconds == 0 || self.timeout_seconds > MAX_TIMEOUT_SECONDS {
            return Err(ConfigError::invalid(
                "api.timeout_seconds",
                format!("Must be between 1 and {}", MAX_TIMEOUT_SECONDS),
            ));
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Token as safe for display: `<not set>` or `<redacted>`
    pub fn redacted_token(&self) -> &'static str {
        if self.token.is_empty() {
            "<not set>"
        } else {
            "<redacted>"
        }
    }

    /// Build a notifier from these settings
    pub fn build_notifier(&self) -> NotifyResult<LineNotifier> {
        Ok(LineNotifier::new(self.token.clone())?
            .with_endpoint(&self.endpoint)?
            .with_timeout(self.timeout()))
    }
}

// ============================================================================
// Logger Settings
// ============================================================================

/// Logger configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Whether to use colored output when stderr is a terminal
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            colored: default_true(),
        }
    }
}

impl LoggerSettings {
    /// Convert LoggerSettings to the runtime LoggerConfig
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let format = self
            .format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::invalid("logger.format", e.to_string()))?;

        LoggerConfig::new(self.level, format, self.colored)
            .map_err(|e| ConfigError::invalid("logger.level", e.to_string()))
    }
}

// ============================================================================
// Root Settings
// ============================================================================

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Application information
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Notify API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Logger configuration
    #[serde(default)]
    pub logger: LoggerSettings,
}

impl Settings {
    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        self.logger.clone().into_logger_config()?;
        Ok(())
    }
}
