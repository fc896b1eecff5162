//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::Environment;

/// Send push notifications through LINE Notify
#[derive(Parser, Debug)]
#[command(name = "line-notify")]
#[command(about = "Send push notifications through LINE Notify")]
#[command(long_about = "
line-notify posts a message to the LINE Notify API using a personal access token.

EXAMPLES:
    # Send a message with the token from the environment
    LINE_NOTIFY_TOKEN=xxxx line-notify send Build finished

    # Read the message from stdin
    make test 2>&1 | tail -n 5 | line-notify send

    # Use a custom configuration file
    line-notify --config /etc/line-notify.toml send Deploy done

    # Show the resolved configuration without sending anything
    line-notify check
")]
#[command(version = crate::build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    ///
    /// Load only this TOML file instead of the layered files in the
    /// configuration directory. The file must exist.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `{environment}.toml` layer is loaded.
    /// Available values: development (dev), test, staging (stage), production (prod)
    #[arg(short, long, global = true, value_name = "ENV")]
    pub env: Option<Environment>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level override, takes precedence over --verbose and --quiet
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send one notification
    ///
    /// The message is the remaining arguments joined with spaces, or stdin
    /// when no message argument is given.
    ///
    /// Examples:
    ///   line-notify send Backup completed
    ///   echo "disk almost full" | line-notify send
    Send {
        /// Access token, overrides `api.token` from configuration
        #[arg(long, env = "LINE_NOTIFY_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Endpoint override, mainly for testing against a stub server
        #[arg(long, value_name = "URL")]
        endpoint: Option<String>,

        /// Request timeout in seconds
        #[arg(long, value_name = "SECONDS")]
        timeout: Option<u64>,

        /// Message text
        #[arg(value_name = "MESSAGE", trailing_var_arg = true)]
        message: Vec<String>,
    },
    /// Validate configuration and print the resolved values
    Check,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl Cli {
    /// Log level implied by the global flags, if any
    pub fn effective_log_level(&self) -> Option<&'static str> {
        if let Some(level) = self.log_level {
            Some(level.as_str())
        } else if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("error")
        } else {
            None
        }
    }
}
