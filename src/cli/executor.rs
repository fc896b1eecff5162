//! Command executor for dispatching CLI commands
//!
//! This module provides the entry point for executing CLI commands after
//! parsing and configuration loading.

use std::io::Read;
use std::time::Instant;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::parser::{Cli, Commands};
use crate::config::Settings;
use crate::error::NotifyResult;
use crate::notify::Notifier;

/// Execute a CLI command with the given settings
///
/// # Arguments
/// * `cli` - Parsed CLI arguments
/// * `settings` - Merged and validated settings
/// * `ctx` - Cancelled on Ctrl-C
pub async fn execute_command(
    cli: &Cli,
    settings: Settings,
    ctx: CancellationToken,
) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Send { message, .. } => {
            let message = resolve_message(message, std::io::stdin().lock())?;
            let notifier = settings
                .api
                .build_notifier()
                .context("Cannot create notifier")?;

            execute_send(&notifier, &ctx, &message)
                .await
                .context("Failed to send notification")
        }
        Commands::Check => {
            print!("{}", check_report(&settings));
            Ok(())
        }
    }
}

/// Deliver one message through any notifier
pub async fn execute_send(
    notifier: &dyn Notifier,
    ctx: &CancellationToken,
    message: &str,
) -> NotifyResult<()> {
    let start = Instant::now();
    info!(notifier = notifier.name(), chars = message.chars().count(), "Sending notification");

    notifier.send(ctx, message).await?;

    info!(
        notifier = notifier.name(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Notification delivered"
    );
    Ok(())
}

/// Message from the argument words, or from `input` when there are none
///
/// Trailing newlines of piped input are dropped. Blank messages are rejected
/// before any network activity.
pub fn resolve_message(words: &[String], mut input: impl Read) -> anyhow::Result<String> {
    let message = if words.is_empty() {
        let mut buffer = String::new();
        input
            .read_to_string(&mut buffer)
            .context("Failed to read message from stdin")?;
        buffer.trim_end_matches(['\r', '\n']).to_string()
    } else {
        words.join(" ")
    };

    if message.trim().is_empty() {
        anyhow::bail!("message is empty");
    }

    Ok(message)
}

/// Human-readable summary of the resolved configuration
pub fn check_report(settings: &Settings) -> String {
    format!(
        "Configuration OK\n  endpoint: {}\n  timeout:  {}s\n  token:    {}\n  logger:   {} ({})\n",
        settings.api.endpoint,
        settings.api.timeout_seconds,
        settings.api.redacted_token(),
        settings.logger.level,
        settings.logger.format,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{NotifyError, NotifyResponse};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records messages instead of sending them
    struct RecordingNotifier {
        sent: Mutex<Vec<String>>,
        reply: Option<NotifyResponse>,
    }

    impl RecordingNotifier {
        fn accepting() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                reply: None,
            }
        }

        fn rejecting(status: i64, message: &str) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                reply: Some(NotifyResponse {
                    status,
                    message: message.to_string(),
                }),
            }
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, ctx: &CancellationToken, message: &str) -> NotifyResult<()> {
            if ctx.is_cancelled() {
                return Err(NotifyError::Cancelled);
            }
            self.sent.lock().unwrap().push(message.to_string());
            match &self.reply {
                Some(reply) => Err(NotifyError::Remote(reply.clone())),
                None => Ok(()),
            }
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }

    #[tokio::test]
    async fn test_execute_send_delivers_message() {
        let notifier = RecordingNotifier::accepting();
        let ctx = CancellationToken::new();

        execute_send(&notifier, &ctx, "hello").await.unwrap();
        execute_send(&notifier, &ctx, "hello").await.unwrap();

        assert_eq!(*notifier.sent.lock().unwrap(), vec!["hello", "hello"]);
    }

    #[tokio::test]
    async fn test_execute_send_propagates_remote_error() {
        let notifier = RecordingNotifier::rejecting(401, "Invalid access token");
        let err = execute_send(&notifier, &CancellationToken::new(), "hello")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), r#"{"status":401,"message":"Invalid access token"}"#);
    }

    #[tokio::test]
    async fn test_execute_send_cancelled() {
        let notifier = RecordingNotifier::accepting();
        let ctx = CancellationToken::new();
        ctx.cancel();

        let err = execute_send(&notifier, &ctx, "hello").await.unwrap_err();
        assert!(matches!(err, NotifyError::Cancelled));
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_resolve_message_from_words() {
        let words = vec!["Build".to_string(), "finished".to_string()];
        let message = resolve_message(&words, std::io::empty()).unwrap();
        assert_eq!(message, "Build finished");
    }

    #[test]
    fn test_resolve_message_from_input() {
        let message = resolve_message(&[], "line one\nline two\n".as_bytes()).unwrap();
        assert_eq!(message, "line one\nline two");
    }

    #[test]
    fn test_resolve_message_rejects_blank() {
        assert!(resolve_message(&[], " \n".as_bytes()).is_err());
        assert!(resolve_message(&[" ".to_string()], std::io::empty()).is_err());
    }

    #[test]
    fn test_check_report_hides_token() {
        let mut settings = Settings::default();
        settings.api.token = "SECRET".to_string();

        let report = check_report(&settings);
        assert!(report.contains("https://notify-api.line.me/api/notify"));
        assert!(report.contains("<redacted>"));
        assert!(!report.contains("SECRET"));
    }
}
