//! Core notifier trait.
//!
//! The single abstraction boundary of the crate: anything that can deliver a
//! plain-text message implements `Notifier`, so callers can substitute a fake
//! in tests without network access.

use crate::error::NotifyResult;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Trait for push-notification senders
///
/// Uses `async_trait` to support async methods with dynamic dispatch.
/// Implementations hold no mutable state and must be Send + Sync so one
/// instance can serve concurrent callers.
///
/// # Example Implementation
/// ```ignore
/// use async_trait::async_trait;
///
/// pub struct StdoutNotifier;
///
/// #[async_trait]
/// impl Notifier for StdoutNotifier {
///     async fn send(&self, _ctx: &CancellationToken, message: &str) -> NotifyResult<()> {
///         println!("{message}");
///         Ok(())
///     }
///
///     fn name(&self) -> &'static str {
///         "stdout"
///     }
/// }
/// ```
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends a notification message
    ///
    /// Does not return until the remote reply is fully read, a terminal error
    /// occurs, or `ctx` is cancelled.
    ///
    /// # Arguments
    /// * `ctx` - Cancellation signal supplied by the caller
    /// * `message` - Plain-text message body
    async fn send(&self, ctx: &CancellationToken, message: &str) -> NotifyResult<()>;

    /// Returns the notifier name for logging/debugging
    fn name(&self) -> &'static str;
}
