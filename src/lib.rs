//! line-notify
//!
//! Minimal LINE Notify client: one form-encoded POST per message, with the
//! JSON reply mapped onto `NotifyResult`.
//!
//! ```ignore
//! use line_notify::{LineNotifier, Notifier};
//! use tokio_util::sync::CancellationToken;
//!
//! let notifier = LineNotifier::new(token)?;
//! notifier.send(&CancellationToken::new(), "Build finished").await?;
//! ```

use shadow_rs::shadow;
shadow!(build);

pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod logger;
pub mod notify;

pub use error::{NotifyError, NotifyResponse, NotifyResult};
pub use notify::{LineNotifier, NOTIFY_API_URL, Notifier};

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}
