//! Push notification delivery.
//!
//! `Notifier` is the abstraction callers depend on; `LineNotifier` is the
//! LINE Notify implementation backed by `reqwest`.

mod line_notifier;
mod provider;

pub use line_notifier::{LineNotifier, NOTIFY_API_URL};
pub use provider::Notifier;
