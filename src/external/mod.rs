//! Outbound HTTP plumbing shared by notifiers.

pub mod client;
