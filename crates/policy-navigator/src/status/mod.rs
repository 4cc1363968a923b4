//! Background connectivity polling.

mod poller;

pub use poller::{StatusPoller, StatusPollerHandle};

use crate::domain::SystemStatus;

/// Observer-facing view of the backend's health.
///
/// `Loading` is only ever seen before the first probe resolves; it never
/// returns afterwards. Once a status has been decoded, later probe failures
/// keep the last known value rather than clearing it.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusSnapshot {
    /// No probe has resolved yet.
    Loading,
    /// Every probe so far has failed; nothing is known about the backend.
    Unavailable,
    /// Most recently decoded status, replaced wholesale on each success.
    Ready(SystemStatus),
}
