//! Notifier trait for pluggable push delivery.

use async_trait::async_trait;

use crate::error::NotifyResult;

/// How a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// A new listing was found
    Normal,
    /// Operational alert (upstream blocked, run errored)
    Alert,
}

/// Delivers one human-readable message.
///
/// The core never retries on failure: a per-listing delivery failure is
/// logged and the listing is still marked seen (accepted message loss),
/// and operational-alert failures are logged and ignored.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str, severity: Severity) -> NotifyResult<()>;

    /// Transport name, for logging.
    fn name(&self) -> &str {
        "unknown"
    }
}
