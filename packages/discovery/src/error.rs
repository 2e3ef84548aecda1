//! Typed errors for the discovery library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur while fetching raw listings from an upstream.
///
/// `Blocked` is a classification, not a transport failure: the upstream
/// answered, and the answer was "go away". The pipeline controller treats
/// it differently from every other variant (operational alert, no commit).
#[derive(Debug, Error)]
pub enum FetchError {
    /// Upstream explicitly refused or rate-limited the request
    #[error("upstream blocked the request (HTTP {status})")]
    Blocked { status: u16 },

    /// HTTP transport failure (connect, timeout, TLS)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with an unexpected status
    #[error("unexpected HTTP status {status}")]
    UpstreamStatus { status: u16 },

    /// Response body did not have the expected shape
    #[error("payload error: {0}")]
    Payload(String),
}

impl FetchError {
    /// Whether this failure is the upstream's explicit refusal signal.
    pub fn is_blocked(&self) -> bool {
        matches!(self, FetchError::Blocked { .. })
    }
}

/// Errors that can occur while delivering a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// HTTP transport failure
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Push service answered with a non-success status
    #[error("push service error (HTTP {status}): {body}")]
    Service { status: u16, body: String },
}

/// Errors that can occur while committing the seen-set.
///
/// Loading has no error type: missing or corrupt state degrades to an
/// empty set, it never fails a run.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem operation failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Serializing the set failed
    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors a pipeline run can propagate to its caller.
///
/// Fetch and notify failures are absorbed inside the run (they become run
/// outcomes or per-record log lines); only a failed commit surfaces here,
/// because it is the last action and the prior persisted state is intact.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Committing the updated seen-set failed
    #[error("seen-set commit failed: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for notify operations.
pub type NotifyResult<T> = std::result::Result<T, NotifyError>;

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
