//! Fetcher trait for pluggable listing retrieval.
//!
//! The corpus of ways to obtain listings (direct API query, embedded
//! page-data extraction, rendered-DOM scraping) is modeled as one
//! capability: produce raw records, or a classified failure. Concrete
//! strategies are selected at deployment time and never branched on
//! inside the core pipeline.

use async_trait::async_trait;

use crate::error::FetchResult;
use crate::types::{RawRecord, SourceSchema};

/// A source of raw listing records.
///
/// Implementations must return a classified result in bounded time
/// (enforce a request timeout internally): success with records,
/// `FetchError::Blocked` when the upstream explicitly refused, or
/// another `FetchError` variant for unexpected failures. The pipeline
/// maps these onto its blocked/errored run outcomes.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Retrieve the current raw listings from the upstream.
    async fn fetch(&self) -> FetchResult<Vec<RawRecord>>;

    /// Which field-name schema this fetcher's records use.
    fn schema(&self) -> SourceSchema;

    /// Strategy name, for logging.
    fn name(&self) -> &str {
        "unknown"
    }
}
