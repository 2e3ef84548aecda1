//! Seen-set persistence trait.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::types::SeenSet;

/// Durable storage for the set of fingerprints already notified.
///
/// Exactly one load and at most one commit happen per pipeline run; the
/// controller owns the in-memory set in between.
#[async_trait]
pub trait SeenStore: Send + Sync {
    /// Read the persisted set.
    ///
    /// Infallible: a missing or unparseable store degrades to
    /// an empty set (with a warning) rather than failing the run. The
    /// cost of degradation is a one-time re-notification of already-seen
    /// listings.
    async fn load(&self) -> SeenSet;

    /// Atomically replace the persisted set with `seen`.
    ///
    /// Must never leave a partially-written state observable by a
    /// concurrent reader; on failure the previously persisted state
    /// stays intact.
    async fn commit(&self, seen: &SeenSet) -> StoreResult<()>;
}
