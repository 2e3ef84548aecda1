//! In-memory seen-set store for testing.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::traits::store::SeenStore;
use crate::types::SeenSet;

/// Seen-set store that keeps everything in memory.
///
/// Useful for tests and dry runs; data is lost on restart. Can be
/// flipped into a failing mode to exercise the commit-failure path.
#[derive(Default)]
pub struct MemoryStore {
    seen: RwLock<SeenSet>,
    fail_commits: RwLock<bool>,
    commit_count: RwLock<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the store (builder pattern).
    pub fn with_seen(self, seen: SeenSet) -> Self {
        *self.seen.write().unwrap() = seen;
        self
    }

    /// Make subsequent commits fail.
    pub fn fail_commits(&self) {
        *self.fail_commits.write().unwrap() = true;
    }

    /// Snapshot of the currently persisted set.
    pub fn persisted(&self) -> SeenSet {
        self.seen.read().unwrap().clone()
    }

    /// How many commits have succeeded.
    pub fn commit_count(&self) -> usize {
        *self.commit_count.read().unwrap()
    }
}

#[async_trait]
impl SeenStore for MemoryStore {
    async fn load(&self) -> SeenSet {
        self.seen.read().unwrap().clone()
    }

    async fn commit(&self, seen: &SeenSet) -> StoreResult<()> {
        if *self.fail_commits.read().unwrap() {
            return Err(crate::error::StoreError::Io {
                path: "<memory>".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "commit disabled"),
            });
        }
        *self.seen.write().unwrap() = seen.clone();
        *self.commit_count.write().unwrap() += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Fingerprint;

    #[tokio::test]
    async fn test_commit_then_load() {
        let store = MemoryStore::new();
        let seen: SeenSet = [Fingerprint::from_raw("abc")].into_iter().collect();

        store.commit(&seen).await.unwrap();
        assert_eq!(store.load().await, seen);
        assert_eq!(store.commit_count(), 1);
    }

    #[tokio::test]
    async fn test_failing_mode() {
        let store = MemoryStore::new();
        store.fail_commits();
        assert!(store.commit(&SeenSet::new()).await.is_err());
        assert_eq!(store.commit_count(), 0);
    }
}
