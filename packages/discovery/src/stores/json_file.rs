//! Flat-file seen-set store.
//!
//! The set is persisted as a JSON array of fingerprint strings, written
//! in sorted order so diffs between runs stay readable. Commits go
//! through a temp file plus rename so a concurrent reader never observes
//! a half-written store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::traits::store::SeenStore;
use crate::types::{Fingerprint, SeenSet};

/// JSON-file-backed store at a fixed path.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

#[async_trait]
impl SeenStore for JsonFileStore {
    async fn load(&self) -> SeenSet {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no seen-set file yet, starting empty");
                return SeenSet::new();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read seen-set, starting empty");
                return SeenSet::new();
            }
        };

        match serde_json::from_str::<Vec<String>>(&content) {
            Ok(entries) => {
                let seen: SeenSet = entries.into_iter().map(Fingerprint::from_raw).collect();
                debug!(path = %self.path.display(), entries = seen.len(), "loaded seen-set");
                seen
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "corrupt seen-set, starting empty");
                SeenSet::new()
            }
        }
    }

    async fn commit(&self, seen: &SeenSet) -> StoreResult<()> {
        let entries: Vec<&str> = seen.iter().map(|f| f.as_str()).collect();
        let json = serde_json::to_string_pretty(&entries)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        // Write-then-rename keeps the previous state intact on failure.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json.as_bytes())
            .await
            .map_err(|e| self.io_error(e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.io_error(e))?;

        debug!(path = %self.path.display(), entries = seen.len(), "committed seen-set");
        Ok(())
    }
}
