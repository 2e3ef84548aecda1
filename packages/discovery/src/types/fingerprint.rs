//! Stable identity fingerprints for canonical records.
//!
//! Two derivations, tried in order:
//!
//! 1. If the upstream exposed a true primary key, use it verbatim. This
//!    survives incidental text changes (spot counts, reworded times).
//! 2. Otherwise, SHA-256 over `reference_key` + `schedule_info`. This is
//!    intentionally sensitive to schedule-text changes: a listing whose
//!    capacity text changed is treated as new again. Accepted refresh
//!    behavior, not a bug.
//!
//! Deterministic in all cases: no randomness, no time-dependent salt.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::types::record::ListingRecord;

/// Opaque dedupe key for one canonical record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Derive the fingerprint for a canonical record.
    pub fn for_record(record: &ListingRecord) -> Self {
        if let Some(id) = record.upstream_id.as_deref().filter(|id| !id.is_empty()) {
            return Fingerprint(id.to_string());
        }
        Fingerprint(digest_text(&format!(
            "{}\n{}",
            record.reference_key, record.schedule_info
        )))
    }

    /// Wrap an already-computed digest string (store deserialization).
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Fingerprint(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lowercase-hex SHA-256 of a text fragment.
///
/// Also used by the normalizer as the last-resort reference key when a
/// record has no id, slug, or link.
pub fn digest_text(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(upstream_id: Option<&str>, reference_key: &str, schedule: &str) -> ListingRecord {
        ListingRecord {
            title: "Test League".to_string(),
            schedule_info: schedule.to_string(),
            reference_key: reference_key.to_string(),
            upstream_id: upstream_id.map(String::from),
            link: None,
        }
    }

    #[test]
    fn test_upstream_id_used_verbatim() {
        let r = record(Some("prog-123"), "evt-1", "Mon 6pm | 3 spots");
        assert_eq!(Fingerprint::for_record(&r).as_str(), "prog-123");
    }

    #[test]
    fn test_upstream_id_survives_schedule_change() {
        let before = record(Some("prog-123"), "evt-1", "Mon 6pm | 3 spots");
        let after = record(Some("prog-123"), "evt-1", "Mon 6pm | 1 spot");
        assert_eq!(
            Fingerprint::for_record(&before),
            Fingerprint::for_record(&after)
        );
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let r = record(None, "evt-1", "Mon 6pm | 3 spots");
        assert_eq!(Fingerprint::for_record(&r), Fingerprint::for_record(&r));
    }

    #[test]
    fn test_empty_upstream_id_falls_back() {
        let with_empty = record(Some(""), "evt-1", "Mon 6pm");
        let without = record(None, "evt-1", "Mon 6pm");
        assert_eq!(
            Fingerprint::for_record(&with_empty),
            Fingerprint::for_record(&without)
        );
    }

    #[test]
    fn test_fallback_sensitive_to_schedule_text() {
        let before = record(None, "evt-1", "Mon 6pm | 3 spots");
        let after = record(None, "evt-1", "Mon 6pm | 1 spot");
        assert_ne!(
            Fingerprint::for_record(&before),
            Fingerprint::for_record(&after)
        );
    }

    #[test]
    fn test_different_records_differ() {
        let a = record(None, "evt-1", "Mon 6pm");
        let b = record(None, "evt-2", "Mon 6pm");
        assert_ne!(Fingerprint::for_record(&a), Fingerprint::for_record(&b));
    }

    #[test]
    fn test_digest_format() {
        let digest = digest_text("anything");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
