//! The in-memory seen-set mutated during one pipeline run.

use std::collections::BTreeSet;

use crate::types::fingerprint::Fingerprint;

/// Set of fingerprints already notified.
///
/// Insert-only: entries are never removed, growth across the lifetime of
/// a monitored topic is accepted (entries are small fixed-size digests).
/// Backed by a `BTreeSet` so the persisted form is canonically sorted and
/// the on-disk file stays human-diffable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenSet {
    entries: BTreeSet<Fingerprint>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.entries.contains(fingerprint)
    }

    /// Insert a fingerprint; returns true if it was not already present.
    pub fn insert(&mut self, fingerprint: Fingerprint) -> bool {
        self.entries.insert(fingerprint)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in canonical (sorted) order, for persistence.
    pub fn iter(&self) -> impl Iterator<Item = &Fingerprint> {
        self.entries.iter()
    }

    /// Whether every entry of `other` is present in `self`.
    pub fn is_superset(&self, other: &SeenSet) -> bool {
        self.entries.is_superset(&other.entries)
    }
}

impl FromIterator<Fingerprint> for SeenSet {
    fn from_iter<I: IntoIterator<Item = Fingerprint>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let mut set = SeenSet::new();
        let fp = Fingerprint::from_raw("abc");
        assert!(set.insert(fp.clone()));
        assert!(!set.insert(fp.clone()));
        assert_eq!(set.len(), 1);
        assert!(set.contains(&fp));
    }

    #[test]
    fn test_iteration_is_sorted() {
        let mut set = SeenSet::new();
        set.insert(Fingerprint::from_raw("zzz"));
        set.insert(Fingerprint::from_raw("aaa"));
        set.insert(Fingerprint::from_raw("mmm"));

        let order: Vec<&str> = set.iter().map(|f| f.as_str()).collect();
        assert_eq!(order, vec!["aaa", "mmm", "zzz"]);
    }

    #[test]
    fn test_superset() {
        let small: SeenSet = [Fingerprint::from_raw("a")].into_iter().collect();
        let large: SeenSet = [Fingerprint::from_raw("a"), Fingerprint::from_raw("b")]
            .into_iter()
            .collect();
        assert!(large.is_superset(&small));
        assert!(!small.is_superset(&large));
    }
}
