//! Canonical listing record and the raw upstream payload it is built from.

use serde::{Deserialize, Serialize};

/// Untyped record as produced by a fetcher.
///
/// Upstream channels disagree on shape and field names, so raw records
/// stay `serde_json::Value` until the normalizer maps them into a
/// [`ListingRecord`]. Owned solely by the fetch step.
pub type RawRecord = serde_json::Value;

/// Which upstream channel produced a raw record.
///
/// The normalizer uses this as a schema hint: the same concept lives
/// under different field names depending on the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceSchema {
    /// Direct API query (GraphQL search endpoint)
    Api,
    /// JSON blob embedded in the rendered discovery page
    PageData,
}

impl SourceSchema {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceSchema::Api => "api",
            SourceSchema::PageData => "page-data",
        }
    }
}

/// Canonical representation of one session listing.
///
/// This is the unit the rest of the pipeline operates on. Invariant:
/// `title` and `reference_key` are never both empty; the normalizer
/// drops records that cannot satisfy it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    /// Human display name of the session/league
    pub title: String,

    /// Composite location/time/capacity description (free text, not
    /// parsed further by the core)
    pub schedule_info: String,

    /// Most specific natural identifier available upstream (a stable id
    /// if present, otherwise a slug or link)
    pub reference_key: String,

    /// True upstream primary key, when the channel exposed one.
    /// Feeds the preferred fingerprint derivation.
    pub upstream_id: Option<String>,

    /// Human-followable URL for the notification message
    pub link: Option<String>,
}

impl ListingRecord {
    /// Whether this record carries enough content to enter the pipeline.
    pub fn has_identity(&self) -> bool {
        !self.title.is_empty() || !self.reference_key.is_empty()
    }
}
