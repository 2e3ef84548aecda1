//! Normalizer: maps loosely-shaped upstream payloads into canonical
//! [`ListingRecord`]s.
//!
//! Field extraction is data-driven: each canonical field has an ordered
//! list of candidate JSON paths per source schema. Supporting a new
//! upstream shape means adding paths to a table, not new branching logic.
//!
//! Normalization never fails: malformed records yield `None` (expected
//! noise from a loosely-typed upstream, not an error), and missing
//! sub-fields degrade to placeholder text.

use crate::types::{digest_text, ListingRecord, RawRecord, SourceSchema};

/// Placeholder when a listing has no usable title.
const UNKNOWN: &str = "unknown";

/// Placeholder when no schedule/location text could be extracted.
const SEE_LISTING: &str = "see listing";

/// Event pages are addressed by slug when the upstream gives no full URL.
const EVENT_URL_BASE: &str = "https://www.volosports.com/event";

/// Ordered candidate paths into the raw JSON for one canonical field.
/// Earlier entries win.
type FieldPaths = &'static [&'static [&'static str]];

/// Extraction rules for one source schema.
struct SchemaRules {
    title: FieldPaths,
    location: FieldPaths,
    start_time: FieldPaths,
    capacity: FieldPaths,
    id: FieldPaths,
    slug: FieldPaths,
    link: FieldPaths,
}

/// Direct GraphQL API responses (`searchPrograms` items).
const API_RULES: SchemaRules = SchemaRules {
    title: &[&["name"], &["title"]],
    location: &[&["locationName"], &["neighborhood"]],
    start_time: &[&["startTime"], &["startDate"]],
    capacity: &[&["registrationStatus"], &["spotsLeft"]],
    id: &[&["id"], &["_id"]],
    slug: &[&["slug"]],
    link: &[&["url"]],
};

/// Program objects dug out of the embedded page-data blob. Field names
/// differ from the API shape and some live one level down.
const PAGE_DATA_RULES: SchemaRules = SchemaRules {
    title: &[&["title"], &["name"], &["program", "name"]],
    location: &[&["location", "name"], &["locationName"], &["venue"]],
    start_time: &[&["startDate"], &["startTime"], &["schedule", "start"]],
    capacity: &[&["spotsRemaining"], &["registrationStatus"]],
    id: &[&["programId"], &["id"], &["_id"]],
    slug: &[&["slug"], &["urlSlug"]],
    link: &[&["url"], &["href"]],
};

impl SourceSchema {
    fn rules(&self) -> &'static SchemaRules {
        match self {
            SourceSchema::Api => &API_RULES,
            SourceSchema::PageData => &PAGE_DATA_RULES,
        }
    }
}

/// Convert one raw record into zero or one canonical record.
///
/// Returns `None` when the record fails the minimal content filter:
/// it must carry at least a non-empty title or a non-empty identifier
/// (id, slug, or link) to plausibly represent a real session.
pub fn normalize(raw: &RawRecord, schema: SourceSchema) -> Option<ListingRecord> {
    let rules = schema.rules();

    let title = extract(raw, rules.title);
    let location = extract(raw, rules.location);
    let start_time = extract(raw, rules.start_time);
    let capacity = extract(raw, rules.capacity);
    let id = extract(raw, rules.id);
    let slug = extract(raw, rules.slug);
    let link = extract(raw, rules.link);

    // Minimal content filter, checked before placeholders are applied.
    if title.is_none() && id.is_none() && slug.is_none() && link.is_none() {
        tracing::debug!(schema = schema.as_str(), "dropping record with no identity");
        return None;
    }

    let schedule_info = compose_schedule(&location, &start_time, &capacity);
    let link = link.or_else(|| slug.as_deref().map(|s| format!("{}/{}", EVENT_URL_BASE, s)));

    // Most specific identifier available: id > slug > link > text digest.
    let reference_key = id
        .clone()
        .or_else(|| slug.clone())
        .or_else(|| link.clone())
        .unwrap_or_else(|| {
            digest_text(&format!(
                "{}\n{}",
                title.as_deref().unwrap_or_default(),
                schedule_info
            ))
        });

    Some(ListingRecord {
        title: title.unwrap_or_else(|| UNKNOWN.to_string()),
        schedule_info,
        reference_key,
        upstream_id: id,
        link,
    })
}

/// First non-empty string found at any of the candidate paths.
fn extract(raw: &RawRecord, candidates: FieldPaths) -> Option<String> {
    candidates.iter().find_map(|path| lookup(raw, path))
}

/// Walk a JSON path, stringifying scalar leaves. Empty or whitespace-only
/// strings count as missing.
fn lookup(raw: &RawRecord, path: &[&str]) -> Option<String> {
    let mut current = raw;
    for key in path {
        current = current.get(key)?;
    }
    match current {
        serde_json::Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Join the schedule fragments that are present, `"loc | time | spots"`
/// style. Falls back to a placeholder when nothing was extracted.
fn compose_schedule(
    location: &Option<String>,
    start_time: &Option<String>,
    capacity: &Option<String>,
) -> String {
    let parts: Vec<&str> = [location, start_time, capacity]
        .into_iter()
        .filter_map(|p| p.as_deref())
        .collect();
    if parts.is_empty() {
        SEE_LISTING.to_string()
    } else {
        parts.join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_record_full() {
        let raw = json!({
            "id": "prog-42",
            "name": "Monday Night Volleyball",
            "slug": "monday-night-volleyball",
            "locationName": "Mission Rec Center",
            "startTime": "2026-09-07T18:00:00Z",
            "registrationStatus": "OPEN",
        });

        let record = normalize(&raw, SourceSchema::Api).unwrap();
        assert_eq!(record.title, "Monday Night Volleyball");
        assert_eq!(
            record.schedule_info,
            "Mission Rec Center | 2026-09-07T18:00:00Z | OPEN"
        );
        assert_eq!(record.reference_key, "prog-42");
        assert_eq!(record.upstream_id.as_deref(), Some("prog-42"));
        assert_eq!(
            record.link.as_deref(),
            Some("https://www.volosports.com/event/monday-night-volleyball")
        );
    }

    #[test]
    fn test_missing_fields_degrade_to_placeholders() {
        let raw = json!({ "name": "Pickup Game" });

        let record = normalize(&raw, SourceSchema::Api).unwrap();
        assert_eq!(record.title, "Pickup Game");
        assert_eq!(record.schedule_info, "see listing");
        assert!(record.upstream_id.is_none());
        assert!(record.link.is_none());
        // Last-resort reference key is a digest of the text content.
        assert_eq!(record.reference_key.len(), 64);
    }

    #[test]
    fn test_slug_beats_link_for_reference_key() {
        let raw = json!({
            "name": "Tuesday League",
            "slug": "tuesday-league",
            "url": "https://example.com/elsewhere",
        });

        let record = normalize(&raw, SourceSchema::Api).unwrap();
        assert_eq!(record.reference_key, "tuesday-league");
        // Explicit link wins over the slug-derived one.
        assert_eq!(record.link.as_deref(), Some("https://example.com/elsewhere"));
    }

    #[test]
    fn test_untitled_record_kept_when_identifier_present() {
        let raw = json!({ "slug": "mystery-session" });

        let record = normalize(&raw, SourceSchema::Api).unwrap();
        assert_eq!(record.title, "unknown");
        assert_eq!(record.reference_key, "mystery-session");
        assert!(record.has_identity());
    }

    #[test]
    fn test_contentless_record_dropped() {
        assert!(normalize(&json!({}), SourceSchema::Api).is_none());
        assert!(normalize(&json!({ "name": "   " }), SourceSchema::Api).is_none());
        assert!(normalize(&json!(null), SourceSchema::Api).is_none());
        assert!(normalize(&json!([1, 2, 3]), SourceSchema::Api).is_none());
        assert!(normalize(&json!("just a string"), SourceSchema::Api).is_none());
    }

    #[test]
    fn test_page_data_nested_paths() {
        let raw = json!({
            "title": "Sunday Open Play",
            "location": { "name": "Golden Gate Park" },
            "startDate": "2026-09-13",
            "programId": "pd-7",
        });

        let record = normalize(&raw, SourceSchema::PageData).unwrap();
        assert_eq!(record.title, "Sunday Open Play");
        assert_eq!(record.schedule_info, "Golden Gate Park | 2026-09-13");
        assert_eq!(record.reference_key, "pd-7");
        assert_eq!(record.upstream_id.as_deref(), Some("pd-7"));
    }

    #[test]
    fn test_numeric_fields_stringified() {
        let raw = json!({
            "title": "Thursday League",
            "programId": 9001,
            "spotsRemaining": 3,
        });

        let record = normalize(&raw, SourceSchema::PageData).unwrap();
        assert_eq!(record.reference_key, "9001");
        assert_eq!(record.schedule_info, "3");
    }

    #[test]
    fn test_pure_function() {
        let raw = json!({ "name": "Repeatable", "slug": "repeatable" });
        let a = normalize(&raw, SourceSchema::Api).unwrap();
        let b = normalize(&raw, SourceSchema::Api).unwrap();
        assert_eq!(a, b);
    }
}
