//! Core data types for the discovery pipeline.

pub mod fingerprint;
pub mod record;
pub mod seen;

pub use fingerprint::{digest_text, Fingerprint};
pub use record::{ListingRecord, RawRecord, SourceSchema};
pub use seen::SeenSet;
