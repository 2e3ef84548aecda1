//! Listing discovery and deduplication pipeline.
//!
//! Watches a recreational-sports booking platform for newly-opened
//! sessions and pushes a notification the first time each session is
//! seen. The crate is built around four pieces:
//!
//! - **Fetchers** obtain raw listing records from whichever upstream
//!   channel currently works (direct API query, embedded page-data
//!   extraction); they are interchangeable behind the [`traits::Fetcher`]
//!   trait.
//! - The **normalizer** maps the loosely-shaped payloads into one
//!   canonical [`types::ListingRecord`].
//! - [`types::Fingerprint`] gives each record a stable identity used as
//!   the dedupe key against the persisted seen-set.
//! - The [`pipeline::Pipeline`] controller runs one fetch → normalize →
//!   dedupe → notify → commit pass per invocation.
//!
//! Delivery is best-effort: a listing is marked seen even when its push
//! fails, and a crash between notify and commit can re-notify once.

pub mod error;
pub mod fetchers;
pub mod normalize;
pub mod notifiers;
pub mod pipeline;
pub mod stores;
pub mod traits;
pub mod types;

pub use error::{FetchError, NotifyError, PipelineError, StoreError};
pub use fetchers::{GraphqlFetcher, MockFetcher, PageDataFetcher};
pub use normalize::normalize;
pub use notifiers::{MockNotifier, NtfyNotifier};
pub use pipeline::{Pipeline, RunOutcome};
pub use stores::{JsonFileStore, MemoryStore};
pub use traits::{Fetcher, Notifier, SeenStore, Severity};
pub use types::{Fingerprint, ListingRecord, RawRecord, SeenSet, SourceSchema};
