//! Pipeline controller: one discovery run, top to bottom.
//!
//! fetch → normalize → dedupe against the seen-set → notify new →
//! commit. Strictly sequential, one fetch result per invocation; an
//! external scheduler decides how often runs happen. The controller
//! exclusively owns the in-memory seen-set for the duration of a run.

use tracing::{info, warn};

use crate::error::{FetchError, PipelineError};
use crate::normalize::normalize;
use crate::traits::{Fetcher, Notifier, SeenStore, Severity};
use crate::types::{Fingerprint, ListingRecord};

/// Terminal classification of one pipeline run.
///
/// The binary maps these onto process exit codes; `Blocked` and
/// `Errored` must stay distinguishable from a clean run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Clean run, nothing previously unseen
    NoNewListings,
    /// Clean run, this many new listings were notified
    Notified(usize),
    /// Upstream explicitly refused; nothing was committed
    Blocked { status: u16 },
    /// Unexpected fetch failure; nothing was committed
    Errored { detail: String },
}

impl RunOutcome {
    /// Whether the run completed its processing pass.
    pub fn is_clean(&self) -> bool {
        matches!(self, RunOutcome::NoNewListings | RunOutcome::Notified(_))
    }
}

/// Orchestrates one fetcher, one notifier, and one seen-set store.
pub struct Pipeline<F, N, S> {
    fetcher: F,
    notifier: N,
    store: S,
}

impl<F, N, S> Pipeline<F, N, S>
where
    F: Fetcher,
    N: Notifier,
    S: SeenStore,
{
    pub fn new(fetcher: F, notifier: N, store: S) -> Self {
        Self {
            fetcher,
            notifier,
            store,
        }
    }

    /// Execute one full run.
    ///
    /// Fetch failures become run outcomes, per-record notify failures are
    /// absorbed; the only error propagated is a failed seen-set commit,
    /// which is the last action of the run and leaves the previously
    /// persisted state intact.
    pub async fn run(&self) -> Result<RunOutcome, PipelineError> {
        let mut seen = self.store.load().await;
        info!(
            fetcher = self.fetcher.name(),
            known = seen.len(),
            "starting discovery run"
        );

        let raw_records = match self.fetcher.fetch().await {
            Ok(records) => records,
            Err(FetchError::Blocked { status }) => {
                warn!(status, "upstream blocked the run");
                self.send_alert(&format!(
                    "Upstream is blocking requests (HTTP {}). Skipping this run; consider reducing run frequency.",
                    status
                ))
                .await;
                return Ok(RunOutcome::Blocked { status });
            }
            Err(e) => {
                warn!(error = %e, "fetch failed");
                self.send_alert(&format!("Listing fetch failed: {}", e)).await;
                return Ok(RunOutcome::Errored {
                    detail: e.to_string(),
                });
            }
        };

        let schema = self.fetcher.schema();
        let mut batch_keys: std::collections::HashSet<String> = std::collections::HashSet::new();
        let mut new_count = 0usize;

        for raw in &raw_records {
            let Some(record) = normalize(raw, schema) else {
                continue;
            };

            // The upstream sometimes returns the same session twice in
            // one page of results; collapse those before fingerprinting.
            if !batch_keys.insert(record.reference_key.clone()) {
                continue;
            }

            let fingerprint = Fingerprint::for_record(&record);
            if seen.contains(&fingerprint) {
                continue;
            }

            let message = build_message(&record, &fingerprint);
            match self.notifier.notify(&message, Severity::Normal).await {
                Ok(()) => {
                    info!(title = %record.title, fingerprint = %fingerprint, "notified new listing");
                }
                Err(e) => {
                    // Not retried: the listing is still marked seen, so a
                    // failed push for it is lost. Accepted tradeoff.
                    warn!(title = %record.title, error = %e, "notification failed, marking seen anyway");
                }
            }

            seen.insert(fingerprint);
            new_count += 1;
        }

        // Commit even when nothing is new: format normalization and
        // corruption recovery then happen every run.
        self.store.commit(&seen).await?;

        info!(
            fetched = raw_records.len(),
            new = new_count,
            known = seen.len(),
            "discovery run complete"
        );

        if new_count == 0 {
            Ok(RunOutcome::NoNewListings)
        } else {
            Ok(RunOutcome::Notified(new_count))
        }
    }

    /// Deliver an operational alert; delivery failure is logged and
    /// otherwise ignored (the run outcome already carries the state).
    async fn send_alert(&self, message: &str) {
        if let Err(e) = self.notifier.notify(message, Severity::Alert).await {
            warn!(error = %e, "operational alert delivery failed");
        }
    }
}

/// One human-readable message per new listing: title, schedule text, a
/// followable link (or the reference key when no link exists), and the
/// fingerprint for operator debugging.
fn build_message(record: &ListingRecord, fingerprint: &Fingerprint) -> String {
    let link = record
        .link
        .as_deref()
        .unwrap_or(record.reference_key.as_str());
    format!(
        "🏐 {}\n📅 {}\n🔗 {}\nref: {}",
        record.title, record.schedule_info, link, fingerprint
    )
}
