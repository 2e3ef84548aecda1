//! Mock fetcher for testing.
//!
//! Scripts a sequence of fetch outcomes and counts calls, in the spirit
//! of the other mock collaborators.

use std::collections::VecDeque;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{FetchError, FetchResult};
use crate::traits::fetcher::Fetcher;
use crate::types::{RawRecord, SourceSchema};

/// One scripted fetch outcome.
#[derive(Debug, Clone)]
enum Scripted {
    Success(Vec<RawRecord>),
    Blocked(u16),
    Errored(String),
}

/// Fetcher returning pre-scripted outcomes in order.
///
/// Outcomes are consumed front to back; once the script is exhausted,
/// further calls return an empty success.
#[derive(Default)]
pub struct MockFetcher {
    script: RwLock<VecDeque<Scripted>>,
    calls: RwLock<usize>,
    schema: Option<SourceSchema>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful fetch returning `records`.
    pub fn then_success(self, records: Vec<RawRecord>) -> Self {
        self.script
            .write()
            .unwrap()
            .push_back(Scripted::Success(records));
        self
    }

    /// Queue an upstream-refused outcome.
    pub fn then_blocked(self, status: u16) -> Self {
        self.script
            .write()
            .unwrap()
            .push_back(Scripted::Blocked(status));
        self
    }

    /// Queue an unexpected-failure outcome.
    pub fn then_errored(self, detail: impl Into<String>) -> Self {
        self.script
            .write()
            .unwrap()
            .push_back(Scripted::Errored(detail.into()));
        self
    }

    /// Override the schema hint (defaults to `Api`).
    pub fn with_schema(mut self, schema: SourceSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// How many times fetch was called.
    pub fn fetch_count(&self) -> usize {
        *self.calls.read().unwrap()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self) -> FetchResult<Vec<RawRecord>> {
        *self.calls.write().unwrap() += 1;

        match self.script.write().unwrap().pop_front() {
            Some(Scripted::Success(records)) => Ok(records),
            Some(Scripted::Blocked(status)) => Err(FetchError::Blocked { status }),
            Some(Scripted::Errored(detail)) => Err(FetchError::Payload(detail)),
            None => Ok(Vec::new()),
        }
    }

    fn schema(&self) -> SourceSchema {
        self.schema.unwrap_or(SourceSchema::Api)
    }

    fn name(&self) -> &str {
        "mock"
    }
}
