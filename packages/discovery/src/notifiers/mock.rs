//! Mock notifier for testing.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::{NotifyError, NotifyResult};
use crate::traits::notifier::{Notifier, Severity};

/// Notifier that records every delivery instead of sending it.
///
/// Clones share state, so a test can keep a handle after moving the
/// notifier into a pipeline. Can be told to fail specific calls (by
/// zero-based index) to exercise the per-record failure path.
#[derive(Default)]
pub struct MockNotifier {
    sent: Arc<RwLock<Vec<(String, Severity)>>>,
    fail_on: Arc<RwLock<Vec<usize>>>,
    attempts: Arc<RwLock<usize>>,
}

impl Clone for MockNotifier {
    fn clone(&self) -> Self {
        Self {
            sent: Arc::clone(&self.sent),
            fail_on: Arc::clone(&self.fail_on),
            attempts: Arc::clone(&self.attempts),
        }
    }
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the nth notify call (counting every attempt, failed or not).
    pub fn fail_call(self, index: usize) -> Self {
        self.fail_on.write().unwrap().push(index);
        self
    }

    /// Messages successfully "delivered", in order.
    pub fn sent(&self) -> Vec<(String, Severity)> {
        self.sent.read().unwrap().clone()
    }

    /// Delivered messages with the given severity.
    pub fn sent_with(&self, severity: Severity) -> Vec<String> {
        self.sent
            .read()
            .unwrap()
            .iter()
            .filter(|(_, s)| *s == severity)
            .map(|(m, _)| m.clone())
            .collect()
    }

    /// Total notify attempts, including failed ones.
    pub fn attempt_count(&self) -> usize {
        *self.attempts.read().unwrap()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn notify(&self, message: &str, severity: Severity) -> NotifyResult<()> {
        let attempt = {
            let mut attempts = self.attempts.write().unwrap();
            let current = *attempts;
            *attempts += 1;
            current
        };

        if self.fail_on.read().unwrap().contains(&attempt) {
            return Err(NotifyError::Service {
                status: 503,
                body: "scripted failure".to_string(),
            });
        }

        self.sent
            .write()
            .unwrap()
            .push((message.to_string(), severity));
        Ok(())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
