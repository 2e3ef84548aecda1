//! ntfy.sh push notifier.
//!
//! Delivers messages by POSTing the body to a topic on an ntfy server;
//! anyone subscribed to the topic gets the push. Presentation (title,
//! priority, tags) rides in headers and switches on severity so
//! operational alerts are visually distinct from listing notifications.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::error::{NotifyError, NotifyResult};
use crate::traits::notifier::{Notifier, Severity};

const DEFAULT_SERVER: &str = "https://ntfy.sh";

/// Notifier that publishes to an ntfy topic.
pub struct NtfyNotifier {
    client: reqwest::Client,
    server: String,
    topic: String,
}

impl NtfyNotifier {
    pub fn new(topic: impl Into<String>) -> NotifyResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            client,
            server: DEFAULT_SERVER.to_string(),
            topic: topic.into(),
        })
    }

    /// Point at a different ntfy server (self-hosted instances, tests).
    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = server.into();
        self
    }

    fn presentation(severity: Severity) -> (&'static str, &'static str, &'static str) {
        match severity {
            Severity::Normal => ("New session found", "high", "volleyball"),
            Severity::Alert => ("Monitor alert", "urgent", "warning"),
        }
    }
}

#[async_trait]
impl Notifier for NtfyNotifier {
    async fn notify(&self, message: &str, severity: Severity) -> NotifyResult<()> {
        let (title, priority, tags) = Self::presentation(severity);
        let url = format!("{}/{}", self.server, self.topic);

        debug!(topic = %self.topic, ?severity, "publishing notification");

        let response = self
            .client
            .post(&url)
            .header("Title", title)
            .header("Priority", priority)
            .header("Tags", tags)
            .body(message.to_string())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %body, "ntfy publish failed");
            return Err(NotifyError::Service {
                status: status.as_u16(),
                body,
            });
        }

        debug!(topic = %self.topic, "notification published");
        Ok(())
    }

    fn name(&self) -> &str {
        "ntfy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presentation_varies_by_severity() {
        let normal = NtfyNotifier::presentation(Severity::Normal);
        let alert = NtfyNotifier::presentation(Severity::Alert);
        assert_ne!(normal.0, alert.0);
        assert_ne!(normal.2, alert.2);
    }
}
