//! Embedded page-data fetcher.
//!
//! Fallback strategy for when the API endpoint is fenced off: GET the
//! public discovery page and lift the JSON blob the framework embeds in
//! a `__NEXT_DATA__` script tag. Slower and looser-shaped than the API,
//! which is why its records go through the page-data normalizer schema.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::error::{FetchError, FetchResult};
use crate::traits::fetcher::Fetcher;
use crate::types::{RawRecord, SourceSchema};

/// Fetcher that scrapes the embedded page-data blob.
pub struct PageDataFetcher {
    client: reqwest::Client,
    page_url: String,
    sport: String,
}

impl PageDataFetcher {
    pub fn new(page_url: impl Into<String>, sport: impl Into<String>) -> FetchResult<Self> {
        let user_agent = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self {
            client,
            page_url: page_url.into(),
            sport: sport.into(),
        })
    }

    /// Pull the embedded JSON out of the rendered page.
    fn extract_page_data(html: &str) -> Option<serde_json::Value> {
        let pattern = regex::Regex::new(
            r#"(?s)<script[^>]*id\s*=\s*["']__NEXT_DATA__["'][^>]*>(.*?)</script>"#,
        )
        .unwrap();

        let blob = pattern.captures(html)?.get(1)?.as_str();
        serde_json::from_str(blob).ok()
    }

    /// Walk the page-data tree collecting objects that look like program
    /// listings (anything carrying a slug or program id).
    fn collect_programs(value: &serde_json::Value, out: &mut Vec<RawRecord>) {
        match value {
            serde_json::Value::Object(map) => {
                if map.contains_key("slug") || map.contains_key("programId") {
                    out.push(value.clone());
                    return;
                }
                for child in map.values() {
                    Self::collect_programs(child, out);
                }
            }
            serde_json::Value::Array(items) => {
                for child in items {
                    Self::collect_programs(child, out);
                }
            }
            _ => {}
        }
    }

    /// Keep listings for the configured sport; objects that carry no
    /// sport field at all are kept (the page is already sport-scoped).
    fn matches_sport(&self, item: &RawRecord) -> bool {
        let sport = item
            .get("sportName")
            .or_else(|| item.get("sport"))
            .and_then(|v| v.as_str());
        match sport {
            Some(s) => s.to_lowercase().contains(&self.sport.to_lowercase()),
            None => true,
        }
    }
}

#[async_trait]
impl Fetcher for PageDataFetcher {
    async fn fetch(&self) -> FetchResult<Vec<RawRecord>> {
        debug!(url = %self.page_url, "fetching discovery page");

        let response = self.client.get(&self.page_url).send().await?;

        let status = response.status();
        match status.as_u16() {
            403 | 429 => {
                warn!(status = status.as_u16(), "discovery page is blocking the connection");
                return Err(FetchError::Blocked {
                    status: status.as_u16(),
                });
            }
            s if !status.is_success() => {
                return Err(FetchError::UpstreamStatus { status: s });
            }
            _ => {}
        }

        let html = response.text().await?;
        let page_data = Self::extract_page_data(&html)
            .ok_or_else(|| FetchError::Payload("no __NEXT_DATA__ blob in page".to_string()))?;

        // Program listings live somewhere under the page props; the exact
        // nesting shifts between deploys, so walk rather than index.
        let root = page_data
            .pointer("/props/pageProps")
            .unwrap_or(&page_data);

        let mut programs = Vec::new();
        Self::collect_programs(root, &mut programs);
        let records: Vec<RawRecord> = programs
            .into_iter()
            .filter(|item| self.matches_sport(item))
            .collect();

        info!(matching = records.len(), sport = %self.sport, "extracted listings from page data");
        Ok(records)
    }

    fn schema(&self) -> SourceSchema {
        SourceSchema::PageData
    }

    fn name(&self) -> &str {
        "page-data"
    }
}
