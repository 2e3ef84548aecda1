//! Direct GraphQL API fetcher.
//!
//! Queries the discovery endpoint with the same `searchPrograms` payload
//! the web app uses. Fast and structured, but the endpoint sits behind
//! bot protection: a 403 means the connection is being blocked and the
//! run should back off, not retry.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::error::{FetchError, FetchResult};
use crate::traits::fetcher::Fetcher;
use crate::types::{RawRecord, SourceSchema};

const SEARCH_QUERY: &str = r#"query searchPrograms($input: SearchProgramsInput!) {
  searchPrograms(input: $input) {
    items {
      id
      name
      slug
      sportName
      locationName
      startTime
      registrationStatus
      __typename
    }
  }
}"#;

/// Fetcher that POSTs the discovery search query directly.
pub struct GraphqlFetcher {
    client: reqwest::Client,
    endpoint: String,
    city: String,
    sport: String,
    limit: usize,
}

impl GraphqlFetcher {
    pub fn new(
        endpoint: impl Into<String>,
        city: impl Into<String>,
        sport: impl Into<String>,
        limit: usize,
    ) -> FetchResult<Self> {
        // Browser-like headers; the endpoint rejects obvious bots.
        let user_agent = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::REFERER,
            "https://www.volosports.com/discover".parse().unwrap(),
        );
        headers.insert(
            reqwest::header::ORIGIN,
            "https://www.volosports.com".parse().unwrap(),
        );

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            city: city.into(),
            sport: sport.into(),
            limit,
        })
    }

    fn payload(&self) -> serde_json::Value {
        json!({
            "operationName": "searchPrograms",
            "variables": {
                "input": {
                    "cityName": self.city,
                    "sportNames": [self.sport],
                    "view": "SPORTS",
                    "subView": "DAILY",
                    "limit": self.limit,
                    "offset": 0,
                }
            },
            "query": SEARCH_QUERY,
        })
    }

    /// Keep only items for the configured sport. The search input already
    /// filters, but mixed results have been observed upstream.
    fn matches_sport(&self, item: &RawRecord) -> bool {
        item.get("sportName")
            .and_then(|v| v.as_str())
            .map(|s| s.to_lowercase().contains(&self.sport.to_lowercase()))
            .unwrap_or(false)
    }
}

#[async_trait]
impl Fetcher for GraphqlFetcher {
    async fn fetch(&self) -> FetchResult<Vec<RawRecord>> {
        debug!(endpoint = %self.endpoint, city = %self.city, sport = %self.sport, "querying search API");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&self.payload())
            .send()
            .await?;

        let status = response.status();
        match status.as_u16() {
            403 | 429 => {
                warn!(status = status.as_u16(), "API is blocking the connection");
                return Err(FetchError::Blocked {
                    status: status.as_u16(),
                });
            }
            s if !status.is_success() => {
                return Err(FetchError::UpstreamStatus { status: s });
            }
            _ => {}
        }

        let body: serde_json::Value = response.json().await?;
        let items = body
            .pointer("/data/searchPrograms/items")
            .and_then(|v| v.as_array())
            .ok_or_else(|| FetchError::Payload("missing searchPrograms.items".to_string()))?;

        let records: Vec<RawRecord> = items
            .iter()
            .filter(|item| self.matches_sport(item))
            .cloned()
            .collect();

        info!(
            total = items.len(),
            matching = records.len(),
            sport = %self.sport,
            "search API returned items"
        );
        Ok(records)
    }

    fn schema(&self) -> SourceSchema {
        SourceSchema::Api
    }

    fn name(&self) -> &str {
        "graphql-api"
    }
}
