use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Monitor configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub ntfy_topic: String,
    pub city: String,
    pub sport: String,
    pub seen_file: String,
    pub graphql_url: String,
    pub discover_url: String,
    pub fetch_limit: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            ntfy_topic: env::var("NTFY_TOPIC").context("NTFY_TOPIC must be set")?,
            city: env::var("VOLO_CITY").unwrap_or_else(|_| "San Francisco".to_string()),
            sport: env::var("VOLO_SPORT").unwrap_or_else(|_| "Volleyball".to_string()),
            seen_file: env::var("SEEN_FILE").unwrap_or_else(|_| "known_games.json".to_string()),
            graphql_url: env::var("VOLO_GRAPHQL_URL")
                .unwrap_or_else(|_| "https://api.volosports.com/graphql".to_string()),
            discover_url: env::var("VOLO_DISCOVER_URL")
                .unwrap_or_else(|_| "https://www.volosports.com/discover".to_string()),
            fetch_limit: env::var("FETCH_LIMIT")
                .unwrap_or_else(|_| "50".to_string())
                .parse()
                .context("FETCH_LIMIT must be a valid number")?,
        })
    }
}
