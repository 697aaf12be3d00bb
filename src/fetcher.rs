// ./src/fetcher.rs

use crate::{
    config::{ApodConfig, ConfigError},
    error::FetchFailure,
    record::Record,
};
use reqwest::{
    header::{CACHE_CONTROL, PRAGMA},
    Client, Url,
};
use std::str::FromStr;
use tracing::debug;

// ════════════════════════════════════════════════════════════
// 1. Request-scoped cache toggle
// ════════════════════════════════════════════════════════════

/// Whether the outbound record request may be served from an HTTP cache.
///
/// This only toggles request headers. Nothing is stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CacheMode {
    #[default]
    Default,
    Bypass,
}

impl CacheMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheMode::Default => "default",
            CacheMode::Bypass => "bypass",
        }
    }
}

impl FromStr for CacheMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" | "force-cache" => Ok(CacheMode::Default),
            "bypass" | "no-cache" | "no-store" => Ok(CacheMode::Bypass),
            _ => Err(ConfigError::InvalidCacheMode(s.to_string())),
        }
    }
}

// ════════════════════════════════════════════════════════════
// 2. The fetcher
// ════════════════════════════════════════════════════════════

/// Retrieves one record from the APOD endpoint.
#[derive(Clone)]
pub struct RecordFetcher {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl RecordFetcher {
    pub fn new(config: &ApodConfig, client: Client) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key().to_string(),
        }
    }

    /// `GET <endpoint>?api_key=..&count=1&thumbs=true`, returning element 0.
    ///
    /// One request, no retry, no timeout. A non-2xx status fails before the
    /// body is read.
    pub async fn fetch(&self, cache: CacheMode) -> Result<Record, FetchFailure> {
        let mut request = self.client.get(self.endpoint.clone()).query(&[
            ("api_key", self.api_key.as_str()),
            ("count", "1"),
            ("thumbs", "true"),
        ]);

        if cache == CacheMode::Bypass {
            request = request
                .header(CACHE_CONTROL, "no-cache")
                .header(PRAGMA, "no-cache");
        }

        debug!(endpoint = %self.endpoint, cache = cache.as_str(), "fetching record");

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::Status {
                url: self.endpoint.to_string(),
                status,
            });
        }

        let body = response.bytes().await?;
        first_record(&body)
    }
}

/// Parses a JSON array and validates its first element as a record.
///
/// Later elements are never inspected.
pub fn first_record(body: &[u8]) -> Result<Record, FetchFailure> {
    let elements: Vec<serde_json::Value> = serde_json::from_slice(body)?;
    let first = elements
        .into_iter()
        .next()
        .ok_or(FetchFailure::EmptyFeed)?;
    Ok(serde_json::from_value(first)?)
}
