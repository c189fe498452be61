/// Nexon Open API Client Module
///
/// This module handles all interactions with the Nexon open API. It wraps the
/// HTTP client and owns request construction for the FC Online match-history
/// endpoint: query parameters, the credential header, and response decoding.
use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::error::RemoteFetchError;

/// Default base URL for the Nexon open API.
pub const DEFAULT_BASE_URL: &str = "https://open.api.nexon.com";

/// Request header carrying the API credential.
const API_KEY_HEADER: &str = "x-nxopen-api-key";

/// Path of the user match-history endpoint.
const MATCH_HISTORY_PATH: &str = "/fconline/v1/user/match";

// One page of official (matchtype 50) matches. The endpoint paginates past
// 100 records; only the first page is requested.
const MATCH_TYPE: u32 = 50;
const PAGE_OFFSET: u32 = 0;
const PAGE_LIMIT: u32 = 100;

pub struct NexonApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl NexonApiClient {
    /// Create a new client for the given credential and base URL
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self> {
        if api_key.trim().is_empty() {
            anyhow::bail!("API key must not be empty");
        }

        let http =
            reqwest::Client::builder().timeout(timeout).build().context("Failed to build HTTP client")?;

        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_string(), api_key })
    }

    /// Get the base URL this client is pointed at
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one page of match history for a player
    ///
    /// Returns the decoded JSON body as-is; shape validation happens in the
    /// transform stage. An empty array is a valid response.
    pub async fn fetch_match_history(&self, ouid: &str) -> Result<Value, RemoteFetchError> {
        let url = format!("{}{}", self.base_url, MATCH_HISTORY_PATH);

        tracing::debug!("Requesting match history from {}", url);

        let response = self
            .http
            .get(&url)
            .query(&match_query(ouid))
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(RemoteFetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteFetchError::Status(status));
        }

        response.json::<Value>().await.map_err(RemoteFetchError::Decode)
    }
}

/// Query parameters for the match-history endpoint
fn match_query(ouid: &str) -> [(&'static str, String); 4] {
    [
        ("ouid", ouid.to_string()),
        ("matchtype", MATCH_TYPE.to_string()),
        ("offset", PAGE_OFFSET.to_string()),
        ("limit", PAGE_LIMIT.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_query_requests_one_page_of_official_matches() {
        let query = match_query("abc123");

        assert_eq!(query[0], ("ouid", "abc123".to_string()));
        assert_eq!(query[1], ("matchtype", "50".to_string()));
        assert_eq!(query[2], ("offset", "0".to_string()));
        assert_eq!(query[3], ("limit", "100".to_string()));
    }

    #[test]
    fn test_rejects_empty_api_key() {
        let result =
            NexonApiClient::new("   ".to_string(), DEFAULT_BASE_URL.to_string(), Duration::from_secs(5));

        assert!(result.is_err());
    }

    #[test]
    fn test_trims_trailing_slash_from_base_url() {
        let client = NexonApiClient::new(
            "key".to_string(),
            "https://open.api.nexon.com/".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(client.base_url(), "https://open.api.nexon.com");
    }
}
