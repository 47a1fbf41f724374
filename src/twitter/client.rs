// Twitter v1.1 search client — bearer-authenticated HTTP over reqwest.
//
// The pipeline only reads public search results, so app-only bearer
// auth is enough. A thin typed wrapper: one endpoint, serde response
// types, errors with enough context to diagnose a failed cycle.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::types::Tweet;
use super::SearchSource;

/// Default base URL for the Twitter v1.1 REST API.
pub const DEFAULT_API_URL: &str = "https://api.twitter.com/1.1";

/// Bearer-authenticated client for the v1.1 search endpoint.
pub struct TwitterClient {
    client: reqwest::Client,
    base_url: String,
    bearer_token: String,
}

impl TwitterClient {
    /// Create a new search client pointing at the given base URL.
    ///
    /// Pass a different URL for testing against a local stub server.
    pub fn new(base_url: &str, bearer_token: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("bullhorn/0.1")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer_token: bearer_token.to_string(),
        })
    }
}

#[async_trait]
impl SearchSource for TwitterClient {
    async fn search(
        &self,
        query: &str,
        lang: &str,
        count: u32,
        result_type: &str,
    ) -> Result<Vec<Tweet>> {
        let url = format!("{}/search/tweets.json", self.base_url);
        let count_str = count.to_string();

        debug!(query = query, lang = lang, count = count, "Search request");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .query(&[
                ("q", query),
                ("lang", lang),
                ("count", &count_str),
                ("result_type", result_type),
                ("include_entities", "true"),
            ])
            .send()
            .await
            .context("Search request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Search returned {status}: {body}");
        }

        // A response whose `statuses` member is not an array of tweet
        // objects fails here and aborts the cycle — the filter chain
        // itself never sees a malformed batch.
        let result: SearchResponse = response
            .json()
            .await
            .context("Failed to deserialize search response")?;

        Ok(result.statuses)
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    statuses: Vec<Tweet>,
}
