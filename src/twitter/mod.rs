// Twitter search source — fetches candidate tweets for the pipeline.

pub mod client;
pub mod types;

use anyhow::Result;
use async_trait::async_trait;

use types::Tweet;

/// Capability trait for the candidate search source, so the pipeline
/// can run against a deterministic stub in tests.
#[async_trait]
pub trait SearchSource: Send + Sync {
    /// Fetch a batch of candidate tweets matching the query.
    async fn search(
        &self,
        query: &str,
        lang: &str,
        count: u32,
        result_type: &str,
    ) -> Result<Vec<Tweet>>;
}
