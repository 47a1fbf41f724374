// Filter chain — reduces a fetched batch of tweets to the accepted
// posts worth broadcasting.
//
// Seven ordered stages: retweet threshold, canonicalization,
// intra-batch dedup, language acceptance, banned users, banned
// strings, field projection. The chain itself is infallible — per-item
// problems drop the item, and malformed batches can't reach it because
// the search client already parsed the response into typed tweets.

pub mod normalize;
pub mod stages;

use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::debug;

use crate::config::BannedLists;
use crate::language::LanguageGate;
use crate::twitter::types::Tweet;

/// A tweet that survived the whole chain, projected down to the
/// allow-listed fields. The id is kept alongside the record for dedup
/// checks and link construction.
#[derive(Debug, Clone)]
pub struct AcceptedPost {
    pub id: String,
    /// The allow-listed subset of the tweet's serialized fields, with
    /// `retweeted` forced to false.
    pub record: Map<String, Value>,
}

impl AcceptedPost {
    /// The canonical link broadcast for this post.
    pub fn permalink(&self) -> String {
        format!("https://twitter.com/statuses/{}", self.id)
    }
}

/// Run the full chain over a batch, in stage order.
pub async fn run(
    tweets: Vec<Tweet>,
    min_retweet_count: i64,
    gate: &LanguageGate,
    lists: &BannedLists,
    allowed_fields: &HashSet<String>,
) -> Vec<AcceptedPost> {
    let fetched = tweets.len();

    let batch = stages::filter_retweeted(tweets, min_retweet_count);
    let batch = stages::choose_originals(batch);
    let batch = stages::dedup_by_id(batch);
    let batch = stages::filter_language(batch, gate).await;
    let batch = stages::filter_banned_users(batch, lists);
    let batch = stages::filter_banned_strings(batch, lists);
    let accepted = stages::project_fields(batch, allowed_fields);

    debug!(
        fetched = fetched,
        accepted = accepted.len(),
        "Filter chain complete"
    );

    accepted
}
