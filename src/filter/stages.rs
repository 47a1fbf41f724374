// The seven filter stages, in pipeline order.
//
// Each stage takes the current batch by value and returns a new one,
// so stages compose in sequence and every stage is individually
// testable. None of them can fail the batch: the only fallible
// per-item work is language classification, and a failed
// classification rejects that item instead of erroring.

use std::collections::HashSet;

use futures::future::join_all;
use serde_json::Value;

use crate::config::BannedLists;
use crate::language::LanguageGate;
use crate::twitter::types::Tweet;

use super::normalize::normalize;
use super::AcceptedPost;

/// Stage 1: drop tweets we've already retweeted and tweets below the
/// minimum retweet count. Equal to the minimum is kept.
pub fn filter_retweeted(tweets: Vec<Tweet>, min_retweet_count: i64) -> Vec<Tweet> {
    tweets
        .into_iter()
        .filter(|t| !t.retweeted && t.retweet_count >= min_retweet_count)
        .collect()
}

/// Stage 2: when a tweet is itself a retweet, swap in the embedded
/// original so the rest of the chain operates on the real post.
pub fn choose_originals(tweets: Vec<Tweet>) -> Vec<Tweet> {
    tweets
        .into_iter()
        .map(|t| match t.retweeted_status {
            Some(original) => *original,
            None => t,
        })
        .collect()
}

/// Stage 3: remove tweets whose id already appeared earlier in the
/// batch. First occurrence wins; order is preserved.
pub fn dedup_by_id(tweets: Vec<Tweet>) -> Vec<Tweet> {
    let mut seen = HashSet::new();
    tweets
        .into_iter()
        .filter(|t| seen.insert(t.id.clone()))
        .collect()
}

/// Stage 4: keep only tweets the language gate accepts.
///
/// All classifications are issued concurrently and the stage waits for
/// every verdict before producing its output — one slow or failing
/// classification never short-circuits the rest.
pub async fn filter_language(tweets: Vec<Tweet>, gate: &LanguageGate) -> Vec<Tweet> {
    let verdicts = join_all(tweets.iter().map(|t| gate.accepts(&t.text))).await;
    tweets
        .into_iter()
        .zip(verdicts)
        .filter_map(|(t, accepted)| accepted.then_some(t))
        .collect()
}

/// Stage 5: drop tweets whose author matches any banned-user pattern,
/// by display name or screen name.
pub fn filter_banned_users(tweets: Vec<Tweet>, lists: &BannedLists) -> Vec<Tweet> {
    tweets
        .into_iter()
        .filter(|t| !lists.matches_user(&t.user.name, &t.user.screen_name))
        .collect()
}

/// Stage 6: drop tweets whose normalized text matches any
/// banned-string pattern.
pub fn filter_banned_strings(tweets: Vec<Tweet>, lists: &BannedLists) -> Vec<Tweet> {
    tweets
        .into_iter()
        .filter(|t| !lists.matches_text(&normalize(&t.text)))
        .collect()
}

/// Stage 7: project each survivor down to the allow-listed fields and
/// force the retweeted flag off — the accepted post becomes the
/// canonical record from here on.
pub fn project_fields(tweets: Vec<Tweet>, allowed_fields: &HashSet<String>) -> Vec<AcceptedPost> {
    tweets
        .into_iter()
        .map(|t| {
            let id = t.id.clone();
            let mut record = match serde_json::to_value(&t) {
                Ok(Value::Object(map)) => map,
                // Tweet always serializes to an object
                _ => serde_json::Map::new(),
            };
            record.retain(|key, _| allowed_fields.contains(key));
            record.insert("retweeted".to_string(), Value::Bool(false));
            AcceptedPost { id, record }
        })
        .collect()
}
