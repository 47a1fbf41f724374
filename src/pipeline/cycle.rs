// One pipeline cycle: fetch → filter → dedupe → broadcast.
//
// Errors from fetch or the novelty check abort the cycle and propagate
// to the poller, which logs them and schedules the next cycle anyway.
// Everything past the novelty check absorbs its own failures.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::{BannedLists, Config};
use crate::db::BroadcastStore;
use crate::filter;
use crate::language::LanguageGate;
use crate::telegram::Broadcaster;
use crate::twitter::SearchSource;

use super::broadcast;

/// Run a single cycle and return the number of newly broadcast posts.
pub async fn run_once(
    search: &dyn SearchSource,
    sink: &dyn Broadcaster,
    store: &dyn BroadcastStore,
    gate: &LanguageGate,
    lists: &BannedLists,
    config: &Config,
) -> Result<usize> {
    // FETCH
    let candidates = search
        .search(
            &config.search_query,
            &config.search_lang,
            config.search_count,
            &config.search_result_type,
        )
        .await
        .context("Candidate fetch failed")?;
    debug!(count = candidates.len(), "Fetched candidates");

    // FILTER
    let accepted = filter::run(
        candidates,
        config.min_retweet_count,
        gate,
        lists,
        &config.allowed_fields,
    )
    .await;

    // DEDUP-CHECK
    let novel = store
        .filter_novel(accepted)
        .await
        .context("Novelty check failed")?;
    debug!(count = novel.len(), "Novel posts after dedup");

    // BROADCAST
    let sent = broadcast::fan_out(sink, store, &config.telegram_channel, &novel).await;

    if sent < novel.len() {
        info!(
            attempted = novel.len(),
            sent = sent,
            "Some broadcasts did not go out"
        );
    }

    Ok(sent)
}
