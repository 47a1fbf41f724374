// Polling loop — runs cycles forever on a fixed cadence.
//
// The loop is self-healing: a failed cycle is logged and the next one
// is scheduled after the same delay. The wait starts after the cycle
// settles, so cycles never overlap no matter how long one takes.

use std::time::Duration;

use tracing::{error, info};

use crate::config::{BannedLists, Config};
use crate::db::BroadcastStore;
use crate::language::LanguageGate;
use crate::telegram::Broadcaster;
use crate::twitter::SearchSource;

use super::cycle;

/// Run the pipeline indefinitely. Never returns under normal operation.
pub async fn run(
    search: &dyn SearchSource,
    sink: &dyn Broadcaster,
    store: &dyn BroadcastStore,
    gate: &LanguageGate,
    lists: &BannedLists,
    config: &Config,
) {
    let interval = Duration::from_millis(config.poll_interval_ms);
    info!(
        interval_ms = config.poll_interval_ms,
        query = %config.search_query,
        "Polling loop started"
    );

    loop {
        match cycle::run_once(search, sink, store, gate, lists, config).await {
            Ok(count) => info!(count = count, "{count} new posts have been broadcast"),
            Err(e) => error!(error = %e, "Cycle failed"),
        }

        tokio::time::sleep(interval).await;
    }
}
