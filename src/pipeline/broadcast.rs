// Broadcast fan-out — delivers novel posts and counts what went out.
//
// Every post is attempted independently and concurrently; the stage
// waits for all attempts to settle before reporting. A post counts
// only if both the delivery and the store record succeed. The stage
// itself never fails — partial failure is the normal case.

use futures::future::join_all;
use tracing::warn;

use crate::db::BroadcastStore;
use crate::filter::AcceptedPost;
use crate::telegram::Broadcaster;

/// Send each post to the channel and record it on success.
///
/// Returns the number of posts that were both delivered and recorded.
/// An empty batch returns 0 without any network calls.
pub async fn fan_out(
    sink: &dyn Broadcaster,
    store: &dyn BroadcastStore,
    channel: &str,
    posts: &[AcceptedPost],
) -> usize {
    if posts.is_empty() {
        return 0;
    }

    let attempts = posts.iter().map(|post| async move {
        match sink.send(channel, &post.permalink()).await {
            Ok(()) => match store.record(post).await {
                Ok(()) => 1,
                Err(e) => {
                    // Delivered but not recorded: the post will look
                    // novel again next cycle. Surface it — this is the
                    // one path that can double-post.
                    warn!(id = %post.id, error = %e, "Broadcast went out but recording failed");
                    0
                }
            },
            Err(e) => {
                warn!(id = %post.id, error = %e, "Broadcast failed, skipping");
                0
            }
        }
    });

    join_all(attempts).await.into_iter().sum()
}
