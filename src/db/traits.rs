// Broadcast store trait — async interface over the dedup database.
//
// The store answers one question ("which of these have we already
// broadcast?") and records one fact ("this post went out"). The
// operational queries exist for `status`. Async so the synchronous
// rusqlite backend and any future native-async backend fit behind a
// single interface.

use anyhow::Result;
use async_trait::async_trait;

use crate::filter::AcceptedPost;

#[async_trait]
pub trait BroadcastStore: Send + Sync {
    /// Count the number of user-created tables in the database.
    async fn table_count(&self) -> Result<i64>;

    /// Keep only the posts not yet recorded, preserving order.
    async fn filter_novel(&self, posts: Vec<AcceptedPost>) -> Result<Vec<AcceptedPost>>;

    /// Record a post as broadcast. Called only after a successful
    /// delivery.
    async fn record(&self, post: &AcceptedPost) -> Result<()>;

    /// Total number of posts ever broadcast.
    async fn broadcast_count(&self) -> Result<i64>;

    /// Timestamp of the most recent broadcast, if any.
    async fn last_broadcast_at(&self) -> Result<Option<String>>;
}
