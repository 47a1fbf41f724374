// SqliteStore — rusqlite backend implementing the BroadcastStore trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection
// is !Send. Trait methods lock the mutex, do synchronous rusqlite
// work, and return; the lock is never held across .await points.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use crate::filter::AcceptedPost;

use super::traits::BroadcastStore;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

#[async_trait]
impl BroadcastStore for SqliteStore {
    async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    async fn filter_novel(&self, posts: Vec<AcceptedPost>) -> Result<Vec<AcceptedPost>> {
        let conn = self.conn.lock().await;
        super::queries::filter_novel(&conn, posts)
    }

    async fn record(&self, post: &AcceptedPost) -> Result<()> {
        let conn = self.conn.lock().await;
        super::queries::insert_post(&conn, post)
    }

    async fn broadcast_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::broadcast_count(&conn)
    }

    async fn last_broadcast_at(&self) -> Result<Option<String>> {
        let conn = self.conn.lock().await;
        super::queries::last_broadcast_at(&conn)
    }
}
