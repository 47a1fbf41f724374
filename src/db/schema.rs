// Database schema — table creation.
//
// A `schema_version` table tracks which migrations have run so future
// schema changes can be applied in place.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Create all tables if they don't exist yet.
///
/// This is idempotent — safe to call on every startup.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        -- Tracks schema version for future migrations
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Every post we've already broadcast. The id is the dedup key;
        -- the record is the allow-listed JSON that went out.
        CREATE TABLE IF NOT EXISTS broadcast_posts (
            id TEXT PRIMARY KEY,
            record TEXT NOT NULL,
            broadcast_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Index for 'most recent broadcast' lookups
        CREATE INDEX IF NOT EXISTS idx_posts_broadcast_at
            ON broadcast_posts(broadcast_at);
        ",
    )
    .context("Failed to create database tables")?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [1],
    )?;

    Ok(())
}

/// Count the number of tables in the database (useful for init confirmation).
pub fn table_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();
    }

    #[test]
    fn test_table_count() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        // schema_version, broadcast_posts = 2 tables
        assert_eq!(table_count(&conn).unwrap(), 2i64);
    }
}
