// Database queries — all SQL against the broadcast log lives here.

use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

use crate::filter::AcceptedPost;

/// Keep only the posts whose id has never been recorded.
///
/// Order is preserved. Checked one id at a time with a prepared
/// statement — batches are small (one search page).
pub fn filter_novel(conn: &Connection, posts: Vec<AcceptedPost>) -> Result<Vec<AcceptedPost>> {
    let mut stmt = conn.prepare("SELECT 1 FROM broadcast_posts WHERE id = ?1")?;
    let mut novel = Vec::with_capacity(posts.len());
    for post in posts {
        let seen: Option<i64> = stmt
            .query_row(params![post.id], |row| row.get(0))
            .optional()?;
        if seen.is_none() {
            novel.push(post);
        }
    }
    Ok(novel)
}

/// Record a broadcast post. Recording the same id twice is a no-op —
/// the first broadcast owns the row.
pub fn insert_post(conn: &Connection, post: &AcceptedPost) -> Result<()> {
    let record_json = serde_json::to_string(&Value::Object(post.record.clone()))?;
    conn.execute(
        "INSERT OR IGNORE INTO broadcast_posts (id, record, broadcast_at)
         VALUES (?1, ?2, datetime('now'))",
        params![post.id, record_json],
    )?;
    Ok(())
}

/// Total number of posts ever broadcast.
pub fn broadcast_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM broadcast_posts", [], |row| row.get(0))?;
    Ok(count)
}

/// Timestamp of the most recent broadcast, if any.
pub fn last_broadcast_at(conn: &Connection) -> Result<Option<String>> {
    let result = conn
        .query_row(
            "SELECT broadcast_at FROM broadcast_posts ORDER BY broadcast_at DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;
    use serde_json::Map;

    fn post(id: &str) -> AcceptedPost {
        let mut record = Map::new();
        record.insert("id_str".to_string(), Value::String(id.to_string()));
        record.insert("retweeted".to_string(), Value::Bool(false));
        AcceptedPost {
            id: id.to_string(),
            record,
        }
    }

    #[test]
    fn test_filter_novel_on_empty_store_keeps_all() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();

        let novel = filter_novel(&conn, vec![post("1"), post("2")]).unwrap();
        assert_eq!(novel.len(), 2);
        assert_eq!(novel[0].id, "1");
        assert_eq!(novel[1].id, "2");
    }

    #[test]
    fn test_recorded_posts_are_no_longer_novel() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();

        insert_post(&conn, &post("1")).unwrap();

        let novel = filter_novel(&conn, vec![post("1"), post("2"), post("3")]).unwrap();
        let ids: Vec<&str> = novel.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[test]
    fn test_insert_is_idempotent_per_id() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();

        insert_post(&conn, &post("1")).unwrap();
        insert_post(&conn, &post("1")).unwrap();
        assert_eq!(broadcast_count(&conn).unwrap(), 1);
    }

    #[test]
    fn test_last_broadcast_at_tracks_inserts() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();

        assert!(last_broadcast_at(&conn).unwrap().is_none());
        insert_post(&conn, &post("1")).unwrap();
        assert!(last_broadcast_at(&conn).unwrap().is_some());
    }
}
