// System status display — database stats and last broadcast age.

use anyhow::Result;
use chrono::{NaiveDateTime, Utc};
use std::path::Path;

use crate::db::BroadcastStore;

/// Display system status to the terminal.
pub async fn show(store: &dyn BroadcastStore, db_path: &str) -> Result<()> {
    if !Path::new(db_path).exists() {
        println!("Database: not initialized");
        println!("\nRun `bullhorn init` to set up the database.");
        return Ok(());
    }

    let file_size = std::fs::metadata(db_path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Database: {} ({})", db_path, file_size);

    let count = store.broadcast_count().await?;
    println!("Posts broadcast: {count}");

    match store.last_broadcast_at().await? {
        Some(ts) => match parse_sqlite_timestamp(&ts) {
            Some(age) => println!("Last broadcast: {} ({})", ts, age),
            None => println!("Last broadcast: {}", ts),
        },
        None => {
            println!("Last broadcast: never");
            println!("  Run `bullhorn cycle` to fetch and broadcast once");
        }
    }

    Ok(())
}

/// Turn a sqlite datetime('now') string into a human age ("2h ago").
fn parse_sqlite_timestamp(ts: &str) -> Option<String> {
    let parsed = NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").ok()?;
    let age = Utc::now().naive_utc() - parsed;

    Some(if age.num_days() > 0 {
        format!("{}d ago", age.num_days())
    } else if age.num_hours() > 0 {
        format!("{}h ago", age.num_hours())
    } else if age.num_minutes() > 0 {
        format!("{}m ago", age.num_minutes())
    } else {
        "just now".to_string()
    })
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_parse_sqlite_timestamp_shape() {
        assert!(parse_sqlite_timestamp("2026-01-01 12:00:00").is_some());
        assert!(parse_sqlite_timestamp("not a timestamp").is_none());
    }
}
