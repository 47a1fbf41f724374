// Central configuration loaded from environment variables, plus the
// banned-pattern lists loaded from JSON files.
//
// All secrets come from env vars (never hardcoded). The .env file is
// loaded automatically at startup via dotenvy. Everything here is
// loaded once and passed explicitly into components — no ambient
// global lookup after startup.

use std::collections::HashSet;
use std::env;
use std::fs;

use anyhow::{Context, Result};
use regex_lite::{Regex, RegexBuilder};
use serde::Deserialize;

pub struct Config {
    /// Bearer token for the Twitter v1.1 search API.
    pub twitter_bearer_token: String,
    /// Twitter API base URL (override for testing).
    pub twitter_api_url: String,
    pub telegram_bot_token: String,
    /// Channel the bot broadcasts to (e.g. "@mychannel").
    pub telegram_channel: String,
    /// Telegram Bot API base URL (override for testing).
    pub telegram_api_url: String,

    // Search parameters
    pub search_query: String,
    pub search_lang: String,
    pub search_count: u32,
    pub search_result_type: String,

    // Filter settings
    pub min_retweet_count: i64,
    /// When false, the language stage is a passthrough and the
    /// detector is never invoked.
    pub secondary_check: bool,
    /// Hint passed through to the language detector (backends that
    /// don't take hints ignore it).
    pub lang_hint: Option<String>,
    /// Minimum detector score for a tweet to count as the target
    /// language. The scale is detector-defined.
    pub lang_score_threshold: f64,
    /// Serialized tweet fields that survive projection.
    pub allowed_fields: HashSet<String>,

    pub poll_interval_ms: u64,
    pub banned_users_file: String,
    pub banned_strings_file: String,
    pub db_path: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Only the API credentials have no defaults — everything else
    /// falls back to the values the bot has always run with.
    pub fn load() -> Result<Self> {
        Ok(Self {
            twitter_bearer_token: env::var("TWITTER_BEARER_TOKEN").unwrap_or_default(),
            twitter_api_url: env::var("TWITTER_API_URL")
                .unwrap_or_else(|_| crate::twitter::client::DEFAULT_API_URL.to_string()),
            telegram_bot_token: env::var("TELEGRAM_BOT_TOKEN").unwrap_or_default(),
            telegram_channel: env::var("TELEGRAM_CHANNEL").unwrap_or_default(),
            telegram_api_url: env::var("TELEGRAM_API_URL")
                .unwrap_or_else(|_| crate::telegram::client::DEFAULT_API_URL.to_string()),
            search_query: env::var("SEARCH_QUERY").unwrap_or_else(|_| " ".to_string()),
            search_lang: env::var("SEARCH_LANG").unwrap_or_else(|_| "fa".to_string()),
            search_count: parse_env("SEARCH_COUNT", 100)?,
            search_result_type: env::var("SEARCH_RESULT_TYPE")
                .unwrap_or_else(|_| "mixed".to_string()),
            min_retweet_count: parse_env("MIN_RETWEET_COUNT", 10)?,
            secondary_check: parse_env("SECONDARY_CHECK", true)?,
            lang_hint: env::var("LANG_HINT").ok(),
            lang_score_threshold: parse_env("LANG_SCORE_THRESHOLD", 0.8)?,
            allowed_fields: parse_fields(
                &env::var("ALLOWED_FIELDS")
                    .unwrap_or_else(|_| "id_str,text,retweet_count".to_string()),
            ),
            poll_interval_ms: parse_env("POLL_INTERVAL_MS", 120_000)?,
            banned_users_file: env::var("BANNED_USERS_FILE")
                .unwrap_or_else(|_| "data/users.json".to_string()),
            banned_strings_file: env::var("BANNED_STRINGS_FILE")
                .unwrap_or_else(|_| "data/strings.json".to_string()),
            db_path: env::var("BULLHORN_DB_PATH").unwrap_or_else(|_| "./bullhorn.db".to_string()),
        })
    }

    /// Check that the Twitter bearer token is configured.
    /// Call this before any operation that fetches candidates.
    pub fn require_twitter(&self) -> Result<()> {
        if self.twitter_bearer_token.is_empty() {
            anyhow::bail!(
                "TWITTER_BEARER_TOKEN not set. Add it to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }

    /// Check that the Telegram credentials are configured.
    /// Call this before any operation that broadcasts.
    pub fn require_telegram(&self) -> Result<()> {
        if self.telegram_bot_token.is_empty() || self.telegram_channel.is_empty() {
            anyhow::bail!(
                "TELEGRAM_BOT_TOKEN or TELEGRAM_CHANNEL not set. Add them to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }
}

/// Parse an env var into any FromStr type, falling back to a default
/// when the variable is unset.
fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {key}={raw}: {e}")),
        Err(_) => Ok(default),
    }
}

/// Split a comma-separated field list into a set, dropping empties.
fn parse_fields(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .collect()
}

// --- Banned pattern lists ---

/// Shape of data/users.json and data/strings.json.
#[derive(Deserialize)]
struct BannedFile {
    banned: Vec<String>,
}

/// The banned-user and banned-string patterns, compiled once at load.
///
/// Every entry is treated as a case-insensitive regex (plain words act
/// as substring matches). The lists never mutate after load.
pub struct BannedLists {
    users: Vec<Regex>,
    strings: Vec<Regex>,
}

impl BannedLists {
    /// Load both lists from their configured JSON files.
    pub fn load(config: &Config) -> Result<Self> {
        let users = load_patterns(&config.banned_users_file)?;
        let strings = load_patterns(&config.banned_strings_file)?;
        Ok(Self { users, strings })
    }

    /// Build lists directly from pattern strings (tests, `check`).
    pub fn from_patterns(users: &[&str], strings: &[&str]) -> Result<Self> {
        Ok(Self {
            users: compile_patterns(users.iter().map(|s| s.to_string()))?,
            strings: compile_patterns(strings.iter().map(|s| s.to_string()))?,
        })
    }

    /// Lists that ban nothing.
    pub fn empty() -> Self {
        Self {
            users: Vec::new(),
            strings: Vec::new(),
        }
    }

    /// True if the author's display name or screen name matches any
    /// banned-user pattern.
    pub fn matches_user(&self, name: &str, screen_name: &str) -> bool {
        self.users
            .iter()
            .any(|re| re.is_match(name) || re.is_match(screen_name))
    }

    /// True if the (already normalized) text matches any banned-string
    /// pattern.
    pub fn matches_text(&self, text: &str) -> bool {
        self.strings.iter().any(|re| re.is_match(text))
    }
}

fn load_patterns(path: &str) -> Result<Vec<Regex>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read banned list file: {path}"))?;
    let file: BannedFile = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse banned list file: {path}"))?;
    compile_patterns(file.banned.into_iter())
}

fn compile_patterns(patterns: impl Iterator<Item = String>) -> Result<Vec<Regex>> {
    patterns
        .map(|p| {
            RegexBuilder::new(&p)
                .case_insensitive(true)
                .build()
                .with_context(|| format!("Invalid banned pattern: {p}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fields_trims_and_drops_empties() {
        let fields = parse_fields("id_str, text ,,retweet_count");
        assert_eq!(fields.len(), 3);
        assert!(fields.contains("id_str"));
        assert!(fields.contains("text"));
        assert!(fields.contains("retweet_count"));
    }

    #[test]
    fn test_banned_lists_match_case_insensitively() {
        let lists = BannedLists::from_patterns(&["SpamBot"], &["crypto"]).unwrap();
        assert!(lists.matches_user("friendly spambot 3000", "whatever"));
        assert!(lists.matches_user("whoever", "SPAMBOT_99"));
        assert!(!lists.matches_user("regular person", "regular"));
        assert!(lists.matches_text("buy CRYPTO now"));
        assert!(!lists.matches_text("nothing to see"));
    }

    #[test]
    fn test_empty_lists_match_nothing() {
        let lists = BannedLists::empty();
        assert!(!lists.matches_user("anyone", "at_all"));
        assert!(!lists.matches_text("any text at all"));
    }

    #[test]
    fn test_patterns_are_regexes_not_exact_matches() {
        let lists = BannedLists::from_patterns(&["bot$"], &["^ad:"]).unwrap();
        assert!(lists.matches_user("x", "newsbot"));
        assert!(!lists.matches_user("x", "botanist"));
        assert!(lists.matches_text("ad: buy things"));
        assert!(!lists.matches_text("not an ad: really"));
    }

    #[test]
    fn test_invalid_pattern_is_a_load_error() {
        assert!(BannedLists::from_patterns(&["(unclosed"], &[]).is_err());
    }
}
