// Tweet types — the candidate records flowing through the filter chain.

use serde::{Deserialize, Serialize};

/// A tweet as returned by the v1.1 search API — only the fields the
/// pipeline needs. Serializable because field projection works on the
/// serialized form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tweet {
    /// The string form of the tweet id. The numeric `id` field loses
    /// precision in JSON, so `id_str` is the canonical identifier.
    #[serde(rename = "id_str")]
    pub id: String,
    pub text: String,
    pub user: TweetUser,
    #[serde(default)]
    pub retweet_count: i64,
    /// True when the authenticated account has already retweeted this.
    #[serde(default)]
    pub retweeted: bool,
    /// Present when this tweet is itself a retweet; carries the
    /// original tweet being reshared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retweeted_status: Option<Box<Tweet>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TweetUser {
    /// Display name (freeform, user-chosen).
    pub name: String,
    /// The @handle, unique per account.
    pub screen_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_search_payload() {
        let json = r#"{
            "id_str": "123",
            "text": "hello",
            "user": {"name": "Someone", "screen_name": "someone"},
            "retweet_count": 42,
            "retweeted": false
        }"#;
        let tweet: Tweet = serde_json::from_str(json).unwrap();
        assert_eq!(tweet.id, "123");
        assert_eq!(tweet.retweet_count, 42);
        assert!(tweet.retweeted_status.is_none());
    }

    #[test]
    fn test_deserializes_embedded_original() {
        let json = r#"{
            "id_str": "2",
            "text": "RT @a: original",
            "user": {"name": "Resharer", "screen_name": "resharer"},
            "retweet_count": 10,
            "retweeted": false,
            "retweeted_status": {
                "id_str": "1",
                "text": "original",
                "user": {"name": "Author", "screen_name": "author"},
                "retweet_count": 10,
                "retweeted": false
            }
        }"#;
        let tweet: Tweet = serde_json::from_str(json).unwrap();
        let original = tweet.retweeted_status.unwrap();
        assert_eq!(original.id, "1");
        assert_eq!(original.text, "original");
    }

    #[test]
    fn test_serialized_form_uses_wire_field_names() {
        let tweet = Tweet {
            id: "9".to_string(),
            text: "t".to_string(),
            user: TweetUser {
                name: "n".to_string(),
                screen_name: "s".to_string(),
            },
            retweet_count: 0,
            retweeted: true,
            retweeted_status: None,
        };
        let value = serde_json::to_value(&tweet).unwrap();
        assert_eq!(value["id_str"], "9");
        // Absent embedded original is omitted, not null
        assert!(value.get("retweeted_status").is_none());
    }
}
