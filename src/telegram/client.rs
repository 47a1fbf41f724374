// Telegram Bot API client — sendMessage over reqwest.
//
// The bot only ever posts links into a single channel, so this wraps
// exactly one method. Telegram reports failures both as HTTP errors
// and as `ok: false` bodies; both become errors here.
//
// API docs: https://core.telegram.org/bots/api#sendmessage

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Broadcaster;

/// Default base URL for the Telegram Bot API.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

pub struct TelegramClient {
    client: reqwest::Client,
    base_url: String,
    bot_token: String,
}

impl TelegramClient {
    /// Create a new Bot API client pointing at the given base URL.
    ///
    /// Pass a different URL for testing against a local stub server.
    pub fn new(base_url: &str, bot_token: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("bullhorn/0.1")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            bot_token: bot_token.to_string(),
        })
    }
}

#[async_trait]
impl Broadcaster for TelegramClient {
    async fn send(&self, channel: &str, message: &str) -> Result<()> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.bot_token);

        let request = SendMessageRequest {
            chat_id: channel.to_string(),
            text: message.to_string(),
        };

        debug!(channel = channel, "sendMessage request");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("sendMessage request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("sendMessage returned {status}: {body}");
        }

        let result: SendMessageResponse = response
            .json()
            .await
            .context("Failed to parse sendMessage response")?;

        if !result.ok {
            anyhow::bail!(
                "sendMessage rejected: {}",
                result.description.unwrap_or_else(|| "no description".to_string())
            );
        }

        Ok(())
    }
}

// --- Bot API request/response types ---

#[derive(Serialize)]
struct SendMessageRequest {
    chat_id: String,
    text: String,
}

#[derive(Deserialize)]
struct SendMessageResponse {
    ok: bool,
    description: Option<String>,
}
