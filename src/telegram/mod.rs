// Telegram broadcast transport — delivers accepted posts to a channel.

pub mod client;

use anyhow::Result;
use async_trait::async_trait;

/// Capability trait for the outbound broadcast channel. The fan-out
/// stage only needs "send this message to this channel" — wrapping it
/// in a trait keeps the stage testable without a bot token.
#[async_trait]
pub trait Broadcaster: Send + Sync {
    /// Deliver one message to the channel. Per-item failures are
    /// absorbed by the caller, never retried here.
    async fn send(&self, channel: &str, message: &str) -> Result<()>;
}
