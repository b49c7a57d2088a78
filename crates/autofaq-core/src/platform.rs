//! Messaging contract between the engine and a chat platform

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ChannelId, HistoryMessage, MessageId};

/// Reaction added when a curation command cannot be resolved
pub const REACTION_UNCLEAR: &str = "\u{1F914}";

/// Reaction added when a curation command has been applied
pub const REACTION_DONE: &str = "\u{2705}";

/// Outbound messaging surface the engine drives
///
/// Implementations talk to a real chat platform; tests and the demo use
/// local stand-ins. Failures surface as `Error::Platform` and are never
/// retried by the engine.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Reply to a message, optionally with the voting affordance
    /// attached; returns the platform id of the sent reply
    async fn send_reply(
        &self,
        channel: ChannelId,
        to: MessageId,
        text: &str,
        with_feedback: bool,
    ) -> Result<MessageId>;

    /// Attach an emoji reaction to a message
    async fn add_reaction(&self, channel: ChannelId, message: MessageId, emoji: &str)
        -> Result<()>;

    /// The most recent messages of a channel, newest first
    async fn recent_history(&self, channel: ChannelId, limit: usize)
        -> Result<Vec<HistoryMessage>>;

    /// Delete a message the engine sent earlier
    async fn delete_message(&self, channel: ChannelId, message: MessageId) -> Result<()>;
}
