//! Console stand-in for a chat platform

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use autofaq_core::{ChannelId, ChatPlatform, HistoryMessage, MessageId, Result};

struct SentRecord {
    id: MessageId,
    channel: ChannelId,
    replies_to: MessageId,
    deleted: bool,
}

/// Prints platform actions to the terminal and remembers its own sends
/// so history scans and reply retraction behave like a real channel
pub struct ConsolePlatform {
    next_id: AtomicU64,
    sent: Mutex<Vec<SentRecord>>,
}

impl ConsolePlatform {
    pub fn new() -> Self {
        Self {
            // well clear of the REPL's message counter
            next_id: AtomicU64::new(1_000_000),
            sent: Mutex::new(Vec::new()),
        }
    }
}

impl Default for ConsolePlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatPlatform for ConsolePlatform {
    async fn send_reply(
        &self,
        channel: ChannelId,
        to: MessageId,
        text: &str,
        with_feedback: bool,
    ) -> Result<MessageId> {
        let id = MessageId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.sent.lock().push(SentRecord {
            id,
            channel,
            replies_to: to,
            deleted: false,
        });

        if with_feedback {
            println!("[bot] {text}");
        } else {
            println!("[bot, echo] {text}");
        }
        Ok(id)
    }

    async fn add_reaction(
        &self,
        _channel: ChannelId,
        _message: MessageId,
        emoji: &str,
    ) -> Result<()> {
        println!("[bot reacted {emoji}]");
        Ok(())
    }

    async fn recent_history(
        &self,
        channel: ChannelId,
        limit: usize,
    ) -> Result<Vec<HistoryMessage>> {
        let sent = self.sent.lock();
        Ok(sent
            .iter()
            .rev()
            .filter(|record| record.channel == channel && !record.deleted)
            .take(limit)
            .map(|record| HistoryMessage {
                id: record.id,
                from_self: true,
                replies_to: Some(record.replies_to),
            })
            .collect())
    }

    async fn delete_message(&self, _channel: ChannelId, message: MessageId) -> Result<()> {
        let mut sent = self.sent.lock();
        if let Some(record) = sent.iter_mut().find(|record| record.id == message) {
            record.deleted = true;
            println!("[bot deleted its earlier answer]");
        }
        Ok(())
    }
}
