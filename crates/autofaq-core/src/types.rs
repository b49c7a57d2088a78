//! Core types for the AutoFAQ engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of an FAQ entry within its topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub u32);

impl EntryId {
    /// Training label for this entry; label `0` is reserved for nonsense
    pub fn label(&self) -> usize {
        self.0 as usize + 1
    }

    /// Recover the entry id from a training label, `None` for the
    /// nonsense label
    pub fn from_label(label: usize) -> Option<EntryId> {
        if label == 0 {
            None
        } else {
            Some(EntryId((label - 1) as u32))
        }
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Platform handle of a single chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Platform handle of a chat channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelId(pub u64);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Up/down counters accumulated from reader feedback on sent answers
///
/// Counters only ever grow; a retracted reaction is not reconciled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    /// Approving votes
    pub up: u32,

    /// Disapproving votes
    pub down: u32,
}

impl VoteTally {
    /// Total number of votes cast
    pub fn total(&self) -> u32 {
        self.up + self.down
    }

    /// Apply a single vote to the tally
    pub fn record(&mut self, vote: Vote) {
        match vote {
            Vote::Up => self.up += 1,
            Vote::Down => self.down += 1,
        }
    }
}

/// A single piece of reader feedback on a sent answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vote {
    /// The answer helped
    Up,
    /// The answer missed
    Down,
}

impl Vote {
    /// Interpret a reaction delta; zero is a no-op
    pub fn from_delta(delta: i32) -> Option<Vote> {
        match delta {
            d if d > 0 => Some(Vote::Up),
            d if d < 0 => Some(Vote::Down),
            _ => None,
        }
    }
}

/// A curated question/answer pair together with its training examples
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqEntry {
    /// Stable identifier within the topic
    pub id: EntryId,

    /// Short handle curators use to reference this entry
    pub short: String,

    /// The canonical answer text sent to askers
    pub answer: String,

    /// Cleaned example phrasings of the question
    pub examples: Vec<String>,

    /// Accumulated reader feedback
    pub votes: VoteTally,
}

impl FaqEntry {
    /// Create an entry with no examples and no votes yet
    pub fn new(id: EntryId, short: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id,
            short: short.into(),
            answer: answer.into(),
            examples: Vec::new(),
            votes: VoteTally::default(),
        }
    }
}

/// An inbound chat message handed to the engine
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    /// Platform id of the message
    pub id: MessageId,

    /// Channel the message arrived in
    pub channel: ChannelId,

    /// Display name of the author
    pub author: String,

    /// Raw message text
    pub content: String,
}

impl IncomingMessage {
    /// Create an incoming message record
    pub fn new(
        id: MessageId,
        channel: ChannelId,
        author: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id,
            channel,
            author: author.into(),
            content: content.into(),
        }
    }
}

/// A message summary returned by a channel history scan
#[derive(Debug, Clone)]
pub struct HistoryMessage {
    /// Platform id of the message
    pub id: MessageId,

    /// Whether the engine itself sent this message
    pub from_self: bool,

    /// Message this one replies to, if any
    pub replies_to: Option<MessageId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip() {
        let id = EntryId(7);
        assert_eq!(id.label(), 8);
        assert_eq!(EntryId::from_label(8), Some(id));
        assert_eq!(EntryId::from_label(0), None);
    }

    #[test]
    fn test_vote_from_delta() {
        assert_eq!(Vote::from_delta(1), Some(Vote::Up));
        assert_eq!(Vote::from_delta(3), Some(Vote::Up));
        assert_eq!(Vote::from_delta(-1), Some(Vote::Down));
        assert_eq!(Vote::from_delta(0), None);
    }

    #[test]
    fn test_tally_record() {
        let mut tally = VoteTally::default();
        assert_eq!(tally.total(), 0);

        tally.record(Vote::Up);
        tally.record(Vote::Up);
        tally.record(Vote::Down);

        assert_eq!(tally.up, 2);
        assert_eq!(tally.down, 1);
        assert_eq!(tally.total(), 3);
    }
}
