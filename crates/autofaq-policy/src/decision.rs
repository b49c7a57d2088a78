//! Outcome types for classification, curation, and entry creation
//!
//! None of these are errors. A message the engine declines to answer,
//! a curation command it cannot resolve, or a rejected new entry are
//! all ordinary results the caller reports back to the chat.

use autofaq_core::{EntryId, MessageId};

/// Verdict of the classifier for a single cleaned message
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    /// Not classified at all: no trained model, too few words, or the
    /// text cleaned down to nothing
    Rejected,
    /// Classified as conversational noise
    Nonsense { confidence: f64 },
    /// Classified as a question matching a FAQ entry
    Entry { id: EntryId, confidence: f64 },
}

/// What the engine did with an incoming message
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    /// An answer was sent; `reply` is the message the platform created
    Answered {
        entry_id: EntryId,
        reply: MessageId,
        confidence: f64,
        threshold: f64,
    },
    /// The best match fell short of its vote-adjusted threshold
    BelowThreshold {
        entry_id: EntryId,
        confidence: f64,
        threshold: f64,
    },
    /// Recognized as noise, stayed silent
    Nonsense { confidence: f64 },
    /// Not classified, stayed silent
    Rejected,
}

impl CheckOutcome {
    /// True when an answer actually went out
    pub fn answered(&self) -> bool {
        matches!(self, CheckOutcome::Answered { .. })
    }
}

/// Result of a curator teaching the engine from an existing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurationOutcome {
    /// The message was filed under a FAQ entry; `added` is false when
    /// the entry already carried this exact example
    ExampleAdded { entry_id: EntryId, added: bool },
    /// The message was filed as conversational noise
    NoiseRecorded,
    /// The command could not be resolved to an entry
    Ambiguous,
}

/// Result of creating a new FAQ entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created { id: EntryId },
    Rejected(CreateRejection),
}

/// Why a new entry was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateRejection {
    /// The short name is reserved for marking noise
    ReservedShort,
    /// Another entry already uses this short name
    ShortTaken { answer: String },
    /// Another entry already gives this exact answer
    AnswerTaken { short: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answered_flag() {
        let sent = CheckOutcome::Answered {
            entry_id: EntryId(1),
            reply: MessageId(77),
            confidence: 0.9,
            threshold: 0.5,
        };
        assert!(sent.answered());

        let held = CheckOutcome::BelowThreshold {
            entry_id: EntryId(1),
            confidence: 0.4,
            threshold: 0.5,
        };
        assert!(!held.answered());
        assert!(!CheckOutcome::Rejected.answered());
        assert!(!CheckOutcome::Nonsense { confidence: 0.8 }.answered());
    }
}
