//! Storage contract for per-topic FAQ corpora

use crate::error::Result;
use crate::types::{EntryId, FaqEntry, Vote};

/// Short handle reserved for marking messages as nonsense
pub const RESERVED_SHORT: &str = "ignore";

/// Check whether a short collides with the reserved handle
pub fn is_reserved_short(short: &str) -> bool {
    short.eq_ignore_ascii_case(RESERVED_SHORT)
}

/// Data access for per-topic FAQ corpora
///
/// Texts handed to the mutating operations are expected to be cleaned
/// already; the store keeps them verbatim. Corpora only ever grow, there
/// are no deletion operations. Implementations must refuse duplicate
/// shorts and answers as well as the reserved short.
pub trait FaqStore: Send + Sync {
    /// All topic names known to the store
    fn topics(&self) -> Result<Vec<String>>;

    /// Cleaned nonsense texts of a topic
    fn nonsense(&self, topic: &str) -> Result<Vec<String>>;

    /// All entries of a topic
    fn entries(&self, topic: &str) -> Result<Vec<FaqEntry>>;

    /// A single entry by id
    fn entry(&self, topic: &str, id: EntryId) -> Result<Option<FaqEntry>>;

    /// Look up an entry by its short handle, case-insensitively
    fn entry_by_short(&self, topic: &str, short: &str) -> Result<Option<FaqEntry>>;

    /// Look up an entry by its exact answer text
    fn entry_by_answer(&self, topic: &str, answer: &str) -> Result<Option<FaqEntry>>;

    /// Record a cleaned text as nonsense
    fn add_nonsense(&self, topic: &str, text: &str) -> Result<()>;

    /// Append a cleaned example to an entry
    ///
    /// Returns `false` when the example was already present and nothing
    /// changed.
    fn add_example(&self, topic: &str, id: EntryId, text: &str) -> Result<bool>;

    /// Create a new entry with no examples yet
    fn create_entry(&self, topic: &str, answer: &str, short: &str) -> Result<FaqEntry>;

    /// Apply a reader vote to an entry's tally
    fn record_vote(&self, topic: &str, id: EntryId, vote: Vote) -> Result<()>;
}
