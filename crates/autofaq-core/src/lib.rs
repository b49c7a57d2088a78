//! AutoFAQ Core
//!
//! Core types, contracts, and error handling shared across AutoFAQ
//! components.
//!
//! This crate provides:
//! - The corpus data model (entries, examples, votes, identifiers)
//! - Error types and result handling
//! - The storage contract (`FaqStore`) with an in-memory reference impl
//! - The messaging contract (`ChatPlatform`) the engine drives

pub mod error;
pub mod memory;
pub mod platform;
pub mod store;
pub mod types;

pub use error::{Error, Result};
pub use memory::MemoryStore;
pub use platform::{ChatPlatform, REACTION_DONE, REACTION_UNCLEAR};
pub use store::{is_reserved_short, FaqStore, RESERVED_SHORT};
pub use types::{
    ChannelId, EntryId, FaqEntry, HistoryMessage, IncomingMessage, MessageId, Vote, VoteTally,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::platform::ChatPlatform;
    pub use crate::store::FaqStore;
    pub use crate::types::{EntryId, FaqEntry, IncomingMessage, Vote, VoteTally};
}
