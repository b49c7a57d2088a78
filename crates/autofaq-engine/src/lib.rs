//! AutoFAQ Engine
//!
//! The orchestration layer of AutoFAQ: per-topic engines that classify
//! incoming messages, gate answers behind vote-adjusted confidence
//! thresholds, learn from curator feedback, and retrain in place, plus
//! the process-wide registry that routes messages and votes to the
//! right topic.
//!
//! The engine never talks to a chat service or a database directly; it
//! drives the `FaqStore` and `ChatPlatform` contracts from
//! `autofaq-core` and leaves their implementations to the embedding
//! application.

pub mod config;
pub mod engine;
pub mod registry;

pub use config::TopicConfig;
pub use engine::AutoFaq;
pub use registry::FaqRegistry;
