//! In-memory reference implementation of the store contract

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::store::{is_reserved_short, FaqStore};
use crate::types::{EntryId, FaqEntry, Vote};

#[derive(Debug, Default)]
struct TopicData {
    nonsense: Vec<String>,
    entries: Vec<FaqEntry>,
    next_id: u32,
}

/// In-memory store backing tests and the demo binary
///
/// Shorts are stored lowercased so the case-insensitive uniqueness rule
/// holds structurally.
#[derive(Default)]
pub struct MemoryStore {
    topics: RwLock<HashMap<String, TopicData>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a topic, creating it empty when missing
    pub fn add_topic(&self, topic: impl Into<String>) {
        self.topics.write().entry(topic.into()).or_default();
    }

    /// Seed an entry with pre-cleaned examples, creating the topic as
    /// needed
    pub fn seed_entry(
        &self,
        topic: &str,
        short: &str,
        answer: &str,
        examples: &[&str],
    ) -> Result<EntryId> {
        self.add_topic(topic);
        let entry = self.create_entry(topic, answer, short)?;
        for example in examples {
            self.add_example(topic, entry.id, example)?;
        }
        Ok(entry.id)
    }

    /// Seed pre-cleaned nonsense texts, creating the topic as needed
    pub fn seed_nonsense(&self, topic: &str, texts: &[&str]) -> Result<()> {
        self.add_topic(topic);
        for text in texts {
            self.add_nonsense(topic, text)?;
        }
        Ok(())
    }

    fn with_topic<T>(&self, topic: &str, f: impl FnOnce(&TopicData) -> T) -> Result<T> {
        let topics = self.topics.read();
        let data = topics
            .get(topic)
            .ok_or_else(|| Error::UnknownTopic(topic.to_string()))?;
        Ok(f(data))
    }

    fn with_topic_mut<T>(
        &self,
        topic: &str,
        f: impl FnOnce(&mut TopicData) -> Result<T>,
    ) -> Result<T> {
        let mut topics = self.topics.write();
        let data = topics
            .get_mut(topic)
            .ok_or_else(|| Error::UnknownTopic(topic.to_string()))?;
        f(data)
    }
}

impl FaqStore for MemoryStore {
    fn topics(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.topics.read().keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn nonsense(&self, topic: &str) -> Result<Vec<String>> {
        self.with_topic(topic, |data| data.nonsense.clone())
    }

    fn entries(&self, topic: &str) -> Result<Vec<FaqEntry>> {
        self.with_topic(topic, |data| data.entries.clone())
    }

    fn entry(&self, topic: &str, id: EntryId) -> Result<Option<FaqEntry>> {
        self.with_topic(topic, |data| {
            data.entries.iter().find(|e| e.id == id).cloned()
        })
    }

    fn entry_by_short(&self, topic: &str, short: &str) -> Result<Option<FaqEntry>> {
        let probe = short.to_lowercase();
        self.with_topic(topic, |data| {
            data.entries.iter().find(|e| e.short == probe).cloned()
        })
    }

    fn entry_by_answer(&self, topic: &str, answer: &str) -> Result<Option<FaqEntry>> {
        self.with_topic(topic, |data| {
            data.entries.iter().find(|e| e.answer == answer).cloned()
        })
    }

    fn add_nonsense(&self, topic: &str, text: &str) -> Result<()> {
        self.with_topic_mut(topic, |data| {
            data.nonsense.push(text.to_string());
            Ok(())
        })
    }

    fn add_example(&self, topic: &str, id: EntryId, text: &str) -> Result<bool> {
        self.with_topic_mut(topic, |data| {
            let entry = data
                .entries
                .iter_mut()
                .find(|e| e.id == id)
                .ok_or(Error::UnknownEntry(id.0))?;

            if entry.examples.iter().any(|e| e == text) {
                return Ok(false);
            }

            entry.examples.push(text.to_string());
            Ok(true)
        })
    }

    fn create_entry(&self, topic: &str, answer: &str, short: &str) -> Result<FaqEntry> {
        if is_reserved_short(short) {
            return Err(Error::store(format!("short '{short}' is reserved")));
        }

        let short = short.to_lowercase();
        self.with_topic_mut(topic, |data| {
            if data.entries.iter().any(|e| e.short == short) {
                return Err(Error::store(format!("short '{short}' is already taken")));
            }
            if data.entries.iter().any(|e| e.answer == answer) {
                return Err(Error::store("answer is already registered"));
            }

            let entry = FaqEntry::new(EntryId(data.next_id), short.clone(), answer);
            data.next_id += 1;
            data.entries.push(entry.clone());
            Ok(entry)
        })
    }

    fn record_vote(&self, topic: &str, id: EntryId, vote: Vote) -> Result<()> {
        self.with_topic_mut(topic, |data| {
            let entry = data
                .entries
                .iter_mut()
                .find(|e| e.id == id)
                .ok_or(Error::UnknownEntry(id.0))?;
            entry.votes.record(vote);
            Ok(())
        })
    }
}
