//! Process-wide registry of topic engines and vote routing

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use autofaq_core::{
    ChatPlatform, EntryId, Error, FaqStore, IncomingMessage, MessageId, Result, Vote,
};
use autofaq_policy::CheckOutcome;

use crate::config::TopicConfig;
use crate::engine::AutoFaq;

/// Upper bound on remembered reply associations
const MAX_REPLY_ASSOCIATIONS: usize = 1024;

/// Bounded map from sent replies to the entry they answered
///
/// Oldest associations fall out first once the bound is reached; a vote
/// arriving for a forgotten reply is dropped.
struct ReplyAssociations {
    order: VecDeque<MessageId>,
    entries: HashMap<MessageId, (String, EntryId)>,
}

impl ReplyAssociations {
    fn new() -> Self {
        Self {
            order: VecDeque::new(),
            entries: HashMap::new(),
        }
    }

    fn insert(&mut self, reply: MessageId, topic: String, entry: EntryId) {
        if self.entries.insert(reply, (topic, entry)).is_none() {
            self.order.push_back(reply);
            if self.order.len() > MAX_REPLY_ASSOCIATIONS {
                if let Some(evicted) = self.order.pop_front() {
                    self.entries.remove(&evicted);
                }
            }
        }
    }

    fn get(&self, reply: &MessageId) -> Option<(String, EntryId)> {
        self.entries.get(reply).cloned()
    }
}

/// All topic engines of one process
///
/// Built once at startup and handed by reference to request handlers.
/// Topics are fully independent; the registry only routes messages and
/// votes to the right engine and remembers which sent reply belongs to
/// which entry so vote callbacks can find their way back.
pub struct FaqRegistry {
    engines: HashMap<String, Arc<AutoFaq>>,
    associations: RwLock<ReplyAssociations>,
}

impl FaqRegistry {
    /// Load every topic from the store and fit its engine
    pub async fn build(
        store: Arc<dyn FaqStore>,
        platform: Arc<dyn ChatPlatform>,
        config: TopicConfig,
    ) -> Result<Self> {
        let mut engines = HashMap::new();

        for topic in store.topics()? {
            let engine = AutoFaq::new(
                topic.as_str(),
                config.clone(),
                Arc::clone(&store),
                Arc::clone(&platform),
            )?;

            engine.refit().await?;
            info!(
                topic = %topic,
                trained = engine.is_trained(),
                "Registered topic"
            );
            engines.insert(topic, Arc::new(engine));
        }

        Ok(Self {
            engines,
            associations: RwLock::new(ReplyAssociations::new()),
        })
    }

    /// Route an incoming message to its topic engine
    ///
    /// When an answer goes out, the sent reply is associated with the
    /// answering entry so later votes on it can be attributed.
    pub async fn check_message(
        &self,
        topic: &str,
        incoming: &IncomingMessage,
    ) -> Result<CheckOutcome> {
        let engine = self
            .engines
            .get(topic)
            .ok_or_else(|| Error::UnknownTopic(topic.to_string()))?;

        let outcome = engine.check_message(incoming).await?;

        if let CheckOutcome::Answered { entry_id, reply, .. } = &outcome {
            self.associations
                .write()
                .insert(*reply, topic.to_string(), *entry_id);
        }

        Ok(outcome)
    }

    /// Engine of a single topic
    pub fn get(&self, topic: &str) -> Option<&Arc<AutoFaq>> {
        self.engines.get(topic)
    }

    /// Registered topic names, sorted
    pub fn topics(&self) -> Vec<String> {
        let mut topics: Vec<String> = self.engines.keys().cloned().collect();
        topics.sort();
        topics
    }

    /// Feedback callback for a vote cast on a sent reply
    ///
    /// Votes for replies without a live association are dropped: the
    /// association may have been evicted, or the vote targets a message
    /// this process never sent.
    pub fn on_vote(&self, reply: MessageId, delta: i32) -> Result<()> {
        let vote = match Vote::from_delta(delta) {
            Some(vote) => vote,
            None => return Ok(()),
        };

        let (topic, entry) = match self.associations.read().get(&reply) {
            Some(found) => found,
            None => {
                debug!(reply = %reply, "Vote for unassociated reply dropped");
                return Ok(());
            }
        };

        let engine = self
            .engines
            .get(&topic)
            .ok_or_else(|| Error::UnknownTopic(topic.clone()))?;

        engine.apply_vote(entry, vote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_association_lookup() {
        let mut table = ReplyAssociations::new();
        table.insert(MessageId(5), "support".to_string(), EntryId(2));

        assert_eq!(
            table.get(&MessageId(5)),
            Some(("support".to_string(), EntryId(2)))
        );
        assert_eq!(table.get(&MessageId(6)), None);
    }

    #[test]
    fn test_association_eviction_drops_oldest() {
        let mut table = ReplyAssociations::new();
        for i in 0..(MAX_REPLY_ASSOCIATIONS as u64 + 10) {
            table.insert(MessageId(i), "support".to_string(), EntryId(0));
        }

        assert_eq!(table.entries.len(), MAX_REPLY_ASSOCIATIONS);
        assert_eq!(table.get(&MessageId(0)), None);
        assert_eq!(table.get(&MessageId(9)), None);
        assert!(table.get(&MessageId(10)).is_some());
    }

    #[test]
    fn test_association_overwrite_keeps_bound() {
        let mut table = ReplyAssociations::new();
        table.insert(MessageId(1), "support".to_string(), EntryId(0));
        table.insert(MessageId(1), "support".to_string(), EntryId(3));

        assert_eq!(table.entries.len(), 1);
        assert_eq!(table.order.len(), 1);
        assert_eq!(
            table.get(&MessageId(1)),
            Some(("support".to_string(), EntryId(3)))
        );
    }
}
