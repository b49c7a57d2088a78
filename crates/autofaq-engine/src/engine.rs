//! The per-topic auto-answer engine

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use autofaq_classifiers::{evaluate, MessageNormalizer, TopicModel, TrainingSet};
use autofaq_core::{
    is_reserved_short, ChannelId, ChatPlatform, EntryId, Error, FaqStore, IncomingMessage,
    MessageId, Result, Vote, REACTION_DONE, REACTION_UNCLEAR,
};
use autofaq_policy::{
    CheckOutcome, CreateOutcome, CreateRejection, CurationOutcome, Prediction, ThresholdPolicy,
};

use crate::config::TopicConfig;

/// How many recent messages the noise cleanup scans for a reply to
/// retract
const CLEANUP_SCAN_LIMIT: usize = 20;

/// Auto-answer engine of a single topic
///
/// Owns the served model for its topic and every decision around it:
/// classification, the vote-adjusted confidence gate, curation, and
/// retraining. Reads take a snapshot of the current model and never
/// block on training; corpus mutations, the refit, and the model swap
/// run under one gate so a reader can only ever observe a model that
/// matches a complete corpus state.
pub struct AutoFaq {
    topic: String,
    config: TopicConfig,
    policy: ThresholdPolicy,
    normalizer: MessageNormalizer,
    store: Arc<dyn FaqStore>,
    platform: Arc<dyn ChatPlatform>,
    /// Served model; `None` while the corpus is not trainable
    model: RwLock<Option<Arc<TopicModel>>>,
    /// Serializes mutate, refit, and swap
    train_gate: Mutex<()>,
}

impl AutoFaq {
    /// Create an engine for one topic; it starts untrained until
    /// [`refit`](Self::refit) is called
    pub fn new(
        topic: impl Into<String>,
        config: TopicConfig,
        store: Arc<dyn FaqStore>,
        platform: Arc<dyn ChatPlatform>,
    ) -> Result<Self> {
        config.validate()?;
        let policy = ThresholdPolicy::new(config.min_threshold, config.max_threshold)?;
        let normalizer = MessageNormalizer::new()?;

        Ok(Self {
            topic: topic.into(),
            config,
            policy,
            normalizer,
            store,
            platform,
            model: RwLock::new(None),
            train_gate: Mutex::new(()),
        })
    }

    /// Topic this engine serves
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Whether a model is currently installed
    pub fn is_trained(&self) -> bool {
        self.model.read().is_some()
    }

    /// Classify a raw message without side effects
    ///
    /// Messages are rejected outright when no model is installed, when
    /// they carry fewer words than `min_word_count`, or when cleaning
    /// leaves nothing to classify.
    pub fn predict(&self, raw: &str) -> Prediction {
        let model = match self.model.read().clone() {
            Some(model) => model,
            None => return Prediction::Rejected,
        };

        if raw.split_whitespace().count() < self.config.min_word_count {
            return Prediction::Rejected;
        }

        let cleaned = self.normalizer.clean(raw);
        if cleaned.is_empty() {
            return Prediction::Rejected;
        }

        let (label, confidence) = model.classify(&cleaned);
        match EntryId::from_label(label) {
            Some(id) => Prediction::Entry { id, confidence },
            None => Prediction::Nonsense { confidence },
        }
    }

    /// Handle an incoming message end to end
    ///
    /// Classifies the message and sends the matched answer when its
    /// confidence clears the entry's vote-adjusted threshold. Anything
    /// else abstains silently; declining to answer costs nothing, a
    /// wrong answer does.
    pub async fn check_message(&self, incoming: &IncomingMessage) -> Result<CheckOutcome> {
        match self.predict(&incoming.content) {
            Prediction::Rejected => {
                debug!(
                    topic = %self.topic,
                    author = %incoming.author,
                    "Message not classified"
                );
                Ok(CheckOutcome::Rejected)
            }
            Prediction::Nonsense { confidence } => {
                info!(
                    topic = %self.topic,
                    author = %incoming.author,
                    content = %incoming.content,
                    confidence,
                    "Message judged nonsense"
                );
                Ok(CheckOutcome::Nonsense { confidence })
            }
            Prediction::Entry { id, confidence } => {
                let entry = self.store.entry(&self.topic, id)?.ok_or_else(|| {
                    Error::internal(format!("classifier produced unknown entry {id}"))
                })?;

                let threshold = self.policy.threshold(&entry.votes);
                let answering = confidence >= threshold;

                info!(
                    topic = %self.topic,
                    author = %incoming.author,
                    content = %incoming.content,
                    short = %entry.short,
                    confidence,
                    threshold,
                    answering,
                    "Message matched entry"
                );

                if !answering {
                    return Ok(CheckOutcome::BelowThreshold {
                        entry_id: id,
                        confidence,
                        threshold,
                    });
                }

                let reply = self
                    .platform
                    .send_reply(incoming.channel, incoming.id, &entry.answer, true)
                    .await?;

                Ok(CheckOutcome::Answered {
                    entry_id: id,
                    reply,
                    confidence,
                    threshold,
                })
            }
        }
    }

    /// Record one reader vote on an entry's answer
    ///
    /// Votes shift future thresholds only; they never retrain.
    pub fn apply_vote(&self, id: EntryId, vote: Vote) -> Result<()> {
        self.store.record_vote(&self.topic, id, vote)?;
        debug!(topic = %self.topic, entry = %id, ?vote, "Recorded vote");
        Ok(())
    }

    /// File a referenced message under an entry, or as nonsense
    ///
    /// `token` is either an entry's short handle or the reserved noise
    /// handle. Reactions land on the curator's command message; the
    /// confirmation echo replies to the referenced message without the
    /// voting affordance, since it confirms a curation rather than
    /// answering a fresh question.
    pub async fn add_example_by_short(
        &self,
        command: &IncomingMessage,
        referenced: &IncomingMessage,
        token: &str,
    ) -> Result<CurationOutcome> {
        let cleaned = self.normalizer.clean(&referenced.content);
        if cleaned.is_empty() {
            self.platform
                .add_reaction(command.channel, command.id, REACTION_UNCLEAR)
                .await?;
            return Ok(CurationOutcome::Ambiguous);
        }

        if is_reserved_short(token) {
            self.mutate_and_refit(|| {
                self.store.add_nonsense(&self.topic, &cleaned)?;
                Ok(((), true))
            })
            .await?;

            info!(
                topic = %self.topic,
                curator = %command.author,
                content = %cleaned,
                "Filed message as nonsense"
            );

            self.retract_own_reply(command.channel, referenced.id).await;
            self.platform
                .add_reaction(command.channel, command.id, REACTION_DONE)
                .await?;
            return Ok(CurationOutcome::NoiseRecorded);
        }

        let entry = match self.store.entry_by_short(&self.topic, token)? {
            Some(entry) => entry,
            None => {
                self.platform
                    .add_reaction(command.channel, command.id, REACTION_UNCLEAR)
                    .await?;
                return Ok(CurationOutcome::Ambiguous);
            }
        };

        let added = self
            .mutate_and_refit(|| {
                let added = self.store.add_example(&self.topic, entry.id, &cleaned)?;
                Ok((added, added))
            })
            .await?;

        if added {
            info!(
                topic = %self.topic,
                curator = %command.author,
                short = %entry.short,
                content = %cleaned,
                "Added example to entry"
            );
        }

        self.platform
            .send_reply(referenced.channel, referenced.id, &entry.answer, false)
            .await?;

        Ok(CurationOutcome::ExampleAdded {
            entry_id: entry.id,
            added,
        })
    }

    /// Register a new answer under a fresh short handle
    ///
    /// The new entry starts without examples, so the classifier cannot
    /// route to it until a curator files the first one.
    pub async fn create_answer(
        &self,
        answer: &str,
        short: &str,
        requester: &str,
    ) -> Result<CreateOutcome> {
        let short = short.to_lowercase();

        // uniqueness checks run under the same gate as the creation so
        // two concurrent requests cannot both pass them
        let outcome = self
            .mutate_and_refit(|| {
                if is_reserved_short(&short) {
                    return Ok((CreateOutcome::Rejected(CreateRejection::ReservedShort), false));
                }
                if let Some(existing) = self.store.entry_by_short(&self.topic, &short)? {
                    return Ok((
                        CreateOutcome::Rejected(CreateRejection::ShortTaken {
                            answer: existing.answer,
                        }),
                        false,
                    ));
                }
                if let Some(existing) = self.store.entry_by_answer(&self.topic, answer)? {
                    return Ok((
                        CreateOutcome::Rejected(CreateRejection::AnswerTaken {
                            short: existing.short,
                        }),
                        false,
                    ));
                }

                let entry = self.store.create_entry(&self.topic, answer, &short)?;
                Ok((CreateOutcome::Created { id: entry.id }, true))
            })
            .await?;

        match &outcome {
            CreateOutcome::Created { id } => {
                info!(
                    topic = %self.topic,
                    requester,
                    short = %short,
                    entry = %id,
                    "Created FAQ entry"
                );
            }
            CreateOutcome::Rejected(reason) => {
                debug!(
                    topic = %self.topic,
                    requester,
                    short = %short,
                    ?reason,
                    "Refused FAQ entry"
                );
            }
        }

        Ok(outcome)
    }

    /// Force a full rebuild of the served model from the current corpus
    pub async fn refit(&self) -> Result<()> {
        let _gate = self.train_gate.lock().await;
        self.refit_locked().await
    }

    /// Run a corpus mutation and refit when it reports a change
    ///
    /// Every mutating operation funnels through here, which makes the
    /// gate the single place where the mutate-refit-swap sequence is
    /// kept atomic with respect to concurrent predictions.
    async fn mutate_and_refit<T, F>(&self, mutate: F) -> Result<T>
    where
        F: FnOnce() -> Result<(T, bool)>,
    {
        let _gate = self.train_gate.lock().await;
        let (value, dirty) = mutate()?;
        if dirty {
            self.refit_locked().await?;
        }
        Ok(value)
    }

    /// Rebuild and swap the model; callers must hold the train gate
    ///
    /// When a held-out split is configured, a throwaway fit is scored
    /// and logged first; the served model is always fitted on the full
    /// corpus.
    async fn refit_locked(&self) -> Result<()> {
        let nonsense = self.store.nonsense(&self.topic)?;
        let entries = self.store.entries(&self.topic)?;
        let set = TrainingSet::from_corpus(&nonsense, &entries);

        let eval = self.config.eval_split.map(|split| (split, self.config.eval_seed));
        let topic = self.topic.clone();
        let fitted = tokio::task::spawn_blocking(move || {
            if let Some((split, seed)) = eval {
                match evaluate(&set, split, seed) {
                    Ok(score) => info!(topic = %topic, score, "Held-out accuracy"),
                    Err(e) => debug!(topic = %topic, error = %e, "Held-out score unavailable"),
                }
            }
            TopicModel::fit(&set)
        })
        .await
        .map_err(|e| Error::internal(format!("training task failed: {e}")))?;

        match fitted {
            Ok(model) => {
                *self.model.write() = Some(Arc::new(model));
                debug!(topic = %self.topic, "Installed refitted model");
                Ok(())
            }
            Err(Error::NotTrainable(reason)) => {
                // a stale model must never serve a changed corpus
                *self.model.write() = None;
                warn!(
                    topic = %self.topic,
                    %reason,
                    "Topic not trainable, answering disabled"
                );
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Best-effort removal of an earlier auto-reply to a message a
    /// curator just marked as noise
    async fn retract_own_reply(&self, channel: ChannelId, referenced: MessageId) {
        let history = match self
            .platform
            .recent_history(channel, CLEANUP_SCAN_LIMIT)
            .await
        {
            Ok(history) => history,
            Err(e) => {
                warn!(
                    topic = %self.topic,
                    error = %e,
                    "History scan for reply cleanup failed"
                );
                return;
            }
        };

        for message in history {
            if message.from_self && message.replies_to == Some(referenced) {
                if let Err(e) = self.platform.delete_message(channel, message.id).await {
                    warn!(topic = %self.topic, error = %e, "Could not retract own reply");
                }
                return;
            }
        }
    }
}
