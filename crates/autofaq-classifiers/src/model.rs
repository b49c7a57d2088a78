//! Fitted vectorizer + classifier pair serving one topic

use tracing::debug;

use autofaq_core::{Error, Result};

use crate::bayes::{MultinomialNb, MIN_CLASSES};
use crate::train::{balanced_class_weights, TrainingSet};
use crate::vectorizer::CountVectorizer;

/// The fitted classification pair for one topic
///
/// Both halves are built together from a single corpus snapshot and only
/// ever replaced together; a partial swap is not expressible.
#[derive(Debug, Clone)]
pub struct TopicModel {
    vectorizer: CountVectorizer,
    classifier: MultinomialNb,
}

impl TopicModel {
    /// Fit the vectorizer and classifier from a training set
    pub fn fit(set: &TrainingSet) -> Result<Self> {
        let distinct = set.distinct_labels();
        if distinct < MIN_CLASSES {
            return Err(Error::not_trainable(format!(
                "need at least {MIN_CLASSES} distinct classes, got {distinct}"
            )));
        }

        let vectorizer = CountVectorizer::fit(&set.texts)?;
        let vectors: Vec<Vec<f64>> = set.texts.iter().map(|t| vectorizer.transform(t)).collect();
        let weights = balanced_class_weights(&set.labels);
        let classifier = MultinomialNb::fit(&vectors, &set.labels, &weights)?;

        debug!(
            samples = set.len(),
            vocabulary = vectorizer.vocab_size(),
            classes = classifier.classes().len(),
            "fitted topic model"
        );

        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    /// Classify cleaned text: the arg-max label and its posterior
    pub fn classify(&self, cleaned: &str) -> (usize, f64) {
        let vector = self.vectorizer.transform(cleaned);
        self.classifier.predict(&vector)
    }

    /// Labels the model can produce
    pub fn classes(&self) -> &[usize] {
        self.classifier.classes()
    }
}
