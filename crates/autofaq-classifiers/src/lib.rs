//! AutoFAQ Classifiers
//!
//! The text pipeline behind the answering engine: deterministic message
//! cleaning, bag-of-words vectorization over a fitted vocabulary, and a
//! multinomial naive Bayes classifier with balanced class weighting.
//!
//! The pipeline is count-based and CPU-cheap; fitting a topic takes
//! milliseconds on realistic corpora, so every corpus change can retrain
//! synchronously. The only randomness anywhere is the seeded shuffle of
//! the diagnostic evaluation split.

pub mod bayes;
pub mod model;
pub mod normalize;
pub mod train;
pub mod vectorizer;

pub use bayes::{MultinomialNb, MIN_CLASSES, SMOOTHING};
pub use model::TopicModel;
pub use normalize::MessageNormalizer;
pub use train::{
    balanced_class_weights, class_frequencies, evaluate, train_test_split, TrainingSet,
    NONSENSE_LABEL,
};
pub use vectorizer::{CountVectorizer, MIN_TOKEN_CHARS};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::model::TopicModel;
    pub use crate::normalize::MessageNormalizer;
    pub use crate::train::TrainingSet;
}
