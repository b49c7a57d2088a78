//! Bag-of-words vectorization over a fixed vocabulary

use std::collections::HashMap;

use autofaq_core::{Error, Result};

/// Minimum characters for a token to count
pub const MIN_TOKEN_CHARS: usize = 2;

/// Token-count vectorizer fitted once on a training corpus
///
/// The vocabulary is derived from the training texts and never changes
/// afterwards; texts seen later are mapped through it with unknown
/// tokens dropped. Refitting means constructing a new instance.
///
/// Input is expected to be cleaned text, so tokens are the
/// whitespace-separated runs of word characters, single characters
/// excluded.
#[derive(Debug, Clone)]
pub struct CountVectorizer {
    vocabulary: HashMap<String, usize>,
}

impl CountVectorizer {
    /// Derive the vocabulary from the training texts, in first-seen
    /// order
    pub fn fit<S: AsRef<str>>(texts: &[S]) -> Result<Self> {
        let mut vocabulary = HashMap::new();
        for text in texts {
            for token in tokens(text.as_ref()) {
                let next = vocabulary.len();
                vocabulary.entry(token.to_string()).or_insert(next);
            }
        }

        if vocabulary.is_empty() {
            return Err(Error::not_trainable(
                "empty vocabulary: training texts contain no usable tokens",
            ));
        }

        Ok(Self { vocabulary })
    }

    /// Number of distinct tokens in the vocabulary
    pub fn vocab_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Map a text to token counts over the fitted vocabulary
    pub fn transform(&self, text: &str) -> Vec<f64> {
        let mut counts = vec![0.0; self.vocabulary.len()];
        for token in tokens(text) {
            if let Some(&index) = self.vocabulary.get(token) {
                counts[index] += 1.0;
            }
        }
        counts
    }
}

fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_assigns_first_seen_indices() {
        let v = CountVectorizer::fit(&["when are you open", "are you there"]).unwrap();
        assert_eq!(v.vocab_size(), 5);

        let counts = v.transform("when are you you");
        assert_eq!(counts, vec![1.0, 1.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_transform_drops_unknown_tokens() {
        let v = CountVectorizer::fit(&["when are you open"]).unwrap();
        let counts = v.transform("completely unrelated words");
        assert!(counts.iter().all(|&c| c == 0.0));
    }

    #[test]
    fn test_single_characters_are_ignored() {
        let v = CountVectorizer::fit(&["a b se questions c"]).unwrap();
        assert_eq!(v.vocab_size(), 2);
    }

    #[test]
    fn test_empty_vocabulary_is_rejected() {
        assert!(CountVectorizer::fit(&["a", "b c"]).is_err());
        assert!(CountVectorizer::fit::<&str>(&[]).is_err());
    }
}
