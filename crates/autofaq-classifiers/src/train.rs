//! Training-set assembly, class weighting, and held-out evaluation

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use autofaq_core::{FaqEntry, Result};

use crate::model::TopicModel;

/// Training label reserved for the nonsense class
pub const NONSENSE_LABEL: usize = 0;

/// Labeled cleaned texts assembled from one topic corpus
#[derive(Debug, Clone, Default)]
pub struct TrainingSet {
    /// Cleaned example texts
    pub texts: Vec<String>,

    /// Label per text; `0` is nonsense, entries use `id + 1`
    pub labels: Vec<usize>,
}

impl TrainingSet {
    /// Assemble from nonsense texts and entry examples
    pub fn from_corpus(nonsense: &[String], entries: &[FaqEntry]) -> Self {
        let mut texts = Vec::new();
        let mut labels = Vec::new();

        for text in nonsense {
            texts.push(text.clone());
            labels.push(NONSENSE_LABEL);
        }

        for entry in entries {
            for example in &entry.examples {
                texts.push(example.clone());
                labels.push(entry.id.label());
            }
        }

        Self { texts, labels }
    }

    /// Number of labeled texts
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Whether the set contains no texts at all
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Number of distinct labels present
    pub fn distinct_labels(&self) -> usize {
        let mut labels = self.labels.clone();
        labels.sort_unstable();
        labels.dedup();
        labels.len()
    }
}

/// Balanced per-class weights `n_samples / (n_classes * count_c)`
///
/// Sparse classes weigh up, dominant classes weigh down, so the nonsense
/// class cannot drown out thin FAQ classes.
pub fn balanced_class_weights(labels: &[usize]) -> HashMap<usize, f64> {
    let counts = label_counts(labels);
    let n = labels.len() as f64;
    let k = counts.len() as f64;

    counts
        .into_iter()
        .map(|(label, count)| (label, n / (k * count as f64)))
        .collect()
}

/// Per-label frequency over the full label set
pub fn class_frequencies(labels: &[usize]) -> HashMap<usize, f64> {
    let counts = label_counts(labels);
    let n = labels.len() as f64;

    counts
        .into_iter()
        .map(|(label, count)| (label, count as f64 / n))
        .collect()
}

fn label_counts(labels: &[usize]) -> HashMap<usize, usize> {
    let mut counts = HashMap::new();
    for &label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }
    counts
}

/// Split into train and test parts after a seeded shuffle
///
/// The test part takes `ceil(len * test_size)` samples. The same seed
/// over the same set always produces the same split.
pub fn train_test_split(set: &TrainingSet, test_size: f64, seed: u64) -> (TrainingSet, TrainingSet) {
    let mut indices: Vec<usize> = (0..set.len()).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_len = ((set.len() as f64) * test_size).ceil() as usize;
    let test_len = test_len.min(set.len());

    let mut pick = |take: &[usize]| TrainingSet {
        texts: take.iter().map(|&i| set.texts[i].clone()).collect(),
        labels: take.iter().map(|&i| set.labels[i]).collect(),
    };

    let test = pick(&indices[..test_len]);
    let train = pick(&indices[test_len..]);
    (train, test)
}

/// Fit on a held-out split and score the rest
///
/// Each test sample counts with weight `1 - frequency(true_label)`, the
/// frequencies taken over the full set before splitting. The score is
/// diagnostic; it never gates whether a model is installed.
pub fn evaluate(set: &TrainingSet, test_size: f64, seed: u64) -> Result<f64> {
    let frequencies = class_frequencies(&set.labels);
    let (train, test) = train_test_split(set, test_size, seed);
    let model = TopicModel::fit(&train)?;

    let mut weighted_hits = 0.0;
    let mut weight_total = 0.0;
    for (text, label) in test.texts.iter().zip(&test.labels) {
        let weight = 1.0 - frequencies.get(label).copied().unwrap_or(0.0);
        let (predicted, _) = model.classify(text);
        if predicted == *label {
            weighted_hits += weight;
        }
        weight_total += weight;
    }

    if weight_total > 0.0 {
        Ok(weighted_hits / weight_total)
    } else {
        Ok(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autofaq_core::EntryId;

    fn entry(id: u32, short: &str, examples: &[&str]) -> FaqEntry {
        let mut e = FaqEntry::new(EntryId(id), short, format!("answer for {short}"));
        e.examples = examples.iter().map(|s| s.to_string()).collect();
        e
    }

    fn corpus() -> TrainingSet {
        let nonsense = vec![
            "hello there".to_string(),
            "good morning everyone".to_string(),
            "thanks a lot".to_string(),
            "that is so funny".to_string(),
        ];
        let entries = vec![
            entry(
                0,
                "hours",
                &[
                    "when are you open",
                    "what are your opening hours",
                    "are you open on sunday",
                    "how late are you open today",
                ],
            ),
            entry(
                1,
                "shipping",
                &[
                    "how long does shipping take",
                    "when will my package arrive",
                    "do you ship abroad",
                    "what does shipping cost",
                ],
            ),
        ];
        TrainingSet::from_corpus(&nonsense, &entries)
    }

    #[test]
    fn test_from_corpus_labels() {
        let set = corpus();
        assert_eq!(set.len(), 12);
        assert_eq!(set.labels[..4], [0, 0, 0, 0]);
        assert_eq!(set.labels[4..8], [1, 1, 1, 1]);
        assert_eq!(set.labels[8..], [2, 2, 2, 2]);
        assert_eq!(set.distinct_labels(), 3);
    }

    #[test]
    fn test_balanced_weights() {
        let weights = balanced_class_weights(&[0, 0, 0, 1]);
        assert!((weights[&0] - 4.0 / (2.0 * 3.0)).abs() < 1e-12);
        assert!((weights[&1] - 4.0 / (2.0 * 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_class_frequencies() {
        let frequencies = class_frequencies(&[0, 0, 0, 5]);
        assert!((frequencies[&0] - 0.75).abs() < 1e-12);
        assert!((frequencies[&5] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_split_is_seeded_and_disjoint() {
        let set = corpus();

        let (train_a, test_a) = train_test_split(&set, 0.3, 42);
        let (train_b, test_b) = train_test_split(&set, 0.3, 42);
        assert_eq!(train_a.texts, train_b.texts);
        assert_eq!(test_a.texts, test_b.texts);

        // ceil(12 * 0.3) = 4
        assert_eq!(test_a.len(), 4);
        assert_eq!(train_a.len(), 8);
        for text in &test_a.texts {
            assert!(!train_a.texts.contains(text));
        }
    }

    #[test]
    fn test_split_partitions_the_set() {
        let set = corpus();
        let (train, test) = train_test_split(&set, 0.3, 7);

        let mut combined: Vec<&String> = train.texts.iter().chain(&test.texts).collect();
        combined.sort();
        let mut expected: Vec<&String> = set.texts.iter().collect();
        expected.sort();
        assert_eq!(combined, expected);
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let set = corpus();
        let a = evaluate(&set, 0.3, 42).unwrap();
        let b = evaluate(&set, 0.3, 42).unwrap();
        assert_eq!(a, b);
        assert!((0.0..=1.0).contains(&a));
    }
}
