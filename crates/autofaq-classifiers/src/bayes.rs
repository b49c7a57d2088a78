//! Multinomial naive Bayes over weighted token counts

use std::collections::HashMap;

use autofaq_core::{Error, Result};

/// Laplace smoothing constant added to every token count
pub const SMOOTHING: f64 = 1.0;

/// Minimum number of distinct labels a corpus must provide
pub const MIN_CLASSES: usize = 2;

/// Multinomial naive Bayes classifier fitted on count vectors
///
/// Fitting and prediction are fully deterministic. The label set seen at
/// fit time is recorded, so a probability column always maps back to the
/// label it was trained for even when labels are sparse.
#[derive(Debug, Clone)]
pub struct MultinomialNb {
    classes: Vec<usize>,
    log_priors: Vec<f64>,
    log_likelihoods: Vec<Vec<f64>>,
}

impl MultinomialNb {
    /// Fit from training vectors and labels with per-class weights
    ///
    /// `class_weights` scales each sample's token counts and prior mass
    /// by its label's weight; missing labels default to `1.0`. Fails
    /// with `Error::NotTrainable` when fewer than two distinct labels
    /// are present.
    pub fn fit(
        vectors: &[Vec<f64>],
        labels: &[usize],
        class_weights: &HashMap<usize, f64>,
    ) -> Result<Self> {
        if vectors.len() != labels.len() {
            return Err(Error::internal(format!(
                "vector/label count mismatch: {} vs {}",
                vectors.len(),
                labels.len()
            )));
        }

        let mut classes: Vec<usize> = labels.to_vec();
        classes.sort_unstable();
        classes.dedup();

        if classes.len() < MIN_CLASSES {
            return Err(Error::not_trainable(format!(
                "need at least {MIN_CLASSES} distinct classes, got {}",
                classes.len()
            )));
        }

        let vocab = vectors.first().map(|v| v.len()).unwrap_or(0);
        if vectors.iter().any(|v| v.len() != vocab) {
            return Err(Error::internal("training vectors differ in width"));
        }

        let class_index: HashMap<usize, usize> =
            classes.iter().enumerate().map(|(i, &c)| (c, i)).collect();

        let mut prior_mass = vec![0.0; classes.len()];
        let mut token_counts = vec![vec![0.0; vocab]; classes.len()];

        for (vector, label) in vectors.iter().zip(labels) {
            let ci = class_index[label];
            let weight = class_weights.get(label).copied().unwrap_or(1.0);
            prior_mass[ci] += weight;
            for (j, count) in vector.iter().enumerate() {
                token_counts[ci][j] += weight * count;
            }
        }

        let total_mass: f64 = prior_mass.iter().sum();
        let log_priors: Vec<f64> = prior_mass.iter().map(|m| (m / total_mass).ln()).collect();

        let mut log_likelihoods = Vec::with_capacity(classes.len());
        for counts in &token_counts {
            let class_total: f64 = counts.iter().sum();
            let denominator = class_total + SMOOTHING * vocab as f64;
            log_likelihoods.push(
                counts
                    .iter()
                    .map(|c| ((c + SMOOTHING) / denominator).ln())
                    .collect(),
            );
        }

        Ok(Self {
            classes,
            log_priors,
            log_likelihoods,
        })
    }

    /// Labels the model was fitted on, in ascending order
    pub fn classes(&self) -> &[usize] {
        &self.classes
    }

    /// Posterior probability per fitted class; sums to one
    pub fn predict_proba(&self, vector: &[f64]) -> Vec<f64> {
        let mut log_joint = self.log_priors.clone();
        for (ci, likelihoods) in self.log_likelihoods.iter().enumerate() {
            for (count, ll) in vector.iter().zip(likelihoods) {
                if *count > 0.0 {
                    log_joint[ci] += count * ll;
                }
            }
        }

        // log-sum-exp normalization
        let max = log_joint.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mut probs: Vec<f64> = log_joint.iter().map(|l| (l - max).exp()).collect();
        let sum: f64 = probs.iter().sum();
        for p in &mut probs {
            *p /= sum;
        }
        probs
    }

    /// Arg-max label and its posterior probability
    pub fn predict(&self, vector: &[f64]) -> (usize, f64) {
        let probs = self.predict_proba(vector);
        let mut best = 0;
        for (i, p) in probs.iter().enumerate() {
            if *p > probs[best] {
                best = i;
            }
        }
        (self.classes[best], probs[best])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights(labels: &[usize]) -> HashMap<usize, f64> {
        crate::train::balanced_class_weights(labels)
    }

    fn separable_fixture() -> (Vec<Vec<f64>>, Vec<usize>) {
        // two disjoint vocabularies of width 4
        let vectors = vec![
            vec![2.0, 1.0, 0.0, 0.0],
            vec![1.0, 2.0, 0.0, 0.0],
            vec![0.0, 0.0, 2.0, 1.0],
            vec![0.0, 0.0, 1.0, 2.0],
        ];
        let labels = vec![0, 0, 3, 3];
        (vectors, labels)
    }

    #[test]
    fn test_predict_separates_disjoint_classes() {
        let (vectors, labels) = separable_fixture();
        let nb = MultinomialNb::fit(&vectors, &labels, &weights(&labels)).unwrap();

        let (label, p) = nb.predict(&[3.0, 1.0, 0.0, 0.0]);
        assert_eq!(label, 0);
        assert!(p > 0.5);

        let (label, p) = nb.predict(&[0.0, 0.0, 1.0, 3.0]);
        assert_eq!(label, 3);
        assert!(p > 0.5);
    }

    #[test]
    fn test_sparse_labels_map_back() {
        // labels 0 and 3 only; the arg-max must report 3, not a column
        // index
        let (vectors, labels) = separable_fixture();
        let nb = MultinomialNb::fit(&vectors, &labels, &weights(&labels)).unwrap();

        assert_eq!(nb.classes(), &[0, 3]);
        let (label, _) = nb.predict(&[0.0, 0.0, 2.0, 2.0]);
        assert_eq!(label, 3);
    }

    #[test]
    fn test_proba_sums_to_one() {
        let (vectors, labels) = separable_fixture();
        let nb = MultinomialNb::fit(&vectors, &labels, &weights(&labels)).unwrap();

        for vector in [
            vec![1.0, 0.0, 1.0, 0.0],
            vec![0.0, 0.0, 0.0, 0.0],
            vec![5.0, 5.0, 5.0, 5.0],
        ] {
            let probs = nb.predict_proba(&vector);
            let sum: f64 = probs.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "probabilities sum to {sum}");
            assert!(probs.iter().all(|p| (0.0..=1.0).contains(p)));
        }
    }

    #[test]
    fn test_single_class_is_not_trainable() {
        let vectors = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let labels = vec![1, 1];

        let err = MultinomialNb::fit(&vectors, &labels, &weights(&labels)).unwrap_err();
        assert!(matches!(err, Error::NotTrainable(_)));
    }

    #[test]
    fn test_balanced_weights_lift_sparse_class() {
        // class 1 has one sample against five for class 0; an ambiguous
        // input must not be decided by raw class size
        let mut vectors = vec![vec![1.0, 1.0, 0.0]; 5];
        vectors.push(vec![0.0, 1.0, 1.0]);
        let mut labels = vec![0; 5];
        labels.push(1);

        let nb = MultinomialNb::fit(&vectors, &labels, &weights(&labels)).unwrap();
        let probs = nb.predict_proba(&[0.0, 1.0, 0.0]);

        // the shared middle token alone leans towards neither side
        assert!((probs[0] - probs[1]).abs() < 0.2);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let (vectors, labels) = separable_fixture();
        let a = MultinomialNb::fit(&vectors, &labels, &weights(&labels)).unwrap();
        let b = MultinomialNb::fit(&vectors, &labels, &weights(&labels)).unwrap();

        let input = [1.0, 0.0, 2.0, 0.0];
        assert_eq!(a.predict_proba(&input), b.predict_proba(&input));
    }
}
