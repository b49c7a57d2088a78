//! Adaptive confidence threshold driven by reader votes

use autofaq_core::{Error, Result, VoteTally};

/// Default lower bound of the confidence band
pub const DEFAULT_MIN_THRESHOLD: f64 = 0.3;

/// Default upper bound of the confidence band
pub const DEFAULT_MAX_THRESHOLD: f64 = 0.7;

/// Cap on the vote-importance term; `ln(total)` reaches it at three
/// votes, after which history fully overrides the neutral blend
pub const IMPORTANCE_CEILING: f64 = 1.0;

/// Blend weight of the neutral midpoint while votes are scarce
const NEUTRAL_RATIO: f64 = 0.5;

/// Maps an entry's vote history to the confidence its answer must reach
///
/// More approval lowers the required confidence, more disapproval raises
/// it, and the result always stays inside the configured band. With no
/// votes at all the threshold sits at the band's midpoint.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdPolicy {
    min_threshold: f64,
    max_threshold: f64,
}

impl ThresholdPolicy {
    /// Create a policy over the closed band `[min, max]`
    pub fn new(min_threshold: f64, max_threshold: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&min_threshold) || !(0.0..=1.0).contains(&max_threshold) {
            return Err(Error::config(
                "confidence thresholds must lie within [0, 1]",
            ));
        }
        if min_threshold >= max_threshold {
            return Err(Error::config(format!(
                "min_threshold {min_threshold} must be below max_threshold {max_threshold}"
            )));
        }

        Ok(Self {
            min_threshold,
            max_threshold,
        })
    }

    /// Lower bound of the band
    pub fn min_threshold(&self) -> f64 {
        self.min_threshold
    }

    /// Upper bound of the band
    pub fn max_threshold(&self) -> f64 {
        self.max_threshold
    }

    /// Required confidence for an entry with the given vote history
    pub fn threshold(&self, votes: &VoteTally) -> f64 {
        let total = votes.total();

        let ratio = if total == 0 {
            NEUTRAL_RATIO
        } else {
            let importance = f64::from(total).ln().min(IMPORTANCE_CEILING);
            let approval = f64::from(votes.up) / f64::from(total);
            importance * approval + (1.0 - importance) * NEUTRAL_RATIO
        };

        // approval ratio 1 maps to the low end, 0 to the high end
        ratio * self.min_threshold + (1.0 - ratio) * self.max_threshold
    }
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self {
            min_threshold: DEFAULT_MIN_THRESHOLD,
            max_threshold: DEFAULT_MAX_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tally(up: u32, down: u32) -> VoteTally {
        VoteTally { up, down }
    }

    #[test]
    fn test_no_votes_yields_midpoint() {
        let policy = ThresholdPolicy::default();
        assert!((policy.threshold(&tally(0, 0)) - 0.5).abs() < 1e-12);

        let narrow = ThresholdPolicy::new(0.4, 0.6).unwrap();
        assert!((narrow.threshold(&tally(0, 0)) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_single_vote_keeps_midpoint() {
        // ln(1) = 0, so one vote carries no importance yet
        let policy = ThresholdPolicy::default();
        assert!((policy.threshold(&tally(1, 0)) - 0.5).abs() < 1e-12);
        assert!((policy.threshold(&tally(0, 1)) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_saturated_approval_hits_band_ends() {
        let policy = ThresholdPolicy::default();

        // three votes saturate the importance term
        assert!((policy.threshold(&tally(3, 0)) - 0.3).abs() < 1e-12);
        assert!((policy.threshold(&tally(0, 3)) - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_ten_upvotes_drop_below_midpoint() {
        let policy = ThresholdPolicy::default();
        let threshold = policy.threshold(&tally(10, 0));
        assert!(threshold < 0.5);
        assert!((threshold - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_mixed_votes_sit_between() {
        let policy = ThresholdPolicy::default();
        let threshold = policy.threshold(&tally(2, 2));
        assert!((threshold - 0.5).abs() < 1e-12);

        // mostly approved, threshold leans low but not to the end
        let threshold = policy.threshold(&tally(3, 1));
        assert!(threshold > 0.3 && threshold < 0.5);
    }

    #[test]
    fn test_invalid_bands_are_rejected() {
        assert!(ThresholdPolicy::new(0.7, 0.3).is_err());
        assert!(ThresholdPolicy::new(0.5, 0.5).is_err());
        assert!(ThresholdPolicy::new(-0.1, 0.7).is_err());
        assert!(ThresholdPolicy::new(0.3, 1.5).is_err());
    }

    proptest! {
        #[test]
        fn test_threshold_stays_in_band(up in 0u32..10_000, down in 0u32..10_000) {
            let policy = ThresholdPolicy::default();
            let threshold = policy.threshold(&tally(up, down));
            prop_assert!(threshold >= policy.min_threshold() - 1e-12);
            prop_assert!(threshold <= policy.max_threshold() + 1e-12);
        }

        #[test]
        fn test_more_approval_never_raises_threshold(
            total in 1u32..10_000,
            seed in 0u32..10_000,
        ) {
            // at fixed total, an extra upvote can only lower the cutoff
            let up = seed % total;

            let policy = ThresholdPolicy::default();
            let fewer = policy.threshold(&tally(up, total - up));
            let more = policy.threshold(&tally(up + 1, total - up - 1));
            prop_assert!(more <= fewer + 1e-12);
        }
    }
}
