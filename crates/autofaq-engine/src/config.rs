//! Per-topic engine configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use autofaq_core::{Error, Result};
use autofaq_policy::{ThresholdPolicy, DEFAULT_MAX_THRESHOLD, DEFAULT_MIN_THRESHOLD};

/// Tunables of a topic engine
///
/// All fields have defaults, so a partial YAML document (or none at
/// all) yields a working configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicConfig {
    /// Lower bound of the confidence band
    #[serde(default = "default_min_threshold")]
    pub min_threshold: f64,

    /// Upper bound of the confidence band
    #[serde(default = "default_max_threshold")]
    pub max_threshold: f64,

    /// Messages with fewer whitespace-separated words are never
    /// classified
    #[serde(default = "default_min_word_count")]
    pub min_word_count: usize,

    /// Held-out fraction for the diagnostic accuracy score reported at
    /// startup; `None` skips scoring
    #[serde(default = "default_eval_split")]
    pub eval_split: Option<f64>,

    /// Seed for the held-out shuffle
    #[serde(default = "default_eval_seed")]
    pub eval_seed: u64,
}

impl TopicConfig {
    /// Parse a configuration from YAML text
    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Check parameter ranges
    pub fn validate(&self) -> Result<()> {
        // the band rules live with the policy
        ThresholdPolicy::new(self.min_threshold, self.max_threshold)?;

        if let Some(split) = self.eval_split {
            if split <= 0.0 || split >= 1.0 {
                return Err(Error::config(format!(
                    "eval_split {split} must lie strictly between 0 and 1"
                )));
            }
        }

        Ok(())
    }
}

impl Default for TopicConfig {
    fn default() -> Self {
        Self {
            min_threshold: default_min_threshold(),
            max_threshold: default_max_threshold(),
            min_word_count: default_min_word_count(),
            eval_split: default_eval_split(),
            eval_seed: default_eval_seed(),
        }
    }
}

fn default_min_threshold() -> f64 {
    DEFAULT_MIN_THRESHOLD
}

fn default_max_threshold() -> f64 {
    DEFAULT_MAX_THRESHOLD
}

fn default_min_word_count() -> usize {
    3
}

fn default_eval_split() -> Option<f64> {
    Some(0.3)
}

fn default_eval_seed() -> u64 {
    42
}
