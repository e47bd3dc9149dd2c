//! Configuration options for a comparison run.
//!
//! Options are constructed once per run and stay read-only for its duration.

use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};

/// Text cleanup switches applied before scoring.
///
/// Case folding and whitespace collapsing always happen; these flags only
/// control the optional steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationOptions {
    /// Remove every character that is not a word character, a CJK ideograph
    /// or whitespace.
    pub ignore_punctuation: bool,
    /// Map full-width Latin letters, digits and punctuation to ASCII.
    pub fold_fullwidth: bool,
    /// Remove control characters and zero-width/invisible code points.
    pub strip_invisible: bool,
}

impl Default for NormalizationOptions {
    fn default() -> Self {
        Self {
            ignore_punctuation: true,
            fold_fullwidth: true,
            strip_invisible: true,
        }
    }
}

impl NormalizationOptions {
    /// Options with every optional step disabled (case fold + whitespace only).
    pub fn minimal() -> Self {
        Self {
            ignore_punctuation: false,
            fold_fullwidth: false,
            strip_invisible: false,
        }
    }
}

/// Weights of the two similarity metrics in the fused score.
///
/// Weights need not sum to 1; a fused score stays within `[0, 1]` only when
/// they do.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Weight of the edit-distance similarity.
    pub edit: f64,
    /// Weight of the Jaro-Winkler similarity.
    pub phonetic: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            edit: 0.6,
            phonetic: 0.4,
        }
    }
}

impl ScoreWeights {
    pub fn new(edit: f64, phonetic: f64) -> Self {
        Self { edit, phonetic }
    }

    /// Check that both weights are finite and within `0.0..=1.0`.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("edit", self.edit), ("phonetic", self.phonetic)] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(MatchError::InvalidWeight { name, value });
            }
        }
        Ok(())
    }
}

/// How a synonym group picks the term every member is rewritten to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SynonymPolicy {
    /// The first term listed in the group.
    FirstListed,
    /// The shortest term (in characters); ties go to the earlier term.
    #[default]
    Shortest,
}

/// Everything a run needs besides the two input lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOptions {
    /// Minimum fused score (0.0 to 1.0) for a candidate to be kept.
    pub threshold: f64,
    /// Text cleanup switches.
    pub normalization: NormalizationOptions,
    /// Raw synonym specification (groups separated by newline or semicolon).
    pub synonym_spec: String,
    /// Representative selection policy for synonym groups.
    pub synonym_policy: SynonymPolicy,
    /// Metric weights for the fused score.
    pub weights: ScoreWeights,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            normalization: NormalizationOptions::default(),
            synonym_spec: String::new(),
            synonym_policy: SynonymPolicy::default(),
            weights: ScoreWeights::default(),
        }
    }
}

impl MatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_normalization(mut self, normalization: NormalizationOptions) -> Self {
        self.normalization = normalization;
        self
    }

    #[must_use]
    pub fn with_synonyms(mut self, spec: impl Into<String>) -> Self {
        self.synonym_spec = spec.into();
        self
    }

    #[must_use]
    pub fn with_synonym_policy(mut self, policy: SynonymPolicy) -> Self {
        self.synonym_policy = policy;
        self
    }

    #[must_use]
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Reject out-of-range thresholds and weights.
    ///
    /// This is the only place configuration errors are raised; a validated
    /// set of options never fails mid-run.
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(MatchError::InvalidThreshold(self.threshold));
        }
        self.weights.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let options = MatchOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.weights, ScoreWeights::new(0.6, 0.4));
        assert_eq!(options.synonym_policy, SynonymPolicy::Shortest);
    }

    #[test]
    fn rejects_threshold_out_of_range() {
        let options = MatchOptions::new().with_threshold(1.5);
        assert_eq!(options.validate(), Err(MatchError::InvalidThreshold(1.5)));

        let options = MatchOptions::new().with_threshold(f64::NAN);
        assert!(matches!(
            options.validate(),
            Err(MatchError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn rejects_negative_weight() {
        let options = MatchOptions::new().with_weights(ScoreWeights::new(0.6, -0.1));
        assert_eq!(
            options.validate(),
            Err(MatchError::InvalidWeight {
                name: "phonetic",
                value: -0.1
            })
        );
    }

    #[test]
    fn weights_need_not_sum_to_one() {
        let options = MatchOptions::new().with_weights(ScoreWeights::new(1.0, 1.0));
        assert!(options.validate().is_ok());
    }
}
