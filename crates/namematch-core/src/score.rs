//! Fused similarity scoring.
//!
//! Combines edit-distance similarity and Jaro-Winkler similarity with
//! configurable weights after normalization and synonym substitution.

use namematch_model::{MatchOptions, NormalizationOptions, ScoreWeights};

use crate::metrics::{edit_similarity, phonetic_similarity};
use crate::normalize::normalize;
use crate::synonyms::SynonymTable;

/// Why a score was decided without computing the metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortCircuit {
    /// The raw strings were identical.
    RawEqual,
    /// The strings became identical after normalization and synonyms.
    Equivalent,
}

/// Score for a single source/target pair with its components.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    /// Final fused score.
    pub score: f64,
    /// Source after normalization and synonym substitution.
    pub prepared_source: String,
    /// Target after normalization and synonym substitution.
    pub prepared_target: String,
    /// Edit-distance similarity (1.0 when short-circuited).
    pub edit: f64,
    /// Jaro-Winkler similarity (1.0 when short-circuited).
    pub phonetic: f64,
    pub short_circuit: Option<ShortCircuit>,
}

impl ScoreBreakdown {
    /// Human-readable explanation of the score.
    pub fn explain(&self) -> String {
        match self.short_circuit {
            Some(ShortCircuit::RawEqual) => "Identical input: 100%".to_string(),
            Some(ShortCircuit::Equivalent) => format!(
                "Equivalent after normalization: '{}' = '{}': 100%",
                self.prepared_source, self.prepared_target
            ),
            None => format!(
                "Edit similarity: {:.0}%; Jaro-Winkler: {:.0}%; Fused: {:.0}%",
                self.edit * 100.0,
                self.phonetic * 100.0,
                self.score * 100.0
            ),
        }
    }
}

/// Read-only scoring context for one comparison run.
///
/// Holds the normalization switches, the parsed synonym table and the metric
/// weights so that every call within a run sees the same configuration.
#[derive(Debug, Clone)]
pub struct Scorer {
    normalization: NormalizationOptions,
    synonyms: SynonymTable,
    weights: ScoreWeights,
}

impl Scorer {
    pub fn new(
        normalization: NormalizationOptions,
        synonyms: SynonymTable,
        weights: ScoreWeights,
    ) -> Self {
        Self {
            normalization,
            synonyms,
            weights,
        }
    }

    /// Build a scorer from run options, parsing the synonym specification.
    pub fn from_options(options: &MatchOptions) -> Self {
        let synonyms = SynonymTable::parse(&options.synonym_spec, options.synonym_policy);
        Self::new(options.normalization, synonyms, options.weights)
    }

    pub fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }

    pub fn weights(&self) -> ScoreWeights {
        self.weights
    }

    /// Normalize a string and apply synonym substitution.
    pub fn prepare(&self, text: &str) -> String {
        let normalized = normalize(text, &self.normalization);
        self.synonyms.apply(&normalized)
    }

    /// Fused score of two raw strings.
    pub fn fuse(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return 1.0;
        }
        self.fuse_prepared(&self.prepare(a), &self.prepare(b))
    }

    /// Fused score of two strings already passed through [`Self::prepare`].
    pub fn fuse_prepared(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return 1.0;
        }
        edit_similarity(a, b) * self.weights.edit + phonetic_similarity(a, b) * self.weights.phonetic
    }

    /// Score a pair and keep every intermediate value.
    pub fn explain(&self, a: &str, b: &str) -> ScoreBreakdown {
        let prepared_source = self.prepare(a);
        let prepared_target = self.prepare(b);
        let short_circuit = if a == b {
            Some(ShortCircuit::RawEqual)
        } else if prepared_source == prepared_target {
            Some(ShortCircuit::Equivalent)
        } else {
            None
        };

        let (edit, phonetic, score) = if short_circuit.is_some() {
            (1.0, 1.0, 1.0)
        } else {
            let edit = edit_similarity(&prepared_source, &prepared_target);
            let phonetic = phonetic_similarity(&prepared_source, &prepared_target);
            (
                edit,
                phonetic,
                edit * self.weights.edit + phonetic * self.weights.phonetic,
            )
        };

        ScoreBreakdown {
            score,
            prepared_source,
            prepared_target,
            edit,
            phonetic,
            short_circuit,
        }
    }
}

/// Fused score of two raw strings under the given options.
///
/// Parses the synonym specification on every call; prefer [`Scorer`] when
/// scoring many pairs.
pub fn fuse(a: &str, b: &str, options: &MatchOptions) -> f64 {
    Scorer::from_options(options).fuse(a, b)
}
