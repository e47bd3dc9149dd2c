//! Ranked match results.

use serde::{Deserialize, Serialize};

/// Display buckets for a fused score.
///
/// - `Exact`: a score of exactly 1.0
/// - `Similar`: at least 0.8
/// - `Medium`: at least 0.5
/// - `Low`: anything below
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MatchLevel {
    Low,
    Medium,
    Similar,
    Exact,
}

impl MatchLevel {
    pub const SIMILAR_MIN: f64 = 0.8;
    pub const MEDIUM_MIN: f64 = 0.5;

    /// Categorize a fused score.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score == 1.0 {
            Self::Exact
        } else if score >= Self::SIMILAR_MIN {
            Self::Similar
        } else if score >= Self::MEDIUM_MIN {
            Self::Medium
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Similar => "similar",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// One target string paired with its fused score against a source string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    /// Raw target text as supplied by the host.
    pub target_text: String,
    /// Fused score, full precision.
    pub score: f64,
    /// Position of the target in the input list.
    pub target_index: usize,
}

impl MatchCandidate {
    pub fn new(target_text: impl Into<String>, score: f64, target_index: usize) -> Self {
        Self {
            target_text: target_text.into(),
            score,
            target_index,
        }
    }

    /// Score rounded to the nearest whole percent.
    #[must_use]
    pub fn percent(&self) -> u32 {
        (self.score * 100.0).round().clamp(0.0, u32::MAX as f64) as u32
    }

    #[must_use]
    pub fn level(&self) -> MatchLevel {
        MatchLevel::from_score(self.score)
    }

    /// True when normalization and synonym substitution made both sides equal.
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.score == 1.0
    }
}

/// Candidates for one source string, best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceResult {
    /// Raw source text as supplied by the host.
    pub source_text: String,
    /// Position of the source in the input list.
    pub source_index: usize,
    /// Sorted by score descending, ties by ascending target index.
    pub candidates: Vec<MatchCandidate>,
}

impl SourceResult {
    /// Highest-ranked candidate, if any target passed the threshold.
    #[must_use]
    pub fn top(&self) -> Option<&MatchCandidate> {
        self.candidates.first()
    }

    /// True when the top candidate is an exact match.
    #[must_use]
    pub fn has_exact_top(&self) -> bool {
        self.top().is_some_and(MatchCandidate::is_exact)
    }

    /// Candidate at the given rank (0 = best).
    #[must_use]
    pub fn candidate(&self, rank: usize) -> Option<&MatchCandidate> {
        self.candidates.get(rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_boundaries() {
        assert_eq!(MatchLevel::from_score(1.0), MatchLevel::Exact);
        assert_eq!(MatchLevel::from_score(0.99), MatchLevel::Similar);
        assert_eq!(MatchLevel::from_score(0.8), MatchLevel::Similar);
        assert_eq!(MatchLevel::from_score(0.5), MatchLevel::Medium);
        assert_eq!(MatchLevel::from_score(0.49), MatchLevel::Low);
    }

    #[test]
    fn percent_rounds_to_nearest() {
        assert_eq!(MatchCandidate::new("x", 0.666, 0).percent(), 67);
        assert_eq!(MatchCandidate::new("x", 0.724, 0).percent(), 72);
        assert_eq!(MatchCandidate::new("x", 1.0, 0).percent(), 100);
    }

    #[test]
    fn top_and_exact() {
        let result = SourceResult {
            source_text: "abc".to_string(),
            source_index: 0,
            candidates: vec![
                MatchCandidate::new("abc", 1.0, 1),
                MatchCandidate::new("abd", 0.73, 0),
            ],
        };
        assert_eq!(result.top().map(|c| c.target_index), Some(1));
        assert!(result.has_exact_top());
        assert!(result.candidate(2).is_none());
    }
}
