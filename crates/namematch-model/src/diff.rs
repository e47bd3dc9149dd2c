//! Character-level alignment model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MatchError;

/// Alignment algorithm used to build a diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffAlgorithm {
    /// Longest-common-subsequence table, deletions preferred on ties.
    #[default]
    Lcs,
    /// Levenshtein table, substitutions preferred.
    Levenshtein,
    /// Greedy Myers forward search with trace backtracking.
    Myers,
}

impl DiffAlgorithm {
    pub const ALL: [DiffAlgorithm; 3] = [Self::Lcs, Self::Levenshtein, Self::Myers];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lcs => "lcs",
            Self::Levenshtein => "levenshtein",
            Self::Myers => "myers",
        }
    }
}

impl fmt::Display for DiffAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiffAlgorithm {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lcs" => Ok(Self::Lcs),
            "levenshtein" | "edit" => Ok(Self::Levenshtein),
            "myers" => Ok(Self::Myers),
            other => Err(MatchError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Tag of a single aligned character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffKind {
    /// Present in both strings.
    Unchanged,
    /// Present only in the target.
    Added,
    /// Present only in the source.
    Removed,
}

/// One character of an edit script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSegment {
    pub kind: DiffKind,
    #[serde(rename = "char")]
    pub ch: char,
}

impl DiffSegment {
    pub fn unchanged(ch: char) -> Self {
        Self {
            kind: DiffKind::Unchanged,
            ch,
        }
    }

    pub fn added(ch: char) -> Self {
        Self {
            kind: DiffKind::Added,
            ch,
        }
    }

    pub fn removed(ch: char) -> Self {
        Self {
            kind: DiffKind::Removed,
            ch,
        }
    }
}

/// An edit script plus its aggregate counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffResult {
    pub segments: Vec<DiffSegment>,
    pub added: usize,
    pub removed: usize,
    pub unchanged: usize,
    /// `unchanged / (added + removed + unchanged)`, 1.0 for an empty script.
    pub ratio: f64,
}

impl DiffResult {
    /// Build a result whose counts and ratio agree with `segments`.
    pub fn from_segments(segments: Vec<DiffSegment>) -> Self {
        let mut added = 0;
        let mut removed = 0;
        let mut unchanged = 0;
        for segment in &segments {
            match segment.kind {
                DiffKind::Added => added += 1,
                DiffKind::Removed => removed += 1,
                DiffKind::Unchanged => unchanged += 1,
            }
        }
        let total = added + removed + unchanged;
        let ratio = if total == 0 {
            1.0
        } else {
            unchanged as f64 / total as f64
        };
        Self {
            segments,
            added,
            removed,
            unchanged,
            ratio,
        }
    }

    /// Replay the script keeping unchanged and removed characters.
    #[must_use]
    pub fn source_text(&self) -> String {
        self.replay(DiffKind::Removed)
    }

    /// Replay the script keeping unchanged and added characters.
    #[must_use]
    pub fn target_text(&self) -> String {
        self.replay(DiffKind::Added)
    }

    fn replay(&self, side: DiffKind) -> String {
        self.segments
            .iter()
            .filter(|s| s.kind == DiffKind::Unchanged || s.kind == side)
            .map(|s| s.ch)
            .collect()
    }

    /// Number of edit operations in the script.
    #[must_use]
    pub fn edits(&self) -> usize {
        self.added + self.removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_follow_segments() {
        let result = DiffResult::from_segments(vec![
            DiffSegment::unchanged('a'),
            DiffSegment::removed('b'),
            DiffSegment::added('x'),
            DiffSegment::unchanged('c'),
        ]);
        assert_eq!((result.added, result.removed, result.unchanged), (1, 1, 2));
        assert!((result.ratio - 0.5).abs() < f64::EPSILON);
        assert_eq!(result.source_text(), "abc");
        assert_eq!(result.target_text(), "axc");
    }

    #[test]
    fn empty_script_has_full_ratio() {
        let result = DiffResult::from_segments(Vec::new());
        assert_eq!(result.ratio, 1.0);
        assert_eq!(result.edits(), 0);
    }

    #[test]
    fn parses_algorithm_names() {
        assert_eq!("LCS".parse::<DiffAlgorithm>(), Ok(DiffAlgorithm::Lcs));
        assert_eq!(
            "edit".parse::<DiffAlgorithm>(),
            Ok(DiffAlgorithm::Levenshtein)
        );
        assert_eq!(
            "patience".parse::<DiffAlgorithm>(),
            Err(MatchError::UnknownAlgorithm("patience".to_string()))
        );
    }
}
