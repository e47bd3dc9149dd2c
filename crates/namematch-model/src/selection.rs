//! Per-source selection state.

use serde::{Deserialize, Serialize};

use crate::matching::MatchCandidate;

/// Which match the user has settled on for one source index.
///
/// Once `Locked`, only an explicit unlock leaves the state; it then returns
/// to `Unselected`. Automatic locks on exact matches use the same variant.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "candidate", rename_all = "snake_case")]
pub enum SelectionState {
    #[default]
    Unselected,
    TempSelected(MatchCandidate),
    Locked(MatchCandidate),
}

impl SelectionState {
    #[must_use]
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Locked(_))
    }

    /// Candidate held by this state, if any.
    #[must_use]
    pub fn candidate(&self) -> Option<&MatchCandidate> {
        match self {
            Self::Unselected => None,
            Self::TempSelected(candidate) | Self::Locked(candidate) => Some(candidate),
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unselected => "unselected",
            Self::TempSelected(_) => "selected",
            Self::Locked(_) => "locked",
        }
    }
}
