//! Selection state management for interactive match review.
//!
//! Every source index carries a [`SelectionState`]. All changes go through
//! [`transition`], which encodes the full table:
//!
//! | event          | Unselected      | TempSelected(c)  | Locked(c)   |
//! |----------------|-----------------|------------------|-------------|
//! | select(x)      | TempSelected(x) | TempSelected(x)  | no-op       |
//! | clear          | Unselected      | Unselected       | no-op       |
//! | toggle lock    | Locked(top)*    | Locked(c)        | Unselected  |
//! | auto lock(top) | Locked(top)     | Locked(top)      | Locked(top) |
//!
//! `*` only when the source has a top candidate; otherwise a no-op.

use namematch_model::{MatchCandidate, SelectionState, SourceResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// User action or engine event applied to one source index.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    /// Temporarily choose a candidate.
    Select(MatchCandidate),
    /// Drop a temporary choice.
    Clear,
    /// Lock the current choice, or release an existing lock.
    ToggleLock,
    /// Force a lock on an exact top candidate right after matching.
    AutoLock(MatchCandidate),
}

/// Compute the next state, or `None` when the event is a no-op.
///
/// `top` is the highest-ranked candidate of the source, used when a lock is
/// requested without a temporary choice.
pub fn transition(
    state: &SelectionState,
    event: SelectionEvent,
    top: Option<&MatchCandidate>,
) -> Option<SelectionState> {
    match (state, event) {
        (_, SelectionEvent::AutoLock(candidate)) => Some(SelectionState::Locked(candidate)),
        (SelectionState::Locked(_), SelectionEvent::ToggleLock) => Some(SelectionState::Unselected),
        (SelectionState::Locked(_), _) => None,
        (_, SelectionEvent::Select(candidate)) => Some(SelectionState::TempSelected(candidate)),
        (SelectionState::Unselected, SelectionEvent::Clear) => None,
        (SelectionState::TempSelected(_), SelectionEvent::Clear) => Some(SelectionState::Unselected),
        (SelectionState::TempSelected(candidate), SelectionEvent::ToggleLock) => {
            Some(SelectionState::Locked(candidate.clone()))
        }
        (SelectionState::Unselected, SelectionEvent::ToggleLock) => {
            top.map(|candidate| SelectionState::Locked(candidate.clone()))
        }
    }
}

/// Selection states for every source index of a run.
///
/// Indices outside the book are ignored: operations on them report no
/// change and read as `Unselected`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionBook {
    states: Vec<SelectionState>,
}

static UNSELECTED: SelectionState = SelectionState::Unselected;

impl SelectionBook {
    /// A book with `len` unselected entries.
    pub fn new(len: usize) -> Self {
        Self {
            states: vec![SelectionState::Unselected; len],
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Grow the book so that `index` is addressable.
    pub fn ensure_len(&mut self, len: usize) {
        if self.states.len() < len {
            self.states.resize(len, SelectionState::Unselected);
        }
    }

    pub fn state(&self, index: usize) -> &SelectionState {
        self.states.get(index).unwrap_or(&UNSELECTED)
    }

    pub fn is_locked(&self, index: usize) -> bool {
        self.state(index).is_locked()
    }

    /// Temporarily choose a candidate. Returns true if the state changed.
    pub fn select_candidate(&mut self, index: usize, candidate: MatchCandidate) -> bool {
        self.apply(index, SelectionEvent::Select(candidate), None)
    }

    /// Drop a temporary choice. Returns true if the state changed.
    pub fn clear_selection(&mut self, index: usize) -> bool {
        self.apply(index, SelectionEvent::Clear, None)
    }

    /// Lock the temporary choice (or the top candidate), or release a lock.
    pub fn toggle_lock(&mut self, result: &SourceResult) -> bool {
        self.apply(result.source_index, SelectionEvent::ToggleLock, result.top())
    }

    /// Lock an exact top candidate as soon as a source has been matched.
    ///
    /// Returns true when the auto-lock fired.
    pub fn observe(&mut self, result: &SourceResult) -> bool {
        match result.top() {
            Some(top) if top.is_exact() => {
                self.ensure_len(result.source_index + 1);
                self.apply(
                    result.source_index,
                    SelectionEvent::AutoLock(top.clone()),
                    None,
                )
            }
            _ => false,
        }
    }

    /// Match to show for a source: the lock, else the temporary choice, else
    /// the top candidate.
    pub fn effective_match<'a>(&'a self, result: &'a SourceResult) -> Option<&'a MatchCandidate> {
        self.state(result.source_index)
            .candidate()
            .or_else(|| result.top())
    }

    /// Counts over all results of a run.
    pub fn summary(&self, results: &[SourceResult]) -> SelectionSummary {
        let mut summary = SelectionSummary {
            total: results.len(),
            ..SelectionSummary::default()
        };
        for result in results {
            match self.state(result.source_index) {
                SelectionState::Locked(_) => summary.locked += 1,
                SelectionState::TempSelected(_) => summary.temp_selected += 1,
                SelectionState::Unselected => {}
            }
            if self.effective_match(result).is_none() {
                summary.unmatched += 1;
            }
        }
        summary
    }

    fn apply(&mut self, index: usize, event: SelectionEvent, top: Option<&MatchCandidate>) -> bool {
        let Some(state) = self.states.get_mut(index) else {
            return false;
        };
        match transition(state, event, top) {
            Some(next) => {
                debug!(index, from = state.label(), to = next.label(), "selection changed");
                *state = next;
                true
            }
            None => false,
        }
    }
}

/// Summary of selection counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionSummary {
    /// Number of sources in the run.
    pub total: usize,
    /// Sources with a locked match.
    pub locked: usize,
    /// Sources with a temporary, unlocked choice.
    pub temp_selected: usize,
    /// Sources with no effective match at all.
    pub unmatched: usize,
}
