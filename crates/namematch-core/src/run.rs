//! Cooperative, sequential comparison runs.
//!
//! A run is an iterator with one unit of work per source string. Each call
//! to `next()` matches a single source against every target and then yields,
//! so a host can interleave its own work between units. Units execute in
//! ascending source order and never concurrently. Cancellation is checked
//! before each unit; results produced before cancellation stay valid.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use namematch_model::{MatchError, MatchOptions, Result, SourceResult};
use tracing::{Span, debug, info, info_span, warn};

use crate::batch::BatchMatcher;
use crate::selection::SelectionBook;

/// Cloneable cancellation flag shared between a run and its host.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; the run stops before its next unit.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Progress report emitted after each unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunProgress {
    /// Index of the source just processed.
    pub source_index: usize,
    /// Units completed so far (1-based).
    pub completed: usize,
    /// Total number of units in the run.
    pub total: usize,
    /// Raw text of the source just processed.
    pub source_text: String,
}

/// Everything a run produced, complete or partial.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// One result per processed source, in source order.
    pub results: Vec<SourceResult>,
    /// Selection states, with exact matches already auto-locked.
    pub selections: SelectionBook,
    /// True when the run stopped before processing every source.
    pub cancelled: bool,
}

impl RunOutcome {
    pub fn is_complete(&self) -> bool {
        !self.cancelled
    }
}

/// Engine handle that hands out runs one at a time.
///
/// Starting a run while a previous one is still active is rejected. A run
/// stops counting as active once it is cancelled, exhausted or dropped; a
/// cancelled run never executes another unit, so a new run may start right
/// after `cancel()` even if the old run has not been polled again.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    active: Arc<Mutex<ActiveSlot>>,
}

/// The run currently handed out, identified by its generation.
#[derive(Debug, Default)]
struct ActiveSlot {
    generation: u64,
    token: Option<CancelToken>,
}

impl ActiveSlot {
    fn is_busy(&self) -> bool {
        self.token.as_ref().is_some_and(|token| !token.is_cancelled())
    }
}

fn lock_slot(slot: &Mutex<ActiveSlot>) -> MutexGuard<'_, ActiveSlot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Matcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a run handed out by this matcher is active and not
    /// cancelled.
    pub fn is_running(&self) -> bool {
        lock_slot(&self.active).is_busy()
    }

    /// Start a new run over `sources` and `targets`.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::RunInProgress`] if another run is active and not
    /// cancelled, or a configuration error if the options are invalid.
    pub fn start(
        &self,
        sources: Vec<String>,
        targets: Vec<String>,
        options: &MatchOptions,
    ) -> Result<MatchRun> {
        let batch = BatchMatcher::new(options)?;
        let mut slot = lock_slot(&self.active);
        if slot.is_busy() {
            return Err(MatchError::RunInProgress);
        }
        slot.generation = slot.generation.wrapping_add(1);
        let cancel = CancelToken::new();
        slot.token = Some(cancel.clone());
        let guard = ActiveGuard {
            slot: Arc::clone(&self.active),
            generation: slot.generation,
        };
        drop(slot);
        Ok(MatchRun::new(batch, sources, targets, cancel, guard))
    }
}

/// Clears the matcher's slot when dropped, unless a newer run owns it.
#[derive(Debug)]
struct ActiveGuard {
    slot: Arc<Mutex<ActiveSlot>>,
    generation: u64,
}

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        let mut slot = lock_slot(&self.slot);
        if slot.generation == self.generation {
            slot.token = None;
        }
    }
}

/// An in-progress comparison run.
///
/// Iterating yields a [`RunProgress`] after each processed source.
#[derive(Debug)]
pub struct MatchRun {
    batch: BatchMatcher,
    sources: Vec<String>,
    targets: Vec<String>,
    next_index: usize,
    results: Vec<SourceResult>,
    selections: SelectionBook,
    cancel: CancelToken,
    cancelled: bool,
    guard: Option<ActiveGuard>,
    span: Span,
    started: Instant,
}

impl MatchRun {
    fn new(
        batch: BatchMatcher,
        sources: Vec<String>,
        targets: Vec<String>,
        cancel: CancelToken,
        guard: ActiveGuard,
    ) -> Self {
        let span = info_span!("run", sources = sources.len(), targets = targets.len());
        let selections = SelectionBook::new(sources.len());
        Self {
            batch,
            results: Vec::with_capacity(sources.len()),
            sources,
            targets,
            next_index: 0,
            selections,
            cancel,
            cancelled: false,
            guard: Some(guard),
            span,
            started: Instant::now(),
        }
    }

    /// Token that cancels this run when triggered.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Request cancellation before the next unit.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn total(&self) -> usize {
        self.sources.len()
    }

    pub fn completed(&self) -> usize {
        self.results.len()
    }

    pub fn is_finished(&self) -> bool {
        self.guard.is_none()
    }

    /// Results produced so far.
    pub fn results(&self) -> &[SourceResult] {
        &self.results
    }

    pub fn selections(&self) -> &SelectionBook {
        &self.selections
    }

    /// Stop iterating and hand back what was produced.
    pub fn finish(mut self) -> RunOutcome {
        let cancelled = self.cancelled || self.next_index < self.sources.len();
        self.guard.take();
        RunOutcome {
            results: std::mem::take(&mut self.results),
            selections: std::mem::take(&mut self.selections),
            cancelled,
        }
    }

    fn release(&mut self) {
        if self.guard.take().is_some() {
            let _enter = self.span.enter();
            info!(
                completed = self.results.len(),
                total = self.sources.len(),
                cancelled = self.cancelled,
                duration_ms = self.started.elapsed().as_millis(),
                "run finished"
            );
        }
    }
}

impl Iterator for MatchRun {
    type Item = RunProgress;

    fn next(&mut self) -> Option<Self::Item> {
        if self.guard.is_none() {
            return None;
        }
        if self.cancel.is_cancelled() {
            self.cancelled = true;
            {
                let _enter = self.span.enter();
                warn!(
                    completed = self.results.len(),
                    total = self.sources.len(),
                    "run cancelled"
                );
            }
            self.release();
            return None;
        }
        let Some(source) = self.sources.get(self.next_index) else {
            self.release();
            return None;
        };

        let _enter = self.span.enter();
        let source_index = self.next_index;
        let result = self.batch.match_source(source_index, source, &self.targets);
        if self.selections.observe(&result) {
            debug!(source_index, "exact match auto-locked");
        }
        let progress = RunProgress {
            source_index,
            completed: source_index + 1,
            total: self.sources.len(),
            source_text: source.clone(),
        };
        self.results.push(result);
        self.next_index += 1;
        drop(_enter);

        if self.next_index == self.sources.len() {
            self.release();
        }
        Some(progress)
    }
}

/// Drive a run to completion, reporting progress after every unit.
pub fn drive<F>(mut run: MatchRun, mut on_progress: F) -> RunOutcome
where
    F: FnMut(&RunProgress),
{
    for progress in run.by_ref() {
        on_progress(&progress);
    }
    run.finish()
}

#[cfg(test)]
mod tests {
    use namematch_model::SelectionState;

    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn processes_sources_in_order() {
        let matcher = Matcher::new();
        let run = matcher
            .start(
                strings(&["abc", "xyz"]),
                strings(&["abd", "abc"]),
                &MatchOptions::default(),
            )
            .unwrap();
        let mut seen = Vec::new();
        let outcome = drive(run, |p| seen.push((p.completed, p.total, p.source_text.clone())));
        assert_eq!(
            seen,
            vec![(1, 2, "abc".to_string()), (2, 2, "xyz".to_string())]
        );
        assert!(outcome.is_complete());
        assert_eq!(outcome.results.len(), 2);
        assert!(matches!(
            outcome.selections.state(0),
            SelectionState::Locked(c) if c.target_index == 1
        ));
        assert_eq!(outcome.selections.state(1), &SelectionState::Unselected);
    }

    #[test]
    fn rejects_second_run_while_active() {
        let matcher = Matcher::new();
        let run = matcher
            .start(strings(&["a"]), strings(&["b"]), &MatchOptions::default())
            .unwrap();
        assert!(matcher.is_running());
        let second = matcher.start(strings(&["a"]), strings(&["b"]), &MatchOptions::default());
        assert!(matches!(second, Err(MatchError::RunInProgress)));

        drop(run);
        assert!(!matcher.is_running());
        assert!(
            matcher
                .start(strings(&["a"]), strings(&["b"]), &MatchOptions::default())
                .is_ok()
        );
    }

    #[test]
    fn exhausted_run_releases_matcher() {
        let matcher = Matcher::new();
        let mut run = matcher
            .start(strings(&["a"]), strings(&["b"]), &MatchOptions::default())
            .unwrap();
        assert!(run.next().is_some());
        assert!(run.is_finished());
        assert!(!matcher.is_running());
        assert!(run.next().is_none());
    }

    #[test]
    fn cancellation_keeps_partial_results() {
        let matcher = Matcher::new();
        let mut run = matcher
            .start(
                strings(&["a", "b", "c"]),
                strings(&["a", "b"]),
                &MatchOptions::default(),
            )
            .unwrap();
        let token = run.cancel_token();
        assert!(run.next().is_some());
        token.cancel();
        assert!(run.next().is_none());
        assert!(!matcher.is_running());

        let outcome = run.finish();
        assert!(outcome.cancelled);
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].source_text, "a");
    }

    #[test]
    fn cancelled_run_does_not_block_restart() {
        let matcher = Matcher::new();
        let options = MatchOptions::default();
        let mut first = matcher
            .start(strings(&["a", "b"]), strings(&["a"]), &options)
            .unwrap();
        first.cancel();
        assert!(!matcher.is_running());

        let mut second = matcher
            .start(strings(&["b"]), strings(&["a"]), &options)
            .unwrap();
        assert!(matcher.is_running());

        // The stale run stays inert and releasing it leaves the new run active.
        assert!(first.next().is_none());
        let outcome = first.finish();
        assert!(outcome.cancelled);
        assert!(outcome.results.is_empty());
        assert!(matcher.is_running());
        assert!(matches!(
            matcher.start(strings(&["c"]), strings(&["a"]), &options),
            Err(MatchError::RunInProgress)
        ));

        assert!(second.next().is_some());
        assert!(second.is_finished());
        assert!(!matcher.is_running());
    }

    #[test]
    fn invalid_options_do_not_mark_running() {
        let matcher = Matcher::new();
        let options = MatchOptions::default().with_threshold(2.0);
        assert!(matches!(
            matcher.start(strings(&["a"]), strings(&["b"]), &options),
            Err(MatchError::InvalidThreshold(_))
        ));
        assert!(!matcher.is_running());
    }

    #[test]
    fn empty_source_list_finishes_immediately() {
        let matcher = Matcher::new();
        let run = matcher
            .start(Vec::new(), strings(&["b"]), &MatchOptions::default())
            .unwrap();
        let outcome = drive(run, |_| {});
        assert!(outcome.results.is_empty());
        assert!(outcome.is_complete());
        assert!(!matcher.is_running());
    }
}
