//! Ranking every target against one source string.

use std::cmp::Ordering;

use namematch_model::{MatchCandidate, MatchOptions, Result, SourceResult};
use tracing::debug;

use crate::score::Scorer;

/// Scores one source string against a list of targets.
///
/// The matcher is read-only; units of work for different sources share it
/// without coordination.
///
/// # Example
///
/// ```ignore
/// use namematch_core::BatchMatcher;
/// use namematch_model::MatchOptions;
///
/// let matcher = BatchMatcher::new(&MatchOptions::default().with_threshold(0.5))?;
/// let result = matcher.match_source(0, "Acme", &["ACME Inc".to_string()]);
/// ```
#[derive(Debug, Clone)]
pub struct BatchMatcher {
    scorer: Scorer,
    threshold: f64,
}

impl BatchMatcher {
    /// Validate options and build the matcher.
    ///
    /// # Errors
    ///
    /// Returns an error when the threshold or a weight is out of range.
    pub fn new(options: &MatchOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            scorer: Scorer::from_options(options),
            threshold: options.threshold,
        })
    }

    /// Rank all targets for one source.
    ///
    /// Keeps candidates scoring at least the threshold, sorted by score
    /// descending; equal scores keep the lower target index first.
    pub fn match_source(&self, source_index: usize, source: &str, targets: &[String]) -> SourceResult {
        let prepared_source = self.scorer.prepare(source);
        let mut candidates: Vec<MatchCandidate> = targets
            .iter()
            .enumerate()
            .filter_map(|(target_index, target)| {
                let score = if source == target {
                    1.0
                } else {
                    self.scorer
                        .fuse_prepared(&prepared_source, &self.scorer.prepare(target))
                };
                (score >= self.threshold)
                    .then(|| MatchCandidate::new(target.clone(), score, target_index))
            })
            .collect();

        candidates.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.target_index.cmp(&b.target_index))
        });

        debug!(
            source_index,
            target_count = targets.len(),
            candidate_count = candidates.len(),
            "matched source"
        );

        SourceResult {
            source_text: source.to_string(),
            source_index,
            candidates,
        }
    }

    /// Rank targets for every source, in source order.
    pub fn match_all(&self, sources: &[String], targets: &[String]) -> Vec<SourceResult> {
        sources
            .iter()
            .enumerate()
            .map(|(index, source)| self.match_source(index, source, targets))
            .collect()
    }
}
