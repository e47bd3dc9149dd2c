//! Saved comparison sessions.
//!
//! A session holds the options, the ranked results and the selection state
//! of every source, so that review can continue later.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use namematch_core::{RunOutcome, SelectionBook, SelectionSummary};
use namematch_model::{MatchOptions, SourceResult};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Current on-disk format version.
pub const SESSION_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub version: u32,
    pub options: MatchOptions,
    pub results: Vec<SourceResult>,
    pub selections: SelectionBook,
    /// True when the run that produced the results was cancelled.
    #[serde(default)]
    pub partial: bool,
}

impl Session {
    pub fn new(options: MatchOptions, outcome: RunOutcome) -> Self {
        let mut selections = outcome.selections;
        selections.ensure_len(outcome.results.len());
        Self {
            version: SESSION_VERSION,
            options,
            results: outcome.results,
            selections,
            partial: outcome.cancelled,
        }
    }

    /// Load a session file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read session: {}", path.display()))?;
        let mut session: Session = serde_json::from_str(&text)
            .with_context(|| format!("parse session: {}", path.display()))?;
        if session.version != SESSION_VERSION {
            bail!(
                "unsupported session version {} in {} (expected {SESSION_VERSION})",
                session.version,
                path.display()
            );
        }
        session.selections.ensure_len(session.results.len());
        Ok(session)
    }

    /// Write the session as pretty JSON via a temporary file and rename.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("serialize session")?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("create directory: {}", parent.display()))?;
        }
        let temp_path = path.with_extension("json.tmp");
        let mut file = File::create(&temp_path)
            .with_context(|| format!("create: {}", temp_path.display()))?;
        file.write_all(json.as_bytes())
            .with_context(|| format!("write: {}", temp_path.display()))?;
        file.sync_all()
            .with_context(|| format!("sync: {}", temp_path.display()))?;
        fs::rename(&temp_path, path)
            .with_context(|| format!("rename {} to {}", temp_path.display(), path.display()))?;
        info!(path = %path.display(), sources = self.results.len(), "saved session");
        Ok(())
    }

    pub fn result(&self, source_index: usize) -> Result<&SourceResult> {
        self.results
            .get(source_index)
            .ok_or_else(|| anyhow!("no source at index {source_index} (session has {})", self.results.len()))
    }

    /// Temporarily choose the candidate at `rank` (0 = best) for a source.
    pub fn select(&mut self, source_index: usize, rank: usize) -> Result<bool> {
        let candidate = self
            .result(source_index)?
            .candidate(rank)
            .cloned()
            .ok_or_else(|| anyhow!("source {source_index} has no candidate at rank {rank}"))?;
        Ok(self.selections.select_candidate(source_index, candidate))
    }

    pub fn clear(&mut self, source_index: usize) -> Result<bool> {
        self.result(source_index)?;
        Ok(self.selections.clear_selection(source_index))
    }

    /// Lock the current choice of a source, or release its lock.
    pub fn toggle_lock(&mut self, source_index: usize) -> Result<bool> {
        let result = self.result(source_index)?.clone();
        Ok(self.selections.toggle_lock(&result))
    }

    pub fn summary(&self) -> SelectionSummary {
        self.selections.summary(&self.results)
    }
}
