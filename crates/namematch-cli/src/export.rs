//! CSV export of reviewed results.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;
use namematch_core::SelectionBook;
use namematch_model::{MatchCandidate, SelectionState, SourceResult};
use tracing::info;

/// Candidates listed per source in the full export.
pub const FULL_EXPORT_CANDIDATES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// Source, effective match, score and lock state.
    Simple,
    /// Source, locked match and the top candidates with scores.
    Full,
}

/// Write an export file.
pub fn export_to_path(
    path: &Path,
    kind: ExportKind,
    results: &[SourceResult],
    selections: &SelectionBook,
) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create: {}", path.display()))?;
    write_export(file, kind, results, selections)
        .with_context(|| format!("write export: {}", path.display()))?;
    info!(path = %path.display(), rows = results.len(), ?kind, "exported results");
    Ok(())
}

pub fn write_export<W: Write>(
    writer: W,
    kind: ExportKind,
    results: &[SourceResult],
    selections: &SelectionBook,
) -> Result<()> {
    let mut writer = Writer::from_writer(writer);
    match kind {
        ExportKind::Simple => write_simple(&mut writer, results, selections)?,
        ExportKind::Full => write_full(&mut writer, results, selections)?,
    }
    writer.flush()?;
    Ok(())
}

fn write_simple<W: Write>(
    writer: &mut Writer<W>,
    results: &[SourceResult],
    selections: &SelectionBook,
) -> Result<()> {
    writer.write_record(["Source", "Best Match", "Score", "Status"])?;
    for result in results {
        let best = selections.effective_match(result);
        let status = if selections.is_locked(result.source_index) {
            "locked"
        } else {
            "unlocked"
        };
        writer.write_record([
            result.source_text.as_str(),
            best.map_or("", |c| c.target_text.as_str()),
            percent_text(best).as_str(),
            status,
        ])?;
    }
    Ok(())
}

fn write_full<W: Write>(
    writer: &mut Writer<W>,
    results: &[SourceResult],
    selections: &SelectionBook,
) -> Result<()> {
    let mut header = vec!["Source".to_string(), "Locked Match".to_string()];
    for rank in 1..=FULL_EXPORT_CANDIDATES {
        header.push(format!("Match {rank}"));
        header.push(format!("Score {rank}"));
    }
    writer.write_record(&header)?;

    for result in results {
        let locked = match selections.state(result.source_index) {
            SelectionState::Locked(candidate) => candidate.target_text.as_str(),
            SelectionState::TempSelected(_) | SelectionState::Unselected => "",
        };
        let mut row = vec![result.source_text.clone(), locked.to_string()];
        for rank in 0..FULL_EXPORT_CANDIDATES {
            let candidate = result.candidate(rank);
            row.push(candidate.map(|c| c.target_text.clone()).unwrap_or_default());
            row.push(percent_text(candidate));
        }
        writer.write_record(&row)?;
    }
    Ok(())
}

fn percent_text(candidate: Option<&MatchCandidate>) -> String {
    candidate.map_or_else(String::new, |c| format!("{}%", c.percent()))
}
