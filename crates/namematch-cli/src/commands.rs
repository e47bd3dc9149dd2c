use std::io::{self, IsTerminal};
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, info_span, warn};

use namematch_cli::export::{ExportKind, export_to_path};
use namematch_cli::input::{read_names, read_synonyms};
use namematch_cli::session::Session;
use namematch_core::{Matcher, ScoreBreakdown, Scorer, char_diff, drive};
use namematch_model::{DiffResult, MatchOptions, NormalizationOptions, ScoreWeights};

use crate::cli::{CompareArgs, DiffArgs, MatchArgs, OutputArgs, ScoreArgs, SessionCommand};

/// What a session subcommand changed.
pub struct SessionEdit {
    pub session: Session,
    pub source_index: usize,
    pub changed: bool,
}

pub fn run_compare(args: &CompareArgs) -> Result<Session> {
    let options = match_options(&args.matching)?;
    let sources = read_names(&args.source_file)?;
    let targets = read_names(&args.target_file)?;
    let span = info_span!("compare", sources = sources.len(), targets = targets.len());
    let _guard = span.enter();
    if sources.is_empty() {
        warn!(path = %args.source_file.display(), "no source names");
    }
    if targets.is_empty() {
        warn!(path = %args.target_file.display(), "no target names");
    }

    let matcher = Matcher::new();
    let run = matcher.start(sources, targets, &options)?;
    let cancel = run.cancel_token();
    let deadline = match args.time_limit {
        Some(seconds) => Some(
            Instant::now()
                + Duration::try_from_secs_f64(seconds)
                    .with_context(|| format!("invalid time limit: {seconds}"))?,
        ),
        None => None,
    };

    let progress = progress_bar(run.total() as u64, args.no_progress)?;
    let outcome = drive(run, |step| {
        progress.set_message(step.source_text.clone());
        progress.inc(1);
        if deadline.is_some_and(|limit| Instant::now() >= limit) {
            cancel.cancel();
        }
    });
    progress.finish_and_clear();

    if outcome.cancelled {
        warn!(
            completed = outcome.results.len(),
            "time limit reached; results are partial"
        );
    }

    let session = Session::new(options, outcome);
    write_outputs(&session, &args.output)?;
    if let Some(path) = &args.save_session {
        session.save(path)?;
    }
    Ok(session)
}

pub fn run_score(args: &ScoreArgs) -> Result<ScoreBreakdown> {
    let options = match_options(&args.matching)?;
    let scorer = Scorer::from_options(&options);
    let breakdown = scorer.explain(&args.source, &args.target);
    info!(score = breakdown.score, "scored pair");
    Ok(breakdown)
}

pub fn run_diff(args: &DiffArgs) -> DiffResult {
    char_diff(&args.source, &args.target, args.algorithm.into())
}

pub fn run_session_show(path: &Path, output: &OutputArgs) -> Result<Session> {
    let session = Session::load(path)?;
    write_outputs(&session, output)?;
    Ok(session)
}

/// Apply a select, clear or lock request and save the session.
pub fn run_session_edit(command: &SessionCommand) -> Result<SessionEdit> {
    let entry = match command {
        SessionCommand::Show(_) => bail!("show does not edit a session"),
        SessionCommand::Select(args) => &args.entry,
        SessionCommand::Clear(entry) | SessionCommand::Lock(entry) => entry,
    };
    let source_index = one_based(entry.source, "source")?;
    let mut session = Session::load(&entry.path)?;
    let changed = match command {
        SessionCommand::Select(args) => {
            session.select(source_index, one_based(args.rank, "rank")?)?
        }
        SessionCommand::Clear(_) => session.clear(source_index)?,
        SessionCommand::Lock(_) => session.toggle_lock(source_index)?,
        SessionCommand::Show(_) => false,
    };

    if changed {
        session.save(&entry.path)?;
    } else if session.selections.is_locked(source_index) {
        warn!(source = entry.source, "source is locked; release the lock first");
    } else {
        info!(source = entry.source, "nothing to change");
    }
    Ok(SessionEdit {
        session,
        source_index,
        changed,
    })
}

/// Build run options from command-line flags.
pub fn match_options(args: &MatchArgs) -> Result<MatchOptions> {
    let mut groups = Vec::new();
    if let Some(path) = &args.synonyms_file {
        groups.push(read_synonyms(path)?);
    }
    if let Some(inline) = &args.synonyms {
        groups.push(inline.clone());
    }

    let options = MatchOptions::new()
        .with_threshold(args.threshold)
        .with_normalization(NormalizationOptions {
            ignore_punctuation: !args.no_punctuation_strip,
            fold_fullwidth: !args.no_fullwidth,
            strip_invisible: !args.no_invisible_strip,
        })
        .with_synonyms(groups.join("\n"))
        .with_synonym_policy(args.synonym_policy.into())
        .with_weights(ScoreWeights::new(args.edit_weight, args.phonetic_weight));
    options.validate().context("invalid match options")?;

    let total = args.edit_weight + args.phonetic_weight;
    if (total - 1.0).abs() > 1e-9 {
        warn!(total, "score weights do not sum to 1");
    }
    Ok(options)
}

fn write_outputs(session: &Session, output: &OutputArgs) -> Result<()> {
    if let Some(path) = &output.export {
        export_to_path(path, ExportKind::Simple, &session.results, &session.selections)?;
    }
    if let Some(path) = &output.export_full {
        export_to_path(path, ExportKind::Full, &session.results, &session.selections)?;
    }
    Ok(())
}

fn progress_bar(total: u64, hidden: bool) -> Result<ProgressBar> {
    if hidden || !io::stderr().is_terminal() {
        return Ok(ProgressBar::hidden());
    }
    let style = ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} {wide_msg}")
        .context("progress template")?
        .progress_chars("=> ");
    Ok(ProgressBar::new(total).with_style(style))
}

fn one_based(value: usize, what: &str) -> Result<usize> {
    match value.checked_sub(1) {
        Some(index) => Ok(index),
        None => bail!("{what} numbers start at 1"),
    }
}
