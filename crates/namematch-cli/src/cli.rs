//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use namematch_cli::input::parse_threshold;
use namematch_model::{DiffAlgorithm, SynonymPolicy};

#[derive(Parser)]
#[command(
    name = "namematch",
    version,
    about = "Match entity names between two lists",
    long_about = "Match entity names between two lists.\n\n\
                  Each source name is ranked against every target name using a fused\n\
                  edit-distance and Jaro-Winkler score after normalization and synonym\n\
                  substitution. Results can be reviewed, locked, exported and saved."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Rank every target name for each source name.
    Compare(CompareArgs),

    /// Score a single pair of names and explain the result.
    Score(ScoreArgs),

    /// Show a character-level diff between two names.
    Diff(DiffArgs),

    /// Review a saved session.
    #[command(subcommand)]
    Session(SessionCommand),
}

/// Options that control how names are compared.
#[derive(Args, Clone)]
pub struct MatchArgs {
    /// Minimum score to keep a candidate, as a fraction (0.6) or percent (60).
    #[arg(long = "threshold", value_parser = parse_threshold, default_value = "0")]
    pub threshold: f64,

    /// Keep punctuation when comparing.
    #[arg(long = "no-punctuation-strip")]
    pub no_punctuation_strip: bool,

    /// Do not fold full-width characters to half-width.
    #[arg(long = "no-fullwidth")]
    pub no_fullwidth: bool,

    /// Keep control and zero-width characters.
    #[arg(long = "no-invisible-strip")]
    pub no_invisible_strip: bool,

    /// Synonym groups, e.g. "腾讯控股有限公司,腾讯; IBM,International Business Machines".
    #[arg(long = "synonyms", value_name = "GROUPS")]
    pub synonyms: Option<String>,

    /// File with one synonym group per line.
    #[arg(long = "synonyms-file", value_name = "PATH")]
    pub synonyms_file: Option<PathBuf>,

    /// Which term of a synonym group represents the group.
    #[arg(long = "synonym-policy", value_enum, default_value = "shortest")]
    pub synonym_policy: SynonymPolicyArg,

    /// Weight of the edit-distance similarity.
    #[arg(long = "edit-weight", default_value_t = 0.6)]
    pub edit_weight: f64,

    /// Weight of the Jaro-Winkler similarity.
    #[arg(long = "phonetic-weight", default_value_t = 0.4)]
    pub phonetic_weight: f64,
}

/// How results are rendered in the terminal.
#[derive(Args, Clone)]
pub struct DisplayArgs {
    /// Number of candidates shown per source.
    #[arg(long = "top", default_value_t = 3)]
    pub top: usize,

    /// Show a diff between each source and its effective match.
    #[arg(long = "show-diff")]
    pub show_diff: bool,

    /// Diff algorithm.
    #[arg(long = "algorithm", value_enum, default_value = "lcs")]
    pub algorithm: AlgorithmArg,
}

/// Files written after a comparison or review.
#[derive(Args, Clone)]
pub struct OutputArgs {
    /// Write a CSV with the effective match, score and lock state per source.
    #[arg(long = "export", value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Write a CSV with the locked match and the top five candidates.
    #[arg(long = "export-full", value_name = "PATH")]
    pub export_full: Option<PathBuf>,
}

#[derive(Parser)]
pub struct CompareArgs {
    /// File with one source name per line.
    #[arg(value_name = "SOURCE_FILE")]
    pub source_file: PathBuf,

    /// File with one target name per line.
    #[arg(value_name = "TARGET_FILE")]
    pub target_file: PathBuf,

    #[command(flatten)]
    pub matching: MatchArgs,

    #[command(flatten)]
    pub display: DisplayArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Save the session (options, results, selections) as JSON.
    #[arg(long = "save-session", value_name = "PATH")]
    pub save_session: Option<PathBuf>,

    /// Stop after this many seconds and keep the results produced so far.
    #[arg(long = "time-limit", value_name = "SECONDS")]
    pub time_limit: Option<f64>,

    /// Hide the progress bar.
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}

#[derive(Parser)]
pub struct ScoreArgs {
    pub source: String,
    pub target: String,

    #[command(flatten)]
    pub matching: MatchArgs,
}

#[derive(Parser)]
pub struct DiffArgs {
    pub source: String,
    pub target: String,

    /// Diff algorithm.
    #[arg(long = "algorithm", value_enum, default_value = "lcs")]
    pub algorithm: AlgorithmArg,
}

#[derive(Subcommand)]
pub enum SessionCommand {
    /// Print the results of a saved session.
    Show(SessionShowArgs),

    /// Temporarily choose a candidate for a source.
    Select(SessionSelectArgs),

    /// Drop the temporary choice of a source.
    Clear(SessionEntryArgs),

    /// Lock the current choice of a source, or release its lock.
    Lock(SessionEntryArgs),
}

#[derive(Parser)]
pub struct SessionShowArgs {
    /// Session file written by `compare --save-session`.
    #[arg(value_name = "SESSION")]
    pub path: PathBuf,

    #[command(flatten)]
    pub display: DisplayArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser)]
pub struct SessionEntryArgs {
    #[arg(value_name = "SESSION")]
    pub path: PathBuf,

    /// Source position (1-based, as printed in the results table).
    #[arg(value_name = "SOURCE")]
    pub source: usize,
}

#[derive(Parser)]
pub struct SessionSelectArgs {
    #[command(flatten)]
    pub entry: SessionEntryArgs,

    /// Candidate rank (1 = best).
    #[arg(value_name = "RANK")]
    pub rank: usize,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum AlgorithmArg {
    Lcs,
    #[value(alias = "edit")]
    Levenshtein,
    Myers,
}

impl From<AlgorithmArg> for DiffAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::Lcs => DiffAlgorithm::Lcs,
            AlgorithmArg::Levenshtein => DiffAlgorithm::Levenshtein,
            AlgorithmArg::Myers => DiffAlgorithm::Myers,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SynonymPolicyArg {
    /// The first term written in the group.
    First,
    /// The shortest term; ties go to the first written.
    Shortest,
}

impl From<SynonymPolicyArg> for SynonymPolicy {
    fn from(value: SynonymPolicyArg) -> Self {
        match value {
            SynonymPolicyArg::First => SynonymPolicy::FirstListed,
            SynonymPolicyArg::Shortest => SynonymPolicy::Shortest,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
