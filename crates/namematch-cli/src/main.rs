//! Entity-name matching CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use namematch_cli::logging::{LogConfig, LogFormat, init_logging};
use namematch_model::DiffAlgorithm;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, SessionCommand};
use crate::commands::{run_compare, run_diff, run_score, run_session_edit, run_session_show};
use crate::summary::{print_diff, print_entry, print_score, print_session};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli.command) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(command: &Command) -> anyhow::Result<()> {
    match command {
        Command::Compare(args) => {
            let session = run_compare(args)?;
            print_session(&session, &args.display);
        }
        Command::Score(args) => {
            let breakdown = run_score(args)?;
            print_score(&breakdown, &args.source, &args.target);
        }
        Command::Diff(args) => {
            let diff = run_diff(args);
            print_diff(&diff, DiffAlgorithm::from(args.algorithm));
        }
        Command::Session(SessionCommand::Show(args)) => {
            let session = run_session_show(&args.path, &args.output)?;
            print_session(&session, &args.display);
        }
        Command::Session(edit) => {
            let outcome = run_session_edit(edit)?;
            print_entry(&outcome.session, outcome.source_index, outcome.changed);
        }
    }
    Ok(())
}

/// Build logging configuration from CLI flags.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
