use thiserror::Error;

/// Errors surfaced by the matching engine.
///
/// Only configuration problems and run-lifecycle misuse are reported; every
/// text input is handled by returning empty results instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    #[error("threshold {0} is outside 0.0..=1.0")]
    InvalidThreshold(f64),
    #[error("{name} weight {value} is outside 0.0..=1.0")]
    InvalidWeight { name: &'static str, value: f64 },
    #[error("a match run is already in progress")]
    RunInProgress,
    #[error("unknown diff algorithm: {0}")]
    UnknownAlgorithm(String),
}

pub type Result<T> = std::result::Result<T, MatchError>;
