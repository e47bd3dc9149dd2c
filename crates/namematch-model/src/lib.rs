pub mod diff;
pub mod error;
pub mod matching;
pub mod options;
pub mod selection;

pub use diff::{DiffAlgorithm, DiffKind, DiffResult, DiffSegment};
pub use error::{MatchError, Result};
pub use matching::{MatchCandidate, MatchLevel, SourceResult};
pub use options::{MatchOptions, NormalizationOptions, ScoreWeights, SynonymPolicy};
pub use selection::SelectionState;
