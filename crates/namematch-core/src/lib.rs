//! Similarity and diff engine for entity-name matching.
//!
//! The pipeline for a pair of strings is normalize, then synonym
//! substitution, then the fused edit and Jaro-Winkler score. Batch matching
//! ranks every target for each source, and runs drive batch matching one
//! source at a time with progress and cancellation.

pub mod batch;
pub mod diff;
pub mod metrics;
pub mod normalize;
pub mod run;
pub mod score;
pub mod selection;
pub mod synonyms;

pub use batch::BatchMatcher;
pub use diff::char_diff;
pub use metrics::{edit_distance, edit_similarity, lcs_length, phonetic_similarity};
pub use normalize::{fold_term, normalize};
pub use run::{CancelToken, MatchRun, Matcher, RunOutcome, RunProgress, drive};
pub use score::{ScoreBreakdown, Scorer, ShortCircuit, fuse};
pub use selection::{SelectionBook, SelectionEvent, SelectionSummary, transition};
pub use synonyms::SynonymTable;
