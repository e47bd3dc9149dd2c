//! Library side of the `namematch` command-line host.

pub mod diffview;
pub mod export;
pub mod input;
pub mod logging;
pub mod session;
