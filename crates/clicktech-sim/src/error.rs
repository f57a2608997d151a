use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of the high-score store. Never fatal to the engine: load
/// failures fall back to zeroed scores and save failures are logged.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to read high scores from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write high scores to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("high score file {path} is not a valid score map: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode high scores: {0}")]
    Encode(#[from] serde_json::Error),
}
