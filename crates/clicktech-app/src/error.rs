use std::io;

use thiserror::Error;

/// Bad environment configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Failures of the stdin/stdout bridge.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("malformed input event: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("bridge I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("game loop is not running")]
    LoopClosed,
}

/// Fatal application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to spawn {name} thread: {source}")]
    Spawn {
        name: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("game loop already running")]
    AlreadyRunning,
    #[error("game loop thread panicked")]
    LoopPanicked,
}
