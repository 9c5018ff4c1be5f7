//! Error types for readycheck-vis.

use thiserror::Error;

/// Result type for simulation and playback operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving or replaying a ready check.
#[derive(Debug, Error)]
pub enum Error {
    /// The readiness core rejected an operation.
    #[error("readiness error: {0}")]
    Readiness(#[from] readycheck_core::Error),

    /// Config or event JSON could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
