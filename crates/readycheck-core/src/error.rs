//! Error types for readycheck-core.

use thiserror::Error;

/// Result type for readiness operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by [`ReadinessGroup`](crate::ReadinessGroup) and
/// [`PlayerReadiness`](crate::PlayerReadiness).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A constructor or step argument was rejected.
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),

    /// A player id outside `[0, len)`.
    #[error("player {index} out of range for a group of {len} players")]
    IndexOutOfRange { index: usize, len: usize },
}

/// The argument that failed validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidArgument {
    /// Fewer than [`MIN_PLAYERS`](crate::MIN_PLAYERS) players requested.
    #[error("at least two players are required, attempted to create a group with {requested} players")]
    TooFewPlayers { requested: usize },

    /// Thresholds not ordered as `0 < activation < start`.
    #[error(
        "activation level must be greater than 0 and start level must be greater than activation level \
         (activation: {activation}, start: {start})"
    )]
    InvalidThresholds { activation: f64, start: f64 },

    /// Time steps must be strictly positive.
    #[error("invalid time step {0}, must be greater than 0")]
    NonPositiveStep(f64),
}
