//! Readiness thresholds and the group quorum rule.
//!
//! Two levels drive every player:
//! - `activation` → a held button is committed (`ACTIVE`)
//! - `start` → the player is ready on their own (`START`)
//!
//! A start additionally needs more than one startable player.

use crate::error::{InvalidArgument, Result};

/// Smallest group that can be constructed.
pub const MIN_PLAYERS: usize = 2;

/// Startable players required before a start may be declared.
pub const START_QUORUM: usize = 2;

/// Validated pair of readiness levels shared by every player in a group.
///
/// Invariant: `0 < activation < start`. NaN is rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    activation: f64,
    start: f64,
}

impl Thresholds {
    /// Validate and build a threshold pair.
    ///
    /// # Examples
    ///
    /// ```
    /// use readycheck_core::Thresholds;
    ///
    /// assert!(Thresholds::new(1.0, 2.0).is_ok());
    /// assert!(Thresholds::new(0.0, 2.0).is_err());  // activation must be positive
    /// assert!(Thresholds::new(1.0, 0.5).is_err());  // start must exceed activation
    /// ```
    pub fn new(activation: f64, start: f64) -> Result<Self> {
        // Written as negated comparisons so NaN fails validation too.
        if !(activation > 0.0) || !(start > activation) {
            return Err(InvalidArgument::InvalidThresholds { activation, start }.into());
        }
        Ok(Self { activation, start })
    }

    /// Level at which a held player becomes `ACTIVE`.
    pub const fn activation(&self) -> f64 {
        self.activation
    }

    /// Level at which a player becomes `START`; also the level ceiling.
    pub const fn start(&self) -> f64 {
        self.start
    }
}

/// Check a requested group size.
pub(crate) fn validate_player_count(players: usize) -> Result<()> {
    if players < MIN_PLAYERS {
        return Err(InvalidArgument::TooFewPlayers { requested: players }.into());
    }
    Ok(())
}

/// Check a time step before it touches any state.
pub(crate) fn validate_step(dt: f64) -> Result<()> {
    if !(dt > 0.0) {
        return Err(InvalidArgument::NonPositiveStep(dt).into());
    }
    Ok(())
}

/// Check if a startable count meets the quorum.
pub const fn meets_quorum(startable: usize) -> bool {
    startable >= START_QUORUM
}

/// Calculate how many more startable players are needed for quorum.
pub const fn players_needed(startable: usize) -> usize {
    START_QUORUM.saturating_sub(startable)
}
