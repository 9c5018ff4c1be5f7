//! Ready Check
//!
//! A multi-player "hold to start" button mechanism. Every player holds a
//! button; holding raises their readiness level, letting go decays it. The
//! group decides continuously whether enough players are ready to begin.
//!
//! # Player Stages
//!
//! `OUT → IN → ACTIVE → START`, climbing while the button is held:
//! - `IN` once pressed
//! - `ACTIVE` at the activation level
//! - `START` at the start level
//!
//! Releasing from `IN`, or from `ACTIVE` below the activation level, drops the
//! player straight back to `OUT` with nothing kept.
//!
//! # Start Decision
//!
//! Start when more than one player is startable, at least one is at `START`,
//! and nobody is `IN`.
//!
//! Time only moves through [`ReadinessGroup::advance`]. Nothing here reads a
//! clock, so a driver can replay the same inputs and get the same result.

mod error;
mod group;
mod player;
mod threshold;

pub use error::{Error, InvalidArgument, Result};
pub use group::{ReadinessGroup, StartBlocker, StartCheck, Transition};
pub use player::{PlayerReadiness, ReadinessState};
pub use threshold::{meets_quorum, players_needed, Thresholds, MIN_PLAYERS, START_QUORUM};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_spam_does_not_block_start() {
        let mut group = ReadinessGroup::new(4, 1.0, 2.0).unwrap();
        group.press(0).unwrap();
        group.press(1).unwrap();
        group.advance(1.5).unwrap(); // nearly there

        for _ in 0..3 {
            group.press(2).unwrap();
            group.advance(0.7).unwrap();
            group.release(2).unwrap();
            group.advance(0.5).unwrap();

            assert_eq!(group.player(2).unwrap().state(), ReadinessState::Out);
            assert_eq!(group.count_in_state(ReadinessState::In), 0);
            assert!(group.should_start());
            assert_eq!(group.count_startable(), 2);
        }
    }

    #[test]
    fn quorum_constants() {
        assert!(MIN_PLAYERS >= 2);
        assert!(meets_quorum(START_QUORUM));
        assert!(!meets_quorum(START_QUORUM - 1));
    }
}
