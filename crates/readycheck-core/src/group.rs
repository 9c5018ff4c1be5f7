//! Group aggregation: relays input to every player and decides when to start.
//!
//! # Start Rule
//!
//! A group should start when all three hold:
//! 1. more than one player is startable (quorum)
//! 2. at least one player reached `START`
//! 3. no player is `IN` (a fresh press vetoes the start)
//!
//! Rule 3 keeps a newly pressed button from forcing an immediate start. The
//! veto only lasts while the presser is below activation.

use tracing::debug;

use crate::error::{Error, Result};
use crate::player::{PlayerReadiness, ReadinessState};
use crate::threshold::{
    meets_quorum, players_needed, validate_player_count, validate_step, Thresholds,
};

/// A player's state change during one [`ReadinessGroup::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    pub player: usize,
    pub from: ReadinessState,
    pub to: ReadinessState,
}

/// The counts behind a start decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StartCheck {
    /// Players that would join a start now
    pub startable: usize,
    /// Players in `START`
    pub started: usize,
    /// Players in `IN`
    pub pending: usize,
}

/// Why a start is being held back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StartBlocker {
    /// Not enough startable players
    Quorum { needed: usize },
    /// Nobody has held to the start level
    NoneStarted,
    /// Someone just pressed and is still below activation
    PendingPlayers { count: usize },
}

impl StartCheck {
    pub fn should_start(&self) -> bool {
        self.blocker().is_none()
    }

    /// The first start condition that fails, in rule order.
    pub fn blocker(&self) -> Option<StartBlocker> {
        if !meets_quorum(self.startable) {
            Some(StartBlocker::Quorum {
                needed: players_needed(self.startable),
            })
        } else if self.started == 0 {
            Some(StartBlocker::NoneStarted)
        } else if self.pending > 0 {
            Some(StartBlocker::PendingPlayers {
                count: self.pending,
            })
        } else {
            None
        }
    }
}

/// A fixed-size group of players sharing one pair of thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadinessGroup {
    thresholds: Thresholds,
    players: Vec<PlayerReadiness>,
}

impl ReadinessGroup {
    /// Create `players` released players.
    ///
    /// The player count is checked before the thresholds.
    ///
    /// # Examples
    ///
    /// ```
    /// use readycheck_core::ReadinessGroup;
    ///
    /// let mut group = ReadinessGroup::new(2, 1.0, 2.0)?;
    /// group.press(0)?;
    /// group.press(1)?;
    /// group.advance(2.0)?;
    /// assert!(group.should_start());
    /// # Ok::<(), readycheck_core::Error>(())
    /// ```
    pub fn new(players: usize, activation: f64, start: f64) -> Result<Self> {
        validate_player_count(players)?;
        let thresholds = Thresholds::new(activation, start)?;
        Ok(Self::build(players, thresholds))
    }

    /// Create a group from already validated thresholds.
    pub fn with_thresholds(players: usize, thresholds: Thresholds) -> Result<Self> {
        validate_player_count(players)?;
        Ok(Self::build(players, thresholds))
    }

    fn build(players: usize, thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            players: vec![PlayerReadiness::new(thresholds); players],
        }
    }

    /// Number of players (fixed at construction).
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Always false: a group holds at least two players.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    pub fn players(&self) -> &[PlayerReadiness] {
        &self.players
    }

    pub fn player(&self, id: usize) -> Result<&PlayerReadiness> {
        let len = self.players.len();
        self.players
            .get(id)
            .ok_or(Error::IndexOutOfRange { index: id, len })
    }

    fn player_mut(&mut self, id: usize) -> Result<&mut PlayerReadiness> {
        let len = self.players.len();
        self.players
            .get_mut(id)
            .ok_or(Error::IndexOutOfRange { index: id, len })
    }

    pub fn press(&mut self, id: usize) -> Result<()> {
        self.player_mut(id)?.press();
        Ok(())
    }

    pub fn release(&mut self, id: usize) -> Result<()> {
        self.player_mut(id)?.release();
        Ok(())
    }

    pub fn is_pressed(&self, id: usize) -> Result<bool> {
        Ok(self.player(id)?.is_pressed())
    }

    /// Step every player by `dt` in index order.
    ///
    /// `dt` is validated once up front so a bad step never leaves the group
    /// half-advanced.
    pub fn advance(&mut self, dt: f64) -> Result<Vec<Transition>> {
        validate_step(dt)?;

        let mut transitions = Vec::new();
        for (id, player) in self.players.iter_mut().enumerate() {
            let from = player.state();
            if let Some(to) = player.advance(dt)? {
                debug!(player = id, %from, %to, level = player.level(), "readiness changed");
                transitions.push(Transition { player: id, from, to });
            }
        }
        Ok(transitions)
    }

    pub fn count_in_state(&self, state: ReadinessState) -> usize {
        self.players.iter().filter(|p| p.state() == state).count()
    }

    /// `START`, or `ACTIVE` with the button held.
    pub fn is_startable(&self, id: usize) -> Result<bool> {
        Ok(self.player(id)?.is_startable())
    }

    pub fn count_startable(&self) -> usize {
        self.players.iter().filter(|p| p.is_startable()).count()
    }

    /// Ids of startable players, in index order.
    pub fn startable_players(&self) -> Vec<usize> {
        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_startable())
            .map(|(id, _)| id)
            .collect()
    }

    pub fn start_check(&self) -> StartCheck {
        StartCheck {
            startable: self.count_startable(),
            started: self.count_in_state(ReadinessState::Start),
            pending: self.count_in_state(ReadinessState::In),
        }
    }

    pub fn should_start(&self) -> bool {
        self.start_check().should_start()
    }
}
