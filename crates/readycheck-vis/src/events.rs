//! Ready check events for the visualization timeline.

use readycheck_core::{ReadinessGroup, ReadinessState, StartCheck, Thresholds};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// View of one player at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: usize,
    pub state: ReadinessState,
    pub level: f64,
    pub pressed: bool,
    pub startable: bool,
}

/// Events that occur while a group readies up.
///
/// Within a frame the order is: button changes, the step, the state changes
/// the step caused, then the start decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ReadinessEvent {
    /// A player pressed their button
    ButtonPressed { player: usize, frame: u64 },

    /// A player released their button
    ButtonReleased { player: usize, frame: u64 },

    /// The group advanced by `dt`
    Stepped { dt: f64, frame: u64 },

    /// A player's readiness stage changed during a step
    StateChanged {
        player: usize,
        from: ReadinessState,
        to: ReadinessState,
        frame: u64,
    },

    /// The group met the start rule
    StartDecided { players: Vec<usize>, frame: u64 },
}

impl ReadinessEvent {
    /// Get the frame number for this event.
    pub fn frame(&self) -> u64 {
        match self {
            ReadinessEvent::ButtonPressed { frame, .. } => *frame,
            ReadinessEvent::ButtonReleased { frame, .. } => *frame,
            ReadinessEvent::Stepped { frame, .. } => *frame,
            ReadinessEvent::StateChanged { frame, .. } => *frame,
            ReadinessEvent::StartDecided { frame, .. } => *frame,
        }
    }
}

/// A snapshot of the group after `frame` steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupSnapshot {
    pub frame: u64,
    pub elapsed: f64,
    pub players: Vec<PlayerView>,
    pub check: StartCheck,
    pub should_start: bool,
}

impl GroupSnapshot {
    /// Capture the current state of a group.
    pub fn capture(group: &ReadinessGroup, frame: u64, elapsed: f64) -> Self {
        let players = group
            .players()
            .iter()
            .enumerate()
            .map(|(id, p)| PlayerView {
                id,
                state: p.state(),
                level: p.level(),
                pressed: p.is_pressed(),
                startable: p.is_startable(),
            })
            .collect();
        let check = group.start_check();

        GroupSnapshot {
            frame,
            elapsed,
            players,
            check,
            should_start: check.should_start(),
        }
    }

    /// Ids of startable players, in index order.
    pub fn startable_players(&self) -> Vec<usize> {
        self.players
            .iter()
            .filter(|p| p.startable)
            .map(|p| p.id)
            .collect()
    }

    /// Rebuild group state from events up to (but not including) the given
    /// event index, by replaying them through a fresh group.
    pub fn from_events(
        events: &[ReadinessEvent],
        up_to_event: usize,
        players: usize,
        thresholds: Thresholds,
    ) -> Result<Self> {
        let mut group = ReadinessGroup::with_thresholds(players, thresholds)?;
        let mut frame = 0u64;
        let mut elapsed = 0.0;

        for event in events.iter().take(up_to_event) {
            match event {
                ReadinessEvent::ButtonPressed { player, .. } => group.press(*player)?,
                ReadinessEvent::ButtonReleased { player, .. } => group.release(*player)?,
                ReadinessEvent::Stepped { dt, .. } => {
                    group.advance(*dt)?;
                    frame += 1;
                    elapsed += dt;
                }
                ReadinessEvent::StateChanged { .. } | ReadinessEvent::StartDecided { .. } => {
                    // Derived from the steps above
                }
            }
        }

        Ok(Self::capture(&group, frame, elapsed))
    }
}
