//! Scripted ready check simulation with event recording.

use std::fs;
use std::path::Path;

use readycheck_core::ReadinessGroup;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::events::{GroupSnapshot, ReadinessEvent};

/// What a scripted input does to a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonAction {
    Press,
    Release,
}

/// A button input that holds once `after` seconds have elapsed.
///
/// Inputs are level-triggered: every tick past `after` re-applies them, and
/// for the same player a later entry in the script overrides an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptedInput {
    pub after: f64,
    pub player: usize,
    pub action: ButtonAction,
}

impl ScriptedInput {
    pub fn press(after: f64, player: usize) -> Self {
        Self {
            after,
            player,
            action: ButtonAction::Press,
        }
    }

    pub fn release(after: f64, player: usize) -> Self {
        Self {
            after,
            player,
            action: ButtonAction::Release,
        }
    }
}

/// Configuration for the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of players in the group
    pub players: usize,
    /// Activation level (seconds of holding)
    pub activation: f64,
    /// Start level (seconds of holding)
    pub start: f64,
    /// Fixed time step per frame, in seconds
    pub step: f64,
    /// Give up after this much simulated time
    pub max_time: f64,
    /// Characters per second of level in the bar chart
    pub bar_scale: usize,
    /// Players holding their button from the first frame
    pub initial_presses: Vec<usize>,
    /// Timed button inputs
    pub script: Vec<ScriptedInput>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            players: 4,
            activation: 2.0,
            start: 5.0,
            step: 0.05,
            max_time: 60.0,
            bar_scale: 20,
            initial_presses: vec![1, 3],
            script: vec![
                ScriptedInput::release(3.0, 1),
                ScriptedInput::press(5.2, 0),
                ScriptedInput::press(6.0, 1),
                ScriptedInput::press(6.4, 2),
            ],
        }
    }
}

impl SimulationConfig {
    /// Parse a config from JSON. Missing fields take their default.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check the parts of the config the readiness group does not check.
    fn validate(&self) -> Result<()> {
        if !(self.step > 0.0) || !self.step.is_finite() {
            return Err(Error::InvalidInput(format!(
                "step must be a positive finite number, got {}",
                self.step
            )));
        }
        if !(self.max_time > 0.0) || !self.max_time.is_finite() {
            return Err(Error::InvalidInput(format!(
                "max_time must be a positive finite number, got {}",
                self.max_time
            )));
        }

        let scripted = self.script.iter().map(|input| input.player);
        if let Some(player) = self
            .initial_presses
            .iter()
            .copied()
            .chain(scripted)
            .find(|&p| p >= self.players)
        {
            return Err(Error::InvalidInput(format!(
                "player {} is scripted but the group has {} players",
                player, self.players
            )));
        }
        Ok(())
    }
}

/// Result of a finished simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// Whether the start rule was met before `max_time`
    pub started: bool,
    /// Simulated seconds when the run ended
    pub elapsed: f64,
    /// Steps taken
    pub frames: u64,
    /// Startable players when the run ended
    pub players: Vec<usize>,
}

/// Drives a readiness group from a script and records events.
pub struct Simulation {
    config: SimulationConfig,
    group: ReadinessGroup,
    events: Vec<ReadinessEvent>,
    frames: Vec<GroupSnapshot>,
    current_frame: u64,
    elapsed: f64,
    started: bool,
}

impl Simulation {
    /// Create a new simulation with the given configuration.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let group = ReadinessGroup::new(config.players, config.activation, config.start)?;

        let mut sim = Self {
            config,
            group,
            events: Vec::new(),
            frames: Vec::new(),
            current_frame: 0,
            elapsed: 0.0,
            started: false,
        };

        let initial_presses = sim.config.initial_presses.clone();
        for player in initial_presses {
            sim.set_pressed(player, true)?;
        }
        sim.frames.push(sim.snapshot());
        Ok(sim)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn group(&self) -> &ReadinessGroup {
        &self.group
    }

    /// Get all recorded events.
    pub fn events(&self) -> &[ReadinessEvent] {
        &self.events
    }

    /// Get the number of events recorded.
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Snapshots after each step; index 0 is the state before the first step.
    pub fn frames(&self) -> &[GroupSnapshot] {
        &self.frames
    }

    pub fn current_frame(&self) -> u64 {
        self.current_frame
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Whether the run has met the start rule.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Get a snapshot of the group at the current state.
    pub fn snapshot(&self) -> GroupSnapshot {
        GroupSnapshot::capture(&self.group, self.current_frame, self.elapsed)
    }

    fn set_pressed(&mut self, player: usize, pressed: bool) -> Result<()> {
        if self.group.is_pressed(player)? == pressed {
            return Ok(());
        }

        let frame = self.current_frame;
        if pressed {
            self.group.press(player)?;
            self.events.push(ReadinessEvent::ButtonPressed { player, frame });
        } else {
            self.group.release(player)?;
            self.events.push(ReadinessEvent::ButtonReleased { player, frame });
        }
        debug!(player, pressed, elapsed = self.elapsed, "button changed");
        Ok(())
    }

    /// Resolve where every button should be at the current time and apply
    /// only the changes.
    fn apply_script(&mut self) -> Result<()> {
        let mut desired: Vec<bool> = self
            .group
            .players()
            .iter()
            .map(|p| p.is_pressed())
            .collect();

        for input in &self.config.script {
            if self.elapsed > input.after {
                desired[input.player] = input.action == ButtonAction::Press;
            }
        }

        for (player, pressed) in desired.into_iter().enumerate() {
            self.set_pressed(player, pressed)?;
        }
        Ok(())
    }

    /// Run one frame: apply inputs, step, record. Returns true once the
    /// group should start.
    pub fn tick(&mut self) -> Result<bool> {
        if self.started {
            return Ok(true);
        }

        self.apply_script()?;

        let frame = self.current_frame;
        let dt = self.config.step;
        let transitions = self.group.advance(dt)?;
        self.elapsed += dt;

        self.events.push(ReadinessEvent::Stepped { dt, frame });
        for t in transitions {
            self.events.push(ReadinessEvent::StateChanged {
                player: t.player,
                from: t.from,
                to: t.to,
                frame,
            });
        }

        if self.group.should_start() {
            let players = self.group.startable_players();
            info!(?players, elapsed = self.elapsed, "ready to start");
            self.events.push(ReadinessEvent::StartDecided { players, frame });
            self.started = true;
        }

        self.current_frame += 1;
        self.frames.push(self.snapshot());
        Ok(self.started)
    }

    /// Tick until the group should start or `max_time` runs out.
    pub fn run(&mut self) -> Result<Outcome> {
        while !self.started && self.elapsed < self.config.max_time {
            self.tick()?;
        }

        if !self.started {
            info!(
                elapsed = self.elapsed,
                check = ?self.group.start_check().blocker(),
                "gave up waiting for a start"
            );
        }

        Ok(Outcome {
            started: self.started,
            elapsed: self.elapsed,
            frames: self.current_frame,
            players: self.group.startable_players(),
        })
    }
}
