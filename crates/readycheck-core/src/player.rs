//! Per-player readiness state machine.
//!
//! ```text
//!            held              level ≥ activation        level ≥ start
//!   OUT ───────────────▶ IN ───────────────────▶ ACTIVE ───────────────▶ START
//!    ▲                   │ released               │ released and
//!    └───────────────────┴────────────────────────┘ level < activation
//! ```
//!
//! Holding the button raises the level by `dt` each step, releasing it decays
//! it by `dt`. `IN` and a sub-activation `ACTIVE` collapse straight to `OUT` with
//! zero level. `START` is only left when the level decays all the way to zero.

use std::fmt;

use tracing::trace;

use crate::error::Result;
use crate::threshold::{validate_step, Thresholds};

/// Readiness stage of one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum ReadinessState {
    /// Not taking part; level is zero
    #[default]
    Out,
    /// Freshly pressed, below activation
    In,
    /// Held past activation
    Active,
    /// Held to the start level
    Start,
}

impl ReadinessState {
    /// All states in stage order.
    pub const ALL: [ReadinessState; 4] = [
        ReadinessState::Out,
        ReadinessState::In,
        ReadinessState::Active,
        ReadinessState::Start,
    ];

    /// Upper-case label used in logs and the terminal view.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ReadinessState::Out => "OUT",
            ReadinessState::In => "IN",
            ReadinessState::Active => "ACTIVE",
            ReadinessState::Start => "START",
        }
    }
}

impl fmt::Display for ReadinessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One participant's button input and accumulated readiness.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerReadiness {
    thresholds: Thresholds,
    state: ReadinessState,
    level: f64,
    pressed: bool,
}

impl PlayerReadiness {
    /// A released player at `OUT` with zero level.
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            state: ReadinessState::Out,
            level: 0.0,
            pressed: false,
        }
    }

    pub fn state(&self) -> ReadinessState {
        self.state
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Hold the button. Takes effect on the next [`advance`](Self::advance).
    pub fn press(&mut self) {
        self.pressed = true;
    }

    /// Let go of the button. Takes effect on the next [`advance`](Self::advance).
    pub fn release(&mut self) {
        self.pressed = false;
    }

    /// Startable: fully started, or active with the button still held.
    pub fn is_startable(&self) -> bool {
        match self.state {
            ReadinessState::Start => true,
            ReadinessState::Active => self.pressed,
            ReadinessState::In | ReadinessState::Out => false,
        }
    }

    /// Advance one time step of length `dt`.
    ///
    /// Returns the new state when the step changed it. A non-positive `dt`
    /// is rejected and leaves the player untouched.
    pub fn advance(&mut self, dt: f64) -> Result<Option<ReadinessState>> {
        validate_step(dt)?;

        let before = self.state;
        if self.pressed {
            self.rise(dt);
        } else {
            self.fall(dt);
        }
        trace!(state = %self.state, level = self.level, pressed = self.pressed, "player stepped");

        Ok((self.state != before).then_some(self.state))
    }

    fn rise(&mut self, dt: f64) {
        let (activation, start) = (self.thresholds.activation(), self.thresholds.start());

        if self.state == ReadinessState::Out {
            self.state = ReadinessState::In;
        }

        self.level = (self.level + dt).min(start);

        // Both checks run in order so one long step can go IN → START.
        if self.state == ReadinessState::In && self.level >= activation {
            self.state = ReadinessState::Active;
        }
        if self.state == ReadinessState::Active && self.level >= start {
            self.state = ReadinessState::Start;
        }
    }

    fn fall(&mut self, dt: f64) {
        let activation = self.thresholds.activation();

        self.level -= dt;
        if self.level <= 0.0 {
            self.level = 0.0;
            self.state = ReadinessState::Out;
        }

        // No partial credit below activation.
        let drop_out = match self.state {
            ReadinessState::In => true,
            ReadinessState::Active => self.level < activation,
            ReadinessState::Out | ReadinessState::Start => false,
        };
        if drop_out {
            self.state = ReadinessState::Out;
            self.level = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, InvalidArgument};
    use proptest::prelude::*;

    fn player(activation: f64, start: f64) -> PlayerReadiness {
        PlayerReadiness::new(Thresholds::new(activation, start).unwrap())
    }

    #[test]
    fn new_player_is_out() {
        let p = player(1.0, 2.0);
        assert_eq!(p.state(), ReadinessState::Out);
        assert_eq!(p.level(), 0.0);
        assert!(!p.is_pressed());
        assert!(!p.is_startable());
    }

    #[test]
    fn press_has_no_effect_until_step() {
        let mut p = player(1.0, 2.0);
        p.press();
        assert!(p.is_pressed());
        assert_eq!(p.state(), ReadinessState::Out);
        assert_eq!(p.level(), 0.0);
    }

    #[test]
    fn rising_walks_through_stages() {
        let mut p = player(1.0, 2.0);
        p.press();

        assert_eq!(p.advance(0.5).unwrap(), Some(ReadinessState::In));
        assert_eq!(p.level(), 0.5);

        assert_eq!(p.advance(0.5).unwrap(), Some(ReadinessState::Active));
        assert_eq!(p.level(), 1.0);

        assert_eq!(p.advance(0.5).unwrap(), None);
        assert_eq!(p.state(), ReadinessState::Active);

        assert_eq!(p.advance(0.5).unwrap(), Some(ReadinessState::Start));
        assert_eq!(p.level(), 2.0);
    }

    #[test]
    fn single_step_jumps_in_to_start() {
        let mut p = player(1.0, 2.0);
        p.press();
        assert_eq!(p.advance(5.0).unwrap(), Some(ReadinessState::Start));
        assert_eq!(p.level(), 2.0); // clamped at start
    }

    #[test]
    fn release_from_in_drops_out_completely() {
        let mut p = player(1.0, 2.0);
        p.press();
        p.advance(0.75).unwrap();
        assert_eq!(p.state(), ReadinessState::In);

        p.release();
        assert_eq!(p.advance(0.25).unwrap(), Some(ReadinessState::Out));
        assert_eq!(p.level(), 0.0);
    }

    #[test]
    fn active_decays_then_drops_out_below_activation() {
        let mut p = player(1.0, 2.0);
        p.press();
        p.advance(1.5).unwrap();
        assert_eq!(p.state(), ReadinessState::Active);

        p.release();
        p.advance(0.25).unwrap();
        assert_eq!(p.state(), ReadinessState::Active);
        assert_eq!(p.level(), 1.25);
        assert!(!p.is_startable()); // active but not held

        assert_eq!(p.advance(0.5).unwrap(), Some(ReadinessState::Out));
        assert_eq!(p.level(), 0.0); // no partial level retained
    }

    #[test]
    fn start_survives_release_while_level_decays() {
        let mut p = player(1.0, 2.0);
        p.press();
        p.advance(2.0).unwrap();
        p.release();

        assert_eq!(p.advance(0.5).unwrap(), None);
        assert_eq!(p.state(), ReadinessState::Start);
        assert_eq!(p.level(), 1.5);

        // Below activation, still START.
        p.advance(1.0).unwrap();
        assert_eq!(p.state(), ReadinessState::Start);
        assert_eq!(p.level(), 0.5);
        assert!(p.is_startable());

        // Fully decayed: level hits zero and the player is OUT.
        assert_eq!(p.advance(1.0).unwrap(), Some(ReadinessState::Out));
        assert_eq!(p.level(), 0.0);
    }

    #[test]
    fn released_out_player_stays_out() {
        let mut p = player(1.0, 2.0);
        assert_eq!(p.advance(1.0).unwrap(), None);
        assert_eq!(p.state(), ReadinessState::Out);
        assert_eq!(p.level(), 0.0);
    }

    #[test]
    fn repress_from_active_keeps_level() {
        let mut p = player(1.0, 3.0);
        p.press();
        p.advance(2.0).unwrap();
        p.release();
        p.advance(0.5).unwrap();
        p.press();
        p.advance(0.5).unwrap();
        assert_eq!(p.state(), ReadinessState::Active);
        assert_eq!(p.level(), 2.0);
    }

    #[test]
    fn invalid_step_is_rejected() {
        let mut p = player(1.0, 2.0);
        p.press();
        p.advance(0.5).unwrap();
        let before = p.clone();

        for dt in [0.0, -0.1, f64::NAN] {
            assert!(matches!(
                p.advance(dt),
                Err(Error::InvalidArgument(InvalidArgument::NonPositiveStep(_)))
            ));
            assert_eq!(p, before);
        }
    }

    #[test]
    fn state_labels() {
        let labels: Vec<_> = ReadinessState::ALL.iter().map(|s| s.to_string()).collect();
        assert_eq!(labels, ["OUT", "IN", "ACTIVE", "START"]);
    }

    #[derive(Debug, Clone)]
    enum Input {
        Press,
        Release,
        Step(f64),
    }

    fn input() -> impl Strategy<Value = Input> {
        prop_oneof![
            Just(Input::Press),
            Just(Input::Release),
            (0.001f64..3.0).prop_map(Input::Step),
        ]
    }

    proptest! {
        #[test]
        fn level_stays_in_bounds_and_out_means_zero(
            inputs in prop::collection::vec(input(), 0..200)
        ) {
            let mut p = player(1.0, 2.0);
            for input in inputs {
                match input {
                    Input::Press => p.press(),
                    Input::Release => p.release(),
                    Input::Step(dt) => { p.advance(dt).unwrap(); }
                }
                prop_assert!(p.level() >= 0.0);
                prop_assert!(p.level() <= 2.0);
                if p.state() == ReadinessState::Out {
                    prop_assert_eq!(p.level(), 0.0);
                }
                if p.state() == ReadinessState::Active {
                    prop_assert!(p.level() >= 1.0);
                }
            }
        }

        #[test]
        fn continuous_hold_is_monotonic(steps in prop::collection::vec(0.001f64..1.0, 1..50)) {
            let mut p = player(1.0, 2.0);
            p.press();
            let mut prev = p.state();
            for dt in steps {
                p.advance(dt).unwrap();
                prop_assert!(p.state() as u8 >= prev as u8);
                prev = p.state();
            }
        }
    }
}
