//! Ready Check Visualization
//!
//! Scripted simulation of a ready check with terminal playback.
//!
//! # Architecture
//!
//! - **Simulation**: Drives a readiness group from a timed input script and
//!   records events into a timeline
//! - **Playback**: Paces recorded frames at a chosen speed
//! - **Render**: Draws each frame as a bar chart in the terminal
//!
//! # Usage
//!
//! ```no_run
//! use readycheck_vis::{BarChart, Simulation, SimulationConfig};
//!
//! let mut sim = Simulation::new(SimulationConfig::default())?;
//! let outcome = sim.run()?;
//!
//! let chart = BarChart::new(sim.config().bar_scale, sim.group().thresholds());
//! for frame in sim.frames() {
//!     print!("{}", chart.frame(frame, false));
//! }
//! println!("started: {}", outcome.started);
//! # Ok::<(), readycheck_vis::Error>(())
//! ```

mod error;
mod events;
mod playback;
mod render;
mod simulation;

pub use error::{Error, Result};
pub use events::{GroupSnapshot, PlayerView, ReadinessEvent};
pub use playback::{Playback, PlaybackSpeed};
pub use render::{cursor_up, roster, BarChart};
pub use simulation::{ButtonAction, Outcome, ScriptedInput, Simulation, SimulationConfig};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulation_records_events() {
        let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
        sim.tick().unwrap();
        sim.tick().unwrap();
        sim.tick().unwrap();

        // Two initial presses, then at least one step per tick
        assert!(sim.event_count() >= 5);
        assert_eq!(sim.current_frame(), 3);
        assert_eq!(sim.frames().len(), 4);
    }

    #[test]
    fn replayed_events_match_recorded_frames() {
        let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
        for _ in 0..80 {
            sim.tick().unwrap();
        }

        let replayed = GroupSnapshot::from_events(
            sim.events(),
            sim.event_count(),
            sim.config().players,
            sim.group().thresholds(),
        )
        .unwrap();

        assert_eq!(Some(&replayed), sim.frames().last());
    }
}
