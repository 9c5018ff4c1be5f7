//! Paced replay of recorded frames.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::events::GroupSnapshot;

/// How fast recorded frames are replayed relative to simulated time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlaybackSpeed {
    /// Skip straight to the final frame
    Paused,
    QuarterSpeed,
    HalfSpeed,
    /// Real time
    Normal,
    Double,
    Quadruple,
    TenX,
    /// No delay between frames
    Maximum,
}

impl PlaybackSpeed {
    pub fn multiplier(&self) -> f64 {
        match self {
            PlaybackSpeed::Paused => 0.0,
            PlaybackSpeed::QuarterSpeed => 0.25,
            PlaybackSpeed::HalfSpeed => 0.5,
            PlaybackSpeed::Normal => 1.0,
            PlaybackSpeed::Double => 2.0,
            PlaybackSpeed::Quadruple => 4.0,
            PlaybackSpeed::TenX => 10.0,
            PlaybackSpeed::Maximum => f64::INFINITY,
        }
    }

    /// Wall-clock delay for one frame of simulated length `step`.
    /// `None` when paused.
    pub fn frame_delay(&self, step: Duration) -> Option<Duration> {
        match self {
            PlaybackSpeed::Paused => None,
            PlaybackSpeed::Maximum => Some(Duration::ZERO),
            speed => Some(step.div_f64(speed.multiplier())),
        }
    }
}

impl FromStr for PlaybackSpeed {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "paused" | "pause" | "0" => Ok(PlaybackSpeed::Paused),
            "0.25" => Ok(PlaybackSpeed::QuarterSpeed),
            "0.5" => Ok(PlaybackSpeed::HalfSpeed),
            "1" | "normal" => Ok(PlaybackSpeed::Normal),
            "2" => Ok(PlaybackSpeed::Double),
            "4" => Ok(PlaybackSpeed::Quadruple),
            "10" => Ok(PlaybackSpeed::TenX),
            "max" | "maximum" => Ok(PlaybackSpeed::Maximum),
            other => Err(Error::InvalidInput(format!(
                "unknown playback speed '{}', expected paused|0.25|0.5|1|2|4|10|max",
                other
            ))),
        }
    }
}

/// Forward-only cursor over recorded snapshots.
///
/// A paused playback yields only the last frame.
pub struct Playback {
    frames: Vec<GroupSnapshot>,
    cursor: usize,
    speed: PlaybackSpeed,
}

impl Playback {
    pub fn new(frames: Vec<GroupSnapshot>, speed: PlaybackSpeed) -> Self {
        Self {
            frames,
            cursor: 0,
            speed,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.frames.len()
    }

    /// The last recorded frame.
    pub fn last(&self) -> Option<&GroupSnapshot> {
        self.frames.last()
    }

    /// Yield the next frame to draw, or `None` once every frame is shown.
    pub fn step_forward(&mut self) -> Option<&GroupSnapshot> {
        if self.speed == PlaybackSpeed::Paused {
            self.cursor = self.cursor.max(self.frames.len().saturating_sub(1));
        }
        let frame = self.frames.get(self.cursor)?;
        self.cursor += 1;
        Some(frame)
    }
}
