//! Terminal bar chart for a ready check.
//!
//! ```text
//! ID|---------------------------------------|-----------------------------------------------------------|
//! 0 |                                                                                                     OUT    false
//! 1 |##############################################                                                       ACTIVE true
//! ```
//!
//! One `#` per `1 / scale` of level. The header marks the activation and start
//! levels with `|`.

use std::fmt::Write as _;

use readycheck_core::Thresholds;

use crate::events::{GroupSnapshot, PlayerView};

/// Moves the cursor up `n` lines so the next frame overwrites the last.
pub fn cursor_up(n: usize) -> String {
    format!("\x1B[{}A", n)
}

/// Renders group snapshots as horizontal level bars.
#[derive(Debug, Clone, Copy)]
pub struct BarChart {
    scale: usize,
    active_bar: usize,
    start_bar: usize,
}

impl BarChart {
    pub fn new(scale: usize, thresholds: Thresholds) -> Self {
        Self {
            scale,
            active_bar: Self::columns(thresholds.activation(), scale),
            start_bar: Self::columns(thresholds.start(), scale),
        }
    }

    fn columns(level: f64, scale: usize) -> usize {
        (level * scale as f64) as usize
    }

    /// Width of the bar area in characters.
    pub fn width(&self) -> usize {
        self.start_bar
    }

    pub fn header(&self) -> String {
        let to_active = self.active_bar.saturating_sub(1);
        let to_start = self.start_bar.saturating_sub(self.active_bar + 1);
        format!("ID|{}|{}|", "-".repeat(to_active), "-".repeat(to_start))
    }

    pub fn row(&self, player: &PlayerView) -> String {
        let filled = Self::columns(player.level, self.scale).min(self.start_bar);
        format!(
            "{} |{}{} {:<6} {:<5}",
            player.id,
            "#".repeat(filled),
            " ".repeat(self.start_bar - filled),
            player.state,
            player.pressed,
        )
    }

    /// All player rows, newline terminated. With `redraw`, prefixed by a
    /// cursor move back over the previous frame.
    pub fn frame(&self, snapshot: &GroupSnapshot, redraw: bool) -> String {
        let mut out = String::new();
        if redraw {
            out.push_str(&cursor_up(snapshot.players.len()));
        }
        for player in &snapshot.players {
            out.push_str(&self.row(player));
            out.push('\n');
        }
        out
    }
}

/// The closing summary naming who joins the game.
pub fn roster(snapshot: &GroupSnapshot) -> String {
    let players = snapshot.startable_players();
    let mut out = String::from("Ready to start. Players:\n");
    for id in &players {
        let _ = writeln!(out, "\tPlayer {}", id);
    }
    let _ = write!(out, "Start game with {} players.", players.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use readycheck_core::{ReadinessGroup, ReadinessState};

    fn chart() -> BarChart {
        BarChart::new(20, Thresholds::new(2.0, 5.0).unwrap())
    }

    fn view(id: usize, level: f64, state: ReadinessState, pressed: bool) -> PlayerView {
        PlayerView {
            id,
            state,
            level,
            pressed,
            startable: false,
        }
    }

    #[test]
    fn header_marks_thresholds() {
        let header = chart().header();
        assert_eq!(header, format!("ID|{}|{}|", "-".repeat(39), "-".repeat(59)));
        assert_eq!(header.find('|'), Some(2));
        // Marks land on columns 40 and 100 of the bar area.
        let marks: Vec<_> = header[3..].match_indices('|').map(|(i, _)| i + 1).collect();
        assert_eq!(marks, vec![40, 100]);
    }

    #[test]
    fn header_survives_tiny_scale() {
        let chart = BarChart::new(1, Thresholds::new(0.5, 0.9).unwrap());
        assert_eq!(chart.header(), "ID|||");
    }

    #[test]
    fn row_fills_by_level() {
        let row = chart().row(&view(1, 2.5, ReadinessState::Active, true));
        assert!(row.starts_with(&format!("1 |{} ", "#".repeat(50))));
        assert!(row.contains(" ACTIVE true"));
        assert_eq!(row.len(), "1 |".len() + 100 + " ACTIVE true ".len());
    }

    #[test]
    fn empty_and_full_rows_have_equal_width() {
        let chart = chart();
        let empty = chart.row(&view(0, 0.0, ReadinessState::Out, false));
        let full = chart.row(&view(0, 5.0, ReadinessState::Start, true));
        assert_eq!(empty.len(), full.len());
        assert!(empty.contains(" OUT    false"));
    }

    #[test]
    fn frame_redraws_over_previous() {
        let group = ReadinessGroup::new(4, 2.0, 5.0).unwrap();
        let snap = GroupSnapshot::capture(&group, 0, 0.0);

        let first = chart().frame(&snap, false);
        assert_eq!(first.lines().count(), 4);
        assert!(!first.starts_with('\x1B'));

        let again = chart().frame(&snap, true);
        assert!(again.starts_with("\x1B[4A"));
    }

    #[test]
    fn roster_lists_startable_players() {
        let mut group = ReadinessGroup::new(3, 1.0, 2.0).unwrap();
        group.press(0).unwrap();
        group.press(2).unwrap();
        group.advance(2.0).unwrap();

        let text = roster(&GroupSnapshot::capture(&group, 1, 2.0));
        assert_eq!(
            text,
            "Ready to start. Players:\n\tPlayer 0\n\tPlayer 2\nStart game with 2 players."
        );
    }
}
