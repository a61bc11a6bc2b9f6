//! Coverage grid: per-session visit bookkeeping over an area.

use std::fmt::Write as _;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::models::area::Area;
use crate::models::grid::{new_grid, Square};
use crate::models::robot::Robot;
use crate::Result;

/// A snapshot of an area's dimensions plus a grid of squares sized to a
/// specific robot's diameter, generated fresh at session start.
///
/// One coverage grid belongs to exactly one session; it is never shared
/// across sessions even when the robot and area are the same.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct CoverageGrid {
    /// Display name copied from the area.
    pub name: String,
    /// X side size in millimeters.
    pub size_x: i64,
    /// Y side size in millimeters.
    pub size_y: i64,
    /// Number of passes before a square counts as clean.
    pub passes_needed: u32,
    /// Grid squares in creation order (row-major, left-to-right,
    /// top-to-bottom).
    pub grid: Vec<Square>,
}

impl CoverageGrid {
    /// Generate a coverage grid for the given area and the robot that is
    /// going to do the cleaning.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` when the area dimensions or the
    /// robot diameter are not positive.
    pub fn new(area: &Area, robot: &Robot) -> Result<Self> {
        Ok(Self {
            name: area.name.clone(),
            size_x: area.size_x,
            size_y: area.size_y,
            passes_needed: area.passes_needed,
            grid: new_grid(area.size_x, area.size_y, robot.size)?,
        })
    }

    /// Record a position report, returning whether a new pass was
    /// registered.
    ///
    /// Pass counting is edge-triggered: entering a square the robot was
    /// not already inside increments its `passes`; dwelling inside the
    /// same square across repeated reports never double-counts. Every
    /// other square has its presence flag cleared, since the robot
    /// occupies at most one square at a time. A point outside all squares
    /// is a silent no-op.
    ///
    /// Cost is a full O(n) grid scan per call — fine for per-session grids
    /// in the low thousands of squares. Larger grids would want a direct
    /// `(px / cell, py / cell)` index; observable behavior would not
    /// change.
    pub fn record_visit(&mut self, px: i64, py: i64) -> bool {
        let now = Utc::now();
        let mut registered_pass = false;
        for square in &mut self.grid {
            if square.contains(px, py) {
                if !square.has_robot_present {
                    // The robot just entered this square.
                    square.passes += 1;
                    if square.passes == self.passes_needed {
                        square.cleaned_at = Some(now);
                    }
                    square.has_robot_present = true;
                    registered_pass = true;
                }
            } else {
                // Unlock the square: the robot is not present here.
                square.has_robot_present = false;
            }
        }
        registered_pass
    }

    /// Completion percentage as a 2-decimal string, e.g. `"4.17"`.
    ///
    /// Returns `"0.00"` for an empty grid.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn completion(&self) -> String {
        if self.grid.is_empty() {
            return "0.00".into();
        }
        let cleaned = self
            .grid
            .iter()
            .filter(|s| s.cleaned_at.is_some())
            .count();
        let pct = cleaned as f64 / self.grid.len() as f64;
        format!("{:.2}", (pct * 10000.0).round() / 100.0)
    }

    /// ASCII rendering of the grid and its progress, one row per grid
    /// row: `*` cleaned, digit pass count, `_` untouched.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        let mut row = 0;
        for (i, square) in self.grid.iter().enumerate() {
            if square.cleaned_at.is_some() {
                out.push('*');
            } else if square.passes > 0 {
                let _ = write!(out, "{}", square.passes);
            } else {
                out.push('_');
            }
            let row_ends = match self.grid.get(i + 1) {
                Some(next) => next.y > square.y,
                None => true,
            };
            if row_ends {
                row += 1;
                let _ = writeln!(out, " {row}");
            }
        }
        out
    }
}
