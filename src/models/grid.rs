//! Grid cells and grid construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AppError, Result};

/// One grid square of a coverage grid, sized to the cleaning robot's
/// diameter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Square {
    /// Top-left X coordinate in millimeters.
    pub x: i64,
    /// Top-left Y coordinate in millimeters.
    pub y: i64,
    /// Side length; equals the owning robot's diameter.
    pub size: i64,
    /// Cumulative number of robot passes over this square.
    pub passes: u32,
    /// Whether the robot is currently inside this square. Transient
    /// bookkeeping for edge-triggered pass counting.
    #[serde(default)]
    pub has_robot_present: bool,
    /// Set exactly once, the first time `passes` reaches the configured
    /// threshold.
    pub cleaned_at: Option<DateTime<Utc>>,
    /// 1-based creation-order index, for deterministic iteration.
    pub order: u32,
}

impl Square {
    /// Whether the given point falls within this square.
    ///
    /// Both axes are half-open: a point exactly on the shared upper
    /// boundary belongs to the next square, never both.
    #[must_use]
    pub fn contains(&self, px: i64, py: i64) -> bool {
        let in_x = self.x <= px && px < self.x + self.size;
        let in_y = self.y <= py && py < self.y + self.size;
        in_x && in_y
    }
}

/// Build a row-major grid covering a `size_x` by `size_y` area with
/// squares of side `cell_size`.
///
/// Trailing squares that overhang the area boundary keep their declared
/// size; only the area boundary truncates their effective coverage. This
/// is a known simplification carried by the coverage model.
///
/// # Errors
///
/// Returns `AppError::Validation` when any dimension is not positive.
pub fn new_grid(size_x: i64, size_y: i64, cell_size: i64) -> Result<Vec<Square>> {
    if size_x <= 0 || size_y <= 0 || cell_size <= 0 {
        return Err(AppError::Validation(format!(
            "grid dimensions must be positive: size_x = {size_x} size_y = {size_y} cell_size = {cell_size}"
        )));
    }

    let mut squares = Vec::new();
    let mut order: u32 = 0;
    let mut y = 0;
    while y < size_y {
        let mut x = 0;
        while x < size_x {
            order += 1;
            squares.push(Square {
                x,
                y,
                size: cell_size,
                passes: 0,
                has_robot_present: false,
                cleaned_at: None,
                order,
            });
            x += cell_size;
        }
        y += cell_size;
    }
    Ok(squares)
}
