//! Position history entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A robot's position within an area at a certain time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Position {
    /// X coordinate in millimeters.
    pub x: i64,
    /// Y coordinate in millimeters.
    pub y: i64,
    /// When the robot passed this position, according to the robot.
    pub passed_at: DateTime<Utc>,
}

impl Position {
    /// Construct a new position entry.
    #[must_use]
    pub fn new(x: i64, y: i64, passed_at: DateTime<Utc>) -> Self {
        Self { x, y, passed_at }
    }
}
