//! Cleaning session aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::area::Area;
use crate::models::coverage::CoverageGrid;
use crate::models::position::Position;
use crate::models::robot::Robot;
use crate::Result;

/// One continuous cleaning run by one robot in one area, bounded by
/// start and end events.
///
/// Owns exactly one [`CoverageGrid`]; the grid's total square count is
/// fixed at session start and never changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct CleaningSession {
    /// Unique record identifier.
    pub id: String,
    /// Display name; generated when not provided.
    pub name: String,
    /// Coverage grid generated fresh for this session.
    pub area: CoverageGrid,
    /// Whether the session is still running.
    pub is_active: bool,
    /// When the session started, according to the robot.
    pub started_at: DateTime<Utc>,
    /// When the session ended; unset while active.
    pub ended_at: Option<DateTime<Utc>>,
    /// Last reported X coordinate.
    pub last_x: i64,
    /// Last reported Y coordinate.
    pub last_y: i64,
    /// When the last position was reported.
    pub last_reported_at: Option<DateTime<Utc>>,
    /// Append-only log of reported positions.
    pub position_history: Vec<Position>,
    /// Session duration in whole seconds, computed on close.
    pub duration_sec: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl CleaningSession {
    /// Create a new active cleaning session for a robot in a given area.
    ///
    /// An empty `name` gets an informative default.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` when the coverage grid cannot be
    /// generated from the area and robot dimensions.
    pub fn new(robot: &Robot, area: &Area, name: &str, started_at: DateTime<Utc>) -> Result<Self> {
        let name = if name.is_empty() {
            format!(
                "Cleaning session: robot {} in area {} on {}",
                robot.name,
                area.name,
                started_at.format("%-d %b %Y %H:%M")
            )
        } else {
            name.to_owned()
        };
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            area: CoverageGrid::new(area, robot)?,
            is_active: true,
            started_at,
            ended_at: None,
            last_x: 0,
            last_y: 0,
            last_reported_at: None,
            position_history: Vec::new(),
            duration_sec: 0,
            created_at: Utc::now(),
        })
    }

    /// End this session if it is still active.
    ///
    /// Sets `ended_at`, clears the active flag, and computes the duration
    /// in whole seconds. A no-op on an already-ended session, so the
    /// timing fields are written exactly once.
    pub fn end(&mut self, ended_at: DateTime<Utc>) {
        if self.is_active {
            self.ended_at = Some(ended_at);
            self.is_active = false;
            self.duration_sec = (ended_at - self.started_at).num_seconds();
        }
    }
}
