//! Robot entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::session::CleaningSession;

/// A vacuum cleaning robot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Robot {
    /// Unique record identifier.
    pub id: String,
    /// Display name, to make identification easier.
    pub name: String,
    /// Footprint diameter in millimeters; immutable after creation. All
    /// robots are assumed to have a circular shape.
    pub size: i64,
    /// The robot's current (most recent active) cleaning session, if any.
    /// A robot has at most one active session at any instant.
    pub current_session: Option<CleaningSession>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Robot {
    /// Construct a new robot with a generated identifier.
    #[must_use]
    pub fn new(name: impl Into<String>, size: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            size,
            current_session: None,
            created_at: Utc::now(),
        }
    }
}

/// A robot together with its most recent cleaning sessions, newest first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct RobotHistory {
    /// The robot the sessions belong to.
    pub robot: Robot,
    /// Historical sessions, each with full position history.
    pub sessions: Vec<CleaningSession>,
}
