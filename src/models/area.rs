//! Area entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A rectangular area to clean, e.g. a room or a corridor.
///
/// Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Area {
    /// Unique record identifier.
    pub id: String,
    /// Display name, to make reports nicer.
    pub name: String,
    /// X side size in millimeters.
    pub size_x: i64,
    /// Y side size in millimeters.
    pub size_y: i64,
    /// Number of grid square passes needed before a square can be
    /// considered clean.
    pub passes_needed: u32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Area {
    /// Construct a new area with a generated identifier.
    #[must_use]
    pub fn new(name: impl Into<String>, size_x: i64, size_y: i64, passes_needed: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            size_x,
            size_y,
            passes_needed,
            created_at: Utc::now(),
        }
    }
}
