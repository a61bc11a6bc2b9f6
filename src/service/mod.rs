//! Use-case services and the repository seam they are built on.
//!
//! The repository traits decouple the lifecycle logic from the concrete
//! storage backend (`SQLite` in production, see [`crate::persistence`]);
//! services receive their repository by constructor injection.

pub mod area;
pub mod robot;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{Area, CleaningSession, Robot, RobotHistory};
use crate::Result;

pub use area::AreaService;
pub use robot::RobotService;

/// Arguments for [`RobotService::start_session`].
#[derive(Debug, Clone)]
pub struct StartSessionArgs {
    /// Robot to do the cleaning.
    pub robot_id: String,
    /// Area to clean.
    pub area_id: String,
    /// Robot's initial X coordinate.
    pub robot_x: i64,
    /// Robot's initial Y coordinate.
    pub robot_y: i64,
    /// When the session started, according to the robot.
    pub started_at: DateTime<Utc>,
}

/// Arguments for [`RobotService::update_session`] and
/// [`RobotService::end_session`].
#[derive(Debug, Clone)]
pub struct UpdateSessionArgs {
    /// Robot doing the cleaning.
    pub robot_id: String,
    /// Robot's current X coordinate.
    pub robot_x: i64,
    /// Robot's current Y coordinate.
    pub robot_y: i64,
    /// When this position was reported, according to the robot.
    pub reported_at: DateTime<Utc>,
    /// Also close the session as part of this update.
    pub end_session: bool,
}

/// Filters for [`RobotService::list`].
#[derive(Debug, Clone, Default)]
pub struct ListRobotsArgs {
    /// Match a single robot by identifier.
    pub robot_id: Option<String>,
    /// Match robots by exact display name.
    pub name: Option<String>,
}

/// Data-layer operations related to robots.
///
/// Each method may fail with `AppError::NotFound` or `AppError::Db`.
#[async_trait]
pub trait RobotRepository: Send + Sync {
    /// List robots, each together with its currently active cleaning
    /// session (if any).
    async fn list(&self, args: ListRobotsArgs) -> Result<Vec<Robot>>;

    /// Fetch a robot (with its active session) and an area by identity.
    /// Missing entities come back as `None`; the caller decides whether
    /// that is an error.
    async fn find_robot_and_area(
        &self,
        robot_id: &str,
        area_id: &str,
    ) -> Result<(Option<Robot>, Option<Area>)>;

    /// A robot together with up to `max` most recent sessions,
    /// newest-first, each carrying its full position history.
    async fn history(&self, robot_id: &str, max: u32) -> Result<RobotHistory>;

    /// Persist all session rows of one lifecycle transition in a single
    /// transaction. Either every session is written or none are.
    async fn save_sessions(&self, robot_id: &str, sessions: &[CleaningSession]) -> Result<()>;
}

/// Data-layer operations related to areas.
#[async_trait]
pub trait AreaRepository: Send + Sync {
    /// List all known areas.
    async fn list(&self) -> Result<Vec<Area>>;
}

/// Whether a robot-reported timestamp is the unset wire sentinel.
///
/// Robots publish Unix-second timestamps; `0` means the clock was never
/// set and the report cannot be ordered.
#[must_use]
pub fn is_unset_timestamp(ts: DateTime<Utc>) -> bool {
    ts.timestamp() == 0
}
