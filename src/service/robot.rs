//! Robot session lifecycle: start, update, end, history.
//!
//! All transitions for one robot are a read-modify-write of the robot's
//! current-session reference, so callers must serialize them per robot
//! identity (the telemetry dispatcher does; see
//! [`crate::telemetry::dispatcher`]). Transitions for different robots
//! are independent.

use tracing::{debug, info};

use crate::models::{CleaningSession, Position, Robot, RobotHistory};
use crate::service::{
    is_unset_timestamp, ListRobotsArgs, RobotRepository, StartSessionArgs, UpdateSessionArgs,
};
use crate::{AppError, Result};

/// Use cases related to robots and their cleaning sessions.
pub struct RobotService<R> {
    repo: R,
}

impl<R: RobotRepository> RobotService<R> {
    /// Create a service over the given repository.
    #[must_use]
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// List robots together with their active cleaning session.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the repository query fails.
    pub async fn list(&self, args: ListRobotsArgs) -> Result<Vec<Robot>> {
        self.repo.list(args).await
    }

    /// Start a new cleaning session for the given robot and area.
    ///
    /// A robot has at most one active session: when the robot already
    /// references one, it is force-closed with `started_at` as its end
    /// time before the new session is created. Both sessions are
    /// persisted in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` when `started_at` is unset,
    /// `AppError::NotFound` when the robot or area does not exist, and
    /// `AppError::Db` when persistence fails.
    pub async fn start_session(&self, args: StartSessionArgs) -> Result<CleaningSession> {
        if is_unset_timestamp(args.started_at) {
            return Err(AppError::Validation(format!(
                "did not get a valid started_at value: {}",
                args.started_at
            )));
        }

        let (robot, area) = self
            .repo
            .find_robot_and_area(&args.robot_id, &args.area_id)
            .await?;
        let Some(mut robot) = robot else {
            return Err(AppError::NotFound(format!(
                "could not find robot with id {}",
                args.robot_id
            )));
        };
        let Some(area) = area else {
            return Err(AppError::NotFound(format!(
                "could not find area with id {}",
                args.area_id
            )));
        };

        let mut to_save = Vec::with_capacity(2);
        if let Some(mut prev) = robot.current_session.take() {
            // End the ongoing session before starting a new one.
            prev.end(args.started_at);
            info!(robot_id = %robot.id, session_id = %prev.id, "force-closed previous session");
            to_save.push(prev);
        }

        let mut session = CleaningSession::new(&robot, &area, "", args.started_at)?;
        session.last_x = args.robot_x;
        session.last_y = args.robot_y;
        session
            .position_history
            .push(Position::new(args.robot_x, args.robot_y, args.started_at));
        to_save.push(session.clone());

        self.repo.save_sessions(&robot.id, &to_save).await?;

        info!(robot_id = %robot.id, session_id = %session.id, name = %session.name, "started cleaning session");
        Ok(session)
    }

    /// Update a robot's current cleaning session, called every time a
    /// robot moves. Can also close the session in the same update.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` when `reported_at` is unset,
    /// `AppError::NotFound` when the robot is unknown or has no active
    /// session, and `AppError::Db` when persistence fails.
    pub async fn update_session(&self, args: UpdateSessionArgs) -> Result<CleaningSession> {
        if is_unset_timestamp(args.reported_at) {
            return Err(AppError::Validation(format!(
                "did not get a valid reported_at value: {}",
                args.reported_at
            )));
        }

        let robots = self
            .repo
            .list(ListRobotsArgs {
                robot_id: Some(args.robot_id.clone()),
                name: None,
            })
            .await?;
        let Some(robot) = robots.into_iter().next() else {
            return Err(AppError::NotFound(format!(
                "could not find robot with id {}",
                args.robot_id
            )));
        };

        let Some(mut session) = robot.current_session else {
            return Err(AppError::NotFound(format!(
                "could not find any sessions for robot {} id {}",
                robot.name, robot.id
            )));
        };
        if !session.is_active {
            return Err(AppError::NotFound(format!(
                "could not find an active session for robot {} id {}",
                robot.name, robot.id
            )));
        }

        session.last_x = args.robot_x;
        session.last_y = args.robot_y;
        session.last_reported_at = Some(args.reported_at);
        let registered_pass = session.area.record_visit(args.robot_x, args.robot_y);
        if !registered_pass {
            // Either the robot is dwelling inside a square it already
            // entered, or the report fell outside the whole grid.
            debug!(x = args.robot_x, y = args.robot_y, "report registered no pass");
        }
        session
            .position_history
            .push(Position::new(args.robot_x, args.robot_y, args.reported_at));

        if args.end_session {
            session.end(args.reported_at);
        }

        self.repo
            .save_sessions(&robot.id, std::slice::from_ref(&session))
            .await?;

        info!(
            robot_id = %robot.id,
            session_id = %session.id,
            completion = %session.area.completion(),
            ended = args.end_session,
            "updated cleaning session"
        );
        Ok(session)
    }

    /// End an active session for a given robot.
    ///
    /// Equivalent to [`Self::update_session`] with `end_session` set, so
    /// the closing position report still lands in the grid and history.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::update_session`].
    pub async fn end_session(&self, mut args: UpdateSessionArgs) -> Result<CleaningSession> {
        args.end_session = true;
        self.update_session(args).await
    }

    /// All historical cleaning sessions and position history for a robot.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` when the robot does not exist.
    pub async fn history(&self, robot_id: &str, max: u32) -> Result<RobotHistory> {
        self.repo.history(robot_id, max).await
    }
}
