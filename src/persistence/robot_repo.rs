//! Robot repository backed by `SQLite`.
//!
//! Sessions are stored one row each; the coverage grid and position
//! history travel as JSON documents since they are only ever read and
//! written whole.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use crate::models::{Area, CleaningSession, Robot, RobotHistory};
use crate::service::{ListRobotsArgs, RobotRepository};
use crate::{AppError, Result};

use super::area_repo::area_from_row;

const SESSION_COLUMNS: &str = "id, name, is_active, started_at, ended_at, last_x, last_y, \
     last_reported_at, duration_sec, coverage, position_history, created_at";

/// Repository wrapper around `SQLite` for robots and their sessions.
#[derive(Clone)]
pub struct SqliteRobotRepository {
    pool: SqlitePool,
}

impl SqliteRobotRepository {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new robot record. Used by seeding and tests; robots are
    /// immutable once created.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the insert fails.
    pub async fn insert(&self, robot: &Robot) -> Result<()> {
        sqlx::query("INSERT INTO robot (id, name, size, created_at) VALUES (?, ?, ?, ?)")
            .bind(&robot.id)
            .bind(&robot.name)
            .bind(robot.size)
            .bind(robot.created_at.to_rfc3339())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn active_session(&self, robot_id: &str) -> Result<Option<CleaningSession>> {
        let sql = format!(
            "SELECT {SESSION_COLUMNS} FROM cleaning_session \
             WHERE robot_id = ? AND is_active = 1 \
             ORDER BY created_at DESC LIMIT 1"
        );
        let row = sqlx::query(&sql)
            .bind(robot_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(session_from_row).transpose()
    }

    async fn robot_row(&self, robot_id: &str) -> Result<Option<Robot>> {
        let row = sqlx::query("SELECT id, name, size, created_at FROM robot WHERE id = ?")
            .bind(robot_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(robot_from_row).transpose()
    }
}

#[async_trait]
impl RobotRepository for SqliteRobotRepository {
    async fn list(&self, args: ListRobotsArgs) -> Result<Vec<Robot>> {
        let mut qb: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new("SELECT id, name, size, created_at FROM robot WHERE 1 = 1");
        if let Some(robot_id) = &args.robot_id {
            qb.push(" AND id = ").push_bind(robot_id);
        }
        if let Some(name) = &args.name {
            qb.push(" AND name = ").push_bind(name);
        }
        qb.push(" ORDER BY created_at");

        let rows = qb.build().fetch_all(&self.pool).await?;
        let mut robots = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut robot = robot_from_row(row)?;
            robot.current_session = self.active_session(&robot.id).await?;
            robots.push(robot);
        }
        Ok(robots)
    }

    async fn find_robot_and_area(
        &self,
        robot_id: &str,
        area_id: &str,
    ) -> Result<(Option<Robot>, Option<Area>)> {
        let mut robot = self.robot_row(robot_id).await?;
        if let Some(r) = &mut robot {
            r.current_session = self.active_session(robot_id).await?;
        }

        let area_row = sqlx::query(
            "SELECT id, name, size_x, size_y, passes_needed, created_at FROM area WHERE id = ?",
        )
        .bind(area_id)
        .fetch_optional(&self.pool)
        .await?;
        let area = area_row.as_ref().map(area_from_row).transpose()?;

        Ok((robot, area))
    }

    async fn history(&self, robot_id: &str, max: u32) -> Result<RobotHistory> {
        let Some(robot) = self.robot_row(robot_id).await? else {
            return Err(AppError::NotFound(format!(
                "could not find robot with id {robot_id}"
            )));
        };

        let sql = format!(
            "SELECT {SESSION_COLUMNS} FROM cleaning_session \
             WHERE robot_id = ? \
             ORDER BY started_at DESC LIMIT ?"
        );
        let rows = sqlx::query(&sql)
            .bind(robot_id)
            .bind(i64::from(max))
            .fetch_all(&self.pool)
            .await?;
        let sessions = rows
            .iter()
            .map(session_from_row)
            .collect::<Result<Vec<_>>>()?;

        Ok(RobotHistory { robot, sessions })
    }

    async fn save_sessions(&self, robot_id: &str, sessions: &[CleaningSession]) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for session in sessions {
            let coverage = serde_json::to_string(&session.area)?;
            let history = serde_json::to_string(&session.position_history)?;
            sqlx::query(
                "INSERT INTO cleaning_session \
                 (id, robot_id, name, is_active, started_at, ended_at, last_x, last_y, \
                  last_reported_at, duration_sec, coverage, position_history, created_at) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
                 ON CONFLICT(id) DO UPDATE SET \
                   is_active = excluded.is_active, \
                   ended_at = excluded.ended_at, \
                   last_x = excluded.last_x, \
                   last_y = excluded.last_y, \
                   last_reported_at = excluded.last_reported_at, \
                   duration_sec = excluded.duration_sec, \
                   coverage = excluded.coverage, \
                   position_history = excluded.position_history",
            )
            .bind(&session.id)
            .bind(robot_id)
            .bind(&session.name)
            .bind(session.is_active)
            .bind(session.started_at.to_rfc3339())
            .bind(session.ended_at.map(|ts| ts.to_rfc3339()))
            .bind(session.last_x)
            .bind(session.last_y)
            .bind(session.last_reported_at.map(|ts| ts.to_rfc3339()))
            .bind(session.duration_sec)
            .bind(coverage)
            .bind(history)
            .bind(session.created_at.to_rfc3339())
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}

pub(crate) fn parse_ts(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|err| AppError::Db(format!("stored timestamp corrupt: {err}")))
}

fn robot_from_row(row: &SqliteRow) -> Result<Robot> {
    Ok(Robot {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        size: row.try_get("size")?,
        current_session: None,
        created_at: parse_ts(row.try_get("created_at")?)?,
    })
}

fn session_from_row(row: &SqliteRow) -> Result<CleaningSession> {
    let coverage: String = row.try_get("coverage")?;
    let history: String = row.try_get("position_history")?;
    let ended_at: Option<String> = row.try_get("ended_at")?;
    let last_reported_at: Option<String> = row.try_get("last_reported_at")?;
    Ok(CleaningSession {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        area: serde_json::from_str(&coverage)?,
        is_active: row.try_get("is_active")?,
        started_at: parse_ts(row.try_get("started_at")?)?,
        ended_at: ended_at.as_deref().map(parse_ts).transpose()?,
        last_x: row.try_get("last_x")?,
        last_y: row.try_get("last_y")?,
        last_reported_at: last_reported_at.as_deref().map(parse_ts).transpose()?,
        position_history: serde_json::from_str(&history)?,
        duration_sec: row.try_get("duration_sec")?,
        created_at: parse_ts(row.try_get("created_at")?)?,
    })
}
