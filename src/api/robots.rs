//! Robot endpoints.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::models::{Robot, RobotHistory};

use super::{ApiContext, ApiError};

/// Query parameters for `GET /v1/robots`.
#[derive(Debug, Deserialize)]
pub struct ListRobotsQuery {
    /// Robot ID to filter on.
    pub robot_id: Option<String>,
    /// Robot name to filter on.
    pub name: Option<String>,
}

/// Response body for `GET /v1/robots`.
#[derive(Debug, Serialize)]
pub struct ListRobotsResponse {
    /// Always `true` on success.
    pub ok: bool,
    /// Robots with their active cleaning session attached.
    pub robots: Vec<Robot>,
}

/// List all robots and their active cleaning session.
pub async fn list(
    State(ctx): State<ApiContext>,
    Query(query): Query<ListRobotsQuery>,
) -> Result<Json<ListRobotsResponse>, ApiError> {
    let robots = ctx
        .robots
        .list(crate::service::ListRobotsArgs {
            robot_id: query.robot_id,
            name: query.name,
        })
        .await?;
    Ok(Json(ListRobotsResponse { ok: true, robots }))
}

/// Query parameters for `GET /v1/robots/{robot_id}/history`.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Return only the latest `max` cleaning sessions.
    pub max: Option<u32>,
}

/// Response body for `GET /v1/robots/{robot_id}/history`.
#[derive(Debug, Serialize)]
pub struct RobotHistoryResponse {
    /// Always `true` on success.
    pub ok: bool,
    /// Robot with its most recent cleaning sessions, newest first.
    pub robot: RobotHistory,
}

/// All historical cleaning sessions for a robot.
pub async fn history(
    State(ctx): State<ApiContext>,
    Path(robot_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<RobotHistoryResponse>, ApiError> {
    let max = query.max.unwrap_or(ctx.history_max);
    let robot = ctx.robots.history(&robot_id, max).await?;
    Ok(Json(RobotHistoryResponse { ok: true, robot }))
}
