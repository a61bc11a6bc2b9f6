//! Area endpoints.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::models::Area;

use super::{ApiContext, ApiError};

/// Response body for `GET /v1/areas`.
#[derive(Debug, Serialize)]
pub struct ListAreasResponse {
    /// Always `true` on success.
    pub ok: bool,
    /// All known cleaning areas.
    pub areas: Vec<Area>,
}

/// List all cleaning areas.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<ListAreasResponse>, ApiError> {
    let areas = ctx.areas.list().await?;
    Ok(Json(ListAreasResponse { ok: true, areas }))
}
