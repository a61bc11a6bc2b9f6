//! HTTP query surface.
//!
//! Read-only endpoints over the lifecycle and area services; telemetry
//! never enters here. Domain errors map onto status codes and a stable
//! `{ ok, code, error }` body so API clients can branch on `code`.

pub mod areas;
pub mod robots;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::persistence::{SqliteAreaRepository, SqliteRobotRepository};
use crate::service::{AreaService, RobotService};
use crate::{AppError, Result};

/// Shared state for the API handlers.
#[derive(Clone)]
pub struct ApiContext {
    /// Robot lifecycle service.
    pub robots: Arc<RobotService<SqliteRobotRepository>>,
    /// Area listing service.
    pub areas: Arc<AreaService<SqliteAreaRepository>>,
    /// Default `max` for the history endpoint.
    pub history_max: u32,
}

/// Build the `/v1` router.
#[must_use]
pub fn router(ctx: ApiContext) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/robots", get(robots::list))
        .route("/v1/robots/{robot_id}/history", get(robots::history))
        .route("/v1/areas", get(areas::list))
        .with_state(ctx)
}

/// Serve the query API until cancellation.
///
/// # Errors
///
/// Returns `AppError::Io` if the server fails to bind.
pub async fn serve(port: u16, ctx: ApiContext, ct: CancellationToken) -> Result<()> {
    let bind = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|err| AppError::Io(format!("api server failed to bind {bind}: {err}")))?;
    info!(%bind, "api server ready");

    axum::serve(listener, router(ctx))
        .with_graceful_shutdown(ct.cancelled_owned())
        .await
        .map_err(|err| AppError::Io(format!("api server failed: {err}")))?;

    info!("api server stopped");
    Ok(())
}

/// Handler for `GET /health` — returns 200 OK with a plain-text body.
async fn health() -> &'static str {
    "ok"
}

/// Error response body sent to API clients.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always `false` for errors.
    pub ok: bool,
    /// Stable machine-readable error code.
    pub code: String,
    /// Human-readable error message.
    pub error: String,
}

/// Wrapper that maps [`AppError`] onto an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self.0 {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_failed"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "server_error"),
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(err = %self.0, "unhandled error in api handler");
        }
        let body = ErrorResponse {
            ok: false,
            code: code.into(),
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
