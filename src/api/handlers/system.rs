//! System endpoints: health check and ingest statistics.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::domain::StatsSnapshot;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"healthy"` while the server answers.
    pub status: String,
    /// RFC 3339 server time.
    pub timestamp: String,
    /// Crate version.
    pub version: String,
}

/// Ingest statistics response.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
    /// `"shared"` or `"per_connection"`.
    pub output_mode: String,
    /// Whether the audio writer task is still running.
    pub sink_running: bool,
    /// Counter snapshot.
    #[serde(flatten)]
    pub counters: StatsSnapshot,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// `GET /stats` — Ingest counters.
#[utoipa::path(
    get,
    path = "/stats",
    tag = "System",
    summary = "Ingest statistics",
    description = "Returns connection, message and audio byte counters since startup.",
    responses(
        (status = 200, description = "Counter snapshot", body = StatsResponse),
    )
)]
pub async fn stats_handler(State(state): State<AppState>) -> impl IntoResponse {
    let ingest = &state.ingest;
    (
        StatusCode::OK,
        Json(StatsResponse {
            output_mode: ingest.layout().mode().to_string(),
            sink_running: !ingest.is_sink_closed(),
            counters: ingest.stats().snapshot(),
        }),
    )
}

/// System routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
}
