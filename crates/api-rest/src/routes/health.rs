//! Liveness and readiness probes. Unauthenticated, not versioned.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use scorecard_domain::EventType;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Liveness probe body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `healthy` while the process serves requests
    pub status: String,
    pub version: String,
}

/// Readiness probe body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub storage: String,
    /// Events whose rubric is loaded
    pub events: Vec<String>,
    pub rate_limit_per_minute: u32,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Process is up", body = HealthResponse))
)]
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Ready once every event has a non-empty rubric.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Ready to judge", body = ReadinessResponse),
        (status = 503, description = "A rubric is missing", body = ReadinessResponse),
    )
)]
async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let events: Vec<String> = EventType::ALL
        .iter()
        .filter(|e| e.total_max_score() > 0)
        .map(|e| e.as_str().to_string())
        .collect();
    let ready = events.len() == EventType::ALL.len();

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ReadinessResponse {
            ready,
            storage: "in-memory".to_string(),
            events,
            rate_limit_per_minute: state.config.rate_limit_per_minute,
        }),
    )
}
