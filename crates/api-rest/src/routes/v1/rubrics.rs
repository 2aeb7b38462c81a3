//! Scoring rubric endpoints. Public.

use crate::{responses::ApiResponse, state::AppState};
use axum::{extract::Path, routing::get, Json, Router};
use scorecard_domain::{rubric, EventType, ScoringParameter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An event's rubric
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RubricResponse {
    pub event_type: String,
    pub parameters: Vec<ScoringParameter>,
    pub total_max_score: u32,
}

impl RubricResponse {
    fn for_event(event_type: &str) -> Self {
        Self {
            event_type: event_type.to_string(),
            parameters: rubric::schema_for(event_type).to_vec(),
            total_max_score: rubric::total_max_score(event_type),
        }
    }
}

/// Rubric routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rubrics", get(list_rubrics))
        .route("/rubrics/:event_type", get(get_rubric))
}

/// Every event's rubric
#[utoipa::path(
    get,
    path = "/rubrics",
    tag = "rubrics",
    responses(
        (status = 200, description = "Rubrics in leaderboard order", body = [RubricResponse])
    )
)]
async fn list_rubrics() -> Json<ApiResponse<Vec<RubricResponse>>> {
    let rubrics = EventType::ALL
        .iter()
        .map(|e| RubricResponse::for_event(e.as_str()))
        .collect();

    Json(ApiResponse::success(rubrics))
}

/// Rubric for one event
///
/// An unknown event has an empty rubric and a maximum of 0.
#[utoipa::path(
    get,
    path = "/rubrics/{event_type}",
    tag = "rubrics",
    params(
        ("event_type" = String, Path, description = "Event identifier, e.g. paper-presentation")
    ),
    responses(
        (status = 200, description = "Rubric", body = RubricResponse)
    )
)]
async fn get_rubric(Path(event_type): Path<String>) -> Json<ApiResponse<RubricResponse>> {
    Json(ApiResponse::success(RubricResponse::for_event(&event_type)))
}
