//! Leaderboard endpoints.

use crate::{
    error::ApiResult,
    extractors::AuthenticatedUser,
    responses::ApiResponse,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use indexmap::IndexMap;
use scorecard_application::scoring::LeaderboardEntry;
use scorecard_domain::EventType;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Leaderboard entry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardEntryResponse {
    pub rank: u32,
    pub team_id: Uuid,
    pub team_name: String,
    pub total_members: u32,
    pub round1_marks: u64,
    pub round2_marks: u64,
    pub total_marks: u64,
    pub evaluation_count: u32,
}

impl From<LeaderboardEntry> for LeaderboardEntryResponse {
    fn from(entry: LeaderboardEntry) -> Self {
        Self {
            rank: entry.rank,
            team_id: entry.team_id.into_uuid(),
            team_name: entry.team_name,
            total_members: entry.total_members,
            round1_marks: entry.round1_marks,
            round2_marks: entry.round2_marks,
            total_marks: entry.total_marks,
            evaluation_count: entry.evaluation_count,
        }
    }
}

/// Leaderboard routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/leaderboards", get(all_leaderboards))
        .route("/leaderboards/:event", get(event_leaderboard))
}

fn entries(board: Vec<LeaderboardEntry>) -> Vec<LeaderboardEntryResponse> {
    board.into_iter().map(Into::into).collect()
}

/// Every event's leaderboard
///
/// Keyed by event identifier; every event is present, possibly with an
/// empty board.
#[utoipa::path(
    get,
    path = "/leaderboards",
    tag = "leaderboards",
    responses(
        (status = 200, description = "Leaderboards by event"),
        (status = 403, description = "Admin only"),
    ),
    security(("bearer_auth" = []))
)]
async fn all_leaderboards(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<ApiResponse<IndexMap<String, Vec<LeaderboardEntryResponse>>>>> {
    let boards = state.leaderboard_service.all(&user.context()).await?;

    let boards = boards
        .into_iter()
        .map(|(event, board)| (event.as_str().to_string(), entries(board)))
        .collect();

    Ok(Json(ApiResponse::success(boards)))
}

/// Leaderboard for one event
#[utoipa::path(
    get,
    path = "/leaderboards/{event}",
    tag = "leaderboards",
    params(("event" = String, Path, description = "Event identifier")),
    responses(
        (status = 200, description = "Ranked teams", body = [LeaderboardEntryResponse]),
        (status = 400, description = "Unknown event"),
        (status = 403, description = "Admin only"),
    ),
    security(("bearer_auth" = []))
)]
async fn event_leaderboard(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(event): Path<String>,
) -> ApiResult<Json<ApiResponse<Vec<LeaderboardEntryResponse>>>> {
    let event: EventType = event.parse()?;
    let board = state
        .leaderboard_service
        .for_event(&user.context(), event)
        .await?;

    Ok(Json(ApiResponse::success(entries(board))))
}
