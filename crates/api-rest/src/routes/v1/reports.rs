//! Team analytics and the downloadable evaluation report.

use super::parse_uuid;
use crate::{
    error::ApiResult,
    extractors::AuthenticatedUser,
    responses::{ApiResponse, PdfAttachment},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use scorecard_application::TeamAnalytics;
use scorecard_domain::TeamId;
use tracing::info;

/// Report routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/teams/:id/analytics", get(team_analytics))
        .route("/teams/:id/report", get(team_report))
}

/// Aggregated scores for a team
///
/// Per-question, per-judge scores for both rounds with averages, judge
/// totals, remarks and the maximum possible marks.
#[utoipa::path(
    get,
    path = "/teams/{id}/analytics",
    tag = "reports",
    params(("id" = String, Path, description = "Team ID")),
    responses(
        (status = 200, description = "Team analytics"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Team not found"),
    ),
    security(("bearer_auth" = []))
)]
async fn team_analytics(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<TeamAnalytics>>> {
    let id = TeamId::from_uuid(parse_uuid(&id, "team")?);
    let analytics = state
        .analytics_service
        .team_analytics(&user.context(), id)
        .await?;

    Ok(Json(ApiResponse::success(analytics)))
}

/// Evaluation report PDF
#[utoipa::path(
    get,
    path = "/teams/{id}/report",
    tag = "reports",
    params(("id" = String, Path, description = "Team ID")),
    responses(
        (status = 200, description = "PDF attachment named <TeamName>_Evaluation_Report.pdf"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Team not found"),
    ),
    security(("bearer_auth" = []))
)]
async fn team_report(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<PdfAttachment> {
    let id = TeamId::from_uuid(parse_uuid(&id, "team")?);
    let report = state
        .analytics_service
        .team_report(&user.context(), id)
        .await?;

    info!(
        team_id = %id,
        file_name = %report.file_name,
        bytes = report.bytes.len(),
        "Report generated"
    );

    Ok(PdfAttachment {
        file_name: report.file_name,
        bytes: report.bytes,
    })
}
