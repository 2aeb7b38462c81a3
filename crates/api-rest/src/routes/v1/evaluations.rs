//! Evaluation endpoints.

use super::parse_uuid;
use crate::{
    error::ApiResult,
    extractors::{AuthenticatedUser, ValidatedJson},
    responses::{ApiResponse, Created},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use scorecard_application::validation::{RoundInput, SubmitEvaluationRequest};
use scorecard_domain::{Evaluation, QuestionScore, TeamId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// One question's score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct QuestionScoreDto {
    pub question_number: u32,
    pub score: u32,
}

/// A round of scores
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoundDto {
    /// 1 or 2
    pub round_number: u8,
    pub questions: Vec<QuestionScoreDto>,
    #[serde(default)]
    pub total_score: u32,
}

/// Evaluation as returned by the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EvaluationResponse {
    pub id: Uuid,
    pub team_id: Uuid,
    pub judge_id: Uuid,
    pub judge_name: String,
    pub event_type: String,
    pub rounds: Vec<RoundDto>,
    pub remarks: String,
    pub total_score: u32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Evaluation> for EvaluationResponse {
    fn from(evaluation: Evaluation) -> Self {
        Self {
            id: evaluation.id.into_uuid(),
            team_id: evaluation.team_id.into_uuid(),
            judge_id: evaluation.judge_id.into_uuid(),
            judge_name: evaluation.judge_name,
            event_type: evaluation.event_type.as_str().to_string(),
            rounds: evaluation
                .rounds
                .into_iter()
                .map(|r| RoundDto {
                    round_number: r.round_number.as_u8(),
                    questions: r
                        .questions
                        .iter()
                        .map(|q| QuestionScoreDto {
                            question_number: q.question_number,
                            score: q.score,
                        })
                        .collect(),
                    total_score: r.total_score,
                })
                .collect(),
            remarks: evaluation.remarks,
            total_score: evaluation.total_score,
            created_at: evaluation.created_at.to_rfc3339(),
            updated_at: evaluation.updated_at.to_rfc3339(),
        }
    }
}

/// Submit evaluation request
///
/// Replaces the judge's earlier evaluation of the same team, if any.
/// Round totals are computed by the server; a `total_score` sent by the
/// client is ignored.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitEvaluationApiRequest {
    pub team_id: String,

    #[validate(length(min = 1, max = 2, message = "one or two rounds are required"))]
    pub rounds: Vec<RoundDto>,

    #[validate(length(max = 2000))]
    pub remarks: Option<String>,
}

/// Evaluation routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/evaluations", post(submit_evaluation))
        .route("/evaluations/mine", get(list_my_evaluations))
        .route("/teams/:id/evaluations", get(list_team_evaluations))
}

/// Submit evaluation
#[utoipa::path(
    post,
    path = "/evaluations",
    tag = "evaluations",
    request_body = SubmitEvaluationApiRequest,
    responses(
        (status = 201, description = "Evaluation stored", body = EvaluationResponse),
        (status = 403, description = "Judge inactive or not assigned to the team's event"),
        (status = 404, description = "Team not found"),
        (status = 422, description = "Scores do not fit the rubric"),
    ),
    security(("bearer_auth" = []))
)]
async fn submit_evaluation(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(req): ValidatedJson<SubmitEvaluationApiRequest>,
) -> ApiResult<Created<EvaluationResponse>> {
    let request = SubmitEvaluationRequest {
        team_id: req.team_id,
        rounds: req
            .rounds
            .into_iter()
            .map(|r| RoundInput {
                round_number: r.round_number,
                questions: r
                    .questions
                    .into_iter()
                    .map(|q| QuestionScore::new(q.question_number, q.score))
                    .collect(),
            })
            .collect(),
        remarks: req.remarks,
    };

    let evaluation = state
        .evaluation_service
        .submit(&user.context(), request)
        .await?;

    Ok(Created(evaluation.into()))
}

/// The calling judge's evaluations
#[utoipa::path(
    get,
    path = "/evaluations/mine",
    tag = "evaluations",
    responses(
        (
            status = 200,
            description = "Evaluations written by the caller",
            body = [EvaluationResponse]
        ),
        (status = 403, description = "Judges only"),
    ),
    security(("bearer_auth" = []))
)]
async fn list_my_evaluations(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<ApiResponse<Vec<EvaluationResponse>>>> {
    let evaluations = state.evaluation_service.list_mine(&user.context()).await?;

    Ok(Json(ApiResponse::success(
        evaluations.into_iter().map(Into::into).collect(),
    )))
}

/// Evaluations of a team
#[utoipa::path(
    get,
    path = "/teams/{id}/evaluations",
    tag = "evaluations",
    params(("id" = String, Path, description = "Team ID")),
    responses(
        (
            status = 200,
            description = "Every judge's evaluation of the team",
            body = [EvaluationResponse]
        ),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Team not found"),
    ),
    security(("bearer_auth" = []))
)]
async fn list_team_evaluations(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Vec<EvaluationResponse>>>> {
    let id = TeamId::from_uuid(parse_uuid(&id, "team")?);
    let evaluations = state
        .evaluation_service
        .list_for_team(&user.context(), id)
        .await?;

    Ok(Json(ApiResponse::success(
        evaluations.into_iter().map(Into::into).collect(),
    )))
}
