//! Judge management endpoints.

use super::parse_uuid;
use crate::{
    error::ApiResult,
    extractors::{AuthenticatedUser, ValidatedJson},
    responses::{ApiResponse, Created},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::{get, patch},
    Json, Router,
};
use scorecard_application::{
    services::JudgeDto,
    validation::{CreateJudgeRequest, UpdateJudgeRequest},
};
use scorecard_domain::JudgeId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Judge as returned by the API. Never includes the password hash.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct JudgeResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub assigned_events: Vec<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<JudgeDto> for JudgeResponse {
    fn from(dto: JudgeDto) -> Self {
        Self {
            id: dto.id.into_uuid(),
            name: dto.name,
            email: dto.email,
            assigned_events: dto
                .assigned_events
                .iter()
                .map(|e| e.as_str().to_string())
                .collect(),
            is_active: dto.is_active,
            created_at: dto.created_at.to_rfc3339(),
            updated_at: dto.updated_at.to_rfc3339(),
        }
    }
}

/// Create judge request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateJudgeApiRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email(message = "must be a valid email"))]
    pub email: String,

    #[validate(length(min = 6, max = 128, message = "must be at least 6 characters"))]
    pub password: String,

    /// Event identifiers, e.g. `paper-presentation`
    #[validate(length(min = 1, message = "at least one event must be assigned"))]
    pub assigned_events: Vec<String>,
}

/// Update judge request; omitted fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateJudgeApiRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(email(message = "must be a valid email"))]
    pub email: Option<String>,

    #[validate(length(min = 6, max = 128, message = "must be at least 6 characters"))]
    pub password: Option<String>,

    #[validate(length(min = 1, message = "at least one event must be assigned"))]
    pub assigned_events: Option<Vec<String>>,
}

/// Activate or deactivate a judge
#[derive(Debug, Deserialize, ToSchema)]
pub struct JudgeStatusRequest {
    pub is_active: bool,
}

/// Judge routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/judges", get(list_judges).post(create_judge))
        .route("/judges/me", get(get_current_judge))
        .route("/judges/:id", get(get_judge).put(update_judge))
        .route("/judges/:id/status", patch(set_judge_status))
}

/// List judges
#[utoipa::path(
    get,
    path = "/judges",
    tag = "judges",
    responses(
        (status = 200, description = "All judges, by name", body = [JudgeResponse]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only"),
    ),
    security(("bearer_auth" = []))
)]
async fn list_judges(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<ApiResponse<Vec<JudgeResponse>>>> {
    let judges = state.judge_service.list(&user.context()).await?;

    Ok(Json(ApiResponse::success(
        judges.into_iter().map(Into::into).collect(),
    )))
}

/// Create judge
///
/// Create a judge account. The password is stored as an Argon2 hash.
#[utoipa::path(
    post,
    path = "/judges",
    tag = "judges",
    request_body = CreateJudgeApiRequest,
    responses(
        (status = 201, description = "Judge created", body = JudgeResponse),
        (status = 403, description = "Admin only"),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Invalid request"),
    ),
    security(("bearer_auth" = []))
)]
async fn create_judge(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(req): ValidatedJson<CreateJudgeApiRequest>,
) -> ApiResult<Created<JudgeResponse>> {
    let request = CreateJudgeRequest {
        name: req.name,
        email: req.email,
        password: req.password,
        assigned_events: req.assigned_events,
    };

    let judge = state.judge_service.create(&user.context(), request).await?;

    Ok(Created(judge.into()))
}

/// Current judge
#[utoipa::path(
    get,
    path = "/judges/me",
    tag = "judges",
    responses(
        (status = 200, description = "The calling judge", body = JudgeResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = []))
)]
async fn get_current_judge(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<ApiResponse<JudgeResponse>>> {
    let judge = state.judge_service.me(&user.context()).await?;

    Ok(Json(ApiResponse::success(judge.into())))
}

/// Get judge by ID
#[utoipa::path(
    get,
    path = "/judges/{id}",
    tag = "judges",
    params(("id" = String, Path, description = "Judge ID")),
    responses(
        (status = 200, description = "Judge", body = JudgeResponse),
        (status = 403, description = "Neither admin nor the judge"),
        (status = 404, description = "Judge not found"),
    ),
    security(("bearer_auth" = []))
)]
async fn get_judge(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<JudgeResponse>>> {
    let id = JudgeId::from_uuid(parse_uuid(&id, "judge")?);
    let judge = state.judge_service.get(&user.context(), id).await?;

    Ok(Json(ApiResponse::success(judge.into())))
}

/// Update judge
#[utoipa::path(
    put,
    path = "/judges/{id}",
    tag = "judges",
    params(("id" = String, Path, description = "Judge ID")),
    request_body = UpdateJudgeApiRequest,
    responses(
        (status = 200, description = "Judge updated", body = JudgeResponse),
        (status = 404, description = "Judge not found"),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Invalid request"),
    ),
    security(("bearer_auth" = []))
)]
async fn update_judge(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateJudgeApiRequest>,
) -> ApiResult<Json<ApiResponse<JudgeResponse>>> {
    let id = JudgeId::from_uuid(parse_uuid(&id, "judge")?);
    let request = UpdateJudgeRequest {
        name: req.name,
        email: req.email,
        password: req.password,
        assigned_events: req.assigned_events,
    };

    let judge = state
        .judge_service
        .update(&user.context(), id, request)
        .await?;

    Ok(Json(ApiResponse::success(judge.into())))
}

/// Activate or deactivate a judge
///
/// Judges are never deleted; a deactivated judge can neither log in nor
/// submit evaluations.
#[utoipa::path(
    patch,
    path = "/judges/{id}/status",
    tag = "judges",
    params(("id" = String, Path, description = "Judge ID")),
    request_body = JudgeStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = JudgeResponse),
        (status = 404, description = "Judge not found"),
    ),
    security(("bearer_auth" = []))
)]
async fn set_judge_status(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(req): Json<JudgeStatusRequest>,
) -> ApiResult<Json<ApiResponse<JudgeResponse>>> {
    let id = JudgeId::from_uuid(parse_uuid(&id, "judge")?);
    let judge = state
        .judge_service
        .set_active(&user.context(), id, req.is_active)
        .await?;

    Ok(Json(ApiResponse::success(judge.into())))
}
