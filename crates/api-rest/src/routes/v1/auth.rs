//! Login endpoints.
//!
//! The administrator is a single account from configuration; judges log in
//! with the credentials the administrator created for them.

use super::judges::JudgeResponse;
use crate::{
    error::{ApiError, ApiResult},
    extractors::{Claims, Role, ValidatedJson},
    responses::ApiResponse,
    state::AppState,
};
use axum::{extract::State, routing::post, Json, Router};
use scorecard_application::ApplicationError;
use scorecard_domain::judge::normalize_email;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;
use validator::Validate;

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "must be a valid email"))]
    pub email: String,

    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

/// Issued token
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
    pub role: Role,
    pub expires_at: String,

    /// Set for judge logins
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judge: Option<JudgeResponse>,
}

/// Authentication routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/admin/login", post(admin_login))
        .route("/auth/judge/login", post(judge_login))
}

fn issue(state: &AppState, subject: String, role: Role) -> ApiResult<(String, String)> {
    let claims = Claims::new(subject, role, state.config.jwt_expiration_seconds);
    let token = claims.encode(state.jwt_secret())?;
    let expires_at = claims
        .expires_at()
        .map(|t| t.to_rfc3339())
        .unwrap_or_default();
    Ok((token, expires_at))
}

/// Administrator login
#[utoipa::path(
    post,
    path = "/auth/admin/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials"),
    )
)]
async fn admin_login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<ApiResponse<TokenResponse>>> {
    let admin_email = normalize_email(&state.config.admin_email);
    let email = normalize_email(&req.email);

    if email != admin_email || req.password != state.config.admin_password {
        warn!(email = %email, "Admin login rejected");
        return Err(ApiError::InvalidCredentials);
    }

    let (token, expires_at) = issue(&state, admin_email, Role::Admin)?;
    info!("Admin logged in");

    Ok(Json(ApiResponse::success(TokenResponse {
        token,
        role: Role::Admin,
        expires_at,
        judge: None,
    })))
}

/// Judge login
///
/// Email matching is case-insensitive. Deactivated judges are refused
/// with 403.
#[utoipa::path(
    post,
    path = "/auth/judge/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Judge account is deactivated"),
    )
)]
async fn judge_login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<ApiResponse<TokenResponse>>> {
    let judge = state
        .judge_service
        .authenticate(&req.email, &req.password)
        .await
        .map_err(|err| match err {
            ApplicationError::Unauthorized(_) => ApiError::InvalidCredentials,
            other => other.into(),
        })?;

    let (token, expires_at) = issue(&state, judge.id.to_string(), Role::Judge)?;
    info!(judge_id = %judge.id, "Judge logged in");

    Ok(Json(ApiResponse::success(TokenResponse {
        token,
        role: Role::Judge,
        expires_at,
        judge: Some(judge.into()),
    })))
}
