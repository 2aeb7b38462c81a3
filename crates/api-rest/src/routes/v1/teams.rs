//! Team registration endpoints.

use super::parse_uuid;
use crate::{
    error::ApiResult,
    extractors::{AuthenticatedUser, ValidatedJson},
    responses::{ApiResponse, Created},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use scorecard_application::validation::{CreateTeamRequest, TeamMemberInput};
use scorecard_domain::{EventType, Team, TeamId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Team member
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MemberResponse {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Team as returned by the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TeamResponse {
    pub id: Uuid,
    pub name: String,
    pub event_type: String,
    pub event_label: String,
    pub members: Vec<MemberResponse>,
    pub total_members: u32,
    pub created_at: String,
}

impl From<Team> for TeamResponse {
    fn from(team: Team) -> Self {
        Self {
            id: team.id.into_uuid(),
            name: team.name,
            event_type: team.event_type.as_str().to_string(),
            event_label: team.event_type.label().to_string(),
            members: team
                .members
                .into_iter()
                .map(|m| MemberResponse {
                    name: m.name,
                    email: m.email,
                    role: m.role,
                })
                .collect(),
            total_members: team.total_members,
            created_at: team.created_at.to_rfc3339(),
        }
    }
}

/// Team member input
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MemberInput {
    pub name: String,
    pub email: Option<String>,
    pub role: Option<String>,
}

/// Register team request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTeamApiRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: String,

    /// Event identifier, e.g. `startup-expo`
    pub event_type: String,

    #[validate(length(min = 1, message = "a team needs at least one member"))]
    pub members: Vec<MemberInput>,
}

/// Team list filter
#[derive(Debug, Deserialize)]
pub struct TeamListQuery {
    pub event: Option<String>,
}

/// Team routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/teams", get(list_teams).post(create_team))
        .route("/teams/:id", get(get_team))
}

/// List teams
#[utoipa::path(
    get,
    path = "/teams",
    tag = "teams",
    params(("event" = Option<String>, Query, description = "Only teams in this event")),
    responses(
        (status = 200, description = "Teams, by name", body = [TeamResponse]),
        (status = 400, description = "Unknown event"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = []))
)]
async fn list_teams(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<TeamListQuery>,
) -> ApiResult<Json<ApiResponse<Vec<TeamResponse>>>> {
    let event = query
        .event
        .as_deref()
        .map(str::parse::<EventType>)
        .transpose()?;

    let teams = state.team_service.list(&user.context(), event).await?;

    Ok(Json(ApiResponse::success(
        teams.into_iter().map(Into::into).collect(),
    )))
}

/// Register team
#[utoipa::path(
    post,
    path = "/teams",
    tag = "teams",
    request_body = CreateTeamApiRequest,
    responses(
        (status = 201, description = "Team registered", body = TeamResponse),
        (status = 403, description = "Admin only"),
        (status = 422, description = "Invalid request"),
    ),
    security(("bearer_auth" = []))
)]
async fn create_team(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(req): ValidatedJson<CreateTeamApiRequest>,
) -> ApiResult<Created<TeamResponse>> {
    let request = CreateTeamRequest {
        name: req.name,
        event_type: req.event_type,
        members: req
            .members
            .into_iter()
            .map(|m| TeamMemberInput {
                name: m.name,
                email: m.email,
                role: m.role,
            })
            .collect(),
    };

    let team = state.team_service.create(&user.context(), request).await?;

    Ok(Created(team.into()))
}

/// Get team by ID
#[utoipa::path(
    get,
    path = "/teams/{id}",
    tag = "teams",
    params(("id" = String, Path, description = "Team ID")),
    responses(
        (status = 200, description = "Team", body = TeamResponse),
        (status = 404, description = "Team not found"),
    ),
    security(("bearer_auth" = []))
)]
async fn get_team(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<TeamResponse>>> {
    let id = TeamId::from_uuid(parse_uuid(&id, "team")?);
    let team = state.team_service.get(&user.context(), id).await?;

    Ok(Json(ApiResponse::success(team.into())))
}
