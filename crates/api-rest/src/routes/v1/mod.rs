//! API v1 routes.

use crate::{error::ApiError, state::AppState};
use axum::Router;
use uuid::Uuid;

pub mod auth;
pub mod evaluations;
pub mod judges;
pub mod leaderboards;
pub mod reports;
pub mod rubrics;
pub mod teams;

/// Create all v1 API routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::routes())
        .merge(judges::routes())
        .merge(teams::routes())
        .merge(evaluations::routes())
        .merge(rubrics::routes())
        .merge(leaderboards::routes())
        .merge(reports::routes())
}

/// Parse a path segment as a UUID
fn parse_uuid(raw: &str, what: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest(format!("Invalid {} id: {}", what, raw)))
}
