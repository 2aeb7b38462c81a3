//! Application builder.
//!
//! Assembles routes, middleware and state into an Axum router.

use crate::{
    config::ApiConfig,
    middleware::{
        handle_panic, logging_middleware, request_id_middleware, RateLimitConfig, RateLimitLayer,
    },
    routes,
    state::AppState,
};
use axum::{http::HeaderValue, middleware, Router};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

/// Create the main application router with in-memory state
pub fn create_app(config: ApiConfig) -> Router {
    let state = AppState::new(config);
    create_app_with_state(state)
}

/// Create the router around an existing state
pub fn create_app_with_state(state: AppState) -> Router {
    let config = state.config.clone();

    let cors = build_cors_layer(&config);
    let rate_limit =
        RateLimitLayer::with_config(RateLimitConfig::per_minute(config.rate_limit_per_minute));

    let mut app = Router::new()
        // Health check routes (no auth required)
        .merge(routes::health::routes())
        // API v1 routes
        .nest("/api/v1", routes::v1::routes())
        .with_state(state);

    if config.enable_swagger {
        app = app.merge(swagger_ui());
    }

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(CompressionLayer::new())
            .layer(cors)
            .layer(TimeoutLayer::new(config.request_timeout()))
            .layer(rate_limit)
            .layer(middleware::from_fn(request_id_middleware))
            .layer(middleware::from_fn(logging_middleware)),
    )
}

/// Build CORS layer from configuration
fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.cors_allowed_origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Scorecard API",
        version = "1.0.0",
        description = "Judging, leaderboards and evaluation reports for team competitions",
        license(name = "MIT"),
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    components(schemas(
        routes::v1::auth::LoginRequest,
        routes::v1::auth::TokenResponse,
        crate::extractors::Role,
        routes::v1::judges::JudgeResponse,
        routes::v1::judges::CreateJudgeApiRequest,
        routes::v1::judges::UpdateJudgeApiRequest,
        routes::v1::judges::JudgeStatusRequest,
        routes::v1::teams::TeamResponse,
        routes::v1::teams::MemberResponse,
        routes::v1::teams::CreateTeamApiRequest,
        routes::v1::teams::MemberInput,
        routes::v1::evaluations::EvaluationResponse,
        routes::v1::evaluations::SubmitEvaluationApiRequest,
        routes::v1::evaluations::RoundDto,
        routes::v1::evaluations::QuestionScoreDto,
        routes::v1::rubrics::RubricResponse,
        scorecard_domain::ScoringParameter,
        routes::v1::leaderboards::LeaderboardEntryResponse,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Admin and judge login"),
        (name = "judges", description = "Judge accounts"),
        (name = "teams", description = "Team registration"),
        (name = "evaluations", description = "Score submission"),
        (name = "rubrics", description = "Scoring rubrics"),
        (name = "leaderboards", description = "Leaderboards per event"),
        (name = "reports", description = "Team analytics and PDF reports"),
    )
)]
struct ApiDoc;

/// Swagger UI routes
fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_declares_bearer_auth() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
        assert!(components.schemas.contains_key("JudgeResponse"));
        assert!(components.schemas.contains_key("ScoringParameter"));
    }
}
