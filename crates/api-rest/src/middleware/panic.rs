//! Panic recovery.

use crate::error::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

/// Turn a handler panic into a 500 response.
///
/// Installed through `tower_http::catch_panic::CatchPanicLayer::custom`.
pub fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };

    error!(details = %details, "Handler panicked");

    let body = ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred");

    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
