//! Access log.
//!
//! One span per request carrying the request id, so everything a handler
//! logs is attributed to it, and one summary event when the response leaves.

use super::request_id::RequestId;
use axum::{
    body::Body,
    http::{Request, Response},
    middleware::Next,
};
use std::time::Instant;
use tracing::{info, info_span, warn, Instrument};

pub async fn logging_middleware(req: Request<Body>, next: Next) -> Response<Body> {
    let request_id = req
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    async move {
        let started = Instant::now();
        let response = next.run(req).await;
        let status = response.status().as_u16();
        let elapsed_ms = started.elapsed().as_millis() as u64;

        if status >= 500 {
            warn!(status, elapsed_ms, "request failed");
        } else if status >= 400 {
            info!(status, elapsed_ms, "request rejected");
        } else {
            info!(status, elapsed_ms, "request served");
        }

        response
    }
    .instrument(span)
    .await
}
