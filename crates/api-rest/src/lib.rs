//! Scorecard REST API
//!
//! Axum-based HTTP surface for the competition judging service: admin and
//! judge login, judge and team management, score submission, rubrics,
//! leaderboards and per-team PDF reports.
//!
//! ## Architecture
//!
//! - **app**: Router assembly and the middleware stack
//! - **routes**: HTTP handlers grouped by resource
//! - **middleware**: Request id, logging, rate limiting and panic recovery
//! - **extractors**: Bearer-token authentication and validated JSON bodies
//! - **responses**: Response envelopes and the PDF attachment
//! - **error**: Mapping of failures onto HTTP status codes
//! - **state**: Service wiring over in-memory storage
//!
//! ## Usage
//!
//! ```rust,no_run
//! use scorecard_api_rest::{create_app, ApiConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ApiConfig::load()?;
//!     let app = create_app(config);
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod responses;
pub mod routes;
pub mod state;

// Re-export commonly used types
pub use app::{create_app, create_app_with_state};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
