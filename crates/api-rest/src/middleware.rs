//! HTTP middleware components.
//!
//! This module provides middleware for request/response processing including:
//! - Request logging and tracing
//! - Panic recovery
//! - Rate limiting
//! - Request ID propagation

pub mod logging;
pub mod panic;
pub mod rate_limit;
pub mod request_id;

pub use logging::logging_middleware;
pub use panic::handle_panic;
pub use rate_limit::{RateLimitConfig, RateLimitLayer};
pub use request_id::request_id_middleware;
