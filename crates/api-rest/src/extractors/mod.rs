//! Custom Axum extractors.
//!
//! This module provides reusable extractors for authentication and
//! validated JSON payloads.

pub mod auth;
pub mod validated_json;

pub use auth::{AuthenticatedUser, Claims, Role};
pub use validated_json::ValidatedJson;
