//! Shared infrastructure for the scorecard services.
//!
//! - Configuration management
//! - Telemetry and structured logging
//! - Password hashing

pub mod config;
pub mod crypto;
pub mod telemetry;

// Re-export commonly used types
pub use config::{AppConfig, AuthConfig, ReportConfig, ServerConfig, Signatory, TelemetryConfig};
pub use crypto::{hash_password, verify_password};
pub use telemetry::{init_from_config, init_tracing};

/// Common error type used throughout the crate
pub type Result<T> = std::result::Result<T, anyhow::Error>;
