//! API configuration.

use scorecard_common::{AppConfig, ReportConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Server host to bind to
    pub host: String,

    /// Server port to bind to
    pub port: u16,

    /// JWT secret for token signing
    pub jwt_secret: String,

    /// JWT token expiration duration in seconds
    pub jwt_expiration_seconds: u64,

    /// CORS allowed origins
    pub cors_allowed_origins: Vec<String>,

    /// Request timeout in seconds
    pub request_timeout_seconds: u64,

    /// Rate limit: maximum requests per minute
    pub rate_limit_per_minute: u32,

    /// Enable OpenAPI documentation
    pub enable_swagger: bool,

    /// Administrator login email
    pub admin_email: String,

    /// Administrator login password
    pub admin_password: String,

    /// Evaluation report layout
    pub report: ReportConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from(&AppConfig::development())
    }
}

impl From<&AppConfig> for ApiConfig {
    fn from(config: &AppConfig) -> Self {
        let cors_allowed_origins = if config.server.cors_origins.is_empty() {
            vec!["*".to_string()]
        } else {
            config.server.cors_origins.clone()
        };

        Self {
            host: config.server.host.clone(),
            port: config.server.port,
            jwt_secret: config.auth.jwt_secret.clone(),
            jwt_expiration_seconds: config.auth.token_expiry_seconds,
            cors_allowed_origins,
            request_timeout_seconds: config.server.request_timeout_seconds,
            rate_limit_per_minute: config.server.rate_limit_per_minute,
            enable_swagger: config.server.enable_swagger,
            admin_email: config.auth.admin_email.clone(),
            admin_password: config.auth.admin_password.clone(),
            report: config.report.clone(),
        }
    }
}

impl ApiConfig {
    /// Load the layered application configuration
    pub fn load() -> anyhow::Result<Self> {
        Ok(Self::from(&AppConfig::load()?))
    }

    /// Get JWT expiration as Duration
    pub fn jwt_expiration(&self) -> Duration {
        Duration::from_secs(self.jwt_expiration_seconds)
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Get server address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
