//! Configuration management for the application.
//!
//! Settings are layered with the `config` crate: built-in defaults, then
//! `config/default.toml`, then `config/{APP_ENV}.toml`, then `APP_`-prefixed
//! environment variables (`APP_AUTH__JWT_SECRET=...`).
//!
//! ## Example Configuration
//!
//! ```toml
//! [server]
//! port = 8080
//! rate_limit_per_minute = 120
//!
//! [auth]
//! admin_email = "admin@summit.local"
//!
//! [report]
//! title = "AI SUMMIT TEAM EVALUATION REPORT"
//!
//! [[report.signatories]]
//! name = "Dr. A. Example"
//! designation = "Head of Department"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (e.g., "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,

    /// Requests allowed per client per minute
    #[serde(default = "default_rate_limit")]
    pub rate_limit_per_minute: u32,

    /// Allowed CORS origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_true")]
    pub enable_swagger: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_seconds: default_request_timeout(),
            rate_limit_per_minute: default_rate_limit(),
            cors_origins: Vec::new(),
            enable_swagger: true,
        }
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// JWT secret key for signing tokens
    #[serde(default)]
    pub jwt_secret: String,

    /// Token expiry duration in seconds
    #[serde(default = "default_token_expiry")]
    pub token_expiry_seconds: u64,

    /// The single administrator account
    #[serde(default = "default_admin_email")]
    pub admin_email: String,

    #[serde(default)]
    pub admin_password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_expiry_seconds: default_token_expiry(),
            admin_email: default_admin_email(),
            admin_password: String::new(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Service name for tracing
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Enable JSON logging format
    #[serde(default)]
    pub json_logging: bool,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            json_logging: false,
            log_level: default_log_level(),
        }
    }
}

/// A name and designation printed in the report's signature block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signatory {
    pub name: String,
    #[serde(default)]
    pub designation: String,
}

impl Signatory {
    pub fn new(name: impl Into<String>, designation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            designation: designation.into(),
        }
    }
}

/// Evaluation report settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_report_title")]
    pub title: String,

    #[serde(default = "default_signatories")]
    pub signatories: Vec<Signatory>,

    /// Printed below the signature block
    #[serde(default)]
    pub footer: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: default_report_title(),
            signatories: default_signatories(),
            footer: None,
        }
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_rate_limit() -> u32 {
    120
}

fn default_true() -> bool {
    true
}

fn default_token_expiry() -> u64 {
    86400 // 24 hours, one competition day
}

fn default_admin_email() -> String {
    "admin@scorecard.local".to_string()
}

fn default_service_name() -> String {
    "scorecard".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_report_title() -> String {
    "TEAM EVALUATION REPORT".to_string()
}

fn default_signatories() -> Vec<Signatory> {
    vec![
        Signatory::new("Convener", "Organizing Committee"),
        Signatory::new("Head of Department", "Host Department"),
        Signatory::new("Faculty Coordinator", "Event Coordination"),
    ]
}

impl AppConfig {
    /// Load configuration from environment variables and configuration files.
    ///
    /// The configuration is loaded in the following order (later sources override earlier ones):
    /// 1. Default values
    /// 2. config/default.toml (if exists)
    /// 3. config/{environment}.toml (if exists, where environment is from APP_ENV)
    /// 4. Environment variables (prefixed with APP_)
    pub fn load() -> Result<Self> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            // Example: APP_SERVER__PORT=3000
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be greater than 0");
        }

        if self.server.request_timeout_seconds == 0 {
            anyhow::bail!("Request timeout must be greater than 0");
        }

        if self.auth.jwt_secret.len() < 32 {
            anyhow::bail!("JWT secret must be at least 32 characters long");
        }

        if self.auth.token_expiry_seconds == 0 {
            anyhow::bail!("Token expiry must be greater than 0");
        }

        if self.auth.admin_email.trim().is_empty() {
            anyhow::bail!("Admin email is required");
        }

        if self.auth.admin_password.len() < 8 {
            anyhow::bail!("Admin password must be at least 8 characters long");
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.telemetry.log_level.as_str()) {
            anyhow::bail!(
                "Invalid log level '{}'. Must be one of: {}",
                self.telemetry.log_level,
                valid_log_levels.join(", ")
            );
        }

        if self.report.title.trim().is_empty() {
            anyhow::bail!("Report title must not be empty");
        }

        Ok(())
    }

    /// Get the token expiry as a Duration
    pub fn token_expiry(&self) -> Duration {
        Duration::from_secs(self.auth.token_expiry_seconds)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_seconds)
    }

    /// Create a development configuration with sensible defaults
    pub fn development() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                ..ServerConfig::default()
            },
            auth: AuthConfig {
                jwt_secret: "development-secret-key-minimum-32-chars".to_string(),
                admin_password: "admin-password".to_string(),
                ..AuthConfig::default()
            },
            telemetry: TelemetryConfig {
                log_level: "debug".to_string(),
                ..TelemetryConfig::default()
            },
            report: ReportConfig::default(),
        }
    }
}
