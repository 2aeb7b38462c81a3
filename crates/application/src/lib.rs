//! Application layer for the competition scorecard
//!
//! This crate orchestrates domain logic and coordinates between layers.
//!
//! ## Modules
//!
//! - `services` - Business logic services (judges, teams, evaluations, leaderboards, analytics)
//! - `scoring` - Score aggregation across judges and rounds, and leaderboard ranking
//! - `report` - Evaluation report layout and PDF rendering
//! - `validation` - Input validation framework

pub mod report;
pub mod scoring;
pub mod services;
pub mod validation;

// Re-export commonly used types
pub use report::{ReportDocument, ReportError, ReportTable};
pub use scoring::{Average, ScoreCell, TeamAnalytics, TeamSnapshot};
pub use services::{EventPublisher, NoOpEventPublisher, ServiceContext, ServiceEvent};
pub use validation::{Validatable, ValidationResult, ValidationRules};

use scorecard_domain::errors::{
    AppError, AuthorizationError, EvaluationError, JudgeError, TeamError,
};
use thiserror::Error;

/// Application-level errors
#[derive(Error, Debug, Clone)]
pub enum ApplicationError {
    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Authentication required
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Permission denied
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Resource conflict (e.g., duplicate)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Get HTTP status code for this error
    pub fn http_status(&self) -> u16 {
        match self {
            ApplicationError::NotFound(_) => 404,
            ApplicationError::Unauthorized(_) => 401,
            ApplicationError::Forbidden(_) => 403,
            ApplicationError::InvalidInput(_) => 400,
            ApplicationError::ValidationFailed(_) => 422,
            ApplicationError::Conflict(_) => 409,
            ApplicationError::Internal(_) => 500,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            ApplicationError::NotFound(_) => "NOT_FOUND",
            ApplicationError::Unauthorized(_) => "UNAUTHORIZED",
            ApplicationError::Forbidden(_) => "FORBIDDEN",
            ApplicationError::InvalidInput(_) => "INVALID_INPUT",
            ApplicationError::ValidationFailed(_) => "VALIDATION_FAILED",
            ApplicationError::Conflict(_) => "CONFLICT",
            ApplicationError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<AppError> for ApplicationError {
    fn from(err: AppError) -> Self {
        let message = err.to_string();
        match err {
            AppError::Judge(JudgeError::NotFound(id)) => {
                Self::NotFound(format!("Judge not found: {}", id))
            }
            AppError::Team(TeamError::NotFound(id)) => {
                Self::NotFound(format!("Team not found: {}", id))
            }
            AppError::Judge(JudgeError::DuplicateEmail(_)) => Self::Conflict(message),
            AppError::Judge(JudgeError::Inactive) => Self::Forbidden(message),
            AppError::Evaluation(EvaluationError::NotAssigned(_)) => Self::Forbidden(message),
            AppError::Authorization(AuthorizationError::InvalidCredentials)
            | AppError::Authorization(AuthorizationError::AuthenticationRequired)
            | AppError::Authorization(AuthorizationError::TokenExpired) => {
                Self::Unauthorized(message)
            }
            AppError::Authorization(_) => Self::Forbidden(message),
            AppError::Internal(inner) => Self::Internal(inner),
            AppError::Judge(_)
            | AppError::Team(_)
            | AppError::Evaluation(_)
            | AppError::Validation(_) => Self::ValidationFailed(message),
        }
    }
}

macro_rules! from_domain_error {
    ($($err:ty),*) => {
        $(
            impl From<$err> for ApplicationError {
                fn from(err: $err) -> Self {
                    AppError::from(err).into()
                }
            }
        )*
    };
}

from_domain_error!(JudgeError, TeamError, EvaluationError, AuthorizationError);

impl From<ReportError> for ApplicationError {
    fn from(err: ReportError) -> Self {
        Self::Internal(err.to_string())
    }
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;
