//! Error types for the scorecard domain.
//!
//! This module defines the error hierarchy for domain operations, providing
//! structured error information with HTTP status codes and error codes for
//! API responses.

use crate::event::{EventType, UnknownEventType};
use crate::evaluation::InvalidRoundNumber;
use crate::identifiers::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Judge-related errors
    #[error("Judge error: {0}")]
    Judge(#[from] JudgeError),

    /// Team-related errors
    #[error("Team error: {0}")]
    Team(#[from] TeamError),

    /// Evaluation-related errors
    #[error("Evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),

    /// Authorization-related errors
    #[error("Authorization error: {0}")]
    Authorization(#[from] AuthorizationError),

    /// Validation-related errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the error code for this error
    ///
    /// Error codes are used in API responses for programmatic error handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Judge(_) => "JUDGE_ERROR",
            Self::Team(_) => "TEAM_ERROR",
            Self::Evaluation(_) => "EVALUATION_ERROR",
            Self::Authorization(_) => "AUTHORIZATION_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Authorization(AuthorizationError::InvalidCredentials) => 401,
            Self::Authorization(_) => 403,
            Self::Validation(_) => 400,
            Self::Judge(JudgeError::NotFound(_)) => 404,
            Self::Judge(JudgeError::DuplicateEmail(_)) => 409,
            Self::Judge(JudgeError::Inactive) => 403,
            Self::Team(TeamError::NotFound(_)) => 404,
            Self::Evaluation(EvaluationError::NotAssigned(_)) => 403,
            Self::Internal(_) => 500,
            _ => 400,
        }
    }
}

/// Judge-specific errors
#[derive(Debug, thiserror::Error)]
pub enum JudgeError {
    #[error("Judge not found: {0}")]
    NotFound(JudgeId),

    #[error("A judge with email {0} already exists")]
    DuplicateEmail(String),

    #[error("At least one valid event must be assigned")]
    NoAssignedEvents,

    #[error("Judge account is deactivated")]
    Inactive,
}

/// Team-specific errors
#[derive(Debug, thiserror::Error)]
pub enum TeamError {
    #[error("Team not found: {0}")]
    NotFound(TeamId),

    #[error("A team needs at least one member")]
    NoMembers,
}

/// Errors raised while recording a judge's scores
#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    #[error("Judge is not assigned to {0}")]
    NotAssigned(EventType),

    #[error(transparent)]
    InvalidRound(#[from] InvalidRoundNumber),

    #[error("Round {0} submitted more than once")]
    DuplicateRound(u8),

    #[error("Question {question} is not part of the {event} rubric")]
    UnknownQuestion { event: EventType, question: u32 },

    #[error("Question {0} scored more than once in the same round")]
    DuplicateQuestion(u32),

    #[error("Score {score} for question {question} exceeds maximum of {max}")]
    ScoreOutOfRange { question: u32, score: u32, max: u32 },
}

/// Authorization errors
#[derive(Debug, thiserror::Error)]
pub enum AuthorizationError {
    /// Authentication required
    #[error("Authentication required")]
    AuthenticationRequired,

    /// Invalid credentials
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Token expired
    #[error("Token expired")]
    TokenExpired,

    /// Insufficient permissions for action
    #[error("Insufficient permissions for action: {action}")]
    InsufficientPermissions { action: String },
}

/// Validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// Field validation failed
    #[error("Field validation failed: {field} - {message}")]
    FieldValidation { field: String, message: String },

    /// Multiple validation errors
    #[error("Multiple validation errors: {0:?}")]
    Multiple(Vec<String>),

    #[error(transparent)]
    UnknownEvent(#[from] UnknownEventType),
}

/// Standardized API error response
///
/// This structure is returned in API responses to provide
/// consistent error information to clients.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error details
    pub error: ErrorDetail,

    /// Unique request identifier for tracing
    pub request_id: String,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

/// Detailed error information
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error details (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            error: ErrorDetail {
                code: error.error_code().to_string(),
                message: error.to_string(),
                details: None,
            },
            request_id: String::new(), // Set by middleware
            timestamp: Utc::now(),
        }
    }
}

/// Application-wide result type
pub type AppResult<T> = Result<T, AppError>;

pub type EvaluationResult<T> = Result<T, EvaluationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = AppError::Team(TeamError::NotFound(TeamId::new()));
        assert_eq!(err.error_code(), "TEAM_ERROR");
        assert_eq!(err.http_status(), 404);

        let err = AppError::Authorization(AuthorizationError::AuthenticationRequired);
        assert_eq!(err.error_code(), "AUTHORIZATION_ERROR");
        assert_eq!(err.http_status(), 403);

        let err = AppError::Judge(JudgeError::DuplicateEmail("a@b.c".to_string()));
        assert_eq!(err.http_status(), 409);
    }

    #[test]
    fn test_score_error_message() {
        let err = EvaluationError::ScoreOutOfRange {
            question: 2,
            score: 30,
            max: 25,
        };
        assert_eq!(err.to_string(), "Score 30 for question 2 exceeds maximum of 25");
    }

    #[test]
    fn test_error_response_serialization() {
        let err = AppError::Evaluation(EvaluationError::NotAssigned(EventType::StartupExpo));
        let response = ErrorResponse::from(err);

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("EVALUATION_ERROR"));
        assert!(json.contains("startup-expo"));
    }
}
