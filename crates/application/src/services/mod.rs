//! Application Services
//!
//! Business logic orchestration layer that coordinates domain operations,
//! repository access, and cross-cutting concerns.

mod analytics;
mod evaluation;
mod judge;
mod leaderboard;
mod team;

pub use analytics::*;
pub use evaluation::*;
pub use judge::*;
pub use leaderboard::*;
pub use team::*;

use crate::ApplicationError;
use async_trait::async_trait;
use scorecard_domain::JudgeId;

/// Service context for request handling
#[derive(Debug, Clone)]
pub struct ServiceContext {
    /// The authenticated principal: a judge id, or the admin email
    pub user_id: Option<String>,
    /// Request correlation ID for tracing
    pub correlation_id: String,
    /// Whether the caller is the administrator
    pub is_admin: bool,
}

impl ServiceContext {
    pub fn anonymous(correlation_id: String) -> Self {
        Self {
            user_id: None,
            correlation_id,
            is_admin: false,
        }
    }

    pub fn authenticated(user_id: String, correlation_id: String) -> Self {
        Self {
            user_id: Some(user_id),
            correlation_id,
            is_admin: false,
        }
    }

    pub fn with_admin(mut self) -> Self {
        self.is_admin = true;
        self
    }

    pub fn require_authenticated(&self) -> Result<&str, ApplicationError> {
        self.user_id
            .as_deref()
            .ok_or_else(|| ApplicationError::Unauthorized("Authentication required".to_string()))
    }

    pub fn require_admin(&self) -> Result<(), ApplicationError> {
        if !self.is_admin {
            return Err(ApplicationError::Forbidden(
                "Admin privileges required".to_string(),
            ));
        }
        Ok(())
    }

    /// The calling judge's id. Admin tokens do not carry one.
    pub fn require_judge(&self) -> Result<JudgeId, ApplicationError> {
        let user_id = self.require_authenticated()?;
        if self.is_admin {
            return Err(ApplicationError::Forbidden(
                "Only judges can perform this action".to_string(),
            ));
        }
        user_id
            .parse()
            .map_err(|_| ApplicationError::Unauthorized("Invalid judge identity".to_string()))
    }
}

/// Service event for event-driven architecture
#[derive(Debug, Clone)]
pub enum ServiceEvent {
    // Judge events
    JudgeCreated { judge_id: String },
    JudgeUpdated { judge_id: String },
    JudgeStatusChanged { judge_id: String, is_active: bool },

    // Team events
    TeamRegistered { team_id: String, event_type: String },

    // Evaluation events
    EvaluationSubmitted { evaluation_id: String, team_id: String, judge_id: String },
}

/// Event publisher trait for service events
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: ServiceEvent) -> Result<(), ApplicationError>;
}

/// No-op event publisher for testing
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _event: ServiceEvent) -> Result<(), ApplicationError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_context() {
        let ctx = ServiceContext::anonymous("corr-123".to_string());
        assert!(ctx.user_id.is_none());
        assert!(ctx.require_authenticated().is_err());

        let judge_id = JudgeId::new();
        let ctx = ServiceContext::authenticated(judge_id.to_string(), "corr-123".to_string());
        assert!(ctx.require_authenticated().is_ok());
        assert!(ctx.require_admin().is_err());
        assert_eq!(ctx.require_judge().unwrap(), judge_id);

        let ctx =
            ServiceContext::authenticated("admin@scorecard.local".to_string(), "c".to_string())
                .with_admin();
        assert!(ctx.require_admin().is_ok());
        assert!(matches!(ctx.require_judge(), Err(ApplicationError::Forbidden(_))));
    }

    #[test]
    fn test_malformed_judge_identity() {
        let ctx = ServiceContext::authenticated("judge-7".to_string(), "c".to_string());
        assert!(matches!(ctx.require_judge(), Err(ApplicationError::Unauthorized(_))));
    }
}
