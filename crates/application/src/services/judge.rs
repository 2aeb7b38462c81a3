//! Judge Service
//!
//! Business logic for judge accounts: administration by the organiser,
//! credential checks at login, and the judge's own profile.

use super::{EventPublisher, ServiceContext, ServiceEvent};
use crate::validation::{parse_events, CreateJudgeRequest, UpdateJudgeRequest, Validatable};
use crate::{ApplicationError, ApplicationResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scorecard_domain::errors::{AuthorizationError, JudgeError};
use scorecard_domain::judge::normalize_email;
use scorecard_domain::{EventType, Judge, JudgeId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Judge data transfer object. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgeDto {
    pub id: JudgeId,
    pub name: String,
    pub email: String,
    pub assigned_events: Vec<EventType>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Judge> for JudgeDto {
    fn from(judge: &Judge) -> Self {
        Self {
            id: judge.id,
            name: judge.name.clone(),
            email: judge.email.clone(),
            assigned_events: judge.assigned_events.clone(),
            is_active: judge.is_active,
            created_at: judge.created_at,
            updated_at: judge.updated_at,
        }
    }
}

/// Judge repository trait
#[async_trait]
pub trait JudgeRepositoryPort: Send + Sync {
    async fn insert(&self, judge: &Judge) -> Result<(), ApplicationError>;
    async fn update(&self, judge: &Judge) -> Result<(), ApplicationError>;
    async fn get_by_id(&self, id: JudgeId) -> Result<Option<Judge>, ApplicationError>;
    /// Lookup by normalized email
    async fn get_by_email(&self, email: &str) -> Result<Option<Judge>, ApplicationError>;
    async fn list(&self) -> Result<Vec<Judge>, ApplicationError>;
}

/// Password hasher trait
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<String, ApplicationError>;
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, ApplicationError>;
}

/// Default password hasher using argon2
pub struct Argon2PasswordHasher;

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, ApplicationError> {
        scorecard_common::hash_password(password)
            .map_err(|e| ApplicationError::Internal(e.to_string()))
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, ApplicationError> {
        scorecard_common::verify_password(password, hash)
            .map_err(|e| ApplicationError::Internal(e.to_string()))
    }
}

/// Judge service implementation
pub struct JudgeService<R, E, H>
where
    R: JudgeRepositoryPort,
    E: EventPublisher,
    H: PasswordHasher,
{
    repository: Arc<R>,
    event_publisher: Arc<E>,
    password_hasher: Arc<H>,
}

impl<R, E, H> JudgeService<R, E, H>
where
    R: JudgeRepositoryPort,
    E: EventPublisher,
    H: PasswordHasher,
{
    pub fn new(repository: Arc<R>, event_publisher: Arc<E>, password_hasher: Arc<H>) -> Self {
        Self {
            repository,
            event_publisher,
            password_hasher,
        }
    }

    /// Create a judge account
    #[instrument(skip(self, ctx, request), fields(correlation_id = %ctx.correlation_id))]
    pub async fn create(
        &self,
        ctx: &ServiceContext,
        request: CreateJudgeRequest,
    ) -> ApplicationResult<JudgeDto> {
        ctx.require_admin()?;
        request.validate_all().ensure_valid()?;

        let email = normalize_email(&request.email);
        if self.repository.get_by_email(&email).await?.is_some() {
            return Err(JudgeError::DuplicateEmail(email).into());
        }

        let password_hash = self.password_hasher.hash(&request.password).await?;
        let judge = Judge::new(
            request.name,
            &email,
            password_hash,
            parse_events(&request.assigned_events),
        );

        self.repository.insert(&judge).await?;

        info!(judge_id = %judge.id, email = %judge.email, "Judge created");

        self.event_publisher
            .publish(ServiceEvent::JudgeCreated {
                judge_id: judge.id.to_string(),
            })
            .await?;

        Ok(JudgeDto::from(&judge))
    }

    /// List every judge, ordered by name
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn list(&self, ctx: &ServiceContext) -> ApplicationResult<Vec<JudgeDto>> {
        ctx.require_admin()?;

        let mut judges = self.repository.list().await?;
        judges.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.email.cmp(&b.email)));

        Ok(judges.iter().map(JudgeDto::from).collect())
    }

    /// Get a judge by ID. Judges may read their own record.
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn get(&self, ctx: &ServiceContext, id: JudgeId) -> ApplicationResult<JudgeDto> {
        let caller = ctx.require_authenticated()?;
        if !ctx.is_admin && caller != id.to_string() {
            return Err(ApplicationError::Forbidden(
                "You can only view your own account".to_string(),
            ));
        }

        let judge = self.load(id).await?;
        Ok(JudgeDto::from(&judge))
    }

    /// The calling judge's own account
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn me(&self, ctx: &ServiceContext) -> ApplicationResult<JudgeDto> {
        let id = ctx.require_judge()?;
        let judge = self.load(id).await?;
        Ok(JudgeDto::from(&judge))
    }

    /// Update a judge's details; a new password is rehashed
    #[instrument(skip(self, ctx, request), fields(correlation_id = %ctx.correlation_id))]
    pub async fn update(
        &self,
        ctx: &ServiceContext,
        id: JudgeId,
        request: UpdateJudgeRequest,
    ) -> ApplicationResult<JudgeDto> {
        ctx.require_admin()?;
        request.validate_all().ensure_valid()?;

        let mut judge = self.load(id).await?;

        if let Some(email) = request.email {
            let email = normalize_email(&email);
            if email != judge.email {
                if let Some(other) = self.repository.get_by_email(&email).await? {
                    if other.id != judge.id {
                        return Err(JudgeError::DuplicateEmail(email).into());
                    }
                }
                judge.email = email;
            }
        }

        if let Some(name) = request.name {
            judge.name = name.trim().to_string();
        }

        if let Some(events) = request.assigned_events {
            judge.set_assigned_events(parse_events(&events));
        }

        if let Some(password) = request.password {
            judge.password_hash = self.password_hasher.hash(&password).await?;
        }

        judge.touch();
        self.repository.update(&judge).await?;

        info!(judge_id = %judge.id, "Judge updated");

        self.event_publisher
            .publish(ServiceEvent::JudgeUpdated {
                judge_id: judge.id.to_string(),
            })
            .await?;

        Ok(JudgeDto::from(&judge))
    }

    /// Deactivate or re-activate a judge. Judges are never deleted.
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn set_active(
        &self,
        ctx: &ServiceContext,
        id: JudgeId,
        is_active: bool,
    ) -> ApplicationResult<JudgeDto> {
        ctx.require_admin()?;

        let mut judge = self.load(id).await?;
        if judge.is_active == is_active {
            return Ok(JudgeDto::from(&judge));
        }

        judge.set_active(is_active);
        self.repository.update(&judge).await?;

        info!(judge_id = %judge.id, is_active, "Judge status changed");

        self.event_publisher
            .publish(ServiceEvent::JudgeStatusChanged {
                judge_id: judge.id.to_string(),
                is_active,
            })
            .await?;

        Ok(JudgeDto::from(&judge))
    }

    /// Check judge credentials.
    ///
    /// The password is verified before the active flag so a deactivated
    /// account is only revealed to someone who knows its password.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> ApplicationResult<JudgeDto> {
        let judge = self
            .repository
            .get_by_email(&normalize_email(email))
            .await?
            .ok_or(AuthorizationError::InvalidCredentials)?;

        if !self.password_hasher.verify(password, &judge.password_hash).await? {
            warn!(judge_id = %judge.id, "Judge login with wrong password");
            return Err(AuthorizationError::InvalidCredentials.into());
        }

        if !judge.is_active {
            return Err(JudgeError::Inactive.into());
        }

        debug!(judge_id = %judge.id, "Judge authenticated");

        Ok(JudgeDto::from(&judge))
    }

    async fn load(&self, id: JudgeId) -> ApplicationResult<Judge> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| JudgeError::NotFound(id).into())
    }
}
