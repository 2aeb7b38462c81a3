//! Team Service
//!
//! Registration of competing teams and roster lookups.

use super::{EventPublisher, ServiceContext, ServiceEvent};
use crate::validation::{CreateTeamRequest, Validatable};
use crate::{ApplicationError, ApplicationResult};
use async_trait::async_trait;
use scorecard_domain::errors::TeamError;
use scorecard_domain::{EventType, Team, TeamId, TeamMember};
use std::sync::Arc;
use tracing::{info, instrument};

/// Team repository trait
#[async_trait]
pub trait TeamRepositoryPort: Send + Sync {
    async fn insert(&self, team: &Team) -> Result<(), ApplicationError>;
    async fn get_by_id(&self, id: TeamId) -> Result<Option<Team>, ApplicationError>;
    /// All teams, or only those registered for `event`
    async fn list(&self, event: Option<EventType>) -> Result<Vec<Team>, ApplicationError>;
}

/// Team service implementation
pub struct TeamService<R, E>
where
    R: TeamRepositoryPort,
    E: EventPublisher,
{
    repository: Arc<R>,
    event_publisher: Arc<E>,
}

impl<R, E> TeamService<R, E>
where
    R: TeamRepositoryPort,
    E: EventPublisher,
{
    pub fn new(repository: Arc<R>, event_publisher: Arc<E>) -> Self {
        Self {
            repository,
            event_publisher,
        }
    }

    /// Register a team for an event
    #[instrument(skip(self, ctx, request), fields(correlation_id = %ctx.correlation_id))]
    pub async fn create(
        &self,
        ctx: &ServiceContext,
        request: CreateTeamRequest,
    ) -> ApplicationResult<Team> {
        ctx.require_admin()?;
        request.validate_all().ensure_valid()?;

        let event_type: EventType = request
            .event_type
            .parse()
            .map_err(|e: scorecard_domain::UnknownEventType| {
                ApplicationError::ValidationFailed(e.to_string())
            })?;

        let members = request
            .members
            .into_iter()
            .map(|m| TeamMember {
                name: m.name.trim().to_string(),
                email: m
                    .email
                    .map(|e| e.trim().to_string())
                    .filter(|e| !e.is_empty()),
                role: m
                    .role
                    .map(|r| r.trim().to_string())
                    .filter(|r| !r.is_empty()),
            })
            .collect();

        let team = Team::new(request.name, event_type, members);
        self.repository.insert(&team).await?;

        info!(
            team_id = %team.id,
            event = %event_type,
            members = team.total_members,
            "Team registered"
        );

        self.event_publisher
            .publish(ServiceEvent::TeamRegistered {
                team_id: team.id.to_string(),
                event_type: event_type.to_string(),
            })
            .await?;

        Ok(team)
    }

    /// List teams ordered by name
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn list(
        &self,
        ctx: &ServiceContext,
        event: Option<EventType>,
    ) -> ApplicationResult<Vec<Team>> {
        ctx.require_authenticated()?;

        let mut teams = self.repository.list(event).await?;
        teams.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(teams)
    }

    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn get(&self, ctx: &ServiceContext, id: TeamId) -> ApplicationResult<Team> {
        ctx.require_authenticated()?;

        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| TeamError::NotFound(id).into())
    }
}
