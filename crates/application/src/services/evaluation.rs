//! Evaluation Service
//!
//! Judges submit one evaluation per team. A resubmission replaces the scores
//! and remarks of the existing record; totals are always recomputed here.

use super::{EventPublisher, JudgeRepositoryPort, ServiceContext, ServiceEvent, TeamRepositoryPort};
use crate::validation::{SubmitEvaluationRequest, Validatable};
use crate::{ApplicationError, ApplicationResult};
use async_trait::async_trait;
use scorecard_domain::errors::{EvaluationError, JudgeError, TeamError};
use scorecard_domain::{Evaluation, EventType, JudgeId, TeamId};
use std::sync::Arc;
use tracing::{info, instrument};

/// Evaluation repository trait
#[async_trait]
pub trait EvaluationRepositoryPort: Send + Sync {
    /// Store the judge's evaluation of the team, replacing any earlier one in
    /// a single step. A replacement keeps the stored id and creation time;
    /// the record as stored is returned.
    async fn save(&self, evaluation: &Evaluation) -> Result<Evaluation, ApplicationError>;
    async fn find(
        &self,
        team_id: TeamId,
        judge_id: JudgeId,
    ) -> Result<Option<Evaluation>, ApplicationError>;
    /// Evaluations of a team, oldest first
    async fn list_for_team(&self, team_id: TeamId) -> Result<Vec<Evaluation>, ApplicationError>;
    async fn list_for_judge(&self, judge_id: JudgeId) -> Result<Vec<Evaluation>, ApplicationError>;
    async fn list_for_event(&self, event: EventType) -> Result<Vec<Evaluation>, ApplicationError>;
}

/// Evaluation service implementation
pub struct EvaluationService<R, T, J, E>
where
    R: EvaluationRepositoryPort,
    T: TeamRepositoryPort,
    J: JudgeRepositoryPort,
    E: EventPublisher,
{
    repository: Arc<R>,
    teams: Arc<T>,
    judges: Arc<J>,
    event_publisher: Arc<E>,
}

impl<R, T, J, E> EvaluationService<R, T, J, E>
where
    R: EvaluationRepositoryPort,
    T: TeamRepositoryPort,
    J: JudgeRepositoryPort,
    E: EventPublisher,
{
    pub fn new(repository: Arc<R>, teams: Arc<T>, judges: Arc<J>, event_publisher: Arc<E>) -> Self {
        Self {
            repository,
            teams,
            judges,
            event_publisher,
        }
    }

    /// Submit or replace the calling judge's evaluation of a team
    #[instrument(skip(self, ctx, request), fields(correlation_id = %ctx.correlation_id))]
    pub async fn submit(
        &self,
        ctx: &ServiceContext,
        request: SubmitEvaluationRequest,
    ) -> ApplicationResult<Evaluation> {
        let judge_id = ctx.require_judge()?;
        request.validate_all().ensure_valid()?;

        let judge = self
            .judges
            .get_by_id(judge_id)
            .await?
            .ok_or(JudgeError::NotFound(judge_id))?;
        if !judge.is_active {
            return Err(JudgeError::Inactive.into());
        }

        let team_id = request
            .team_id()
            .ok_or_else(|| {
                ApplicationError::ValidationFailed("team_id: Invalid team id".to_string())
            })?;
        let team = self
            .teams
            .get_by_id(team_id)
            .await?
            .ok_or(TeamError::NotFound(team_id))?;

        if !judge.is_assigned_to(team.event_type) {
            return Err(EvaluationError::NotAssigned(team.event_type).into());
        }

        request.validate_for_event(team.event_type).ensure_valid()?;

        let rounds = request.rounds();
        let remarks = request.remarks.unwrap_or_default();

        let submitted = Evaluation::new(
            team.id,
            judge.id,
            judge.name.clone(),
            team.event_type,
            rounds,
            remarks,
        );
        let evaluation = self.repository.save(&submitted).await?;

        info!(
            evaluation_id = %evaluation.id,
            team_id = %team.id,
            judge_id = %judge.id,
            total = evaluation.total_score,
            "Evaluation submitted"
        );

        self.event_publisher
            .publish(ServiceEvent::EvaluationSubmitted {
                evaluation_id: evaluation.id.to_string(),
                team_id: team.id.to_string(),
                judge_id: judge.id.to_string(),
            })
            .await?;

        Ok(evaluation)
    }

    /// Every judge's evaluation of a team
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn list_for_team(
        &self,
        ctx: &ServiceContext,
        team_id: TeamId,
    ) -> ApplicationResult<Vec<Evaluation>> {
        ctx.require_admin()?;

        if self.teams.get_by_id(team_id).await?.is_none() {
            return Err(TeamError::NotFound(team_id).into());
        }
        self.repository.list_for_team(team_id).await
    }

    /// The calling judge's evaluations
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn list_mine(&self, ctx: &ServiceContext) -> ApplicationResult<Vec<Evaluation>> {
        let judge_id = ctx.require_judge()?;
        self.repository.list_for_judge(judge_id).await
    }
}
