//! Leaderboard Service

use super::{EvaluationRepositoryPort, ServiceContext, TeamRepositoryPort};
use crate::scoring::{rank_teams, LeaderboardEntry};
use crate::ApplicationResult;
use indexmap::IndexMap;
use scorecard_domain::EventType;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Builds event leaderboards from the stored evaluations
pub struct LeaderboardService<T, R>
where
    T: TeamRepositoryPort,
    R: EvaluationRepositoryPort,
{
    teams: Arc<T>,
    evaluations: Arc<R>,
}

impl<T, R> LeaderboardService<T, R>
where
    T: TeamRepositoryPort,
    R: EvaluationRepositoryPort,
{
    pub fn new(teams: Arc<T>, evaluations: Arc<R>) -> Self {
        Self { teams, evaluations }
    }

    /// Ranked teams of one event
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn for_event(
        &self,
        ctx: &ServiceContext,
        event: EventType,
    ) -> ApplicationResult<Vec<LeaderboardEntry>> {
        ctx.require_admin()?;
        self.rank(event).await
    }

    /// One leaderboard per event, in event order. Events without evaluated
    /// teams map to an empty board.
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn all(
        &self,
        ctx: &ServiceContext,
    ) -> ApplicationResult<IndexMap<EventType, Vec<LeaderboardEntry>>> {
        ctx.require_admin()?;

        let mut boards = IndexMap::with_capacity(EventType::ALL.len());
        for event in EventType::ALL {
            boards.insert(event, self.rank(event).await?);
        }
        Ok(boards)
    }

    async fn rank(&self, event: EventType) -> ApplicationResult<Vec<LeaderboardEntry>> {
        let teams = self.teams.list(Some(event)).await?;
        let evaluations = self.evaluations.list_for_event(event).await?;

        let board = rank_teams(&teams, &evaluations);
        debug!(event = %event, teams = board.len(), "Leaderboard ranked");
        Ok(board)
    }
}
