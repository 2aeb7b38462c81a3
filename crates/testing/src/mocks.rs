//! Mock implementations for repositories and external services.
//!
//! In-memory adapters for the application ports, plus a publisher that
//! records every event it is handed.

use crate::builders::mock_hash;
use async_trait::async_trait;
use parking_lot::RwLock;
use scorecard_application::services::{
    EvaluationRepositoryPort, JudgeRepositoryPort, PasswordHasher, TeamRepositoryPort,
};
use scorecard_application::{ApplicationError, EventPublisher, ServiceEvent};
use scorecard_domain::{Evaluation, EventType, Judge, JudgeId, Team, TeamId};
use std::collections::HashMap;
use std::sync::Arc;

/// Mock event publisher that keeps every published event
pub struct MockEventPublisher {
    pub published_events: Arc<RwLock<Vec<ServiceEvent>>>,
}

impl MockEventPublisher {
    pub fn new() -> Self {
        Self {
            published_events: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn get_published_events(&self) -> Vec<ServiceEvent> {
        self.published_events.read().clone()
    }

    pub fn clear(&self) {
        self.published_events.write().clear();
    }

    pub fn event_count(&self) -> usize {
        self.published_events.read().len()
    }
}

impl Default for MockEventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for MockEventPublisher {
    async fn publish(&self, event: ServiceEvent) -> Result<(), ApplicationError> {
        self.published_events.write().push(event);
        Ok(())
    }
}

/// Reversible stand-in for Argon2 so tests stay fast
pub struct MockPasswordHasher;

#[async_trait]
impl PasswordHasher for MockPasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, ApplicationError> {
        Ok(mock_hash(password))
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, ApplicationError> {
        Ok(hash == mock_hash(password))
    }
}

/// Mock judge repository for testing
pub struct MockJudgeRepository {
    judges: Arc<RwLock<HashMap<JudgeId, Judge>>>,
}

impl MockJudgeRepository {
    pub fn new() -> Self {
        Self {
            judges: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Store a judge directly, bypassing the service
    pub fn seed(&self, judge: Judge) {
        self.judges.write().insert(judge.id, judge);
    }

    pub fn count(&self) -> usize {
        self.judges.read().len()
    }
}

impl Default for MockJudgeRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JudgeRepositoryPort for MockJudgeRepository {
    async fn insert(&self, judge: &Judge) -> Result<(), ApplicationError> {
        self.judges.write().insert(judge.id, judge.clone());
        Ok(())
    }

    async fn update(&self, judge: &Judge) -> Result<(), ApplicationError> {
        let mut judges = self.judges.write();
        if judges.values().any(|j| j.id != judge.id && j.email == judge.email) {
            return Err(ApplicationError::Conflict(format!("Email taken: {}", judge.email)));
        }
        match judges.get_mut(&judge.id) {
            Some(stored) => {
                *stored = judge.clone();
                Ok(())
            }
            None => Err(ApplicationError::NotFound(format!("Judge not found: {}", judge.id))),
        }
    }

    async fn get_by_id(&self, id: JudgeId) -> Result<Option<Judge>, ApplicationError> {
        Ok(self.judges.read().get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Judge>, ApplicationError> {
        Ok(self.judges.read().values().find(|j| j.email == email).cloned())
    }

    async fn list(&self) -> Result<Vec<Judge>, ApplicationError> {
        Ok(self.judges.read().values().cloned().collect())
    }
}

/// Mock team repository for testing
pub struct MockTeamRepository {
    teams: Arc<RwLock<HashMap<TeamId, Team>>>,
}

impl MockTeamRepository {
    pub fn new() -> Self {
        Self {
            teams: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn seed(&self, team: Team) {
        self.teams.write().insert(team.id, team);
    }

    pub fn count(&self) -> usize {
        self.teams.read().len()
    }
}

impl Default for MockTeamRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TeamRepositoryPort for MockTeamRepository {
    async fn insert(&self, team: &Team) -> Result<(), ApplicationError> {
        self.teams.write().insert(team.id, team.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: TeamId) -> Result<Option<Team>, ApplicationError> {
        Ok(self.teams.read().get(&id).cloned())
    }

    async fn list(&self, event: Option<EventType>) -> Result<Vec<Team>, ApplicationError> {
        Ok(self
            .teams
            .read()
            .values()
            .filter(|t| event.map_or(true, |e| t.event_type == e))
            .cloned()
            .collect())
    }
}

/// Mock evaluation repository for testing
pub struct MockEvaluationRepository {
    evaluations: Arc<RwLock<Vec<Evaluation>>>,
}

impl MockEvaluationRepository {
    pub fn new() -> Self {
        Self {
            evaluations: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn seed(&self, evaluation: Evaluation) {
        self.evaluations.write().push(evaluation);
    }

    pub fn count(&self) -> usize {
        self.evaluations.read().len()
    }
}

impl Default for MockEvaluationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EvaluationRepositoryPort for MockEvaluationRepository {
    async fn save(&self, evaluation: &Evaluation) -> Result<Evaluation, ApplicationError> {
        let mut evaluations = self.evaluations.write();
        match evaluations
            .iter_mut()
            .find(|e| e.team_id == evaluation.team_id && e.judge_id == evaluation.judge_id)
        {
            Some(stored) => {
                stored.supersede_with(evaluation);
                Ok(stored.clone())
            }
            None => {
                evaluations.push(evaluation.clone());
                Ok(evaluation.clone())
            }
        }
    }

    async fn find(
        &self,
        team_id: TeamId,
        judge_id: JudgeId,
    ) -> Result<Option<Evaluation>, ApplicationError> {
        Ok(self
            .evaluations
            .read()
            .iter()
            .find(|e| e.team_id == team_id && e.judge_id == judge_id)
            .cloned())
    }

    async fn list_for_team(&self, team_id: TeamId) -> Result<Vec<Evaluation>, ApplicationError> {
        Ok(self
            .evaluations
            .read()
            .iter()
            .filter(|e| e.team_id == team_id)
            .cloned()
            .collect())
    }

    async fn list_for_judge(&self, judge_id: JudgeId) -> Result<Vec<Evaluation>, ApplicationError> {
        Ok(self
            .evaluations
            .read()
            .iter()
            .filter(|e| e.judge_id == judge_id)
            .cloned()
            .collect())
    }

    async fn list_for_event(&self, event: EventType) -> Result<Vec<Evaluation>, ApplicationError> {
        Ok(self
            .evaluations
            .read()
            .iter()
            .filter(|e| e.event_type == event)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::{EvaluationBuilder, JudgeBuilder, TeamBuilder};
    use scorecard_domain::RoundNumber;

    #[tokio::test]
    async fn test_mock_judge_repository() {
        let repo = MockJudgeRepository::new();
        let judge = JudgeBuilder::new().with_email("a@b.io").build();

        repo.insert(&judge).await.unwrap();
        assert!(repo.get_by_id(judge.id).await.unwrap().is_some());
        assert!(repo.get_by_email("a@b.io").await.unwrap().is_some());
        assert_eq!(repo.count(), 1);

        let stranger = JudgeBuilder::new().build();
        assert!(repo.update(&stranger).await.is_err());
    }

    #[tokio::test]
    async fn test_mock_team_repository_filters_by_event() {
        let repo = MockTeamRepository::new();
        repo.seed(TeamBuilder::new().with_event(EventType::StartupExpo).build());
        repo.seed(TeamBuilder::new().with_event(EventType::PosterPresentation).build());

        assert_eq!(repo.list(None).await.unwrap().len(), 2);
        assert_eq!(repo.list(Some(EventType::StartupExpo)).await.unwrap().len(), 1);
        assert!(repo.list(Some(EventType::PaperPresentation)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mock_evaluation_repository_replaces_per_judge_and_team() {
        let repo = MockEvaluationRepository::new();
        let team = TeamBuilder::new().build();
        let judge = JudgeBuilder::new().build();
        let first = EvaluationBuilder::new(&team, &judge)
            .with_round(RoundNumber::One, &[5])
            .build();
        let again = EvaluationBuilder::new(&team, &judge)
            .with_round(RoundNumber::One, &[6])
            .with_remarks("updated")
            .build();

        repo.save(&first).await.unwrap();
        let stored = repo.save(&again).await.unwrap();

        assert_eq!(repo.count(), 1);
        assert_eq!(stored.id, first.id);
        let found = repo.find(team.id, judge.id).await.unwrap().unwrap();
        assert_eq!(found.remarks, "updated");
        assert_eq!(found.total_score, 6);
    }

    #[tokio::test]
    async fn test_mock_event_publisher() {
        let publisher = MockEventPublisher::new();

        publisher
            .publish(ServiceEvent::JudgeCreated { judge_id: "j1".to_string() })
            .await
            .unwrap();

        assert_eq!(publisher.event_count(), 1);
        publisher.clear();
        assert_eq!(publisher.event_count(), 0);
    }
}
