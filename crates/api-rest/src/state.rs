//! Application state and dependency injection.
//!
//! This module defines the shared application state that is passed
//! to all route handlers via Axum's state extraction, together with the
//! in-memory repositories the API runs on.

use crate::config::ApiConfig;
use async_trait::async_trait;
use indexmap::IndexMap;
use scorecard_application::{
    scoring::LeaderboardEntry,
    services::{
        AnalyticsService, Argon2PasswordHasher, EvaluationRepositoryPort, EvaluationService,
        EventPublisher, JudgeDto, JudgeRepositoryPort, JudgeService, LeaderboardService,
        PasswordHasher, RenderedReport, ServiceContext, ServiceEvent, TeamRepositoryPort,
        TeamService,
    },
    validation::{
        CreateJudgeRequest, CreateTeamRequest, SubmitEvaluationRequest, UpdateJudgeRequest,
    },
    ApplicationError, TeamAnalytics,
};
use scorecard_domain::{Evaluation, EventType, Judge, JudgeId, Team, TeamId};
use std::sync::Arc;
use tracing::debug;

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// API configuration
    pub config: Arc<ApiConfig>,

    /// Judge service (type-erased)
    pub judge_service: Arc<dyn JudgeServiceTrait>,

    /// Team service (type-erased)
    pub team_service: Arc<dyn TeamServiceTrait>,

    /// Evaluation service (type-erased)
    pub evaluation_service: Arc<dyn EvaluationServiceTrait>,

    /// Leaderboard service (type-erased)
    pub leaderboard_service: Arc<dyn LeaderboardServiceTrait>,

    /// Analytics and report service (type-erased)
    pub analytics_service: Arc<dyn AnalyticsServiceTrait>,
}

impl AppState {
    /// Create a new application state with in-memory repositories and
    /// Argon2 password hashing
    pub fn new(config: ApiConfig) -> Self {
        Self::with_password_hasher(config, Argon2PasswordHasher)
    }

    /// Create application state with a custom password hasher
    pub fn with_password_hasher<H>(config: ApiConfig, password_hasher: H) -> Self
    where
        H: PasswordHasher + 'static,
    {
        let judge_repo = Arc::new(InMemoryJudgeRepository::new());
        let team_repo = Arc::new(InMemoryTeamRepository::new());
        let evaluation_repo = Arc::new(InMemoryEvaluationRepository::new());
        let event_publisher = Arc::new(TracingEventPublisher);

        let judge_service = Arc::new(JudgeService::new(
            Arc::clone(&judge_repo),
            Arc::clone(&event_publisher),
            Arc::new(password_hasher),
        ));

        let team_service = Arc::new(TeamService::new(
            Arc::clone(&team_repo),
            Arc::clone(&event_publisher),
        ));

        let evaluation_service = Arc::new(EvaluationService::new(
            Arc::clone(&evaluation_repo),
            Arc::clone(&team_repo),
            judge_repo,
            event_publisher,
        ));

        let leaderboard_service = Arc::new(LeaderboardService::new(
            Arc::clone(&team_repo),
            Arc::clone(&evaluation_repo),
        ));

        let analytics_service = Arc::new(AnalyticsService::new(
            team_repo,
            evaluation_repo,
            config.report.clone(),
        ));

        Self {
            config: Arc::new(config),
            judge_service,
            team_service,
            evaluation_service,
            leaderboard_service,
            analytics_service,
        }
    }

    /// Get JWT secret
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt_secret
    }
}

// ============================================================================
// SERVICE TRAITS (Type-erased interfaces for route handlers)
// ============================================================================

/// Type-erased judge service trait
#[async_trait]
pub trait JudgeServiceTrait: Send + Sync {
    async fn create(
        &self,
        ctx: &ServiceContext,
        request: CreateJudgeRequest,
    ) -> Result<JudgeDto, ApplicationError>;

    async fn list(&self, ctx: &ServiceContext) -> Result<Vec<JudgeDto>, ApplicationError>;

    async fn get(&self, ctx: &ServiceContext, id: JudgeId) -> Result<JudgeDto, ApplicationError>;

    async fn me(&self, ctx: &ServiceContext) -> Result<JudgeDto, ApplicationError>;

    async fn update(
        &self,
        ctx: &ServiceContext,
        id: JudgeId,
        request: UpdateJudgeRequest,
    ) -> Result<JudgeDto, ApplicationError>;

    async fn set_active(
        &self,
        ctx: &ServiceContext,
        id: JudgeId,
        is_active: bool,
    ) -> Result<JudgeDto, ApplicationError>;

    async fn authenticate(&self, email: &str, password: &str) -> Result<JudgeDto, ApplicationError>;
}

/// Type-erased team service trait
#[async_trait]
pub trait TeamServiceTrait: Send + Sync {
    async fn create(
        &self,
        ctx: &ServiceContext,
        request: CreateTeamRequest,
    ) -> Result<Team, ApplicationError>;

    async fn list(
        &self,
        ctx: &ServiceContext,
        event: Option<EventType>,
    ) -> Result<Vec<Team>, ApplicationError>;

    async fn get(&self, ctx: &ServiceContext, id: TeamId) -> Result<Team, ApplicationError>;
}

/// Type-erased evaluation service trait
#[async_trait]
pub trait EvaluationServiceTrait: Send + Sync {
    async fn submit(
        &self,
        ctx: &ServiceContext,
        request: SubmitEvaluationRequest,
    ) -> Result<Evaluation, ApplicationError>;

    async fn list_for_team(
        &self,
        ctx: &ServiceContext,
        team_id: TeamId,
    ) -> Result<Vec<Evaluation>, ApplicationError>;

    async fn list_mine(&self, ctx: &ServiceContext) -> Result<Vec<Evaluation>, ApplicationError>;
}

/// Type-erased leaderboard service trait
#[async_trait]
pub trait LeaderboardServiceTrait: Send + Sync {
    async fn for_event(
        &self,
        ctx: &ServiceContext,
        event: EventType,
    ) -> Result<Vec<LeaderboardEntry>, ApplicationError>;

    async fn all(
        &self,
        ctx: &ServiceContext,
    ) -> Result<IndexMap<EventType, Vec<LeaderboardEntry>>, ApplicationError>;
}

/// Type-erased analytics service trait
#[async_trait]
pub trait AnalyticsServiceTrait: Send + Sync {
    async fn team_analytics(
        &self,
        ctx: &ServiceContext,
        team_id: TeamId,
    ) -> Result<TeamAnalytics, ApplicationError>;

    async fn team_report(
        &self,
        ctx: &ServiceContext,
        team_id: TeamId,
    ) -> Result<RenderedReport, ApplicationError>;
}

// ============================================================================
// TRAIT IMPLEMENTATIONS FOR CONCRETE SERVICES
// ============================================================================

#[async_trait]
impl<R, E, H> JudgeServiceTrait for JudgeService<R, E, H>
where
    R: JudgeRepositoryPort + 'static,
    E: EventPublisher + 'static,
    H: PasswordHasher + 'static,
{
    async fn create(
        &self,
        ctx: &ServiceContext,
        request: CreateJudgeRequest,
    ) -> Result<JudgeDto, ApplicationError> {
        JudgeService::create(self, ctx, request).await
    }

    async fn list(&self, ctx: &ServiceContext) -> Result<Vec<JudgeDto>, ApplicationError> {
        JudgeService::list(self, ctx).await
    }

    async fn get(&self, ctx: &ServiceContext, id: JudgeId) -> Result<JudgeDto, ApplicationError> {
        JudgeService::get(self, ctx, id).await
    }

    async fn me(&self, ctx: &ServiceContext) -> Result<JudgeDto, ApplicationError> {
        JudgeService::me(self, ctx).await
    }

    async fn update(
        &self,
        ctx: &ServiceContext,
        id: JudgeId,
        request: UpdateJudgeRequest,
    ) -> Result<JudgeDto, ApplicationError> {
        JudgeService::update(self, ctx, id, request).await
    }

    async fn set_active(
        &self,
        ctx: &ServiceContext,
        id: JudgeId,
        is_active: bool,
    ) -> Result<JudgeDto, ApplicationError> {
        JudgeService::set_active(self, ctx, id, is_active).await
    }

    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<JudgeDto, ApplicationError> {
        JudgeService::authenticate(self, email, password).await
    }
}

#[async_trait]
impl<R, E> TeamServiceTrait for TeamService<R, E>
where
    R: TeamRepositoryPort + 'static,
    E: EventPublisher + 'static,
{
    async fn create(
        &self,
        ctx: &ServiceContext,
        request: CreateTeamRequest,
    ) -> Result<Team, ApplicationError> {
        TeamService::create(self, ctx, request).await
    }

    async fn list(
        &self,
        ctx: &ServiceContext,
        event: Option<EventType>,
    ) -> Result<Vec<Team>, ApplicationError> {
        TeamService::list(self, ctx, event).await
    }

    async fn get(&self, ctx: &ServiceContext, id: TeamId) -> Result<Team, ApplicationError> {
        TeamService::get(self, ctx, id).await
    }
}

#[async_trait]
impl<R, T, J, E> EvaluationServiceTrait for EvaluationService<R, T, J, E>
where
    R: EvaluationRepositoryPort + 'static,
    T: TeamRepositoryPort + 'static,
    J: JudgeRepositoryPort + 'static,
    E: EventPublisher + 'static,
{
    async fn submit(
        &self,
        ctx: &ServiceContext,
        request: SubmitEvaluationRequest,
    ) -> Result<Evaluation, ApplicationError> {
        EvaluationService::submit(self, ctx, request).await
    }

    async fn list_for_team(
        &self,
        ctx: &ServiceContext,
        team_id: TeamId,
    ) -> Result<Vec<Evaluation>, ApplicationError> {
        EvaluationService::list_for_team(self, ctx, team_id).await
    }

    async fn list_mine(&self, ctx: &ServiceContext) -> Result<Vec<Evaluation>, ApplicationError> {
        EvaluationService::list_mine(self, ctx).await
    }
}

#[async_trait]
impl<T, R> LeaderboardServiceTrait for LeaderboardService<T, R>
where
    T: TeamRepositoryPort + 'static,
    R: EvaluationRepositoryPort + 'static,
{
    async fn for_event(
        &self,
        ctx: &ServiceContext,
        event: EventType,
    ) -> Result<Vec<LeaderboardEntry>, ApplicationError> {
        LeaderboardService::for_event(self, ctx, event).await
    }

    async fn all(
        &self,
        ctx: &ServiceContext,
    ) -> Result<IndexMap<EventType, Vec<LeaderboardEntry>>, ApplicationError> {
        LeaderboardService::all(self, ctx).await
    }
}

#[async_trait]
impl<T, R> AnalyticsServiceTrait for AnalyticsService<T, R>
where
    T: TeamRepositoryPort + 'static,
    R: EvaluationRepositoryPort + 'static,
{
    async fn team_analytics(
        &self,
        ctx: &ServiceContext,
        team_id: TeamId,
    ) -> Result<TeamAnalytics, ApplicationError> {
        AnalyticsService::team_analytics(self, ctx, team_id).await
    }

    async fn team_report(
        &self,
        ctx: &ServiceContext,
        team_id: TeamId,
    ) -> Result<RenderedReport, ApplicationError> {
        AnalyticsService::team_report(self, ctx, team_id).await
    }
}

// ============================================================================
// EVENT PUBLISHING
// ============================================================================

/// Writes service events to the log
pub struct TracingEventPublisher;

#[async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, event: ServiceEvent) -> Result<(), ApplicationError> {
        debug!(?event, "Service event");
        Ok(())
    }
}

// ============================================================================
// IN-MEMORY IMPLEMENTATIONS
// ============================================================================

use parking_lot::RwLock;
use std::collections::HashMap;

/// In-memory judge repository
pub struct InMemoryJudgeRepository {
    judges: RwLock<HashMap<JudgeId, Judge>>,
}

impl InMemoryJudgeRepository {
    pub fn new() -> Self {
        Self {
            judges: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryJudgeRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JudgeRepositoryPort for InMemoryJudgeRepository {
    async fn insert(&self, judge: &Judge) -> Result<(), ApplicationError> {
        let mut judges = self.judges.write();
        if judges.values().any(|j| j.email == judge.email) {
            return Err(ApplicationError::Conflict(format!(
                "Judge with email {} already exists",
                judge.email
            )));
        }
        judges.insert(judge.id, judge.clone());
        Ok(())
    }

    async fn update(&self, judge: &Judge) -> Result<(), ApplicationError> {
        let mut judges = self.judges.write();
        if judges
            .values()
            .any(|j| j.id != judge.id && j.email == judge.email)
        {
            return Err(ApplicationError::Conflict(format!(
                "Judge with email {} already exists",
                judge.email
            )));
        }
        match judges.get_mut(&judge.id) {
            Some(stored) => {
                *stored = judge.clone();
                Ok(())
            }
            None => Err(ApplicationError::NotFound(format!(
                "Judge not found: {}",
                judge.id
            ))),
        }
    }

    async fn get_by_id(&self, id: JudgeId) -> Result<Option<Judge>, ApplicationError> {
        Ok(self.judges.read().get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Judge>, ApplicationError> {
        Ok(self
            .judges
            .read()
            .values()
            .find(|j| j.email == email)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Judge>, ApplicationError> {
        Ok(self.judges.read().values().cloned().collect())
    }
}

/// In-memory team repository
pub struct InMemoryTeamRepository {
    teams: RwLock<HashMap<TeamId, Team>>,
}

impl InMemoryTeamRepository {
    pub fn new() -> Self {
        Self {
            teams: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryTeamRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TeamRepositoryPort for InMemoryTeamRepository {
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

/// In-memory evaluation repository
///
/// Kept in insertion order so team evaluations list oldest first.
pub struct InMemoryEvaluationRepository {
    evaluations: RwLock<Vec<Evaluation>>,
}

impl InMemoryEvaluationRepository {
    pub fn new() -> Self {
        Self {
            evaluations: RwLock::new(Vec::new()),
        }
    }

    fn filtered(&self, keep: impl Fn(&Evaluation) -> bool) -> Vec<Evaluation> {
        self.evaluations
            .read()
            .iter()
            .filter(|e| keep(e))
            .cloned()
            .collect()
    }
}

impl Default for InMemoryEvaluationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EvaluationRepositoryPort for InMemoryEvaluationRepository {
    async fn save(&self, evaluation: &Evaluation) -> Result<Evaluation, ApplicationError> {
        let mut evaluations = self.evaluations.write();
        let existing = evaluations
            .iter_mut()
            .find(|e| e.team_id == evaluation.team_id && e.judge_id == evaluation.judge_id);
        match existing {
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
        Ok(self.filtered(|e| e.team_id == team_id))
    }

    async fn list_for_judge(&self, judge_id: JudgeId) -> Result<Vec<Evaluation>, ApplicationError> {
        Ok(self.filtered(|e| e.judge_id == judge_id))
    }

    async fn list_for_event(&self, event: EventType) -> Result<Vec<Evaluation>, ApplicationError> {
        Ok(self.filtered(|e| e.event_type == event))
    }
}
