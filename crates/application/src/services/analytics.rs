//! Analytics Service
//!
//! Per-team score analytics and the printable evaluation report.

use super::{EvaluationRepositoryPort, ServiceContext, TeamRepositoryPort};
use crate::report::{render_pdf, ReportDocument};
use crate::scoring::{aggregate, TeamAnalytics, TeamSnapshot};
use crate::{ApplicationError, ApplicationResult};
use scorecard_common::config::ReportConfig;
use scorecard_domain::errors::TeamError;
use scorecard_domain::TeamId;
use std::sync::Arc;
use tracing::{info, instrument};

/// A rendered report ready to be sent as a download
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub struct AnalyticsService<T, R>
where
    T: TeamRepositoryPort,
    R: EvaluationRepositoryPort,
{
    teams: Arc<T>,
    evaluations: Arc<R>,
    report_config: Arc<ReportConfig>,
}

impl<T, R> AnalyticsService<T, R>
where
    T: TeamRepositoryPort,
    R: EvaluationRepositoryPort,
{
    pub fn new(teams: Arc<T>, evaluations: Arc<R>, report_config: ReportConfig) -> Self {
        Self {
            teams,
            evaluations,
            report_config: Arc::new(report_config),
        }
    }

    /// Aggregated scores of one team across every judge
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn team_analytics(
        &self,
        ctx: &ServiceContext,
        team_id: TeamId,
    ) -> ApplicationResult<TeamAnalytics> {
        ctx.require_admin()?;
        let snapshot = self.snapshot(team_id).await?;
        Ok(aggregate(&snapshot))
    }

    /// Render the team's evaluation report as a PDF
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn team_report(
        &self,
        ctx: &ServiceContext,
        team_id: TeamId,
    ) -> ApplicationResult<RenderedReport> {
        ctx.require_admin()?;

        let analytics = aggregate(&self.snapshot(team_id).await?);
        let document = ReportDocument::build(&analytics, &self.report_config);
        let file_name = document.file_name.clone();

        let bytes = tokio::task::spawn_blocking(move || render_pdf(&document))
            .await
            .map_err(|e| {
                ApplicationError::Internal(format!("Report rendering task failed: {}", e))
            })??;

        info!(team_id = %team_id, file_name = %file_name, size = bytes.len(), "Report rendered");

        Ok(RenderedReport { file_name, bytes })
    }

    async fn snapshot(&self, team_id: TeamId) -> ApplicationResult<TeamSnapshot> {
        let team = self
            .teams
            .get_by_id(team_id)
            .await?
            .ok_or(TeamError::NotFound(team_id))?;
        let evaluations = self.evaluations.list_for_team(team_id).await?;
        Ok(TeamSnapshot::new(team, evaluations))
    }
}
