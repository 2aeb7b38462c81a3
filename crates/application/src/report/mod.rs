//! Evaluation report
//!
//! [`ReportDocument::build`] lays the aggregated analytics out as the
//! sections of the printed report. Every cell is final text at that point;
//! renderers only place it on a page.

mod pdf;

pub use pdf::render_pdf;

use crate::scoring::{JudgeRemark, TeamAnalytics};
use scorecard_common::config::{ReportConfig, Signatory};
use scorecard_domain::RoundNumber;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shown in place of the remarks list when no judge left any.
pub const NO_REMARKS: &str = "No remarks provided";

#[derive(Error, Debug, Clone)]
pub enum ReportError {
    #[error("Failed to load font: {0}")]
    Font(String),

    #[error("Failed to write PDF: {0}")]
    Pdf(String),
}

/// `<TeamName>_Evaluation_Report.pdf`, with path separators and quotes
/// replaced so the name is safe on disk and in a `Content-Disposition` header.
pub fn report_file_name(team_name: &str) -> String {
    let safe: String = team_name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '"' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("{}_Evaluation_Report.pdf", safe)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "entries", rename_all = "snake_case")]
pub enum RemarksBlock {
    Provided(Vec<JudgeRemark>),
    NoneProvided,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub file_name: String,
    pub title: String,
    /// Label/value pairs printed under the title
    pub team_details: Vec<(String, String)>,
    pub roster: ReportTable,
    pub scoring: ReportTable,
    pub total_line: String,
    pub remarks: RemarksBlock,
    pub signatories: Vec<Signatory>,
    pub footer: Option<String>,
}

impl ReportDocument {
    pub fn build(analytics: &TeamAnalytics, config: &ReportConfig) -> Self {
        let team_details = vec![
            ("TEAM NAME".to_string(), analytics.team_name.clone()),
            ("EVENT".to_string(), analytics.event_label.clone()),
            ("NO OF TEAM".to_string(), analytics.total_members.to_string()),
        ];

        let roster = ReportTable {
            headers: vec!["TEAM MEMBERS NAMES".to_string(), "EMAIL ID".to_string()],
            rows: analytics
                .members
                .iter()
                .map(|m| vec![m.name.clone(), m.email.clone().unwrap_or_default()])
                .collect(),
        };

        let remarks = if analytics.remarks.is_empty() {
            RemarksBlock::NoneProvided
        } else {
            RemarksBlock::Provided(analytics.remarks.clone())
        };

        Self {
            file_name: report_file_name(&analytics.team_name),
            title: config.title.clone(),
            team_details,
            roster,
            scoring: scoring_table(analytics),
            total_line: format!(
                "TOTAL MARKS: {} / {}",
                analytics.grand_total, analytics.max_possible_marks
            ),
            remarks,
            signatories: config.signatories.clone(),
            footer: config.footer.clone(),
        }
    }
}

fn scoring_table(analytics: &TeamAnalytics) -> ReportTable {
    let mut headers = vec!["S.L".to_string(), "PARAMETERS".to_string()];
    for round in RoundNumber::ALL {
        for judge in &analytics.judges {
            headers.push(format!("{}\nR{}", judge.header, round.as_u8()));
        }
    }
    headers.push("TOTAL".to_string());

    let rows = analytics
        .parameters
        .iter()
        .map(|row| {
            let mut cells = vec![row.serial.to_string(), row.label.clone()];
            for round in RoundNumber::ALL {
                cells.extend(row.cells(round).iter().map(|c| c.display()));
            }
            cells.push(row.total.to_string());
            cells
        })
        .collect();

    ReportTable { headers, rows }
}
