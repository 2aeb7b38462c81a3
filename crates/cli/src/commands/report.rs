//! Team report command
//!
//! Aggregates a team snapshot (the team plus every judge's evaluation, as
//! JSON) and prints the report, dumps the analytics, or writes the PDF.

use anyhow::{bail, Context, Result};
use scorecard_application::report::{render_pdf, RemarksBlock, NO_REMARKS};
use scorecard_application::scoring::aggregate;
use scorecard_application::{ReportDocument, TeamAnalytics, TeamSnapshot};
use scorecard_domain::evaluation::check_scores;
use scorecard_domain::RoundNumber;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::commands::CommandContext;
use crate::output::{colors, JsonFormatter, ReportFormat, TableFormatter};

/// Read a snapshot file and check every evaluation against the team's rubric
pub fn load_snapshot(path: &Path) -> Result<TeamSnapshot> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let snapshot: TeamSnapshot = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid snapshot {}", path.display()))?;
    check_snapshot(&snapshot)
        .with_context(|| format!("Invalid snapshot {}", path.display()))?;

    debug!(
        team = %snapshot.team.name,
        evaluations = snapshot.evaluations.len(),
        "Snapshot loaded"
    );
    Ok(snapshot)
}

/// Every evaluation must belong to the team, share its event and fit its rubric.
/// Stored totals are not checked here; mismatches surface as discrepancies.
pub fn check_snapshot(snapshot: &TeamSnapshot) -> Result<()> {
    let team = &snapshot.team;

    for e in &snapshot.evaluations {
        if e.team_id != team.id {
            bail!(
                "evaluation {} by {} is for team {}, not {}",
                e.id,
                e.judge_name,
                e.team_id,
                team.id
            );
        }
        if e.event_type != team.event_type {
            bail!(
                "evaluation {} by {} is for {}, but the team competes in {}",
                e.id,
                e.judge_name,
                e.event_type,
                team.event_type
            );
        }
        check_scores(team.event_type, &e.rounds)
            .with_context(|| format!("evaluation {} by {}", e.id, e.judge_name))?;
    }

    Ok(())
}

/// Render a team report
pub fn generate(
    ctx: &CommandContext,
    input: PathBuf,
    format: ReportFormat,
    output_dir: PathBuf,
) -> Result<()> {
    let snapshot = load_snapshot(&input)?;
    let analytics = aggregate(&snapshot);

    for d in &analytics.discrepancies {
        warn!(
            judge = %d.judge_name,
            round = ?d.round.map(|r| r.as_u8()),
            stored = d.stored,
            recomputed = d.recomputed,
            "Stored total differs from its scores"
        );
    }

    match format {
        ReportFormat::Json => println!("{}", JsonFormatter::format(&analytics)?),
        ReportFormat::Table => {
            let document = ReportDocument::build(&analytics, &ctx.config.report);
            println!("{}", render_table(&analytics, &document));
        }
        ReportFormat::Pdf => {
            let document = ReportDocument::build(&analytics, &ctx.config.report);
            let path = write_pdf(&document, &output_dir)?;
            println!(
                "{} {}",
                colors::success("Report written to"),
                path.display()
            );
        }
    }

    Ok(())
}

/// Write the PDF into `dir` under the document's file name
pub fn write_pdf(document: &ReportDocument, dir: &Path) -> Result<PathBuf> {
    let bytes = render_pdf(document).context("Failed to render PDF")?;

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    let path = dir.join(&document.file_name);
    fs::write(&path, &bytes).with_context(|| format!("Failed to write {}", path.display()))?;

    info!(path = %path.display(), size = bytes.len(), "Report written");
    Ok(path)
}

/// The on-screen report
pub fn render_table(analytics: &TeamAnalytics, document: &ReportDocument) -> String {
    let mut sections = vec![
        colors::bold(&document.title).to_string(),
        TableFormatter::key_value(&document.team_details),
    ];

    if document.roster.rows.is_empty() {
        sections.push(colors::warning("No team members listed.").to_string());
    } else {
        sections.push(TableFormatter::simple(
            &document.roster.headers,
            &document.roster.rows,
        ));
    }

    sections.push(colors::bold("SCORING").to_string());
    sections.push(TableFormatter::simple(
        &document.scoring.headers,
        &document.scoring.rows,
    ));

    sections.push(colors::bold("AVERAGES").to_string());
    sections.push(averages_table(analytics));

    sections.push(colors::bold(&document.total_line).to_string());

    sections.push(colors::bold("REMARKS").to_string());
    match &document.remarks {
        RemarksBlock::Provided(remarks) => {
            for remark in remarks {
                sections.push(format!("{}: {}", remark.judge_name, remark.remarks));
            }
        }
        RemarksBlock::NoneProvided => sections.push(colors::dim(NO_REMARKS).to_string()),
    }

    sections.join("\n")
}

fn averages_table(analytics: &TeamAnalytics) -> String {
    let mut rows: Vec<Vec<String>> = analytics
        .parameters
        .iter()
        .map(|p| {
            let mut row = vec![p.label.clone()];
            row.extend(RoundNumber::ALL.iter().map(|r| p.average(*r).display_question()));
            row
        })
        .collect();

    let mut totals = vec!["TOTAL".to_string()];
    totals.extend(
        RoundNumber::ALL
            .iter()
            .map(|r| analytics.round_average(*r).display_total()),
    );
    rows.push(totals);

    TableFormatter::simple(&["PARAMETERS", "R1 AVG", "R2 AVG"], &rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scorecard_common::ReportConfig;
    use scorecard_domain::{EventType, QuestionScore, TeamId, TeamMember};
    use scorecard_testing::{EvaluationBuilder, JudgeBuilder, TeamBuilder};

    fn snapshot() -> TeamSnapshot {
        let team = TeamBuilder::new()
            .with_name("Byte Club")
            .with_event(EventType::PaperPresentation)
            .with_members(vec![TeamMember::new("Ada").with_email("ada@uni.edu")])
            .build();
        let grace = JudgeBuilder::new()
            .with_name("Grace Hopper")
            .with_email("grace@example.com")
            .build();
        let alan = JudgeBuilder::new()
            .with_name("Alan Kay")
            .with_email("alan@example.com")
            .build();

        let evaluations = vec![
            EvaluationBuilder::new(&team, &grace)
                .with_round(RoundNumber::One, &[25, 25, 20, 15, 15])
                .with_remarks("Excellent depth")
                .build(),
            EvaluationBuilder::new(&team, &alan)
                .with_round(RoundNumber::Two, &[10, 10, 10, 10, 10])
                .build(),
        ];

        TeamSnapshot::new(team, evaluations)
    }

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("scorecard-report-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_render_table_sections() {
        let analytics = aggregate(&snapshot());
        let document = ReportDocument::build(&analytics, &ReportConfig::default());

        let rendered = render_table(&analytics, &document);
        assert!(rendered.contains("Byte Club"));
        assert!(rendered.contains("Technical Depth(25)"));
        assert!(rendered.contains("TOTAL MARKS: 150 / 400"));
        assert!(rendered.contains("Grace Hopper: Excellent depth"));
        assert!(!rendered.contains(NO_REMARKS));
    }

    #[test]
    fn test_render_table_without_evaluations() {
        let mut snapshot = snapshot();
        snapshot.evaluations.clear();
        let analytics = aggregate(&snapshot);
        let document = ReportDocument::build(&analytics, &ReportConfig::default());

        let rendered = render_table(&analytics, &document);
        assert!(rendered.contains("TOTAL MARKS: 0 / 0"));
        assert!(rendered.contains(NO_REMARKS));
    }

    #[test]
    fn test_snapshot_file_round_trip_to_pdf() {
        let dir = temp_dir();
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("snapshot.json");
        fs::write(&input, serde_json::to_string(&snapshot()).unwrap()).unwrap();

        let loaded = load_snapshot(&input).unwrap();
        assert_eq!(loaded.evaluations.len(), 2);

        let document = ReportDocument::build(&aggregate(&loaded), &ReportConfig::default());
        let path = write_pdf(&document, &dir.join("out")).unwrap();

        assert!(path.ends_with("Byte Club_Evaluation_Report.pdf"));
        assert!(fs::read(&path).unwrap().starts_with(b"%PDF"));

        fs::remove_dir_all(dir).unwrap();
    }

    fn write_snapshot(snapshot: &TeamSnapshot) -> (PathBuf, PathBuf) {
        let dir = temp_dir();
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("snapshot.json");
        fs::write(&input, serde_json::to_string(snapshot).unwrap()).unwrap();
        (dir, input)
    }

    #[test]
    fn test_score_outside_rubric_is_rejected() {
        let mut snapshot = snapshot();
        snapshot.evaluations[0].rounds[0]
            .questions
            .push(QuestionScore::new(9, 500));
        let (dir, input) = write_snapshot(&snapshot);

        let err = load_snapshot(&input).unwrap_err();
        let chain = format!("{:#}", err);
        assert!(chain.contains("Invalid snapshot"));
        assert!(chain.contains("Grace Hopper"));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_score_above_maximum_is_rejected() {
        let mut snapshot = snapshot();
        snapshot.evaluations[1].rounds[0].questions[0].score = 26;

        let err = check_snapshot(&snapshot).unwrap_err();
        assert!(format!("{:#}", err).contains("Alan Kay"));
    }

    #[test]
    fn test_evaluation_of_another_team_is_rejected() {
        let mut snapshot = snapshot();
        snapshot.evaluations[0].team_id = TeamId::new();
        assert!(check_snapshot(&snapshot).is_err());

        let mut snapshot = self::snapshot();
        snapshot.evaluations[0].event_type = EventType::StartupExpo;
        let err = check_snapshot(&snapshot).unwrap_err();
        assert!(err.to_string().contains("competes in"));
    }

    #[test]
    fn test_missing_snapshot_is_an_error() {
        let err = load_snapshot(Path::new("no/such/snapshot.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read snapshot"));
    }
}
