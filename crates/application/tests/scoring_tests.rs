//! Tests for score aggregation and the report layout
//!
//! Covers judge exclusion in averages, placeholders for missing scores,
//! maximum marks, remarks and the leaderboard ordering.

use proptest::prelude::*;
use scorecard_application::report::{RemarksBlock, ReportDocument, NO_REMARKS};
use scorecard_application::scoring::{aggregate, max_possible_marks, rank_teams, TeamSnapshot};
use scorecard_common::config::ReportConfig;
use scorecard_domain::rubric::{schema_for, total_max_score};
use scorecard_domain::{Evaluation, EventType, JudgeId, Round, RoundNumber};
use scorecard_testing::strategies::{event_type, panel_scores};
use scorecard_testing::*;

// ============================================================================
// Scoring schema registry
// ============================================================================

#[test]
fn test_total_max_matches_schema_for_every_event() {
    for event in EventType::ALL {
        let schema = schema_for(event.as_str());
        assert_eq!(schema.len(), 5);
        assert_eq!(
            total_max_score(event.as_str()),
            schema.iter().map(|p| p.max_score).sum::<u32>()
        );
    }
}

#[test]
fn test_unknown_event_has_no_rubric() {
    assert!(schema_for("hackathon").is_empty());
    assert_eq!(total_max_score("hackathon"), 0);
}

// ============================================================================
// Aggregation
// ============================================================================

#[test]
fn test_judge_without_round_is_excluded_from_averages() {
    // Arrange
    let team = TeamBuilder::new().with_event(EventType::PaperPresentation).build();
    let a = JudgeBuilder::new().with_name("Ada Lovelace").build();
    let b = JudgeBuilder::new().with_name("Barbara Liskov").build();

    let eval_a = EvaluationBuilder::new(&team, &a)
        .with_round(RoundNumber::One, &[25, 25, 20, 15, 15])
        .build();
    let eval_b = EvaluationBuilder::new(&team, &b)
        .with_round(RoundNumber::Two, &[10, 10, 10, 10, 10])
        .build();

    // Act
    let analytics = aggregate(&TeamSnapshot::new(team, vec![eval_a, eval_b]));

    // Assert
    let q1 = &analytics.parameters[0];
    assert_eq!(q1.round1_average.display_question(), "25.0");
    assert_eq!(q1.round1[1].display(), "-");
    assert_eq!(q1.round1[1].or_zero(), 0);
    assert_eq!(q1.round2[0].display(), "-");
    assert_eq!(q1.total, 35);

    assert_eq!(analytics.round1_average.display_total(), "100.00");
    assert_eq!(analytics.round2_average.display_total(), "50.00");
    assert_eq!(analytics.judge_totals[1].round(RoundNumber::One).display(), "-");
}

#[test]
fn test_two_judges_round_one_only() {
    // Arrange
    let team = TeamBuilder::new().with_event(EventType::PaperPresentation).build();
    let evaluations: Vec<Evaluation> = (0..2)
        .map(|_| {
            EvaluationBuilder::new(&team, &create_test_judge(&[EventType::PaperPresentation]))
                .with_round(RoundNumber::One, &[10, 10, 10, 10, 10])
                .build()
        })
        .collect();

    // Act
    let analytics = aggregate(&TeamSnapshot::new(team, evaluations));

    // Assert
    assert_eq!(analytics.grand_total, 100);
    assert_eq!(analytics.max_possible_marks, 400);
    assert_eq!(analytics.grand_average.display_total(), "50.00");
    assert_eq!(analytics.round2_average.display_total(), "-");
    assert!(analytics.discrepancies.is_empty());
}

#[test]
fn test_no_evaluations() {
    // Arrange
    let team = create_test_team(EventType::StartupExpo);
    let members = team.total_members;

    // Act
    let analytics = aggregate(&TeamSnapshot::new(team, vec![]));

    // Assert
    assert_eq!(analytics.max_possible_marks, 0);
    assert_eq!(analytics.grand_total, 0);
    assert_eq!(analytics.total_members, members);
    assert_eq!(analytics.round1_average.display_total(), "-");
    assert_eq!(analytics.round2_average.display_total(), "-");
    assert_eq!(analytics.grand_average.display_total(), "-");
    for row in &analytics.parameters {
        assert!(row.round1.is_empty());
        assert_eq!(row.round1_average.display_question(), "-");
        assert_eq!(row.total, 0);
    }
}

#[test]
fn test_max_possible_marks() {
    assert_eq!(max_possible_marks(EventType::PosterPresentation, 3), 600);
    assert_eq!(max_possible_marks(EventType::StartupExpo, 0), 0);
}

#[test]
fn test_judge_headers_use_first_name() {
    let team = TeamBuilder::new().build();
    let judge = JudgeBuilder::new().with_name("  Grace   Brewster Hopper ").build();
    let evaluation = EvaluationBuilder::new(&team, &judge)
        .with_round(RoundNumber::One, &[1])
        .build();

    let analytics = aggregate(&TeamSnapshot::new(team, vec![evaluation]));
    assert_eq!(analytics.judges[0].header, "JUDGE-Grace");
}

#[test]
fn test_empty_round_counts_as_absent() {
    let team = TeamBuilder::new().build();
    let judge = JudgeBuilder::new().build();
    let evaluation = Evaluation::new(
        team.id,
        judge.id,
        judge.name.clone(),
        team.event_type,
        vec![Round::new(RoundNumber::Two, vec![])],
        "",
    );

    let analytics = aggregate(&TeamSnapshot::new(team, vec![evaluation]));

    assert_eq!(analytics.judge_totals[0].round2, None);
    assert_eq!(analytics.round2_average.display_total(), "-");
    assert_eq!(analytics.grand_average.display_total(), "0.00");
    assert_eq!(analytics.max_possible_marks, 200);
}

#[test]
fn test_judge_with_no_scored_rounds_still_counts() {
    // Arrange
    let team = TeamBuilder::new().with_event(EventType::StartupExpo).build();
    let scorer = JudgeBuilder::new().with_name("Ada").build();
    let silent = JudgeBuilder::new().with_name("Bob").build();
    let evaluations = vec![
        EvaluationBuilder::new(&team, &scorer)
            .with_round(RoundNumber::One, &[20, 20, 20, 20, 20])
            .build(),
        EvaluationBuilder::new(&team, &silent)
            .with_remarks("Arrived late")
            .build(),
    ];

    // Act
    let analytics = aggregate(&TeamSnapshot::new(team, evaluations));

    // Assert
    assert_eq!(analytics.judge_count(), 2);
    assert_eq!(analytics.parameters[0].round1[1].display(), "-");
    assert_eq!(analytics.parameters[0].round1_average.display_question(), "20.0");
    assert_eq!(analytics.round1_average.display_total(), "100.00");
    // Every evaluation's total counts toward the grand average and the maximum
    assert_eq!(analytics.grand_average.display_total(), "50.00");
    assert_eq!(analytics.max_possible_marks, 400);
    assert_eq!(analytics.remarks.len(), 1);
}

#[test]
fn test_large_stored_totals_do_not_overflow() {
    let team = TeamBuilder::new().with_event(EventType::PaperPresentation).build();
    let evaluations: Vec<Evaluation> = (0..2)
        .map(|_| {
            EvaluationBuilder::new(&team, &JudgeBuilder::new().build())
                .with_round(RoundNumber::One, &[10])
                .with_stored_total(3_000_000_000)
                .build()
        })
        .collect();

    let analytics = aggregate(&TeamSnapshot::new(team.clone(), evaluations.clone()));
    assert_eq!(analytics.grand_total, 6_000_000_000);
    assert_eq!(analytics.discrepancies.len(), 2);
    assert!(analytics.discrepancies.iter().all(|d| d.round.is_none() && d.recomputed == 10));

    let board = rank_teams(&[team], &evaluations);
    assert_eq!(board[0].total_marks, 6_000_000_000);
}

// ============================================================================
// Report layout
// ============================================================================

#[test]
fn test_remarks_keep_evaluation_order() {
    // Arrange
    let team = TeamBuilder::new().with_name("Byte Club").build();
    let judges: Vec<_> = ["Zed", "Amy", "Kim"]
        .iter()
        .map(|n| JudgeBuilder::new().with_name(*n).build())
        .collect();
    let evaluations = vec![
        EvaluationBuilder::new(&team, &judges[0]).with_remarks("Great pitch").build(),
        EvaluationBuilder::new(&team, &judges[1]).build(),
        EvaluationBuilder::new(&team, &judges[2]).with_remarks("Needs data").build(),
    ];

    // Act
    let doc = ReportDocument::build(
        &aggregate(&TeamSnapshot::new(team, evaluations)),
        &ReportConfig::default(),
    );

    // Assert
    let RemarksBlock::Provided(entries) = doc.remarks else {
        panic!("expected remarks");
    };
    let names: Vec<&str> = entries.iter().map(|r| r.judge_name.as_str()).collect();
    assert_eq!(names, vec!["Zed", "Kim"]);
    assert_eq!(doc.file_name, "Byte Club_Evaluation_Report.pdf");
}

#[test]
fn test_report_without_remarks() {
    let team = TeamBuilder::new().build();
    let judge = JudgeBuilder::new().build();
    let evaluation = EvaluationBuilder::new(&team, &judge)
        .with_round(RoundNumber::One, &[5])
        .build();

    let doc = ReportDocument::build(
        &aggregate(&TeamSnapshot::new(team, vec![evaluation])),
        &ReportConfig::default(),
    );

    assert_eq!(doc.remarks, RemarksBlock::NoneProvided);
    assert_eq!(NO_REMARKS, "No remarks provided");
    assert_eq!(doc.total_line, "TOTAL MARKS: 5 / 200");
}

// ============================================================================
// Leaderboard
// ============================================================================

#[test]
fn test_leaderboard_from_fixtures() {
    let event = EventType::PosterPresentation;
    let teams: Vec<_> = (0..4).map(|_| create_test_team(event)).collect();
    let judge = create_test_judge(&[event]);
    let evaluations: Vec<_> = teams
        .iter()
        .take(3)
        .map(|t| create_test_evaluation(t, &judge))
        .collect();

    let board = rank_teams(&teams, &evaluations);

    assert_eq!(board.len(), 3);
    assert!(board.windows(2).all(|w| w[0].total_marks >= w[1].total_marks));
    assert_eq!(
        board.iter().map(|e| e.rank).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    for entry in &board {
        assert_eq!(entry.total_marks, entry.round1_marks + entry.round2_marks);
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_row_total_is_sum_of_present_scores(
        (event, panel) in event_type().prop_flat_map(|e| (Just(e), panel_scores(e, 4)))
    ) {
        let team = TeamBuilder::new().with_event(event).build();
        let evaluations: Vec<Evaluation> = panel
            .iter()
            .map(|(r1, r2)| {
                let judge = JudgeBuilder::new().with_events(&[event]).build();
                EvaluationBuilder::new(&team, &judge)
                    .with_questions(RoundNumber::One, r1.clone())
                    .with_questions(RoundNumber::Two, r2.clone())
                    .build()
            })
            .collect();

        let analytics = aggregate(&TeamSnapshot::new(team, evaluations.clone()));

        for row in &analytics.parameters {
            let expected: u64 = panel
                .iter()
                .flat_map(|(r1, r2)| r1.iter().chain(r2.iter()))
                .filter(|q| q.question_number == row.question_number)
                .map(|q| u64::from(q.score))
                .sum();
            prop_assert_eq!(row.total, expected);
            prop_assert_eq!(row.round1.len(), panel.len());
        }

        let grand: u64 = analytics.parameters.iter().map(|r| r.total).sum();
        prop_assert_eq!(analytics.grand_total, grand);
        prop_assert_eq!(
            analytics.max_possible_marks,
            u64::from(event.total_max_score()) * 2 * panel.len() as u64
        );
        prop_assert!(analytics.grand_total <= analytics.max_possible_marks);
        prop_assert!(analytics.discrepancies.is_empty());
    }

    #[test]
    fn prop_question_average_only_counts_judges_with_round(
        panel in panel_scores(EventType::StartupExpo, 5)
    ) {
        let team = TeamBuilder::new().with_event(EventType::StartupExpo).build();
        let evaluations: Vec<Evaluation> = panel
            .iter()
            .map(|(r1, _)| {
                Evaluation::new(
                    team.id,
                    JudgeId::new(),
                    "Judge",
                    team.event_type,
                    vec![Round::new(RoundNumber::One, r1.clone())],
                    "",
                )
            })
            .collect();

        let analytics = aggregate(&TeamSnapshot::new(team, evaluations));
        let scored = panel.iter().filter(|(r1, _)| !r1.is_empty()).count();

        for row in &analytics.parameters {
            match row.round1_average.value() {
                None => prop_assert_eq!(scored, 0),
                Some(avg) => {
                    let sum: u32 = row.round1.iter().map(|c| c.or_zero()).sum();
                    prop_assert!((avg - f64::from(sum) / scored as f64).abs() < 1e-9);
                }
            }
        }
    }
}
