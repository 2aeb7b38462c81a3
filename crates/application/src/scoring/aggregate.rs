//! Score aggregation for a single team.
//!
//! Turns every judge's evaluation of a team into the per-parameter table,
//! per-judge totals, averages and grand total shown on the analytics view and
//! printed on the evaluation report.
//!
//! Averages only count judges that scored the round in question. A judge
//! with no Round 2 record does not drag the Round 2 averages down; inside a
//! round the judge did score, an unanswered question counts as zero.

use super::cell::{Average, ScoreCell};
use scorecard_domain::judge::first_name;
use scorecard_domain::{
    Evaluation, EventType, JudgeId, RoundNumber, Team, TeamId, TeamMember,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Immutable input for one report: the team and every evaluation of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSnapshot {
    pub team: Team,
    #[serde(default)]
    pub evaluations: Vec<Evaluation>,
}

impl TeamSnapshot {
    pub fn new(team: Team, evaluations: Vec<Evaluation>) -> Self {
        Self { team, evaluations }
    }
}

/// One judge column in the scoring table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeColumn {
    pub judge_id: JudgeId,
    pub judge_name: String,
    /// Compact header, e.g. `JUDGE-Ada`
    pub header: String,
}

/// One rubric parameter across all judges and both rounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterRow {
    pub serial: usize,
    pub question_number: u32,
    pub parameter_name: String,
    pub max_score: u32,
    /// `Name(max)`
    pub label: String,
    /// Indexed like [`TeamAnalytics::judges`]
    pub round1: Vec<ScoreCell>,
    pub round2: Vec<ScoreCell>,
    /// All judges, both rounds, missing scores as zero
    pub total: u64,
    pub round1_average: Average,
    pub round2_average: Average,
}

impl ParameterRow {
    pub fn cells(&self, round: RoundNumber) -> &[ScoreCell] {
        match round {
            RoundNumber::One => &self.round1,
            RoundNumber::Two => &self.round2,
        }
    }

    pub fn average(&self, round: RoundNumber) -> Average {
        match round {
            RoundNumber::One => self.round1_average,
            RoundNumber::Two => self.round2_average,
        }
    }
}

/// Stored totals for one judge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgeTotals {
    pub judge_id: JudgeId,
    pub judge_name: String,
    /// `None` when the judge did not score the round
    pub round1: Option<u32>,
    pub round2: Option<u32>,
    pub total: u32,
}

impl JudgeTotals {
    pub fn round(&self, round: RoundNumber) -> ScoreCell {
        match round {
            RoundNumber::One => self.round1.into(),
            RoundNumber::Two => self.round2.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgeRemark {
    pub judge_name: String,
    pub remarks: String,
}

/// A stored total that does not match the scores it summarizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalDiscrepancy {
    pub judge_id: JudgeId,
    pub judge_name: String,
    /// `None` for the evaluation's overall total
    pub round: Option<RoundNumber>,
    pub stored: u64,
    pub recomputed: u64,
}

/// Everything the analytics view and the evaluation report display for a team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamAnalytics {
    pub team_id: TeamId,
    pub team_name: String,
    pub event_type: EventType,
    pub event_label: String,
    pub total_members: u32,
    pub members: Vec<TeamMember>,
    pub judges: Vec<JudgeColumn>,
    pub parameters: Vec<ParameterRow>,
    pub judge_totals: Vec<JudgeTotals>,
    pub round1_average: Average,
    pub round2_average: Average,
    pub grand_average: Average,
    pub grand_total: u64,
    pub max_possible_marks: u64,
    /// Only judges that wrote something, in evaluation order
    pub remarks: Vec<JudgeRemark>,
    pub discrepancies: Vec<TotalDiscrepancy>,
}

impl TeamAnalytics {
    pub fn judge_count(&self) -> usize {
        self.judges.len()
    }

    pub fn round_average(&self, round: RoundNumber) -> Average {
        match round {
            RoundNumber::One => self.round1_average,
            RoundNumber::Two => self.round2_average,
        }
    }
}

/// Aggregate a team's evaluations.
///
/// Pure apart from logging: the same snapshot always yields the same
/// analytics, and nothing about the input is an error. Each judge appears
/// once; a repeated evaluation from the same judge is ignored.
pub fn aggregate(snapshot: &TeamSnapshot) -> TeamAnalytics {
    let team = &snapshot.team;
    let evaluations = distinct_judges(&snapshot.evaluations);
    let schema = team.event_type.schema();

    let judges = evaluations
        .iter()
        .map(|e| JudgeColumn {
            judge_id: e.judge_id,
            judge_name: e.judge_name.clone(),
            header: format!("JUDGE-{}", first_name(&e.judge_name)),
        })
        .collect();

    let parameters = schema
        .iter()
        .enumerate()
        .map(|(idx, param)| {
            let q = param.question_number;
            let round1 = cells(&evaluations, RoundNumber::One, q);
            let round2 = cells(&evaluations, RoundNumber::Two, q);
            let total = round1
                .iter()
                .chain(round2.iter())
                .map(|c| u64::from(c.or_zero()))
                .sum();

            ParameterRow {
                serial: idx + 1,
                question_number: q,
                parameter_name: param.parameter_name.clone(),
                max_score: param.max_score,
                label: param.label(),
                round1,
                round2,
                total,
                round1_average: question_average(&evaluations, RoundNumber::One, q),
                round2_average: question_average(&evaluations, RoundNumber::Two, q),
            }
        })
        .collect();

    let judge_totals = evaluations
        .iter()
        .map(|e| JudgeTotals {
            judge_id: e.judge_id,
            judge_name: e.judge_name.clone(),
            round1: e.round(RoundNumber::One).map(|r| r.total_score),
            round2: e.round(RoundNumber::Two).map(|r| r.total_score),
            total: e.total_score,
        })
        .collect();

    let grand_average = Average::of(evaluations.iter().map(|e| e.total_score));

    let remarks = evaluations
        .iter()
        .filter(|e| e.has_remarks())
        .map(|e| JudgeRemark {
            judge_name: e.judge_name.clone(),
            remarks: e.remarks.trim().to_string(),
        })
        .collect();

    let discrepancies = find_discrepancies(&evaluations);
    for d in &discrepancies {
        warn!(
            team_id = %team.id,
            judge_id = %d.judge_id,
            round = ?d.round.map(|r| r.as_u8()),
            stored = d.stored,
            recomputed = d.recomputed,
            "Stored total does not match question scores"
        );
    }

    TeamAnalytics {
        team_id: team.id,
        team_name: team.name.clone(),
        event_type: team.event_type,
        event_label: team.event_type.label().to_string(),
        total_members: team.total_members,
        members: team.members.clone(),
        judges,
        parameters,
        judge_totals,
        round1_average: round_average(&evaluations, RoundNumber::One),
        round2_average: round_average(&evaluations, RoundNumber::Two),
        grand_average,
        grand_total: evaluations.iter().map(|e| u64::from(e.total_score)).sum(),
        max_possible_marks: max_possible_marks(team.event_type, evaluations.len()),
        remarks,
        discrepancies,
    }
}

/// Highest achievable grand total: every judge awards full marks in both rounds.
pub fn max_possible_marks(event: EventType, judges: usize) -> u64 {
    u64::from(event.total_max_score()) * RoundNumber::ALL.len() as u64 * judges as u64
}

fn distinct_judges(evaluations: &[Evaluation]) -> Vec<&Evaluation> {
    let mut seen: Vec<JudgeId> = Vec::with_capacity(evaluations.len());
    let mut distinct = Vec::with_capacity(evaluations.len());

    for e in evaluations {
        if seen.contains(&e.judge_id) {
            warn!(
                judge_id = %e.judge_id,
                evaluation_id = %e.id,
                "Ignoring repeated evaluation from the same judge"
            );
            continue;
        }
        seen.push(e.judge_id);
        distinct.push(e);
    }
    distinct
}

fn cells(evaluations: &[&Evaluation], round: RoundNumber, question: u32) -> Vec<ScoreCell> {
    evaluations
        .iter()
        .map(|e| e.score_for(round, question).into())
        .collect()
}

fn question_average(evaluations: &[&Evaluation], round: RoundNumber, question: u32) -> Average {
    Average::of(
        evaluations
            .iter()
            .filter_map(|e| e.round(round))
            .map(|r| r.score_for(question).unwrap_or(0)),
    )
}

fn round_average(evaluations: &[&Evaluation], round: RoundNumber) -> Average {
    Average::of(
        evaluations
            .iter()
            .filter_map(|e| e.round(round))
            .map(|r| r.total_score),
    )
}

fn find_discrepancies(evaluations: &[&Evaluation]) -> Vec<TotalDiscrepancy> {
    let mut found = Vec::new();

    for e in evaluations {
        for number in RoundNumber::ALL {
            if let Some(round) = e.round(number) {
                let recomputed = round.recomputed_total();
                if u64::from(round.total_score) != recomputed {
                    found.push(TotalDiscrepancy {
                        judge_id: e.judge_id,
                        judge_name: e.judge_name.clone(),
                        round: Some(number),
                        stored: u64::from(round.total_score),
                        recomputed,
                    });
                }
            }
        }

        let rounds_sum: u64 = RoundNumber::ALL
            .iter()
            .map(|r| u64::from(e.round_total(*r)))
            .sum();
        if u64::from(e.total_score) != rounds_sum {
            found.push(TotalDiscrepancy {
                judge_id: e.judge_id,
                judge_name: e.judge_name.clone(),
                round: None,
                stored: u64::from(e.total_score),
                recomputed: rounds_sum,
            });
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use scorecard_domain::{QuestionScore, Round};

    fn evaluation(team: &Team, judge: &str, rounds: Vec<Round>) -> Evaluation {
        Evaluation::new(team.id, JudgeId::new(), judge, team.event_type, rounds, "")
    }

    fn scored(number: RoundNumber, scores: &[u32]) -> Round {
        Round::new(
            number,
            scores
                .iter()
                .enumerate()
                .map(|(i, s)| QuestionScore::new(i as u32 + 1, *s))
                .collect(),
        )
    }

    #[test]
    fn test_missing_question_in_present_round_counts_as_zero_in_average() {
        let team = Team::new("T", EventType::PaperPresentation, vec![]);
        let a = evaluation(&team, "A", vec![scored(RoundNumber::One, &[20])]);
        let b = evaluation(
            &team,
            "B",
            vec![Round::new(RoundNumber::One, vec![QuestionScore::new(2, 10)])],
        );

        let analytics = aggregate(&TeamSnapshot::new(team, vec![a, b]));
        let q1 = &analytics.parameters[0];

        assert_eq!(q1.round1[1], ScoreCell::missing());
        assert_eq!(q1.round1_average.value(), Some(10.0));
        assert_eq!(q1.round2_average.value(), None);
    }

    #[test]
    fn test_repeated_judge_is_ignored() {
        let team = Team::new("T", EventType::StartupExpo, vec![]);
        let first = evaluation(&team, "A", vec![scored(RoundNumber::One, &[10])]);
        let mut again = first.clone();
        again.replace_scores(vec![scored(RoundNumber::One, &[20])], "");

        let analytics = aggregate(&TeamSnapshot::new(team, vec![first, again]));

        assert_eq!(analytics.judge_count(), 1);
        assert_eq!(analytics.grand_total, 10);
        assert_eq!(analytics.max_possible_marks, 200);
    }

    #[test]
    fn test_stored_totals_are_displayed_and_mismatches_reported() {
        let team = Team::new("T", EventType::StartupExpo, vec![]);
        let mut e = evaluation(&team, "A", vec![scored(RoundNumber::One, &[10, 10])]);
        e.rounds[0].total_score = 25;

        let analytics = aggregate(&TeamSnapshot::new(team, vec![e]));

        assert_eq!(analytics.judge_totals[0].round1, Some(25));
        assert_eq!(
            analytics.discrepancies,
            vec![
                TotalDiscrepancy {
                    judge_id: analytics.judges[0].judge_id,
                    judge_name: "A".to_string(),
                    round: Some(RoundNumber::One),
                    stored: 25,
                    recomputed: 20,
                },
                TotalDiscrepancy {
                    judge_id: analytics.judges[0].judge_id,
                    judge_name: "A".to_string(),
                    round: None,
                    stored: 20,
                    recomputed: 25,
                },
            ]
        );
    }
}
