//! Leaderboard ranking for an event.

use scorecard_domain::{Evaluation, RoundNumber, Team, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub team_id: TeamId,
    pub team_name: String,
    pub total_members: u32,
    /// Sum of every judge's Round 1 total
    pub round1_marks: u64,
    pub round2_marks: u64,
    /// Sum of every evaluation's overall total
    pub total_marks: u64,
    pub evaluation_count: u32,
}

/// Rank teams by total marks, highest first, ties broken by team name.
///
/// Teams nobody has evaluated yet are left off the board.
pub fn rank_teams(teams: &[Team], evaluations: &[Evaluation]) -> Vec<LeaderboardEntry> {
    let mut by_team: HashMap<TeamId, Vec<&Evaluation>> = HashMap::new();
    for e in evaluations {
        by_team.entry(e.team_id).or_default().push(e);
    }

    let mut entries: Vec<LeaderboardEntry> = teams
        .iter()
        .filter_map(|team| {
            let evals = by_team.get(&team.id)?;
            Some(LeaderboardEntry {
                rank: 0,
                team_id: team.id,
                team_name: team.name.clone(),
                total_members: team.total_members,
                round1_marks: marks(evals, |e| e.round_total(RoundNumber::One)),
                round2_marks: marks(evals, |e| e.round_total(RoundNumber::Two)),
                total_marks: marks(evals, |e| e.total_score),
                evaluation_count: evals.len() as u32,
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        b.total_marks
            .cmp(&a.total_marks)
            .then_with(|| a.team_name.cmp(&b.team_name))
    });

    for (idx, entry) in entries.iter_mut().enumerate() {
        entry.rank = idx as u32 + 1;
    }

    entries
}

fn marks(evaluations: &[&Evaluation], pick: impl Fn(&Evaluation) -> u32) -> u64 {
    evaluations.iter().map(|e| u64::from(pick(e))).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scorecard_domain::{EventType, JudgeId, QuestionScore, Round};

    fn eval(team: &Team, r1: u32, r2: Option<u32>) -> Evaluation {
        let mut rounds = vec![Round::new(RoundNumber::One, vec![QuestionScore::new(1, r1)])];
        if let Some(score) = r2 {
            rounds.push(Round::new(RoundNumber::Two, vec![QuestionScore::new(1, score)]));
        }
        Evaluation::new(team.id, JudgeId::new(), "J", team.event_type, rounds, "")
    }

    #[test]
    fn test_ranking_order_and_marks() {
        let alpha = Team::new("Alpha", EventType::StartupExpo, vec![]);
        let beta = Team::new("Beta", EventType::StartupExpo, vec![]);
        let idle = Team::new("Idle", EventType::StartupExpo, vec![]);

        let evaluations = vec![
            eval(&alpha, 10, Some(5)),
            eval(&beta, 20, None),
            eval(&beta, 12, Some(3)),
        ];

        let board = rank_teams(&[alpha.clone(), beta.clone(), idle], &evaluations);

        assert_eq!(board.len(), 2);
        assert_eq!(board[0].team_name, "Beta");
        assert_eq!(board[0].rank, 1);
        assert_eq!(board[0].round1_marks, 32);
        assert_eq!(board[0].round2_marks, 3);
        assert_eq!(board[0].total_marks, 35);
        assert_eq!(board[0].evaluation_count, 2);
        assert_eq!(board[1].team_id, alpha.id);
        assert_eq!(board[1].rank, 2);
    }

    #[test]
    fn test_ties_are_broken_by_name() {
        let zeta = Team::new("Zeta", EventType::StartupExpo, vec![]);
        let eta = Team::new("Eta", EventType::StartupExpo, vec![]);
        let evaluations = vec![eval(&zeta, 10, None), eval(&eta, 10, None)];

        let board = rank_teams(&[zeta, eta], &evaluations);
        let names: Vec<&str> = board.iter().map(|e| e.team_name.as_str()).collect();
        assert_eq!(names, vec!["Eta", "Zeta"]);
    }

    #[test]
    fn test_marks_beyond_u32_range() {
        let team = Team::new("Imported", EventType::StartupExpo, vec![]);
        let mut big = eval(&team, 10, None);
        big.total_score = u32::MAX;
        let evaluations = vec![big.clone(), big];

        let board = rank_teams(&[team], &evaluations);

        assert_eq!(board[0].total_marks, 2 * u64::from(u32::MAX));
        assert_eq!(board[0].round1_marks, 20);
    }
}
