//! Evaluation submission validation rules
//!
//! Structural checks (ids, round numbers, sizes) run without context; rubric
//! checks need the team's event and run through [`SubmitEvaluationRequest::validate_for_event`].

use super::{Validatable, ValidationResult, ValidationRules};
use scorecard_domain::evaluation::check_scores;
use scorecard_domain::{EventType, QuestionScore, Round, RoundNumber, TeamId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundInput {
    pub round_number: u8,
    pub questions: Vec<QuestionScore>,
}

/// A judge's scores for one team
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitEvaluationRequest {
    pub team_id: String,
    pub rounds: Vec<RoundInput>,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl SubmitEvaluationRequest {
    pub const MAX_REMARKS_LENGTH: usize = 2000;

    pub fn team_id(&self) -> Option<TeamId> {
        self.team_id.parse().ok()
    }

    /// Typed rounds; inputs with an out-of-range round number are dropped.
    pub fn rounds(&self) -> Vec<Round> {
        self.rounds
            .iter()
            .filter_map(|r| {
                RoundNumber::try_from(r.round_number)
                    .ok()
                    .map(|n| Round::new(n, r.questions.clone()))
            })
            .collect()
    }

    /// Check the scores against the rubric of `event`.
    pub fn validate_for_event(&self, event: EventType) -> ValidationResult {
        let mut result = self.validate_all();
        if !result.valid {
            return result;
        }

        if let Err(err) = check_scores(event, &self.rounds()) {
            result.add_field_error("rounds", err.to_string());
        }
        result
    }
}

impl Validatable for SubmitEvaluationRequest {
    fn validate_all(&self) -> ValidationResult {
        let mut result = ValidationResult::success();

        if self.team_id().is_none() {
            result.add_field_error("team_id", "Invalid team id");
        }

        result.merge(ValidationRules::validate_list_size(
            &self.rounds,
            "rounds",
            Some(1),
            Some(RoundNumber::ALL.len()),
        ));

        for round in &self.rounds {
            if let Err(err) = RoundNumber::try_from(round.round_number) {
                result.add_field_error("rounds", err.to_string());
            }
        }

        if let Some(ref remarks) = self.remarks {
            result.merge(ValidationRules::validate_length(
                remarks,
                "remarks",
                None,
                Some(Self::MAX_REMARKS_LENGTH),
            ));
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(rounds: Vec<RoundInput>) -> SubmitEvaluationRequest {
        SubmitEvaluationRequest {
            team_id: TeamId::new().to_string(),
            rounds,
            remarks: None,
        }
    }

    fn round(number: u8, scores: &[u32]) -> RoundInput {
        RoundInput {
            round_number: number,
            questions: scores
                .iter()
                .enumerate()
                .map(|(i, s)| QuestionScore::new(i as u32 + 1, *s))
                .collect(),
        }
    }

    #[test]
    fn test_valid_submission() {
        let req = request(vec![round(1, &[10, 10, 10, 10, 10]), round(2, &[5])]);
        assert!(req.validate_for_event(EventType::PaperPresentation).valid);
        assert_eq!(req.rounds().len(), 2);
    }

    #[test]
    fn test_round_three_is_rejected() {
        let req = request(vec![round(3, &[1])]);
        let result = req.validate_all();
        assert_eq!(result.field_errors["rounds"], vec!["Round number must be 1 or 2, got 3"]);
        assert!(req.rounds().is_empty());
    }

    #[test]
    fn test_rubric_limits_apply() {
        // Poster Q1 is out of 20.
        let req = request(vec![round(1, &[21])]);
        let result = req.validate_for_event(EventType::PosterPresentation);
        assert_eq!(
            result.field_errors["rounds"],
            vec!["Score 21 for question 1 exceeds maximum of 20"]
        );

        // The same score is fine under the paper rubric.
        assert!(req.validate_for_event(EventType::PaperPresentation).valid);
    }

    #[test]
    fn test_bad_team_id_and_empty_rounds() {
        let req = SubmitEvaluationRequest {
            team_id: "team-7".to_string(),
            rounds: vec![],
            remarks: Some("x".repeat(SubmitEvaluationRequest::MAX_REMARKS_LENGTH + 1)),
        };
        let result = req.validate_all();
        assert!(result.field_errors.contains_key("team_id"));
        assert!(result.field_errors.contains_key("rounds"));
        assert!(result.field_errors.contains_key("remarks"));
    }
}
