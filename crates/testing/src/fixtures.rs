//! Test fixtures for generating domain entities with realistic data.

use crate::builders::{EvaluationBuilder, JudgeBuilder};
use fake::{
    faker::{
        company::en::CompanyName,
        internet::en::SafeEmail,
        lorem::en::Sentence,
        name::en::{FirstName, Name},
    },
    Fake,
};
use scorecard_domain::{Evaluation, EventType, Judge, RoundNumber, Team, TeamMember};

/// Create an active judge assigned to `events`, with password `password`
pub fn create_test_judge(events: &[EventType]) -> Judge {
    JudgeBuilder::new()
        .with_name(Name().fake::<String>())
        .with_email(SafeEmail().fake::<String>())
        .with_events(events)
        .build()
}

/// Create a random team member, with an email half of the time
pub fn create_test_member() -> TeamMember {
    let member = TeamMember::new(FirstName().fake::<String>());
    if (0..2).fake::<u8>() == 0 {
        member.with_email(SafeEmail().fake::<String>())
    } else {
        member
    }
}

/// Create a team of 1 to 4 members for `event`
pub fn create_test_team(event: EventType) -> Team {
    let size = (1..5).fake::<usize>();
    Team::new(
        CompanyName().fake::<String>(),
        event,
        (0..size).map(|_| create_test_member()).collect(),
    )
}

/// Full marks on every rubric question
pub fn full_marks(event: EventType) -> Vec<u32> {
    event.schema().iter().map(|p| p.max_score).collect()
}

/// Random in-range scores for every rubric question
pub fn random_scores(event: EventType) -> Vec<u32> {
    event
        .schema()
        .iter()
        .map(|p| (0..=p.max_score).fake::<u32>())
        .collect()
}

/// A two-round evaluation with random in-range scores and remarks
pub fn create_test_evaluation(team: &Team, judge: &Judge) -> Evaluation {
    EvaluationBuilder::new(team, judge)
        .with_round(RoundNumber::One, &random_scores(team.event_type))
        .with_round(RoundNumber::Two, &random_scores(team.event_type))
        .with_remarks(Sentence(3..8).fake::<String>())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_scores_respect_rubric() {
        for event in EventType::ALL {
            let team = create_test_team(event);
            let judge = create_test_judge(&[event]);
            let evaluation = create_test_evaluation(&team, &judge);

            assert!(scorecard_domain::evaluation::check_scores(event, &evaluation.rounds).is_ok());
            assert!(evaluation.total_score <= 2 * event.total_max_score());
            assert!((1..=4).contains(&team.total_members));
        }
    }

    #[test]
    fn test_full_marks_sum_to_rubric_max() {
        for event in EventType::ALL {
            assert_eq!(full_marks(event).iter().sum::<u32>(), event.total_max_score());
        }
    }
}
