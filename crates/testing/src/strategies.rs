//! Proptest strategies for scoring data.

use proptest::prelude::*;
use scorecard_domain::{EventType, QuestionScore};

pub fn event_type() -> impl Strategy<Value = EventType> {
    prop::sample::select(EventType::ALL.to_vec())
}

/// In-range scores for a subset of the event's questions, in rubric order.
/// Empty when every question was skipped.
pub fn round_scores(event: EventType) -> impl Strategy<Value = Vec<QuestionScore>> {
    let per_question: Vec<_> = event
        .schema()
        .iter()
        .map(|p| {
            let number = p.question_number;
            prop::option::of(0..=p.max_score)
                .prop_map(move |s| s.map(|s| QuestionScore::new(number, s)))
        })
        .collect();

    per_question.prop_map(|scores| scores.into_iter().flatten().collect())
}

/// Up to `max_judges` judges' optional Round 1 and Round 2 scores
pub fn panel_scores(
    event: EventType,
    max_judges: usize,
) -> impl Strategy<Value = Vec<(Vec<QuestionScore>, Vec<QuestionScore>)>> {
    prop::collection::vec((round_scores(event), round_scores(event)), 0..=max_judges)
}
