//! Scoring rubrics.
//!
//! Every event is judged on a fixed, ordered list of parameters. The table is
//! built once on first use and is read-only afterwards; callers reach it only
//! through [`schema_for`] and [`total_max_score`] (or the typed accessors on
//! [`EventType`]).
//!
//! Lookups by string never fail: an unrecognised event type yields an empty
//! schema and a maximum of zero.

use crate::event::EventType;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// A single judged criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ScoringParameter {
    /// 1-based position within the event's rubric
    pub question_number: u32,
    pub parameter_name: String,
    pub max_score: u32,
}

impl ScoringParameter {
    fn new(question_number: u32, parameter_name: &str, max_score: u32) -> Self {
        Self {
            question_number,
            parameter_name: parameter_name.to_string(),
            max_score,
        }
    }

    /// Row label used on reports, e.g. `Technical Depth(25)`.
    pub fn label(&self) -> String {
        format!("{}({})", self.parameter_name, self.max_score)
    }
}

static RUBRICS: Lazy<IndexMap<&'static str, Vec<ScoringParameter>>> = Lazy::new(|| {
    let mut rubrics = IndexMap::new();

    rubrics.insert(
        EventType::PosterPresentation.as_str(),
        vec![
            ScoringParameter::new(1, "Creativity & Visual Appeal", 20),
            ScoringParameter::new(2, "Technical Content", 25),
            ScoringParameter::new(3, "Concept Clarity", 25),
            ScoringParameter::new(4, "Relevance to Theme", 15),
            ScoringParameter::new(5, "Presentation Skills", 15),
        ],
    );

    rubrics.insert(
        EventType::PaperPresentation.as_str(),
        vec![
            ScoringParameter::new(1, "Originality & Innovation", 25),
            ScoringParameter::new(2, "Technical Depth", 25),
            ScoringParameter::new(3, "Presentation Quality", 20),
            ScoringParameter::new(4, "Documentation & Structure", 15),
            ScoringParameter::new(5, "Q&A Performance", 15),
        ],
    );

    rubrics.insert(
        EventType::StartupExpo.as_str(),
        vec![
            ScoringParameter::new(1, "Creativity & Innovation", 20),
            ScoringParameter::new(2, "Technical Feasibility", 20),
            ScoringParameter::new(3, "Problem-Solution Fit", 20),
            ScoringParameter::new(4, "Prototype/Model Quality", 20),
            ScoringParameter::new(5, "Pitch Delivery & Communication", 20),
        ],
    );

    rubrics
});

/// Ordered scoring parameters for `event_type`; empty when the event is unknown.
pub fn schema_for(event_type: &str) -> &'static [ScoringParameter] {
    RUBRICS
        .get(event_type)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Sum of every parameter's maximum for `event_type`; zero when the event is unknown.
pub fn total_max_score(event_type: &str) -> u32 {
    schema_for(event_type).iter().map(|p| p.max_score).sum()
}

/// Look up a single parameter by question number.
pub fn parameter(event_type: &str, question_number: u32) -> Option<&'static ScoringParameter> {
    schema_for(event_type)
        .iter()
        .find(|p| p.question_number == question_number)
}

impl EventType {
    pub fn schema(&self) -> &'static [ScoringParameter] {
        schema_for(self.as_str())
    }

    pub fn total_max_score(&self) -> u32 {
        total_max_score(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_event_has_five_ordered_parameters() {
        for event in EventType::all() {
            let numbers: Vec<u32> = event.schema().iter().map(|p| p.question_number).collect();
            assert_eq!(numbers, vec![1, 2, 3, 4, 5], "{event}");
        }
    }

    #[test]
    fn test_totals_are_one_hundred() {
        assert_eq!(total_max_score("paper-presentation"), 100);
        assert_eq!(total_max_score("poster-presentation"), 100);
        assert_eq!(total_max_score("startup-expo"), 100);
    }

    #[test]
    fn test_unknown_event_is_empty() {
        assert!(schema_for("hackathon").is_empty());
        assert_eq!(total_max_score("hackathon"), 0);
        assert!(schema_for("").is_empty());
    }

    #[test]
    fn test_parameter_lookup() {
        let p = parameter("paper-presentation", 2).unwrap();
        assert_eq!(p.parameter_name, "Technical Depth");
        assert_eq!(p.max_score, 25);
        assert!(parameter("paper-presentation", 6).is_none());
    }

    #[test]
    fn test_label_includes_max() {
        let p = parameter("startup-expo", 4).unwrap();
        assert_eq!(p.label(), "Prototype/Model Quality(20)");
    }
}
