//! Rubric commands

use anyhow::Result;
use scorecard_domain::{rubric, EventType, ScoringParameter};
use serde::Serialize;

use crate::output::{colors, JsonFormatter, OutputFormat, PlainFormatter, TableFormatter};

#[derive(Debug, Serialize)]
pub struct RubricView {
    pub event_type: String,
    pub parameters: Vec<ScoringParameter>,
    pub total_max_score: u32,
}

impl RubricView {
    /// Unknown events get an empty rubric with a maximum of 0.
    pub fn for_event(event_type: &str) -> Self {
        Self {
            event_type: event_type.to_string(),
            parameters: rubric::schema_for(event_type).to_vec(),
            total_max_score: rubric::total_max_score(event_type),
        }
    }
}

/// Print one event's rubric, or every rubric when no event is given
pub fn show(event: Option<String>, format: OutputFormat) -> Result<()> {
    let views: Vec<RubricView> = match event {
        Some(event) => vec![RubricView::for_event(&event)],
        None => EventType::ALL
            .iter()
            .map(|e| RubricView::for_event(e.as_str()))
            .collect(),
    };

    match format {
        OutputFormat::Json => println!("{}", JsonFormatter::format(&views)?),
        OutputFormat::Plain => println!("{}", PlainFormatter::format(&views)?),
        OutputFormat::Table => {
            for view in &views {
                println!("{}", render_table(view));
            }
        }
    }

    Ok(())
}

pub fn render_table(view: &RubricView) -> String {
    let heading = match view.event_type.parse::<EventType>() {
        Ok(event) => format!("{} ({})", event.label(), view.event_type),
        Err(_) => view.event_type.clone(),
    };

    if view.parameters.is_empty() {
        return format!(
            "{}\n{}\n",
            colors::bold(&heading),
            colors::warning("No rubric defined for this event.")
        );
    }

    let rows: Vec<Vec<String>> = view
        .parameters
        .iter()
        .map(|p| {
            vec![
                p.question_number.to_string(),
                p.parameter_name.clone(),
                p.max_score.to_string(),
            ]
        })
        .collect();

    format!(
        "{}\n{}\n{}\n",
        colors::bold(&heading),
        TableFormatter::simple(&["Q", "Parameter", "Max"], &rows),
        colors::dim(&format!("Total: {}", view.total_max_score))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_event_rubric() {
        let view = RubricView::for_event("startup-expo");
        assert_eq!(view.parameters.len(), 5);
        assert_eq!(view.total_max_score, 100);

        let rendered = render_table(&view);
        assert!(rendered.contains("Pitch Delivery & Communication"));
        assert!(rendered.contains("Total: 100"));
    }

    #[test]
    fn test_unknown_event_rubric_is_empty() {
        let view = RubricView::for_event("hackathon");
        assert!(view.parameters.is_empty());
        assert_eq!(view.total_max_score, 0);
        assert!(render_table(&view).contains("No rubric defined"));
    }
}
