//! Cell values for score tables.
//!
//! A judge who did not score a question leaves a hole in the table. The hole
//! prints as a placeholder but contributes zero to any sum, so both
//! projections live on the type instead of being decided at each call site.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Printed wherever a score or average does not exist.
pub const PLACEHOLDER: &str = "-";

/// Decimal places for per-question averages.
pub const QUESTION_AVERAGE_PRECISION: usize = 1;

/// Decimal places for round and grand total averages.
pub const TOTAL_AVERAGE_PRECISION: usize = 2;

/// A single judge's score for one question in one round, if given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreCell(Option<u32>);

impl ScoreCell {
    pub fn present(score: u32) -> Self {
        Self(Some(score))
    }

    pub fn missing() -> Self {
        Self(None)
    }

    pub fn value(&self) -> Option<u32> {
        self.0
    }

    pub fn is_missing(&self) -> bool {
        self.0.is_none()
    }

    /// Contribution to a sum.
    pub fn or_zero(&self) -> u32 {
        self.0.unwrap_or(0)
    }

    /// Table text: the score, or the placeholder.
    pub fn display(&self) -> String {
        match self.0 {
            Some(score) => score.to_string(),
            None => PLACEHOLDER.to_string(),
        }
    }
}

impl From<Option<u32>> for ScoreCell {
    fn from(value: Option<u32>) -> Self {
        Self(value)
    }
}

impl Display for ScoreCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(score) => write!(f, "{}", score),
            None => f.write_str(PLACEHOLDER),
        }
    }
}

/// Mean over the judges that took part, or nothing when none did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Average(Option<f64>);

impl Average {
    /// Mean of `values`; empty input has no average.
    pub fn of<I>(values: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        let (sum, count) = values
            .into_iter()
            .fold((0u64, 0u32), |(sum, count), v| (sum + u64::from(v), count + 1));

        if count == 0 {
            Self(None)
        } else {
            Self(Some(sum as f64 / f64::from(count)))
        }
    }

    pub fn none() -> Self {
        Self(None)
    }

    pub fn value(&self) -> Option<f64> {
        self.0
    }

    pub fn display(&self, precision: usize) -> String {
        match self.0 {
            Some(avg) => format!("{:.*}", precision, avg),
            None => PLACEHOLDER.to_string(),
        }
    }

    pub fn display_question(&self) -> String {
        self.display(QUESTION_AVERAGE_PRECISION)
    }

    pub fn display_total(&self) -> String {
        self.display(TOTAL_AVERAGE_PRECISION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_cell_projections() {
        let cell = ScoreCell::missing();
        assert_eq!(cell.display(), "-");
        assert_eq!(cell.or_zero(), 0);
        assert_eq!(cell.to_string(), "-");
    }

    #[test]
    fn test_zero_score_is_not_missing() {
        let cell = ScoreCell::present(0);
        assert_eq!(cell.display(), "0");
        assert!(!cell.is_missing());
    }

    #[test]
    fn test_cells_serialize_as_nullable_numbers() {
        let cells = vec![ScoreCell::present(7), ScoreCell::missing()];
        assert_eq!(serde_json::to_string(&cells).unwrap(), "[7,null]");
    }

    #[test]
    fn test_average_formatting() {
        let avg = Average::of([20, 15, 18]);
        assert_eq!(avg.display_question(), "17.7");
        assert_eq!(avg.display_total(), "17.67");

        let empty = Average::of(Vec::<u32>::new());
        assert_eq!(empty.display_question(), "-");
        assert_eq!(empty.display_total(), "-");
        assert_eq!(empty, Average::none());
    }
}
