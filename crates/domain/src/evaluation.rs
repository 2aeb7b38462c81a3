//! Evaluations: one judge's scores for one team across up to two rounds.

use crate::errors::{EvaluationError, EvaluationResult};
use crate::event::EventType;
use crate::identifiers::{EvaluationId, JudgeId, TeamId};
use crate::rubric;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Judging round. Only rounds 1 and 2 exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RoundNumber {
    One,
    Two,
}

impl RoundNumber {
    pub const ALL: [RoundNumber; 2] = [Self::One, Self::Two];

    pub fn as_u8(&self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

impl TryFrom<u8> for RoundNumber {
    type Error = InvalidRoundNumber;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(InvalidRoundNumber(other)),
        }
    }
}

impl From<RoundNumber> for u8 {
    fn from(round: RoundNumber) -> Self {
        round.as_u8()
    }
}

impl Display for RoundNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Round {}", self.as_u8())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Round number must be 1 or 2, got {0}")]
pub struct InvalidRoundNumber(pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionScore {
    pub question_number: u32,
    pub score: u32,
}

impl QuestionScore {
    pub fn new(question_number: u32, score: u32) -> Self {
        Self {
            question_number,
            score,
        }
    }
}

/// Scores a judge gave in one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub round_number: RoundNumber,
    pub questions: Vec<QuestionScore>,
    /// Stored total. Written by the evaluation service as the sum of
    /// `questions`, but imported data may carry its own value.
    pub total_score: u32,
}

impl Round {
    /// Build a round whose stored total matches its questions.
    pub fn new(round_number: RoundNumber, questions: Vec<QuestionScore>) -> Self {
        let total_score = questions
            .iter()
            .fold(0u32, |acc, q| acc.saturating_add(q.score));
        Self {
            round_number,
            questions,
            total_score,
        }
    }

    pub fn score_for(&self, question_number: u32) -> Option<u32> {
        self.questions
            .iter()
            .find(|q| q.question_number == question_number)
            .map(|q| q.score)
    }

    /// Sum of the question scores, wide enough for any imported values.
    pub fn recomputed_total(&self) -> u64 {
        self.questions.iter().map(|q| u64::from(q.score)).sum()
    }

    /// A round with no scored questions is treated as not held.
    pub fn is_scored(&self) -> bool {
        !self.questions.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: EvaluationId,
    pub team_id: TeamId,
    pub judge_id: JudgeId,
    /// Judge name captured when the evaluation was written
    pub judge_name: String,
    pub event_type: EventType,
    pub rounds: Vec<Round>,
    #[serde(default)]
    pub remarks: String,
    pub total_score: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Evaluation {
    pub fn new(
        team_id: TeamId,
        judge_id: JudgeId,
        judge_name: impl Into<String>,
        event_type: EventType,
        rounds: Vec<Round>,
        remarks: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        let mut evaluation = Self {
            id: EvaluationId::new(),
            team_id,
            judge_id,
            judge_name: judge_name.into(),
            event_type,
            rounds: Vec::new(),
            remarks: String::new(),
            total_score: 0,
            created_at: now,
            updated_at: now,
        };
        evaluation.replace_scores(rounds, remarks);
        evaluation.updated_at = now;
        evaluation
    }

    /// Replace rounds and remarks, recomputing every total.
    pub fn replace_scores(&mut self, rounds: Vec<Round>, remarks: impl Into<String>) {
        let mut rounds: Vec<Round> = rounds
            .into_iter()
            .map(|r| Round::new(r.round_number, r.questions))
            .collect();
        rounds.sort_by_key(|r| r.round_number);

        self.total_score = rounds
            .iter()
            .fold(0u32, |acc, r| acc.saturating_add(r.total_score));
        self.rounds = rounds;
        self.remarks = remarks.into().trim().to_string();
        self.updated_at = Utc::now();
    }

    /// Take over a newer submission's scores, keeping this record's id and
    /// creation time.
    pub fn supersede_with(&mut self, newer: &Evaluation) {
        self.judge_name = newer.judge_name.clone();
        self.rounds = newer.rounds.clone();
        self.remarks = newer.remarks.clone();
        self.total_score = newer.total_score;
        self.updated_at = newer.updated_at;
    }

    /// The round record, if the judge scored that round.
    pub fn round(&self, number: RoundNumber) -> Option<&Round> {
        self.rounds
            .iter()
            .find(|r| r.round_number == number && r.is_scored())
    }

    /// Stored total for a round, zero when the round is absent.
    pub fn round_total(&self, number: RoundNumber) -> u32 {
        self.round(number).map(|r| r.total_score).unwrap_or(0)
    }

    pub fn score_for(&self, number: RoundNumber, question_number: u32) -> Option<u32> {
        self.round(number).and_then(|r| r.score_for(question_number))
    }

    pub fn has_remarks(&self) -> bool {
        !self.remarks.trim().is_empty()
    }
}

/// Check a set of rounds against the event's rubric.
///
/// Rounds must be distinct, every question must belong to the rubric and be
/// scored at most once per round, and no score may exceed the parameter's
/// maximum.
pub fn check_scores(event: EventType, rounds: &[Round]) -> EvaluationResult<()> {
    let mut seen_rounds = Vec::with_capacity(rounds.len());
    for round in rounds {
        if seen_rounds.contains(&round.round_number) {
            return Err(EvaluationError::DuplicateRound(round.round_number.as_u8()));
        }
        seen_rounds.push(round.round_number);

        let mut seen_questions = Vec::with_capacity(round.questions.len());
        for q in &round.questions {
            let param = rubric::parameter(event.as_str(), q.question_number).ok_or(
                EvaluationError::UnknownQuestion {
                    event,
                    question: q.question_number,
                },
            )?;
            if seen_questions.contains(&q.question_number) {
                return Err(EvaluationError::DuplicateQuestion(q.question_number));
            }
            seen_questions.push(q.question_number);

            if q.score > param.max_score {
                return Err(EvaluationError::ScoreOutOfRange {
                    question: q.question_number,
                    score: q.score,
                    max: param.max_score,
                });
            }
        }
    }
    Ok(())
}
