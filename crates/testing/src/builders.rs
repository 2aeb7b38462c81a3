//! Fluent builder pattern for constructing test data.

use scorecard_domain::{
    Evaluation, EventType, Judge, JudgeId, QuestionScore, Round, RoundNumber, Team, TeamId,
    TeamMember,
};

/// Password hash produced by [`crate::mocks::MockPasswordHasher`] for `password`
pub fn mock_hash(password: &str) -> String {
    format!("mock${}", password)
}

/// Builder for creating Judge test instances
#[derive(Clone)]
pub struct JudgeBuilder {
    name: String,
    email: String,
    password: String,
    events: Vec<EventType>,
    active: bool,
}

impl JudgeBuilder {
    pub fn new() -> Self {
        Self {
            name: "Test Judge".to_string(),
            email: "judge@example.com".to_string(),
            password: "password".to_string(),
            events: vec![EventType::PaperPresentation],
            active: true,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Stored hashed with [`mock_hash`]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn with_events(mut self, events: &[EventType]) -> Self {
        self.events = events.to_vec();
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn build(self) -> Judge {
        let mut judge = Judge::new(self.name, &self.email, mock_hash(&self.password), self.events);
        judge.is_active = self.active;
        judge
    }
}

impl Default for JudgeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating Team test instances
#[derive(Clone)]
pub struct TeamBuilder {
    name: String,
    event_type: EventType,
    members: Vec<TeamMember>,
}

impl TeamBuilder {
    pub fn new() -> Self {
        Self {
            name: "Test Team".to_string(),
            event_type: EventType::PaperPresentation,
            members: vec![TeamMember::new("Test Member")],
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_event(mut self, event_type: EventType) -> Self {
        self.event_type = event_type;
        self
    }

    /// Replace the roster
    pub fn with_members(mut self, members: Vec<TeamMember>) -> Self {
        self.members = members;
        self
    }

    pub fn with_member(mut self, member: TeamMember) -> Self {
        self.members.push(member);
        self
    }

    pub fn build(self) -> Team {
        Team::new(self.name, self.event_type, self.members)
    }
}

impl Default for TeamBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for one judge's evaluation of one team
#[derive(Clone)]
pub struct EvaluationBuilder {
    team_id: TeamId,
    event_type: EventType,
    judge_id: JudgeId,
    judge_name: String,
    rounds: Vec<Round>,
    remarks: String,
    stored_total: Option<u32>,
}

impl EvaluationBuilder {
    pub fn new(team: &Team, judge: &Judge) -> Self {
        Self {
            team_id: team.id,
            event_type: team.event_type,
            judge_id: judge.id,
            judge_name: judge.name.clone(),
            rounds: Vec::new(),
            remarks: String::new(),
            stored_total: None,
        }
    }

    /// Scores for questions 1, 2, ... in order
    pub fn with_round(self, round: RoundNumber, scores: &[u32]) -> Self {
        let questions = scores
            .iter()
            .enumerate()
            .map(|(i, score)| QuestionScore::new(i as u32 + 1, *score))
            .collect();
        self.with_questions(round, questions)
    }

    pub fn with_questions(mut self, round: RoundNumber, questions: Vec<QuestionScore>) -> Self {
        self.rounds.retain(|r| r.round_number != round);
        self.rounds.push(Round::new(round, questions));
        self
    }

    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = remarks.into();
        self
    }

    /// Overwrite the stored overall total, as data written outside the
    /// service might have it
    pub fn with_stored_total(mut self, total: u32) -> Self {
        self.stored_total = Some(total);
        self
    }

    pub fn build(self) -> Evaluation {
        let mut evaluation = Evaluation::new(
            self.team_id,
            self.judge_id,
            self.judge_name,
            self.event_type,
            self.rounds,
            self.remarks,
        );
        if let Some(total) = self.stored_total {
            evaluation.total_score = total;
        }
        evaluation
    }
}
