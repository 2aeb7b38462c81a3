//! Judge accounts.

use crate::event::EventType;
use crate::identifiers::JudgeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A judge who scores teams in one or more events.
///
/// Judges are created by an administrator and are never removed; an inactive
/// judge can no longer log in or submit evaluations, but their past
/// evaluations stay on the books.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Judge {
    pub id: JudgeId,
    pub name: String,
    /// Stored trimmed and lowercased; unique across judges
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub assigned_events: Vec<EventType>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Judge {
    pub fn new(
        name: impl Into<String>,
        email: &str,
        password_hash: String,
        assigned_events: Vec<EventType>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: JudgeId::new(),
            name: name.into().trim().to_string(),
            email: normalize_email(email),
            password_hash,
            assigned_events: dedup_events(assigned_events),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_assigned_to(&self, event: EventType) -> bool {
        self.assigned_events.contains(&event)
    }

    /// First word of the judge's name, used for compact column headers.
    pub fn first_name(&self) -> &str {
        first_name(&self.name)
    }

    pub fn set_assigned_events(&mut self, events: Vec<EventType>) {
        self.assigned_events = dedup_events(events);
        self.touch();
    }

    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Canonical form for judge email addresses.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn first_name(full_name: &str) -> &str {
    full_name.split_whitespace().next().unwrap_or(full_name)
}

fn dedup_events(events: Vec<EventType>) -> Vec<EventType> {
    let mut unique = Vec::with_capacity(events.len());
    for event in events {
        if !unique.contains(&event) {
            unique.push(event);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_judge_normalizes_fields() {
        let judge = Judge::new(
            "  Ada Lovelace ",
            " Ada@Example.COM ",
            "hash".to_string(),
            vec![EventType::PaperPresentation, EventType::PaperPresentation],
        );

        assert_eq!(judge.name, "Ada Lovelace");
        assert_eq!(judge.email, "ada@example.com");
        assert_eq!(judge.assigned_events, vec![EventType::PaperPresentation]);
        assert!(judge.is_active);
        assert_eq!(judge.first_name(), "Ada");
    }

    #[test]
    fn test_password_hash_is_never_serialized() {
        let judge = Judge::new(
            "Ada",
            "ada@example.com",
            "secret-hash".to_string(),
            vec![EventType::StartupExpo],
        );
        let json = serde_json::to_string(&judge).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(!json.contains("password_hash"));
    }

    #[test]
    fn test_assignment() {
        let judge =
            Judge::new("Ada", "ada@example.com", String::new(), vec![EventType::StartupExpo]);
        assert!(judge.is_assigned_to(EventType::StartupExpo));
        assert!(!judge.is_assigned_to(EventType::PosterPresentation));
    }
}
