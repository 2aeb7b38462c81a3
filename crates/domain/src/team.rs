//! Competing teams.

use crate::event::EventType;
use crate::identifiers::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl TeamMember {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
            role: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// A team registered for a single event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub event_type: EventType,
    pub members: Vec<TeamMember>,
    pub total_members: u32,
    pub created_at: DateTime<Utc>,
}

impl Team {
    pub fn new(name: impl Into<String>, event_type: EventType, members: Vec<TeamMember>) -> Self {
        Self {
            id: TeamId::new(),
            name: name.into().trim().to_string(),
            event_type,
            total_members: members.len() as u32,
            members,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_count_follows_roster() {
        let team = Team::new(
            "Byte Club",
            EventType::PosterPresentation,
            vec![TeamMember::new("A"), TeamMember::new("B").with_email("b@x.io")],
        );
        assert_eq!(team.total_members, 2);
        assert_eq!(team.members[1].email.as_deref(), Some("b@x.io"));
    }

    #[test]
    fn test_optional_member_fields_deserialize() {
        let member: TeamMember = serde_json::from_str(r#"{"name":"Solo"}"#).unwrap();
        assert_eq!(member, TeamMember::new("Solo"));
    }
}
