//! Team registration validation rules

use super::{Validatable, ValidationResult, ValidationRules};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMemberInput {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Create team request validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTeamRequest {
    pub name: String,
    pub event_type: String,
    pub members: Vec<TeamMemberInput>,
}

impl CreateTeamRequest {
    pub const MAX_NAME_LENGTH: usize = 120;
    pub const MAX_MEMBERS: usize = 10;
}

impl Validatable for CreateTeamRequest {
    fn validate_all(&self) -> ValidationResult {
        let mut result = ValidationResult::success();

        result.merge(ValidationRules::validate_length(
            &self.name,
            "name",
            Some(1),
            Some(Self::MAX_NAME_LENGTH),
        ));

        result.merge(ValidationRules::validate_event_types(
            std::slice::from_ref(&self.event_type),
            "event_type",
        ));

        result.merge(ValidationRules::validate_list_size(
            &self.members,
            "members",
            Some(1),
            Some(Self::MAX_MEMBERS),
        ));

        for (i, member) in self.members.iter().enumerate() {
            if member.name.trim().is_empty() {
                result.add_field_error(format!("members[{}].name", i), "Member name is required");
            }
            if let Some(ref email) = member.email {
                if !email.trim().is_empty() {
                    result.merge(ValidationRules::validate_email(
                        email,
                        &format!("members[{}].email", i),
                    ));
                }
            }
        }

        result
    }
}
