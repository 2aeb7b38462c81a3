//! Judge account validation rules

use super::{Validatable, ValidationResult, ValidationRules};
use serde::{Deserialize, Serialize};

/// Create judge request validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJudgeRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub assigned_events: Vec<String>,
}

impl CreateJudgeRequest {
    pub const MAX_NAME_LENGTH: usize = 100;
    pub const MIN_PASSWORD_LENGTH: usize = 6;
    pub const MAX_PASSWORD_LENGTH: usize = 128;
}

impl Validatable for CreateJudgeRequest {
    fn validate_all(&self) -> ValidationResult {
        let mut result = ValidationResult::success();

        result.merge(ValidationRules::validate_length(
            &self.name,
            "name",
            Some(1),
            Some(Self::MAX_NAME_LENGTH),
        ));
        result.merge(ValidationRules::validate_email(&self.email, "email"));
        result.merge(validate_password(&self.password));
        result.merge(validate_assigned_events(&self.assigned_events));

        result
    }
}

/// Validate password length
pub fn validate_password(password: &str) -> ValidationResult {
    let mut result = ValidationResult::success();

    if password.chars().count() < CreateJudgeRequest::MIN_PASSWORD_LENGTH {
        result.add_field_error(
            "password",
            format!(
                "Password must be at least {} characters",
                CreateJudgeRequest::MIN_PASSWORD_LENGTH
            ),
        );
    }

    if password.len() > CreateJudgeRequest::MAX_PASSWORD_LENGTH {
        result.add_field_error(
            "password",
            format!(
                "Password must be {} characters or less",
                CreateJudgeRequest::MAX_PASSWORD_LENGTH
            ),
        );
    }

    result
}

fn validate_assigned_events(events: &[String]) -> ValidationResult {
    let mut result = ValidationResult::success();

    if events.is_empty() {
        result.add_field_error("assigned_events", "At least one valid event must be assigned");
        return result;
    }

    result.merge(ValidationRules::validate_event_types(events, "assigned_events"));
    result
}

/// Update judge request validation
///
/// Every field is optional; only the supplied ones are changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateJudgeRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub assigned_events: Option<Vec<String>>,
}

impl UpdateJudgeRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.assigned_events.is_none()
    }
}

impl Validatable for UpdateJudgeRequest {
    fn validate_all(&self) -> ValidationResult {
        let mut result = ValidationResult::success();

        if self.is_empty() {
            result.add_object_error("At least one field must be provided");
            return result;
        }

        if let Some(ref name) = self.name {
            result.merge(ValidationRules::validate_length(
                name,
                "name",
                Some(1),
                Some(CreateJudgeRequest::MAX_NAME_LENGTH),
            ));
        }

        if let Some(ref email) = self.email {
            result.merge(ValidationRules::validate_email(email, "email"));
        }

        if let Some(ref password) = self.password {
            result.merge(validate_password(password));
        }

        if let Some(ref events) = self.assigned_events {
            result.merge(validate_assigned_events(events));
        }

        result
    }
}
