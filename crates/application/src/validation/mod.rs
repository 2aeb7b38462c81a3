//! Validation Framework
//!
//! Collects every problem with a request before rejecting it, so clients see
//! all field errors at once.

mod evaluation;
mod judge;
mod team;

pub use evaluation::*;
pub use judge::*;
pub use team::*;

use crate::ApplicationError;
use scorecard_domain::EventType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Validation result containing all errors
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether validation passed
    pub valid: bool,
    /// Field-level errors
    pub field_errors: HashMap<String, Vec<String>>,
    /// Object-level errors
    pub object_errors: Vec<String>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn success() -> Self {
        Self {
            valid: true,
            field_errors: HashMap::new(),
            object_errors: Vec::new(),
        }
    }

    /// Create a failed validation result with a single error
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            field_errors: HashMap::new(),
            object_errors: vec![message.into()],
        }
    }

    /// Add a field-level error
    pub fn add_field_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.field_errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Add an object-level error
    pub fn add_object_error(&mut self, message: impl Into<String>) {
        self.valid = false;
        self.object_errors.push(message.into());
    }

    /// Merge another validation result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        if !other.valid {
            self.valid = false;
        }

        for (field, errors) in other.field_errors {
            self.field_errors.entry(field).or_default().extend(errors);
        }

        self.object_errors.extend(other.object_errors);
    }

    /// Convert to ApplicationError if invalid
    pub fn to_error(&self) -> Option<ApplicationError> {
        if self.valid {
            return None;
        }

        let mut fields: Vec<_> = self.field_errors.iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));

        let mut messages = Vec::new();
        for (field, errors) in fields {
            for error in errors {
                messages.push(format!("{}: {}", field, error));
            }
        }

        messages.extend(self.object_errors.clone());

        Some(ApplicationError::ValidationFailed(messages.join("; ")))
    }

    /// Ensure validation passed, returning error if not
    pub fn ensure_valid(&self) -> Result<(), ApplicationError> {
        match self.to_error() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Trait for validatable types
pub trait Validatable {
    /// Validate the type and return a result
    fn validate_all(&self) -> ValidationResult;
}

/// Common validation rules
pub struct ValidationRules;

impl ValidationRules {
    /// Validate an email address
    pub fn validate_email(email: &str, field: &str) -> ValidationResult {
        let mut result = ValidationResult::success();
        let email = email.trim();

        if email.is_empty() {
            result.add_field_error(field, "Email cannot be empty");
            return result;
        }

        let parts: Vec<&str> = email.split('@').collect();
        if parts.len() != 2 {
            result.add_field_error(field, "Invalid email format");
            return result;
        }

        let (local, domain) = (parts[0], parts[1]);

        if local.is_empty() || domain.is_empty() {
            result.add_field_error(field, "Invalid email format");
            return result;
        }

        if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
            result.add_field_error(field, "Invalid email domain");
        }

        if email.chars().any(char::is_whitespace) {
            result.add_field_error(field, "Email cannot contain whitespace");
        }

        if email.len() > 254 {
            result.add_field_error(field, "Email must be 254 characters or less");
        }

        result
    }

    /// Validate a string length, measured after trimming
    pub fn validate_length(
        value: &str,
        field: &str,
        min: Option<usize>,
        max: Option<usize>,
    ) -> ValidationResult {
        let mut result = ValidationResult::success();
        let len = value.trim().chars().count();

        if let Some(min_len) = min {
            if len < min_len {
                result.add_field_error(field, format!("Must be at least {} characters", min_len));
            }
        }

        if let Some(max_len) = max {
            if len > max_len {
                result.add_field_error(field, format!("Must be {} characters or less", max_len));
            }
        }

        result
    }

    /// Validate a list size
    pub fn validate_list_size<T>(
        list: &[T],
        field: &str,
        min: Option<usize>,
        max: Option<usize>,
    ) -> ValidationResult {
        let mut result = ValidationResult::success();

        if let Some(min_size) = min {
            if list.len() < min_size {
                result.add_field_error(field, format!("Must have at least {} items", min_size));
            }
        }

        if let Some(max_size) = max {
            if list.len() > max_size {
                result.add_field_error(field, format!("Must have {} items or less", max_size));
            }
        }

        result
    }

    /// Validate that every string names a known event
    pub fn validate_event_types(values: &[String], field: &str) -> ValidationResult {
        let mut result = ValidationResult::success();

        for value in values {
            if value.parse::<EventType>().is_err() {
                result.add_field_error(field, format!("Unknown event type: {}", value));
            }
        }

        result
    }
}

/// Parse event names that have already passed [`ValidationRules::validate_event_types`].
pub(crate) fn parse_events(values: &[String]) -> Vec<EventType> {
    values.iter().filter_map(|v| v.parse().ok()).collect()
}
