//! # Validation Results
//!
//! Validation failures are data, not errors: every rule returns a
//! [`ValidationResult`], and the engine concatenates them. A result is valid
//! exactly when its error list is empty; the constructors keep the flag and
//! the list consistent.

use std::fmt;

use serde::Serialize;

use formwright_core::FieldId;

/// Stable machine-readable error codes produced by the built-in rules.
pub mod codes {
    /// A required field has no value.
    pub const REQUIRED: &str = "REQUIRED";
    /// Text shorter than the configured minimum.
    pub const MIN_LENGTH: &str = "MIN_LENGTH";
    /// Text longer than the configured maximum.
    pub const MAX_LENGTH: &str = "MAX_LENGTH";
    /// Text does not match the configured pattern.
    pub const PATTERN_MISMATCH: &str = "PATTERN_MISMATCH";
    /// Text is not shaped like an email address.
    pub const INVALID_EMAIL: &str = "INVALID_EMAIL";
    /// A rule could not evaluate (only under `FaultPolicy::Report`).
    pub const RULE_FAULT: &str = "RULE_FAULT";
}

/// A single field-scoped validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// The field that failed.
    pub field_id: FieldId,
    /// Stable machine-readable code.
    pub code: String,
    /// Human-readable message in the primary language.
    pub message: String,
    /// Optional message in a secondary language.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_message: Option<String>,
}

impl ValidationError {
    /// Create an error with a primary-language message.
    pub fn new(field_id: impl Into<FieldId>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            code: code.into(),
            message: message.into(),
            secondary_message: None,
        }
    }

    /// Attach a secondary-language message.
    pub fn with_secondary_message(mut self, message: impl Into<String>) -> Self {
        self.secondary_message = Some(message.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.field_id, self.code, self.message)
    }
}

/// Validity flag plus ordered errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    is_valid: bool,
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// A passing result.
    pub fn success() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// A result carrying the given errors; valid only if the list is empty.
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// A failing result with one error.
    pub fn failure(error: ValidationError) -> Self {
        Self::from_errors(vec![error])
    }

    /// Whether no errors were recorded.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Errors in the order they were produced.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Consume the result, returning its errors.
    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    /// Append another result's errors after this one's.
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.is_valid = self.errors.is_empty();
    }

    /// Errors reported against one field.
    pub fn errors_for<'s>(&'s self, field_id: &'s str) -> impl Iterator<Item = &'s ValidationError> + 's {
        self.errors.iter().filter(move |e| e.field_id == field_id)
    }

    /// Whether any error carries the given code.
    pub fn has_code(&self, code: &str) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}
