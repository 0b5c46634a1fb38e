//! # Error Types
//!
//! Errors raised while constructing or loading schema objects. All errors
//! use `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Engine operations (build, validate, evaluate) never fail: structural
//!   problems and rule faults are reported as data.
//! - Errors here are construction-time only: an unknown operator string, a
//!   descriptor that does not parse, or an unreadable configuration file.

use thiserror::Error;

/// Top-level error type for Formwright.
#[derive(Error, Debug)]
pub enum FormwrightError {
    /// A conditional operator string did not name a known operator.
    #[error("unknown conditional operator: {0:?}")]
    UnknownOperator(String),

    /// A conditional action string did not name a known action.
    #[error("unknown conditional action: {0:?}")]
    UnknownAction(String),

    /// A field kind string was empty.
    #[error("field kind must not be empty")]
    EmptyFieldKind,

    /// JSON (de)serialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML (de)serialization failed.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Engine configuration was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_operator_display() {
        let err = FormwrightError::UnknownOperator("greaterThen".into());
        assert_eq!(err.to_string(), "unknown conditional operator: \"greaterThen\"");
    }

    #[test]
    fn test_json_error_converts() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: FormwrightError = parse.unwrap_err().into();
        assert!(matches!(err, FormwrightError::Json(_)));
        assert!(err.to_string().starts_with("json error:"));
    }
}
