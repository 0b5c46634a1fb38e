//! # Engine Configuration
//!
//! Knobs shared by the hierarchy, validation, and logic crates. Every field
//! has a default, so an empty document (or no document at all) yields the
//! standard behaviour.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FormwrightError;
use crate::schema::is_yaml_path;

/// What a rule does when it cannot evaluate (e.g. a malformed pattern).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultPolicy {
    /// Treat the value as valid and log a warning.
    #[default]
    FailOpen,
    /// Emit a `RULE_FAULT` validation error for the field.
    Report,
}

/// Engine-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Handling of internal rule faults.
    pub fault_policy: FaultPolicy,
    /// Depth above which the structural validator warns.
    pub max_depth_warning: Option<usize>,
    /// Whether module-level rule ids run against every field during
    /// module validation. Off by default.
    pub module_rules_apply_to_fields: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fault_policy: FaultPolicy::FailOpen,
            max_depth_warning: None,
            module_rules_apply_to_fields: false,
        }
    }
}

impl EngineConfig {
    /// Check settings that the type system cannot.
    ///
    /// # Errors
    ///
    /// Returns [`FormwrightError::InvalidConfig`] for a zero depth threshold.
    pub fn validate(&self) -> Result<(), FormwrightError> {
        if self.max_depth_warning == Some(0) {
            return Err(FormwrightError::InvalidConfig(
                "max_depth_warning must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Load and validate a configuration file (JSON or YAML by extension).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FormwrightError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: Self = if is_yaml_path(path) {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };
        config.validate()?;
        Ok(config)
    }
}
