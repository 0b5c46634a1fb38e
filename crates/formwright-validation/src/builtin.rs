//! Built-in rules: `required`, `length`, `pattern`, `email`.
//!
//! All four read their configuration from the node's descriptor and convert
//! the submitted value to text with [`value_text`]. Length is counted in
//! Unicode scalar values.

use std::collections::HashMap;
use std::sync::RwLock;

use regex::Regex;
use serde_json::Value;

use formwright_core::{is_blank, value_text, FaultPolicy, FormData};
use formwright_hierarchy::FieldNode;

use crate::registry::RuleEvaluator;
use crate::result::{codes, ValidationError, ValidationResult};

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

/// Fails with `REQUIRED` when a required field has no value.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredRule;

impl RuleEvaluator for RequiredRule {
    fn evaluate(&self, node: &FieldNode<'_>, value: &Value, _form: &FormData) -> ValidationResult {
        let descriptor = node.descriptor();
        if !descriptor.required || !is_blank(value) {
            return ValidationResult::success();
        }
        ValidationResult::failure(ValidationError::new(
            node.id().clone(),
            codes::REQUIRED,
            format!("{} is required", descriptor.display_name()),
        ))
    }
}

/// Fails with `MIN_LENGTH` and/or `MAX_LENGTH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LengthRule;

impl RuleEvaluator for LengthRule {
    fn evaluate(&self, node: &FieldNode<'_>, value: &Value, _form: &FormData) -> ValidationResult {
        let Some(text) = value_text(value) else {
            return ValidationResult::success();
        };
        let descriptor = node.descriptor();
        let length = text.chars().count();
        let mut errors = Vec::new();

        if let Some(min) = descriptor.min_length {
            if length < min {
                errors.push(ValidationError::new(
                    node.id().clone(),
                    codes::MIN_LENGTH,
                    format!("{} must be at least {min} characters", descriptor.display_name()),
                ));
            }
        }
        if let Some(max) = descriptor.max_length {
            if length > max {
                errors.push(ValidationError::new(
                    node.id().clone(),
                    codes::MAX_LENGTH,
                    format!("{} must be at most {max} characters", descriptor.display_name()),
                ));
            }
        }
        ValidationResult::from_errors(errors)
    }
}

/// Fails with `PATTERN_MISMATCH` when the text does not match the
/// descriptor's pattern. The pattern is unanchored; authors anchor it
/// themselves with `^...$`.
///
/// Each distinct pattern string is compiled once and cached, malformed
/// patterns included.
#[derive(Debug, Default)]
pub struct PatternRule {
    fault_policy: FaultPolicy,
    compiled: RwLock<HashMap<String, Result<Regex, regex::Error>>>,
}

impl PatternRule {
    /// Create the rule under the given fault policy.
    pub fn new(fault_policy: FaultPolicy) -> Self {
        Self {
            fault_policy,
            compiled: RwLock::new(HashMap::new()),
        }
    }

    fn compile(&self, pattern: &str) -> Result<Regex, regex::Error> {
        if let Ok(cache) = self.compiled.read() {
            if let Some(entry) = cache.get(pattern) {
                return entry.clone();
            }
        }
        let entry = Regex::new(pattern);
        if let Ok(mut cache) = self.compiled.write() {
            cache.insert(pattern.to_string(), entry.clone());
        }
        entry
    }

    #[cfg(test)]
    fn cached_patterns(&self) -> usize {
        self.compiled.read().map_or(0, |cache| cache.len())
    }
}

impl RuleEvaluator for PatternRule {
    fn evaluate(&self, node: &FieldNode<'_>, value: &Value, _form: &FormData) -> ValidationResult {
        let descriptor = node.descriptor();
        let Some(pattern) = descriptor.pattern.as_deref() else {
            return ValidationResult::success();
        };
        let Some(text) = value_text(value) else {
            return ValidationResult::success();
        };

        match self.compile(pattern) {
            Ok(re) if re.is_match(&text) => ValidationResult::success(),
            Ok(_) => ValidationResult::failure(ValidationError::new(
                node.id().clone(),
                codes::PATTERN_MISMATCH,
                format!("{} has an invalid format", descriptor.display_name()),
            )),
            Err(err) => fault(node, self.fault_policy, &format!("invalid pattern {pattern:?}: {err}")),
        }
    }
}

/// Fails with `INVALID_EMAIL` unless the text is `local@domain.tld`-shaped.
#[derive(Debug, Clone)]
pub struct EmailRule {
    pattern: Option<Regex>,
    fault_policy: FaultPolicy,
}

impl Default for EmailRule {
    fn default() -> Self {
        Self::new(FaultPolicy::default())
    }
}

impl EmailRule {
    /// Create the rule under the given fault policy.
    pub fn new(fault_policy: FaultPolicy) -> Self {
        Self {
            pattern: Regex::new(EMAIL_PATTERN).ok(),
            fault_policy,
        }
    }
}

impl RuleEvaluator for EmailRule {
    fn evaluate(&self, node: &FieldNode<'_>, value: &Value, _form: &FormData) -> ValidationResult {
        if is_blank(value) {
            return ValidationResult::success();
        }
        let Some(text) = value_text(value) else {
            return ValidationResult::success();
        };
        let Some(re) = self.pattern.as_ref() else {
            return fault(node, self.fault_policy, "email pattern unavailable");
        };
        if re.is_match(text.trim()) {
            ValidationResult::success()
        } else {
            ValidationResult::failure(ValidationError::new(
                node.id().clone(),
                codes::INVALID_EMAIL,
                format!("{} must be a valid email address", node.descriptor().display_name()),
            ))
        }
    }
}

/// Apply the fault policy to an internal evaluation failure.
fn fault(node: &FieldNode<'_>, policy: FaultPolicy, detail: &str) -> ValidationResult {
    match policy {
        FaultPolicy::FailOpen => {
            tracing::warn!(field = %node.id(), detail, "rule fault; treating value as valid");
            ValidationResult::success()
        }
        FaultPolicy::Report => ValidationResult::failure(ValidationError::new(
            node.id().clone(),
            codes::RULE_FAULT,
            format!("rule could not be evaluated: {detail}"),
        )),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
