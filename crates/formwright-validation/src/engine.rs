//! # Validation Engine
//!
//! Runs the rules a field's descriptor calls for, in a fixed order:
//!
//! 1. `required`, when the field is required. A failure here is returned
//!    alone; nothing else runs.
//! 2. An absent or blank value on an optional field passes outright.
//! 3. `length` (if bounds are set), `pattern` (if a pattern is set), then
//!    every id in the field's rule list, accumulating all errors. Ids with
//!    no registered evaluator are skipped.
//!
//! Module validation walks the runtime depth-first and concatenates field
//! results. One failing field never stops the walk.

use std::collections::HashSet;

use serde_json::Value;

use formwright_core::{is_blank, FormData};
use formwright_hierarchy::{FieldNode, ModuleRuntime};

use crate::builtin::{LengthRule, PatternRule, RequiredRule};
use crate::registry::{RuleRegistry, LENGTH_RULE, PATTERN_RULE, REQUIRED_RULE};
use crate::result::ValidationResult;

/// Validates fields and modules against a [`RuleRegistry`].
#[derive(Debug, Clone, Copy)]
pub struct ValidationEngine<'r> {
    registry: &'r RuleRegistry,
}

impl<'r> ValidationEngine<'r> {
    /// Create an engine reading rules from `registry`.
    pub fn new(registry: &'r RuleRegistry) -> Self {
        Self { registry }
    }

    /// The registry this engine reads.
    pub fn registry(&self) -> &'r RuleRegistry {
        self.registry
    }

    /// Validate one field's value. Only the field's own rule ids are run.
    /// Module-level rules apply through [`validate_module`](Self::validate_module),
    /// and only when `module_rules_apply_to_fields` is set.
    pub fn validate_field(&self, node: &FieldNode<'_>, value: &Value, form: &FormData) -> ValidationResult {
        self.validate_field_with(node, value, form, &[])
    }

    /// Validate every field of `runtime` against `form`, in depth-first order.
    pub fn validate_module(&self, runtime: &ModuleRuntime<'_>, form: &FormData) -> ValidationResult {
        let module = runtime.descriptor();
        let module_rules: &[String] = if self.registry.config().module_rules_apply_to_fields {
            &module.rules
        } else {
            &[]
        };

        let mut result = ValidationResult::success();
        for node in runtime.depth_first() {
            let value = form.value(node.id().as_str());
            result.merge(self.validate_field_with(node, value, form, module_rules));
        }

        tracing::debug!(
            module = %module.id,
            fields = runtime.len(),
            errors = result.errors().len(),
            "validated module"
        );
        result
    }

    fn validate_field_with(
        &self,
        node: &FieldNode<'_>,
        value: &Value,
        form: &FormData,
        extra_rules: &[String],
    ) -> ValidationResult {
        let descriptor = node.descriptor();

        if descriptor.required {
            let required = self.registry.get(REQUIRED_RULE).unwrap_or(&RequiredRule);
            let outcome = required.evaluate(node, value, form);
            if !outcome.is_valid() {
                return outcome;
            }
        } else if is_blank(value) {
            return ValidationResult::success();
        }

        let mut result = ValidationResult::success();
        let mut ran: HashSet<&str> = HashSet::from([REQUIRED_RULE]);

        if descriptor.has_length_bounds() {
            let length = self.registry.get(LENGTH_RULE).unwrap_or(&LengthRule);
            result.merge(length.evaluate(node, value, form));
            ran.insert(LENGTH_RULE);
        }
        if descriptor.pattern.is_some() {
            let fallback = PatternRule::new(self.registry.config().fault_policy);
            let pattern = self.registry.get(PATTERN_RULE).unwrap_or(&fallback);
            result.merge(pattern.evaluate(node, value, form));
            ran.insert(PATTERN_RULE);
        }

        for rule_id in descriptor.rules.iter().chain(extra_rules) {
            if !ran.insert(rule_id.as_str()) {
                continue;
            }
            match self.registry.get(rule_id) {
                Some(rule) => result.merge(rule.evaluate(node, value, form)),
                None => tracing::debug!(field = %node.id(), rule = %rule_id, "skipping unregistered rule"),
            }
        }

        result
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::EMAIL_RULE;
    use crate::result::{codes, ValidationError};
    use formwright_core::{EngineConfig, FieldDescriptor, FieldKind, ModuleDescriptor};
    use formwright_hierarchy::build;
    use serde_json::json;

    fn builtins() -> RuleRegistry {
        RuleRegistry::with_builtins(&EngineConfig::default())
    }

    fn validate(registry: &RuleRegistry, field: FieldDescriptor, value: Value) -> ValidationResult {
        let module = ModuleDescriptor::new("m").with_field(field);
        let runtime = build(&module);
        let node = runtime.roots().next().unwrap();
        ValidationEngine::new(registry).validate_field(node, &value, &FormData::new())
    }

    #[test]
    fn test_required_empty_string_single_error() {
        let field = FieldDescriptor::new("a", FieldKind::Text).required();
        let result = validate(&builtins(), field.clone(), json!(""));
        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.errors()[0].code, codes::REQUIRED);
        assert!(validate(&builtins(), field, json!("x")).is_valid());
    }

    #[test]
    fn test_required_failure_short_circuits() {
        let field = FieldDescriptor::new("a", FieldKind::Email)
            .required()
            .with_min_length(3)
            .with_pattern("^x$")
            .with_rule(EMAIL_RULE);
        let result = validate(&builtins(), field, Value::Null);
        assert_eq!(result.errors().len(), 1);
        assert!(result.has_code(codes::REQUIRED));
    }

    #[test]
    fn test_required_multiselect_blank_elements() {
        let field = FieldDescriptor::new("tags", FieldKind::Multiselect).required();
        for blank in [json!([]), json!([""]), json!([null]), json!(["  "])] {
            let result = validate(&builtins(), field.clone(), blank.clone());
            assert!(result.has_code(codes::REQUIRED), "{blank} should count as empty");
        }
        assert!(validate(&builtins(), field, json!(["a"])).is_valid());
    }

    #[test]
    fn test_optional_blank_array_skips_rules() {
        let field = FieldDescriptor::new("tags", FieldKind::Multiselect).with_rule(EMAIL_RULE);
        assert!(validate(&builtins(), field, json!([""])).is_valid());
    }

    #[test]
    fn test_min_length() {
        let field = FieldDescriptor::new("a", FieldKind::Text).with_min_length(5);
        assert!(validate(&builtins(), field.clone(), json!("ab")).has_code(codes::MIN_LENGTH));
        assert!(validate(&builtins(), field, json!("abcdef")).is_valid());
    }

    #[test]
    fn test_optional_blank_skips_everything() {
        let field = FieldDescriptor::new("a", FieldKind::Text)
            .with_min_length(5)
            .with_rule(EMAIL_RULE);
        assert!(validate(&builtins(), field.clone(), Value::Null).is_valid());
        assert!(validate(&builtins(), field, json!("  ")).is_valid());
    }

    #[test]
    fn test_step_three_accumulates() {
        let field = FieldDescriptor::new("a", FieldKind::Email)
            .with_min_length(10)
            .with_pattern("^z")
            .with_rule(EMAIL_RULE);
        let result = validate(&builtins(), field, json!("abc"));
        let codes: Vec<_> = result.errors().iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec![codes::MIN_LENGTH, codes::PATTERN_MISMATCH, codes::INVALID_EMAIL]);
    }

    #[test]
    fn test_implicit_rules_not_rerun() {
        let field = FieldDescriptor::new("a", FieldKind::Text)
            .with_min_length(5)
            .with_rule("length")
            .with_rule("length");
        let result = validate(&builtins(), field, json!("ab"));
        assert_eq!(result.errors().len(), 1);
    }

    #[test]
    fn test_unregistered_rule_skipped() {
        let field = FieldDescriptor::new("a", FieldKind::Text).with_rule("no-such-rule");
        assert!(validate(&builtins(), field, json!("value")).is_valid());
    }

    #[test]
    fn test_empty_registry_still_runs_implicit_rules() {
        let field = FieldDescriptor::new("a", FieldKind::Text).required();
        let result = validate(&RuleRegistry::new(), field, Value::Null);
        assert!(result.has_code(codes::REQUIRED));
    }

    #[test]
    fn test_custom_rule_sees_form() {
        let mut registry = builtins();
        registry.register_fn("matches-password", |node, value, form| {
            if value == form.value("password") {
                ValidationResult::success()
            } else {
                ValidationResult::failure(ValidationError::new(node.id().clone(), "MISMATCH", "passwords differ"))
            }
        });
        let module = ModuleDescriptor::new("m")
            .with_field(FieldDescriptor::new("password", FieldKind::Text))
            .with_field(FieldDescriptor::new("confirm", FieldKind::Text).with_rule("matches-password"));
        let runtime = build(&module);
        let engine = ValidationEngine::new(&registry);

        let form = FormData::new().with("password", "hunter2").with("confirm", "hunter3");
        let result = engine.validate_module(&runtime, &form);
        assert!(result.has_code("MISMATCH"));

        let form = form.with("confirm", "hunter2");
        assert!(engine.validate_module(&runtime, &form).is_valid());
    }

    #[test]
    fn test_module_rules_opt_in() {
        let module = ModuleDescriptor::new("m")
            .with_rule(EMAIL_RULE)
            .with_field(FieldDescriptor::new("a", FieldKind::Text))
            .with_field(FieldDescriptor::new("b", FieldKind::Text));
        let runtime = build(&module);
        let form = FormData::new().with("a", "nope").with("b", "x@y.zz");

        let registry = builtins();
        assert!(ValidationEngine::new(&registry).validate_module(&runtime, &form).is_valid());

        let config = EngineConfig {
            module_rules_apply_to_fields: true,
            ..EngineConfig::default()
        };
        let registry = RuleRegistry::with_builtins(&config);
        let result = ValidationEngine::new(&registry).validate_module(&runtime, &form);
        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.errors()[0].field_id, "a");
    }

    #[test]
    fn test_module_matches_field_by_default() {
        let module = ModuleDescriptor::new("m")
            .with_rule(EMAIL_RULE)
            .with_field(FieldDescriptor::new("a", FieldKind::Text).with_min_length(3));
        let runtime = build(&module);
        let form = FormData::new().with("a", "no");
        let registry = builtins();
        let engine = ValidationEngine::new(&registry);
        let node = runtime.get("a").unwrap();
        assert_eq!(
            engine.validate_module(&runtime, &form),
            engine.validate_field(node, form.value("a"), &form)
        );
    }

    #[test]
    fn test_module_errors_in_depth_first_order() {
        let module = ModuleDescriptor::new("m")
            .with_field(FieldDescriptor::new("second", FieldKind::Text).required().with_order(2))
            .with_field(FieldDescriptor::new("child", FieldKind::Text).required().with_parent("first"))
            .with_field(FieldDescriptor::new("first", FieldKind::Group).required().with_order(1));
        let runtime = build(&module);
        let registry = builtins();
        let result = ValidationEngine::new(&registry).validate_module(&runtime, &FormData::new());
        let ids: Vec<_> = result.errors().iter().map(|e| e.field_id.as_str()).collect();
        assert_eq!(ids, vec!["first", "child", "second"]);
    }
}
