//! # Rule Registry
//!
//! An explicit, passed-by-reference map from rule id to evaluator. There is
//! no global registry: tests, tenants, or differently configured hosts each
//! hold their own.
//!
//! ## Concurrency
//!
//! Registration takes `&mut self` and belongs in a single-threaded setup
//! phase. Once built, a registry is only read, and can be shared across
//! threads (`RuleEvaluator: Send + Sync`).

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use formwright_core::{EngineConfig, FormData};
use formwright_hierarchy::FieldNode;

use crate::builtin::{EmailRule, LengthRule, PatternRule, RequiredRule};
use crate::result::ValidationResult;

/// Built-in rule id: required-value check.
pub const REQUIRED_RULE: &str = "required";
/// Built-in rule id: min/max length check.
pub const LENGTH_RULE: &str = "length";
/// Built-in rule id: regular-expression check.
pub const PATTERN_RULE: &str = "pattern";
/// Built-in rule id: email shape check.
pub const EMAIL_RULE: &str = "email";

/// A validation rule.
///
/// Evaluators receive the node being validated, its submitted value
/// (`null` when absent), and the whole form for cross-field checks. They
/// must not panic on any input: faults are either swallowed (fail-open) or
/// reported as a validation error.
pub trait RuleEvaluator: Send + Sync + fmt::Debug {
    /// Evaluate the rule for one field.
    fn evaluate(&self, node: &FieldNode<'_>, value: &Value, form: &FormData) -> ValidationResult;
}

/// Adapter turning a closure into a [`RuleEvaluator`].
pub struct FnRule<F> {
    name: String,
    func: F,
}

impl<F> FnRule<F>
where
    F: Fn(&FieldNode<'_>, &Value, &FormData) -> ValidationResult + Send + Sync,
{
    /// Wrap a closure; `name` only appears in debug output.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> fmt::Debug for FnRule<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRule").field("name", &self.name).finish_non_exhaustive()
    }
}

impl<F> RuleEvaluator for FnRule<F>
where
    F: Fn(&FieldNode<'_>, &Value, &FormData) -> ValidationResult + Send + Sync,
{
    fn evaluate(&self, node: &FieldNode<'_>, value: &Value, form: &FormData) -> ValidationResult {
        (self.func)(node, value, form)
    }
}

/// Rule id → evaluator map plus the configuration the engine runs under.
pub struct RuleRegistry {
    rules: HashMap<String, Box<dyn RuleEvaluator>>,
    config: EngineConfig,
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.ids())
            .field("config", &self.config)
            .finish()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_builtins(&EngineConfig::default())
    }
}

impl RuleRegistry {
    /// An empty registry with default configuration.
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
            config: EngineConfig::default(),
        }
    }

    /// A registry pre-populated with `required`, `length`, `pattern`, and
    /// `email`, running under the given configuration.
    pub fn with_builtins(config: &EngineConfig) -> Self {
        let mut registry = Self {
            rules: HashMap::new(),
            config: config.clone(),
        };
        registry.register(REQUIRED_RULE, Box::new(RequiredRule));
        registry.register(LENGTH_RULE, Box::new(LengthRule));
        registry.register(PATTERN_RULE, Box::new(PatternRule::new(config.fault_policy)));
        registry.register(EMAIL_RULE, Box::new(EmailRule::new(config.fault_policy)));
        registry
    }

    /// Insert or replace an evaluator. Returns the one it replaced.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        evaluator: Box<dyn RuleEvaluator>,
    ) -> Option<Box<dyn RuleEvaluator>> {
        let id = id.into();
        let previous = self.rules.insert(id.clone(), evaluator);
        if previous.is_some() {
            tracing::debug!(rule = %id, "replaced registered rule");
        }
        previous
    }

    /// Register a closure as a rule.
    pub fn register_fn<F>(&mut self, id: impl Into<String>, func: F) -> Option<Box<dyn RuleEvaluator>>
    where
        F: Fn(&FieldNode<'_>, &Value, &FormData) -> ValidationResult + Send + Sync + 'static,
    {
        let id = id.into();
        let rule = FnRule::new(id.clone(), func);
        self.register(id, Box::new(rule))
    }

    /// Remove a rule.
    pub fn unregister(&mut self, id: &str) -> Option<Box<dyn RuleEvaluator>> {
        self.rules.remove(id)
    }

    /// Look up a rule.
    pub fn get(&self, id: &str) -> Option<&dyn RuleEvaluator> {
        self.rules.get(id).map(|r| r.as_ref())
    }

    /// Whether a rule id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.rules.contains_key(id)
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Configuration the engine reads when validating with this registry.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
