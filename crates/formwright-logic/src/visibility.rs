//! # Visibility and Enablement
//!
//! A field's conditional rules are scanned in declaration order, once per
//! axis. For visibility only `show`/`hide` rules count; for enablement only
//! `enable`/`disable`. The first rule on the axis whose condition holds
//! decides.
//!
//! With no decisive rule, the default depends on the rules present on the
//! axis. A field with at least one `show` rule is hidden until one matches
//! (likewise `enable` → disabled). A field with only `hide`/`disable` rules,
//! or none on the axis, is visible and enabled.
//!
//! Per-field decisions ignore the tree. [`FieldStates::cascade`] applies
//! ancestry on top (a hidden group hides its children) for renderers that
//! want it.

use std::collections::BTreeMap;

use serde::Serialize;

use formwright_core::{ActionAxis, FieldDescriptor, FieldId, FormData};
use formwright_hierarchy::ModuleRuntime;

use crate::condition::evaluate_condition;

/// Whether `field` is visible under `form`.
pub fn is_visible(field: &FieldDescriptor, form: &FormData) -> bool {
    decide(field, form, ActionAxis::Visibility)
}

/// Whether `field` is enabled under `form`.
pub fn is_enabled(field: &FieldDescriptor, form: &FormData) -> bool {
    decide(field, form, ActionAxis::Enablement)
}

fn decide(field: &FieldDescriptor, form: &FormData, axis: ActionAxis) -> bool {
    let mut rules = field.conditions.iter().filter(|rule| rule.action.axis() == axis);
    if let Some(rule) = rules.clone().find(|rule| evaluate_condition(rule, form)) {
        return rule.action.outcome();
    }
    !rules.any(|rule| rule.action.outcome())
}

/// Visibility and enablement for every field of a runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldStates {
    /// Field id → visible.
    pub visible: BTreeMap<FieldId, bool>,
    /// Field id → enabled.
    pub enabled: BTreeMap<FieldId, bool>,
}

impl FieldStates {
    /// Visibility of one field. Unknown ids are visible.
    pub fn is_visible(&self, id: &str) -> bool {
        self.visible.get(id).copied().unwrap_or(true)
    }

    /// Enablement of one field. Unknown ids are enabled.
    pub fn is_enabled(&self, id: &str) -> bool {
        self.enabled.get(id).copied().unwrap_or(true)
    }

    /// Ids of hidden fields, in id order.
    pub fn hidden(&self) -> impl Iterator<Item = &FieldId> {
        self.visible.iter().filter(|(_, v)| !**v).map(|(id, _)| id)
    }

    /// Ids of disabled fields, in id order.
    pub fn disabled(&self) -> impl Iterator<Item = &FieldId> {
        self.enabled.iter().filter(|(_, v)| !**v).map(|(id, _)| id)
    }

    /// A copy in which every descendant of a hidden field is hidden and
    /// every descendant of a disabled field is disabled.
    pub fn cascade(&self, runtime: &ModuleRuntime<'_>) -> FieldStates {
        let mut out = self.clone();
        // Depth-first order visits a parent before any of its children.
        for node in runtime.depth_first() {
            let Some(parent) = runtime.parent(node) else {
                continue;
            };
            let parent_visible = out.is_visible(parent.id().as_str());
            let parent_enabled = out.is_enabled(parent.id().as_str());
            if let Some(visible) = out.visible.get_mut(node.id().as_str()) {
                *visible &= parent_visible;
            }
            if let Some(enabled) = out.enabled.get_mut(node.id().as_str()) {
                *enabled &= parent_enabled;
            }
        }
        out
    }
}

/// Evaluate visibility and enablement for every node in `runtime`.
pub fn evaluate_all(runtime: &ModuleRuntime<'_>, form: &FormData) -> FieldStates {
    let mut states = FieldStates::default();
    for node in runtime.nodes() {
        let field = node.descriptor();
        states.visible.insert(field.id.clone(), is_visible(field, form));
        states.enabled.insert(field.id.clone(), is_enabled(field, form));
    }

    tracing::debug!(
        module = %runtime.descriptor().id,
        fields = runtime.len(),
        hidden = states.hidden().count(),
        disabled = states.disabled().count(),
        "evaluated conditional logic"
    );
    states
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use formwright_core::{ConditionAction, ConditionOperator, ConditionalRule, FieldKind, ModuleDescriptor};
    use formwright_hierarchy::build;

    fn shown_when_yes() -> FieldDescriptor {
        FieldDescriptor::new("b", FieldKind::Text).with_condition(ConditionalRule::new(
            "a",
            ConditionOperator::Equals,
            "yes",
            ConditionAction::Show,
        ))
    }

    #[test]
    fn test_no_conditions_visible_and_enabled() {
        let field = FieldDescriptor::new("a", FieldKind::Text);
        assert!(is_visible(&field, &FormData::new()));
        assert!(is_enabled(&field, &FormData::new()));
    }

    #[test]
    fn test_show_rule() {
        let field = shown_when_yes();
        assert!(is_visible(&field, &FormData::new().with("a", "yes")));
        assert!(!is_visible(&field, &FormData::new().with("a", "no")));
        assert!(!is_visible(&field, &FormData::new()));
    }

    #[test]
    fn test_hide_only_defaults_visible() {
        let field = FieldDescriptor::new("b", FieldKind::Text).with_condition(ConditionalRule::new(
            "a",
            ConditionOperator::Equals,
            "no",
            ConditionAction::Hide,
        ));
        assert!(is_visible(&field, &FormData::new().with("a", "yes")));
        assert!(!is_visible(&field, &FormData::new().with("a", "no")));
    }

    #[test]
    fn test_enable_rule_defaults_disabled() {
        let field = FieldDescriptor::new("b", FieldKind::Text).with_condition(ConditionalRule::new(
            "a",
            ConditionOperator::GreaterThan,
            "10",
            ConditionAction::Enable,
        ));
        assert!(is_enabled(&field, &FormData::new().with("a", "15")));
        assert!(!is_enabled(&field, &FormData::new().with("a", "5")));
        assert!(is_visible(&field, &FormData::new().with("a", "5")));
    }

    #[test]
    fn test_show_hide_pair() {
        let field = shown_when_yes().with_condition(ConditionalRule::new(
            "a",
            ConditionOperator::NotEquals,
            "yes",
            ConditionAction::Hide,
        ));
        assert!(is_visible(&field, &FormData::new().with("a", "yes")));
        assert!(!is_visible(&field, &FormData::new().with("a", "no")));
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let field = FieldDescriptor::new("b", FieldKind::Text)
            .with_condition(ConditionalRule::unary("a", ConditionOperator::IsNotEmpty, ConditionAction::Hide))
            .with_condition(ConditionalRule::new("a", ConditionOperator::Equals, "x", ConditionAction::Show));
        assert!(!is_visible(&field, &FormData::new().with("a", "x")));
    }

    #[test]
    fn test_axes_are_independent() {
        let field = FieldDescriptor::new("b", FieldKind::Text)
            .with_condition(ConditionalRule::new("a", ConditionOperator::Equals, "lock", ConditionAction::Disable))
            .with_condition(ConditionalRule::new("a", ConditionOperator::Equals, "lock", ConditionAction::Show));
        let form = FormData::new().with("a", "lock");
        assert!(is_visible(&field, &form));
        assert!(!is_enabled(&field, &form));
    }

    #[test]
    fn test_evaluate_all_covers_every_field() {
        let module = ModuleDescriptor::new("m")
            .with_field(FieldDescriptor::new("a", FieldKind::Radio))
            .with_field(shown_when_yes().with_condition(ConditionalRule::new(
                "a",
                ConditionOperator::Equals,
                "no",
                ConditionAction::Hide,
            )));
        let runtime = build(&module);
        let states = evaluate_all(&runtime, &FormData::new().with("a", "no"));
        assert_eq!(states.visible.len(), 2);
        assert_eq!(states.enabled.len(), 2);
        assert!(states.is_visible("a"));
        assert!(!states.is_visible("b"));
        assert_eq!(states.hidden().map(FieldId::as_str).collect::<Vec<_>>(), vec!["b"]);
        assert_eq!(states.disabled().count(), 0);
    }

    #[test]
    fn test_cascade_hides_descendants() {
        let module = ModuleDescriptor::new("m")
            .with_field(FieldDescriptor::new("toggle", FieldKind::Checkbox))
            .with_field(FieldDescriptor::new("group", FieldKind::Group).with_condition(
                ConditionalRule::new("toggle", ConditionOperator::Equals, "false", ConditionAction::Hide),
            ))
            .with_field(FieldDescriptor::new("inner", FieldKind::Group).with_parent("group"))
            .with_field(FieldDescriptor::new("leaf", FieldKind::Text).with_parent("inner"));
        let runtime = build(&module);
        let states = evaluate_all(&runtime, &FormData::new().with("toggle", false));

        assert!(states.is_visible("leaf"));
        let cascaded = states.cascade(&runtime);
        assert!(cascaded.is_visible("toggle"));
        assert!(!cascaded.is_visible("group"));
        assert!(!cascaded.is_visible("inner"));
        assert!(!cascaded.is_visible("leaf"));
        assert!(cascaded.is_enabled("leaf"));
    }
}
