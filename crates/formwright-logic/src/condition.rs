//! # Condition Evaluation
//!
//! Resolves a rule's trigger value from the form and applies its operator.
//! An absent key and an explicit `null` are the same thing. Evaluation never
//! fails: anything that cannot be compared is simply `false`.
//!
//! | Operator | Semantics |
//! |----------|-----------|
//! | `equals` / `notEquals` | case-insensitive text; two nulls are equal |
//! | `contains` | case-insensitive substring (any element, for arrays); null is false |
//! | `greaterThan` / `lessThan` | numeric, else date, else ordinal text; null is false |
//! | `isEmpty` / `isNotEmpty` | null, or text that is empty or whitespace-only |

use std::cmp::Ordering;

use serde_json::Value;

use formwright_core::{is_blank, value_text, ConditionOperator, ConditionalRule, FormData};

use crate::compare::compare_text;

/// Whether `rule`'s condition holds for the current form data.
pub fn evaluate_condition(rule: &ConditionalRule, form: &FormData) -> bool {
    let value = form.value(rule.trigger_field.as_str());
    let expected = rule.value.as_deref();

    match rule.operator {
        ConditionOperator::Equals => text_equals(value, expected),
        ConditionOperator::NotEquals => !text_equals(value, expected),
        ConditionOperator::Contains => contains(value, expected),
        ConditionOperator::GreaterThan => ordering(value, expected) == Some(Ordering::Greater),
        ConditionOperator::LessThan => ordering(value, expected) == Some(Ordering::Less),
        ConditionOperator::IsEmpty => is_blank(value),
        ConditionOperator::IsNotEmpty => !is_blank(value),
    }
}

fn text_equals(value: &Value, expected: Option<&str>) -> bool {
    match (value_text(value), expected) {
        (None, None) => true,
        (Some(actual), Some(expected)) => actual.to_lowercase() == expected.to_lowercase(),
        _ => false,
    }
}

fn contains(value: &Value, needle: Option<&str>) -> bool {
    let Some(needle) = needle else {
        return false;
    };
    let needle = needle.to_lowercase();
    match value {
        Value::Null => false,
        Value::Array(items) => items
            .iter()
            .filter_map(value_text)
            .any(|item| item.to_lowercase().contains(&needle)),
        other => value_text(other).is_some_and(|text| text.to_lowercase().contains(&needle)),
    }
}

fn ordering(value: &Value, expected: Option<&str>) -> Option<Ordering> {
    let actual = value_text(value)?;
    let expected = expected?;
    Some(compare_text(&actual, expected))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use formwright_core::ConditionAction;
    use serde_json::json;

    fn rule(op: ConditionOperator, value: &str) -> ConditionalRule {
        ConditionalRule::new("t", op, value, ConditionAction::Show)
    }

    fn unary(op: ConditionOperator) -> ConditionalRule {
        ConditionalRule::unary("t", op, ConditionAction::Show)
    }

    fn form(value: Value) -> FormData {
        FormData::new().with("t", value)
    }

    #[test]
    fn test_equals_case_insensitive() {
        let r = rule(ConditionOperator::Equals, "Yes");
        assert!(evaluate_condition(&r, &form(json!("yes"))));
        assert!(evaluate_condition(&r, &form(json!("YES"))));
        assert!(!evaluate_condition(&r, &form(json!("no"))));
        assert!(!evaluate_condition(&r, &FormData::new()));
    }

    #[test]
    fn test_equals_both_null() {
        let r = unary(ConditionOperator::Equals);
        assert!(evaluate_condition(&r, &FormData::new()));
        assert!(evaluate_condition(&r, &form(Value::Null)));
        assert!(!evaluate_condition(&r, &form(json!("x"))));
    }

    #[test]
    fn test_equals_non_string_values() {
        assert!(evaluate_condition(&rule(ConditionOperator::Equals, "true"), &form(json!(true))));
        assert!(evaluate_condition(&rule(ConditionOperator::Equals, "42"), &form(json!(42))));
    }

    #[test]
    fn test_not_equals_negates() {
        let r = rule(ConditionOperator::NotEquals, "yes");
        assert!(!evaluate_condition(&r, &form(json!("Yes"))));
        assert!(evaluate_condition(&r, &form(json!("no"))));
        assert!(evaluate_condition(&r, &FormData::new()));
    }

    #[test]
    fn test_contains() {
        let r = rule(ConditionOperator::Contains, "GMAIL");
        assert!(evaluate_condition(&r, &form(json!("ada@gmail.com"))));
        assert!(!evaluate_condition(&r, &form(json!("ada@example.org"))));
        assert!(!evaluate_condition(&r, &FormData::new()));
        assert!(!evaluate_condition(&unary(ConditionOperator::Contains), &form(json!("x"))));
    }

    #[test]
    fn test_contains_on_array_checks_elements() {
        let r = rule(ConditionOperator::Contains, "blue");
        assert!(evaluate_condition(&r, &form(json!(["red", "Light Blue"]))));
        assert!(!evaluate_condition(&r, &form(json!(["red", "green"]))));
        assert!(!evaluate_condition(&r, &form(json!([]))));
    }

    #[test]
    fn test_greater_than_numeric() {
        let r = rule(ConditionOperator::GreaterThan, "10");
        assert!(!evaluate_condition(&r, &form(json!("5"))));
        assert!(evaluate_condition(&r, &form(json!("15"))));
        assert!(evaluate_condition(&r, &form(json!(15))));
        assert!(!evaluate_condition(&r, &form(json!("10"))));
    }

    #[test]
    fn test_less_than_dates_and_text() {
        let r = rule(ConditionOperator::LessThan, "2025-01-01");
        assert!(evaluate_condition(&r, &form(json!("2024-12-31"))));
        assert!(!evaluate_condition(&r, &form(json!("2025-06-01T08:00:00"))));

        let r = rule(ConditionOperator::LessThan, "m");
        assert!(evaluate_condition(&r, &form(json!("apple"))));
        assert!(!evaluate_condition(&r, &form(json!("zebra"))));
    }

    #[test]
    fn test_ordering_false_on_null() {
        assert!(!evaluate_condition(&rule(ConditionOperator::GreaterThan, "1"), &FormData::new()));
        assert!(!evaluate_condition(&rule(ConditionOperator::LessThan, "1"), &FormData::new()));
        assert!(!evaluate_condition(&unary(ConditionOperator::GreaterThan), &form(json!(3))));
    }

    #[test]
    fn test_emptiness() {
        let empty = unary(ConditionOperator::IsEmpty);
        let not_empty = unary(ConditionOperator::IsNotEmpty);
        for blank in [Value::Null, json!(""), json!("  \t"), json!([])] {
            assert!(evaluate_condition(&empty, &form(blank.clone())));
            assert!(!evaluate_condition(&not_empty, &form(blank)));
        }
        assert!(evaluate_condition(&empty, &FormData::new()));
        assert!(evaluate_condition(&not_empty, &form(json!(0))));
        assert!(evaluate_condition(&not_empty, &form(json!(false))));
    }
}
