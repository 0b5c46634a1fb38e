//! # Form Data
//!
//! The loosely-typed values a renderer submits, keyed by field id. A key
//! that is absent is indistinguishable from an explicit `null`: both mean
//! "no value entered".
//!
//! Rules and conditions compare values as text. The coercion here is the
//! single place that decides how a JSON value reads as text:
//!
//! | Value | Text |
//! |-------|------|
//! | `null` | none |
//! | string | as-is |
//! | number | decimal rendering |
//! | bool | `true` / `false` |
//! | array | element texts joined with `,` |
//! | object | compact JSON |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FormwrightError;
use crate::identity::FieldId;

static NULL: Value = Value::Null;

/// Submitted values keyed by field id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData(BTreeMap<FieldId, Value>);

impl FormData {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field's value, returning the previous one.
    pub fn insert(&mut self, id: impl Into<FieldId>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(id.into(), value.into())
    }

    /// Builder form of [`FormData::insert`].
    pub fn with(mut self, id: impl Into<FieldId>, value: impl Into<Value>) -> Self {
        self.insert(id, value);
        self
    }

    /// Remove a field's value.
    pub fn remove(&mut self, id: &str) -> Option<Value> {
        self.0.remove(id)
    }

    /// The value for a field; `null` when absent.
    pub fn value(&self, id: &str) -> &Value {
        self.0.get(id).unwrap_or(&NULL)
    }

    /// Whether a key is present (even if its value is `null`).
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    /// Number of keys present.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no keys are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over present entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldId, &Value)> {
        self.0.iter()
    }

    /// Parse form data from a JSON object.
    pub fn from_json(json: &str) -> Result<Self, FormwrightError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl<K: Into<FieldId>, V: Into<Value>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Read a value as text. Returns `None` only for `null`.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(value_text)
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Some(value.to_string()),
    }
}

/// Whether a value counts as "nothing entered": `null`, or a value whose
/// [`value_text`] is empty or whitespace-only (`""`, `[]`, `[""]`, `[null]`).
pub fn is_blank(value: &Value) -> bool {
    value_text(value).map_or(true, |text| text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_reads_as_null() {
        let form = FormData::new().with("a", "x");
        assert_eq!(form.value("missing"), &Value::Null);
        assert!(!form.contains("missing"));
    }

    #[test]
    fn test_explicit_null_same_as_absent() {
        let form = FormData::new().with("a", Value::Null);
        assert_eq!(form.value("a"), form.value("b"));
        assert!(form.contains("a"));
    }

    #[test]
    fn test_value_text_coercion() {
        assert_eq!(value_text(&Value::Null), None);
        assert_eq!(value_text(&json!("hi")).as_deref(), Some("hi"));
        assert_eq!(value_text(&json!(42)).as_deref(), Some("42"));
        assert_eq!(value_text(&json!(2.5)).as_deref(), Some("2.5"));
        assert_eq!(value_text(&json!(true)).as_deref(), Some("true"));
        assert_eq!(value_text(&json!(["a", 1, null])).as_deref(), Some("a,1"));
        assert_eq!(value_text(&json!({"k": 1})).as_deref(), Some(r#"{"k":1}"#));
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(&Value::Null));
        assert!(is_blank(&json!("")));
        assert!(is_blank(&json!("  \t")));
        assert!(is_blank(&json!([])));
        assert!(!is_blank(&json!("x")));
        assert!(!is_blank(&json!(0)));
        assert!(!is_blank(&json!(false)));
    }

    #[test]
    fn test_is_blank_arrays_follow_text() {
        assert!(is_blank(&json!([""])));
        assert!(is_blank(&json!([null])));
        assert!(is_blank(&json!(["  "])));
        assert!(!is_blank(&json!(["a", ""])));
        assert!(!is_blank(&json!({})));
    }

    #[test]
    fn test_from_json_object() {
        let form = FormData::from_json(r#"{"age": 30, "name": "Ada"}"#).unwrap();
        assert_eq!(form.len(), 2);
        assert_eq!(form.value("age"), &json!(30));
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(FormData::from_json("[1, 2]").is_err());
    }

    #[test]
    fn test_collect_from_pairs() {
        let form: FormData = vec![("a", json!(1)), ("b", json!("two"))].into_iter().collect();
        assert_eq!(form.value("b"), &json!("two"));
    }
}
