//! # Schema Model
//!
//! Immutable, serializable description of a module and its fields. This is
//! pure data: the flat, storage-friendly shape a persistence layer loads
//! and saves. Hierarchy is expressed only through each field's optional
//! `parent_id`; parent/child links are derived at runtime and never stored.
//!
//! ## Invariants
//!
//! - A field id is unique within its owning module. Duplicates are a
//!   caller error, surfaced by the structural validator.
//! - An absent optional attribute means "not configured", never "invalid".

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::condition::ConditionalRule;
use crate::error::FormwrightError;
use crate::identity::{FieldId, ModuleId};

// ---------------------------------------------------------------------------
// FieldKind
// ---------------------------------------------------------------------------

/// The widget/value kind of a field.
///
/// The common kinds are named variants; anything else a host defines is
/// carried verbatim as [`FieldKind::Custom`]. Serialized as a lowercase
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FieldKind {
    /// Single-line text.
    #[default]
    Text,
    /// Multi-line text.
    Textarea,
    /// Numeric input.
    Number,
    /// Email address input.
    Email,
    /// Calendar date.
    Date,
    /// Date and time.
    Datetime,
    /// Boolean checkbox.
    Checkbox,
    /// Single choice from a small option set.
    Radio,
    /// Single choice from a dropdown.
    Select,
    /// Multiple choices.
    Multiselect,
    /// Container for child fields; carries no value of its own.
    Group,
    /// Host-defined kind.
    Custom(String),
}

impl FieldKind {
    /// Returns the wire name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Number => "number",
            Self::Email => "email",
            Self::Date => "date",
            Self::Datetime => "datetime",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Select => "select",
            Self::Multiselect => "multiselect",
            Self::Group => "group",
            Self::Custom(name) => name,
        }
    }

    /// Whether the field chooses from [`FieldDescriptor::options`].
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::Radio | Self::Select | Self::Multiselect)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = FormwrightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s {
            "" => return Err(FormwrightError::EmptyFieldKind),
            "text" => Self::Text,
            "textarea" => Self::Textarea,
            "number" => Self::Number,
            "email" => Self::Email,
            "date" => Self::Date,
            "datetime" => Self::Datetime,
            "checkbox" => Self::Checkbox,
            "radio" => Self::Radio,
            "select" => Self::Select,
            "multiselect" => Self::Multiselect,
            "group" => Self::Group,
            other => Self::Custom(other.to_string()),
        };
        Ok(kind)
    }
}

impl TryFrom<String> for FieldKind {
    type Error = FormwrightError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Custom(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// FieldOption
// ---------------------------------------------------------------------------

/// One selectable option of a choice field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    /// Submitted value.
    pub value: String,
    /// Display label.
    pub label: String,
}

impl FieldOption {
    /// Create an option whose label differs from its value.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// FieldDescriptor
// ---------------------------------------------------------------------------

/// Schema-level description of a single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Unique id within the owning module.
    pub id: FieldId,
    /// Field kind tag.
    #[serde(default, alias = "type")]
    pub kind: FieldKind,
    /// Human-readable label used in messages. Falls back to the id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Display order among siblings. Ties keep array position.
    #[serde(default)]
    pub order: i64,
    /// Parent field id; `None` makes the field a root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<FieldId>,
    /// Whether a value must be supplied.
    #[serde(default)]
    pub required: bool,
    /// Minimum text length in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Maximum text length in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Regular expression the text must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Rule ids resolved through the rule registry.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<String>,
    /// Conditional visibility/enablement rules, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<ConditionalRule>,
    /// Options for choice fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    /// Free-form data owned by the host (widget hints, placeholders, ...).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extensions: BTreeMap<String, Value>,
}

impl FieldDescriptor {
    /// Create an unconfigured field of the given kind.
    pub fn new(id: impl Into<FieldId>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            kind,
            label: None,
            order: 0,
            parent_id: None,
            required: false,
            min_length: None,
            max_length: None,
            pattern: None,
            rules: Vec::new(),
            conditions: Vec::new(),
            options: Vec::new(),
            extensions: BTreeMap::new(),
        }
    }

    /// Label used in human-readable messages.
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(self.id.as_str())
    }

    /// Whether this field carries any conditional rule.
    pub fn has_conditions(&self) -> bool {
        !self.conditions.is_empty()
    }

    /// Whether a min or max length is configured.
    pub fn has_length_bounds(&self) -> bool {
        self.min_length.is_some() || self.max_length.is_some()
    }

    /// Set the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the display order.
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    /// Set the parent field.
    pub fn with_parent(mut self, parent: impl Into<FieldId>) -> Self {
        self.parent_id = Some(parent.into());
        self
    }

    /// Mark the field required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the minimum length.
    pub fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Set the maximum length.
    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Set the pattern.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Append a registry rule id.
    pub fn with_rule(mut self, rule_id: impl Into<String>) -> Self {
        self.rules.push(rule_id.into());
        self
    }

    /// Append a conditional rule.
    pub fn with_condition(mut self, rule: ConditionalRule) -> Self {
        self.conditions.push(rule);
        self
    }

    /// Append a choice option.
    pub fn with_option(mut self, option: FieldOption) -> Self {
        self.options.push(option);
        self
    }
}

// ---------------------------------------------------------------------------
// ModuleDescriptor
// ---------------------------------------------------------------------------

/// A module: an ordered, flat array of fields plus module-level rule ids.
///
/// The module owns its fields by value. Descriptors round-trip through
/// JSON or YAML; the runtime tree is rebuilt from them on every change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    /// Module identifier.
    pub id: ModuleId,
    /// Human-readable module name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Fields in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    /// Rule ids applied at module level.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<String>,
}

impl ModuleDescriptor {
    /// Create an empty module.
    pub fn new(id: impl Into<ModuleId>) -> Self {
        Self {
            id: id.into(),
            label: None,
            fields: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Append a field.
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Append a module-level rule id.
    pub fn with_rule(mut self, rule_id: impl Into<String>) -> Self {
        self.rules.push(rule_id.into());
        self
    }

    /// Look up a field by id. With duplicate ids the last one wins,
    /// matching what the hierarchy builder keeps.
    pub fn field(&self, id: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().rev().find(|f| f.id == id)
    }

    /// Whether any field declares this id.
    pub fn contains(&self, id: &str) -> bool {
        self.fields.iter().any(|f| f.id == id)
    }

    /// Parse a descriptor from JSON.
    pub fn from_json(json: &str) -> Result<Self, FormwrightError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a descriptor from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, FormwrightError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, FormwrightError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, FormwrightError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Load a descriptor from disk. `.yaml`/`.yml` files are read as YAML,
    /// everything else as JSON.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FormwrightError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        if is_yaml_path(path) {
            Self::from_yaml(&content)
        } else {
            Self::from_json(&content)
        }
    }
}

/// Whether a path names a YAML document by extension.
pub fn is_yaml_path(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::{ConditionAction, ConditionOperator};

    fn signup() -> ModuleDescriptor {
        ModuleDescriptor::new("signup")
            .with_field(FieldDescriptor::new("account", FieldKind::Group).with_order(1))
            .with_field(
                FieldDescriptor::new("email", FieldKind::Email)
                    .with_parent("account")
                    .required()
                    .with_rule("email"),
            )
            .with_field(
                FieldDescriptor::new("plan", FieldKind::Select)
                    .with_option(FieldOption::new("free", "Free"))
                    .with_option(FieldOption::new("pro", "Pro")),
            )
            .with_field(
                FieldDescriptor::new("company", FieldKind::Text).with_condition(
                    ConditionalRule::new("plan", ConditionOperator::Equals, "pro", ConditionAction::Show),
                ),
            )
    }

    #[test]
    fn test_field_kind_roundtrip_known_and_custom() {
        for name in ["text", "group", "multiselect", "signature"] {
            let kind: FieldKind = name.parse().unwrap();
            assert_eq!(String::from(kind.clone()), name);
            assert_eq!(kind.as_str(), name);
        }
        assert_eq!("signature".parse::<FieldKind>().unwrap(), FieldKind::Custom("signature".into()));
    }

    #[test]
    fn test_field_kind_rejects_empty() {
        assert!(serde_json::from_str::<FieldKind>("\"\"").is_err());
    }

    #[test]
    fn test_field_defaults_when_absent() {
        let field: FieldDescriptor = serde_json::from_str(r#"{"id": "name"}"#).unwrap();
        assert_eq!(field.kind, FieldKind::Text);
        assert_eq!(field.order, 0);
        assert!(field.parent_id.is_none());
        assert!(!field.required);
        assert!(field.min_length.is_none());
        assert!(field.conditions.is_empty());
    }

    #[test]
    fn test_field_accepts_type_alias() {
        let field: FieldDescriptor =
            serde_json::from_str(r#"{"id": "dob", "type": "date"}"#).unwrap();
        assert_eq!(field.kind, FieldKind::Date);
    }

    #[test]
    fn test_json_roundtrip() {
        let module = signup();
        let json = module.to_json().unwrap();
        assert_eq!(ModuleDescriptor::from_json(&json).unwrap(), module);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let module = signup();
        let yaml = module.to_yaml().unwrap();
        assert_eq!(ModuleDescriptor::from_yaml(&yaml).unwrap(), module);
    }

    #[test]
    fn test_unset_optionals_not_serialized() {
        let json = serde_json::to_value(FieldDescriptor::new("x", FieldKind::Text)).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("parent_id"));
        assert!(!obj.contains_key("pattern"));
        assert!(!obj.contains_key("rules"));
    }

    #[test]
    fn test_unknown_operator_fails_descriptor_parse() {
        let json = r#"{"id": "m", "fields": [{"id": "a", "conditions": [
            {"trigger_field": "b", "operator": "bigger", "value": "1", "action": "show"}
        ]}]}"#;
        assert!(ModuleDescriptor::from_json(json).is_err());
    }

    #[test]
    fn test_field_lookup_last_wins() {
        let module = ModuleDescriptor::new("m")
            .with_field(FieldDescriptor::new("a", FieldKind::Text).with_order(1))
            .with_field(FieldDescriptor::new("a", FieldKind::Number).with_order(2));
        assert_eq!(module.field("a").unwrap().kind, FieldKind::Number);
        assert!(module.contains("a"));
        assert!(module.field("b").is_none());
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let field = FieldDescriptor::new("zip", FieldKind::Text);
        assert_eq!(field.display_name(), "zip");
        assert_eq!(field.with_label("Postal code").display_name(), "Postal code");
    }

    #[test]
    fn test_is_yaml_path() {
        assert!(is_yaml_path(Path::new("forms/signup.yaml")));
        assert!(is_yaml_path(Path::new("signup.yml")));
        assert!(!is_yaml_path(Path::new("signup.json")));
        assert!(!is_yaml_path(Path::new("signup")));
    }
}
