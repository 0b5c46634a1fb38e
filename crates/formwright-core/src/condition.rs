//! # Conditional Rules — Closed Operator and Action Variants
//!
//! A conditional rule ties a dependent field's visibility or enabled state
//! to the current value of a trigger field. Operators and actions are
//! closed enums: an unknown or misspelled operator is rejected when the
//! descriptor is parsed, never silently evaluated as "false".
//!
//! ## Wire Format
//!
//! Operators serialize as camelCase (`greaterThan`, `isNotEmpty`); the
//! snake_case spellings (`greater_than`, `is_not_empty`) are accepted on
//! input. Actions serialize lowercase.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FormwrightError;
use crate::identity::FieldId;

/// Comparison applied between the trigger field's value and the rule's
/// comparison value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConditionOperator {
    /// Case-insensitive text equality; two nulls are equal.
    Equals,
    /// Negation of [`ConditionOperator::Equals`].
    #[serde(alias = "not_equals")]
    NotEquals,
    /// Case-insensitive substring test.
    Contains,
    /// Numeric, then date, then ordinal text comparison.
    #[serde(alias = "greater_than")]
    GreaterThan,
    /// Numeric, then date, then ordinal text comparison.
    #[serde(alias = "less_than")]
    LessThan,
    /// Value is null or blank text.
    #[serde(alias = "is_empty")]
    IsEmpty,
    /// Value is neither null nor blank text.
    #[serde(alias = "is_not_empty")]
    IsNotEmpty,
}

impl ConditionOperator {
    /// Returns all operators in declaration order.
    pub fn all() -> &'static [ConditionOperator] {
        &[
            Self::Equals,
            Self::NotEquals,
            Self::Contains,
            Self::GreaterThan,
            Self::LessThan,
            Self::IsEmpty,
            Self::IsNotEmpty,
        ]
    }

    /// Returns the canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "notEquals",
            Self::Contains => "contains",
            Self::GreaterThan => "greaterThan",
            Self::LessThan => "lessThan",
            Self::IsEmpty => "isEmpty",
            Self::IsNotEmpty => "isNotEmpty",
        }
    }

    /// Whether this operator reads the rule's comparison value.
    ///
    /// `equals`/`notEquals` read it but treat an absent value as null, so
    /// only the ordering and substring operators need one to be useful.
    pub fn needs_comparison_value(&self) -> bool {
        matches!(self, Self::Contains | Self::GreaterThan | Self::LessThan)
    }
}

impl fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConditionOperator {
    type Err = FormwrightError;

    /// Parse an operator from its camelCase or snake_case name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equals" => Ok(Self::Equals),
            "notEquals" | "not_equals" => Ok(Self::NotEquals),
            "contains" => Ok(Self::Contains),
            "greaterThan" | "greater_than" => Ok(Self::GreaterThan),
            "lessThan" | "less_than" => Ok(Self::LessThan),
            "isEmpty" | "is_empty" => Ok(Self::IsEmpty),
            "isNotEmpty" | "is_not_empty" => Ok(Self::IsNotEmpty),
            other => Err(FormwrightError::UnknownOperator(other.to_string())),
        }
    }
}

/// The two independent states a conditional rule can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionAxis {
    /// Show / hide.
    Visibility,
    /// Enable / disable.
    Enablement,
}

/// Effect applied to the dependent field when the condition holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionAction {
    /// Make the field visible.
    Show,
    /// Hide the field.
    Hide,
    /// Enable the field for input.
    Enable,
    /// Disable the field.
    Disable,
}

impl ConditionAction {
    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Show => "show",
            Self::Hide => "hide",
            Self::Enable => "enable",
            Self::Disable => "disable",
        }
    }

    /// Which state this action drives.
    pub fn axis(&self) -> ActionAxis {
        match self {
            Self::Show | Self::Hide => ActionAxis::Visibility,
            Self::Enable | Self::Disable => ActionAxis::Enablement,
        }
    }

    /// The state this action sets on its axis (`true` = shown / enabled).
    pub fn outcome(&self) -> bool {
        matches!(self, Self::Show | Self::Enable)
    }
}

impl fmt::Display for ConditionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConditionAction {
    type Err = FormwrightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "show" => Ok(Self::Show),
            "hide" => Ok(Self::Hide),
            "enable" => Ok(Self::Enable),
            "disable" => Ok(Self::Disable),
            other => Err(FormwrightError::UnknownAction(other.to_string())),
        }
    }
}

/// A trigger/operator/value/action tuple attached to a dependent field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalRule {
    /// The field whose current value is tested.
    #[serde(alias = "trigger")]
    pub trigger_field: FieldId,
    /// How the trigger value is compared.
    pub operator: ConditionOperator,
    /// String-encoded comparison value, if the operator uses one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Effect on the dependent field when the condition holds.
    pub action: ConditionAction,
}

impl ConditionalRule {
    /// Create a rule with a comparison value.
    pub fn new(
        trigger_field: impl Into<FieldId>,
        operator: ConditionOperator,
        value: impl Into<String>,
        action: ConditionAction,
    ) -> Self {
        Self {
            trigger_field: trigger_field.into(),
            operator,
            value: Some(value.into()),
            action,
        }
    }

    /// Create a rule whose operator takes no comparison value.
    pub fn unary(
        trigger_field: impl Into<FieldId>,
        operator: ConditionOperator,
        action: ConditionAction,
    ) -> Self {
        Self {
            trigger_field: trigger_field.into(),
            operator,
            value: None,
            action,
        }
    }
}
