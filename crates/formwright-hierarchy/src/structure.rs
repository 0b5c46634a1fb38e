//! # Structural Validation and Repair
//!
//! Stricter, non-mutating checks over a descriptor, run without building a
//! runtime. Where [`build`](crate::build) silently recovers, this module
//! reports.
//!
//! | Code | Severity | Condition |
//! |------|----------|-----------|
//! | `DUPLICATE_ID` | error | a field id is declared more than once |
//! | `UNRESOLVED_PARENT` | error | `parent_id` names no field in the module |
//! | `SELF_PARENT` | error | `parent_id` equals the field's own id |
//! | `PARENT_CYCLE` | error | ancestor chain of length ≥ 2 returns to its start |
//! | `UNKNOWN_TRIGGER` | warning | a conditional rule's trigger names no field |
//! | `SELF_TRIGGER` | warning | a field's condition is triggered by itself |
//! | `MISSING_COMPARISON_VALUE` | warning | `contains`/`greaterThan`/`lessThan` without a value |
//! | `LENGTH_BOUNDS_INVERTED` | warning | `min_length` > `max_length` |
//! | `DEEP_NESTING` | warning | depth above the configured threshold |
//!
//! [`fix_structural_issues`] clears unresolved and self-referencing parent
//! ids. It does not repair longer cycles; the builder breaks those.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;

use formwright_core::{EngineConfig, FieldId, ModuleDescriptor};

use crate::cycles::find_cycles;

/// Kind of structural finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueKind {
    /// Field id declared more than once.
    DuplicateId,
    /// Parent id does not resolve.
    UnresolvedParent,
    /// Field names itself as parent.
    SelfParent,
    /// Ancestor chain loops back on itself.
    ParentCycle,
    /// Conditional trigger does not resolve.
    UnknownTrigger,
    /// Conditional triggered by the field it controls.
    SelfTrigger,
    /// Comparison operator lacks a comparison value.
    MissingComparisonValue,
    /// Minimum length exceeds maximum length.
    LengthBoundsInverted,
    /// Field nested deeper than the configured threshold.
    DeepNesting,
}

impl IssueKind {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateId => "DUPLICATE_ID",
            Self::UnresolvedParent => "UNRESOLVED_PARENT",
            Self::SelfParent => "SELF_PARENT",
            Self::ParentCycle => "PARENT_CYCLE",
            Self::UnknownTrigger => "UNKNOWN_TRIGGER",
            Self::SelfTrigger => "SELF_TRIGGER",
            Self::MissingComparisonValue => "MISSING_COMPARISON_VALUE",
            Self::LengthBoundsInverted => "LENGTH_BOUNDS_INVERTED",
            Self::DeepNesting => "DEEP_NESTING",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One structural finding, scoped to a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuralIssue {
    /// What was found.
    pub kind: IssueKind,
    /// The field the finding is reported against.
    pub field_id: FieldId,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for StructuralIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.field_id, self.message)
    }
}

/// Errors and warnings from [`validate_structure`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructureReport {
    /// Problems that make the hierarchy unreliable.
    pub errors: Vec<StructuralIssue>,
    /// Suspicious configuration that still builds and evaluates.
    pub warnings: Vec<StructuralIssue>,
}

impl StructureReport {
    /// Whether no errors were found. Warnings do not affect validity.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors of a given kind.
    pub fn errors_of(&self, kind: IssueKind) -> impl Iterator<Item = &StructuralIssue> {
        self.errors.iter().filter(move |i| i.kind == kind)
    }

    /// Warnings of a given kind.
    pub fn warnings_of(&self, kind: IssueKind) -> impl Iterator<Item = &StructuralIssue> {
        self.warnings.iter().filter(move |i| i.kind == kind)
    }

    fn error(&mut self, kind: IssueKind, field_id: &FieldId, message: String) {
        self.errors.push(StructuralIssue {
            kind,
            field_id: field_id.clone(),
            message,
        });
    }

    fn warning(&mut self, kind: IssueKind, field_id: &FieldId, message: String) {
        self.warnings.push(StructuralIssue {
            kind,
            field_id: field_id.clone(),
            message,
        });
    }
}

/// Validate a descriptor's structure with default configuration.
pub fn validate_structure(module: &ModuleDescriptor) -> StructureReport {
    validate_structure_with(module, &EngineConfig::default())
}

/// Validate a descriptor's structure.
pub fn validate_structure_with(module: &ModuleDescriptor, config: &EngineConfig) -> StructureReport {
    let mut report = StructureReport::default();

    let mut last_position: HashMap<&str, usize> = HashMap::with_capacity(module.fields.len());
    let mut reported_duplicates: HashSet<&str> = HashSet::new();
    for (position, field) in module.fields.iter().enumerate() {
        if last_position.insert(field.id.as_str(), position).is_some()
            && reported_duplicates.insert(field.id.as_str())
        {
            report.error(
                IssueKind::DuplicateId,
                &field.id,
                format!("field id {:?} is declared more than once", field.id.as_str()),
            );
        }
    }

    let mut parents: Vec<Option<usize>> = vec![None; module.fields.len()];
    for (position, field) in module.fields.iter().enumerate() {
        let Some(parent_id) = &field.parent_id else {
            continue;
        };
        if *parent_id == field.id {
            report.error(
                IssueKind::SelfParent,
                &field.id,
                "field lists itself as its parent".into(),
            );
            continue;
        }
        match last_position.get(parent_id.as_str()) {
            Some(&parent) => parents[position] = Some(parent),
            None => report.error(
                IssueKind::UnresolvedParent,
                &field.id,
                format!("parent {:?} does not exist in module", parent_id.as_str()),
            ),
        }
    }

    for cycle in find_cycles(&parents) {
        let Some(&entry) = cycle.iter().min() else {
            continue;
        };
        let mut chain: Vec<&str> = cycle.iter().map(|&i| module.fields[i].id.as_str()).collect();
        if let Some(first) = chain.first().copied() {
            chain.push(first);
        }
        report.error(
            IssueKind::ParentCycle,
            &module.fields[entry].id,
            format!("parent cycle: {}", chain.join(" -> ")),
        );
    }

    for field in &module.fields {
        for rule in &field.conditions {
            if rule.trigger_field == field.id {
                report.warning(
                    IssueKind::SelfTrigger,
                    &field.id,
                    format!("{} condition is triggered by the field itself", rule.action),
                );
            } else if !last_position.contains_key(rule.trigger_field.as_str()) {
                report.warning(
                    IssueKind::UnknownTrigger,
                    &field.id,
                    format!(
                        "condition trigger {:?} does not exist in module",
                        rule.trigger_field.as_str()
                    ),
                );
            }
            if rule.operator.needs_comparison_value() && rule.value.is_none() {
                report.warning(
                    IssueKind::MissingComparisonValue,
                    &field.id,
                    format!("{} condition has no comparison value", rule.operator),
                );
            }
        }

        if let (Some(min), Some(max)) = (field.min_length, field.max_length) {
            if min > max {
                report.warning(
                    IssueKind::LengthBoundsInverted,
                    &field.id,
                    format!("min_length {min} exceeds max_length {max}"),
                );
            }
        }
    }

    if let Some(limit) = config.max_depth_warning {
        for (position, field) in module.fields.iter().enumerate() {
            let depth = depth_of(position, &parents);
            if depth > limit {
                report.warning(
                    IssueKind::DeepNesting,
                    &field.id,
                    format!("depth {depth} exceeds {limit}"),
                );
            }
        }
    }

    tracing::debug!(
        module = %module.id,
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "validated module structure"
    );

    report
}

/// Number of resolvable ancestors, stopping if the chain loops.
fn depth_of(position: usize, parents: &[Option<usize>]) -> usize {
    let mut seen = HashSet::new();
    let mut depth = 0;
    let mut cursor = parents[position];
    seen.insert(position);
    while let Some(parent) = cursor {
        if !seen.insert(parent) {
            break;
        }
        depth += 1;
        cursor = parents[parent];
    }
    depth
}

/// Return a copy of the descriptor with every unresolved or
/// self-referencing parent id cleared, making those fields roots.
pub fn fix_structural_issues(module: &ModuleDescriptor) -> ModuleDescriptor {
    let ids: HashSet<&str> = module.fields.iter().map(|f| f.id.as_str()).collect();
    let mut fixed = module.clone();

    for field in &mut fixed.fields {
        let clear = match &field.parent_id {
            Some(parent) => *parent == field.id || !ids.contains(parent.as_str()),
            None => false,
        };
        if clear {
            tracing::info!(
                module = %module.id,
                field = %field.id,
                "cleared unusable parent reference"
            );
            field.parent_id = None;
        }
    }

    fixed
}

/// Whether making `new_parent` the parent of `field` would put `field`
/// among its own ancestors.
pub fn would_create_cycle(module: &ModuleDescriptor, field: &str, new_parent: &str) -> bool {
    if field == new_parent {
        return true;
    }
    let mut seen: HashSet<&str> = HashSet::new();
    let mut cursor = Some(new_parent);
    while let Some(current) = cursor {
        if current == field {
            return true;
        }
        if !seen.insert(current) {
            // Pre-existing cycle that does not pass through `field`.
            return false;
        }
        cursor = module
            .field(current)
            .and_then(|f| f.parent_id.as_ref())
            .map(FieldId::as_str);
    }
    false
}
