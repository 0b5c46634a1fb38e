//! Reverse index from trigger field to the fields whose conditions read it.
//!
//! Hosts use it to re-evaluate only the affected fields when one value
//! changes.

use std::collections::BTreeMap;

use serde::Serialize;

use formwright_core::FieldId;
use formwright_hierarchy::ModuleRuntime;

/// Trigger field id → dependent field ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DependencyIndex {
    dependents: BTreeMap<FieldId, Vec<FieldId>>,
}

impl DependencyIndex {
    /// Index every conditional rule in `runtime`. Dependents are listed in
    /// depth-first order, once each, even when a field has several rules
    /// on the same trigger.
    pub fn build(runtime: &ModuleRuntime<'_>) -> Self {
        let mut dependents: BTreeMap<FieldId, Vec<FieldId>> = BTreeMap::new();
        for node in runtime.depth_first() {
            for rule in &node.descriptor().conditions {
                let list = dependents.entry(rule.trigger_field.clone()).or_default();
                if !list.contains(node.id()) {
                    list.push(node.id().clone());
                }
            }
        }
        Self { dependents }
    }

    /// Fields whose conditions read `trigger`.
    pub fn dependents(&self, trigger: &str) -> &[FieldId] {
        self.dependents.get(trigger).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether any condition reads `field`.
    pub fn is_trigger(&self, field: &str) -> bool {
        self.dependents.contains_key(field)
    }

    /// Trigger ids, sorted.
    pub fn triggers(&self) -> impl Iterator<Item = &FieldId> {
        self.dependents.keys()
    }

    /// Number of distinct triggers.
    pub fn len(&self) -> usize {
        self.dependents.len()
    }

    /// Whether no field carries a condition.
    pub fn is_empty(&self) -> bool {
        self.dependents.is_empty()
    }
}
