//! # Hierarchy Metrics
//!
//! Aggregate shape of a module runtime, computed once at build time.
//!
//! The complexity score is a deliberately simple weighted sum:
//!
//! ```text
//! complexity = 1 × fields + 2 × parent-linked fields + 3 × conditional fields
//! ```
//!
//! "Parent-linked" counts fields that ended up attached to a parent in the
//! runtime; orphans and cycle breaks promoted to roots do not count.

use serde::{Deserialize, Serialize};

use crate::runtime::FieldNode;

/// Aggregate metrics for one module runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyMetrics {
    /// Number of fields in the runtime.
    pub total_fields: usize,
    /// Number of root fields.
    pub root_fields: usize,
    /// Deepest node depth (roots are 0).
    pub max_depth: usize,
    /// Mean node depth; 0 for an empty module.
    pub average_depth: f64,
    /// Fields carrying at least one conditional rule.
    pub conditional_fields: usize,
    /// Fields attached to a parent.
    pub linked_fields: usize,
    /// Weighted structural complexity score.
    pub complexity_score: usize,
}

impl HierarchyMetrics {
    /// Compute metrics over fully linked nodes.
    pub(crate) fn compute(nodes: &[FieldNode<'_>]) -> Self {
        let total_fields = nodes.len();
        let root_fields = nodes.iter().filter(|n| n.is_root()).count();
        let linked_fields = total_fields - root_fields;
        let conditional_fields = nodes
            .iter()
            .filter(|n| n.descriptor().has_conditions())
            .count();
        let max_depth = nodes.iter().map(FieldNode::depth).max().unwrap_or(0);
        let depth_sum: usize = nodes.iter().map(FieldNode::depth).sum();
        let average_depth = if total_fields == 0 {
            0.0
        } else {
            depth_sum as f64 / total_fields as f64
        };

        Self {
            total_fields,
            root_fields,
            max_depth,
            average_depth,
            conditional_fields,
            linked_fields,
            complexity_score: total_fields + 2 * linked_fields + 3 * conditional_fields,
        }
    }
}
