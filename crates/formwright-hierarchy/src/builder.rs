//! # Hierarchy Builder
//!
//! Rebuilds the field tree from the flat descriptor in three passes:
//!
//! 1. **Materialize**: one node per distinct field id. When an id repeats,
//!    the last declaration wins and a warning is logged.
//! 2. **Link**: resolve each `parent_id`. An unresolved parent makes the
//!    field an orphan: it is promoted to a root with a warning. Parent
//!    cycles (including self-parenting) are broken by promoting the member
//!    declared earliest.
//! 3. **Order and measure**: stable-sort roots and every child list by
//!    declared order, derive depth and path, and compute metrics.
//!
//! The build never fails. A broken schema degrades to a flatter tree that
//! is still fully traversable.

use std::collections::HashMap;

use formwright_core::ModuleDescriptor;

use crate::cycles::find_cycles;
use crate::metrics::HierarchyMetrics;
use crate::runtime::{BuildDiagnostics, FieldNode, ModuleRuntime, NodeId};

/// Build the runtime tree for a module.
pub fn build(module: &ModuleDescriptor) -> ModuleRuntime<'_> {
    let mut diagnostics = BuildDiagnostics::default();

    // Pass 1: materialize.
    let mut last_position: HashMap<&str, usize> = HashMap::with_capacity(module.fields.len());
    for (position, field) in module.fields.iter().enumerate() {
        if let Some(previous) = last_position.insert(field.id.as_str(), position) {
            tracing::warn!(
                module = %module.id,
                field = %field.id,
                previous,
                position,
                "duplicate field id; keeping the last declaration"
            );
            if !diagnostics.duplicates.contains(&field.id) {
                diagnostics.duplicates.push(field.id.clone());
            }
        }
    }

    let mut nodes: Vec<FieldNode<'_>> = Vec::with_capacity(last_position.len());
    let mut lookup: HashMap<&str, NodeId> = HashMap::with_capacity(last_position.len());
    for (position, field) in module.fields.iter().enumerate() {
        if last_position.get(field.id.as_str()) == Some(&position) {
            lookup.insert(field.id.as_str(), NodeId(nodes.len()));
            nodes.push(FieldNode::new(field, position));
        }
    }

    // Pass 2: link.
    let mut parents: Vec<Option<usize>> = vec![None; nodes.len()];
    for (index, node) in nodes.iter().enumerate() {
        let Some(parent_id) = &node.descriptor.parent_id else {
            continue;
        };
        match lookup.get(parent_id.as_str()) {
            Some(parent) => parents[index] = Some(parent.0),
            None => {
                tracing::warn!(
                    module = %module.id,
                    field = %node.descriptor.id,
                    parent = %parent_id,
                    "parent not found; promoting orphan to root"
                );
                diagnostics.orphans.push(node.descriptor.id.clone());
            }
        }
    }

    for cycle in find_cycles(&parents) {
        // Arena order is declaration order, so the smallest index is the
        // member declared first.
        let Some(&entry) = cycle.iter().min() else {
            continue;
        };
        let chain: Vec<&str> = cycle
            .iter()
            .map(|&i| nodes[i].descriptor.id.as_str())
            .collect();
        tracing::warn!(
            module = %module.id,
            field = %nodes[entry].descriptor.id,
            cycle = %chain.join(" -> "),
            "parent cycle; promoting field to root"
        );
        parents[entry] = None;
        diagnostics.cycle_breaks.push(nodes[entry].descriptor.id.clone());
    }

    let mut roots = Vec::new();
    for (index, parent) in parents.iter().enumerate() {
        match parent {
            Some(p) => {
                nodes[index].parent = Some(NodeId(*p));
                nodes[*p].children.push(NodeId(index));
            }
            None => roots.push(NodeId(index)),
        }
    }

    // Pass 3: order and measure. `sort_by_key` is stable, and children were
    // appended in declaration order, so ties keep array position.
    roots.sort_by_key(|n| nodes[n.0].descriptor.order);
    for index in 0..nodes.len() {
        let mut children = std::mem::take(&mut nodes[index].children);
        children.sort_by_key(|n| nodes[n.0].descriptor.order);
        nodes[index].children = children;
    }

    assign_depth_and_path(&mut nodes, &roots);
    let metrics = HierarchyMetrics::compute(&nodes);

    tracing::debug!(
        module = %module.id,
        fields = metrics.total_fields,
        roots = metrics.root_fields,
        max_depth = metrics.max_depth,
        "built module runtime"
    );

    ModuleRuntime {
        module,
        nodes,
        lookup,
        roots,
        metrics,
        diagnostics,
    }
}

fn assign_depth_and_path(nodes: &mut [FieldNode<'_>], roots: &[NodeId]) {
    let mut stack: Vec<NodeId> = Vec::with_capacity(nodes.len());
    for &root in roots {
        let node = &mut nodes[root.0];
        node.depth = 0;
        node.path = node.descriptor.id.to_string();
        stack.push(root);
    }

    while let Some(current) = stack.pop() {
        let depth = nodes[current.0].depth + 1;
        let prefix = nodes[current.0].path.clone();
        let children = nodes[current.0].children.clone();
        for child in children {
            let node = &mut nodes[child.0];
            node.depth = depth;
            node.path = format!("{prefix}.{}", node.descriptor.id);
            stack.push(child);
        }
    }
}

impl<'a> ModuleRuntime<'a> {
    /// Build the runtime tree for a module. See [`build`].
    pub fn build(module: &'a ModuleDescriptor) -> Self {
        build(module)
    }
}
