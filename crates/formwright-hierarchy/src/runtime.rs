//! # Module Runtime — Arena-Backed Field Tree
//!
//! The navigable projection of a [`ModuleDescriptor`]. All nodes live in a
//! single arena (`Vec<FieldNode>`) addressed by [`NodeId`]; parent and child
//! links are indices into that arena, never owning references, so the tree
//! has no reference cycles and is trivially rebuilt.
//!
//! ## Lifecycle
//!
//! A runtime borrows the descriptor it was built from and is never mutated
//! after [`build`](crate::build) returns. When the descriptor changes,
//! discard the runtime and build a new one.
//!
//! ## Invariants
//!
//! - Every non-root node has exactly one parent and appears exactly once in
//!   that parent's child list.
//! - No node is its own ancestor.
//! - The lookup's id set equals the descriptor's field id set.

use std::collections::HashMap;

use serde::Serialize;

use formwright_core::{FieldDescriptor, FieldId, ModuleDescriptor};

use crate::metrics::HierarchyMetrics;
use crate::traversal::DepthFirst;

/// Index of a node in its runtime's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A field positioned in the runtime tree.
#[derive(Debug, Clone)]
pub struct FieldNode<'a> {
    pub(crate) descriptor: &'a FieldDescriptor,
    pub(crate) position: usize,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) depth: usize,
    pub(crate) path: String,
}

impl<'a> FieldNode<'a> {
    pub(crate) fn new(descriptor: &'a FieldDescriptor, position: usize) -> Self {
        Self {
            descriptor,
            position,
            parent: None,
            children: Vec::new(),
            depth: 0,
            path: String::new(),
        }
    }

    /// The schema-level field this node projects.
    pub fn descriptor(&self) -> &'a FieldDescriptor {
        self.descriptor
    }

    /// Field id.
    pub fn id(&self) -> &'a FieldId {
        &self.descriptor.id
    }

    /// Index of the field in the descriptor's field array.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Parent node, `None` for roots.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in display order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Distance from the root (roots are 0).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Dot-joined ids from the root down to this node.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether the node has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Structural problems the builder recovered from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildDiagnostics {
    /// Fields whose parent id did not resolve; promoted to roots.
    pub orphans: Vec<FieldId>,
    /// Ids declared more than once; the last declaration was kept.
    pub duplicates: Vec<FieldId>,
    /// Fields detached from a parent cycle and promoted to roots.
    pub cycle_breaks: Vec<FieldId>,
}

impl BuildDiagnostics {
    /// Whether the descriptor built without any recovery.
    pub fn is_clean(&self) -> bool {
        self.orphans.is_empty() && self.duplicates.is_empty() && self.cycle_breaks.is_empty()
    }
}

/// The runtime tree plus aggregate metrics for one module.
#[derive(Debug, Clone)]
pub struct ModuleRuntime<'a> {
    pub(crate) module: &'a ModuleDescriptor,
    pub(crate) nodes: Vec<FieldNode<'a>>,
    pub(crate) lookup: HashMap<&'a str, NodeId>,
    pub(crate) roots: Vec<NodeId>,
    pub(crate) metrics: HierarchyMetrics,
    pub(crate) diagnostics: BuildDiagnostics,
}

impl<'a> ModuleRuntime<'a> {
    /// The descriptor this runtime was built from.
    pub fn descriptor(&self) -> &'a ModuleDescriptor {
        self.module
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the module has no fields.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node by field id.
    pub fn get(&self, id: &str) -> Option<&FieldNode<'a>> {
        self.lookup.get(id).map(|&n| &self.nodes[n.0])
    }

    /// Resolve a field id to its arena index.
    pub fn node_id(&self, id: &str) -> Option<NodeId> {
        self.lookup.get(id).copied()
    }

    /// Access a node by arena index.
    pub fn node(&self, id: NodeId) -> Option<&FieldNode<'a>> {
        self.nodes.get(id.0)
    }

    /// Whether a field id is present.
    pub fn contains(&self, id: &str) -> bool {
        self.lookup.contains_key(id)
    }

    /// All nodes in descriptor order (not tree order).
    pub fn nodes(&self) -> impl Iterator<Item = &FieldNode<'a>> {
        self.nodes.iter()
    }

    /// Root ids in display order.
    pub fn root_ids(&self) -> &[NodeId] {
        &self.roots
    }

    /// Root nodes in display order.
    pub fn roots(&self) -> impl Iterator<Item = &FieldNode<'a>> {
        self.roots.iter().map(move |&n| &self.nodes[n.0])
    }

    /// Children of a node in display order.
    pub fn children<'r>(
        &'r self,
        node: &'r FieldNode<'a>,
    ) -> impl Iterator<Item = &'r FieldNode<'a>> + 'r {
        node.children.iter().map(move |n| &self.nodes[n.0])
    }

    /// Parent of a node.
    pub fn parent(&self, node: &FieldNode<'a>) -> Option<&FieldNode<'a>> {
        node.parent.map(|p| &self.nodes[p.0])
    }

    /// Ancestors of a node, nearest first.
    pub fn ancestors<'r>(&'r self, node: &FieldNode<'a>) -> Ancestors<'r, 'a> {
        Ancestors {
            runtime: self,
            next: node.parent,
        }
    }

    /// Lazy depth-first traversal: each root's full subtree before the
    /// next root. Calling again restarts from the first root.
    pub fn depth_first(&self) -> DepthFirst<'_, 'a> {
        DepthFirst::new(self)
    }

    /// Aggregate metrics computed at build time.
    pub fn metrics(&self) -> &HierarchyMetrics {
        &self.metrics
    }

    /// What the builder had to repair.
    pub fn diagnostics(&self) -> &BuildDiagnostics {
        &self.diagnostics
    }
}

/// Iterator over a node's ancestors, nearest first.
#[derive(Debug, Clone)]
pub struct Ancestors<'r, 'a> {
    runtime: &'r ModuleRuntime<'a>,
    next: Option<NodeId>,
}

impl<'r, 'a> Iterator for Ancestors<'r, 'a> {
    type Item = &'r FieldNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.runtime.node(self.next?)?;
        self.next = node.parent;
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use formwright_core::{FieldDescriptor, FieldKind, ModuleDescriptor};

    use crate::build;

    fn address_form() -> ModuleDescriptor {
        ModuleDescriptor::new("address")
            .with_field(FieldDescriptor::new("address", FieldKind::Group))
            .with_field(FieldDescriptor::new("street", FieldKind::Text).with_parent("address").with_order(1))
            .with_field(FieldDescriptor::new("unit", FieldKind::Group).with_parent("address").with_order(2))
            .with_field(FieldDescriptor::new("unit_no", FieldKind::Text).with_parent("unit"))
    }

    #[test]
    fn test_navigation() {
        let module = address_form();
        let runtime = build(&module);
        let unit_no = runtime.get("unit_no").unwrap();
        let parent = runtime.parent(unit_no).unwrap();
        assert_eq!(parent.id(), "unit");
        let kids: Vec<_> = runtime.children(runtime.get("address").unwrap()).map(|n| n.id().as_str()).collect();
        assert_eq!(kids, vec!["street", "unit"]);
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let module = address_form();
        let runtime = build(&module);
        let chain: Vec<_> = runtime
            .ancestors(runtime.get("unit_no").unwrap())
            .map(|n| n.id().as_str())
            .collect();
        assert_eq!(chain, vec!["unit", "address"]);
        assert_eq!(runtime.ancestors(runtime.get("address").unwrap()).count(), 0);
    }

    #[test]
    fn test_depth_and_path() {
        let module = address_form();
        let runtime = build(&module);
        let node = runtime.get("unit_no").unwrap();
        assert_eq!(node.depth(), 2);
        assert_eq!(node.path(), "address.unit.unit_no");
        assert!(runtime.get("address").unwrap().is_root());
    }

    #[test]
    fn test_node_id_resolves() {
        let module = address_form();
        let runtime = build(&module);
        let id = runtime.node_id("street").unwrap();
        assert_eq!(runtime.node(id).unwrap().id(), "street");
        assert!(runtime.node_id("nope").is_none());
        assert_eq!(runtime.len(), 4);
        assert!(!runtime.is_empty());
    }
}
