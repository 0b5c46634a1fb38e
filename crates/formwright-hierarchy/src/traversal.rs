//! # Depth-First Traversal
//!
//! Lazy pre-order walk of a [`ModuleRuntime`]: roots in display order, each
//! root's whole subtree before the next root, children in display order at
//! every level. The iterator holds only an explicit stack, so it is finite
//! (the builder guarantees a forest) and restartable by asking the runtime
//! for a fresh one.

use std::iter::FusedIterator;

use crate::runtime::{FieldNode, ModuleRuntime, NodeId};

/// Pre-order iterator over a runtime's nodes.
#[derive(Debug, Clone)]
pub struct DepthFirst<'r, 'a> {
    runtime: &'r ModuleRuntime<'a>,
    stack: Vec<NodeId>,
}

impl<'r, 'a> DepthFirst<'r, 'a> {
    pub(crate) fn new(runtime: &'r ModuleRuntime<'a>) -> Self {
        let mut stack = Vec::with_capacity(runtime.len());
        stack.extend(runtime.root_ids().iter().rev().copied());
        Self { runtime, stack }
    }
}

impl<'r, 'a> Iterator for DepthFirst<'r, 'a> {
    type Item = &'r FieldNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        let node = self.runtime.node(current)?;
        self.stack.extend(node.children().iter().rev().copied());
        Some(node)
    }
}

impl FusedIterator for DepthFirst<'_, '_> {}

/// Depth-first order over every node in the runtime.
pub fn depth_first_order<'r, 'a>(runtime: &'r ModuleRuntime<'a>) -> DepthFirst<'r, 'a> {
    DepthFirst::new(runtime)
}
