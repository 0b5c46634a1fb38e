//! # formwright-hierarchy — Field Tree Reconstruction
//!
//! Turns a flat [`ModuleDescriptor`](formwright_core::ModuleDescriptor),
//! where each field carries an optional parent id, into a navigable
//! [`ModuleRuntime`].
//!
//! ## Architecture
//!
//! - **Builder** (`builder.rs`): three-pass build (materialize, link,
//!   order and measure). Recovers from orphans, duplicate ids, and parent
//!   cycles instead of failing.
//! - **Runtime** (`runtime.rs`): arena of [`FieldNode`]s addressed by
//!   [`NodeId`]; parent links are indices, never owning references.
//! - **Metrics** (`metrics.rs`): [`HierarchyMetrics`] computed at build time.
//! - **Structure** (`structure.rs`): [`validate_structure`] reports what the
//!   builder would silently repair; [`fix_structural_issues`] returns a
//!   repaired descriptor; [`would_create_cycle`] guards reparenting.
//! - **Traversal** (`traversal.rs`): lazy, restartable depth-first order.
//!
//! ## Crate Policy
//!
//! - Depends only on `formwright-core` internally.
//! - Building never returns an error. Recovered problems are logged with
//!   `tracing` and recorded in [`BuildDiagnostics`].
//! - Runtime links are never serialized.

mod cycles;

pub mod builder;
pub mod metrics;
pub mod runtime;
pub mod structure;
pub mod traversal;

pub use builder::build;
pub use metrics::HierarchyMetrics;
pub use runtime::{Ancestors, BuildDiagnostics, FieldNode, ModuleRuntime, NodeId};
pub use structure::{
    fix_structural_issues, validate_structure, validate_structure_with, would_create_cycle,
    IssueKind, StructuralIssue, StructureReport,
};
pub use traversal::{depth_first_order, DepthFirst};
