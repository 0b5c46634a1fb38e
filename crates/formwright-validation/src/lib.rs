//! # formwright-validation — Rule Registry and Validation Engine
//!
//! Validates submitted [`FormData`](formwright_core::FormData) against a
//! built [`ModuleRuntime`](formwright_hierarchy::ModuleRuntime).
//!
//! ## Architecture
//!
//! - **Registry** (`registry.rs`): [`RuleRegistry`], an explicit map from
//!   rule id to [`RuleEvaluator`]. Hosts register custom rules as trait
//!   objects or closures.
//! - **Built-ins** (`builtin.rs`): `required`, `length`, `pattern`, `email`.
//! - **Engine** (`engine.rs`): per-field ordering and module walk.
//! - **Results** (`result.rs`): [`ValidationResult`], [`ValidationError`],
//!   and the stable [`codes`].
//!
//! ## Crate Policy
//!
//! - Validation failures are returned as data, never as `Err`.
//! - Rule faults follow [`FaultPolicy`](formwright_core::FaultPolicy):
//!   pass with a warning, or a `RULE_FAULT` error.
//! - No global state. Every engine borrows the registry it uses.

pub mod builtin;
pub mod engine;
pub mod registry;
pub mod result;

pub use builtin::{EmailRule, LengthRule, PatternRule, RequiredRule};
pub use engine::ValidationEngine;
pub use registry::{
    FnRule, RuleEvaluator, RuleRegistry, EMAIL_RULE, LENGTH_RULE, PATTERN_RULE, REQUIRED_RULE,
};
pub use result::{codes, ValidationError, ValidationResult};
