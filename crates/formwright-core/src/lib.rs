//! # formwright-core — Schema Model for the Formwright Engine
//!
//! Leaf crate of the workspace. Defines the immutable, serializable shape
//! of a form module and the loosely-typed form data submitted against it.
//! Every other `formwright-*` crate depends on this one; it depends on
//! nothing internal.
//!
//! ## Contents
//!
//! - **Schema** (`schema.rs`): [`ModuleDescriptor`], [`FieldDescriptor`],
//!   [`FieldKind`], [`FieldOption`].
//! - **Conditions** (`condition.rs`): [`ConditionalRule`] with closed
//!   [`ConditionOperator`] and [`ConditionAction`] variants.
//! - **Form data** (`form.rs`): [`FormData`] and the text coercion rules
//!   used by validation and condition evaluation.
//! - **Configuration** (`config.rs`): [`EngineConfig`].
//!
//! ## Crate Policy
//!
//! - No dependencies on other `formwright-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Runtime-only structure (parent/child links) never appears here.

pub mod condition;
pub mod config;
pub mod error;
pub mod form;
pub mod identity;
pub mod schema;

pub use condition::{ActionAxis, ConditionAction, ConditionOperator, ConditionalRule};
pub use config::{EngineConfig, FaultPolicy};
pub use error::FormwrightError;
pub use form::{is_blank, value_text, FormData};
pub use identity::{FieldId, ModuleId};
pub use schema::{FieldDescriptor, FieldKind, FieldOption, ModuleDescriptor};
