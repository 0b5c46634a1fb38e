//! # formwright-logic — Conditional Logic Engine
//!
//! Decides, per field, whether it is visible and whether it is enabled,
//! from the conditional rules on its descriptor and the current form data.
//! Shares the runtime tree and data shape with `formwright-validation` but
//! does not depend on it.
//!
//! ## Architecture
//!
//! - **Conditions** (`condition.rs`): [`evaluate_condition`], one operator
//!   applied to one trigger value.
//! - **Comparison** (`compare.rs`): numeric, then date, then text ordering
//!   for `greaterThan` / `lessThan`.
//! - **Visibility** (`visibility.rs`): [`is_visible`], [`is_enabled`],
//!   [`evaluate_all`], and [`FieldStates`] with ancestry cascade.
//! - **Dependencies** (`dependency.rs`): [`DependencyIndex`], trigger →
//!   dependents.
//!
//! ## Crate Policy
//!
//! - Evaluation is total: no operator on any input returns an error or
//!   panics. Uncomparable values make the condition false.
//! - Pure functions over borrowed data; safe to call concurrently against
//!   one runtime.

mod compare;

pub mod condition;
pub mod dependency;
pub mod visibility;

pub use condition::evaluate_condition;
pub use dependency::DependencyIndex;
pub use visibility::{evaluate_all, is_enabled, is_visible, FieldStates};
