//! # formwright-cli — Command-Line Host for the Formwright Engine
//!
//! Loads descriptors and form data from disk and drives the engine crates.
//!
//! ## Subcommands
//!
//! - `formwright inspect`: depth-first tree and hierarchy metrics.
//! - `formwright check`: structural report, optional repair.
//! - `formwright validate`: validation errors for a submission.
//! - `formwright evaluate`: visibility and enablement maps.
//!
//! ```bash
//! formwright inspect modules/signup.yaml --json
//! formwright check modules/signup.yaml --fix modules/signup.fixed.yaml
//! formwright validate modules/signup.yaml --data submission.json
//! formwright -vv evaluate modules/signup.yaml --data submission.json --cascade
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; engine behaviour lives in the library
//!   crates.
//! - Handlers return an exit code: 0 success, 1 the input was found
//!   invalid. Operational failures propagate as `anyhow::Error`.

pub mod check;
pub mod evaluate;
pub mod input;
pub mod inspect;
pub mod validate;

/// Exit code for a clean run.
pub const EXIT_OK: u8 = 0;
/// Exit code when the checked input is invalid.
pub const EXIT_INVALID: u8 = 1;
/// Exit code for operational errors (unreadable files, bad config).
pub const EXIT_ERROR: u8 = 2;
