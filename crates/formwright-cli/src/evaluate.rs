//! # Evaluate Subcommand
//!
//! Prints the visibility and enablement maps for a form submission as JSON,
//! optionally with ancestry cascaded.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use formwright_hierarchy::ModuleRuntime;
use formwright_logic::{evaluate_all, FieldStates};

use crate::input::{load_form, load_module};
use crate::EXIT_OK;

/// Arguments for the evaluate subcommand.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Module descriptor (JSON or YAML).
    pub module: PathBuf,

    /// Form data: an object mapping field id to submitted value.
    #[arg(long, value_name = "FORM")]
    pub data: PathBuf,

    /// Hide and disable descendants of hidden and disabled fields.
    #[arg(long)]
    pub cascade: bool,
}

/// Execute the evaluate subcommand.
pub fn run_evaluate(args: &EvaluateArgs) -> Result<u8> {
    let states = evaluate_file(args)?;
    println!("{}", serde_json::to_string_pretty(&states)?);
    Ok(EXIT_OK)
}

/// Load inputs and compute field states.
pub fn evaluate_file(args: &EvaluateArgs) -> Result<FieldStates> {
    let module = load_module(&args.module)?;
    let form = load_form(&args.data)?;
    let runtime = ModuleRuntime::build(&module);
    let states = evaluate_all(&runtime, &form);
    Ok(if args.cascade {
        states.cascade(&runtime)
    } else {
        states
    })
}
