//! # Validate Subcommand
//!
//! Runs the validation engine over a form submission and prints one line
//! per error. Exits 1 when the submission is invalid.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use formwright_core::EngineConfig;
use formwright_hierarchy::ModuleRuntime;
use formwright_validation::{RuleRegistry, ValidationEngine, ValidationResult};

use crate::input::{load_form, load_module};
use crate::{EXIT_INVALID, EXIT_OK};

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Module descriptor (JSON or YAML).
    pub module: PathBuf,

    /// Form data: an object mapping field id to submitted value.
    #[arg(long, value_name = "FORM")]
    pub data: PathBuf,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute the validate subcommand with the built-in rules.
pub fn run_validate(args: &ValidateArgs, config: &EngineConfig) -> Result<u8> {
    let registry = RuleRegistry::with_builtins(config);
    run_validate_with(args, &registry)
}

/// Execute the validate subcommand against a caller-supplied registry.
pub fn run_validate_with(args: &ValidateArgs, registry: &RuleRegistry) -> Result<u8> {
    let module = load_module(&args.module)?;
    let form = load_form(&args.data)?;
    let runtime = ModuleRuntime::build(&module);
    let result = ValidationEngine::new(registry).validate_module(&runtime, &form);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_result(&result));
    }
    Ok(if result.is_valid() { EXIT_OK } else { EXIT_INVALID })
}

/// Text rendering of a validation result.
pub fn render_result(result: &ValidationResult) -> String {
    if result.is_valid() {
        return "valid\n".to_string();
    }
    let mut out = String::new();
    for error in result.errors() {
        out.push_str(&error.to_string());
        if let Some(secondary) = &error.secondary_message {
            out.push_str(&format!(" / {secondary}"));
        }
        out.push('\n');
    }
    out.push_str(&format!("invalid: {} error(s)\n", result.errors().len()));
    out
}
