//! # Check Subcommand
//!
//! Structural validation of a module descriptor, without building a
//! runtime. With `--fix`, the repaired descriptor is written out and the
//! report is re-run against it.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use formwright_core::{EngineConfig, ModuleDescriptor};
use formwright_hierarchy::{fix_structural_issues, validate_structure_with, StructureReport};

use crate::input::{load_module, write_module};
use crate::{EXIT_INVALID, EXIT_OK};

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Module descriptor (JSON or YAML).
    pub module: PathBuf,

    /// Write a repaired descriptor to this path.
    #[arg(long, value_name = "OUT")]
    pub fix: Option<PathBuf>,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs, config: &EngineConfig) -> Result<u8> {
    let module = load_module(&args.module)?;
    let report = validate_structure_with(&module, config);
    print_report(&module, &report, args.json)?;

    let Some(out) = &args.fix else {
        return Ok(exit_code(&report));
    };

    let fixed = fix_structural_issues(&module);
    write_module(&fixed, out)?;
    let after = validate_structure_with(&fixed, config);
    tracing::info!(
        path = %out.display(),
        errors_before = report.errors.len(),
        errors_after = after.errors.len(),
        "wrote repaired descriptor"
    );
    if !args.json {
        println!("wrote {} ({} error(s) remain)", out.display(), after.errors.len());
    }
    Ok(exit_code(&after))
}

fn exit_code(report: &StructureReport) -> u8 {
    if report.is_valid() {
        EXIT_OK
    } else {
        EXIT_INVALID
    }
}

fn print_report(module: &ModuleDescriptor, report: &StructureReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", render_report(module, report));
    }
    Ok(())
}

/// Text rendering of a structure report.
pub fn render_report(module: &ModuleDescriptor, report: &StructureReport) -> String {
    let mut out = String::new();
    for issue in &report.errors {
        out.push_str(&format!("error   {issue}\n"));
    }
    for issue in &report.warnings {
        out.push_str(&format!("warning {issue}\n"));
    }
    let verdict = if report.is_valid() { "OK" } else { "FAIL" };
    out.push_str(&format!(
        "{}: {verdict} ({} error(s), {} warning(s))\n",
        module.id,
        report.errors.len(),
        report.warnings.len()
    ));
    out
}
