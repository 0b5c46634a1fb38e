//! # formwright CLI entry point
//!
//! Parses command-line arguments, installs logging, loads engine
//! configuration, and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use formwright_cli::check::{run_check, CheckArgs};
use formwright_cli::evaluate::{run_evaluate, EvaluateArgs};
use formwright_cli::input::load_config;
use formwright_cli::inspect::{run_inspect, InspectArgs};
use formwright_cli::validate::{run_validate, ValidateArgs};
use formwright_cli::EXIT_ERROR;

/// Formwright: schema-driven form engine.
///
/// Builds field hierarchies from flat module descriptors, checks their
/// structure, validates submissions, and evaluates conditional logic.
#[derive(Parser, Debug)]
#[command(name = "formwright", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    /// Path to engine configuration (JSON or YAML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the field tree and hierarchy metrics.
    Inspect(InspectArgs),

    /// Report structural problems; optionally write a repaired descriptor.
    Check(CheckArgs),

    /// Validate form data against a module.
    Validate(ValidateArgs),

    /// Compute field visibility and enablement for form data.
    Evaluate(EvaluateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    tracing::debug!("formwright CLI starting");

    let result = load_config(cli.config.as_deref()).and_then(|config| match &cli.command {
        Commands::Inspect(args) => run_inspect(args),
        Commands::Check(args) => run_check(args, &config),
        Commands::Validate(args) => run_validate(args, &config),
        Commands::Evaluate(args) => run_evaluate(args),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn init_tracing(verbose: u8, json: bool) {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
