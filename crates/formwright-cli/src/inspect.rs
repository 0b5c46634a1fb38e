//! # Inspect Subcommand
//!
//! Builds the module runtime and prints the depth-first field tree with its
//! hierarchy metrics and any recovery the builder had to do.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use formwright_hierarchy::{BuildDiagnostics, HierarchyMetrics, ModuleRuntime};

use crate::input::load_module;
use crate::EXIT_OK;

/// Arguments for the inspect subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Module descriptor (JSON or YAML).
    pub module: PathBuf,

    /// Print machine-readable JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct TreeEntry<'r> {
    id: &'r str,
    kind: &'r str,
    depth: usize,
    path: &'r str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<&'r str>,
}

#[derive(Serialize)]
struct InspectReport<'r> {
    module: &'r str,
    tree: Vec<TreeEntry<'r>>,
    metrics: &'r HierarchyMetrics,
    diagnostics: &'r BuildDiagnostics,
}

/// Execute the inspect subcommand.
pub fn run_inspect(args: &InspectArgs) -> Result<u8> {
    let module = load_module(&args.module)?;
    let runtime = ModuleRuntime::build(&module);
    let output = if args.json {
        render_json(&runtime)?
    } else {
        render_text(&runtime)
    };
    print!("{output}");
    Ok(EXIT_OK)
}

/// JSON rendering of the runtime.
pub fn render_json(runtime: &ModuleRuntime<'_>) -> Result<String> {
    let tree = runtime
        .depth_first()
        .map(|node| TreeEntry {
            id: node.id().as_str(),
            kind: node.descriptor().kind.as_str(),
            depth: node.depth(),
            path: node.path(),
            parent: runtime.parent(node).map(|p| p.id().as_str()),
        })
        .collect();
    let report = InspectReport {
        module: runtime.descriptor().id.as_str(),
        tree,
        metrics: runtime.metrics(),
        diagnostics: runtime.diagnostics(),
    };
    let mut out = serde_json::to_string_pretty(&report)?;
    out.push('\n');
    Ok(out)
}

/// Indented text rendering of the runtime.
pub fn render_text(runtime: &ModuleRuntime<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "module {}", runtime.descriptor().id);
    for node in runtime.depth_first() {
        let descriptor = node.descriptor();
        let _ = write!(out, "{}{} ({})", "  ".repeat(node.depth() + 1), node.id(), descriptor.kind.as_str());
        if descriptor.required {
            out.push_str(" *");
        }
        if descriptor.has_conditions() {
            let _ = write!(out, " [{} condition(s)]", descriptor.conditions.len());
        }
        out.push('\n');
    }

    let m = runtime.metrics();
    out.push('\n');
    let _ = writeln!(out, "fields:       {} ({} root)", m.total_fields, m.root_fields);
    let _ = writeln!(out, "max depth:    {}", m.max_depth);
    let _ = writeln!(out, "avg depth:    {:.2}", m.average_depth);
    let _ = writeln!(out, "linked:       {}", m.linked_fields);
    let _ = writeln!(out, "conditional:  {}", m.conditional_fields);
    let _ = writeln!(out, "complexity:   {}", m.complexity_score);

    let d = runtime.diagnostics();
    for (label, ids) in [
        ("orphans", &d.orphans),
        ("duplicates", &d.duplicates),
        ("cycle breaks", &d.cycle_breaks),
    ] {
        if !ids.is_empty() {
            let ids: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
            let _ = writeln!(out, "{label}: {}", ids.join(", "));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use formwright_core::{FieldDescriptor, FieldKind, ModuleDescriptor};

    fn sample() -> ModuleDescriptor {
        ModuleDescriptor::new("profile")
            .with_field(FieldDescriptor::new("contact", FieldKind::Group).with_order(1))
            .with_field(FieldDescriptor::new("email", FieldKind::Email).with_parent("contact").required())
            .with_field(FieldDescriptor::new("stray", FieldKind::Text).with_parent("missing"))
    }

    #[test]
    fn text_lists_tree_metrics_and_orphans() {
        let module = sample();
        let runtime = ModuleRuntime::build(&module);
        let text = render_text(&runtime);
        assert!(text.starts_with("module profile\n"));
        assert!(text.contains("    email (email) *\n"));
        assert!(text.contains("fields:       3 (2 root)"));
        assert!(text.contains("orphans: stray"));
    }

    #[test]
    fn json_report_shape() {
        let module = sample();
        let runtime = ModuleRuntime::build(&module);
        let json: serde_json::Value = serde_json::from_str(&render_json(&runtime).unwrap()).unwrap();
        assert_eq!(json["module"], "profile");
        assert_eq!(json["tree"].as_array().unwrap().len(), 3);
        assert_eq!(json["tree"][0]["id"], "stray");
        assert_eq!(json["tree"][2]["path"], "contact.email");
        assert_eq!(json["tree"][2]["parent"], "contact");
        assert_eq!(json["metrics"]["total_fields"], 3);
        assert_eq!(json["diagnostics"]["orphans"][0], "stray");
    }

    #[test]
    fn run_inspect_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        std::fs::write(&path, sample().to_json().unwrap()).unwrap();
        let args = InspectArgs { module: path, json: true };
        assert_eq!(run_inspect(&args).unwrap(), EXIT_OK);
    }
}
