//! Loading descriptors, form data, and configuration from disk.
//!
//! Format follows the extension: `.yaml`/`.yml` is YAML, anything else JSON.

use std::path::Path;

use anyhow::{Context, Result};

use formwright_core::schema::is_yaml_path;
use formwright_core::{EngineConfig, FormData, ModuleDescriptor};

/// Read a module descriptor.
pub fn load_module(path: &Path) -> Result<ModuleDescriptor> {
    let module = ModuleDescriptor::from_path(path)
        .with_context(|| format!("failed to load module descriptor {}", path.display()))?;
    tracing::info!(path = %path.display(), module = %module.id, fields = module.fields.len(), "loaded module");
    Ok(module)
}

/// Read a form submission: an object mapping field id to value.
pub fn load_form(path: &Path) -> Result<FormData> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read form data {}", path.display()))?;
    let form: FormData = if is_yaml_path(path) {
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse form data {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse form data {}", path.display()))?
    };
    tracing::info!(path = %path.display(), values = form.len(), "loaded form data");
    Ok(form)
}

/// Read engine configuration, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

/// Write a descriptor in the format its path names.
pub fn write_module(module: &ModuleDescriptor, path: &Path) -> Result<()> {
    let content = if is_yaml_path(path) {
        module.to_yaml()?
    } else {
        module.to_json()?
    };
    std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
