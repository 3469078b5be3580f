//! Extract declared dependencies from a Cargo.toml

use crate::error::{HealthError, Result};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// A dependency declared in a manifest, with its version requirement when
/// one is present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestDependency {
    pub name: String,
    pub req: String,
}

/// Read the registry dependencies declared in a Cargo.toml.
///
/// Both `[dependencies]` and `[dev-dependencies]` are read. Entries without
/// a version requirement (pure path or git dependencies) are skipped since
/// they have no registry counterpart to check.
pub fn read_dependencies(path: &Path) -> Result<Vec<ManifestDependency>> {
    if !path.exists() {
        return Err(HealthError::not_found(format!(
            "Manifest '{}'",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path)?;
    parse_manifest(&content)
}

fn parse_manifest(content: &str) -> Result<Vec<ManifestDependency>> {
    let value: toml::Value = toml::from_str(content)?;

    let mut seen = HashSet::new();
    let mut dependencies = Vec::new();

    for table_name in ["dependencies", "dev-dependencies"] {
        let Some(table) = value.get(table_name).and_then(|v| v.as_table()) else {
            continue;
        };

        for (name, spec) in table {
            if !seen.insert(name.clone()) {
                continue;
            }

            match version_req(spec) {
                Some(req) => dependencies.push(ManifestDependency {
                    name: name.clone(),
                    req,
                }),
                None => {
                    debug!("Skipping '{}': no registry version requirement", name);
                }
            }
        }
    }

    Ok(dependencies)
}

/// Extract the version requirement from a dependency spec, handling both
/// the string shorthand and the detailed table form
fn version_req(spec: &toml::Value) -> Option<String> {
    match spec {
        toml::Value::String(req) => Some(req.clone()),
        toml::Value::Table(table) => table
            .get("version")
            .and_then(|v| v.as_str())
            .map(String::from),
        _ => None,
    }
}
