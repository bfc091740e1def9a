//! Writing generated units to disk

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use super::composer::{check_file_collisions, GeneratedUnit};
use crate::config::CodegenConfig;
use crate::error::{CodegenError, Result};

/// Pretty-print a unit's source with prettyplease.
///
/// Plain `//` comments do not survive the round trip through `syn`; doc
/// comments do.
pub fn format_unit(unit: &GeneratedUnit) -> Result<String> {
    let file = syn::parse_file(unit.source()).map_err(|e| CodegenError::FormatError {
        unit: unit.name().to_string(),
        reason: e.to_string(),
    })?;
    Ok(prettyplease::unparse(&file))
}

/// Source of the `mod.rs` declaring every unit file
pub fn module_index(units: &[GeneratedUnit], namespace: Option<&str>) -> String {
    let mut code = String::from("// Generated table accessors\n\n");
    for unit in units {
        code.push_str(&format!("mod {};\n", unit.module_name()));
    }
    if !units.is_empty() {
        code.push('\n');
    }
    for unit in units {
        match namespace {
            Some(ns) => code.push_str(&format!(
                "pub use {}::{}::{};\n",
                unit.module_name(),
                ns,
                unit.name()
            )),
            None => code.push_str(&format!("pub use {}::{};\n", unit.module_name(), unit.name())),
        }
    }
    code
}

/// Write each unit plus `mod.rs` into `config.output_dir`.
///
/// Returns the paths written, or that would be written in dry-run mode.
/// Nothing is written when two units share a file name.
pub fn write_units(units: &[GeneratedUnit], config: &CodegenConfig) -> Result<Vec<PathBuf>> {
    check_file_collisions(units)?;

    let output_dir = &config.output_dir;
    let mut paths = Vec::with_capacity(units.len() + 1);

    if !config.dry_run {
        fs::create_dir_all(output_dir)?;
    }

    for unit in units {
        let path = output_dir.join(unit.file_name());
        if config.dry_run {
            info!("Would write {} to {}", unit.name(), path.display());
        } else {
            let source = if config.format_output {
                format_unit(unit)?
            } else {
                unit.source().to_string()
            };
            fs::write(&path, source)?;
            debug!("Wrote {} to {}", unit.name(), path.display());
        }
        paths.push(path);
    }

    let mod_path = output_dir.join("mod.rs");
    if !config.dry_run {
        fs::write(&mod_path, module_index(units, config.namespace.as_deref()))?;
    }
    paths.push(mod_path);

    Ok(paths)
}
