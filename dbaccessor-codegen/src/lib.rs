//! dbaccessor-codegen: Generate table accessors from table metadata
//!
//! For every table this crate produces one Rust source unit named
//! `<Tablename>TableAccessor`. The unit holds one private field per column,
//! constructors, `get_`/`set_` accessors and implementations of the
//! `dbaccessor` capability traits:
//!
//! - `Deleteable` - remove the row matching the current key
//! - `Retrievable` - load a row by key, or every row
//! - `Updateable` - write the non-key fields to the row matching the key
//! - `Persistable` - insert the current fields as a new row
//!
//! Table metadata comes from a MySQL DDL file (parsed with `sqlparser-rs`) or
//! a JSON document of already-introspected tables.
//!
//! # Usage in build.rs (Recommended)
//!
//! Configure in your `Cargo.toml`:
//!
//! ```toml
//! [package.metadata.dbaccessor-codegen]
//! schema_file = "schema.sql"
//! output_dir = "src/generated/accessors"
//! ```
//!
//! Then use a minimal `build.rs`:
//!
//! ```rust,ignore
//! fn main() {
//!     dbaccessor_codegen::generate_from_cargo_metadata()
//!         .expect("Failed to generate table accessors");
//! }
//! ```
//!
//! # Alternative: Programmatic Configuration
//!
//! ```rust,ignore
//! fn main() {
//!     dbaccessor_codegen::CodegenBuilder::new("schema.sql")
//!         .output_dir("src/generated/accessors")
//!         .generate()
//!         .expect("Failed to generate table accessors");
//!
//!     println!("cargo:rerun-if-changed=schema.sql");
//! }
//! ```
//!
//! # Generating a single unit
//!
//! ```rust,ignore
//! use dbaccessor_codegen::parser::{ColumnMetadata, StorageType, TableMetadata};
//!
//! let table = TableMetadata::new(
//!     "book",
//!     vec![
//!         ColumnMetadata::new("id", StorageType::Integer).primary_key().auto_generated(),
//!         ColumnMetadata::new("title", StorageType::Text),
//!     ],
//! );
//! let unit = dbaccessor_codegen::generate_unit(&table)?;
//! assert_eq!(unit.name(), "BookTableAccessor");
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! dbaccessor-codegen --schema schema.sql --output ./src/generated generate
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod parser;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

pub use codegen::{GeneratedUnit, UnitComposer, UnitOptions};
pub use config::CodegenConfig;
pub use error::{CodegenError, MetadataIssue, MetadataValidationError, Result};

/// Generate the accessor unit for one table with default options
pub fn generate_unit(table: &parser::TableMetadata) -> Result<GeneratedUnit> {
    UnitComposer::new(UnitOptions::default()).generate(table)
}

/// Main entry point for code generation.
///
/// Loads the schema, filters tables, generates every unit and writes them.
/// Nothing is written unless every selected table generates successfully.
pub fn generate(config: &CodegenConfig) -> Result<Vec<GeneratedUnit>> {
    info!("Loading schema: {:?}", config.schema_file);
    let tables = parser::load_tables(&config.schema_file)?;
    info!("Found {} tables", tables.len());

    let tables = filter_tables(tables, &config.include_tables, &config.exclude_tables);
    debug!(
        "After filtering: {} tables (include={}, exclude={})",
        tables.len(),
        config.include_tables,
        config.exclude_tables
    );

    let composer = UnitComposer::new(config.unit_options());
    let units = composer.generate_batch(&tables)?;

    info!("Writing {} units to {:?}", units.len(), config.output_dir);
    codegen::write_units(&units, config)?;

    info!("Code generation complete");
    Ok(units)
}

/// Filter tables based on include/exclude patterns
pub fn filter_tables(
    tables: Vec<parser::TableMetadata>,
    include: &str,
    exclude: &str,
) -> Vec<parser::TableMetadata> {
    let include_all = include.trim() == "*" || include.trim().is_empty();
    let include_set: HashSet<String> = if include_all {
        HashSet::new()
    } else {
        include.split(',').map(|s| s.trim().to_string()).collect()
    };
    let exclude_set: HashSet<String> = exclude
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    tables
        .into_iter()
        .filter(|t| {
            let name = &t.name;
            let included = include_all || include_set.contains(name);
            let excluded = exclude_set.contains(name);
            if !included || excluded {
                debug!("Skipping table {}", name);
            }
            included && !excluded
        })
        .collect()
}

/// Builder pattern for easy configuration in build.rs
pub struct CodegenBuilder {
    config: CodegenConfig,
}

impl CodegenBuilder {
    /// Create a new builder with the given schema file
    pub fn new(schema_file: impl AsRef<Path>) -> Self {
        Self {
            config: CodegenConfig::default_with_schema(schema_file.as_ref().to_path_buf()),
        }
    }

    /// Set the directory receiving the generated files
    pub fn output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.output_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set tables to include
    pub fn include_tables(mut self, tables: &[&str]) -> Self {
        self.config.include_tables = tables.join(",");
        self
    }

    /// Set tables to exclude
    pub fn exclude_tables(mut self, tables: &[&str]) -> Self {
        self.config.exclude_tables = tables.join(",");
        self
    }

    /// Set the path generated code imports the runtime from
    pub fn runtime_crate(mut self, path: &str) -> Self {
        self.config.runtime_crate = path.to_string();
        self
    }

    /// Wrap every unit in `pub mod <name>`
    pub fn namespace(mut self, name: &str) -> Self {
        self.config.namespace = Some(name.to_string());
        self
    }

    /// Backtick-quote identifiers in generated statements
    pub fn quote_identifiers(mut self) -> Self {
        self.config.quote_identifiers = true;
        self
    }

    /// Fail when two tables produce the same unit name
    pub fn detect_collisions(mut self) -> Self {
        self.config.detect_collisions = true;
        self
    }

    /// Pretty-print units before writing them
    pub fn format_output(mut self) -> Self {
        self.config.format_output = true;
        self
    }

    /// Enable dry run mode (preview without writing files)
    pub fn dry_run(mut self) -> Self {
        self.config.dry_run = true;
        self
    }

    /// Generate the code
    pub fn generate(self) -> Result<Vec<GeneratedUnit>> {
        self.config.validate()?;
        generate(&self.config)
    }
}

/// Configuration for `[package.metadata.dbaccessor-codegen]` in Cargo.toml
#[derive(Debug, Clone, Default, serde::Deserialize)]
struct CargoMetadataConfig {
    /// Path to the schema file (required)
    schema_file: Option<String>,

    /// Tables to include (optional, defaults to all)
    #[serde(default)]
    include_tables: Vec<String>,

    /// Tables to exclude (optional)
    #[serde(default)]
    exclude_tables: Vec<String>,

    /// Output directory (default: `$OUT_DIR/accessors`)
    output_dir: Option<String>,

    /// Runtime path imported by generated code (default: "dbaccessor")
    runtime_crate: Option<String>,

    /// Module wrapping each unit
    namespace: Option<String>,

    #[serde(default)]
    quote_identifiers: bool,

    #[serde(default)]
    detect_collisions: bool,

    #[serde(default)]
    format_output: bool,
}

#[derive(Debug, serde::Deserialize)]
struct CargoToml {
    package: Option<CargoPackage>,
}

#[derive(Debug, serde::Deserialize)]
struct CargoPackage {
    metadata: Option<CargoPackageMetadata>,
}

#[derive(Debug, serde::Deserialize)]
struct CargoPackageMetadata {
    #[serde(rename = "dbaccessor-codegen")]
    dbaccessor_codegen: Option<CargoMetadataConfig>,
}

/// Generate code from `[package.metadata.dbaccessor-codegen]` in Cargo.toml
///
/// This function reads configuration from the downstream project's Cargo.toml,
/// making build.rs minimal:
///
/// ```rust,ignore
/// // build.rs
/// fn main() {
///     dbaccessor_codegen::generate_from_cargo_metadata()
///         .expect("Failed to generate table accessors");
/// }
/// ```
///
/// Configure in Cargo.toml:
///
/// ```toml
/// [package.metadata.dbaccessor-codegen]
/// schema_file = "schema.sql"
/// include_tables = ["book", "order_items"]
/// exclude_tables = ["migrations"]
/// ```
pub fn generate_from_cargo_metadata() -> Result<Vec<GeneratedUnit>> {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").map_err(|_| {
        CodegenError::ConfigError(
            "CARGO_MANIFEST_DIR not set - are you running from build.rs?".into(),
        )
    })?;

    let cargo_toml_path = PathBuf::from(&manifest_dir).join("Cargo.toml");
    let cargo_toml_content = std::fs::read_to_string(&cargo_toml_path)?;

    let cargo_toml: CargoToml = toml::from_str(&cargo_toml_content).map_err(|e| {
        CodegenError::ConfigError(format!(
            "Failed to parse {}: {}",
            cargo_toml_path.display(),
            e
        ))
    })?;

    let metadata_config = cargo_toml
        .package
        .and_then(|p| p.metadata)
        .and_then(|m| m.dbaccessor_codegen)
        .ok_or_else(|| {
            CodegenError::ConfigError(
                "Missing [package.metadata.dbaccessor-codegen] section in Cargo.toml".into(),
            )
        })?;

    let schema_file = metadata_config.schema_file.ok_or_else(|| {
        CodegenError::ConfigError(
            "schema_file is required in [package.metadata.dbaccessor-codegen]".into(),
        )
    })?;

    // Resolve schema_file relative to manifest dir
    let schema_path = PathBuf::from(&manifest_dir).join(&schema_file);

    let mut builder = CodegenBuilder::new(&schema_path);

    builder = match metadata_config.output_dir {
        Some(dir) => builder.output_dir(PathBuf::from(&manifest_dir).join(dir)),
        None => {
            let out_dir = std::env::var("OUT_DIR").map(PathBuf::from).map_err(|_| {
                CodegenError::ConfigError(
                    "OUT_DIR not set - are you running from build.rs?".into(),
                )
            })?;
            builder.output_dir(out_dir.join("accessors"))
        }
    };

    // Apply table filters
    if !metadata_config.include_tables.is_empty() {
        let tables: Vec<&str> = metadata_config
            .include_tables
            .iter()
            .map(|s| s.as_str())
            .collect();
        builder = builder.include_tables(&tables);
    }
    if !metadata_config.exclude_tables.is_empty() {
        let tables: Vec<&str> = metadata_config
            .exclude_tables
            .iter()
            .map(|s| s.as_str())
            .collect();
        builder = builder.exclude_tables(&tables);
    }

    // Apply unit options
    if let Some(path) = metadata_config.runtime_crate {
        builder = builder.runtime_crate(&path);
    }
    if let Some(ns) = metadata_config.namespace {
        builder = builder.namespace(&ns);
    }
    if metadata_config.quote_identifiers {
        builder = builder.quote_identifiers();
    }
    if metadata_config.detect_collisions {
        builder = builder.detect_collisions();
    }
    if metadata_config.format_output {
        builder = builder.format_output();
    }

    // Emit rerun-if-changed
    println!("cargo:rerun-if-changed={}", schema_path.display());
    println!("cargo:rerun-if-changed={}", cargo_toml_path.display());

    builder.generate()
}
