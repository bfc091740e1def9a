//! Configuration settings for dbaccessor-codegen

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::defaults;
use crate::codegen::UnitOptions;
use crate::error::{CodegenError, Result};

/// Main configuration struct for code generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodegenConfig {
    /// Path to the schema source (SQL DDL, or `.json` table metadata)
    #[serde(default)]
    pub schema_file: PathBuf,

    /// Tables to include (comma-separated, or "*" for all)
    #[serde(default = "default_include_tables")]
    pub include_tables: String,

    /// Tables to exclude (comma-separated)
    #[serde(default = "default_exclude_tables")]
    pub exclude_tables: String,

    /// Directory receiving one file per table plus `mod.rs`
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Path generated code imports the runtime traits from
    #[serde(default = "default_runtime_crate")]
    pub runtime_crate: String,

    /// Module wrapping each generated unit
    #[serde(default)]
    pub namespace: Option<String>,

    /// Backtick-quote identifiers in generated statements
    #[serde(default = "default_quote_identifiers")]
    pub quote_identifiers: bool,

    /// Fail when two tables generate the same unit name
    #[serde(default = "default_detect_collisions")]
    pub detect_collisions: bool,

    /// Pretty-print units before writing them
    #[serde(default = "default_format_output")]
    pub format_output: bool,

    /// Dry run mode - preview without writing files
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    /// Can be overridden by RUST_LOG env var
    #[serde(default)]
    pub log_level: Option<String>,
}

// Default value functions for serde
fn default_include_tables() -> String {
    defaults::INCLUDE_TABLES.to_string()
}
fn default_exclude_tables() -> String {
    defaults::EXCLUDE_TABLES.to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from(defaults::OUTPUT_DIR)
}
fn default_runtime_crate() -> String {
    defaults::RUNTIME_CRATE.to_string()
}
fn default_quote_identifiers() -> bool {
    defaults::QUOTE_IDENTIFIERS
}
fn default_detect_collisions() -> bool {
    defaults::DETECT_COLLISIONS
}
fn default_format_output() -> bool {
    defaults::FORMAT_OUTPUT
}
fn default_dry_run() -> bool {
    defaults::DRY_RUN
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            schema_file: PathBuf::new(),
            include_tables: default_include_tables(),
            exclude_tables: default_exclude_tables(),
            output_dir: default_output_dir(),
            runtime_crate: default_runtime_crate(),
            namespace: None,
            quote_identifiers: default_quote_identifiers(),
            detect_collisions: default_detect_collisions(),
            format_output: default_format_output(),
            dry_run: default_dry_run(),
            log_level: None,
        }
    }
}

impl CodegenConfig {
    /// Create a default config with the given schema file
    pub fn default_with_schema(schema_file: PathBuf) -> Self {
        Self {
            schema_file,
            ..Default::default()
        }
    }

    /// Load configuration using config-rs (file + environment variables)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from config file if specified
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        } else {
            // Try default locations
            builder = builder.add_source(File::with_name("dbaccessor-codegen").required(false));
        }

        // Override with environment variables (DBACCESSOR_CODEGEN_*)
        builder = builder.add_source(
            Environment::with_prefix(defaults::ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: CodegenConfig = builder.build()?.try_deserialize()?;

        Ok(config)
    }

    /// Options the composer renders units with
    pub fn unit_options(&self) -> UnitOptions {
        UnitOptions {
            runtime_crate: self.runtime_crate.clone(),
            namespace: self.namespace.clone(),
            quote_identifiers: self.quote_identifiers,
            detect_collisions: self.detect_collisions,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.schema_file.as_os_str().is_empty() {
            return Err(CodegenError::ValidationError(
                "schema_file is required".into(),
            ));
        }

        if !self.schema_file.exists() {
            return Err(CodegenError::ValidationError(format!(
                "Schema file not found: {}",
                self.schema_file.display()
            )));
        }

        self.unit_options().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CodegenConfig::default();
        assert_eq!(config.include_tables, "*");
        assert_eq!(config.runtime_crate, "dbaccessor");
        assert!(!config.detect_collisions);
        assert!(config.log_level.is_none());
        assert_eq!(config.unit_options(), UnitOptions::default());
    }

    #[test]
    fn test_validation_missing_schema() {
        let config = CodegenConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_namespace() {
        let schema = tempfile::NamedTempFile::new().unwrap();
        let mut config = CodegenConfig::default_with_schema(schema.path().to_path_buf());
        assert!(config.validate().is_ok());

        config.namespace = Some("db::accessors".to_string());
        assert!(config.validate().is_err());

        config.namespace = None;
        config.runtime_crate = "not a path".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_toml() {
        let toml_content = r#"
            schema_file = "test.sql"
            output_dir = "src/accessors"
            namespace = "accessors"
            quote_identifiers = true
            log_level = "debug"
        "#;
        let config: CodegenConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.log_level, Some("debug".to_string()));
        assert_eq!(config.output_dir, PathBuf::from("src/accessors"));

        let options = config.unit_options();
        assert_eq!(options.namespace.as_deref(), Some("accessors"));
        assert!(options.quote_identifiers);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codegen.toml");
        std::fs::write(&path, "schema_file = \"schema.sql\"\nformat_output = true\n").unwrap();

        let config = CodegenConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.schema_file, PathBuf::from("schema.sql"));
        assert!(config.format_output);
        assert_eq!(config.include_tables, "*");
    }
}
