//! CLI entry point for dbaccessor-codegen

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use dbaccessor_codegen::codegen::{validate, UnitComposer};
use dbaccessor_codegen::config::CodegenConfig;
use dbaccessor_codegen::parser::{self, TableMetadata};

#[derive(Parser)]
#[command(name = "dbaccessor-codegen")]
#[command(about = "Generate Rust table accessors from table metadata")]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to schema file, SQL DDL or JSON (overrides config)
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Output directory (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Dry run - show what would be generated without writing files
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an accessor unit per table
    Generate,
    /// Inspect schema (show parsed tables and their validation result)
    Inspect,
    /// Validate every table, failing if any is invalid
    Validate,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (before logging, so we can use config.log_level)
    let mut config = CodegenConfig::load(cli.config.as_deref())?;

    // Initialize logging
    // Priority: RUST_LOG env var > config.log_level > default (debug for dev, info for release)
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };
    let log_level = config.log_level.as_deref().unwrap_or(default_level);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    // Apply CLI overrides
    if let Some(schema) = cli.schema {
        config.schema_file = schema;
    }
    if let Some(output) = cli.output {
        config.output_dir = output;
    }
    if cli.dry_run {
        config.dry_run = true;
    }

    // Validate configuration
    config.validate()?;

    match cli.command {
        Some(Commands::Inspect) => return inspect_schema(&config),
        Some(Commands::Validate) => return validate_schema(&config),
        Some(Commands::Generate) | None => {}
    }

    info!("Generating accessors from schema: {:?}", config.schema_file);

    let units = dbaccessor_codegen::generate(&config)?;

    if config.dry_run {
        println!("Dry run mode - would generate:");
        for unit in &units {
            println!(
                "  {}: {}",
                unit.name(),
                config.output_dir.join(unit.file_name()).display()
            );
        }
        return Ok(());
    }

    info!("Code generation completed successfully");
    Ok(())
}

fn load_selected(config: &CodegenConfig) -> Result<Vec<TableMetadata>> {
    let tables = parser::load_tables(&config.schema_file)?;
    Ok(dbaccessor_codegen::filter_tables(
        tables,
        &config.include_tables,
        &config.exclude_tables,
    ))
}

fn inspect_schema(config: &CodegenConfig) -> Result<()> {
    let tables = load_selected(config)?;
    let options = config.unit_options();

    println!("Parsed {} tables:\n", tables.len());
    for table in &tables {
        println!("Table: {}", table.name);
        if let Some(comment) = &table.comment {
            println!("  Comment: {}", comment);
        }
        println!("  Columns:");
        for col in &table.columns {
            let nullable = if col.nullable { "NULL" } else { "NOT NULL" };
            let key = if col.is_primary_key { " KEY" } else { "" };
            let auto = if col.is_auto_generated { " AUTO" } else { "" };
            println!(
                "    - {} {} {}{}{}",
                col.name,
                col.storage_type.describe(),
                nullable,
                key,
                auto
            );
        }
        match validate(table, &options) {
            Ok(model) => println!("  Unit: {}", model.unit_name),
            Err(e) => println!("  {}", e.to_string().replace('\n', "\n  ")),
        }
        println!();
    }

    Ok(())
}

fn validate_schema(config: &CodegenConfig) -> Result<()> {
    let tables = load_selected(config)?;
    let options = config.unit_options();

    let mut invalid = 0;
    for table in &tables {
        if let Err(e) = validate(table, &options) {
            warn!("{}", e);
            invalid += 1;
        }
    }

    // name collisions only surface across the batch
    if invalid == 0 && options.detect_collisions {
        UnitComposer::new(options).generate_batch(&tables)?;
    }

    if invalid > 0 {
        bail!("{} of {} tables are invalid", invalid, tables.len());
    }
    println!("All {} tables are valid", tables.len());
    Ok(())
}
