//! Default configuration values - single source of truth

/// Default include tables pattern (all tables)
pub const INCLUDE_TABLES: &str = "*";

/// Default exclude tables pattern (none)
pub const EXCLUDE_TABLES: &str = "";

/// Default output directory for generated accessors
pub const OUTPUT_DIR: &str = "./generated/accessors";

/// Path generated code imports the runtime from
pub const RUNTIME_CRATE: &str = "dbaccessor";

/// Whether statements backtick-quote identifiers
pub const QUOTE_IDENTIFIERS: bool = false;

/// Whether a batch rejects two tables with the same unit name
pub const DETECT_COLLISIONS: bool = false;

/// Whether units are pretty-printed before writing
pub const FORMAT_OUTPUT: bool = false;

/// Whether to run in dry-run mode by default
pub const DRY_RUN: bool = false;

/// Prefix of environment variables overriding configuration
pub const ENV_PREFIX: &str = "DBACCESSOR_CODEGEN";
