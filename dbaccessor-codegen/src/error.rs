//! Error types for dbaccessor-codegen

use thiserror::Error;

/// Result type alias for dbaccessor-codegen operations
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur during code generation
#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("Failed to parse schema: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to format generated unit {unit}: {reason}")]
    FormatError { unit: String, reason: String },

    #[error(transparent)]
    MetadataValidation(#[from] MetadataValidationError),

    #[error("Tables `{first}` and `{second}` both generate `{unit}`")]
    UnitNameCollision {
        unit: String,
        first: String,
        second: String,
    },

    #[error("Tables `{first}` and `{second}` both write `{file}`")]
    ModuleFileCollision {
        file: String,
        first: String,
        second: String,
    },
}

/// One problem found in a table's metadata
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetadataIssue {
    #[error("`{name}` is not a valid identifier: {reason}")]
    InvalidIdentifier { name: String, reason: String },

    #[error("columns `{first}` and `{second}` have the same name")]
    DuplicateColumnName { first: String, second: String },

    #[error("columns `{first}` and `{second}` both map to field `{field}`")]
    DuplicateFieldName {
        first: String,
        second: String,
        field: String,
    },

    #[error("table `{table}` has no primary key column")]
    MissingPrimaryKey { table: String },

    #[error("column `{column}` has unsupported storage type `{declared}`")]
    UnsupportedStorageType { column: String, declared: String },

    #[error("table `{table}` has no columns")]
    NoColumns { table: String },
}

/// Every problem found while validating one table, collected in a single pass
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid metadata for table `{table}` {}", render_issues(.issues))]
pub struct MetadataValidationError {
    pub table: String,
    pub issues: Vec<MetadataIssue>,
}

impl MetadataValidationError {
    /// Check whether any collected issue matches `predicate`
    pub fn has(&self, predicate: impl Fn(&MetadataIssue) -> bool) -> bool {
        self.issues.iter().any(predicate)
    }
}

fn render_issues(issues: &[MetadataIssue]) -> String {
    let mut out = format!(
        "({} problem{})",
        issues.len(),
        if issues.len() == 1 { "" } else { "s" }
    );
    for issue in issues {
        out.push_str(&format!("\n  - {}", issue));
    }
    out
}

impl From<sqlparser::parser::ParserError> for CodegenError {
    fn from(err: sqlparser::parser::ParserError) -> Self {
        CodegenError::ParseError(err.to_string())
    }
}

impl From<serde_json::Error> for CodegenError {
    fn from(err: serde_json::Error) -> Self {
        CodegenError::ParseError(err.to_string())
    }
}

impl From<config::ConfigError> for CodegenError {
    fn from(err: config::ConfigError) -> Self {
        CodegenError::ConfigError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_lists_every_issue() {
        let err = MetadataValidationError {
            table: "book".to_string(),
            issues: vec![
                MetadataIssue::MissingPrimaryKey {
                    table: "book".to_string(),
                },
                MetadataIssue::UnsupportedStorageType {
                    column: "extra".to_string(),
                    declared: "JSON".to_string(),
                },
            ],
        };
        let message = err.to_string();
        assert!(message.contains("2 problems"));
        assert!(message.contains("no primary key"));
        assert!(message.contains("`JSON`"));
        assert!(message.starts_with("Invalid metadata for table `book` (2 problems)\n  - "));
    }

    #[test]
    fn test_single_issue_message() {
        let err = MetadataValidationError {
            table: "audit".to_string(),
            issues: vec![MetadataIssue::NoColumns {
                table: "audit".to_string(),
            }],
        };
        assert_eq!(
            err.to_string(),
            "Invalid metadata for table `audit` (1 problem)\n  - table `audit` has no columns"
        );
        let source: &dyn std::error::Error = &err;
        assert!(source.source().is_none());
    }
}
