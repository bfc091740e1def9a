//! Error types for dbaccessor

use thiserror::Error;

/// Result type alias for accessor operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while a generated accessor talks to a connection
#[derive(Error, Debug)]
pub enum Error {
    /// Type conversion error
    #[error("Type conversion error: expected {expected}, got {actual}")]
    TypeConversion {
        expected: &'static str,
        actual: String,
    },

    /// Column position not present in row
    #[error("Column not found: index {0}")]
    ColumnNotFound(usize),

    /// Null value for non-optional field
    #[error("Unexpected null value for column: index {0}")]
    UnexpectedNull(usize),

    /// Query execution error reported by the backend
    #[error("Query error: {0}")]
    Query(String),

    /// Connection error reported by the backend
    #[error("Connection error: {0}")]
    Connection(String),
}
