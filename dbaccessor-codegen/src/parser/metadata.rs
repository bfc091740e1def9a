//! Metadata structures describing the table an accessor is generated for

use serde::{Deserialize, Serialize};

/// Metadata for a database table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMetadata {
    /// Table name
    pub name: String,

    /// Table comment (if any)
    #[serde(default)]
    pub comment: Option<String>,

    /// Columns in declaration order
    pub columns: Vec<ColumnMetadata>,
}

/// Metadata for a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMetadata {
    /// Column name
    pub name: String,

    /// Declared storage type
    pub storage_type: StorageType,

    /// Whether the column is nullable
    #[serde(default)]
    pub nullable: bool,

    /// Whether the column is part of the primary key
    #[serde(default)]
    pub is_primary_key: bool,

    /// Whether the store assigns the value on insert (AUTO_INCREMENT and friends)
    #[serde(default)]
    pub is_auto_generated: bool,

    /// Column comment (if any)
    #[serde(default)]
    pub comment: Option<String>,
}

/// Storage types an accessor can be generated for.
///
/// `Other` keeps a declared type outside this set so that validation can
/// report it instead of the schema source dropping the column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageType {
    Text,
    Integer,
    LongInteger,
    Real,
    Boolean,
    DateTime,
    Blob,
    Other(String),
}

impl StorageType {
    /// Classify a declared SQL type such as `VARCHAR(255)` or `INT UNSIGNED`.
    pub fn from_sql(declared: &str) -> Self {
        let lower = declared.trim().to_lowercase();
        let unsigned = lower.contains("unsigned");

        // TINYINT(1) and BIT(1) are the usual MySQL spellings of a boolean
        if lower == "bool"
            || lower == "boolean"
            || (lower.starts_with("tinyint") && lower.contains("(1)"))
            || (lower.starts_with("bit") && lower.contains("(1)"))
        {
            return StorageType::Boolean;
        }

        if lower.starts_with("bigint") {
            return StorageType::LongInteger;
        }
        if lower.starts_with("tinyint")
            || lower.starts_with("smallint")
            || lower.starts_with("mediumint")
            || lower.starts_with("int")
        {
            // An unsigned 32-bit value does not fit i32
            return if unsigned && lower.starts_with("int") {
                StorageType::LongInteger
            } else {
                StorageType::Integer
            };
        }

        if lower.starts_with("float") || lower.starts_with("double") || lower.starts_with("real") {
            return StorageType::Real;
        }

        if lower.starts_with("char")
            || lower.starts_with("varchar")
            || lower.starts_with("nvarchar")
            || lower.contains("text")
            || lower.starts_with("enum")
            || lower.starts_with("set")
        {
            return StorageType::Text;
        }

        if lower.starts_with("binary") || lower.starts_with("varbinary") || lower.contains("blob") {
            return StorageType::Blob;
        }

        if lower == "date" || lower.starts_with("datetime") || lower.starts_with("timestamp") {
            return StorageType::DateTime;
        }

        StorageType::Other(declared.trim().to_string())
    }

    /// Check if values of this type are integers (and can receive a store-assigned id)
    pub fn is_integer(&self) -> bool {
        matches!(self, StorageType::Integer | StorageType::LongInteger)
    }

    /// Human-readable name used in diagnostics and `inspect` output
    pub fn describe(&self) -> &str {
        match self {
            StorageType::Text => "text",
            StorageType::Integer => "integer",
            StorageType::LongInteger => "long-integer",
            StorageType::Real => "real",
            StorageType::Boolean => "boolean",
            StorageType::DateTime => "date/time",
            StorageType::Blob => "binary-blob",
            StorageType::Other(declared) => declared,
        }
    }
}

impl TableMetadata {
    /// Create table metadata from its name and ordered columns
    pub fn new(name: impl Into<String>, columns: Vec<ColumnMetadata>) -> Self {
        Self {
            name: name.into(),
            comment: None,
            columns,
        }
    }

    /// Get a column by name
    pub fn get_column(&self, name: &str) -> Option<&ColumnMetadata> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Primary key columns in declaration order
    pub fn primary_key_columns(&self) -> impl Iterator<Item = &ColumnMetadata> {
        self.columns.iter().filter(|c| c.is_primary_key)
    }

    /// Check if the primary key spans more than one column
    pub fn has_composite_key(&self) -> bool {
        self.primary_key_columns().count() > 1
    }
}

impl ColumnMetadata {
    /// Create a non-null, non-key column
    pub fn new(name: impl Into<String>, storage_type: StorageType) -> Self {
        Self {
            name: name.into(),
            storage_type,
            nullable: false,
            is_primary_key: false,
            is_auto_generated: false,
            comment: None,
        }
    }

    /// Mark the column as part of the primary key
    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    /// Mark the column as assigned by the store on insert
    pub fn auto_generated(mut self) -> Self {
        self.is_auto_generated = true;
        self
    }

    /// Mark the column as nullable
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}
