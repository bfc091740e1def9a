//! Storage type to Rust type mapping

use thiserror::Error;

use crate::parser::StorageType;

/// Represents a Rust type for code generation
#[derive(Debug, Clone, PartialEq)]
pub enum RustType {
    Bool,
    I32,
    I64,
    F64,
    String,
    Bytes,
    NaiveDateTime,
    /// Optional wrapper
    Option(Box<RustType>),
}

impl RustType {
    /// Get the type string for code generation
    pub fn to_type_string(&self) -> String {
        match self {
            RustType::Bool => "bool".to_string(),
            RustType::I32 => "i32".to_string(),
            RustType::I64 => "i64".to_string(),
            RustType::F64 => "f64".to_string(),
            RustType::String => "String".to_string(),
            RustType::Bytes => "Vec<u8>".to_string(),
            RustType::NaiveDateTime => "chrono::NaiveDateTime".to_string(),
            RustType::Option(inner) => format!("Option<{}>", inner.to_type_string()),
        }
    }

    /// Get the type a read accessor returns (borrowed view for owned buffers)
    pub fn to_view_type_string(&self) -> String {
        match self {
            RustType::String => "&str".to_string(),
            RustType::Bytes => "&[u8]".to_string(),
            RustType::Option(inner) => match inner.as_ref() {
                RustType::String => "Option<&str>".to_string(),
                RustType::Bytes => "Option<&[u8]>".to_string(),
                _ => format!("Option<{}>", inner.to_type_string()),
            },
            _ => self.to_type_string(),
        }
    }

    /// Expression turning `self.<field>` into the view type
    pub fn view_expr(&self, field: &str) -> String {
        match self {
            RustType::String | RustType::Bytes => format!("&self.{}", field),
            RustType::Option(inner) if !inner.is_copy() => format!("self.{}.as_deref()", field),
            _ => format!("self.{}", field),
        }
    }

    /// Check if this is an Option type
    pub fn is_optional(&self) -> bool {
        matches!(self, RustType::Option(_))
    }

    /// Check if this type implements Copy
    ///
    /// Only String and Bytes (Vec<u8>) are non-Copy.
    pub fn is_copy(&self) -> bool {
        match self {
            RustType::String | RustType::Bytes => false,
            RustType::Option(inner) => inner.is_copy(),
            _ => true,
        }
    }
}

/// The declared storage type has no Rust representation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported storage type `{0}`")]
pub struct UnsupportedStorageType(pub String);

/// Resolve storage types to Rust types
pub struct TypeMapper;

impl TypeMapper {
    /// Get the Rust type for a storage type.
    ///
    /// Rust has no null-capable primitive, so every nullable column is wrapped
    /// in `Option`.
    pub fn map_type(
        storage_type: &StorageType,
        nullable: bool,
    ) -> Result<RustType, UnsupportedStorageType> {
        let base_type = Self::map_base_type(storage_type)?;

        if nullable {
            Ok(RustType::Option(Box::new(base_type)))
        } else {
            Ok(base_type)
        }
    }

    /// Resolve the base type (without Option wrapper)
    fn map_base_type(storage_type: &StorageType) -> Result<RustType, UnsupportedStorageType> {
        match storage_type {
            StorageType::Text => Ok(RustType::String),
            StorageType::Integer => Ok(RustType::I32),
            StorageType::LongInteger => Ok(RustType::I64),
            StorageType::Real => Ok(RustType::F64),
            StorageType::Boolean => Ok(RustType::Bool),
            StorageType::DateTime => Ok(RustType::NaiveDateTime),
            StorageType::Blob => Ok(RustType::Bytes),
            StorageType::Other(declared) => Err(UnsupportedStorageType(declared.clone())),
        }
    }
}
