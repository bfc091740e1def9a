//! FromValue trait for converting database values to Rust types

use crate::error::{Error, Result};
use crate::value::Value;
use chrono::NaiveDateTime;

/// Trait for types that can be constructed from a database value.
pub trait FromValue: Sized {
    /// Convert a database value to this type.
    fn from_value(value: Value) -> Result<Self>;
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Bool(v) => Ok(v),
            Value::I32(v) => Ok(v != 0),
            Value::I64(v) => Ok(v != 0),
            Value::U64(v) => Ok(v != 0),
            _ => Err(Error::TypeConversion {
                expected: "bool",
                actual: value.type_name().to_string(),
            }),
        }
    }
}

impl FromValue for i32 {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::I32(v) => Ok(v),
            Value::I64(v) => v.try_into().map_err(|_| Error::TypeConversion {
                expected: "i32",
                actual: format!("i64({}) out of range", v),
            }),
            Value::U64(v) => v.try_into().map_err(|_| Error::TypeConversion {
                expected: "i32",
                actual: format!("u64({}) out of range", v),
            }),
            _ => Err(Error::TypeConversion {
                expected: "i32",
                actual: value.type_name().to_string(),
            }),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::I32(v) => Ok(v.into()),
            Value::I64(v) => Ok(v),
            Value::U64(v) => v.try_into().map_err(|_| Error::TypeConversion {
                expected: "i64",
                actual: format!("u64({}) out of range", v),
            }),
            _ => Err(Error::TypeConversion {
                expected: "i64",
                actual: value.type_name().to_string(),
            }),
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::F64(v) => Ok(v),
            Value::I32(v) => Ok(v.into()),
            _ => Err(Error::TypeConversion {
                expected: "f64",
                actual: value.type_name().to_string(),
            }),
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(v) => Ok(v),
            Value::Bytes(v) => String::from_utf8(v).map_err(|e| Error::TypeConversion {
                expected: "utf8 string",
                actual: format!("invalid utf8: {}", e),
            }),
            _ => Err(Error::TypeConversion {
                expected: "string",
                actual: value.type_name().to_string(),
            }),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Bytes(v) => Ok(v),
            Value::String(v) => Ok(v.into_bytes()),
            _ => Err(Error::TypeConversion {
                expected: "bytes",
                actual: value.type_name().to_string(),
            }),
        }
    }
}

impl FromValue for NaiveDateTime {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::DateTime(v) => Ok(v),
            _ => Err(Error::TypeConversion {
                expected: "datetime",
                actual: value.type_name().to_string(),
            }),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            _ => Ok(Some(T::from_value(value)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_range_checks() {
        assert_eq!(i32::from_value(Value::I64(42)).unwrap(), 42);
        assert_eq!(i32::from_value(Value::U64(7)).unwrap(), 7);
        assert!(i32::from_value(Value::I64(i64::MAX)).is_err());
        assert!(i64::from_value(Value::U64(u64::MAX)).is_err());
        assert_eq!(i64::from_value(Value::I32(-3)).unwrap(), -3);
    }

    #[test]
    fn test_option_handles_null() {
        assert_eq!(Option::<String>::from_value(Value::Null).unwrap(), None);
        assert_eq!(
            Option::<String>::from_value(Value::String("a".into())).unwrap(),
            Some("a".to_string())
        );
    }

    #[test]
    fn test_null_into_non_optional_fails() {
        let err = String::from_value(Value::Null).unwrap_err();
        assert!(matches!(err, Error::TypeConversion { expected: "string", .. }));
    }

    #[test]
    fn test_bool_from_integer() {
        assert!(bool::from_value(Value::I32(1)).unwrap());
        assert!(!bool::from_value(Value::I64(0)).unwrap());
    }
}
