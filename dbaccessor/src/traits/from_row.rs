//! FromRow trait for mapping result rows to accessors

use crate::error::{Error, Result};
use crate::value::Value;

/// A result row addressed by column position.
///
/// Generated accessors select their columns in declaration order, so the
/// position of a value in the row is the position of its column in the table
/// metadata.
pub trait Row {
    /// Get the value at `index` as a dynamic Value.
    ///
    /// Returns an error if the row has fewer columns.
    fn get_value(&self, index: usize) -> Result<Value>;
}

/// Extension trait for typed access to row values.
pub trait RowExt: Row {
    /// Get a typed value from the row by column position.
    fn get<T: crate::FromValue>(&self, index: usize) -> Result<T> {
        let value = self.get_value(index)?;
        let was_null = value.is_null();
        T::from_value(value).map_err(|e| {
            if was_null {
                Error::UnexpectedNull(index)
            } else {
                e
            }
        })
    }
}

impl<R: Row + ?Sized> RowExt for R {}

/// A row backed by a plain vector of values.
///
/// Backends that already decoded their wire rows can hand these to
/// [`FromRow::from_row`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueRow {
    values: Vec<Value>,
}

impl ValueRow {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Vec<Value>> for ValueRow {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

impl Row for ValueRow {
    fn get_value(&self, index: usize) -> Result<Value> {
        self.values
            .get(index)
            .cloned()
            .ok_or(Error::ColumnNotFound(index))
    }
}

/// Trait for types that can be constructed from a result row.
///
/// Generated accessors implement this by passing each position to their
/// full constructor:
///
/// ```ignore
/// impl FromRow for BookTableAccessor {
///     fn from_row<R: Row>(row: &R) -> Result<Self> {
///         Ok(Self::new(row.get(0)?, row.get(1)?))
///     }
/// }
/// ```
pub trait FromRow: Sized {
    /// Construct an instance of this type from a result row.
    fn from_row<R: Row>(row: &R) -> Result<Self>;
}
