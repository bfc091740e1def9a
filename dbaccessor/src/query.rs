//! Query builder for dbaccessor

use crate::error::Result;
use crate::traits::{Connection, ExecuteResult, FromRow, ToValue};
use crate::value::Value;

/// A statement plus its positional parameters.
///
/// # Example
///
/// ```ignore
/// use dbaccessor::{Connection, Query};
///
/// async fn delete_book(conn: &impl Connection, id: i32) -> dbaccessor::Result<u64> {
///     Query::new("DELETE FROM book WHERE id = ?")
///         .bind(id)
///         .execute(conn)
///         .await
///         .map(|r| r.rows_affected)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Query<'q> {
    sql: &'q str,
    params: Vec<Value>,
}

impl<'q> Query<'q> {
    /// Create a new query with the given SQL.
    pub fn new(sql: &'q str) -> Self {
        Self {
            sql,
            params: Vec::new(),
        }
    }

    /// Bind a single value to the query.
    ///
    /// Values are bound in order, replacing `?` placeholders.
    pub fn bind<T: ToValue>(mut self, value: T) -> Self {
        self.params.push(value.to_value());
        self
    }

    /// Get the SQL string.
    pub fn sql(&self) -> &str {
        self.sql
    }

    /// Get the bound parameters.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Execute the statement.
    pub async fn execute<C: Connection>(self, conn: &C) -> Result<ExecuteResult> {
        conn.execute(self.sql, self.params).await
    }

    /// Fetch all matching rows.
    pub async fn fetch_all<T: FromRow + Send, C: Connection>(self, conn: &C) -> Result<Vec<T>> {
        conn.fetch_all(self.sql, self.params).await
    }

    /// Fetch a single optional row.
    pub async fn fetch_optional<T: FromRow + Send, C: Connection>(
        self,
        conn: &C,
    ) -> Result<Option<T>> {
        conn.fetch_optional(self.sql, self.params).await
    }
}
