//! Connection trait implemented by database backends

use crate::error::Result;
use crate::traits::FromRow;
use crate::value::Value;
use async_trait::async_trait;

/// Result of a statement execution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecuteResult {
    /// Number of rows affected by the statement
    pub rows_affected: u64,
    /// Id assigned by the store (for INSERT statements)
    pub last_insert_id: Option<u64>,
}

/// Trait for anything a generated accessor can run its statements on.
///
/// Parameters are positional: the n-th value binds the n-th `?` of `sql`.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Execute a statement and report affected rows.
    async fn execute(&self, sql: &str, params: Vec<Value>) -> Result<ExecuteResult>;

    /// Fetch all rows matching the query.
    async fn fetch_all<T: FromRow + Send>(&self, sql: &str, params: Vec<Value>) -> Result<Vec<T>>;

    /// Fetch the first row, if any.
    async fn fetch_optional<T: FromRow + Send>(
        &self,
        sql: &str,
        params: Vec<Value>,
    ) -> Result<Option<T>> {
        Ok(self.fetch_all(sql, params).await?.into_iter().next())
    }
}
