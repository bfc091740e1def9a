//! dbaccessor - runtime for generated table accessors
//!
//! `dbaccessor-codegen` turns the metadata of one table into a
//! `<Table>TableAccessor` struct. This crate holds everything that struct
//! compiles against:
//!
//! - **Capabilities**: `Deleteable`, `Retrievable`, `Updateable`, `Persistable`
//! - **Connection**: the async seam a database backend implements
//! - **Query API**: fluent `.bind()` chaining over positional `?` parameters
//! - **Values**: the `Value` enum with `ToValue` / `FromValue` conversions
//!
//! # Example
//!
//! ```ignore
//! use dbaccessor::{Connection, Retrievable, Updateable};
//!
//! async fn rename(conn: &impl Connection, id: i32) -> dbaccessor::Result<()> {
//!     if let Some(mut book) = BookTableAccessor::retrieve(conn, id).await? {
//!         book.set_title("Dune Messiah".to_string());
//!         book.update(conn).await?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod query;
pub mod traits;
pub mod value;

// Generated units annotate their impls with this attribute.
pub use async_trait::async_trait;

pub use error::{Error, Result};
pub use query::Query;
pub use traits::{
    Capability, Connection, Deleteable, ExecuteResult, FromRow, FromValue, Persistable,
    Retrievable, Row, RowExt, TableAccessor, ToValue, Updateable, ValueRow,
};
pub use value::Value;
