//! Core traits for dbaccessor

mod capabilities;
mod connection;
mod from_row;
mod from_value;
mod to_value;

pub use capabilities::{
    Capability, Deleteable, Persistable, Retrievable, TableAccessor, Updateable,
};
pub use connection::{Connection, ExecuteResult};
pub use from_row::{FromRow, Row, RowExt, ValueRow};
pub use from_value::FromValue;
pub use to_value::ToValue;
