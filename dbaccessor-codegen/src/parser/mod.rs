//! Table metadata model and the schema sources that produce it

mod metadata;
mod schema_parser;

pub use metadata::*;
pub use schema_parser::*;
