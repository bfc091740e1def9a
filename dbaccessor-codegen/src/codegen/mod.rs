//! Code generation module

pub mod blocks;
mod composer;
mod naming;
mod output;
pub mod sql;
mod type_resolver;
mod validation;

pub use composer::{GeneratedUnit, UnitComposer, UnitOptions, CAPABILITIES};
pub use naming::*;
pub use output::{format_unit, module_index, write_units};
pub use type_resolver::*;
pub use validation::{validate, ColumnModel, TableModel};
