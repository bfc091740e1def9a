//! Block generators - one per section of a generated unit.
//!
//! Every generator renders from the same validated [`TableModel`] and never
//! looks at another generator's output, so blocks can be tested one by one
//! and the composed unit is deterministic.

mod accessors;
mod constructors;
mod delete;
mod fields;
mod persist;
mod retrieve;
mod update;

pub use accessors::AccessorBlock;
pub use constructors::ConstructorBlock;
pub use delete::DeleteBlock;
pub use fields::FieldBlock;
pub use persist::PersistBlock;
pub use retrieve::RetrieveBlock;
pub use update::UpdateBlock;

use super::validation::{ColumnModel, TableModel};

/// A stateless renderer for one section of a unit
pub trait BlockGenerator {
    /// Short name reported in progress events
    fn name(&self) -> &'static str;

    /// Render the block; the text ends with a newline
    fn render(&self, model: &TableModel) -> String;
}

/// Render `s` as a Rust string literal
pub(crate) fn str_literal(s: &str) -> String {
    format!("{:?}", s)
}

/// Flatten free text so it fits on one `///` line
pub(crate) fn doc_text(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Generate `.bind(...)` calls for columns read from `self`
pub(crate) fn bind_fields(columns: &[&ColumnModel]) -> String {
    columns
        .iter()
        .map(|c| format!("            .bind(&self.{})\n", c.ident))
        .collect()
}

/// Render an associated statement constant inside an inherent impl
pub(crate) fn statement_const(model: &TableModel, consts: &[(&str, &str, String)]) -> String {
    let mut code = format!("impl {} {{\n", model.unit_name);
    for (i, (doc, name, sql)) in consts.iter().enumerate() {
        if i > 0 {
            code.push('\n');
        }
        code.push_str(&format!("    /// {}\n", doc));
        code.push_str(&format!(
            "    pub const {}: &'static str = {};\n",
            name,
            str_literal(sql)
        ));
    }
    code.push_str("}\n");
    code
}
