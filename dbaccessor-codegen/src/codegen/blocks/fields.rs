//! Struct declaration with one private field per column

use super::{doc_text, BlockGenerator};
use crate::codegen::validation::TableModel;

pub struct FieldBlock;

impl BlockGenerator for FieldBlock {
    fn name(&self) -> &'static str {
        "fields"
    }

    fn render(&self, model: &TableModel) -> String {
        let mut code = String::new();

        code.push_str(&format!(
            "/// Accessor for rows of the `{}` table.\n",
            model.table_name()
        ));
        if let Some(comment) = model.table.comment.as_deref().filter(|c| !c.trim().is_empty()) {
            code.push_str("///\n");
            code.push_str(&format!("/// {}\n", doc_text(comment)));
        }
        code.push_str("#[derive(Debug, Clone, PartialEq)]\n");
        if model.unit_name.contains('_') {
            code.push_str("#[allow(non_camel_case_types)]\n");
        }
        code.push_str(&format!("pub struct {} {{\n", model.unit_name));

        for col in &model.columns {
            let mut doc = format!("Column `{}`", col.meta.name);
            if col.meta.is_primary_key {
                doc.push_str(" (primary key)");
            }
            if col.meta.is_auto_generated {
                doc.push_str(" (auto-generated)");
            }
            if let Some(comment) = col.meta.comment.as_deref().filter(|c| !c.trim().is_empty()) {
                doc.push_str(": ");
                doc.push_str(&doc_text(comment));
            }
            code.push_str(&format!("    /// {}\n", doc));
            code.push_str(&format!(
                "    {}: {},\n",
                col.ident,
                col.rust_type.to_type_string()
            ));
        }

        code.push_str("}\n");
        code
    }
}
