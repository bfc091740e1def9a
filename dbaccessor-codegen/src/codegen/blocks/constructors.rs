//! Empty and all-fields constructors

use super::BlockGenerator;
use crate::codegen::validation::TableModel;

pub struct ConstructorBlock;

impl BlockGenerator for ConstructorBlock {
    fn name(&self) -> &'static str {
        "constructors"
    }

    fn render(&self, model: &TableModel) -> String {
        let unit = &model.unit_name;
        let mut code = String::new();

        // Default: every field at its type's default value
        code.push_str("#[allow(clippy::derivable_impls)]\n");
        code.push_str(&format!("impl Default for {} {{\n", unit));
        code.push_str("    fn default() -> Self {\n");
        code.push_str("        Self {\n");
        for col in &model.columns {
            code.push_str(&format!("            {}: Default::default(),\n", col.ident));
        }
        code.push_str("        }\n");
        code.push_str("    }\n");
        code.push_str("}\n\n");

        let params = model
            .columns
            .iter()
            .map(|c| format!("{}: {}", c.ident, c.rust_type.to_type_string()))
            .collect::<Vec<_>>()
            .join(", ");
        let inits = model
            .columns
            .iter()
            .map(|c| c.ident.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        code.push_str(&format!("impl {} {{\n", unit));
        code.push_str("    /// Create an accessor from every column value, in column order.\n");
        code.push_str("    #[allow(clippy::too_many_arguments)]\n");
        code.push_str(&format!("    pub fn new({}) -> Self {{\n", params));
        code.push_str(&format!("        Self {{ {} }}\n", inits));
        code.push_str("    }\n");
        code.push_str("}\n");
        code
    }
}
