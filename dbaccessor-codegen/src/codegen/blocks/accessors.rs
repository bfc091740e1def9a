//! Read and write accessor per field

use super::BlockGenerator;
use crate::codegen::naming::{accessor_name, AccessorKind};
use crate::codegen::validation::TableModel;

pub struct AccessorBlock;

impl BlockGenerator for AccessorBlock {
    fn name(&self) -> &'static str {
        "accessors"
    }

    fn render(&self, model: &TableModel) -> String {
        let mut code = format!("impl {} {{\n", model.unit_name);

        for (i, col) in model.columns.iter().enumerate() {
            if i > 0 {
                code.push('\n');
            }
            let getter = accessor_name(&col.field, AccessorKind::Read);
            let setter = accessor_name(&col.field, AccessorKind::Write);

            code.push_str(&format!("    /// Value of column `{}`.\n", col.meta.name));
            code.push_str(&format!(
                "    pub fn {}(&self) -> {} {{\n",
                getter,
                col.rust_type.to_view_type_string()
            ));
            code.push_str(&format!(
                "        {}\n",
                col.rust_type.view_expr(&col.ident)
            ));
            code.push_str("    }\n\n");

            code.push_str(&format!("    /// Replace the value of column `{}`.\n", col.meta.name));
            code.push_str(&format!(
                "    pub fn {}(&mut self, {}: {}) {{\n",
                setter,
                col.ident,
                col.rust_type.to_type_string()
            ));
            code.push_str(&format!("        self.{0} = {0};\n", col.ident));
            code.push_str("    }\n");
        }

        code.push_str("}\n");
        code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::blocks::test_support::{book, order_items};
    use crate::codegen::composer::UnitOptions;
    use crate::codegen::validation::validate;

    #[test]
    fn test_accessor_pair_per_field() {
        let table = book();
        let options = UnitOptions::default();
        let model = validate(&table, &options).unwrap();
        let code = AccessorBlock.render(&model);

        assert!(code.contains("pub fn get_id(&self) -> i32 {"));
        assert!(code.contains("pub fn set_id(&mut self, id: i32) {"));
        assert!(code.contains("pub fn get_title(&self) -> &str {"));
        assert!(code.contains("        &self.title\n"));
        assert!(code.contains("        self.title = title;\n"));
        assert_eq!(code.matches("pub fn get_").count(), 2);
        assert_eq!(code.matches("pub fn set_").count(), 2);
    }

    #[test]
    fn test_keyword_field_accessors() {
        let table = order_items();
        let options = UnitOptions::default();
        let model = validate(&table, &options).unwrap();
        let code = AccessorBlock.render(&model);

        assert!(code.contains("pub fn get_type(&self) -> &str {"));
        assert!(code.contains("        &self.r#type\n"));
        assert!(code.contains("pub fn set_type(&mut self, r#type: String) {"));
        assert!(code.contains("pub fn get_note(&self) -> Option<&str> {"));
        assert!(code.contains("        self.note.as_deref()\n"));
    }
}
