//! Delete capability: remove the stored row matching the current key

use super::{bind_fields, statement_const, BlockGenerator};
use crate::codegen::sql::delete_statement;
use crate::codegen::validation::TableModel;

pub struct DeleteBlock;

impl BlockGenerator for DeleteBlock {
    fn name(&self) -> &'static str {
        "delete"
    }

    fn render(&self, model: &TableModel) -> String {
        let mut code = statement_const(
            model,
            &[(
                "Statement run by [`Deleteable::delete`].",
                "DELETE_SQL",
                delete_statement(model),
            )],
        );
        code.push('\n');

        code.push_str("#[async_trait]\n");
        code.push_str(&format!("impl Deleteable for {} {{\n", model.unit_name));
        code.push_str("    async fn delete<C: Connection>(&self, conn: &C) -> Result<u64> {\n");
        code.push_str("        Query::new(Self::DELETE_SQL)\n");
        code.push_str(&bind_fields(&model.key_columns()));
        code.push_str("            .execute(conn)\n");
        code.push_str("            .await\n");
        code.push_str("            .map(|result| result.rows_affected)\n");
        code.push_str("    }\n");
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
    fn test_delete_binds_key_only() {
        let table = book();
        let options = UnitOptions::default();
        let model = validate(&table, &options).unwrap();
        let code = DeleteBlock.render(&model);

        assert!(code.contains("pub const DELETE_SQL: &'static str = \"DELETE FROM book WHERE id = ?\";"));
        assert!(code.contains("impl Deleteable for BookTableAccessor {"));
        assert!(code.contains(".bind(&self.id)"));
        assert!(!code.contains(".bind(&self.title)"));
    }

    #[test]
    fn test_composite_key_delete() {
        let table = order_items();
        let options = UnitOptions::default();
        let model = validate(&table, &options).unwrap();
        let code = DeleteBlock.render(&model);

        assert!(code.contains("WHERE order_id = ? AND product_id = ?"));
        let order = code.find(".bind(&self.order_id)").unwrap();
        let product = code.find(".bind(&self.product_id)").unwrap();
        assert!(order < product);
    }
}
