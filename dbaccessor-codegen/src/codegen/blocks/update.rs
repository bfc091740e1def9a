//! Update capability: write non-key fields to the row matching the key

use super::{bind_fields, statement_const, BlockGenerator};
use crate::codegen::sql::update_statement;
use crate::codegen::validation::TableModel;

pub struct UpdateBlock;

impl BlockGenerator for UpdateBlock {
    fn name(&self) -> &'static str {
        "update"
    }

    fn render(&self, model: &TableModel) -> String {
        let unit = &model.unit_name;

        let Some(statement) = update_statement(model) else {
            // every column belongs to the key: nothing can change
            let mut code = String::from("#[async_trait]\n");
            code.push_str(&format!("impl Updateable for {} {{\n", unit));
            code.push_str("    async fn update<C: Connection>(&self, _conn: &C) -> Result<u64> {\n");
            code.push_str("        Ok(0)\n");
            code.push_str("    }\n");
            code.push_str("}\n");
            return code;
        };

        let mut code = statement_const(
            model,
            &[(
                "Statement run by [`Updateable::update`].",
                "UPDATE_SQL",
                statement,
            )],
        );
        code.push('\n');

        // SET placeholders come before the WHERE placeholders
        let mut bound = model.non_key_columns();
        bound.extend(model.key_columns());

        code.push_str("#[async_trait]\n");
        code.push_str(&format!("impl Updateable for {} {{\n", unit));
        code.push_str("    async fn update<C: Connection>(&self, conn: &C) -> Result<u64> {\n");
        code.push_str("        Query::new(Self::UPDATE_SQL)\n");
        code.push_str(&bind_fields(&bound));
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
    use crate::codegen::blocks::test_support::book;
    use crate::codegen::composer::UnitOptions;
    use crate::codegen::validation::validate;
    use crate::parser::{ColumnMetadata, StorageType, TableMetadata};

    #[test]
    fn test_update_binds_values_then_key() {
        let table = book();
        let options = UnitOptions::default();
        let model = validate(&table, &options).unwrap();
        let code = UpdateBlock.render(&model);

        assert!(code.contains("\"UPDATE book SET title = ? WHERE id = ?\""));
        let title = code.find(".bind(&self.title)").unwrap();
        let id = code.find(".bind(&self.id)").unwrap();
        assert!(title < id);
    }

    #[test]
    fn test_all_key_table_update_is_a_no_op() {
        let table = TableMetadata::new(
            "tag_links",
            vec![
                ColumnMetadata::new("tag_id", StorageType::Integer).primary_key(),
                ColumnMetadata::new("book_id", StorageType::Integer).primary_key(),
            ],
        );
        let options = UnitOptions::default();
        let model = validate(&table, &options).unwrap();
        let code = UpdateBlock.render(&model);

        assert!(!code.contains("UPDATE_SQL"));
        assert!(code.contains("impl Updateable for Tag_linksTableAccessor {"));
        assert!(code.contains("        Ok(0)\n"));
    }
}
