//! Persist capability: insert the current field values as a new row

use super::{bind_fields, statement_const, BlockGenerator};
use crate::codegen::sql::insert_statement;
use crate::codegen::validation::TableModel;

pub struct PersistBlock;

impl BlockGenerator for PersistBlock {
    fn name(&self) -> &'static str {
        "persist"
    }

    fn render(&self, model: &TableModel) -> String {
        let mut code = statement_const(
            model,
            &[(
                "Statement run by [`Persistable::persist`].",
                "INSERT_SQL",
                insert_statement(model),
            )],
        );
        code.push('\n');

        code.push_str("#[async_trait]\n");
        code.push_str(&format!("impl Persistable for {} {{\n", model.unit_name));
        code.push_str("    async fn persist<C: Connection>(&mut self, conn: &C) -> Result<u64> {\n");

        let binds = bind_fields(&model.insert_columns());
        match model.generated_id_column() {
            Some(id) => {
                let runtime = &model.options.runtime_crate;
                code.push_str("        let result = Query::new(Self::INSERT_SQL)\n");
                code.push_str(&binds);
                code.push_str("            .execute(conn)\n");
                code.push_str("            .await?;\n");
                code.push_str("        if let Some(id) = result.last_insert_id {\n");
                code.push_str(&format!(
                    "            self.{} = {1}::FromValue::from_value({1}::Value::U64(id))?;\n",
                    id.ident, runtime
                ));
                code.push_str("        }\n");
                code.push_str("        Ok(result.rows_affected)\n");
            }
            None => {
                code.push_str("        Query::new(Self::INSERT_SQL)\n");
                code.push_str(&binds);
                code.push_str("            .execute(conn)\n");
                code.push_str("            .await\n");
                code.push_str("            .map(|result| result.rows_affected)\n");
            }
        }

        code.push_str("    }\n");
        code.push_str("}\n");
        code
    }
}
