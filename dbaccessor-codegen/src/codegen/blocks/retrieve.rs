//! Retrieve capability: row mapping plus lookup by key and full scan

use super::{statement_const, BlockGenerator};
use crate::codegen::sql::{select_all_statement, select_by_key_statement};
use crate::codegen::validation::TableModel;

pub struct RetrieveBlock;

impl RetrieveBlock {
    /// Key type: the single key column's type, or a tuple in key order
    fn key_type(model: &TableModel) -> String {
        let keys = model.key_columns();
        match keys.as_slice() {
            [single] => single.rust_type.to_type_string(),
            _ => format!(
                "({})",
                keys.iter()
                    .map(|c| c.rust_type.to_type_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }

    /// `.bind(...)` calls consuming the `key` argument
    fn key_binds(model: &TableModel) -> String {
        let count = model.key_columns().len();
        if count == 1 {
            return "            .bind(key)\n".to_string();
        }
        (0..count)
            .map(|i| format!("            .bind(key.{})\n", i))
            .collect()
    }
}

impl BlockGenerator for RetrieveBlock {
    fn name(&self) -> &'static str {
        "retrieve"
    }

    fn render(&self, model: &TableModel) -> String {
        let unit = &model.unit_name;
        let mut code = statement_const(
            model,
            &[
                (
                    "Statement run by [`Retrievable::retrieve`].",
                    "SELECT_BY_KEY_SQL",
                    select_by_key_statement(model),
                ),
                (
                    "Statement run by [`Retrievable::retrieve_all`].",
                    "SELECT_ALL_SQL",
                    select_all_statement(model),
                ),
            ],
        );
        code.push('\n');

        // Columns are selected in declaration order, which is also the
        // parameter order of `new`.
        code.push_str(&format!("impl FromRow for {} {{\n", unit));
        code.push_str("    fn from_row<R: Row>(row: &R) -> Result<Self> {\n");
        code.push_str("        Ok(Self::new(\n");
        for i in 0..model.columns.len() {
            code.push_str(&format!("            row.get({})?,\n", i));
        }
        code.push_str("        ))\n");
        code.push_str("    }\n");
        code.push_str("}\n\n");

        code.push_str("#[async_trait]\n");
        code.push_str(&format!("impl Retrievable for {} {{\n", unit));
        code.push_str(&format!("    type Key = {};\n\n", Self::key_type(model)));
        code.push_str(
            "    async fn retrieve<C: Connection>(conn: &C, key: Self::Key) -> Result<Option<Self>> {\n",
        );
        code.push_str("        Query::new(Self::SELECT_BY_KEY_SQL)\n");
        code.push_str(&Self::key_binds(model));
        code.push_str("            .fetch_optional(conn)\n");
        code.push_str("            .await\n");
        code.push_str("    }\n\n");
        code.push_str("    async fn retrieve_all<C: Connection>(conn: &C) -> Result<Vec<Self>> {\n");
        code.push_str("        Query::new(Self::SELECT_ALL_SQL).fetch_all(conn).await\n");
        code.push_str("    }\n");
        code.push_str("}\n");
        code
    }
}
