//! Parameterized statement templates.
//!
//! Statements only ever contain validated identifiers and `?` placeholders;
//! values are bound at run time in the order the placeholders appear.

use super::validation::{ColumnModel, TableModel};

/// Build the SELECT columns list, in declaration order
fn select_columns(model: &TableModel) -> String {
    column_list(model, model.columns.iter())
}

fn column_list<'m, 'a: 'm>(
    model: &TableModel,
    columns: impl Iterator<Item = &'m ColumnModel<'a>>,
) -> String {
    columns
        .map(|c| model.sql_ident(&c.meta.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build `a = ?, b = ?`
fn assignments(model: &TableModel, columns: &[&ColumnModel]) -> String {
    columns
        .iter()
        .map(|c| format!("{} = ?", model.sql_ident(&c.meta.name)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the WHERE predicate over the primary key, in key order
pub fn key_predicate(model: &TableModel) -> String {
    model
        .key_columns()
        .iter()
        .map(|c| format!("{} = ?", model.sql_ident(&c.meta.name)))
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// `DELETE FROM t WHERE pk = ?`
pub fn delete_statement(model: &TableModel) -> String {
    format!(
        "DELETE FROM {} WHERE {}",
        model.sql_ident(model.table_name()),
        key_predicate(model)
    )
}

/// `SELECT a, b FROM t WHERE pk = ?`
pub fn select_by_key_statement(model: &TableModel) -> String {
    format!(
        "{} WHERE {}",
        select_all_statement(model),
        key_predicate(model)
    )
}

/// `SELECT a, b FROM t`
pub fn select_all_statement(model: &TableModel) -> String {
    format!(
        "SELECT {} FROM {}",
        select_columns(model),
        model.sql_ident(model.table_name())
    )
}

/// `UPDATE t SET a = ? WHERE pk = ?`, or `None` when every column is a key
pub fn update_statement(model: &TableModel) -> Option<String> {
    let non_key = model.non_key_columns();
    if non_key.is_empty() {
        return None;
    }
    Some(format!(
        "UPDATE {} SET {} WHERE {}",
        model.sql_ident(model.table_name()),
        assignments(model, &non_key),
        key_predicate(model)
    ))
}

/// `INSERT INTO t (a, b) VALUES (?, ?)` without auto-generated columns
pub fn insert_statement(model: &TableModel) -> String {
    let insert_columns = model.insert_columns();
    let placeholders = vec!["?"; insert_columns.len()].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        model.sql_ident(model.table_name()),
        column_list(model, insert_columns.into_iter()),
        placeholders
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::composer::UnitOptions;
    use crate::codegen::validation::validate;
    use crate::parser::{ColumnMetadata, StorageType, TableMetadata};

    fn book() -> TableMetadata {
        TableMetadata::new(
            "book",
            vec![
                ColumnMetadata::new("id", StorageType::Integer)
                    .primary_key()
                    .auto_generated(),
                ColumnMetadata::new("title", StorageType::Text),
            ],
        )
    }

    fn order_items() -> TableMetadata {
        TableMetadata::new(
            "order_items",
            vec![
                ColumnMetadata::new("order_id", StorageType::LongInteger).primary_key(),
                ColumnMetadata::new("product_id", StorageType::LongInteger).primary_key(),
                ColumnMetadata::new("quantity", StorageType::Integer),
                ColumnMetadata::new("note", StorageType::Text).nullable(),
            ],
        )
    }

    #[test]
    fn test_book_statements() {
        let table = book();
        let options = UnitOptions::default();
        let model = validate(&table, &options).unwrap();

        assert_eq!(delete_statement(&model), "DELETE FROM book WHERE id = ?");
        assert_eq!(
            select_by_key_statement(&model),
            "SELECT id, title FROM book WHERE id = ?"
        );
        assert_eq!(select_all_statement(&model), "SELECT id, title FROM book");
        assert_eq!(
            update_statement(&model).unwrap(),
            "UPDATE book SET title = ? WHERE id = ?"
        );
        assert_eq!(
            insert_statement(&model),
            "INSERT INTO book (title) VALUES (?)"
        );
    }

    #[test]
    fn test_composite_key_statements() {
        let table = order_items();
        let options = UnitOptions::default();
        let model = validate(&table, &options).unwrap();

        assert_eq!(
            delete_statement(&model),
            "DELETE FROM order_items WHERE order_id = ? AND product_id = ?"
        );
        assert_eq!(
            update_statement(&model).unwrap(),
            "UPDATE order_items SET quantity = ?, note = ? WHERE order_id = ? AND product_id = ?"
        );
        assert_eq!(
            insert_statement(&model),
            "INSERT INTO order_items (order_id, product_id, quantity, note) VALUES (?, ?, ?, ?)"
        );
    }

    #[test]
    fn test_all_key_table_has_no_update() {
        let table = TableMetadata::new(
            "tag_links",
            vec![
                ColumnMetadata::new("tag_id", StorageType::Integer).primary_key(),
                ColumnMetadata::new("book_id", StorageType::Integer).primary_key(),
            ],
        );
        let options = UnitOptions::default();
        let model = validate(&table, &options).unwrap();
        assert_eq!(update_statement(&model), None);
    }

    #[test]
    fn test_all_auto_generated_insert() {
        let table = TableMetadata::new(
            "tickets",
            vec![ColumnMetadata::new("id", StorageType::LongInteger)
                .primary_key()
                .auto_generated()],
        );
        let options = UnitOptions::default();
        let model = validate(&table, &options).unwrap();
        assert_eq!(insert_statement(&model), "INSERT INTO tickets () VALUES ()");
    }

    #[test]
    fn test_quoted_identifiers() {
        let table = book();
        let options = UnitOptions {
            quote_identifiers: true,
            ..UnitOptions::default()
        };
        let model = validate(&table, &options).unwrap();
        assert_eq!(
            delete_statement(&model),
            "DELETE FROM `book` WHERE `id` = ?"
        );
    }
}
