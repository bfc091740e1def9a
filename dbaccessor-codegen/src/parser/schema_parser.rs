//! SQL schema parser using sqlparser-rs

use std::path::Path;

use sqlparser::ast::{
    ColumnOption, Expr, Ident, IndexColumn, ObjectName, PrimaryKeyConstraint, Statement,
    TableConstraint,
};
use sqlparser::dialect::MySqlDialect;
use sqlparser::parser::Parser;
use tracing::debug;

use super::metadata::*;
use crate::error::Result;

/// Load table metadata from a schema file.
///
/// `.json` files hold already-introspected `TableMetadata` values; anything
/// else is parsed as SQL DDL.
pub fn load_tables(path: &Path) -> Result<Vec<TableMetadata>> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        debug!("Reading table metadata as JSON: {:?}", path);
        Ok(serde_json::from_str(&content)?)
    } else {
        parse_schema(&content)
    }
}

/// Parse a SQL schema string into table metadata
pub fn parse_schema(sql: &str) -> Result<Vec<TableMetadata>> {
    let dialect = MySqlDialect {};
    let statements = Parser::parse_sql(&dialect, sql)?;

    let mut tables = Vec::new();

    for stmt in statements {
        if let Statement::CreateTable(create_table) = stmt {
            let table = extract_table_metadata(&create_table)?;
            tables.push(table);
        }
    }

    Ok(tables)
}

/// Extract table metadata from a CREATE TABLE statement
fn extract_table_metadata(create: &sqlparser::ast::CreateTable) -> Result<TableMetadata> {
    let name = extract_table_name(&create.name);

    let mut columns = Vec::new();
    for col_def in &create.columns {
        columns.push(extract_column_metadata(col_def)?);
    }

    // Table-level PRIMARY KEY (a, b) flags the listed columns
    for constraint in &create.constraints {
        if let TableConstraint::PrimaryKey(PrimaryKeyConstraint {
            columns: pk_cols, ..
        }) = constraint
        {
            for pk_col in pk_cols {
                let col_name = extract_ident_from_index_column(pk_col);
                if let Some(col) = columns.iter_mut().find(|c| c.name == col_name) {
                    col.is_primary_key = true;
                    col.nullable = false;
                }
            }
        }
    }

    Ok(TableMetadata {
        name,
        comment: None, // sqlparser doesn't expose table comments directly
        columns,
    })
}

/// Extract column metadata from a column definition
fn extract_column_metadata(col_def: &sqlparser::ast::ColumnDef) -> Result<ColumnMetadata> {
    let name = extract_ident(&col_def.name);
    let data_type = format!("{}", col_def.data_type);

    let mut column = ColumnMetadata::new(name, StorageType::from_sql(&data_type));
    column.nullable = true; // SQL columns are nullable unless declared otherwise

    for option in &col_def.options {
        match &option.option {
            ColumnOption::NotNull => {
                column.nullable = false;
            }
            ColumnOption::Null => {
                column.nullable = true;
            }
            ColumnOption::PrimaryKey(_) => {
                column.is_primary_key = true;
                column.nullable = false;
            }
            ColumnOption::Comment(c) => {
                column.comment = Some(c.clone());
            }
            ColumnOption::DialectSpecific(tokens) => {
                // AUTO_INCREMENT arrives as a MySQL-specific option
                let token_str = tokens
                    .iter()
                    .map(|t| t.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
                    .to_uppercase();
                if token_str.contains("AUTO_INCREMENT") {
                    column.is_auto_generated = true;
                }
            }
            _ => {}
        }
    }

    Ok(column)
}

/// Extract a simple string from an ObjectName
fn extract_table_name(name: &ObjectName) -> String {
    name.0
        .last()
        .and_then(|part| part.as_ident())
        .map(|ident| ident.value.clone())
        .unwrap_or_default()
}

/// Extract a string from an Ident, removing backticks if present
fn extract_ident(ident: &Ident) -> String {
    ident.value.clone()
}

/// Extract a column name string from an IndexColumn
fn extract_ident_from_index_column(ic: &IndexColumn) -> String {
    match &ic.column.expr {
        Expr::Identifier(ident) => ident.value.clone(),
        other => format!("{}", other),
    }
}
