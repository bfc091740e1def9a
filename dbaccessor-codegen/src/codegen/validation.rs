//! Single-pass metadata validation.
//!
//! Produces the [`TableModel`] every block generator renders from, or one
//! [`MetadataValidationError`] carrying every problem found. Nothing is
//! rendered for a table that fails here.

use std::collections::HashMap;

use crate::error::{MetadataIssue, MetadataValidationError};
use crate::parser::{ColumnMetadata, TableMetadata};

use super::composer::UnitOptions;
use super::naming::{check_sql_identifier, escape_ident, field_name, unit_name};
use super::type_resolver::{RustType, TypeMapper};

/// A column with its derived names and type
#[derive(Debug, Clone)]
pub struct ColumnModel<'a> {
    pub meta: &'a ColumnMetadata,
    /// Bare field name, used to derive accessor names
    pub field: String,
    /// Field name as written in code (raw identifier for keywords)
    pub ident: String,
    pub rust_type: RustType,
}

/// Validated view of one table shared by all block generators
#[derive(Debug, Clone)]
pub struct TableModel<'a> {
    pub table: &'a TableMetadata,
    pub unit_name: String,
    pub columns: Vec<ColumnModel<'a>>,
    pub options: &'a UnitOptions,
}

impl<'a> TableModel<'a> {
    /// Name of the wrapped table
    pub fn table_name(&self) -> &str {
        &self.table.name
    }

    /// Primary key columns in declaration order
    pub fn key_columns(&self) -> Vec<&ColumnModel<'a>> {
        self.columns.iter().filter(|c| c.meta.is_primary_key).collect()
    }

    /// Columns covered by UPDATE ... SET
    pub fn non_key_columns(&self) -> Vec<&ColumnModel<'a>> {
        self.columns
            .iter()
            .filter(|c| !c.meta.is_primary_key)
            .collect()
    }

    /// Columns the INSERT statement supplies
    pub fn insert_columns(&self) -> Vec<&ColumnModel<'a>> {
        self.columns
            .iter()
            .filter(|c| !c.meta.is_auto_generated)
            .collect()
    }

    /// The column receiving a store-assigned id after persist.
    ///
    /// Only defined when exactly one auto-generated column holds integers;
    /// other auto-generated columns such as timestamps do not count.
    pub fn generated_id_column(&self) -> Option<&ColumnModel<'a>> {
        let mut generated = self
            .columns
            .iter()
            .filter(|c| c.meta.is_auto_generated && c.meta.storage_type.is_integer());
        match (generated.next(), generated.next()) {
            (Some(col), None) => Some(col),
            _ => None,
        }
    }

    /// Identifier as written in SQL statement text
    pub fn sql_ident(&self, name: &str) -> String {
        if self.options.quote_identifiers {
            format!("`{}`", name.replace('`', "``"))
        } else {
            name.to_string()
        }
    }
}

/// Validate `table` once and build its model.
pub fn validate<'a>(
    table: &'a TableMetadata,
    options: &'a UnitOptions,
) -> Result<TableModel<'a>, MetadataValidationError> {
    let mut issues = Vec::new();

    let unit = match unit_name(&table.name) {
        Ok(name) => name,
        Err(issue) => {
            issues.push(issue);
            String::new()
        }
    };
    if !options.quote_identifiers {
        if let Err(issue) = check_sql_identifier(&table.name) {
            issues.push(issue);
        }
    }

    if table.columns.is_empty() {
        issues.push(MetadataIssue::NoColumns {
            table: table.name.clone(),
        });
    }

    // lower-cased column name / field name -> first column claiming it
    let mut seen_columns: HashMap<String, &str> = HashMap::new();
    let mut seen_fields: HashMap<String, &str> = HashMap::new();
    let mut columns = Vec::with_capacity(table.columns.len());

    for col in &table.columns {
        if let Some(first) = seen_columns.insert(col.name.to_lowercase(), &col.name) {
            issues.push(MetadataIssue::DuplicateColumnName {
                first: first.to_string(),
                second: col.name.clone(),
            });
            continue;
        }

        if !options.quote_identifiers {
            if let Err(issue) = check_sql_identifier(&col.name) {
                issues.push(issue);
            }
        }

        let field = match field_name(&col.name) {
            Ok(field) => {
                if let Some(first) = seen_fields.get(&field) {
                    issues.push(MetadataIssue::DuplicateFieldName {
                        first: first.to_string(),
                        second: col.name.clone(),
                        field: field.clone(),
                    });
                } else {
                    seen_fields.insert(field.clone(), &col.name);
                }
                Some(field)
            }
            Err(issue) => {
                issues.push(issue);
                None
            }
        };

        let rust_type = match TypeMapper::map_type(&col.storage_type, col.nullable) {
            Ok(rust_type) => Some(rust_type),
            Err(unsupported) => {
                issues.push(MetadataIssue::UnsupportedStorageType {
                    column: col.name.clone(),
                    declared: unsupported.0,
                });
                None
            }
        };

        if let (Some(field), Some(rust_type)) = (field, rust_type) {
            columns.push(ColumnModel {
                meta: col,
                ident: escape_ident(&field),
                field,
                rust_type,
            });
        }
    }

    if !table.columns.is_empty() && table.primary_key_columns().next().is_none() {
        issues.push(MetadataIssue::MissingPrimaryKey {
            table: table.name.clone(),
        });
    }

    // a bad column name fails both the SQL and the field check identically
    issues.dedup();

    if !issues.is_empty() {
        return Err(MetadataValidationError {
            table: table.name.clone(),
            issues,
        });
    }

    Ok(TableModel {
        table,
        unit_name: unit,
        columns,
        options,
    })
}
