//! Unit composition: validate a table once, then assemble the header, every
//! block and the footer into one source unit.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, info};

use super::blocks::{
    AccessorBlock, BlockGenerator, ConstructorBlock, DeleteBlock, FieldBlock, PersistBlock,
    RetrieveBlock, UpdateBlock,
};
use super::naming::{escape_ident, file_stem, is_valid_module_name, is_valid_path};
use super::validation::{validate, TableModel};
use crate::config::defaults;
use crate::error::{CodegenError, Result};
use crate::parser::TableMetadata;

/// Capabilities every generated unit implements, in declaration order
pub const CAPABILITIES: [&str; 4] = ["Delete", "Retrieve", "Update", "Persist"];

/// Knobs that change the text of a generated unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitOptions {
    /// Path generated code imports the runtime traits from
    pub runtime_crate: String,
    /// Wrap each unit in `pub mod <namespace> { ... }`
    pub namespace: Option<String>,
    /// Backtick-quote table and column names in statements
    pub quote_identifiers: bool,
    /// Reject a batch in which two tables produce the same unit name or file
    pub detect_collisions: bool,
}

impl Default for UnitOptions {
    fn default() -> Self {
        Self {
            runtime_crate: defaults::RUNTIME_CRATE.to_string(),
            namespace: None,
            quote_identifiers: defaults::QUOTE_IDENTIFIERS,
            detect_collisions: defaults::DETECT_COLLISIONS,
        }
    }
}

impl UnitOptions {
    /// Check the options can be spliced into source text
    pub fn validate(&self) -> Result<()> {
        if !is_valid_path(&self.runtime_crate) {
            return Err(CodegenError::ConfigError(format!(
                "runtime_crate `{}` is not a valid Rust path",
                self.runtime_crate
            )));
        }
        if let Some(ns) = &self.namespace {
            if !is_valid_module_name(ns) {
                return Err(CodegenError::ConfigError(format!(
                    "namespace `{}` is not a valid module name",
                    ns
                )));
            }
        }
        Ok(())
    }
}

/// One generated accessor unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    name: String,
    table_name: String,
    source: String,
}

impl GeneratedUnit {
    /// Unit name, e.g. `BookTableAccessor`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Table the unit wraps
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Complete source text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// File the unit is written to, e.g. `book.rs`
    pub fn file_name(&self) -> String {
        format!("{}.rs", file_stem(&self.table_name))
    }

    /// Module name the unit is declared as in `mod.rs`
    pub fn module_name(&self) -> String {
        escape_ident(&file_stem(&self.table_name))
    }
}

/// Fail when two units would be written to the same file
pub(crate) fn check_file_collisions(units: &[GeneratedUnit]) -> Result<()> {
    // file name -> table that produced it
    let mut seen: HashMap<String, &str> = HashMap::new();
    for unit in units {
        let file = unit.file_name();
        if let Some(first) = seen.insert(file.clone(), &unit.table_name) {
            return Err(CodegenError::ModuleFileCollision {
                file,
                first: first.to_string(),
                second: unit.table_name.clone(),
            });
        }
    }
    Ok(())
}

impl fmt::Display for GeneratedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Builds accessor units from table metadata
pub struct UnitComposer {
    options: UnitOptions,
    blocks: Vec<Box<dyn BlockGenerator>>,
}

impl UnitComposer {
    /// Create a composer with the default block sequence
    pub fn new(options: UnitOptions) -> Self {
        Self {
            options,
            blocks: vec![
                Box::new(FieldBlock),
                Box::new(ConstructorBlock),
                Box::new(AccessorBlock),
                Box::new(DeleteBlock),
                Box::new(RetrieveBlock),
                Box::new(UpdateBlock),
                Box::new(PersistBlock),
            ],
        }
    }

    pub fn options(&self) -> &UnitOptions {
        &self.options
    }

    /// Generate the unit for one table.
    ///
    /// Metadata is validated before any text is produced; a table with any
    /// problem yields `CodegenError::MetadataValidation` listing all of them.
    pub fn generate(&self, table: &TableMetadata) -> Result<GeneratedUnit> {
        self.options.validate()?;
        let model = validate(table, &self.options)?;

        let mut source = self.header(&model);
        for block in &self.blocks {
            debug!(
                "Rendering {} block for {}",
                block.name(),
                model.unit_name
            );
            source.push('\n');
            source.push_str(&block.render(&model));
        }
        source.push('\n');
        source.push_str(&self.footer(&model));

        info!(
            "Generated {} for table {} ({} columns)",
            model.unit_name,
            table.name,
            model.columns.len()
        );

        Ok(GeneratedUnit {
            name: model.unit_name,
            table_name: table.name.clone(),
            source,
        })
    }

    /// Generate units for every table, stopping at the first failure
    pub fn generate_batch(&self, tables: &[TableMetadata]) -> Result<Vec<GeneratedUnit>> {
        let mut units = Vec::with_capacity(tables.len());
        // unit name -> table that produced it
        let mut seen: HashMap<String, String> = HashMap::new();

        for table in tables {
            let unit = self.generate(table)?;
            if self.options.detect_collisions {
                if let Some(first) = seen.insert(unit.name.clone(), table.name.clone()) {
                    return Err(CodegenError::UnitNameCollision {
                        unit: unit.name,
                        first,
                        second: table.name.clone(),
                    });
                }
            }
            units.push(unit);
        }

        if self.options.detect_collisions {
            check_file_collisions(&units)?;
        }
        Ok(units)
    }

    fn header(&self, model: &TableModel) -> String {
        let mut code = String::new();
        code.push_str(&format!(
            "// Generated accessor for the `{}` table.\n",
            model.table_name()
        ));
        code.push_str("// Produced by dbaccessor-codegen; regenerate instead of editing.\n");

        if let Some(ns) = &self.options.namespace {
            code.push_str(&format!("\npub mod {} {{\n", ns));
        }

        code.push('\n');
        code.push_str(&format!(
            "use {}::{{\n    async_trait, Capability, Connection, Deleteable, FromRow, Persistable, Query, Result,\n    Retrievable, Row, RowExt, TableAccessor, Updateable,\n}};\n\n",
            self.options.runtime_crate
        ));

        code.push_str(&format!(
            "impl TableAccessor for {} {{\n",
            model.unit_name
        ));
        code.push_str(&format!(
            "    const TABLE_NAME: &'static str = {:?};\n",
            model.table_name()
        ));
        code.push_str("    const CAPABILITIES: &'static [Capability] = &[\n");
        for capability in CAPABILITIES {
            code.push_str(&format!("        Capability::{},\n", capability));
        }
        code.push_str("    ];\n");
        code.push_str("}\n");
        code
    }

    fn footer(&self, model: &TableModel) -> String {
        let mut code = format!("// End of generated accessor `{}`.\n", model.unit_name);
        if self.options.namespace.is_some() {
            code.push_str("}\n");
        }
        code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::blocks::test_support::{book, order_items};
    use crate::error::MetadataIssue;
    use crate::parser::{ColumnMetadata, StorageType};

    fn composer() -> UnitComposer {
        UnitComposer::new(UnitOptions::default())
    }

    #[test]
    fn test_book_unit() {
        let unit = composer().generate(&book()).unwrap();
        assert_eq!(unit.name(), "BookTableAccessor");
        assert_eq!(unit.table_name(), "book");
        assert_eq!(unit.file_name(), "book.rs");

        let source = unit.source();
        assert!(source.contains("pub struct BookTableAccessor {"));
        assert!(source.contains("const TABLE_NAME: &'static str = \"book\";"));
        assert!(source.contains("\"DELETE FROM book WHERE id = ?\""));
        assert!(source.contains("\"SELECT id, title FROM book WHERE id = ?\""));
        assert!(source.contains("\"UPDATE book SET title = ? WHERE id = ?\""));
        assert!(source.contains("\"INSERT INTO book (title) VALUES (?)\""));
        assert!(source.trim_end().ends_with("// End of generated accessor `BookTableAccessor`."));
    }

    #[test]
    fn test_sections_in_order() {
        let unit = composer().generate(&book()).unwrap();
        let source = unit.source();
        let markers = [
            "use dbaccessor::{",
            "pub struct BookTableAccessor",
            "pub fn new(",
            "pub fn get_id(",
            "impl Deleteable for",
            "impl Retrievable for",
            "impl Updateable for",
            "impl Persistable for",
            "// End of generated accessor",
        ];
        let positions: Vec<usize> = markers
            .iter()
            .map(|m| source.find(m).unwrap_or_else(|| panic!("missing {m}")))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = composer().generate(&order_items()).unwrap();
        let b = composer().generate(&order_items()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unit_parses_as_rust() {
        for table in [book(), order_items()] {
            let unit = composer().generate(&table).unwrap();
            syn::parse_file(unit.source()).unwrap();
        }
    }

    #[test]
    fn test_namespace_wraps_unit() {
        let options = UnitOptions {
            namespace: Some("accessors".to_string()),
            ..UnitOptions::default()
        };
        let unit = UnitComposer::new(options).generate(&book()).unwrap();
        assert!(unit.source().contains("pub mod accessors {"));
        assert!(unit.source().ends_with("}\n"));
        syn::parse_file(unit.source()).unwrap();
    }

    #[test]
    fn test_custom_runtime_path() {
        let options = UnitOptions {
            runtime_crate: "crate::db".to_string(),
            ..UnitOptions::default()
        };
        let unit = UnitComposer::new(options).generate(&book()).unwrap();
        assert!(unit.source().contains("use crate::db::{"));
    }

    #[test]
    fn test_invalid_options_rejected() {
        let options = UnitOptions {
            namespace: Some("not a module".to_string()),
            ..UnitOptions::default()
        };
        let err = UnitComposer::new(options).generate(&book()).unwrap_err();
        assert!(matches!(err, CodegenError::ConfigError(_)));
    }

    #[test]
    fn test_keyword_options_rejected() {
        for namespace in ["type", "mod", "self"] {
            let options = UnitOptions {
                namespace: Some(namespace.to_string()),
                ..UnitOptions::default()
            };
            let err = UnitComposer::new(options).generate(&book()).unwrap_err();
            assert!(matches!(err, CodegenError::ConfigError(_)), "{namespace}");
        }

        let options = UnitOptions {
            runtime_crate: "crate::mod".to_string(),
            ..UnitOptions::default()
        };
        let err = UnitComposer::new(options).generate(&book()).unwrap_err();
        assert!(matches!(err, CodegenError::ConfigError(_)));
    }

    #[test]
    fn test_invalid_metadata_produces_no_unit() {
        let table = TableMetadata::new(
            "audit",
            vec![ColumnMetadata::new("entry", StorageType::Text)],
        );
        let err = composer().generate(&table).unwrap_err();
        match err {
            CodegenError::MetadataValidation(e) => {
                assert!(e.has(|i| matches!(i, MetadataIssue::MissingPrimaryKey { .. })));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_batch_collision_detection() {
        let tables = vec![
            TableMetadata::new(
                "Book",
                vec![ColumnMetadata::new("id", StorageType::Integer).primary_key()],
            ),
            TableMetadata::new(
                "BOOK",
                vec![ColumnMetadata::new("id", StorageType::Integer).primary_key()],
            ),
        ];

        let units = composer().generate_batch(&tables).unwrap();
        assert_eq!(units.len(), 2);

        let options = UnitOptions {
            detect_collisions: true,
            ..UnitOptions::default()
        };
        let err = UnitComposer::new(options).generate_batch(&tables).unwrap_err();
        assert!(matches!(
            err,
            CodegenError::UnitNameCollision { ref unit, .. } if unit == "BookTableAccessor"
        ));
    }

    #[test]
    fn test_batch_file_collision_detection() {
        let tables = vec![
            TableMetadata::new(
                "order_items",
                vec![ColumnMetadata::new("id", StorageType::Integer).primary_key()],
            ),
            TableMetadata::new(
                "OrderItems",
                vec![ColumnMetadata::new("id", StorageType::Integer).primary_key()],
            ),
        ];

        let units = composer().generate_batch(&tables).unwrap();
        assert_eq!(units[0].name(), "Order_itemsTableAccessor");
        assert_eq!(units[1].name(), "OrderitemsTableAccessor");
        assert_eq!(units[0].file_name(), units[1].file_name());

        let options = UnitOptions {
            detect_collisions: true,
            ..UnitOptions::default()
        };
        let err = UnitComposer::new(options).generate_batch(&tables).unwrap_err();
        match err {
            CodegenError::ModuleFileCollision { file, first, second } => {
                assert_eq!(file, "order_items.rs");
                assert_eq!(first, "order_items");
                assert_eq!(second, "OrderItems");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_keyword_table_module_name() {
        let table = TableMetadata::new(
            "type",
            vec![ColumnMetadata::new("id", StorageType::Integer).primary_key()],
        );
        let unit = composer().generate(&table).unwrap();
        assert_eq!(unit.file_name(), "type.rs");
        assert_eq!(unit.module_name(), "r#type");
    }
}
