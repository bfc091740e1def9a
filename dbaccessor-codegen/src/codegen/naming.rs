//! Naming utilities for code generation

use heck::ToSnakeCase;

use crate::error::MetadataIssue;

/// Suffix appended to the normalized table name
pub const UNIT_SUFFIX: &str = "TableAccessor";

/// Which accessor method to name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorKind {
    Read,
    Write,
}

impl AccessorKind {
    fn prefix(self) -> &'static str {
        match self {
            AccessorKind::Read => "get_",
            AccessorKind::Write => "set_",
        }
    }
}

/// Convert a table name to the generated unit name
/// e.g., "book" -> "BookTableAccessor", "ORDER_items" -> "Order_itemsTableAccessor"
pub fn unit_name(table_name: &str) -> Result<String, MetadataIssue> {
    let mut chars = table_name.chars();
    let first = chars.next().ok_or_else(|| invalid(table_name, "name is empty"))?;

    let normalized: String = first
        .to_uppercase()
        .chain(chars.as_str().to_lowercase().chars())
        .collect();
    check_identifier(&normalized).map_err(|reason| invalid(table_name, reason))?;

    Ok(format!("{}{}", normalized, UNIT_SUFFIX))
}

/// Convert a column name to a field name (snake_case)
/// e.g., "userId" -> "user_id", "first-name" -> "first_name"
///
/// The result is the bare name; use [`escape_ident`] where it is emitted as code.
pub fn field_name(column_name: &str) -> Result<String, MetadataIssue> {
    let snake = column_name.to_snake_case();
    if snake.is_empty() {
        return Err(invalid(column_name, "no identifier characters left"));
    }
    check_identifier(&snake).map_err(|reason| invalid(column_name, reason))?;
    if is_reserved_path_keyword(&snake) {
        return Err(invalid(column_name, "reserved keyword cannot be a field name"));
    }
    Ok(snake)
}

/// Generate an accessor method name for a bare field name
/// e.g., ("title", Read) -> "get_title", ("type", Write) -> "set_type"
pub fn accessor_name(field_name: &str, kind: AccessorKind) -> String {
    format!("{}{}", kind.prefix(), field_name)
}

/// Name of the generated file holding a table's unit
pub fn file_stem(table_name: &str) -> String {
    table_name.to_snake_case()
}

/// Check that a name can appear unquoted in SQL statement text
pub fn check_sql_identifier(name: &str) -> Result<(), MetadataIssue> {
    check_identifier(name).map_err(|reason| invalid(name, reason))
}

/// Check that `path` is a usable Rust path such as `dbaccessor` or `crate::db`
///
/// Keywords are rejected except the roots `crate`, `self` and `super` at the
/// start of the path.
pub fn is_valid_path(path: &str) -> bool {
    // `super` may only follow the start, `self` or another `super`
    let mut super_allowed = true;
    path.split("::").enumerate().all(|(i, segment)| {
        if check_identifier(segment).is_err() {
            return false;
        }
        let root = match segment {
            "crate" | "self" => i == 0,
            "super" => super_allowed,
            _ => false,
        };
        super_allowed = root && segment != "crate";
        root || !is_rust_keyword(segment)
    })
}

/// Check that `name` can be declared as a module, e.g. `pub mod accessors`
pub fn is_valid_module_name(name: &str) -> bool {
    check_identifier(name).is_ok() && !is_rust_keyword(name)
}

/// ASCII identifier rule shared by Rust names and unquoted SQL names
fn check_identifier(name: &str) -> Result<(), &'static str> {
    let mut chars = name.chars();
    match chars.next() {
        None => return Err("name is empty"),
        Some(c) if c.is_ascii_digit() => return Err("starts with a digit"),
        Some(c) if !(c.is_ascii_alphabetic() || c == '_') => {
            return Err("contains characters that are not valid in an identifier")
        }
        Some(_) => {}
    }
    if chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err("contains characters that are not valid in an identifier")
    }
}

fn invalid(name: &str, reason: &str) -> MetadataIssue {
    MetadataIssue::InvalidIdentifier {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

/// Keywords that cannot be written as raw identifiers
fn is_reserved_path_keyword(name: &str) -> bool {
    matches!(name, "self" | "Self" | "super" | "crate")
}

/// Check if a name is a Rust reserved keyword
pub fn is_rust_keyword(name: &str) -> bool {
    matches!(
        name,
        "as" | "async"
            | "await"
            | "break"
            | "const"
            | "continue"
            | "crate"
            | "dyn"
            | "else"
            | "enum"
            | "extern"
            | "false"
            | "fn"
            | "for"
            | "gen"
            | "if"
            | "impl"
            | "in"
            | "let"
            | "loop"
            | "match"
            | "mod"
            | "move"
            | "mut"
            | "pub"
            | "ref"
            | "return"
            | "self"
            | "Self"
            | "static"
            | "struct"
            | "super"
            | "trait"
            | "true"
            | "type"
            | "unsafe"
            | "use"
            | "where"
            | "while"
            | "abstract"
            | "become"
            | "box"
            | "do"
            | "final"
            | "macro"
            | "override"
            | "priv"
            | "try"
            | "typeof"
            | "unsized"
            | "virtual"
            | "yield"
    )
}

/// Escape a bare field name if it's a Rust keyword
pub fn escape_ident(name: &str) -> String {
    if is_rust_keyword(name) {
        format!("r#{}", name)
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_name() {
        assert_eq!(unit_name("book").unwrap(), "BookTableAccessor");
        assert_eq!(unit_name("BOOK").unwrap(), "BookTableAccessor");
        assert_eq!(unit_name("order_items").unwrap(), "Order_itemsTableAccessor");
    }

    #[test]
    fn test_unit_name_rejects_illegal_names() {
        assert!(matches!(
            unit_name(""),
            Err(MetadataIssue::InvalidIdentifier { .. })
        ));
        assert!(unit_name("my-table").is_err());
        assert!(unit_name("1table").is_err());
    }

    #[test]
    fn test_field_name() {
        assert_eq!(field_name("userId").unwrap(), "user_id");
        assert_eq!(field_name("user_id").unwrap(), "user_id");
        assert_eq!(field_name("first-name").unwrap(), "first_name");
        assert_eq!(field_name("CreatedAt").unwrap(), "created_at");
        assert_eq!(field_name("type").unwrap(), "type");
    }

    #[test]
    fn test_field_name_rejects_illegal_names() {
        assert!(field_name("2fa").is_err());
        assert!(field_name("--").is_err());
        assert!(field_name("self").is_err());
    }

    #[test]
    fn test_accessor_name() {
        assert_eq!(accessor_name("title", AccessorKind::Read), "get_title");
        assert_eq!(accessor_name("title", AccessorKind::Write), "set_title");
        assert_eq!(accessor_name("type", AccessorKind::Read), "get_type");
    }

    #[test]
    fn test_escape_ident() {
        assert_eq!(escape_ident("type"), "r#type");
        assert_eq!(escape_ident("name"), "name");
        assert_eq!(escape_ident("async"), "r#async");
    }

    #[test]
    fn test_is_valid_path() {
        assert!(is_valid_path("dbaccessor"));
        assert!(is_valid_path("crate::db"));
        assert!(is_valid_path("super::super::db"));
        assert!(is_valid_path("self::runtime"));
        assert!(is_valid_path("self::super::db"));
        assert!(!is_valid_path("crate::"));
        assert!(!is_valid_path(""));
    }

    #[test]
    fn test_is_valid_path_rejects_keywords() {
        assert!(!is_valid_path("type"));
        assert!(!is_valid_path("crate::mod"));
        assert!(!is_valid_path("db::crate"));
        assert!(!is_valid_path("crate::super"));
        assert!(!is_valid_path("db::super"));
        assert!(!is_valid_path("r#type"));
    }

    #[test]
    fn test_is_valid_module_name() {
        assert!(is_valid_module_name("accessors"));
        assert!(!is_valid_module_name("type"));
        assert!(!is_valid_module_name("self"));
        assert!(!is_valid_module_name("db::accessors"));
        assert!(!is_valid_module_name("not a module"));
    }
}
