//! Core type definitions for dbgen
//!
//! This module holds the portable column-type vocabulary that native database
//! types are mapped into, along with the mapping itself.

use serde::{Deserialize, Serialize};

// ============================================================================
// Portable Types
// ============================================================================

/// Dialect-independent column types emitted into migrations.
///
/// Length, precision and scale are deliberately not carried: `varchar(64)`
/// and `varchar(255)` both become [`PortableType::String`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortableType {
    /// 32-bit integer family (`int`, `smallint`, `mediumint`)
    Integer,
    /// 64-bit integer (`bigint`)
    BigInteger,
    /// Boolean (`tinyint`)
    Boolean,
    /// Short string (`varchar`, `char`, `enum`, and every unmapped type)
    String,
    /// Long-form text (`text`, `mediumtext`, `longtext`)
    Text,
    /// Date without time
    Date,
    /// Date and time
    DateTime,
    /// Timestamp
    Timestamp,
    /// Fixed-point decimal
    Decimal,
    /// Single precision float
    Float,
    /// Double precision float
    Double,
}

impl PortableType {
    /// Map a native column type string (as reported by the database) to a
    /// portable type.
    ///
    /// Only the base token is considered: everything from the first `(` or
    /// whitespace onward is ignored, so `decimal(10,2)` and
    /// `int(11) unsigned` resolve by `decimal` and `int`. Matching is
    /// case-insensitive. Unknown base types fall back to
    /// [`PortableType::String`]; this function never fails.
    pub fn from_native(native: &str) -> Self {
        let base = base_type_name(native);

        match base.as_str() {
            "int" | "smallint" | "mediumint" => PortableType::Integer,
            "tinyint" => PortableType::Boolean,
            "bigint" => PortableType::BigInteger,
            "varchar" | "char" => PortableType::String,
            "text" | "mediumtext" | "longtext" => PortableType::Text,
            "date" => PortableType::Date,
            "datetime" => PortableType::DateTime,
            "timestamp" => PortableType::Timestamp,
            "decimal" => PortableType::Decimal,
            "float" => PortableType::Float,
            "double" => PortableType::Double,
            "enum" => PortableType::String,
            _ => PortableType::fallback(),
        }
    }

    /// The type used for any native type without an explicit mapping
    pub const fn fallback() -> Self {
        PortableType::String
    }

    /// Schema builder method name for this type (`$table-><method>('col')`)
    pub fn blueprint_method(&self) -> &'static str {
        match self {
            PortableType::Integer => "integer",
            PortableType::BigInteger => "bigInteger",
            PortableType::Boolean => "boolean",
            PortableType::String => "string",
            PortableType::Text => "text",
            PortableType::Date => "date",
            PortableType::DateTime => "dateTime",
            PortableType::Timestamp => "timestamp",
            PortableType::Decimal => "decimal",
            PortableType::Float => "float",
            PortableType::Double => "double",
        }
    }
}

impl Default for PortableType {
    fn default() -> Self {
        PortableType::fallback()
    }
}

/// Extract the lower-cased base type token of a native type string.
///
/// `"VARCHAR(255)"` → `"varchar"`, `"int unsigned"` → `"int"`, `""` → `""`.
pub fn base_type_name(native: &str) -> String {
    native
        .trim()
        .split(|c: char| c == '(' || c.is_whitespace())
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_base_type_name() {
        assert_eq!(base_type_name("varchar(255)"), "varchar");
        assert_eq!(base_type_name("DECIMAL(10,2)"), "decimal");
        assert_eq!(base_type_name("int(10) unsigned"), "int");
        assert_eq!(base_type_name("bigint unsigned"), "bigint");
        assert_eq!(base_type_name("  text "), "text");
        assert_eq!(base_type_name(""), "");
    }

    #[test]
    fn test_integer_types() {
        assert_eq!(PortableType::from_native("int(11)"), PortableType::Integer);
        assert_eq!(PortableType::from_native("smallint(6)"), PortableType::Integer);
        assert_eq!(PortableType::from_native("mediumint"), PortableType::Integer);
        assert_eq!(
            PortableType::from_native("bigint(20) unsigned"),
            PortableType::BigInteger
        );
        assert_eq!(PortableType::from_native("tinyint(1)"), PortableType::Boolean);
    }

    #[test]
    fn test_string_types() {
        assert_eq!(PortableType::from_native("varchar(255)"), PortableType::String);
        assert_eq!(PortableType::from_native("char(36)"), PortableType::String);
        assert_eq!(
            PortableType::from_native("enum('draft','published')"),
            PortableType::String
        );
        assert_eq!(PortableType::from_native("text"), PortableType::Text);
        assert_eq!(PortableType::from_native("mediumtext"), PortableType::Text);
        assert_eq!(PortableType::from_native("longtext"), PortableType::Text);
    }

    #[test]
    fn test_temporal_and_numeric_types() {
        assert_eq!(PortableType::from_native("date"), PortableType::Date);
        assert_eq!(PortableType::from_native("datetime"), PortableType::DateTime);
        assert_eq!(PortableType::from_native("timestamp"), PortableType::Timestamp);
        assert_eq!(PortableType::from_native("decimal(8,2)"), PortableType::Decimal);
        assert_eq!(PortableType::from_native("float"), PortableType::Float);
        assert_eq!(PortableType::from_native("double"), PortableType::Double);
    }

    #[test]
    fn test_unmapped_types_fall_back_to_string() {
        for native in ["json", "blob", "geometry", "time", "year", "set('a','b')", "", "(("] {
            assert_eq!(
                PortableType::from_native(native),
                PortableType::String,
                "{native} should fall back"
            );
        }
    }

    #[test]
    fn test_mapping_is_deterministic() {
        for native in ["int", "varchar(10)", "json", "DATETIME", "weird type"] {
            assert_eq!(
                PortableType::from_native(native),
                PortableType::from_native(native)
            );
        }
    }

    #[test]
    fn test_blueprint_methods() {
        assert_eq!(PortableType::BigInteger.blueprint_method(), "bigInteger");
        assert_eq!(PortableType::DateTime.blueprint_method(), "dateTime");
        assert_eq!(PortableType::String.blueprint_method(), "string");
    }

    #[test]
    fn test_default_is_fallback() {
        assert_eq!(PortableType::default(), PortableType::fallback());
    }
}
