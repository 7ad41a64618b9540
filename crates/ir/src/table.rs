//! Table metadata read from the live schema catalog
//!
//! A [`TableMetadata`] is built once per table at the start of a run and is
//! not mutated afterwards. Columns keep the order the catalog reports them in.

use dbgen_core::{GenError, GenResult, PortableType, Validatable};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ============================================================================
// ColumnMetadata
// ============================================================================

/// A single column as reported by the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMetadata {
    /// Column name
    pub name: String,

    /// Native type string including decorations, e.g. `varchar(255)`
    pub native_type: String,
}

impl ColumnMetadata {
    /// Create a new column
    pub fn new(name: impl Into<String>, native_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            native_type: native_type.into(),
        }
    }

    /// The portable type this column maps to
    pub fn portable_type(&self) -> PortableType {
        PortableType::from_native(&self.native_type)
    }
}

// ============================================================================
// ForeignKeyMetadata
// ============================================================================

/// A foreign-key relationship from one column to a column of another table.
///
/// The referenced table is guaranteed to exist by the database itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyMetadata {
    /// Referencing column in the owning table
    pub column: String,

    /// Referenced table
    pub references_table: String,

    /// Referenced column
    pub references_column: String,
}

impl ForeignKeyMetadata {
    /// Create a new foreign key
    pub fn new(
        column: impl Into<String>,
        references_table: impl Into<String>,
        references_column: impl Into<String>,
    ) -> Self {
        Self {
            column: column.into(),
            references_table: references_table.into(),
            references_column: references_column.into(),
        }
    }
}

// ============================================================================
// TableMetadata
// ============================================================================

/// Everything the generator needs to know about one table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMetadata {
    /// Table name, unique within a run
    pub name: String,

    /// Columns in catalog order
    pub columns: Vec<ColumnMetadata>,

    /// Primary key column, if the table has one
    #[serde(default)]
    pub primary_key: Option<String>,

    /// Outgoing foreign keys
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeyMetadata>,
}

impl TableMetadata {
    /// Create an empty table
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            primary_key: None,
            foreign_keys: Vec::new(),
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Append a column
    pub fn with_column(mut self, name: impl Into<String>, native_type: impl Into<String>) -> Self {
        self.columns.push(ColumnMetadata::new(name, native_type));
        self
    }

    /// Set the primary key column
    pub fn with_primary_key(mut self, column: impl Into<String>) -> Self {
        self.primary_key = Some(column.into());
        self
    }

    /// Append a foreign key
    pub fn with_foreign_key(
        mut self,
        column: impl Into<String>,
        references_table: impl Into<String>,
        references_column: impl Into<String>,
    ) -> Self {
        self.foreign_keys.push(ForeignKeyMetadata::new(
            column,
            references_table,
            references_column,
        ));
        self
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Get a column by name
    pub fn column(&self, name: &str) -> Option<&ColumnMetadata> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Whether `column` is the primary key
    pub fn is_primary_key(&self, column: &str) -> bool {
        self.primary_key.as_deref() == Some(column)
    }

    /// Whether `column` takes part in a foreign key
    pub fn is_foreign_key(&self, column: &str) -> bool {
        self.foreign_keys.iter().any(|fk| fk.column == column)
    }

    /// Whether the table has any foreign keys
    pub fn has_foreign_keys(&self) -> bool {
        !self.foreign_keys.is_empty()
    }

    /// Columns that are neither the primary key nor a foreign-key column
    pub fn plain_columns(&self) -> impl Iterator<Item = &ColumnMetadata> {
        self.columns
            .iter()
            .filter(|c| !self.is_primary_key(&c.name) && !self.is_foreign_key(&c.name))
    }
}

impl Validatable for TableMetadata {
    fn validate(&self) -> GenResult<()> {
        if self.name.trim().is_empty() {
            return Err(GenError::validation("Table name cannot be empty"));
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if column.name.is_empty() {
                return Err(GenError::table_validation(
                    &self.name,
                    "column with an empty name",
                ));
            }
            if !seen.insert(column.name.as_str()) {
                return Err(GenError::table_validation(
                    &self.name,
                    format!("duplicate column '{}'", column.name),
                ));
            }
        }

        if let Some(pk) = &self.primary_key {
            if self.column(pk).is_none() {
                return Err(GenError::table_validation(
                    &self.name,
                    format!("primary key '{}' is not a column", pk),
                ));
            }
        }

        for fk in &self.foreign_keys {
            if self.column(&fk.column).is_none() {
                return Err(GenError::table_validation(
                    &self.name,
                    format!("foreign key column '{}' is not a column", fk.column),
                ));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn orders() -> TableMetadata {
        TableMetadata::new("orders")
            .with_column("id", "bigint(20) unsigned")
            .with_column("user_id", "int(11)")
            .with_column("total", "decimal(10,2)")
            .with_primary_key("id")
            .with_foreign_key("user_id", "users", "id")
    }

    #[test]
    fn test_plain_columns_skip_pk_and_fk() {
        let table = orders();
        let plain: Vec<_> = table.plain_columns().map(|c| c.name.as_str()).collect();
        assert_eq!(plain, vec!["total"]);
    }

    #[test]
    fn test_key_predicates() {
        let table = orders();
        assert!(table.is_primary_key("id"));
        assert!(!table.is_primary_key("total"));
        assert!(table.is_foreign_key("user_id"));
        assert!(table.has_foreign_keys());
    }

    #[test]
    fn test_column_portable_type() {
        let table = orders();
        assert_eq!(
            table.column("total").map(|c| c.portable_type()),
            Some(PortableType::Decimal)
        );
    }

    #[test]
    fn test_validation_accepts_consistent_table() {
        assert!(orders().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_unknown_primary_key() {
        let table = TableMetadata::new("users")
            .with_column("id", "int")
            .with_primary_key("uid");
        let err = table.validate().unwrap_err();
        assert!(err.to_string().contains("primary key 'uid'"));
    }

    #[test]
    fn test_validation_rejects_duplicate_columns() {
        let table = TableMetadata::new("users")
            .with_column("email", "varchar(255)")
            .with_column("email", "varchar(255)");
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_dangling_foreign_key_column() {
        let table = TableMetadata::new("orders")
            .with_column("id", "int")
            .with_foreign_key("user_id", "users", "id");
        assert!(table.validate().is_err());
    }
}
