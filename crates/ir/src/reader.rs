//! The schema reader seam
//!
//! [`SchemaReader`] is the only capability the generator needs from a
//! database: catalog queries plus a row fetch per table. The MySQL
//! implementation lives in the CLI crate; [`InMemorySchema`] serves
//! snapshots and tests.

use async_trait::async_trait;
use dbgen_core::{GenError, GenResult};
use std::collections::HashMap;

use crate::row::Row;
use crate::table::{ColumnMetadata, ForeignKeyMetadata, TableMetadata};

/// Read-only access to a schema catalog and its table contents.
///
/// Every method is attempted exactly once per call; failures are surfaced
/// to the caller unchanged and are fatal for a generation run.
#[async_trait]
pub trait SchemaReader: Send + Sync {
    /// All table names, in catalog order
    async fn list_tables(&self) -> GenResult<Vec<String>>;

    /// Columns of `table`, in ordinal order
    async fn columns(&self, table: &str) -> GenResult<Vec<ColumnMetadata>>;

    /// Primary key column of `table`, if any
    async fn primary_key(&self, table: &str) -> GenResult<Option<String>>;

    /// Outgoing foreign keys of `table`
    async fn foreign_keys(&self, table: &str) -> GenResult<Vec<ForeignKeyMetadata>>;

    /// Every row of `table`, in the order the database returns them
    async fn rows(&self, table: &TableMetadata) -> GenResult<Vec<Row>>;

    /// Load the full metadata for one table in a single pass.
    ///
    /// This is a template method built on the individual catalog queries.
    async fn load_table(&self, name: &str) -> GenResult<TableMetadata> {
        let columns = self.columns(name).await?;
        let primary_key = self.primary_key(name).await?;
        let foreign_keys = self.foreign_keys(name).await?;

        Ok(TableMetadata {
            name: name.to_string(),
            columns,
            primary_key,
            foreign_keys,
        })
    }
}

// ============================================================================
// InMemorySchema
// ============================================================================

/// A [`SchemaReader`] over tables and rows held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySchema {
    tables: Vec<TableMetadata>,
    rows: HashMap<String, Vec<Row>>,
}

impl InMemorySchema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table with no rows
    pub fn with_table(mut self, table: TableMetadata) -> Self {
        self.add_table(table, Vec::new());
        self
    }

    /// Add a table with rows
    pub fn with_table_rows(mut self, table: TableMetadata, rows: Vec<Row>) -> Self {
        self.add_table(table, rows);
        self
    }

    /// Add or replace a table
    pub fn add_table(&mut self, table: TableMetadata, rows: Vec<Row>) {
        self.rows.insert(table.name.clone(), rows);
        if let Some(existing) = self.tables.iter_mut().find(|t| t.name == table.name) {
            *existing = table;
        } else {
            self.tables.push(table);
        }
    }

    /// Tables in insertion order
    pub fn tables(&self) -> &[TableMetadata] {
        &self.tables
    }

    /// Rows stored for `table`
    pub fn rows_of(&self, table: &str) -> &[Row] {
        self.rows.get(table).map(Vec::as_slice).unwrap_or_default()
    }

    fn table(&self, name: &str) -> GenResult<&TableMetadata> {
        self.tables
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| GenError::TableNotFound(name.to_string()))
    }
}

#[async_trait]
impl SchemaReader for InMemorySchema {
    async fn list_tables(&self) -> GenResult<Vec<String>> {
        Ok(self.tables.iter().map(|t| t.name.clone()).collect())
    }

    async fn columns(&self, table: &str) -> GenResult<Vec<ColumnMetadata>> {
        Ok(self.table(table)?.columns.clone())
    }

    async fn primary_key(&self, table: &str) -> GenResult<Option<String>> {
        Ok(self.table(table)?.primary_key.clone())
    }

    async fn foreign_keys(&self, table: &str) -> GenResult<Vec<ForeignKeyMetadata>> {
        Ok(self.table(table)?.foreign_keys.clone())
    }

    async fn rows(&self, table: &TableMetadata) -> GenResult<Vec<Row>> {
        self.table(&table.name)?;
        Ok(self.rows_of(&table.name).to_vec())
    }

    async fn load_table(&self, name: &str) -> GenResult<TableMetadata> {
        self.table(name).cloned()
    }
}

// ============================================================================
// Tests
// ============================================================================
