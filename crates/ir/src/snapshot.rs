//! Schema snapshots
//!
//! A snapshot is the full result of introspecting a database (metadata and
//! rows) saved as JSON, so that generation can be replayed offline through
//! an [`InMemorySchema`].

use chrono::{DateTime, Utc};
use dbgen_core::{GenError, GenResult, Persistable, Validatable};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::reader::{InMemorySchema, SchemaReader};
use crate::row::{Row, Value};
use crate::table::TableMetadata;

// ============================================================================
// Constants
// ============================================================================

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

// ============================================================================
// Snapshot types
// ============================================================================

/// One table and its rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSnapshot {
    /// Table metadata
    pub table: TableMetadata,

    /// Row values aligned with `table.columns`
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
}

impl TableSnapshot {
    /// Rows as ordered column/value maps
    pub fn to_rows(&self) -> Vec<Row> {
        self.rows
            .iter()
            .map(|values| Row::from_values(&self.table.columns, values.clone()))
            .collect()
    }
}

/// A versioned snapshot document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotFile {
    /// Format version for compatibility checks
    pub format_version: u32,

    /// When the snapshot was captured
    pub captured_at: DateTime<Utc>,

    /// Source database name, when known
    #[serde(default)]
    pub database: Option<String>,

    /// Tables in catalog order
    pub tables: Vec<TableSnapshot>,
}

impl SnapshotFile {
    /// Create an empty snapshot stamped with the current time
    pub fn new(database: Option<String>) -> Self {
        Self {
            format_version: SNAPSHOT_VERSION,
            captured_at: Utc::now(),
            database,
            tables: Vec::new(),
        }
    }

    /// Introspect every table `reader` lists and for which `include` holds.
    pub async fn capture<R, F>(
        reader: &R,
        database: Option<String>,
        include: F,
    ) -> GenResult<Self>
    where
        R: SchemaReader + ?Sized,
        F: Fn(&str) -> bool,
    {
        let mut snapshot = Self::new(database);

        for name in reader.list_tables().await? {
            if !include(&name) {
                tracing::debug!(table = %name, "excluded from snapshot");
                continue;
            }

            let table = reader.load_table(&name).await?;
            let rows = reader
                .rows(&table)
                .await?
                .iter()
                .map(Row::values)
                .collect::<Vec<_>>();

            tracing::info!(table = %name, rows = rows.len(), "captured table");
            snapshot.tables.push(TableSnapshot { table, rows });
        }

        Ok(snapshot)
    }

    /// Total number of rows across tables
    pub fn row_count(&self) -> usize {
        self.tables.iter().map(|t| t.rows.len()).sum()
    }

    /// Turn the snapshot into a reader
    pub fn into_schema(self) -> InMemorySchema {
        let mut schema = InMemorySchema::new();
        for snapshot in self.tables {
            let rows = snapshot.to_rows();
            schema.add_table(snapshot.table, rows);
        }
        schema
    }

    /// Load and validate a snapshot from disk
    pub fn load(path: impl AsRef<Path>) -> GenResult<Self> {
        let path = path.as_ref();
        let snapshot = Self::load_from_file(path).map_err(|e| match e {
            GenError::JsonSerialization(je) => GenError::FileRead {
                path: path.to_path_buf(),
                message: format!("Invalid snapshot file format: {}", je),
            },
            other => other,
        })?;
        snapshot.validate()?;
        Ok(snapshot)
    }
}

impl Persistable for SnapshotFile {}

impl Validatable for SnapshotFile {
    fn validate(&self) -> GenResult<()> {
        if self.format_version != SNAPSHOT_VERSION {
            return Err(GenError::SnapshotVersionMismatch {
                expected: SNAPSHOT_VERSION,
                found: self.format_version,
            });
        }

        let mut names = HashSet::new();
        for snapshot in &self.tables {
            let table = &snapshot.table;
            table.validate()?;

            if !names.insert(table.name.as_str()) {
                return Err(GenError::InvalidSnapshotFormat(format!(
                    "table '{}' appears more than once",
                    table.name
                )));
            }

            if let Some(pos) = snapshot
                .rows
                .iter()
                .position(|r| r.len() > table.columns.len())
            {
                return Err(GenError::table_validation(
                    &table.name,
                    format!("row {} has more values than columns", pos),
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
    use tempfile::TempDir;

    fn users() -> TableMetadata {
        TableMetadata::new("users")
            .with_column("id", "int")
            .with_column("name", "varchar(50)")
            .with_primary_key("id")
    }

    fn schema() -> InMemorySchema {
        InMemorySchema::new()
            .with_table_rows(
                users(),
                vec![
                    Row::new().with("id", 1_i64).with("name", "Ada"),
                    Row::new().with("id", 2_i64).with("name", Value::Null),
                ],
            )
            .with_table(TableMetadata::new("jobs").with_column("id", "int"))
    }

    #[tokio::test]
    async fn test_capture_respects_include() {
        let snapshot = SnapshotFile::capture(&schema(), Some("shop".into()), |t| t != "jobs")
            .await
            .unwrap();
        assert_eq!(snapshot.tables.len(), 1);
        assert_eq!(snapshot.row_count(), 2);
        assert_eq!(snapshot.database.as_deref(), Some("shop"));
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snap").join("schema.json");

        let snapshot = SnapshotFile::capture(&schema(), None, |_| true).await.unwrap();
        snapshot.save_to_file(&path).unwrap();

        let loaded = SnapshotFile::load(&path).unwrap();
        assert_eq!(loaded.tables.len(), 2);

        let reader = loaded.into_schema();
        let table = reader.load_table("users").await.unwrap();
        let rows = reader.rows(&table).await.unwrap();
        assert_eq!(rows[0].get("name"), Some(&Value::from("Ada")));
        assert_eq!(rows[1].get("name"), Some(&Value::Null));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SnapshotFile::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, GenError::SnapshotNotFound(_)));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = SnapshotFile::load(&path).unwrap_err();
        assert!(matches!(err, GenError::FileRead { .. }));
    }

    #[test]
    fn test_validate_rejects_wide_rows() {
        let mut snapshot = SnapshotFile::new(None);
        snapshot.tables.push(TableSnapshot {
            table: users(),
            rows: vec![vec![Value::from(1_i64), Value::Null, Value::Null]],
        });
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_future_version() {
        let mut snapshot = SnapshotFile::new(None);
        snapshot.format_version = SNAPSHOT_VERSION + 1;
        assert!(matches!(
            snapshot.validate(),
            Err(GenError::SnapshotVersionMismatch { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_tables() {
        let mut snapshot = SnapshotFile::new(None);
        for _ in 0..2 {
            snapshot.tables.push(TableSnapshot {
                table: users(),
                rows: Vec::new(),
            });
        }
        assert!(snapshot.validate().is_err());
    }
}
