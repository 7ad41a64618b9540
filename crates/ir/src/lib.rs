//! # dbgen IR (Intermediate Representation)
//!
//! This crate provides the in-memory model of a database schema snapshot:
//! the tables, columns and foreign keys read from the catalog, the rows read
//! from each table, and the [`SchemaReader`] seam through which they are
//! obtained.
//!
//! ## Core Concepts
//!
//! - **TableMetadata**: One table with its ordered columns, primary key and foreign keys
//! - **Row / Value**: Ordered column → value mappings fetched from a table
//! - **SchemaReader**: Async catalog and row queries against a database
//! - **SnapshotFile**: A saved, versioned copy of the whole schema and its rows
//!

// Module declarations
pub mod reader;
pub mod row;
pub mod snapshot;
pub mod table;

// Re-export commonly used types at crate root
pub use reader::{InMemorySchema, SchemaReader};
pub use row::{Row, Value};
pub use snapshot::{SNAPSHOT_VERSION, SnapshotFile, TableSnapshot};
pub use table::{ColumnMetadata, ForeignKeyMetadata, TableMetadata};

// Re-export core types that are commonly used with IR
pub use dbgen_core::{GenError, GenResult, PortableType};
