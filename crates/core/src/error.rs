//! Error types for dbgen
//!
//! This module provides unified error handling across the generator,
//! including introspection failures, IO errors, serialization errors and
//! configuration problems.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for dbgen
#[derive(Debug, Error)]
pub enum GenError {
    // ========================================================================
    // Introspection Errors
    // ========================================================================
    /// A catalog or row query against the live database failed
    #[error("Introspection failed while {context}: {message}")]
    Introspection { context: String, message: String },

    /// Could not connect to the database
    #[error("Database connection failed: {0}")]
    Connection(String),

    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// General validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Table metadata is inconsistent
    #[error("Table validation failed for '{table}': {message}")]
    TableValidation { table: String, message: String },

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    /// Table not present in the schema snapshot
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// Snapshot file not found
    #[error("Snapshot not found at path: {0}")]
    SnapshotNotFound(PathBuf),

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    /// Directory creation failed
    #[error("Failed to create directory '{path}': {message}")]
    DirectoryCreate { path: PathBuf, message: String },

    // ========================================================================
    // Serialization Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// Invalid snapshot file format
    #[error("Invalid snapshot format: {0}")]
    InvalidSnapshotFormat(String),

    /// Snapshot version mismatch
    #[error("Snapshot version mismatch: expected {expected}, found {found}")]
    SnapshotVersionMismatch { expected: u32, found: u32 },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl GenError {
    /// Create an introspection error
    pub fn introspection(context: impl Into<String>, msg: impl ToString) -> Self {
        GenError::Introspection {
            context: context.into(),
            message: msg.to_string(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        GenError::Validation(msg.into())
    }

    /// Create a table validation error
    pub fn table_validation(table: impl Into<String>, msg: impl Into<String>) -> Self {
        GenError::TableValidation {
            table: table.into(),
            message: msg.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        GenError::InvalidConfig(msg.into())
    }

    /// Create an error with context
    pub fn with_context(context: impl Into<String>, msg: impl Into<String>) -> Self {
        GenError::WithContext {
            context: context.into(),
            message: msg.into(),
        }
    }

}

/// Result type alias using GenError
pub type GenResult<T> = Result<T, GenError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> GenResult<T>;
}

impl<T, E: Into<GenError>> ResultExt<T> for Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> GenResult<T> {
        self.map_err(|e| {
            let err: GenError = e.into();
            GenError::WithContext {
                context: context.into(),
                message: err.to_string(),
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
