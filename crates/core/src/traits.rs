//! Core traits for dbgen
//!
//! This module defines the fundamental traits that components throughout
//! the generator implement to provide consistent behavior for validation,
//! persistence and script indentation.

use crate::error::{GenError, GenResult};
use serde::{Serialize, de::DeserializeOwned};

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can be validated
///
/// Types implementing this trait can check their internal consistency
/// and return validation errors if the state is invalid.
///
/// # Example
///
/// ```rust,ignore
/// use dbgen_core::{Validatable, GenResult, GenError};
///
/// struct Column {
///     name: String,
/// }
///
/// impl Validatable for Column {
///     fn validate(&self) -> GenResult<()> {
///         if self.name.is_empty() {
///             return Err(GenError::validation("Column name cannot be empty"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    /// Validate the current state of the object
    ///
    /// Returns `Ok(())` if valid, or a `GenError` describing the problem.
    fn validate(&self) -> GenResult<()>;
}

// ============================================================================
// Script Indentation
// ============================================================================

/// Indentation state passed to script emitters
#[derive(Debug, Clone)]
pub struct CodeGenContext {
    /// Indentation level
    pub indent_level: usize,
    /// Number of spaces per indent level
    pub spaces_per_indent: usize,
}

impl CodeGenContext {
    /// Create a new context at level zero with four-space indents
    pub fn new() -> Self {
        Self {
            indent_level: 0,
            spaces_per_indent: 4,
        }
    }

    /// Create a context at the given level
    pub fn at_level(indent_level: usize) -> Self {
        Self {
            indent_level,
            ..Self::new()
        }
    }

    /// Get the current indentation string
    pub fn indent(&self) -> String {
        " ".repeat(self.indent_level * self.spaces_per_indent)
    }

    /// Create a new context with increased indentation
    pub fn indented(&self) -> Self {
        Self {
            indent_level: self.indent_level + 1,
            ..self.clone()
        }
    }

    /// Indent `text` and terminate it with a newline
    pub fn line(&self, text: &str) -> String {
        format!("{}{}\n", self.indent(), text)
    }
}

impl Default for CodeGenContext {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Persistable Trait
// ============================================================================

/// Trait for types that can be serialized to and deserialized from files
///
/// Types implementing this trait can be saved to and loaded from JSON
/// documents on disk.
pub trait Persistable: Serialize + DeserializeOwned + Sized {
    /// Save to a JSON string
    fn to_json(&self) -> GenResult<String> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }

    /// Load from a JSON string
    fn from_json(json: &str) -> GenResult<Self> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Save to a file, creating parent directories as needed
    fn save_to_file(&self, path: &std::path::Path) -> GenResult<()> {
        let json = self.to_json()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| GenError::DirectoryCreate {
                    path: parent.to_path_buf(),
                    message: e.to_string(),
                })?;
            }
        }
        std::fs::write(path, json).map_err(|e| GenError::FileWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load from a file
    fn load_from_file(path: &std::path::Path) -> GenResult<Self> {
        if !path.exists() {
            return Err(GenError::SnapshotNotFound(path.to_path_buf()));
        }
        let json = std::fs::read_to_string(path).map_err(|e| GenError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }
}

// ============================================================================
// Tests
// ============================================================================
