//! Row data fetched from a table
//!
//! Rows keep the column order of the fetch query so that generated inserts
//! list fields the way the database returned them.

use crate::table::ColumnMetadata;
use serde::{Deserialize, Serialize};

// ============================================================================
// Value
// ============================================================================

/// A single cell value.
///
/// Every non-null value can be rendered as text; seeders do not distinguish
/// numbers from strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// SQL NULL
    Null,
    /// Boolean, rendered as `1` / `0`
    Boolean(bool),
    /// Integer
    Integer(i64),
    /// Floating point
    Float(f64),
    /// Text (and anything the driver handed back as text)
    Text(String),
}

impl Value {
    /// Text form of the value, or `None` when it seeds as null
    pub fn as_text(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Text(s) if s.is_empty() => None,
            Value::Text(s) => Some(s.clone()),
            Value::Boolean(b) => Some(if *b { "1" } else { "0" }.to_string()),
            Value::Integer(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

// ============================================================================
// Row
// ============================================================================

/// An ordered mapping from column name to value
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    cells: Vec<(String, Value)>,
}

impl Row {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cell
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(column, value);
        self
    }

    /// Append a cell
    pub fn push(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.cells.push((column.into(), value.into()));
    }

    /// Pair `values` with `columns` positionally.
    ///
    /// Extra values beyond the column list are dropped; missing values are
    /// treated as NULL.
    pub fn from_values(columns: &[ColumnMetadata], values: Vec<Value>) -> Self {
        let mut values = values.into_iter();
        let cells = columns
            .iter()
            .map(|c| (c.name.clone(), values.next().unwrap_or(Value::Null)))
            .collect();
        Self { cells }
    }

    /// Cells in fetch order
    pub fn cells(&self) -> &[(String, Value)] {
        &self.cells
    }

    /// Look up a value by column name
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, v)| v)
    }

    /// Values in cell order
    pub fn values(&self) -> Vec<Value> {
        self.cells.iter().map(|(_, v)| v.clone()).collect()
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the row has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
