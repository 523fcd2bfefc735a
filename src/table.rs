//! Table aggregate over columns
//!
//! A [`Table`] is a thin ordered collection of columns sharing one row
//! count. Construction enforces the shared-row-count and unique-name
//! invariants; everything else is lookup and row materialization.

use std::ops::Range;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::column::{Column, ColumnError};

/// Errors that can occur during table construction and lookup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// Columns disagree on row count
    #[error("column '{column}' has {found} rows, expected {expected}")]
    RowCountMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    /// Two columns share one name
    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),

    /// Name-based lookup miss
    #[error("column '{0}' not found")]
    ColumnNotFound(String),

    /// Row index outside the table bounds
    #[error("row {index} out of range for table of {nrow} rows")]
    RowOutOfRange { index: usize, nrow: usize },
}

/// An ordered collection of columns with a shared row count
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    nrow: usize,
}

impl Table {
    /// Create a table, validating that all columns agree on row count and
    /// that column names are unique.
    pub fn new(columns: Vec<Column>) -> Result<Self, TableError> {
        let nrow = columns.first().map(Column::len).unwrap_or(0);
        for column in &columns {
            if column.len() != nrow {
                return Err(TableError::RowCountMismatch {
                    column: column.name().to_string(),
                    expected: nrow,
                    found: column.len(),
                });
            }
        }
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.name() == column.name()) {
                return Err(TableError::DuplicateColumn(column.name().to_string()));
            }
        }
        Ok(Self { columns, nrow })
    }

    /// Build a table from columns already known to agree on row count
    pub(crate) fn from_parts(columns: Vec<Column>, nrow: usize) -> Self {
        debug_assert!(columns.iter().all(|c| c.len() == nrow));
        Self { columns, nrow }
    }

    /// Row count
    pub fn nrow(&self) -> usize {
        self.nrow
    }

    /// Column count
    pub fn ncol(&self) -> usize {
        self.columns.len()
    }

    /// All columns in order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by exact, case-sensitive name
    pub fn column(&self, name: &str) -> Result<&Column, TableError> {
        self.columns
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| TableError::ColumnNotFound(name.to_string()))
    }

    /// Look up a column by position
    pub fn column_at(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Materialize one row as a JSON object, recursing into nested tables
    pub fn row(&self, index: usize) -> Result<Value, TableError> {
        if index >= self.nrow {
            return Err(TableError::RowOutOfRange {
                index,
                nrow: self.nrow,
            });
        }
        Ok(self.row_unchecked(index))
    }

    pub(crate) fn row_unchecked(&self, index: usize) -> Value {
        let mut row = Map::new();
        for column in &self.columns {
            // index validated by the caller
            let value = column.value_at(index).unwrap_or(Value::Null);
            row.insert(column.name().to_string(), value);
        }
        Value::Object(row)
    }

    /// Gather rows by index across every column
    pub fn take(&self, indices: &[usize]) -> Result<Table, ColumnError> {
        let columns = self
            .columns
            .iter()
            .map(|c| c.take(indices))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Table::from_parts(columns, indices.len()))
    }

    /// Keep rows where the mask is true across every column
    pub fn filter(&self, mask: &[bool]) -> Result<Table, ColumnError> {
        let kept = mask.iter().filter(|&&keep| keep).count();
        let columns = self
            .columns
            .iter()
            .map(|c| c.filter(mask))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Table::from_parts(columns, kept))
    }

    /// Contiguous sub-sequence of rows across every column
    pub fn slice(&self, range: Range<usize>) -> Result<Table, ColumnError> {
        if range.start > range.end || range.end > self.nrow {
            return Err(ColumnError::SliceOutOfRange {
                start: range.start,
                end: range.end,
                size: self.nrow,
            });
        }
        let nrow = range.len();
        let columns = self
            .columns
            .iter()
            .map(|c| c.slice(range.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Table::from_parts(columns, nrow))
    }
}
