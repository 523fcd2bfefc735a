//! Column whose per-row value is a record
//!
//! A [`ColumnGroup`] materializes a nested object field as a nested
//! [`Table`] sharing the parent's row count. Field access inside the group
//! resolves to the nested table's columns.

use std::ops::Range;

use serde_json::Value;

use super::error::ColumnError;
use crate::table::Table;

/// A column backed by a nested table with the parent's row count
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnGroup {
    name: String,
    table: Table,
}

impl ColumnGroup {
    /// Create a group column over a nested table
    pub fn new(name: impl Into<String>, table: Table) -> Self {
        Self {
            name: name.into(),
            table,
        }
    }

    /// Column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Row count, shared with the owning table
    pub fn len(&self) -> usize {
        self.table.nrow()
    }

    /// Whether the group has no rows
    pub fn is_empty(&self) -> bool {
        self.table.nrow() == 0
    }

    /// The nested table
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Gather rows by index, slicing the nested table
    pub fn take(&self, indices: &[usize]) -> Result<Self, ColumnError> {
        Ok(Self::new(self.name.clone(), self.table.take(indices)?))
    }

    /// Keep rows where the mask is true
    pub fn filter(&self, mask: &[bool]) -> Result<Self, ColumnError> {
        Ok(Self::new(self.name.clone(), self.table.filter(mask)?))
    }

    /// Contiguous sub-sequence of rows
    pub fn slice(&self, range: Range<usize>) -> Result<Self, ColumnError> {
        Ok(Self::new(self.name.clone(), self.table.slice(range)?))
    }

    /// Render one row of the group as a JSON object
    pub(crate) fn value_at(&self, index: usize) -> Result<Value, ColumnError> {
        if index >= self.table.nrow() {
            return Err(ColumnError::OutOfRange {
                index,
                size: self.table.nrow(),
            });
        }
        Ok(self.table.row_unchecked(index))
    }
}

impl std::fmt::Display for ColumnGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: group[{} columns]", self.name, self.table.ncol())
    }
}
