//! Column whose per-row value is an independent sub-table
//!
//! A [`FrameColumn`] holds one [`Table`] per row, each with its own row
//! count. A row whose source array was missing or empty holds an empty
//! table, never a null.

use std::ops::Range;

use serde_json::Value;

use super::error::ColumnError;
use crate::table::Table;

/// A column of independent sub-tables, one per row
#[derive(Debug, Clone, PartialEq)]
pub struct FrameColumn {
    name: String,
    frames: Vec<Table>,
}

impl FrameColumn {
    /// Create a frame column from per-row sub-tables
    pub fn new(name: impl Into<String>, frames: Vec<Table>) -> Self {
        Self {
            name: name.into(),
            frames,
        }
    }

    /// Column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Row count of the owning table
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the column has no rows
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// All per-row sub-tables
    pub fn frames(&self) -> &[Table] {
        &self.frames
    }

    /// The sub-table at a row position
    pub fn get(&self, index: usize) -> Result<&Table, ColumnError> {
        self.frames.get(index).ok_or(ColumnError::OutOfRange {
            index,
            size: self.frames.len(),
        })
    }

    /// Gather rows by index, in the given order
    pub fn take(&self, indices: &[usize]) -> Result<Self, ColumnError> {
        let mut gathered = Vec::with_capacity(indices.len());
        for &index in indices {
            gathered.push(self.get(index)?.clone());
        }
        Ok(Self::new(self.name.clone(), gathered))
    }

    /// Keep rows where the mask is true
    pub fn filter(&self, mask: &[bool]) -> Result<Self, ColumnError> {
        if mask.len() != self.frames.len() {
            return Err(ColumnError::MaskLengthMismatch {
                mask_len: mask.len(),
                size: self.frames.len(),
            });
        }
        let kept = self
            .frames
            .iter()
            .zip(mask)
            .filter(|&(_, &keep)| keep)
            .map(|(frame, _)| frame.clone())
            .collect();
        Ok(Self::new(self.name.clone(), kept))
    }

    /// Contiguous sub-sequence of rows
    pub fn slice(&self, range: Range<usize>) -> Result<Self, ColumnError> {
        if range.start > range.end || range.end > self.frames.len() {
            return Err(ColumnError::SliceOutOfRange {
                start: range.start,
                end: range.end,
                size: self.frames.len(),
            });
        }
        Ok(Self::new(self.name.clone(), self.frames[range].to_vec()))
    }

    /// Render one row as a JSON array of the sub-table's rows
    pub(crate) fn value_at(&self, index: usize) -> Result<Value, ColumnError> {
        let frame = self.get(index)?;
        let rows = (0..frame.nrow()).map(|i| frame.row_unchecked(i)).collect();
        Ok(Value::Array(rows))
    }
}

impl std::fmt::Display for FrameColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: frame[{} rows]", self.name, self.frames.len())
    }
}
