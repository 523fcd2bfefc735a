//! Column variants and shared column behavior
//!
//! The closed [`Column`] family covers every cell shape a table can hold:
//! scalar columns by kind, temporal columns produced by parsing, list
//! columns, raw `any` columns, nested-record groups, and per-row sub-table
//! frames. Slicing is variant-preserving: slicing an integer column yields
//! an integer column, never a generic one.

mod cell;
mod error;
mod frame;
mod group;
mod typed;

pub use cell::{Cell, ScalarValue};
pub use error::ColumnError;
pub use frame::FrameColumn;
pub use group::ColumnGroup;
pub use typed::{DistinctSet, TypedColumn};

use std::ops::Range;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::Value;

use crate::schema::TypeDescriptor;

/// A single table column
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Integer scalar column
    Int(TypedColumn<i64>),
    /// Float scalar column
    Float(TypedColumn<f64>),
    /// Boolean scalar column
    Bool(TypedColumn<bool>),
    /// String scalar column
    Str(TypedColumn<String>),
    /// Calendar date column
    Date(TypedColumn<NaiveDate>),
    /// Time-of-day column
    Time(TypedColumn<NaiveTime>),
    /// Zone-less date-time column
    DateTime(TypedColumn<NaiveDateTime>),
    /// Absolute instant column
    Instant(TypedColumn<chrono::DateTime<Utc>>),
    /// List column; the element type lives in the descriptor
    List(TypedColumn<Vec<ScalarValue>>),
    /// Raw-value column for shapes that resisted narrowing
    Any(TypedColumn<Value>),
    /// Nested record column sharing the parent row count
    Group(ColumnGroup),
    /// Per-row sub-table column
    Frame(FrameColumn),
}

/// Delegate to the inner column without rewrapping
macro_rules! on_inner {
    ($self:expr, $col:ident => $e:expr) => {
        match $self {
            Column::Int($col) => $e,
            Column::Float($col) => $e,
            Column::Bool($col) => $e,
            Column::Str($col) => $e,
            Column::Date($col) => $e,
            Column::Time($col) => $e,
            Column::DateTime($col) => $e,
            Column::Instant($col) => $e,
            Column::List($col) => $e,
            Column::Any($col) => $e,
            Column::Group($col) => $e,
            Column::Frame($col) => $e,
        }
    };
}

/// Delegate to the inner column, rewrapping into the same variant
macro_rules! rebuild_same {
    ($self:expr, $col:ident => $e:expr) => {
        match $self {
            Column::Int($col) => Column::Int($e),
            Column::Float($col) => Column::Float($e),
            Column::Bool($col) => Column::Bool($e),
            Column::Str($col) => Column::Str($e),
            Column::Date($col) => Column::Date($e),
            Column::Time($col) => Column::Time($e),
            Column::DateTime($col) => Column::DateTime($e),
            Column::Instant($col) => Column::Instant($e),
            Column::List($col) => Column::List($e),
            Column::Any($col) => Column::Any($e),
            Column::Group($col) => Column::Group($e),
            Column::Frame($col) => Column::Frame($e),
        }
    };
}

impl Column {
    /// Column name
    pub fn name(&self) -> &str {
        on_inner!(self, c => c.name())
    }

    /// Row count
    pub fn len(&self) -> usize {
        on_inner!(self, c => c.len())
    }

    /// Whether the column has no rows
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Declared type for scalar, temporal, list, and any columns.
    ///
    /// Group and frame columns carry table structure instead of a scalar
    /// descriptor and return `None`.
    pub fn data_type(&self) -> Option<&TypeDescriptor> {
        match self {
            Column::Int(c) => Some(c.data_type()),
            Column::Float(c) => Some(c.data_type()),
            Column::Bool(c) => Some(c.data_type()),
            Column::Str(c) => Some(c.data_type()),
            Column::Date(c) => Some(c.data_type()),
            Column::Time(c) => Some(c.data_type()),
            Column::DateTime(c) => Some(c.data_type()),
            Column::Instant(c) => Some(c.data_type()),
            Column::List(c) => Some(c.data_type()),
            Column::Any(c) => Some(c.data_type()),
            Column::Group(_) | Column::Frame(_) => None,
        }
    }

    /// Gather rows by index, preserving the column variant
    pub fn take(&self, indices: &[usize]) -> Result<Column, ColumnError> {
        Ok(rebuild_same!(self, c => c.take(indices)?))
    }

    /// Keep rows where the mask is true, preserving the column variant
    pub fn filter(&self, mask: &[bool]) -> Result<Column, ColumnError> {
        Ok(rebuild_same!(self, c => c.filter(mask)?))
    }

    /// Contiguous sub-sequence of rows, preserving the column variant
    pub fn slice(&self, range: Range<usize>) -> Result<Column, ColumnError> {
        Ok(rebuild_same!(self, c => c.slice(range.clone())?))
    }

    /// Render one cell as JSON, recursing into nested tables
    pub(crate) fn value_at(&self, index: usize) -> Result<Value, ColumnError> {
        on_inner!(self, c => c.value_at(index))
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        on_inner!(self, c => write!(f, "{}", c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DataType;

    #[test]
    fn test_variant_preserving_take() {
        let col = Column::Int(TypedColumn::new(
            "n",
            DataType::Integer,
            vec![Some(1), Some(2), None],
        ));
        let taken = col.take(&[2, 0]).unwrap();
        match &taken {
            Column::Int(inner) => {
                assert_eq!(inner.values(), &[None, Some(1)]);
                assert!(inner.data_type().nullable);
            }
            other => panic!("expected integer column, got {}", other),
        }
    }

    #[test]
    fn test_variant_preserving_filter() {
        let col = Column::Str(TypedColumn::new(
            "s",
            DataType::String,
            vec![Some("a".to_string()), None, Some("c".to_string())],
        ));
        let kept = col.filter(&[true, false, true]).unwrap();
        match &kept {
            Column::Str(inner) => {
                assert!(!inner.data_type().nullable);
                assert_eq!(inner.len(), 2);
            }
            other => panic!("expected string column, got {}", other),
        }
    }

    #[test]
    fn test_value_at_renders_null() {
        let col = Column::Float(TypedColumn::new("x", DataType::Float, vec![Some(1.5), None]));
        assert_eq!(col.value_at(0).unwrap(), serde_json::json!(1.5));
        assert_eq!(col.value_at(1).unwrap(), Value::Null);
    }
}
