//! Generic typed column storage
//!
//! A [`TypedColumn`] is the immutable, ordered container behind every scalar
//! table field. Nullability is always recomputed from the actual stored
//! values, so a column produced by slicing reports nulls accurately even when
//! its source claimed a non-nullable type.

use std::collections::HashSet;
use std::ops::Range;

use once_cell::sync::OnceCell;
use serde_json::Value;

use super::cell::Cell;
use super::error::ColumnError;
use crate::schema::{DataType, TypeDescriptor};

/// The memoized distinct set of a column
///
/// Keeps first-occurrence representatives alongside a key set so membership
/// checks stay amortized constant time. A null, when present, counts as one
/// distinct entry.
#[derive(Debug)]
pub struct DistinctSet<T: Cell> {
    values: Vec<T>,
    keys: HashSet<T::Key>,
    has_null: bool,
}

impl<T: Cell> DistinctSet<T> {
    fn build(values: &[Option<T>]) -> Self {
        let mut uniques = Vec::new();
        let mut keys = HashSet::new();
        let mut has_null = false;
        for value in values {
            match value {
                None => has_null = true,
                Some(v) => {
                    if keys.insert(v.key()) {
                        uniques.push(v.clone());
                    }
                }
            }
        }
        Self {
            values: uniques,
            keys,
            has_null,
        }
    }

    /// Number of distinct entries, counting null as one when present
    pub fn len(&self) -> usize {
        self.values.len() + usize::from(self.has_null)
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Membership test; `None` checks for null
    pub fn contains(&self, value: Option<&T>) -> bool {
        match value {
            None => self.has_null,
            Some(v) => self.keys.contains(&v.key()),
        }
    }

    /// Whether a null was observed
    pub fn has_null(&self) -> bool {
        self.has_null
    }

    /// First-occurrence representatives of the non-null distinct values
    pub fn values(&self) -> &[T] {
        &self.values
    }
}

/// An immutable, ordered, typed column of optional values
#[derive(Debug)]
pub struct TypedColumn<T: Cell> {
    name: String,
    dtype: TypeDescriptor,
    values: Vec<Option<T>>,
    distinct: OnceCell<DistinctSet<T>>,
}

impl<T: Cell> TypedColumn<T> {
    /// Create a column from a value list.
    ///
    /// The descriptor's nullability is derived from the values themselves:
    /// it is set exactly when at least one value is null.
    pub fn new(name: impl Into<String>, kind: DataType, values: Vec<Option<T>>) -> Self {
        let nullable = values.iter().any(Option::is_none);
        Self {
            name: name.into(),
            dtype: TypeDescriptor::new(kind, nullable),
            values,
            distinct: OnceCell::new(),
        }
    }

    /// Column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type
    pub fn data_type(&self) -> &TypeDescriptor {
        &self.dtype
    }

    /// Row count
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the column has no rows
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All values in row order
    pub fn values(&self) -> &[Option<T>] {
        &self.values
    }

    /// Value at a row position
    pub fn get(&self, index: usize) -> Result<Option<&T>, ColumnError> {
        self.values
            .get(index)
            .map(Option::as_ref)
            .ok_or(ColumnError::OutOfRange {
                index,
                size: self.values.len(),
            })
    }

    /// The distinct set, computed once from the immutable values.
    ///
    /// Population is idempotent; racing readers at worst recompute the same
    /// result and one copy wins.
    pub fn distinct(&self) -> &DistinctSet<T> {
        self.distinct
            .get_or_init(|| DistinctSet::build(&self.values))
    }

    /// Number of distinct values, always equal to `distinct().len()`
    pub fn ndistinct(&self) -> usize {
        self.distinct().len()
    }

    /// Membership test against the distinct set; `None` checks for null
    pub fn contains(&self, value: Option<&T>) -> bool {
        self.distinct().contains(value)
    }

    /// Gather rows by index, in the given order.
    ///
    /// Indices may repeat and need not be monotonic. Fails with
    /// [`ColumnError::OutOfRange`] on the first bad index.
    pub fn take(&self, indices: &[usize]) -> Result<Self, ColumnError> {
        let mut gathered = Vec::with_capacity(indices.len());
        for &index in indices {
            let value = self.values.get(index).ok_or(ColumnError::OutOfRange {
                index,
                size: self.values.len(),
            })?;
            gathered.push(value.clone());
        }
        Ok(self.rebuild(gathered))
    }

    /// Keep rows where the mask is true, preserving relative order.
    ///
    /// The mask must have exactly one entry per row.
    pub fn filter(&self, mask: &[bool]) -> Result<Self, ColumnError> {
        if mask.len() != self.values.len() {
            return Err(ColumnError::MaskLengthMismatch {
                mask_len: mask.len(),
                size: self.values.len(),
            });
        }
        let kept = self
            .values
            .iter()
            .zip(mask)
            .filter(|&(_, &keep)| keep)
            .map(|(value, _)| value.clone())
            .collect();
        Ok(self.rebuild(kept))
    }

    /// Contiguous half-open sub-sequence
    pub fn slice(&self, range: Range<usize>) -> Result<Self, ColumnError> {
        if range.start > range.end || range.end > self.values.len() {
            return Err(ColumnError::SliceOutOfRange {
                start: range.start,
                end: range.end,
                size: self.values.len(),
            });
        }
        Ok(self.rebuild(self.values[range].to_vec()))
    }

    /// Rebuild a column of the same kind from a new value list, recomputing
    /// nullability. This is the variant-preserving factory behind slicing.
    pub fn rebuild(&self, values: Vec<Option<T>>) -> Self {
        Self::new(self.name.clone(), self.dtype.kind.clone(), values)
    }

    /// Render the value at a row as JSON, for row materialization
    pub(crate) fn value_at(&self, index: usize) -> Result<Value, ColumnError> {
        Ok(self
            .get(index)?
            .map(Cell::to_json)
            .unwrap_or(Value::Null))
    }
}

// Structural equality over name, type, and values; the distinct cache never
// participates.
impl<T: Cell> PartialEq for TypedColumn<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.dtype == other.dtype && self.values == other.values
    }
}

impl<T: Cell> Clone for TypedColumn<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            dtype: self.dtype.clone(),
            values: self.values.clone(),
            distinct: OnceCell::new(),
        }
    }
}

impl<T: Cell> std::fmt::Display for TypedColumn<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.dtype)
    }
}
