//! Error types for schema inference

use thiserror::Error;

use crate::column::ColumnError;

/// Errors that can occur during schema inference
///
/// Heterogeneous field shapes are never an error: inference degrades the
/// column type instead. Only structurally invalid input fails.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferError {
    /// A top-level record was neither an object nor null
    #[error("invalid record: expected object at top level, found {0}")]
    InvalidRecord(String),

    /// Maximum nesting depth exceeded
    #[error("maximum nesting depth exceeded: {depth} > {max}")]
    MaxDepthExceeded { depth: usize, max: usize },

    /// Column slicing failure while partitioning nested sub-tables
    #[error(transparent)]
    Column(#[from] ColumnError),
}
