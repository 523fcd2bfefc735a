//! Error types for column operations

use thiserror::Error;

/// Errors that can occur during column access and slicing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColumnError {
    /// Row index outside the column bounds
    #[error("index {index} out of range for column of {size} rows")]
    OutOfRange { index: usize, size: usize },

    /// Contiguous slice interval outside the column bounds
    #[error("slice {start}..{end} out of range for column of {size} rows")]
    SliceOutOfRange {
        start: usize,
        end: usize,
        size: usize,
    },

    /// Filter mask length does not match the column length
    #[error("mask of length {mask_len} applied to column of {size} rows")]
    MaskLengthMismatch { mask_len: usize, size: usize },
}
