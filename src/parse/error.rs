//! Error types for temporal parsing

use thiserror::Error;

/// Errors that can occur while parsing string columns to temporal columns
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A value did not parse under an explicitly supplied pattern
    #[error("value '{value}' does not match pattern '{pattern}'")]
    ValueFormat { value: String, pattern: String },

    /// No registered pattern parsed every value of the column
    #[error("no registered pattern matches value '{value}'")]
    NoMatchingPattern { value: String },

    /// The column holds no non-null values to infer a pattern from
    #[error("column '{column}' has no non-null values to parse")]
    EmptyColumn { column: String },
}
