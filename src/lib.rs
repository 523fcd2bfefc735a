//! Dataframe Core - column-oriented typed table engine
//!
//! Ingests semi-structured, schema-less record collections (parsed JSON
//! value trees) and produces a typed, nested table representation:
//!
//! - Schema inference over heterogeneous per-row shapes (scalars, nulls,
//!   nested objects, arrays of scalars, arrays of objects)
//! - Typed column containers with nullability tracking, memoized distinct
//!   sets, and variant-preserving slicing
//! - Nested tables via group columns (shared row count) and frame columns
//!   (independent sub-table per row)
//! - Temporal parsing of string columns with pattern discovery and a
//!   process-wide pattern registry
//!
//! All operations are in-memory and synchronous; I/O adapters that produce
//! the input value trees live outside this crate.

pub mod column;
pub mod infer;
pub mod parse;
pub mod schema;
pub mod table;

// Re-export commonly used types
pub use column::{
    Cell, Column, ColumnError, ColumnGroup, DistinctSet, FrameColumn, ScalarValue, TypedColumn,
};
pub use infer::{InferError, InferenceConfig, SchemaInferrer};
pub use parse::{ParseError, ParserOptions, TemporalParser};
pub use schema::{DataType, TypeDescriptor};
pub use table::{Table, TableError};
