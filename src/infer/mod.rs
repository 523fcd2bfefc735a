//! Schema inference for semi-structured records
//!
//! Turns a sequence of parsed JSON records into a typed [`crate::table::Table`]:
//!
//! - **Type widening** - mixed integer/float observations widen to float;
//!   incompatible kinds degrade to `any` instead of failing
//! - **Nested records** - object fields become group columns backed by a
//!   nested table with the parent row count
//! - **Arrays of records** - become frame columns, one independent
//!   sub-table per row
//! - **Nullability tracking** - absent fields and explicit nulls mark
//!   columns nullable
//!
//! Inference never fails on heterogeneous input; it only refines as far as
//! the data consistently allows.

mod config;
mod error;
mod inferrer;

pub use config::{InferenceConfig, InferenceConfigBuilder};
pub use error::InferError;
pub use inferrer::SchemaInferrer;
