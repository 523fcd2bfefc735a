//! Temporal parsing of string columns
//!
//! Discovers and reuses date/time patterns across ambiguous textual
//! formats. Parsing is all-or-nothing per column: a pattern is adopted only
//! when every non-null value parses under it.

mod error;
mod parser;
mod patterns;

pub use error::ParseError;
pub use parser::{
    ParserOptions, TemporalParser, add_date_time_pattern, parse_column, parse_table,
    reset_to_default,
};
pub use patterns::{Pattern, Temporal, TemporalKind};
