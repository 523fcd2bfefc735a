//! Temporal parsing of string columns
//!
//! A [`TemporalParser`] converts a string column into a typed temporal
//! column, either under an explicit pattern or by trying its pattern
//! registry in priority order. The parser is an explicit value so callers
//! can isolate registries; a process-wide default instance backs the
//! module-level convenience functions.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::ParseError;
use super::patterns::{Pattern, Temporal, TemporalKind, default_patterns};
use crate::column::{Column, TypedColumn};
use crate::schema::DataType;
use crate::table::Table;

/// Options recognized by a parse call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParserOptions {
    /// Explicit chrono strftime pattern; when present, registry inference is
    /// bypassed and every value must match this pattern
    pub date_time_pattern: Option<String>,
}

impl ParserOptions {
    /// Options forcing one explicit pattern
    pub fn with_pattern(pattern: impl Into<String>) -> Self {
        Self {
            date_time_pattern: Some(pattern.into()),
        }
    }
}

/// Converts string columns into typed temporal columns
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalParser {
    patterns: Vec<Pattern>,
}

impl TemporalParser {
    /// Create a parser with the built-in pattern registry
    pub fn new() -> Self {
        Self {
            patterns: default_patterns(),
        }
    }

    /// Prepend a custom pattern so it takes priority over the built-ins
    pub fn add_date_time_pattern(&mut self, pattern: impl Into<String>) {
        self.patterns.insert(0, Pattern::Format(pattern.into()));
    }

    /// Restore the built-in pattern registry
    pub fn reset_to_default(&mut self) {
        self.patterns = default_patterns();
    }

    /// Parse a string column into a temporal column.
    ///
    /// With an explicit pattern in `options` every non-null value must parse
    /// under it; otherwise the registry is tried in priority order and the
    /// first pattern under which all values parse is adopted for the whole
    /// column.
    pub fn parse_column(
        &self,
        column: &TypedColumn<String>,
        options: &ParserOptions,
    ) -> Result<Column, ParseError> {
        let trimmed: Vec<Option<&str>> = column
            .values()
            .iter()
            .map(|value| value.as_deref().map(str::trim))
            .collect();

        let first = trimmed.iter().flatten().next().copied().ok_or_else(|| {
            ParseError::EmptyColumn {
                column: column.name().to_string(),
            }
        })?;

        if let Some(pattern) = &options.date_time_pattern {
            let candidate = Pattern::Format(pattern.clone());
            return match parse_all(&candidate, &trimmed) {
                Some(parsed) => Ok(build_temporal_column(column.name(), parsed)),
                None => {
                    let offender = trimmed
                        .iter()
                        .flatten()
                        .find(|value| candidate.try_parse(value).is_none())
                        .copied()
                        .unwrap_or(first);
                    Err(ParseError::ValueFormat {
                        value: offender.to_string(),
                        pattern: pattern.clone(),
                    })
                }
            };
        }

        for candidate in &self.patterns {
            if let Some(parsed) = parse_all(candidate, &trimmed) {
                debug!(column = column.name(), pattern = ?candidate, "adopted pattern");
                return Ok(build_temporal_column(column.name(), parsed));
            }
        }
        Err(ParseError::NoMatchingPattern {
            value: first.to_string(),
        })
    }

    /// Sweep a table, promoting every string column that parses uniformly as
    /// integer, float, boolean, or temporal. Columns matching nothing stay
    /// strings; group and frame columns are swept recursively. Never errors
    /// for unparsable columns.
    pub fn parse_table(&self, table: &Table, options: &ParserOptions) -> Table {
        let columns = table
            .columns()
            .iter()
            .map(|column| match column {
                Column::Str(col) => self.promote_string_column(col, options),
                Column::Group(group) => Column::Group(crate::column::ColumnGroup::new(
                    group.name(),
                    self.parse_table(group.table(), options),
                )),
                Column::Frame(frame) => Column::Frame(crate::column::FrameColumn::new(
                    frame.name(),
                    frame
                        .frames()
                        .iter()
                        .map(|sub| self.parse_table(sub, options))
                        .collect(),
                )),
                other => other.clone(),
            })
            .collect();
        Table::from_parts(columns, table.nrow())
    }

    fn promote_string_column(
        &self,
        column: &TypedColumn<String>,
        options: &ParserOptions,
    ) -> Column {
        if let Some(promoted) = promote_numeric_or_bool(column) {
            return promoted;
        }
        match self.parse_column(column, options) {
            Ok(parsed) => parsed,
            Err(_) => Column::Str(column.clone()),
        }
    }
}

impl Default for TemporalParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse every non-null value under one candidate; all values must parse and
/// resolve to the same temporal kind, otherwise the candidate is rejected.
fn parse_all(candidate: &Pattern, values: &[Option<&str>]) -> Option<Vec<Option<Temporal>>> {
    let mut parsed = Vec::with_capacity(values.len());
    let mut kind: Option<TemporalKind> = None;
    for value in values {
        match value {
            None => parsed.push(None),
            Some(text) => {
                let temporal = candidate.try_parse(text)?;
                match kind {
                    None => kind = Some(temporal.kind()),
                    Some(k) if k == temporal.kind() => {}
                    Some(_) => return None,
                }
                parsed.push(Some(temporal));
            }
        }
    }
    Some(parsed)
}

fn build_temporal_column(name: &str, parsed: Vec<Option<Temporal>>) -> Column {
    // parse_all guarantees a uniform kind across all non-null values
    let kind = parsed
        .iter()
        .flatten()
        .next()
        .map(Temporal::kind)
        .unwrap_or(TemporalKind::DateTime);
    match kind {
        TemporalKind::Date => Column::Date(TypedColumn::new(
            name,
            DataType::Date,
            parsed
                .into_iter()
                .map(|t| match t {
                    Some(Temporal::Date(d)) => Some(d),
                    _ => None,
                })
                .collect(),
        )),
        TemporalKind::Time => Column::Time(TypedColumn::new(
            name,
            DataType::Time,
            parsed
                .into_iter()
                .map(|t| match t {
                    Some(Temporal::Time(t)) => Some(t),
                    _ => None,
                })
                .collect(),
        )),
        TemporalKind::DateTime => Column::DateTime(TypedColumn::new(
            name,
            DataType::DateTime,
            parsed
                .into_iter()
                .map(|t| match t {
                    Some(Temporal::DateTime(dt)) => Some(dt),
                    _ => None,
                })
                .collect(),
        )),
        TemporalKind::Instant => Column::Instant(TypedColumn::new(
            name,
            DataType::Instant,
            parsed
                .into_iter()
                .map(|t| match t {
                    Some(Temporal::Instant(i)) => Some(i),
                    _ => None,
                })
                .collect(),
        )),
    }
}

/// Try whole-column promotion to integer, float, or boolean
fn promote_numeric_or_bool(column: &TypedColumn<String>) -> Option<Column> {
    let trimmed: Vec<Option<&str>> = column
        .values()
        .iter()
        .map(|value| value.as_deref().map(str::trim))
        .collect();
    if trimmed.iter().flatten().next().is_none() {
        return None;
    }

    if trimmed
        .iter()
        .flatten()
        .all(|text| text.parse::<i64>().is_ok())
    {
        let values = trimmed
            .iter()
            .map(|value| value.and_then(|text| text.parse().ok()))
            .collect();
        return Some(Column::Int(TypedColumn::new(
            column.name(),
            DataType::Integer,
            values,
        )));
    }
    if trimmed
        .iter()
        .flatten()
        .all(|text| text.parse::<f64>().is_ok())
    {
        let values = trimmed
            .iter()
            .map(|value| value.and_then(|text| text.parse().ok()))
            .collect();
        return Some(Column::Float(TypedColumn::new(
            column.name(),
            DataType::Float,
            values,
        )));
    }
    if trimmed
        .iter()
        .flatten()
        .all(|text| matches!(*text, "true" | "false"))
    {
        let values = trimmed
            .iter()
            .map(|value| value.and_then(|text| text.parse().ok()))
            .collect();
        return Some(Column::Bool(TypedColumn::new(
            column.name(),
            DataType::Boolean,
            values,
        )));
    }
    None
}

// Process-wide default parser. Reads and writes are serialized by the lock;
// lock poisoning is absorbed so a panicking writer cannot wedge readers.
static DEFAULT_PARSER: Lazy<RwLock<TemporalParser>> =
    Lazy::new(|| RwLock::new(TemporalParser::new()));

fn read_default() -> RwLockReadGuard<'static, TemporalParser> {
    DEFAULT_PARSER
        .read()
        .unwrap_or_else(PoisonError::into_inner)
}

fn write_default() -> RwLockWriteGuard<'static, TemporalParser> {
    DEFAULT_PARSER
        .write()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Prepend a pattern to the process-wide registry
pub fn add_date_time_pattern(pattern: impl Into<String>) {
    write_default().add_date_time_pattern(pattern);
}

/// Restore the process-wide registry to the built-in pattern list
pub fn reset_to_default() {
    write_default().reset_to_default();
}

/// Parse a string column using the process-wide registry
pub fn parse_column(
    column: &TypedColumn<String>,
    options: &ParserOptions,
) -> Result<Column, ParseError> {
    read_default().parse_column(column, options)
}

/// Sweep a table using the process-wide registry
pub fn parse_table(table: &Table, options: &ParserOptions) -> Table {
    read_default().parse_table(table, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn str_column(name: &str, values: &[&str]) -> TypedColumn<String> {
        TypedColumn::new(
            name,
            DataType::String,
            values.iter().map(|v| Some(v.to_string())).collect(),
        )
    }

    #[test]
    fn test_explicit_pattern_date() {
        let parser = TemporalParser::new();
        let column = str_column("date", &["January 1, 2020"]);
        let parsed = parser
            .parse_column(&column, &ParserOptions::with_pattern("%B %e, %Y"))
            .unwrap();

        match parsed {
            Column::Date(col) => {
                let date = col.get(0).unwrap().unwrap();
                assert_eq!((date.year(), date.month(), date.day()), (2020, 1, 1));
            }
            other => panic!("expected date column, got {}", other),
        }
    }

    #[test]
    fn test_explicit_pattern_failure_is_hard_error() {
        let parser = TemporalParser::new();
        let column = str_column("date", &["January 1, 2020", "garbage"]);
        let err = parser
            .parse_column(&column, &ParserOptions::with_pattern("%B %e, %Y"))
            .unwrap_err();
        assert_eq!(
            err,
            ParseError::ValueFormat {
                value: "garbage".to_string(),
                pattern: "%B %e, %Y".to_string(),
            }
        );
    }

    #[test]
    fn test_registry_parses_trimmed_dates() {
        let parser = TemporalParser::new();
        let column = str_column("d", &[" 2020-01-06", "2020-01-07 "]);
        let parsed = parser.parse_column(&column, &ParserOptions::default()).unwrap();
        assert!(matches!(parsed, Column::Date(_)));
    }

    #[test]
    fn test_registry_exhaustion() {
        let parser = TemporalParser::new();
        let column = str_column("s", &["hello", "world"]);
        let err = parser
            .parse_column(&column, &ParserOptions::default())
            .unwrap_err();
        assert_eq!(
            err,
            ParseError::NoMatchingPattern {
                value: "hello".to_string()
            }
        );
    }

    #[test]
    fn test_added_pattern_then_reset() {
        let mut parser = TemporalParser::new();
        let column = str_column("date", &["January 1, 2020"]);

        assert!(
            parser
                .parse_column(&column, &ParserOptions::default())
                .is_err()
        );

        parser.add_date_time_pattern("%B %e, %Y");
        let parsed = parser
            .parse_column(&column, &ParserOptions::default())
            .unwrap();
        let explicit = parser
            .parse_column(&column, &ParserOptions::with_pattern("%B %e, %Y"))
            .unwrap();
        assert_eq!(parsed, explicit);

        parser.reset_to_default();
        let err = parser
            .parse_column(&column, &ParserOptions::default())
            .unwrap_err();
        assert!(matches!(err, ParseError::NoMatchingPattern { .. }));
    }

    #[test]
    fn test_iso_instant_vs_local() {
        let parser = TemporalParser::new();

        let offset = str_column("t", &["2022-01-23T04:29:40Z", "2022-01-23T04:29:40+01:00"]);
        let parsed = parser
            .parse_column(&offset, &ParserOptions::default())
            .unwrap();
        assert!(matches!(parsed, Column::Instant(_)));

        let local = str_column("t", &["2022-01-23T04:29:40"]);
        let parsed = parser
            .parse_column(&local, &ParserOptions::default())
            .unwrap();
        assert!(matches!(parsed, Column::DateTime(_)));
    }

    #[test]
    fn test_mixed_iso_branches_rejected() {
        let parser = TemporalParser::new();
        let column = str_column("t", &["2022-01-23T04:29:40Z", "2022-01-23T04:29:40"]);
        assert!(
            parser
                .parse_column(&column, &ParserOptions::default())
                .is_err()
        );
    }

    #[test]
    fn test_nulls_carried_through() {
        let parser = TemporalParser::new();
        let column: TypedColumn<String> = TypedColumn::new(
            "d",
            DataType::String,
            vec![Some("2020-01-06".to_string()), None],
        );
        let parsed = parser
            .parse_column(&column, &ParserOptions::default())
            .unwrap();
        match parsed {
            Column::Date(col) => {
                assert!(col.data_type().nullable);
                assert_eq!(col.get(1).unwrap(), None);
            }
            other => panic!("expected date column, got {}", other),
        }
    }

    #[test]
    fn test_all_null_column_is_empty_error() {
        let parser = TemporalParser::new();
        let column: TypedColumn<String> =
            TypedColumn::new("d", DataType::String, vec![None, None]);
        let err = parser
            .parse_column(&column, &ParserOptions::default())
            .unwrap_err();
        assert_eq!(
            err,
            ParseError::EmptyColumn {
                column: "d".to_string()
            }
        );
    }

    #[test]
    fn test_explicit_time_pattern() {
        let parser = TemporalParser::new();
        let column = str_column("t", &[" 13-05-30"]);
        let parsed = parser
            .parse_column(&column, &ParserOptions::with_pattern("%H-%M-%S"))
            .unwrap();
        match parsed {
            Column::Time(col) => {
                let time = col.get(0).unwrap().unwrap();
                assert_eq!(
                    (time.hour(), time.minute(), time.second()),
                    (13, 5, 30)
                );
            }
            other => panic!("expected time column, got {}", other),
        }
    }

    #[test]
    fn test_table_sweep_promotes_columns() {
        let table = Table::new(vec![
            Column::Str(str_column("a", &["1", "2"])),
            Column::Str(str_column("b", &["x", "y"])),
            Column::Str(str_column("c", &["2020-01-06", "2020-01-07"])),
        ])
        .unwrap();

        let parser = TemporalParser::new();
        let swept = parser.parse_table(&table, &ParserOptions::default());

        assert!(matches!(swept.column("a").unwrap(), Column::Int(_)));
        assert!(matches!(swept.column("b").unwrap(), Column::Str(_)));
        assert!(matches!(swept.column("c").unwrap(), Column::Date(_)));
    }
}
