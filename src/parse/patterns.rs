//! Date/time pattern candidates and ISO-8601 form classification

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// One candidate in the pattern registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// A chrono strftime format string, probed as date-time, date, then time
    Format(String),
    /// ISO-8601 date-time: offset-bearing values become absolute instants,
    /// zone-less values become local date-times
    Iso8601,
}

/// A successfully parsed temporal value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Temporal {
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    Instant(DateTime<Utc>),
}

/// The temporal kind a column resolves to; every value in one column must
/// resolve to the same kind under the adopted pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalKind {
    Date,
    Time,
    DateTime,
    Instant,
}

impl Temporal {
    pub fn kind(&self) -> TemporalKind {
        match self {
            Temporal::Date(_) => TemporalKind::Date,
            Temporal::Time(_) => TemporalKind::Time,
            Temporal::DateTime(_) => TemporalKind::DateTime,
            Temporal::Instant(_) => TemporalKind::Instant,
        }
    }
}

/// Built-in registry, in priority order: date-only, date-time, time-only,
/// then the ISO-8601 forms.
pub fn default_patterns() -> Vec<Pattern> {
    vec![
        Pattern::Format("%Y-%m-%d".to_string()),
        Pattern::Format("%Y-%m-%d %H:%M:%S".to_string()),
        Pattern::Format("%H:%M:%S".to_string()),
        Pattern::Iso8601,
    ]
}

// Lexical ISO-8601 forms. Offset-bearing and zone-less date-times are
// mutually exclusive branches of the ISO candidate.
static ISO_OFFSET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d+)?(Z|[+-]\d{2}:?\d{2})$").unwrap()
});

static ISO_LOCAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d+)?$").unwrap());

impl Pattern {
    /// Try to parse one trimmed value under this candidate
    pub fn try_parse(&self, value: &str) -> Option<Temporal> {
        match self {
            Pattern::Format(fmt) => try_format(fmt, value),
            Pattern::Iso8601 => try_iso8601(value),
        }
    }
}

/// Probe a strftime format as offset date-time, local date-time, date, then
/// time. The first representation the format can express wins.
fn try_format(fmt: &str, value: &str) -> Option<Temporal> {
    if let Ok(instant) = DateTime::parse_from_str(value, fmt) {
        return Some(Temporal::Instant(instant.with_timezone(&Utc)));
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, fmt) {
        return Some(Temporal::DateTime(datetime));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
        return Some(Temporal::Date(date));
    }
    if let Ok(time) = NaiveTime::parse_from_str(value, fmt) {
        return Some(Temporal::Time(time));
    }
    None
}

fn try_iso8601(value: &str) -> Option<Temporal> {
    if ISO_OFFSET_RE.is_match(value) {
        return DateTime::parse_from_rfc3339(value)
            .ok()
            .map(|instant| Temporal::Instant(instant.with_timezone(&Utc)));
    }
    if ISO_LOCAL_RE.is_match(value) {
        return value
            .parse::<NaiveDateTime>()
            .ok()
            .map(Temporal::DateTime);
    }
    None
}
