//! Cell value abstraction for typed columns
//!
//! Every concrete column type stores cells implementing [`Cell`], which
//! supplies the hashable key used by the distinct set and the JSON rendering
//! used for row materialization. Floats key by bit pattern so the distinct
//! set stays lawful in the presence of NaN.

use std::hash::{Hash, Hasher};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use serde_json::Value;

/// A value that can occupy a typed column cell
pub trait Cell: Clone + PartialEq + std::fmt::Debug {
    /// Hashable key backing the distinct set
    type Key: Eq + Hash + std::fmt::Debug;

    /// Get the distinct-set key for this value
    fn key(&self) -> Self::Key;

    /// Render the value for row materialization
    fn to_json(&self) -> Value;
}

impl Cell for i64 {
    type Key = i64;

    fn key(&self) -> i64 {
        *self
    }

    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}

impl Cell for f64 {
    type Key = u64;

    fn key(&self) -> u64 {
        self.to_bits()
    }

    fn to_json(&self) -> Value {
        serde_json::Number::from_f64(*self)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

impl Cell for bool {
    type Key = bool;

    fn key(&self) -> bool {
        *self
    }

    fn to_json(&self) -> Value {
        Value::Bool(*self)
    }
}

impl Cell for String {
    type Key = String;

    fn key(&self) -> String {
        self.clone()
    }

    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }
}

impl Cell for NaiveDate {
    type Key = NaiveDate;

    fn key(&self) -> NaiveDate {
        *self
    }

    fn to_json(&self) -> Value {
        Value::String(self.format("%Y-%m-%d").to_string())
    }
}

impl Cell for NaiveTime {
    type Key = NaiveTime;

    fn key(&self) -> NaiveTime {
        *self
    }

    fn to_json(&self) -> Value {
        Value::String(self.format("%H:%M:%S%.f").to_string())
    }
}

impl Cell for NaiveDateTime {
    type Key = NaiveDateTime;

    fn key(&self) -> NaiveDateTime {
        *self
    }

    fn to_json(&self) -> Value {
        Value::String(self.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
    }
}

impl Cell for DateTime<Utc> {
    type Key = DateTime<Utc>;

    fn key(&self) -> DateTime<Utc> {
        *self
    }

    fn to_json(&self) -> Value {
        Value::String(self.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

/// Raw JSON values back `any`-typed columns; the canonical JSON text serves
/// as the distinct key since `serde_json::Value` is not hashable.
impl Cell for Value {
    type Key = String;

    fn key(&self) -> String {
        self.to_string()
    }

    fn to_json(&self) -> Value {
        self.clone()
    }
}

impl Cell for Vec<ScalarValue> {
    type Key = Vec<ScalarValue>;

    fn key(&self) -> Vec<ScalarValue> {
        self.clone()
    }

    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(ScalarValue::to_json).collect())
    }
}

/// A scalar element of a list column
#[derive(Debug, Clone)]
pub enum ScalarValue {
    /// Whole number
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Boolean
    Bool(bool),
    /// Text
    Str(String),
}

impl ScalarValue {
    /// Render the element for row materialization
    pub fn to_json(&self) -> Value {
        match self {
            ScalarValue::Int(i) => Value::from(*i),
            ScalarValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            ScalarValue::Bool(b) => Value::Bool(*b),
            ScalarValue::Str(s) => Value::String(s.clone()),
        }
    }
}

// Floats compare and hash by bit pattern so ScalarValue is lawfully Eq + Hash.
impl PartialEq for ScalarValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ScalarValue::Int(a), ScalarValue::Int(b)) => a == b,
            (ScalarValue::Float(a), ScalarValue::Float(b)) => a.to_bits() == b.to_bits(),
            (ScalarValue::Bool(a), ScalarValue::Bool(b)) => a == b,
            (ScalarValue::Str(a), ScalarValue::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for ScalarValue {}

impl Hash for ScalarValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            ScalarValue::Int(i) => {
                0u8.hash(state);
                i.hash(state);
            }
            ScalarValue::Float(f) => {
                1u8.hash(state);
                f.to_bits().hash(state);
            }
            ScalarValue::Bool(b) => {
                2u8.hash(state);
                b.hash(state);
            }
            ScalarValue::Str(s) => {
                3u8.hash(state);
                s.hash(state);
            }
        }
    }
}
