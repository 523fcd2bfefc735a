//! Column data types and type widening

use serde::{Deserialize, Serialize};

/// The data type of a column or of a list element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataType {
    /// Whole numbers
    Integer,
    /// Floating point numbers
    Float,
    /// Booleans
    Boolean,
    /// Text
    String,
    /// Calendar date without time
    Date,
    /// Time of day without date
    Time,
    /// Zone-less date and time
    DateTime,
    /// Absolute point in time (offset-bearing)
    Instant,
    /// Homogeneous list with element type
    List(Box<DataType>),
    /// Heterogeneous values stored raw
    Any,
    /// All-null, type unconstrained
    Nothing,
}

impl DataType {
    /// Get the short type name
    pub fn type_name(&self) -> &'static str {
        match self {
            DataType::Integer => "integer",
            DataType::Float => "float",
            DataType::Boolean => "boolean",
            DataType::String => "string",
            DataType::Date => "date",
            DataType::Time => "time",
            DataType::DateTime => "date-time",
            DataType::Instant => "instant",
            DataType::List(_) => "list",
            DataType::Any => "any",
            DataType::Nothing => "nothing",
        }
    }

    /// Widen this type with another observed type.
    ///
    /// Widening never fails: kinds with no narrower common representation
    /// fall back to [`DataType::Any`].
    pub fn unify(self, other: DataType) -> DataType {
        if self == other {
            return self;
        }

        match (self, other) {
            // Nothing carries no constraint
            (DataType::Nothing, other) | (other, DataType::Nothing) => other,

            // Integer + Float = Float
            (DataType::Integer, DataType::Float) | (DataType::Float, DataType::Integer) => {
                DataType::Float
            }

            // Lists: widen element types
            (DataType::List(a), DataType::List(b)) => DataType::List(Box::new(a.unify(*b))),

            // No common narrower kind
            _ => DataType::Any,
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::List(elem) => write!(f, "list<{}>", elem),
            other => write!(f, "{}", other.type_name()),
        }
    }
}

/// A column's declared type: data kind plus nullability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDescriptor {
    /// The data kind
    pub kind: DataType,
    /// Whether the column holds at least one null
    pub nullable: bool,
}

impl TypeDescriptor {
    /// Create a new descriptor
    pub fn new(kind: DataType, nullable: bool) -> Self {
        Self { kind, nullable }
    }
}

impl std::fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.nullable {
            write!(f, "{}?", self.kind)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}
