//! Schema inference engine
//!
//! Consumes parsed JSON value trees, one object per row, and unifies the
//! observed per-row shapes into a typed column structure. Field-shape
//! heterogeneity never fails inference: where no narrower type covers every
//! observation, the column degrades to `any` and stores raw values.

use std::collections::HashSet;

use serde_json::Value;
use tracing::{debug, trace};

use super::config::InferenceConfig;
use super::error::InferError;
use crate::column::{Column, ColumnGroup, FrameColumn, ScalarValue, TypedColumn};
use crate::schema::DataType;
use crate::table::Table;

/// Schema inference engine
///
/// Builds a [`Table`] from a sequence of record-like JSON values.
pub struct SchemaInferrer {
    config: InferenceConfig,
}

/// What a field held in one row: absent, or a value (possibly explicit null)
type FieldCell<'a> = Option<&'a Value>;

impl SchemaInferrer {
    /// Create an inferrer with default configuration
    pub fn new() -> Self {
        Self::with_config(InferenceConfig::default())
    }

    /// Create an inferrer with custom configuration
    pub fn with_config(config: InferenceConfig) -> Self {
        Self { config }
    }

    /// Infer a table from records, one per row.
    ///
    /// Records must be objects or null (a null record contributes a row in
    /// which every field is absent); any other top-level shape is an
    /// [`InferError::InvalidRecord`].
    pub fn infer_table(&self, records: &[Value]) -> Result<Table, InferError> {
        for record in records {
            if !record.is_object() && !record.is_null() {
                return Err(InferError::InvalidRecord(
                    value_type_name(record).to_string(),
                ));
            }
        }

        debug!(rows = records.len(), "inferring table schema");
        let columns = self.infer_columns(records, 0)?;
        Ok(Table::from_parts(columns, records.len()))
    }

    /// Infer one column per field path observed across the rows, in
    /// first-seen order.
    fn infer_columns(&self, rows: &[Value], depth: usize) -> Result<Vec<Column>, InferError> {
        if depth > self.config.max_depth {
            return Err(InferError::MaxDepthExceeded {
                depth,
                max: self.config.max_depth,
            });
        }

        let mut order: Vec<&str> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        for row in rows {
            if let Value::Object(map) = row {
                for key in map.keys() {
                    if seen.insert(key.as_str()) {
                        order.push(key.as_str());
                    }
                }
            }
        }

        let mut columns = Vec::with_capacity(order.len());
        for name in order {
            let cells: Vec<FieldCell> = rows
                .iter()
                .map(|row| match row {
                    Value::Object(map) => map.get(name),
                    _ => None,
                })
                .collect();
            let column = self.infer_column(name, &cells, depth)?;
            trace!(column = name, "inferred column");
            columns.push(column);
        }
        Ok(columns)
    }

    /// Infer a single column from the values observed at one field path
    fn infer_column(
        &self,
        name: &str,
        cells: &[FieldCell],
        depth: usize,
    ) -> Result<Column, InferError> {
        let mut scalar_kind = DataType::Nothing;
        let mut has_scalar = false;
        let mut has_object = false;
        let mut has_array = false;

        for cell in cells {
            match cell {
                None | Some(Value::Null) => {}
                Some(Value::Object(_)) => has_object = true,
                Some(Value::Array(_)) => has_array = true,
                Some(value) => {
                    has_scalar = true;
                    scalar_kind = scalar_kind.unify(scalar_kind_of(value));
                }
            }
        }

        match (has_object, has_array, has_scalar) {
            // All null or absent: unconstrained nullable column
            (false, false, false) => Ok(Column::Any(TypedColumn::new(
                name,
                DataType::Nothing,
                vec![None; cells.len()],
            ))),

            // Objects on every non-null row: nested table with parent row count
            (true, false, false) => self.infer_group(name, cells, depth),

            // Arrays on every non-null row: list column or per-row sub-tables
            (false, true, false) => self.infer_array(name, cells, depth),

            // Scalars only: widen across observed kinds
            (false, false, true) => Ok(build_scalar_column(name, cells, scalar_kind)),

            // Genuinely inconsistent shapes at one path: degrade, never fail
            _ => Ok(raw_any_column(name, cells)),
        }
    }

    fn infer_group(
        &self,
        name: &str,
        cells: &[FieldCell],
        depth: usize,
    ) -> Result<Column, InferError> {
        let sub_rows: Vec<Value> = cells
            .iter()
            .map(|cell| match cell {
                Some(value @ Value::Object(_)) => (*value).clone(),
                _ => Value::Null,
            })
            .collect();
        let columns = self.infer_columns(&sub_rows, depth + 1)?;
        let nested = Table::from_parts(columns, sub_rows.len());
        Ok(Column::Group(ColumnGroup::new(name, nested)))
    }

    fn infer_array(
        &self,
        name: &str,
        cells: &[FieldCell],
        depth: usize,
    ) -> Result<Column, InferError> {
        let mut elem_kind = DataType::Nothing;
        let mut has_object_elem = false;
        let mut has_other_elem = false;

        for cell in cells {
            if let Some(Value::Array(items)) = cell {
                for item in items {
                    match item {
                        Value::Object(_) => has_object_elem = true,
                        Value::Array(_) | Value::Null => has_other_elem = true,
                        value => elem_kind = elem_kind.unify(scalar_kind_of(value)),
                    }
                }
            }
        }

        if has_object_elem {
            if has_other_elem || elem_kind != DataType::Nothing {
                // Mixed element shapes resist both list and frame typing
                return Ok(raw_any_column(name, cells));
            }
            return self.infer_frame(name, cells, depth);
        }
        if has_other_elem {
            return Ok(raw_any_column(name, cells));
        }

        // Scalar elements, unified across all arrays at this path. An absent
        // field is a legitimate empty list; an explicit null stays null.
        let values = cells
            .iter()
            .map(|cell| match cell {
                None => Some(Vec::new()),
                Some(Value::Null) => None,
                Some(Value::Array(items)) => Some(
                    items
                        .iter()
                        .map(|item| scalar_value_as(item, &elem_kind))
                        .collect(),
                ),
                // Unreachable: classified as array-only above
                Some(_) => None,
            })
            .collect();
        Ok(Column::List(TypedColumn::new(
            name,
            DataType::List(Box::new(elem_kind)),
            values,
        )))
    }

    /// Infer element-object rows once over the flattened set, then
    /// re-partition the result back per original row by element count.
    fn infer_frame(
        &self,
        name: &str,
        cells: &[FieldCell],
        depth: usize,
    ) -> Result<Column, InferError> {
        let mut flattened: Vec<Value> = Vec::new();
        let mut counts: Vec<usize> = Vec::with_capacity(cells.len());
        for cell in cells {
            match cell {
                Some(Value::Array(items)) => {
                    flattened.extend(items.iter().cloned());
                    counts.push(items.len());
                }
                _ => counts.push(0),
            }
        }

        let columns = self.infer_columns(&flattened, depth + 1)?;
        let pooled = Table::from_parts(columns, flattened.len());

        let mut frames = Vec::with_capacity(counts.len());
        let mut offset = 0;
        for count in counts {
            frames.push(pooled.slice(offset..offset + count)?);
            offset += count;
        }
        Ok(Column::Frame(FrameColumn::new(name, frames)))
    }
}

impl Default for SchemaInferrer {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a scalar column of the widened kind
fn build_scalar_column(name: &str, cells: &[FieldCell], kind: DataType) -> Column {
    match kind {
        DataType::Integer => Column::Int(TypedColumn::new(
            name,
            DataType::Integer,
            cells
                .iter()
                .map(|cell| cell.and_then(Value::as_i64))
                .collect(),
        )),
        DataType::Float => Column::Float(TypedColumn::new(
            name,
            DataType::Float,
            cells
                .iter()
                .map(|cell| cell.and_then(Value::as_f64))
                .collect(),
        )),
        DataType::Boolean => Column::Bool(TypedColumn::new(
            name,
            DataType::Boolean,
            cells
                .iter()
                .map(|cell| cell.and_then(Value::as_bool))
                .collect(),
        )),
        DataType::String => Column::Str(TypedColumn::new(
            name,
            DataType::String,
            cells
                .iter()
                .map(|cell| cell.and_then(Value::as_str).map(str::to_string))
                .collect(),
        )),
        // Incompatible scalar mix: keep raw values under the broad type
        _ => raw_any_column(name, cells),
    }
}

/// Build an `any` column carrying raw values
fn raw_any_column(name: &str, cells: &[FieldCell]) -> Column {
    let values = cells
        .iter()
        .map(|cell| match cell {
            None | Some(Value::Null) => None,
            Some(value) => Some((*value).clone()),
        })
        .collect();
    Column::Any(TypedColumn::new(name, DataType::Any, values))
}

/// The data kind of a scalar JSON value
fn scalar_kind_of(value: &Value) -> DataType {
    match value {
        Value::Bool(_) => DataType::Boolean,
        Value::Number(n) => {
            if n.as_i64().is_some() {
                DataType::Integer
            } else {
                DataType::Float
            }
        }
        Value::String(_) => DataType::String,
        // Callers classify composites before reaching here
        _ => DataType::Any,
    }
}

/// Convert a scalar JSON value into a list element of the target kind
fn scalar_value_as(value: &Value, target: &DataType) -> ScalarValue {
    match value {
        Value::Bool(b) => ScalarValue::Bool(*b),
        Value::String(s) => ScalarValue::Str(s.clone()),
        Value::Number(n) => {
            if *target == DataType::Float {
                ScalarValue::Float(n.as_f64().unwrap_or(f64::NAN))
            } else if let Some(i) = n.as_i64() {
                ScalarValue::Int(i)
            } else {
                ScalarValue::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        other => ScalarValue::Str(other.to_string()),
    }
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
