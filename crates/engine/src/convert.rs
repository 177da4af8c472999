//! Row-oriented JSON documents ↔ Arrow columnar batches.
//!
//! Documents are coerced into a collection's fixed schema when loaded; any
//! type mismatch or missing required field is fatal. On the way out, result
//! batches are flattened back into independent JSON rows.

use chrono::{DateTime, SecondsFormat, Utc};
use datafusion::arrow::array::{
    Array, ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray,
    TimestampMicrosecondArray,
};
use datafusion::arrow::datatypes::{DataType, Field, SchemaRef, TimeUnit};
use datafusion::arrow::record_batch::RecordBatch;
use datafusion::error::DataFusionError;
use serde_json::{Map, Number, Value as JsonValue};
use std::sync::Arc;

use crate::error::EngineError;
use crate::schema::wire_name;

/// Coerce raw store documents into a record batch with the given schema.
pub fn documents_to_batch(
    collection: &str,
    schema: &SchemaRef,
    documents: &[JsonValue],
) -> Result<RecordBatch, EngineError> {
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len());
    for field in schema.fields() {
        columns.push(build_column(collection, field, documents)?);
    }

    let batch = RecordBatch::try_new(Arc::clone(schema), columns)
        .map_err(DataFusionError::from)?;
    Ok(batch)
}

/// Flatten result batches into independent JSON rows.
///
/// Null cells are omitted, matching how optional fields are absent in
/// stored documents.
pub fn batches_to_rows(batches: &[RecordBatch]) -> Result<Vec<JsonValue>, EngineError> {
    let mut rows = Vec::new();
    for batch in batches {
        let schema = batch.schema();
        for row_idx in 0..batch.num_rows() {
            let mut row = Map::new();
            for (col_idx, field) in schema.fields().iter().enumerate() {
                let column = batch.column(col_idx);
                if column.is_null(row_idx) {
                    continue;
                }
                let key = wire_name(field.name()).to_string();
                row.insert(key, cell_to_json(field, column, row_idx)?);
            }
            rows.push(JsonValue::Object(row));
        }
    }
    Ok(rows)
}

fn build_column(
    collection: &str,
    field: &Field,
    documents: &[JsonValue],
) -> Result<ArrayRef, EngineError> {
    // Documents spell fields in the store's wire names; errors report those.
    let name = wire_name(field.name());
    let mismatch = |expected: &str, got: &JsonValue| {
        EngineError::convert(
            collection,
            name,
            format!("expected {expected}, got {got}"),
        )
    };

    let mut cells: Vec<Option<&JsonValue>> = Vec::with_capacity(documents.len());
    for doc in documents {
        let obj = doc.as_object().ok_or_else(|| {
            EngineError::convert(collection, name, "document is not an object")
        })?;
        let value = obj.get(name).filter(|v| !v.is_null());
        if value.is_none() && !field.is_nullable() {
            return Err(EngineError::convert(collection, name, "required field is missing"));
        }
        cells.push(value);
    }

    let array: ArrayRef = match field.data_type() {
        DataType::Utf8 => {
            let values: Vec<Option<&str>> = cells
                .iter()
                .copied()
                .map(|cell| {
                    cell.map(|v| v.as_str().ok_or_else(|| mismatch("a string", v)))
                        .transpose()
                })
                .collect::<Result<_, _>>()?;
            Arc::new(StringArray::from(values))
        }
        DataType::Int64 => {
            let values: Vec<Option<i64>> = cells
                .iter()
                .copied()
                .map(|cell| {
                    cell.map(|v| v.as_i64().ok_or_else(|| mismatch("an integer", v)))
                        .transpose()
                })
                .collect::<Result<_, _>>()?;
            Arc::new(Int64Array::from(values))
        }
        DataType::Float64 => {
            let values: Vec<Option<f64>> = cells
                .iter()
                .copied()
                .map(|cell| {
                    cell.map(|v| v.as_f64().ok_or_else(|| mismatch("a number", v)))
                        .transpose()
                })
                .collect::<Result<_, _>>()?;
            Arc::new(Float64Array::from(values))
        }
        DataType::Boolean => {
            let values: Vec<Option<bool>> = cells
                .iter()
                .copied()
                .map(|cell| {
                    cell.map(|v| v.as_bool().ok_or_else(|| mismatch("a boolean", v)))
                        .transpose()
                })
                .collect::<Result<_, _>>()?;
            Arc::new(BooleanArray::from(values))
        }
        DataType::Timestamp(TimeUnit::Microsecond, None) => {
            let values: Vec<Option<i64>> = cells
                .iter()
                .copied()
                .map(|cell| {
                    cell.map(|v| {
                        let raw = v.as_str().ok_or_else(|| mismatch("an ISO-8601 string", v))?;
                        parse_timestamp_micros(collection, name, raw)
                    })
                    .transpose()
                })
                .collect::<Result<_, _>>()?;
            Arc::new(TimestampMicrosecondArray::from(values))
        }
        other => {
            return Err(EngineError::convert(
                collection,
                name,
                format!("unsupported column type {other}"),
            ));
        }
    };

    Ok(array)
}

fn parse_timestamp_micros(collection: &str, field: &str, raw: &str) -> Result<i64, EngineError> {
    let parsed = DateTime::parse_from_rfc3339(raw).map_err(|e| {
        EngineError::convert(collection, field, format!("unparseable timestamp {raw:?}: {e}"))
    })?;
    Ok(parsed.with_timezone(&Utc).timestamp_micros())
}

fn cell_to_json(field: &Field, column: &ArrayRef, row: usize) -> Result<JsonValue, EngineError> {
    let unsupported = || {
        EngineError::convert(
            "result",
            field.name().clone(),
            format!("unsupported result type {}", field.data_type()),
        )
    };

    let value = match field.data_type() {
        DataType::Utf8 => {
            let array = column
                .as_any()
                .downcast_ref::<StringArray>()
                .ok_or_else(unsupported)?;
            JsonValue::String(array.value(row).to_string())
        }
        DataType::Int64 => {
            let array = column
                .as_any()
                .downcast_ref::<Int64Array>()
                .ok_or_else(unsupported)?;
            JsonValue::Number(Number::from(array.value(row)))
        }
        DataType::Float64 => {
            let array = column
                .as_any()
                .downcast_ref::<Float64Array>()
                .ok_or_else(unsupported)?;
            let n = Number::from_f64(array.value(row)).ok_or_else(|| {
                EngineError::convert("result", field.name().clone(), "non-finite number")
            })?;
            JsonValue::Number(n)
        }
        DataType::Boolean => {
            let array = column
                .as_any()
                .downcast_ref::<BooleanArray>()
                .ok_or_else(unsupported)?;
            JsonValue::Bool(array.value(row))
        }
        DataType::Timestamp(TimeUnit::Microsecond, _) => {
            let array = column
                .as_any()
                .downcast_ref::<TimestampMicrosecondArray>()
                .ok_or_else(unsupported)?;
            let ts = DateTime::<Utc>::from_timestamp_micros(array.value(row)).ok_or_else(|| {
                EngineError::convert("result", field.name().clone(), "timestamp out of range")
            })?;
            JsonValue::String(ts.to_rfc3339_opts(SecondsFormat::Millis, true))
        }
        _ => return Err(unsupported()),
    };

    Ok(value)
}
