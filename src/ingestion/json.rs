//! JSON ingestion.
//!
//! Supported input: a JSON array of objects, `[{"a":1}, {"a":2}]`. The columns are the keys of the
//! first object, in document order.

use std::fs;
use std::path::Path;

use crate::dataframe::DataFrame;
use crate::error::{DataForgeError, DataForgeResult};
use crate::types::{Record, Value};

/// Read a JSON file into a [`DataFrame`].
pub fn from_json_path(path: impl AsRef<Path>) -> DataForgeResult<DataFrame> {
    let text = fs::read_to_string(path)?;
    from_json_str(&text)
}

/// Parse JSON text into a [`DataFrame`].
///
/// - Malformed text (including the empty string) fails with [`DataForgeError::Json`].
/// - `[]` yields a frame with no columns and no rows.
/// - Later objects contribute values only for the first object's keys; missing keys become
///   [`Value::Null`].
pub fn from_json_str(input: &str) -> DataForgeResult<DataFrame> {
    let parsed: serde_json::Value = serde_json::from_str(input)?;
    let items = match parsed {
        serde_json::Value::Array(items) => items,
        _ => {
            return Err(DataForgeError::validation(
                "json must be an array of objects",
            ));
        }
    };

    let mut records = Vec::with_capacity(items.len());
    for (idx0, item) in items.iter().enumerate() {
        let obj = item.as_object().ok_or_else(|| {
            DataForgeError::validation(format!("row {} is not a json object", idx0 + 1))
        })?;
        records.push(
            obj.iter()
                .map(|(k, v)| (k.clone(), convert_json_value(v)))
                .collect::<Record>(),
        );
    }

    Ok(DataFrame::from_records(records))
}

/// Serialize `frame` as a JSON array of objects, one per row, keys in column order.
///
/// Dates are written as ISO-8601 strings and read back as [`Value::Utf8`].
pub fn to_json_string(frame: &DataFrame) -> DataForgeResult<String> {
    let mut objects = Vec::with_capacity(frame.row_count());
    for record in frame.records().iter() {
        let mut obj = serde_json::Map::with_capacity(record.len());
        for (name, value) in record.iter() {
            // Repeated column names keep their first value.
            if !obj.contains_key(name) {
                obj.insert(name.to_owned(), serde_json::to_value(value)?);
            }
        }
        objects.push(serde_json::Value::Object(obj));
    }
    Ok(serde_json::to_string(&objects)?)
}

fn convert_json_value(v: &serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int64(i),
            None => n.as_f64().map_or(Value::Null, Value::Float64),
        },
        serde_json::Value::String(s) => Value::Utf8(s.clone()),
        // Nested structures are kept as their JSON text.
        other => Value::Utf8(other.to_string()),
    }
}
