use std::collections::BTreeSet;

use anyhow::{Context, Result};
use serde_json::{Map, Value as JsonValue};

use super::model::{Dataset, Value};

// ---------------------------------------------------------------------------
// JSON records  <->  Dataset
// ---------------------------------------------------------------------------

/// Build a dataset from records-oriented JSON (`df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "field": 0.10, "rxx": 12.5, "sample": "A" },
///   { "field": 0.20, "rxx": 12.7, "sample": "A" }
/// ]
/// ```
///
/// Columns are the union of all object keys in sorted order; a key missing
/// from a record becomes `Null`.
pub fn dataset_from_records(root: &JsonValue) -> Result<Dataset> {
    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut objects: Vec<&Map<String, JsonValue>> = Vec::with_capacity(records.len());
    let mut column_set: BTreeSet<&str> = BTreeSet::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        column_set.extend(obj.keys().map(String::as_str));
        objects.push(obj);
    }

    let columns: Vec<String> = column_set.into_iter().map(str::to_string).collect();
    let rows = objects
        .iter()
        .map(|obj| {
            columns
                .iter()
                .map(|c| obj.get(c).map_or(Value::Null, json_to_value))
                .collect()
        })
        .collect();

    Dataset::new(columns, rows).context("building dataset from JSON records")
}

/// Parse a JSON string and build a dataset from its records.
pub fn dataset_from_json_str(text: &str) -> Result<Dataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    dataset_from_records(&root)
}

/// Render a dataset as an array of JSON objects, one per row.
pub fn dataset_to_records(dataset: &Dataset) -> JsonValue {
    let rows = dataset
        .rows()
        .iter()
        .map(|row| {
            let obj: Map<String, JsonValue> = dataset
                .columns()
                .iter()
                .zip(row)
                .map(|(c, v)| (c.clone(), value_to_json(v)))
                .collect();
            JsonValue::Object(obj)
        })
        .collect();
    JsonValue::Array(rows)
}

fn json_to_value(val: &JsonValue) -> Value {
    match val {
        JsonValue::String(s) => Value::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Null => Value::Null,
        other => Value::String(other.to_string()),
    }
}

fn value_to_json(val: &Value) -> JsonValue {
    match val {
        Value::Null => JsonValue::Null,
        Value::Integer(i) => JsonValue::from(*i),
        // Non-finite floats have no JSON form and come out as null.
        Value::Float(f) => serde_json::Number::from_f64(*f).map_or(JsonValue::Null, JsonValue::Number),
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::String(s) => JsonValue::String(s.clone()),
    }
}
