use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, ArrayRef, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    StringArray,
};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use super::model::{Dataset, Value};

// ---------------------------------------------------------------------------
// RecordBatch -> Dataset
// ---------------------------------------------------------------------------

/// Convert an Arrow record batch into a dataset.
///
/// Supported column types:
/// * `Float32` / `Float64` → `Value::Float`
/// * `Int32` / `Int64`     → `Value::Integer`
/// * `Boolean`             → `Value::Bool`
/// * `Utf8` / `LargeUtf8`  → `Value::String`
///
/// Nulls become `Value::Null`. Any other type is an error.
pub fn dataset_from_batch(batch: &RecordBatch) -> Result<Dataset> {
    let schema = batch.schema();
    let columns: Vec<String> = schema.fields().iter().map(|f| f.name().clone()).collect();

    let mut cells: Vec<Vec<Value>> = Vec::with_capacity(columns.len());
    for (col_idx, name) in columns.iter().enumerate() {
        let col = batch.column(col_idx);
        let values = (0..batch.num_rows())
            .map(|row| extract_value(col, row))
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("reading column '{name}'"))?;
        cells.push(values);
    }

    Dataset::from_columns(columns.into_iter().zip(cells).collect())
        .context("building dataset from record batch")
}

/// Convert several batches sharing a schema into one dataset.
pub fn dataset_from_batches(batches: &[RecordBatch]) -> Result<Dataset> {
    let mut iter = batches.iter();
    let Some(first) = iter.next() else {
        bail!("no record batches to convert");
    };
    let mut dataset = dataset_from_batch(first)?;
    for (i, batch) in iter.enumerate() {
        let next = dataset_from_batch(batch).with_context(|| format!("batch {}", i + 1))?;
        if next.columns() != dataset.columns() {
            bail!("batch {} has columns {:?}, expected {:?}", i + 1, next.columns(), dataset.columns());
        }
        for row in next.rows() {
            dataset.push_row(row.clone())?;
        }
    }
    Ok(dataset)
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_value(col: &ArrayRef, row: usize) -> Result<Value> {
    if col.is_null(row) {
        return Ok(Value::Null);
    }
    let value = match col.data_type() {
        DataType::Utf8 => Value::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Value::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().context("expected Int32Array")?;
            Value::Integer(arr.value(row) as i64)
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().context("expected Int64Array")?;
            Value::Integer(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?;
            Value::Float(arr.value(row) as f64)
        }
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?;
            Value::Float(arr.value(row))
        }
        DataType::Boolean => {
            let arr = col
                .as_any()
                .downcast_ref::<BooleanArray>()
                .context("expected BooleanArray")?;
            Value::Bool(arr.value(row))
        }
        other => bail!("unsupported column type {other:?}"),
    };
    Ok(value)
}

// ---------------------------------------------------------------------------
// Dataset -> RecordBatch
// ---------------------------------------------------------------------------

/// Convert a dataset into an Arrow record batch.
///
/// Each column's Arrow type is inferred from its non-null cells: all
/// integers → `Int64`, integers and floats → `Float64`, all bools →
/// `Boolean`, anything else → `Utf8` (cells rendered with `Display`).
/// A column with only nulls becomes `Float64`.
pub fn dataset_to_batch(dataset: &Dataset) -> Result<RecordBatch> {
    let mut fields = Vec::with_capacity(dataset.columns().len());
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(dataset.columns().len());

    for name in dataset.columns() {
        let cells: Vec<&Value> = dataset
            .column(name)
            .with_context(|| format!("column '{name}' vanished"))?
            .collect();
        let (data_type, array) = build_array(&cells);
        fields.push(Field::new(name, data_type, true));
        arrays.push(array);
    }

    let schema = Arc::new(Schema::new(fields));
    RecordBatch::try_new(schema, arrays).context("assembling record batch")
}

fn build_array(cells: &[&Value]) -> (DataType, ArrayRef) {
    let non_null = || cells.iter().filter(|v| !matches!(v, Value::Null));

    if non_null().all(|v| matches!(v, Value::Integer(_))) && non_null().next().is_some() {
        let arr: Int64Array = cells
            .iter()
            .map(|v| match v {
                Value::Integer(i) => Some(*i),
                _ => None,
            })
            .collect();
        return (DataType::Int64, Arc::new(arr));
    }
    if non_null().all(|v| v.as_f64().is_some()) {
        let arr: Float64Array = cells.iter().map(|v| v.as_f64()).collect();
        return (DataType::Float64, Arc::new(arr));
    }
    if non_null().all(|v| matches!(v, Value::Bool(_))) {
        let arr: BooleanArray = cells
            .iter()
            .map(|v| match v {
                Value::Bool(b) => Some(*b),
                _ => None,
            })
            .collect();
        return (DataType::Boolean, Arc::new(arr));
    }
    let arr: StringArray = cells
        .iter()
        .map(|v| match v {
            Value::Null => None,
            other => Some(other.to_string()),
        })
        .collect();
    (DataType::Utf8, Arc::new(arr))
}
