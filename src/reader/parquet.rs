//! Parquet subsheets read through Arrow record batches

use std::path::Path;

use anyhow::Context;
use arrow::array::{
    Array, ArrayRef, BooleanArray, Date32Array, Float32Array, Float64Array, Int32Array,
    Int64Array, LargeStringArray, StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::util::safe_open_file;
use crate::models::{RawRow, Value};

/// Read every row of a parquet file
///
/// # Errors
/// Returns an error if the file cannot be opened or decoded.
pub fn read_parquet(path: &Path) -> anyhow::Result<Vec<RawRow>> {
    let file = safe_open_file(path, "reading parquet subsheet")?;

    let reader = ParquetRecordBatchReaderBuilder::try_new(file)
        .with_context(|| format!("Failed to read parquet file: {}", path.display()))?
        .build()
        .with_context(|| format!("Failed to build parquet reader for {}", path.display()))?;

    let mut rows = Vec::new();
    for batch in reader {
        let batch =
            batch.with_context(|| format!("Failed to read record batch from {}", path.display()))?;
        rows.extend(batch_to_rows(&batch)?);
    }
    Ok(rows)
}

/// Convert a record batch to raw rows, keeping the schema's column order
///
/// # Errors
/// Returns an error if a column cannot be rendered.
pub fn batch_to_rows(batch: &RecordBatch) -> anyhow::Result<Vec<RawRow>> {
    let schema = batch.schema();
    let mut rows = vec![RawRow::new(); batch.num_rows()];

    for (field, column) in schema.fields().iter().zip(batch.columns()) {
        let values = column_values(column)
            .with_context(|| format!("Failed to convert column {}", field.name()))?;
        for (row, value) in rows.iter_mut().zip(values) {
            row.push(field.name().as_str(), value);
        }
    }
    Ok(rows)
}

fn column_values(array: &ArrayRef) -> anyhow::Result<Vec<Value>> {
    match array.data_type() {
        DataType::Null => Ok(vec![Value::Empty; array.len()]),
        DataType::Utf8 => map_cells::<StringArray>(array, |a, i| Value::text(a.value(i))),
        DataType::LargeUtf8 => map_cells::<LargeStringArray>(array, |a, i| Value::text(a.value(i))),
        DataType::Boolean => map_cells::<BooleanArray>(array, |a, i| Value::Bool(a.value(i))),
        DataType::Int32 => map_cells::<Int32Array>(array, |a, i| Value::Int(i64::from(a.value(i)))),
        DataType::Int64 => map_cells::<Int64Array>(array, |a, i| Value::Int(a.value(i))),
        DataType::Float32 => {
            map_cells::<Float32Array>(array, |a, i| Value::Float(f64::from(a.value(i))))
        }
        DataType::Float64 => map_cells::<Float64Array>(array, |a, i| Value::Float(a.value(i))),
        DataType::Date32 => map_cells::<Date32Array>(array, |a, i| {
            a.value_as_date(i).map_or(Value::Empty, Value::Date)
        }),
        _ => {
            // Anything else is handed to the cleaner as its display text
            let formatter = ArrayFormatter::try_new(array.as_ref(), &FormatOptions::default())?;
            Ok((0..array.len())
                .map(|i| {
                    if array.is_null(i) {
                        Value::Empty
                    } else {
                        Value::text(formatter.value(i).to_string())
                    }
                })
                .collect())
        }
    }
}

fn map_cells<A: Array + 'static>(
    array: &ArrayRef,
    convert: impl Fn(&A, usize) -> Value,
) -> anyhow::Result<Vec<Value>> {
    let typed = array
        .as_any()
        .downcast_ref::<A>()
        .ok_or_else(|| anyhow::anyhow!("Unexpected array type {}", array.data_type()))?;
    Ok((0..typed.len())
        .map(|i| {
            if typed.is_null(i) {
                Value::Empty
            } else {
                convert(typed, i)
            }
        })
        .collect())
}
