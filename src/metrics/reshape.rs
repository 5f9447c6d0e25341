//! Wide-to-long reshaping for grouped bar charts

use crate::error::Result;
use crate::metrics::frame::{Frame, Tabular};
use crate::metrics::require_column;
use crate::models::Value;

/// Turn several value columns into (label, value) pairs
///
/// For every input row one output row is emitted per value column, carrying
/// the id columns, the value column's name under `type_label` and its value
/// under `value_label`. The output therefore has
/// `rows * value_columns.len()` rows.
///
/// # Errors
/// Returns a `DataShape` error if the input lacks any referenced column.
pub fn reshape_wide_to_long<I: Tabular + ?Sized>(
    input: &I,
    id_columns: &[&str],
    value_columns: &[&str],
    type_label: &str,
    value_label: &str,
) -> Result<Frame> {
    let columns: Vec<String> = id_columns
        .iter()
        .copied()
        .chain([type_label, value_label])
        .map(ToString::to_string)
        .collect();
    if input.is_empty() {
        return Ok(Frame::new(columns, Vec::new()));
    }
    for column in id_columns.iter().chain(value_columns) {
        require_column(input, column, "reshape")?;
    }

    let mut rows = Vec::with_capacity(input.row_count() * value_columns.len());
    for row in 0..input.row_count() {
        let ids: Vec<Value> = id_columns
            .iter()
            .map(|c| input.cell(row, c).unwrap_or_default())
            .collect();
        for column in value_columns {
            let mut out = ids.clone();
            out.push(Value::text(*column));
            out.push(input.cell(row, column).unwrap_or_default());
            rows.push(out);
        }
    }
    Ok(Frame::new(columns, rows))
}
