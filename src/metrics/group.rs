//! Grouped sums
//!
//! Groups keep the order in which each key was first seen so charts list
//! people in sheet order.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::error::Result;
use crate::metrics::frame::{Frame, Tabular};
use crate::metrics::require_column;
use crate::models::Value;

/// Group key, compared on display text; most groupings use one or two columns
type GroupKey = SmallVec<[String; 2]>;

/// Sum one numeric column per distinct combination of `group_by` values
///
/// The output has the `group_by` columns followed by `value_column`, one row
/// per distinct key in first-seen order.
///
/// # Errors
/// Returns a `DataShape` error if the input lacks any referenced column.
pub fn group_sum<I: Tabular + ?Sized>(
    input: &I,
    group_by: &[&str],
    value_column: &str,
) -> Result<Frame> {
    group_sum_many(input, group_by, &[value_column])
}

/// Sum several numeric columns per group in a single pass
///
/// # Errors
/// Returns a `DataShape` error if the input lacks any referenced column.
pub fn group_sum_many<I: Tabular + ?Sized>(
    input: &I,
    group_by: &[&str],
    value_columns: &[&str],
) -> Result<Frame> {
    let columns: Vec<String> = group_by
        .iter()
        .chain(value_columns)
        .map(ToString::to_string)
        .collect();
    if input.is_empty() {
        return Ok(Frame::new(columns, Vec::new()));
    }
    for column in group_by.iter().chain(value_columns) {
        require_column(input, column, "group sum")?;
    }

    let mut index: FxHashMap<GroupKey, usize> = FxHashMap::default();
    let mut keys: Vec<Vec<Value>> = Vec::new();
    let mut sums: Vec<Vec<f64>> = Vec::new();

    for row in 0..input.row_count() {
        let cells: Vec<Value> = group_by
            .iter()
            .map(|c| input.cell(row, c).unwrap_or_default())
            .collect();
        let key: GroupKey = cells.iter().map(ToString::to_string).collect();
        let slot = *index.entry(key).or_insert_with(|| {
            keys.push(cells);
            sums.push(vec![0.0; value_columns.len()]);
            keys.len() - 1
        });
        for (total, column) in sums[slot].iter_mut().zip(value_columns) {
            *total += input
                .cell(row, column)
                .and_then(|v| v.as_number())
                .unwrap_or(0.0);
        }
    }

    let rows = keys
        .into_iter()
        .zip(sums)
        .map(|(mut key, totals)| {
            key.extend(totals.into_iter().map(Value::Float));
            key
        })
        .collect();
    Ok(Frame::new(columns, rows))
}
