//! Aggregation and KPI calculations
//!
//! Every function here is a pure transform over a [`Tabular`] input, usually
//! a [`FilteredView`](crate::filter::FilteredView) or a derived [`Frame`].
//!
//! Empty inputs are a normal state: sums are `0.0`, counts are `0`, means are
//! `None` and breakdowns are empty. A referenced column the input does not
//! carry is reported as a `DataShape` error so the caller can skip only the
//! dependent computation.

pub mod breakdown;
pub mod frame;
pub mod group;
pub mod reshape;

pub use breakdown::{breakdown_frame, category_breakdown};
pub use frame::{Frame, Tabular};
pub use group::{group_sum, group_sum_many};
pub use reshape::reshape_wide_to_long;

use crate::error::{DashboardError, Result};

/// Check that an input carries a column
pub(crate) fn require_column<I: Tabular + ?Sized>(
    input: &I,
    column: &str,
    context: &str,
) -> Result<()> {
    if input.has_column(column) {
        Ok(())
    } else {
        Err(DashboardError::data_shape(column, context))
    }
}

fn numbers<'a, I: Tabular + ?Sized>(input: &'a I, column: &'a str) -> impl Iterator<Item = f64> + 'a {
    (0..input.row_count()).map(move |row| {
        input
            .cell(row, column)
            .and_then(|v| v.as_number())
            .unwrap_or(0.0)
    })
}

/// Sum of a numeric column, `0.0` for an empty input
pub fn sum_by<I: Tabular + ?Sized>(input: &I, column: &str) -> Result<f64> {
    if input.is_empty() {
        return Ok(0.0);
    }
    require_column(input, column, "sum")?;
    Ok(numbers(input, column).sum())
}

/// Number of rows whose column equals `value`
pub fn count_where<I: Tabular + ?Sized>(input: &I, column: &str, value: &str) -> Result<usize> {
    if input.is_empty() {
        return Ok(0);
    }
    require_column(input, column, "count")?;
    Ok((0..input.row_count())
        .filter(|row| {
            input
                .cell(*row, column)
                .is_some_and(|v| v.to_string() == value)
        })
        .count())
}

/// Mean of a numeric column, `None` for an empty input
pub fn mean_by<I: Tabular + ?Sized>(input: &I, column: &str) -> Result<Option<f64>> {
    if input.is_empty() {
        return Ok(None);
    }
    require_column(input, column, "mean")?;
    let total: f64 = numbers(input, column).sum();
    Ok(Some(total / input.row_count() as f64))
}

/// What is left of `total` after subtracting `parts`, never below zero
///
/// A negative remainder means the inputs are inconsistent, not that a
/// negative category exists, so it is clamped to zero.
#[must_use]
pub fn residual(total: f64, parts: &[f64]) -> f64 {
    (total - parts.iter().sum::<f64>()).max(0.0)
}
