//! Core filtering functionality for normalized tables
//!
//! This module defines the row filter trait and the helpers that apply a
//! filter to a table, producing a [`FilteredView`].

use std::collections::HashSet;
use std::fmt::Debug;

use crate::error::{DashboardError, Result};
use crate::filter::view::FilteredView;
use crate::models::{NormalizedTable, Record};

/// Trait for objects that can select rows of a table
pub trait RowFilter<T: Record>: Debug {
    /// Whether a row is kept
    fn matches(&self, row: &T) -> bool;

    /// Returns the set of column names required by this filter
    fn required_columns(&self) -> HashSet<&'static str>;
}

/// Apply a row filter to a table
///
/// # Errors
/// Returns a `DataShape` error if the filter needs a column the table does
/// not carry. A filter that matches nothing yields an empty view.
pub fn apply_filter<'a, T: Record>(
    table: &'a NormalizedTable<T>,
    filter: &dyn RowFilter<T>,
) -> Result<FilteredView<'a, T>> {
    if table.is_empty() {
        return Ok(FilteredView::new(table, Vec::new()));
    }

    let mut required: Vec<&'static str> = filter.required_columns().into_iter().collect();
    required.sort_unstable();
    if let Some(column) = required.into_iter().find(|c| !table.has_column(c)) {
        return Err(DashboardError::data_shape(column, "filter"));
    }

    let rows = table.rows().iter().filter(|row| filter.matches(row)).collect();
    Ok(FilteredView::new(table, rows))
}
