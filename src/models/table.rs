//! Normalized tables of typed records

use serde::Serialize;

use super::{RawRow, Record, Schema};
use crate::filter::FilteredView;
use crate::metrics::Frame;

/// An immutable, cleaned table of one schema
///
/// `columns` lists the declared columns the source actually carried, in
/// schema order. Record fields for absent columns hold their zero value and
/// must not be reported as data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedTable<T: Record> {
    columns: Vec<String>,
    rows: Vec<T>,
}

impl<T: Record> Default for NormalizedTable<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Record> NormalizedTable<T> {
    /// Create a table from present columns and rows
    #[must_use]
    pub fn new(columns: Vec<String>, rows: Vec<T>) -> Self {
        Self { columns, rows }
    }

    /// A table with no rows and no columns
    #[must_use]
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// The schema of the rows
    #[must_use]
    pub const fn schema(&self) -> Schema {
        T::SCHEMA
    }

    /// Columns present in the source
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Whether the source carried a column
    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// The rows in source order
    #[must_use]
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `(rows, columns)`
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    /// A view over every row
    #[must_use]
    pub fn view(&self) -> FilteredView<'_, T> {
        FilteredView::new(self, self.rows.iter().collect())
    }

    /// Convert back into raw rows carrying only the present columns
    #[must_use]
    pub fn to_raw_rows(&self) -> Vec<RawRow> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .filter_map(|column| row.field(column).map(|v| (column.clone(), v)))
                    .collect()
            })
            .collect()
    }

    /// Convert into a generic frame for grids and charts
    #[must_use]
    pub fn to_frame(&self) -> Frame {
        self.view().to_frame()
    }
}
