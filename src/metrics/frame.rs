//! Generic column-named frames
//!
//! Derived tables (grouped sums, long-form reshapes, grid exports) are
//! plain frames: named columns and rows of [`Value`]s.

use serde::Serialize;
use serde::ser::SerializeSeq;

use crate::filter::FilteredView;
use crate::models::{RawRow, Record, Value};

/// Read access to anything shaped like a table
pub trait Tabular {
    /// Whether the input carries a column
    fn has_column(&self, column: &str) -> bool;

    /// Number of rows
    fn row_count(&self) -> usize;

    /// The value of one cell, `None` if the row or column does not exist
    fn cell(&self, row: usize, column: &str) -> Option<Value>;

    /// Whether there are no rows
    fn is_empty(&self) -> bool {
        self.row_count() == 0
    }
}

/// A small owned table of values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Frame {
    /// Create a frame; every row should have one value per column
    #[must_use]
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    /// Column names
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows of values, in column order
    #[must_use]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Position of a column
    #[must_use]
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// All values of one column
    #[must_use]
    pub fn column_values(&self, column: &str) -> Option<Vec<Value>> {
        let idx = self.column_index(column)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(idx).cloned().unwrap_or_default())
                .collect(),
        )
    }

    /// The first `n` rows, for diagnostics
    #[must_use]
    pub fn head(&self, n: usize) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Rows as ordered column/value maps
    #[must_use]
    pub fn to_raw_rows(&self) -> Vec<RawRow> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect()
            })
            .collect()
    }
}

impl Tabular for Frame {
    fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn cell(&self, row: usize, column: &str) -> Option<Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx).cloned()
    }
}

impl<T: Record> Tabular for FilteredView<'_, T> {
    fn has_column(&self, column: &str) -> bool {
        FilteredView::has_column(self, column)
    }

    fn row_count(&self) -> usize {
        self.len()
    }

    fn cell(&self, row: usize, column: &str) -> Option<Value> {
        if !FilteredView::has_column(self, column) {
            return None;
        }
        self.rows().get(row)?.field(column)
    }
}

impl Serialize for Frame {
    /// Serialized as a list of records, the shape chart libraries expect
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let records = self.to_raw_rows();
        let mut seq = serializer.serialize_seq(Some(records.len()))?;
        for record in &records {
            seq.serialize_element(record)?;
        }
        seq.end()
    }
}
