//! Filtered views over normalized tables

use crate::error::{DashboardError, Result};
use crate::metrics::Frame;
use crate::models::{NormalizedTable, Record, Schema, Value};

/// A borrowed subset of a table's rows, in table order
///
/// An empty view is a normal outcome of filtering and means "nothing to
/// display"; consumers check [`FilteredView::is_empty`] before presenting
/// derived numbers.
#[derive(Debug, Clone)]
pub struct FilteredView<'a, T: Record> {
    table: &'a NormalizedTable<T>,
    rows: Vec<&'a T>,
}

impl<'a, T: Record> FilteredView<'a, T> {
    pub(crate) fn new(table: &'a NormalizedTable<T>, rows: Vec<&'a T>) -> Self {
        Self { table, rows }
    }

    /// The schema of the rows
    #[must_use]
    pub const fn schema(&self) -> Schema {
        T::SCHEMA
    }

    /// Columns present in the underlying table
    #[must_use]
    pub fn columns(&self) -> &'a [String] {
        self.table.columns()
    }

    /// Whether the underlying table carries a column
    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.table.has_column(column)
    }

    /// The selected rows
    #[must_use]
    pub fn rows(&self) -> &[&'a T] {
        &self.rows
    }

    /// Iterate over the selected rows
    pub fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.rows.iter().copied()
    }

    /// The first selected row
    #[must_use]
    pub fn first(&self) -> Option<&'a T> {
        self.rows.first().copied()
    }

    /// Number of selected rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether nothing was selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keep only rows matching a predicate
    #[must_use]
    pub fn retain_where(mut self, keep: impl Fn(&T) -> bool) -> Self {
        self.rows.retain(|row| keep(row));
        self
    }

    /// A copy of the view stably sorted by one column
    ///
    /// # Errors
    /// Returns a `DataShape` error if the table does not carry `column`.
    pub fn sorted_by(&self, column: &str, descending: bool) -> Result<Self> {
        if !self.has_column(column) {
            return Err(DashboardError::data_shape(column, "sorting"));
        }
        let mut keyed: Vec<(Value, &'a T)> = self
            .rows
            .iter()
            .map(|row| (row.field(column).unwrap_or_default(), *row))
            .collect();
        keyed.sort_by(|(a, _), (b, _)| {
            let ord = a.compare(b);
            if descending { ord.reverse() } else { ord }
        });
        Ok(Self::new(self.table, keyed.into_iter().map(|(_, row)| row).collect()))
    }

    /// Copy the selected rows into an owned table
    #[must_use]
    pub fn to_table(&self) -> NormalizedTable<T> {
        NormalizedTable::new(
            self.table.columns().to_vec(),
            self.rows.iter().map(|row| (*row).clone()).collect(),
        )
    }

    /// Convert into a generic frame holding only the present columns
    #[must_use]
    pub fn to_frame(&self) -> Frame {
        let columns = self.table.columns().to_vec();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|c| row.field(c).unwrap_or_default())
                    .collect()
            })
            .collect();
        Frame::new(columns, rows)
    }
}
