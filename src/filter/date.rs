//! Date filtering functionality
//!
//! This module provides filtering by inclusive calendar date ranges and the
//! helpers that compute a table's date bounds.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::filter::core::RowFilter;
use crate::models::{NormalizedTable, Record, Value, columns};

/// An inclusive range of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    /// The start date (inclusive)
    pub start: NaiveDate,
    /// The end date (inclusive)
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, swapping the bounds if they are reversed
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Build a range from picker bounds
    ///
    /// Exactly two bounds are required; anything else means no range is
    /// applied and `None` is returned.
    #[must_use]
    pub fn from_bounds(bounds: &[NaiveDate]) -> Option<Self> {
        match bounds {
            [start, end] => Some(Self::new(*start, *end)),
            _ => None,
        }
    }

    /// Build a range from date-time bounds, ignoring the time of day
    #[must_use]
    pub fn from_datetime_bounds(bounds: &[NaiveDateTime]) -> Option<Self> {
        let dates: Vec<NaiveDate> = bounds.iter().map(NaiveDateTime::date).collect();
        Self::from_bounds(&dates)
    }

    /// Whether a date falls inside the range
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// A filter that includes only rows with dates in a specified range
#[derive(Debug, Clone, Copy)]
pub struct DateRangeFilter {
    range: DateRange,
}

impl DateRangeFilter {
    /// Create a new date range filter on the `Date` column
    #[must_use]
    pub const fn new(range: DateRange) -> Self {
        Self { range }
    }
}

impl<T: Record> RowFilter<T> for DateRangeFilter {
    fn matches(&self, row: &T) -> bool {
        matches!(row.field(columns::DATE), Some(Value::Date(d)) if self.range.contains(d))
    }

    fn required_columns(&self) -> HashSet<&'static str> {
        HashSet::from([columns::DATE])
    }
}

/// The earliest and latest date in a table, used as the default range
#[must_use]
pub fn date_bounds<T: Record>(table: &NormalizedTable<T>) -> Option<DateRange> {
    let mut dates = table.rows().iter().filter_map(|row| match row.field(columns::DATE) {
        Some(Value::Date(d)) => Some(d),
        _ => None,
    });
    let first = dates.next()?;
    let (min, max) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
    Some(DateRange::new(min, max))
}
