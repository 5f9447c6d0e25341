//! Filtering capabilities for normalized tables
//!
//! This module provides the predicate-based filter engine behind the
//! dashboard pickers. Predicates combine with a logical AND:
//!
//! ```rust,ignore
//! use attendance_dashboard::filter::{filter, Predicate, PredicateSet, Selection};
//!
//! let predicates = PredicateSet::new()
//!     .with(Predicate::Name(Selection::only("Asha")))
//!     .with(Predicate::Month(Selection::All));
//! let view = filter(&monthly_table, &predicates)?;
//! ```

pub mod core;
pub mod date;
pub mod selection;
pub mod view;

use std::collections::HashSet;

pub use self::core::{RowFilter, apply_filter};
pub use date::{DateRange, DateRangeFilter, date_bounds};
pub use selection::{ALL, Selection, selection_options};
pub use view::FilteredView;

use crate::error::Result;
use crate::models::{NormalizedTable, Record, columns};

/// A single user-selected condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Equality on the identity column (`Name`, or `Staff Name` for daily sheets)
    Name(Selection),
    /// Equality on the `Month` column
    Month(Selection),
    /// Equality on the `Staff Name` column
    Staff(Selection),
    /// Inclusive range on the `Date` column; `None` applies no range
    DateWithin(Option<DateRange>),
}

impl Predicate {
    fn column<T: Record>(&self) -> &'static str {
        match self {
            Self::Name(_) => T::SCHEMA.identity_column(),
            Self::Month(_) => columns::MONTH,
            Self::Staff(_) => columns::STAFF_NAME,
            Self::DateWithin(_) => columns::DATE,
        }
    }

    /// Whether the predicate filters anything
    #[must_use]
    pub const fn is_active(&self) -> bool {
        match self {
            Self::Name(s) | Self::Month(s) | Self::Staff(s) => !s.is_all(),
            Self::DateWithin(range) => range.is_some(),
        }
    }
}

impl<T: Record> RowFilter<T> for Predicate {
    fn matches(&self, row: &T) -> bool {
        match self {
            Self::Name(selection) | Self::Month(selection) | Self::Staff(selection) => {
                selection.is_all()
                    || row
                        .field(self.column::<T>())
                        .is_some_and(|value| selection.accepts(&value))
            }
            Self::DateWithin(None) => true,
            Self::DateWithin(Some(range)) => {
                RowFilter::<T>::matches(&DateRangeFilter::new(*range), row)
            }
        }
    }

    fn required_columns(&self) -> HashSet<&'static str> {
        if self.is_active() {
            HashSet::from([self.column::<T>()])
        } else {
            HashSet::new()
        }
    }
}

/// A conjunction of predicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredicateSet {
    predicates: Vec<Predicate>,
}

impl PredicateSet {
    /// An empty set, which keeps every row
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predicate
    #[must_use]
    pub fn with(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// The predicates in the set
    #[must_use]
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }
}

impl FromIterator<Predicate> for PredicateSet {
    fn from_iter<I: IntoIterator<Item = Predicate>>(iter: I) -> Self {
        Self {
            predicates: iter.into_iter().collect(),
        }
    }
}

impl<T: Record> RowFilter<T> for PredicateSet {
    fn matches(&self, row: &T) -> bool {
        self.predicates
            .iter()
            .all(|p| RowFilter::<T>::matches(p, row))
    }

    fn required_columns(&self) -> HashSet<&'static str> {
        self.predicates
            .iter()
            .flat_map(RowFilter::<T>::required_columns)
            .collect()
    }
}

/// Apply a set of predicates to a table
///
/// # Errors
/// Returns a `DataShape` error if an active predicate refers to a column the
/// table does not carry. Selections matching no rows give an empty view.
pub fn filter<'a, T: Record>(
    table: &'a NormalizedTable<T>,
    predicates: &PredicateSet,
) -> Result<FilteredView<'a, T>> {
    apply_filter(table, predicates)
}
