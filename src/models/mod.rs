//! Typed attendance and payroll records
//!
//! Raw spreadsheet rows are turned into one of three record types by the
//! cleaner, so everything downstream of it works on statically shaped data:
//!
//! - [`AnnualRecord`]: one row per person for the year
//! - [`MonthlyRecord`]: one row per person and month
//! - [`DailyRecord`]: one row per staff member and calendar day

pub mod annual;
pub mod daily;
pub mod monthly;
pub mod table;
pub mod value;

use std::fmt::Debug;

use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use serde::Serialize;

pub use annual::{AnnualRecord, DefaulterStatus};
pub use daily::DailyRecord;
pub use monthly::MonthlyRecord;
pub use table::NormalizedTable;
pub use value::{RawRow, Value};

/// Column names shared by the sheets
pub mod columns {
    pub const NAME: &str = "Name";
    pub const PAYABLE_DAYS_TOTAL: &str = "SUM of Payable Days";
    pub const ABSENT_DAYS_TOTAL: &str = "Updated Absent Days";
    pub const EXTENSION_DAYS: &str = "Extension Days";
    pub const TRANSFER_CASE: &str = "Transfer case";
    pub const DEFAULTER: &str = "Defaulter";
    pub const YEAR: &str = "Year";

    pub const MONTH: &str = "Month";
    pub const PAYABLE_DAYS: &str = "Payable Days";
    pub const ABSENT_DAYS: &str = "Absent Days";
    pub const DAYS_IN_MONTH: &str = "Days in Month";
    pub const SALARY: &str = "Salary";

    pub const STAFF_NAME: &str = "Staff Name";
    pub const DATE: &str = "Date";
    pub const ATTENDANCE: &str = "Attendance";
    pub const HOURS_WORKED: &str = "Hours Worked";
}

/// How the cleaner treats a declared column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Text that identifies the row; blank or placeholder values drop the row
    Identity,
    /// Free or categorical text, trimmed
    Text,
    /// Non-negative float, unparseable values become zero
    Number,
    /// Non-negative integer, unparseable values become zero
    Integer,
    /// Day-first calendar date that identifies the row; unparseable values drop the row
    Date,
}

/// A declared column of a schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    #[must_use]
    pub const fn new(name: &'static str, kind: ColumnKind) -> Self {
        Self { name, kind }
    }
}

/// The three known sheet layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Schema {
    Annual,
    Monthly,
    Daily,
}

impl Schema {
    /// Declared columns, in display order
    #[must_use]
    pub const fn columns(self) -> &'static [ColumnSpec] {
        match self {
            Self::Annual => annual::COLUMNS,
            Self::Monthly => monthly::COLUMNS,
            Self::Daily => daily::COLUMNS,
        }
    }

    /// The column holding the person's name
    #[must_use]
    pub const fn identity_column(self) -> &'static str {
        match self {
            Self::Annual | Self::Monthly => columns::NAME,
            Self::Daily => columns::STAFF_NAME,
        }
    }

    /// Look up a declared column by name
    #[must_use]
    pub fn column(self, name: &str) -> Option<&'static ColumnSpec> {
        self.columns().iter().find(|spec| spec.name == name)
    }

    /// Human readable name
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Monthly => "monthly",
            Self::Daily => "daily",
        }
    }
}

/// Coerced cell values for one row, keyed by declared column name
///
/// Produced by the cleaner after trimming, number coercion and date parsing.
/// Columns the source did not carry are simply absent and read back as their
/// zero value.
#[derive(Debug, Default)]
pub struct CleanCells {
    values: FxHashMap<&'static str, Value>,
}

impl CleanCells {
    pub(crate) fn insert(&mut self, column: &'static str, value: Value) {
        self.values.insert(column, value);
    }

    /// Text value of a column, empty if absent
    #[must_use]
    pub fn text(&self, column: &str) -> String {
        self.values
            .get(column)
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    /// Numeric value of a column, zero if absent
    #[must_use]
    pub fn number(&self, column: &str) -> f64 {
        self.values
            .get(column)
            .and_then(Value::as_number)
            .unwrap_or(0.0)
    }

    /// Integer value of a column, zero if absent
    #[must_use]
    pub fn integer(&self, column: &str) -> i64 {
        match self.values.get(column) {
            Some(Value::Int(i)) => *i,
            Some(other) => other.as_number().map_or(0, |n| n as i64),
            None => 0,
        }
    }

    /// Date value of a column
    #[must_use]
    pub fn date(&self, column: &str) -> Option<NaiveDate> {
        match self.values.get(column) {
            Some(Value::Date(d)) => Some(*d),
            _ => None,
        }
    }
}

/// A typed row of one of the known schemas
pub trait Record: Clone + Debug + PartialEq + Serialize + Send + Sync + 'static {
    /// The sheet layout this record is built from
    const SCHEMA: Schema;

    /// Build a record from coerced cells
    ///
    /// Returns `None` when an identity-bearing value is unusable.
    fn from_cells(cells: &CleanCells) -> Option<Self>;

    /// Read a declared column back as a value
    ///
    /// Returns `None` for columns the schema does not declare.
    fn field(&self, column: &str) -> Option<Value>;

    /// The person this row belongs to
    fn person(&self) -> &str;
}
