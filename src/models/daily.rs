//! Daily attendance record

use chrono::NaiveDate;
use serde::Serialize;

use super::columns::{ATTENDANCE, DATE, HOURS_WORKED, STAFF_NAME};
use super::{CleanCells, ColumnKind, ColumnSpec, Record, Schema, Value};

pub(crate) const COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new(STAFF_NAME, ColumnKind::Identity),
    ColumnSpec::new(DATE, ColumnKind::Date),
    ColumnSpec::new(ATTENDANCE, ColumnKind::Text),
    ColumnSpec::new(HOURS_WORKED, ColumnKind::Number),
];

/// One staff member's attendance on one day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRecord {
    #[serde(rename = "Staff Name")]
    pub staff_name: String,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Attendance")]
    pub attendance: String,
    #[serde(rename = "Hours Worked")]
    pub hours_worked: f64,
}

impl Record for DailyRecord {
    const SCHEMA: Schema = Schema::Daily;

    fn from_cells(cells: &CleanCells) -> Option<Self> {
        Some(Self {
            staff_name: cells.text(STAFF_NAME),
            date: cells.date(DATE)?,
            attendance: cells.text(ATTENDANCE),
            hours_worked: cells.number(HOURS_WORKED),
        })
    }

    fn field(&self, column: &str) -> Option<Value> {
        let value = match column {
            STAFF_NAME => Value::text(&self.staff_name),
            DATE => Value::Date(self.date),
            ATTENDANCE => Value::text(&self.attendance),
            HOURS_WORKED => Value::Float(self.hours_worked),
            _ => return None,
        };
        Some(value)
    }

    fn person(&self) -> &str {
        &self.staff_name
    }
}
