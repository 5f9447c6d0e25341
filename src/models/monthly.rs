//! Monthly payroll record

use serde::Serialize;

use super::columns::{ABSENT_DAYS, DAYS_IN_MONTH, MONTH, NAME, PAYABLE_DAYS, SALARY};
use super::{CleanCells, ColumnKind, ColumnSpec, Record, Schema, Value};

pub(crate) const COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new(NAME, ColumnKind::Identity),
    ColumnSpec::new(MONTH, ColumnKind::Text),
    ColumnSpec::new(PAYABLE_DAYS, ColumnKind::Number),
    ColumnSpec::new(ABSENT_DAYS, ColumnKind::Number),
    ColumnSpec::new(DAYS_IN_MONTH, ColumnKind::Number),
    ColumnSpec::new(SALARY, ColumnKind::Number),
];

/// One person's attendance and salary for a month
///
/// `payable_days + absent_days` should not exceed `days_in_month`, but rows
/// breaking that are kept as loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Month")]
    pub month: String,
    #[serde(rename = "Payable Days")]
    pub payable_days: f64,
    #[serde(rename = "Absent Days")]
    pub absent_days: f64,
    #[serde(rename = "Days in Month")]
    pub days_in_month: f64,
    #[serde(rename = "Salary")]
    pub salary: f64,
}

impl MonthlyRecord {
    /// Days neither payable nor absent, never negative
    #[must_use]
    pub fn other_days(&self) -> f64 {
        crate::metrics::residual(self.days_in_month, &[self.payable_days, self.absent_days])
    }
}

impl Record for MonthlyRecord {
    const SCHEMA: Schema = Schema::Monthly;

    fn from_cells(cells: &CleanCells) -> Option<Self> {
        Some(Self {
            name: cells.text(NAME),
            month: cells.text(MONTH),
            payable_days: cells.number(PAYABLE_DAYS),
            absent_days: cells.number(ABSENT_DAYS),
            days_in_month: cells.number(DAYS_IN_MONTH),
            salary: cells.number(SALARY),
        })
    }

    fn field(&self, column: &str) -> Option<Value> {
        let value = match column {
            NAME => Value::text(&self.name),
            MONTH => Value::text(&self.month),
            PAYABLE_DAYS => Value::Float(self.payable_days),
            ABSENT_DAYS => Value::Float(self.absent_days),
            DAYS_IN_MONTH => Value::Float(self.days_in_month),
            SALARY => Value::Float(self.salary),
            _ => return None,
        };
        Some(value)
    }

    fn person(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_days_clamped() {
        let record = MonthlyRecord {
            name: "Ravi".to_string(),
            month: "January".to_string(),
            payable_days: 25.0,
            absent_days: 10.0,
            days_in_month: 31.0,
            salary: 0.0,
        };
        assert_eq!(record.other_days(), 0.0);
    }
}
