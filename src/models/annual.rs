//! Annual attendance record
//!
//! One row of the yearly summary sheet: payable and absent day totals per
//! person, extension days, transfer case and defaulter classification.

use serde::{Serialize, Serializer};

use super::columns::{
    ABSENT_DAYS_TOTAL, DEFAULTER, EXTENSION_DAYS, NAME, PAYABLE_DAYS_TOTAL, TRANSFER_CASE, YEAR,
};
use super::{CleanCells, ColumnKind, ColumnSpec, Record, Schema, Value};

pub(crate) const COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new(NAME, ColumnKind::Identity),
    ColumnSpec::new(PAYABLE_DAYS_TOTAL, ColumnKind::Number),
    ColumnSpec::new(ABSENT_DAYS_TOTAL, ColumnKind::Number),
    ColumnSpec::new(EXTENSION_DAYS, ColumnKind::Number),
    ColumnSpec::new(TRANSFER_CASE, ColumnKind::Text),
    ColumnSpec::new(DEFAULTER, ColumnKind::Text),
    ColumnSpec::new(YEAR, ColumnKind::Integer),
];

/// Defaulter classification of a person
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum DefaulterStatus {
    Defaulter,
    NonDefaulter,
    /// Any other label, kept verbatim
    Other(String),
    /// Blank cell
    #[default]
    Unspecified,
}

impl DefaulterStatus {
    /// Parse a trimmed sheet label
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let normalized: String = label
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "" => Self::Unspecified,
            "defaulter" => Self::Defaulter,
            "nondefaulter" => Self::NonDefaulter,
            _ => Self::Other(label.to_string()),
        }
    }

    /// The label as it appears in the sheet
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Defaulter => "Defaulter",
            Self::NonDefaulter => "Non-Defaulter",
            Self::Other(label) => label,
            Self::Unspecified => "",
        }
    }
}

impl Serialize for DefaulterStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// One person's yearly attendance summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "SUM of Payable Days")]
    pub payable_days: f64,
    #[serde(rename = "Updated Absent Days")]
    pub absent_days: f64,
    #[serde(rename = "Extension Days")]
    pub extension_days: f64,
    #[serde(rename = "Transfer case")]
    pub transfer_case: String,
    #[serde(rename = "Defaulter")]
    pub defaulter: DefaulterStatus,
    #[serde(rename = "Year")]
    pub year: i64,
}

impl Record for AnnualRecord {
    const SCHEMA: Schema = Schema::Annual;

    fn from_cells(cells: &CleanCells) -> Option<Self> {
        Some(Self {
            name: cells.text(NAME),
            payable_days: cells.number(PAYABLE_DAYS_TOTAL),
            absent_days: cells.number(ABSENT_DAYS_TOTAL),
            extension_days: cells.number(EXTENSION_DAYS),
            transfer_case: cells.text(TRANSFER_CASE),
            defaulter: DefaulterStatus::from_label(&cells.text(DEFAULTER)),
            year: cells.integer(YEAR),
        })
    }

    fn field(&self, column: &str) -> Option<Value> {
        let value = match column {
            NAME => Value::text(&self.name),
            PAYABLE_DAYS_TOTAL => Value::Float(self.payable_days),
            ABSENT_DAYS_TOTAL => Value::Float(self.absent_days),
            EXTENSION_DAYS => Value::Float(self.extension_days),
            TRANSFER_CASE => Value::text(&self.transfer_case),
            DEFAULTER => Value::text(self.defaulter.label()),
            YEAR => Value::Int(self.year),
            _ => return None,
        };
        Some(value)
    }

    fn person(&self) -> &str {
        &self.name
    }
}
