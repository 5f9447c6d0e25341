//! Dataset cleaning
//!
//! Turns raw rows from a record source into a [`NormalizedTable`] of typed
//! records:
//!
//! - column names are trimmed before any lookup
//! - declared numeric columns are coerced, unparseable values become zero
//! - identity text is trimmed; rows with a blank or `nan` identity are dropped
//! - daily dates are parsed day first; rows with an unparseable date are dropped
//!
//! Row order is preserved and cleaning an already clean table is a no-op.

pub mod coerce;
pub mod date_utils;

use log::{debug, info, warn};

use crate::models::{
    AnnualRecord, CleanCells, ColumnKind, DailyRecord, MonthlyRecord, NormalizedTable, RawRow,
    Record, Schema, Value,
};

pub use date_utils::DateFormatConfig;

use coerce::{clean_text, coerce_integer, coerce_number, is_placeholder};

/// Whether the source had anything to clean
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanStatus {
    /// Rows were supplied
    Loaded,
    /// The source returned no rows at all
    NoData,
}

/// Result of cleaning one sheet
#[derive(Debug, Clone, PartialEq)]
pub struct CleanOutcome<T: Record> {
    /// The cleaned table
    pub table: NormalizedTable<T>,
    /// Whether any rows were supplied
    pub status: CleanStatus,
    /// Rows removed for a blank identity or an unparseable date
    pub dropped_rows: usize,
    /// Declared columns the source did not carry
    pub missing_columns: Vec<&'static str>,
}

impl<T: Record> CleanOutcome<T> {
    fn no_data() -> Self {
        Self {
            table: NormalizedTable::empty(),
            status: CleanStatus::NoData,
            dropped_rows: 0,
            missing_columns: Vec::new(),
        }
    }

    /// Whether the source returned no rows
    #[must_use]
    pub fn is_no_data(&self) -> bool {
        self.status == CleanStatus::NoData
    }
}

/// A cleaned sheet of any schema
#[derive(Debug, Clone, PartialEq)]
pub enum CleanedDataset {
    Annual(CleanOutcome<AnnualRecord>),
    Monthly(CleanOutcome<MonthlyRecord>),
    Daily(CleanOutcome<DailyRecord>),
}

impl CleanedDataset {
    /// The schema of the cleaned rows
    #[must_use]
    pub const fn schema(&self) -> Schema {
        match self {
            Self::Annual(_) => Schema::Annual,
            Self::Monthly(_) => Schema::Monthly,
            Self::Daily(_) => Schema::Daily,
        }
    }

    /// Number of rows kept
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Annual(o) => o.table.len(),
            Self::Monthly(o) => o.table.len(),
            Self::Daily(o) => o.table.len(),
        }
    }

    /// Whether no rows were kept
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cleaner for raw sheet rows
#[derive(Debug, Clone, Default)]
pub struct Cleaner {
    date_config: DateFormatConfig,
}

impl Cleaner {
    /// Create a cleaner with a custom date format configuration
    #[must_use]
    pub const fn new(date_config: DateFormatConfig) -> Self {
        Self { date_config }
    }

    /// Clean raw rows into the typed variant for `schema`
    #[must_use]
    pub fn clean(&self, rows: &[RawRow], schema: Schema) -> CleanedDataset {
        match schema {
            Schema::Annual => CleanedDataset::Annual(self.clean_rows(rows)),
            Schema::Monthly => CleanedDataset::Monthly(self.clean_rows(rows)),
            Schema::Daily => CleanedDataset::Daily(self.clean_rows(rows)),
        }
    }

    /// Clean raw rows into records of type `T`
    #[must_use]
    pub fn clean_rows<T: Record>(&self, rows: &[RawRow]) -> CleanOutcome<T> {
        let schema = T::SCHEMA;
        if rows.is_empty() {
            warn!("No {} rows to clean", schema.label());
            return CleanOutcome::no_data();
        }

        let present: Vec<&'static str> = schema
            .columns()
            .iter()
            .map(|spec| spec.name)
            .filter(|name| {
                rows.iter()
                    .any(|row| row.iter().any(|(column, _)| column.trim() == *name))
            })
            .collect();
        let missing_columns: Vec<&'static str> = schema
            .columns()
            .iter()
            .map(|spec| spec.name)
            .filter(|name| !present.contains(name))
            .collect();
        if !missing_columns.is_empty() {
            warn!(
                "{} sheet is missing columns: {}",
                schema.label(),
                missing_columns.join(", ")
            );
        }

        let mut records = Vec::with_capacity(rows.len());
        let mut dropped_rows = 0;
        for row in rows {
            match self
                .coerce_row(row, schema)
                .and_then(|cells| T::from_cells(&cells))
            {
                Some(record) => records.push(record),
                None => dropped_rows += 1,
            }
        }

        if dropped_rows > 0 {
            debug!(
                "Dropped {dropped_rows} {} rows with blank identity or unparseable date",
                schema.label()
            );
        }
        info!(
            "Cleaned {} {} rows ({} dropped)",
            records.len(),
            schema.label(),
            dropped_rows
        );

        CleanOutcome {
            table: NormalizedTable::new(present.iter().map(|c| (*c).to_string()).collect(), records),
            status: CleanStatus::Loaded,
            dropped_rows,
            missing_columns,
        }
    }

    /// Coerce one row's declared cells, or `None` if the row must be dropped
    fn coerce_row(&self, row: &RawRow, schema: Schema) -> Option<CleanCells> {
        let mut cells = CleanCells::default();
        for spec in schema.columns() {
            let raw = row
                .iter()
                .find(|(column, _)| column.trim() == spec.name)
                .map(|(_, value)| value);

            let value = match (spec.kind, raw) {
                (ColumnKind::Identity, Some(raw)) => {
                    let text = clean_text(raw);
                    if is_placeholder(&text) {
                        return None;
                    }
                    Value::Text(text)
                }
                (ColumnKind::Date, Some(raw)) => {
                    Value::Date(date_utils::parse_date_value(raw, &self.date_config)?)
                }
                (ColumnKind::Identity | ColumnKind::Date, None) => return None,
                (ColumnKind::Text, Some(raw)) => Value::Text(clean_text(raw)),
                (ColumnKind::Number, Some(raw)) => Value::Float(coerce_number(raw)),
                (ColumnKind::Integer, Some(raw)) => Value::Int(coerce_integer(raw)),
                (_, None) => continue,
            };
            cells.insert(spec.name, value);
        }
        Some(cells)
    }
}

/// Clean raw rows with the default day-first date formats
#[must_use]
pub fn clean(rows: &[RawRow], schema: Schema) -> CleanedDataset {
    Cleaner::default().clean(rows, schema)
}

/// Clean raw rows into records of type `T` with the default date formats
#[must_use]
pub fn clean_rows<T: Record>(rows: &[RawRow]) -> CleanOutcome<T> {
    Cleaner::default().clean_rows(rows)
}
