//! A Rust library for turning attendance and payroll spreadsheets into
//! dashboard views.
//!
//! Raw sheets are fetched from a [`RecordSource`], cleaned into typed
//! [`NormalizedTable`]s, cached with a time-to-live by the
//! [`DatasetManager`], narrowed by user [`filter`] predicates and finally
//! aggregated into KPIs and chart specifications for the dashboard pages.

pub mod cache;
pub mod clean;
pub mod config;
pub mod dashboard;
pub mod dataset_manager;
pub mod error;
pub mod filter;
pub mod metrics;
pub mod models;
pub mod reader;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::DashboardConfig;
pub use dataset_manager::{DatasetManager, Loaded};
pub use error::{DashboardError, FetchErrorKind, NoticeLevel, Result};
pub use models::{
    AnnualRecord, DailyRecord, DefaulterStatus, MonthlyRecord, NormalizedTable, RawRow, Schema,
    Value,
};

// Sources
pub use reader::{FileSource, MemorySource, RecordSource};

// Cleaning and filtering
pub use clean::{CleanOutcome, CleanStatus, CleanedDataset, Cleaner, clean, clean_rows};
pub use filter::{DateRange, FilteredView, Predicate, PredicateSet, Selection, filter};

// Aggregation
pub use metrics::{
    Frame, Tabular, category_breakdown, count_where, group_sum, mean_by, reshape_wide_to_long,
    residual, sum_by,
};
