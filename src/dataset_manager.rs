//! Dataset Manager for loading and caching the dashboard tables
//!
//! This module provides a high-level interface over a [`RecordSource`]:
//! fetch a subsheet, clean it into typed records and keep the result for one
//! cache epoch (an hour for the annual and monthly tables, ten minutes for a
//! daily sheet by default).
//!
//! A failed fetch never propagates. The caller gets an empty table together
//! with the error as a warning, and nothing is cached so the next request
//! tries the source again.

use std::sync::Arc;
use std::time::Instant;

use log::{info, warn};

use crate::cache::{Clock, SystemClock, TtlCache};
use crate::clean::{CleanStatus, Cleaner};
use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result};
use crate::models::{AnnualRecord, DailyRecord, MonthlyRecord, NormalizedTable, Record};
use crate::reader::RecordSource;

/// Cache key: dataset id and subsheet name
type SheetKey = (String, String);

/// A cleaned table and whether the source had any rows for it
#[derive(Debug)]
struct CachedTable<T: Record> {
    table: Arc<NormalizedTable<T>>,
    status: CleanStatus,
}

/// A table as handed to the dashboard, with the fetch failure if there was one
#[derive(Debug)]
pub struct Loaded<T: Record> {
    /// The cleaned table; empty when the fetch failed
    pub table: Arc<NormalizedTable<T>>,
    /// `NoData` when the source returned no rows or could not be fetched
    pub status: CleanStatus,
    /// Why the table is empty, if it could not be fetched
    pub warning: Option<DashboardError>,
}

impl<T: Record> Loaded<T> {
    fn fresh(cached: &CachedTable<T>) -> Self {
        Self {
            table: Arc::clone(&cached.table),
            status: cached.status,
            warning: None,
        }
    }

    fn failed(err: DashboardError) -> Self {
        Self {
            table: Arc::new(NormalizedTable::empty()),
            status: CleanStatus::NoData,
            warning: Some(err),
        }
    }

    /// A successfully cleaned table
    #[must_use]
    pub fn new(table: NormalizedTable<T>) -> Self {
        let status = if table.is_empty() {
            CleanStatus::NoData
        } else {
            CleanStatus::Loaded
        };
        Self {
            table: Arc::new(table),
            status,
            warning: None,
        }
    }

    /// Whether there is nothing to show before any filter is applied
    #[must_use]
    pub fn is_no_data(&self) -> bool {
        self.status == CleanStatus::NoData || self.table.is_empty()
    }

    /// Whether the fetch succeeded
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.warning.is_none()
    }
}

/// Manager for the annual, monthly and daily tables
///
/// Owns its caches; several sessions can share one manager behind an `Arc`.
#[derive(Debug)]
pub struct DatasetManager<S: RecordSource> {
    source: S,
    config: DashboardConfig,
    cleaner: Cleaner,
    annual: TtlCache<SheetKey, CachedTable<AnnualRecord>>,
    monthly: TtlCache<SheetKey, CachedTable<MonthlyRecord>>,
    daily: TtlCache<SheetKey, CachedTable<DailyRecord>>,
    daily_sheets: TtlCache<String, Vec<String>>,
}

impl<S: RecordSource> DatasetManager<S> {
    /// Create a manager
    ///
    /// # Arguments
    /// * `source` - Where rows are fetched from
    /// * `config` - Dataset ids, sheet names and cache lifetimes
    /// * `clock` - Time source for cache expiry
    #[must_use]
    pub fn new(source: S, config: DashboardConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            cleaner: Cleaner::new(config.date_format.clone()),
            annual: TtlCache::new(config.annual_ttl(), Arc::clone(&clock)),
            monthly: TtlCache::new(config.annual_ttl(), Arc::clone(&clock)),
            daily: TtlCache::new(config.daily_ttl(), Arc::clone(&clock)),
            daily_sheets: TtlCache::new(config.daily_ttl(), clock),
            source,
            config,
        }
    }

    /// Create a manager on the system clock
    #[must_use]
    pub fn with_system_clock(source: S, config: DashboardConfig) -> Self {
        Self::new(source, config, Arc::new(SystemClock))
    }

    /// The configuration the manager was built with
    #[must_use]
    pub const fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// The underlying record source
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// The annual table (one row per person)
    pub fn load_annual(&self) -> Loaded<AnnualRecord> {
        self.load(&self.annual, &self.config.main_dataset, &self.config.annual_sheet)
    }

    /// The monthly table (one row per person and month)
    pub fn load_monthly(&self) -> Loaded<MonthlyRecord> {
        self.load(&self.monthly, &self.config.main_dataset, &self.config.monthly_sheet)
    }

    /// One daily attendance sheet
    pub fn load_daily(&self, sheet: &str) -> Loaded<DailyRecord> {
        self.load(&self.daily, &self.config.daily_dataset, sheet)
    }

    /// Daily sheets offered in the sheet picker, in the order the source lists
    /// them (sorted by name for a [`FileSource`](crate::reader::FileSource))
    ///
    /// # Errors
    /// Returns a `RemoteFetch` error if the daily dataset cannot be listed.
    pub fn daily_sheets(&self) -> Result<Vec<String>> {
        let sheets = self
            .daily_sheets
            .get_or_try_insert_with(self.config.daily_dataset.clone(), || {
                let all = self.source.list_subsheets(&self.config.daily_dataset)?;
                Ok::<_, DashboardError>(
                    all.into_iter()
                        .filter(|sheet| self.config.is_daily_sheet_visible(sheet))
                        .collect(),
                )
            })?;
        Ok(sheets.as_ref().clone())
    }

    /// Drop every cached table so the next load goes to the source
    pub fn reload(&self) {
        info!("Clearing cached tables");
        self.annual.clear();
        self.monthly.clear();
        self.daily.clear();
        self.daily_sheets.clear();
    }

    fn load<T: Record>(
        &self,
        cache: &TtlCache<SheetKey, CachedTable<T>>,
        dataset: &str,
        subsheet: &str,
    ) -> Loaded<T> {
        let key = (dataset.to_string(), subsheet.to_string());
        match cache.get_or_try_insert_with(key, || self.fetch_and_clean(dataset, subsheet)) {
            Ok(cached) => Loaded::fresh(&cached),
            Err(err) => {
                warn!("{err}");
                Loaded::failed(err)
            }
        }
    }

    fn fetch_and_clean<T: Record>(&self, dataset: &str, subsheet: &str) -> Result<CachedTable<T>> {
        let start = Instant::now();
        let rows = self.source.fetch_rows(dataset, subsheet)?;
        let outcome = self.cleaner.clean_rows::<T>(&rows);
        info!(
            "Loaded {} {} rows from {dataset}/{subsheet} in {:?}",
            outcome.table.len(),
            T::SCHEMA.label(),
            start.elapsed()
        );
        if outcome.is_no_data() {
            warn!("{dataset}/{subsheet} returned no rows");
        }
        Ok(CachedTable {
            status: outcome.status,
            table: Arc::new(outcome.table),
        })
    }
}
