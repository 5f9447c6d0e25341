//! In-memory record source

use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use rustc_hash::FxHashMap;

use crate::error::{DashboardError, FetchErrorKind, Result};
use crate::models::RawRow;
use crate::reader::RecordSource;

/// A record source backed by rows held in memory
///
/// Subsheets keep their insertion order. A subsheet can be made to fail with
/// a given [`FetchErrorKind`], and every fetch is counted, which makes the
/// source useful for exercising caching and error recovery.
#[derive(Debug, Default)]
pub struct MemorySource {
    datasets: RwLock<FxHashMap<String, Vec<(String, Vec<RawRow>)>>>,
    failures: RwLock<FxHashMap<(String, String), FetchErrorKind>>,
    fetches: AtomicUsize,
}

impl MemorySource {
    /// Create an empty source
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`MemorySource::insert`]
    #[must_use]
    pub fn with_sheet(self, dataset_id: &str, subsheet: &str, rows: Vec<RawRow>) -> Self {
        self.insert(dataset_id, subsheet, rows);
        self
    }

    /// Add or replace a subsheet
    pub fn insert(&self, dataset_id: &str, subsheet: &str, rows: Vec<RawRow>) {
        let mut datasets = self
            .datasets
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let sheets = datasets.entry(dataset_id.to_string()).or_default();
        match sheets.iter_mut().find(|(name, _)| name == subsheet) {
            Some((_, existing)) => *existing = rows,
            None => sheets.push((subsheet.to_string(), rows)),
        }
    }

    /// Make every fetch of a subsheet fail until [`MemorySource::recover`]
    pub fn fail(&self, dataset_id: &str, subsheet: &str, kind: FetchErrorKind) {
        self.failures
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert((dataset_id.to_string(), subsheet.to_string()), kind);
    }

    /// Stop failing a subsheet
    pub fn recover(&self, dataset_id: &str, subsheet: &str) {
        self.failures
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(&(dataset_id.to_string(), subsheet.to_string()));
    }

    /// Number of `fetch_rows` calls so far
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

fn fetch_error(dataset: &str, subsheet: &str, kind: FetchErrorKind, message: String) -> DashboardError {
    DashboardError::RemoteFetch {
        dataset: dataset.to_string(),
        subsheet: subsheet.to_string(),
        kind,
        message,
    }
}

impl RecordSource for MemorySource {
    fn fetch_rows(&self, dataset_id: &str, subsheet: &str) -> Result<Vec<RawRow>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        let failure = self
            .failures
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(&(dataset_id.to_string(), subsheet.to_string()))
            .copied();
        if let Some(kind) = failure {
            return Err(fetch_error(dataset_id, subsheet, kind, "simulated failure".to_string()));
        }

        let datasets = self
            .datasets
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let sheets = datasets.get(dataset_id).ok_or_else(|| {
            fetch_error(
                dataset_id,
                subsheet,
                FetchErrorKind::NotFound,
                format!("Dataset '{dataset_id}' not found"),
            )
        })?;
        sheets
            .iter()
            .find(|(name, _)| name == subsheet)
            .map(|(_, rows)| rows.clone())
            .ok_or_else(|| {
                fetch_error(
                    dataset_id,
                    subsheet,
                    FetchErrorKind::NotFound,
                    format!("Subsheet '{subsheet}' not found"),
                )
            })
    }

    fn list_subsheets(&self, dataset_id: &str) -> Result<Vec<String>> {
        let datasets = self
            .datasets
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        datasets
            .get(dataset_id)
            .map(|sheets| sheets.iter().map(|(name, _)| name.clone()).collect())
            .ok_or_else(|| {
                fetch_error(
                    dataset_id,
                    "",
                    FetchErrorKind::NotFound,
                    format!("Dataset '{dataset_id}' not found"),
                )
            })
    }
}
