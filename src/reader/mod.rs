//! Record sources
//!
//! A [`RecordSource`] hands back the raw rows of one subsheet of a dataset.
//! [`FileSource`] reads a directory tree laid out as
//! `<root>/<dataset>/<subsheet>.{json,csv,parquet}`; [`MemorySource`] holds
//! rows in memory for tests and demos.
//!
//! Reader internals work with `anyhow` errors and are converted into a typed
//! [`DashboardError::RemoteFetch`](crate::error::DashboardError::RemoteFetch)
//! at this boundary.

pub mod csv;
pub mod json;
pub mod memory;
pub mod parquet;

use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use itertools::Itertools;

use crate::error::Result;
use crate::error::util::{into_fetch_error, validate_directory};
use crate::models::RawRow;
use crate::utils::logging::{log_operation_complete, log_operation_start, log_warning};

pub use memory::MemorySource;

/// File extensions a subsheet may be stored with, in lookup order
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["json", "csv", "parquet"];

/// A provider of spreadsheet-like rows
pub trait RecordSource: Send + Sync {
    /// Fetch every row of one subsheet
    ///
    /// # Errors
    /// Returns a `RemoteFetch` error if the subsheet cannot be read.
    fn fetch_rows(&self, dataset_id: &str, subsheet: &str) -> Result<Vec<RawRow>>;

    /// Names of the subsheets of a dataset
    ///
    /// # Errors
    /// Returns a `RemoteFetch` error if the dataset cannot be listed.
    fn list_subsheets(&self, dataset_id: &str) -> Result<Vec<String>>;
}

/// Reads subsheets from files under a root directory
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    /// Create a source rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn dataset_dir(&self, dataset_id: &str) -> anyhow::Result<PathBuf> {
        let dir = self.root.join(dataset_id);
        validate_directory(&dir, "dataset")?;
        Ok(dir)
    }

    /// Locate the file backing a subsheet
    ///
    /// # Errors
    /// Returns an error if the dataset directory or the subsheet file is missing.
    pub fn resolve(&self, dataset_id: &str, subsheet: &str) -> anyhow::Result<PathBuf> {
        let dir = self.dataset_dir(dataset_id)?;
        SUPPORTED_EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{subsheet}.{ext}")))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| {
                anyhow::Error::new(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("Subsheet '{subsheet}' not found in {}", dir.display()),
                ))
            })
    }

    fn read_subsheet(&self, dataset_id: &str, subsheet: &str) -> anyhow::Result<Vec<RawRow>> {
        let path = self.resolve(dataset_id, subsheet)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => json::read_json(&path),
            Some("csv") => csv::read_csv(&path),
            _ => parquet::read_parquet(&path),
        }
    }
}

impl RecordSource for FileSource {
    fn fetch_rows(&self, dataset_id: &str, subsheet: &str) -> Result<Vec<RawRow>> {
        let target = format!("{dataset_id}/{subsheet}");
        let start = Instant::now();
        log_operation_start("Reading subsheet", &target);

        match self.read_subsheet(dataset_id, subsheet) {
            Ok(rows) => {
                log_operation_complete("read", &target, rows.len(), Some(start.elapsed()));
                Ok(rows)
            }
            Err(err) => {
                log_warning(&format!("Failed to read subsheet ({err:#})"), Some(&target));
                Err(into_fetch_error(dataset_id, subsheet, &err))
            }
        }
    }

    fn list_subsheets(&self, dataset_id: &str) -> Result<Vec<String>> {
        let list = || -> anyhow::Result<Vec<String>> {
            let dir = self.dataset_dir(dataset_id)?;
            let mut names = Vec::new();
            for entry in std::fs::read_dir(&dir)? {
                let path = entry?.path();
                let supported = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext));
                if let (true, Some(stem)) = (supported, path.file_stem().and_then(|s| s.to_str())) {
                    names.push(stem.to_string());
                }
            }
            Ok(names.into_iter().unique().sorted().collect())
        };
        list().map_err(|err| into_fetch_error(dataset_id, "", &err))
    }
}
