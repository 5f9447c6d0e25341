//! Utility functions for error handling
//!
//! File access helpers used by the readers, and the conversion from an
//! `anyhow` error chain into a typed [`DashboardError::RemoteFetch`].

use std::fs;
use std::io;
use std::path::Path;

use anyhow::Context;

use crate::error::{DashboardError, FetchErrorKind};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
///
/// # Returns
/// * `anyhow::Result<fs::File>` - The opened file or a detailed error
pub fn safe_open_file(path: &Path, purpose: &str) -> anyhow::Result<fs::File> {
    if !path.is_file() {
        let missing = io::Error::new(
            io::ErrorKind::NotFound,
            format!("File not found: {}", path.display()),
        );
        return Err(anyhow::Error::new(missing).context(format!("Needed for: {purpose}")));
    }

    fs::File::open(path).with_context(|| {
        format!("Failed to open {} for: {purpose}", path.display())
    })
}

/// Safely read a file to string with rich error information
pub fn safe_read_to_string(path: &Path, purpose: &str) -> anyhow::Result<String> {
    let mut file = safe_open_file(path, purpose)?;
    let mut content = String::new();
    io::Read::read_to_string(&mut file, &mut content)
        .with_context(|| format!("Failed to read {} for: {purpose}", path.display()))?;
    Ok(content)
}

/// Check that a directory exists and is readable
pub fn validate_directory(path: &Path, purpose: &str) -> anyhow::Result<()> {
    if !path.is_dir() {
        let missing = io::Error::new(
            io::ErrorKind::NotFound,
            format!("Directory not found: {}", path.display()),
        );
        return Err(anyhow::Error::new(missing).context(format!("Expected a directory for: {purpose}")));
    }

    fs::read_dir(path)
        .map(|_| ())
        .with_context(|| format!("Failed to access {} for: {purpose}", path.display()))
}

/// Classify an error chain into a fetch failure kind
#[must_use]
pub fn classify(err: &anyhow::Error) -> FetchErrorKind {
    for cause in err.chain() {
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            return match io_err.kind() {
                io::ErrorKind::NotFound => FetchErrorKind::NotFound,
                io::ErrorKind::PermissionDenied => FetchErrorKind::Auth,
                io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof => {
                    FetchErrorKind::Decode
                }
                _ => FetchErrorKind::Transport,
            };
        }
        if cause.is::<serde_json::Error>()
            || cause.is::<csv::Error>()
            || cause.is::<parquet::errors::ParquetError>()
            || cause.is::<arrow::error::ArrowError>()
        {
            return FetchErrorKind::Decode;
        }
    }
    FetchErrorKind::Transport
}

/// Convert a reader failure into a typed fetch error
#[must_use]
pub fn into_fetch_error(dataset: &str, subsheet: &str, err: &anyhow::Error) -> DashboardError {
    DashboardError::RemoteFetch {
        dataset: dataset.to_string(),
        subsheet: subsheet.to_string(),
        kind: classify(err),
        message: format!("{err:#}"),
    }
}
