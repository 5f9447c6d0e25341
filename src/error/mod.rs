//! Error handling for the dashboard pipeline.
//!
//! Every failure the pipeline can surface is one variant of [`DashboardError`].
//! Library code returns these as values; the presentation boundary decides how
//! each one is shown (see [`DashboardError::level`]).

pub mod util;

use std::io;

use serde::Serialize;

use crate::metrics::Frame;

/// Why a fetch from the record source failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FetchErrorKind {
    /// Credentials were rejected or the source is not readable
    Auth,
    /// The dataset or subsheet does not exist
    NotFound,
    /// The round trip itself failed
    Transport,
    /// The source answered, but the payload could not be decoded into rows
    Decode,
}

impl std::fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Auth => "authentication failed",
            Self::NotFound => "not found",
            Self::Transport => "transport error",
            Self::Decode => "malformed data",
        };
        f.write_str(label)
    }
}

/// How loudly an error should be surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoticeLevel {
    /// Informational note; the rest of the section still renders
    Info,
    /// Data could not be loaded and an empty table was substituted
    Warning,
    /// The section could not be produced
    Error,
}

/// Specialized error type for the dashboard pipeline
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Network, authentication or not-found failure from the record source
    #[error("Error loading {subsheet} from {dataset} ({kind}): {message}")]
    RemoteFetch {
        dataset: String,
        subsheet: String,
        kind: FetchErrorKind,
        message: String,
    },

    /// An expected column is missing from a table
    #[error("Column '{column}' not available, skipping {context}")]
    DataShape { column: String, context: String },

    /// A derived table does not fit the requested chart
    #[error("Error generating {chart}: {reason}")]
    Render {
        chart: String,
        reason: String,
        /// First rows of the offending data, for diagnosis
        sample: Box<Frame>,
    },

    /// Invalid configuration or command line input
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error outside of the record source
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON encoding or decoding error outside of the record source
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DashboardError {
    /// Create a missing-column error
    pub fn data_shape(column: impl Into<String>, context: impl Into<String>) -> Self {
        Self::DataShape {
            column: column.into(),
            context: context.into(),
        }
    }

    /// Create a chart rendering error carrying a sample of the input frame
    pub fn render(chart: impl Into<String>, reason: impl Into<String>, sample: Frame) -> Self {
        Self::Render {
            chart: chart.into(),
            reason: reason.into(),
            sample: Box::new(sample),
        }
    }

    /// The notice level the presentation layer should use for this error
    #[must_use]
    pub const fn level(&self) -> NoticeLevel {
        match self {
            Self::RemoteFetch { .. } => NoticeLevel::Warning,
            Self::DataShape { .. } => NoticeLevel::Info,
            Self::Render { .. } | Self::Config(_) | Self::Io(_) | Self::Json(_) => {
                NoticeLevel::Error
            }
        }
    }
}

/// Result type for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;
