//! Dashboard pages
//!
//! Each page is a plain data model built from loaded tables and the current
//! picker selections. Pages are made of independent sections, each a
//! [`Section`] result, so a missing column or a chart that cannot be drawn
//! only blanks that one section.

pub mod annual;
pub mod chart;
pub mod daily;
pub mod individual;
pub mod info;
pub mod monthly;

use serde::{Serialize, Serializer};

use crate::dataset_manager::Loaded;
use crate::error::{DashboardError, NoticeLevel};
use crate::filter::{FilteredView, PredicateSet, filter};
use crate::metrics::Frame;
use crate::models::Record;

pub use annual::{AnnualFilters, AnnualOverview, AnnualPage};
pub use chart::{ChartKind, ChartSpec, palette};
pub use daily::{DailyFilters, DailyOverview, DailyPage};
pub use individual::{IndividualFilters, IndividualPage, PersonSummary};
pub use info::{DataInfoPage, TableInfo};
pub use monthly::{MonthlyFilters, MonthlyOverview, MonthlyPage};

/// Shown when a table has no rows before any filter is applied
pub const NO_DATA: &str = "No data available";

/// Shown when the selections leave nothing to display
pub const NO_MATCHING_ROWS: &str = "No rows match the selected filters";

/// One independently fallible part of a page
pub type Section<T> = Result<T, DashboardError>;

/// A labelled headline figure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Kpi {
    pub label: String,
    pub value: String,
}

impl Kpi {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A message shown in place of, or next to, page content
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    /// First rows of the data behind a chart that failed to render
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample: Option<Frame>,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
            sample: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
            sample: None,
        }
    }
}

impl From<&DashboardError> for Notice {
    fn from(err: &DashboardError) -> Self {
        let sample = match err {
            DashboardError::Render { sample, .. } => Some(sample.as_ref().clone()),
            _ => None,
        };
        Self {
            level: err.level(),
            message: err.to_string(),
            sample,
        }
    }
}

/// Filter a loaded table, or explain on the page why there is nothing to show
///
/// A failed fetch already carries its own warning, so an empty view of it adds
/// nothing further. Identical notices are only pushed once.
pub fn non_empty_view<'a, T: Record>(
    loaded: &'a Loaded<T>,
    predicates: &PredicateSet,
    notices: &mut Vec<Notice>,
) -> Option<FilteredView<'a, T>> {
    let notice = match filter(loaded.table.as_ref(), predicates) {
        Ok(view) if !view.is_empty() => return Some(view),
        Ok(_) if loaded.warning.is_some() => return None,
        Ok(_) if loaded.is_no_data() => Notice::warning(NO_DATA),
        Ok(_) => Notice::info(NO_MATCHING_ROWS),
        Err(err) => Notice::from(&err),
    };
    if !notices.contains(&notice) {
        notices.push(notice);
    }
    None
}

/// Serialize a section as its value, or as `{"notice": ...}` when it failed
pub fn serialize_section<T: Serialize, S: Serializer>(
    section: &Section<T>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    #[derive(Serialize)]
    struct Failed {
        notice: Notice,
    }

    match section {
        Ok(value) => value.serialize(serializer),
        Err(err) => Failed {
            notice: Notice::from(err),
        }
        .serialize(serializer),
    }
}

/// [`serialize_section`] for sections that are only built in some states
pub fn serialize_optional_section<T: Serialize, S: Serializer>(
    section: &Option<Section<T>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match section {
        Some(section) => serialize_section(section, serializer),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Page {
        #[serde(serialize_with = "serialize_section")]
        kpis: Section<Vec<Kpi>>,
        #[serde(serialize_with = "serialize_optional_section")]
        trend: Option<Section<u32>>,
    }

    #[test]
    fn test_failed_section_serializes_as_notice() {
        let page = Page {
            kpis: Err(DashboardError::data_shape("Salary", "total salary")),
            trend: None,
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["kpis"]["notice"]["level"], "Info");
        assert_eq!(
            json["kpis"]["notice"]["message"],
            "Column 'Salary' not available, skipping total salary"
        );
        assert!(json["trend"].is_null());
    }
}
