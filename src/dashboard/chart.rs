//! Chart specifications
//!
//! The core never draws anything. A [`ChartSpec`] names the chart kind, the
//! axes, the colour column and its colour map, and carries the long-form
//! frame a renderer needs.

use std::collections::BTreeMap;

use itertools::Itertools;
use serde::Serialize;

use crate::error::{DashboardError, Result};
use crate::metrics::{Frame, Tabular};

/// Fixed category colours
pub mod palette {
    pub const PRESENT: &str = "#7B68EE";
    pub const ABSENT: &str = "#FFEFD5";
    pub const DEFAULTER: &str = "#FF6B6B";
    pub const NON_DEFAULTER: &str = "#66BB6A";
    pub const OTHER: &str = "#CCCCCC";

    /// Colour for a category label, if it has a fixed one
    #[must_use]
    pub fn color_for(label: &str) -> Option<&'static str> {
        match label {
            "Present" | "Payable" | "Yes" => Some(PRESENT),
            "Absent" | "No" => Some(ABSENT),
            "Defaulter" => Some(DEFAULTER),
            "Non-Defaulter" => Some(NON_DEFAULTER),
            "Other Days" => Some(OTHER),
            _ => None,
        }
    }
}

/// Kind of chart to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    Bar,
    GroupedBar,
    Line,
    Pie,
    Donut,
}

/// Everything a renderer needs to draw one chart
///
/// For pie and donut charts `x` names the slice labels and `y` the slice
/// values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub kind: ChartKind,
    pub x: String,
    pub y: String,
    pub color: Option<String>,
    pub color_map: BTreeMap<String, String>,
    /// Display names for columns
    pub labels: BTreeMap<String, String>,
    pub data: Frame,
}

impl ChartSpec {
    pub fn new(
        title: impl Into<String>,
        kind: ChartKind,
        x: impl Into<String>,
        y: impl Into<String>,
        data: Frame,
    ) -> Self {
        Self {
            title: title.into(),
            kind,
            x: x.into(),
            y: y.into(),
            color: None,
            color_map: BTreeMap::new(),
            labels: BTreeMap::new(),
            data,
        }
    }

    /// Colour by a column, using the palette for categories that have a fixed colour
    #[must_use]
    pub fn color_by(mut self, column: impl Into<String>) -> Self {
        let column = column.into();
        if let Some(values) = self.data.column_values(&column) {
            for label in values.iter().map(ToString::to_string).unique() {
                if let Some(color) = palette::color_for(&label) {
                    self.color_map.insert(label, color.to_string());
                }
            }
        }
        self.color = Some(column);
        self
    }

    /// Give a category an explicit colour
    #[must_use]
    pub fn map_color(mut self, category: impl Into<String>, color: &str) -> Self {
        self.color_map.insert(category.into(), color.to_string());
        self
    }

    /// Set the display name of a column
    #[must_use]
    pub fn label(mut self, column: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(column.into(), label.into());
        self
    }

    /// Check that the axes and colour column exist in the data
    ///
    /// # Errors
    /// Returns a `Render` error carrying the first five data rows.
    pub fn validate(self) -> Result<Self> {
        let referenced = [Some(&self.x), Some(&self.y), self.color.as_ref()];
        if let Some(missing) = referenced
            .into_iter()
            .flatten()
            .find(|column| !self.data.has_column(column))
        {
            return Err(DashboardError::render(
                self.title.clone(),
                format!("column '{missing}' is not in the chart data"),
                self.data.head(5),
            ));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Value;

    fn frame() -> Frame {
        Frame::new(
            vec!["Name".into(), "Defaulter".into(), "Days".into()],
            (0..8)
                .map(|i| {
                    vec![
                        Value::text(format!("P{i}")),
                        Value::text(if i % 2 == 0 { "Defaulter" } else { "Non-Defaulter" }),
                        Value::Float(f64::from(i)),
                    ]
                })
                .collect(),
        )
    }

    #[test]
    fn test_color_by_uses_palette() {
        let chart = ChartSpec::new("Defaulter Status", ChartKind::Bar, "Name", "Days", frame())
            .color_by("Defaulter")
            .validate()
            .unwrap();
        assert_eq!(chart.color_map.get("Defaulter").map(String::as_str), Some(palette::DEFAULTER));
        assert_eq!(chart.color_map.len(), 2);
    }

    #[test]
    fn test_missing_axis_is_render_error() {
        let err = ChartSpec::new("Salary", ChartKind::Bar, "Name", "Salary", frame())
            .validate()
            .unwrap_err();
        match err {
            DashboardError::Render { chart, sample, .. } => {
                assert_eq!(chart, "Salary");
                assert_eq!(sample.rows().len(), 5);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
