//! Plain-text rendering of dashboard pages
//!
//! This is the presentation boundary: every failed section is turned into a
//! notice here, next to whatever else on the page could be built.

use std::fmt::Write;

use crate::dashboard::{
    AnnualPage, ChartSpec, DailyPage, DataInfoPage, IndividualPage, Kpi, MonthlyPage, Notice,
    Section,
};
use crate::error::NoticeLevel;
use crate::metrics::Frame;

/// Rows printed per chart or grid before truncating
pub const MAX_ROWS: usize = 20;

/// Render a page as text for a terminal
pub trait RenderText {
    fn render_text(&self) -> String;
}

/// One-line form of a notice
#[must_use]
pub fn render_notice(notice: &Notice) -> String {
    let prefix = match notice.level {
        NoticeLevel::Info => "info",
        NoticeLevel::Warning => "warning",
        NoticeLevel::Error => "error",
    };
    let mut out = format!("[{prefix}] {}", notice.message);
    if let Some(sample) = &notice.sample {
        out.push_str("\nData sample:\n");
        out.push_str(&render_frame(sample, MAX_ROWS));
    }
    out
}

/// A frame as an aligned text table
#[must_use]
pub fn render_frame(frame: &Frame, max_rows: usize) -> String {
    let cells: Vec<Vec<String>> = frame
        .rows()
        .iter()
        .take(max_rows)
        .map(|row| row.iter().map(ToString::to_string).collect())
        .collect();
    let widths: Vec<usize> = frame
        .columns()
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            cells
                .iter()
                .filter_map(|row| row.get(idx))
                .map(|cell| cell.chars().count())
                .chain([name.chars().count()])
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    write_row(&mut out, frame.columns().iter().map(String::as_str), &widths);
    for row in &cells {
        write_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    if frame.rows().len() > max_rows {
        let _ = writeln!(out, "  ... {} more rows", frame.rows().len() - max_rows);
    }
    out
}

fn write_row<'a>(out: &mut String, values: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let padded: Vec<String> = values
        .zip(widths)
        .map(|(value, &width)| format!("{value:<width$}"))
        .collect();
    let _ = writeln!(out, "  {}", padded.join(" | ").trim_end());
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n== {title} ==");
}

fn kpis(out: &mut String, kpis: &[Kpi]) {
    for kpi in kpis {
        let _ = writeln!(out, "  {}: {}", kpi.label, kpi.value);
    }
}

fn chart(out: &mut String, chart: &ChartSpec) {
    let _ = writeln!(out, "-- {} ({:?}: {} by {}) --", chart.title, chart.kind, chart.y, chart.x);
    if let Some(color) = &chart.color {
        let _ = writeln!(out, "  colour: {color}");
    }
    out.push_str(&render_frame(&chart.data, MAX_ROWS));
}

fn notices(out: &mut String, notices: &[Notice]) {
    for notice in notices {
        let _ = writeln!(out, "{}", render_notice(notice));
    }
}

fn section<T>(out: &mut String, section: &Section<T>, render: impl FnOnce(&mut String, &T)) {
    match section {
        Ok(value) => render(out, value),
        Err(err) => {
            let _ = writeln!(out, "{}", render_notice(&Notice::from(err)));
        }
    }
}

fn options(out: &mut String, label: &str, selected: &str, options: &[String]) {
    let _ = writeln!(out, "{label}: {selected} (options: {})", options.join(", "));
}

impl RenderText for AnnualPage {
    fn render_text(&self) -> String {
        let mut out = String::new();
        heading(&mut out, "DRC Attendance Dashboard");
        options(&mut out, "Article", &self.filters.name.to_string(), &self.name_options);
        notices(&mut out, &self.notices);
        if let Some(overview) = &self.overview {
            section(&mut out, &overview.kpis, |out, k| kpis(out, k));
            section(&mut out, &overview.attendance, chart);
            section(&mut out, &overview.defaulters, chart);
            section(&mut out, &overview.transfer_cases, chart);
            section(&mut out, &overview.extension_days, |out, spec| match spec {
                Some(spec) => chart(out, spec),
                None => {
                    let _ = writeln!(out, "{}", render_notice(&Notice::info("No extension days recorded")));
                }
            });
        }
        out
    }
}

impl RenderText for MonthlyPage {
    fn render_text(&self) -> String {
        let mut out = String::new();
        heading(&mut out, "Monthly Attendance Data");
        options(&mut out, "Month", &self.filters.month.to_string(), &self.month_options);
        notices(&mut out, &self.notices);
        if let Some(overview) = &self.overview {
            section(&mut out, &overview.kpis, |out, k| kpis(out, k));
            section(&mut out, &overview.salary, chart);
            section(&mut out, &overview.attendance, chart);
            if let Some(trend) = &overview.salary_trend {
                section(&mut out, trend, chart);
            }
        }
        out
    }
}

impl RenderText for IndividualPage {
    fn render_text(&self) -> String {
        let mut out = String::new();
        heading(&mut out, "Individual Article Dashboard");
        options(&mut out, "Article", &self.filters.name.to_string(), &self.name_options);
        options(&mut out, "Month", &self.filters.month.to_string(), &self.month_options);
        notices(&mut out, &self.notices);
        if let Some(summary) = &self.summary {
            section(&mut out, summary, |out, s| {
                let _ = writeln!(out, "Performance Overview for {}", s.name);
                kpis(out, &s.kpis);
            });
        }
        for spec in [&self.attendance, &self.salary].into_iter().flatten() {
            section(&mut out, spec, chart);
        }
        if let Some(records) = &self.annual_records {
            let _ = writeln!(out, "-- Annual Data --");
            out.push_str(&render_frame(records, MAX_ROWS));
        }
        if let Some(records) = &self.monthly_records {
            let _ = writeln!(out, "-- Monthly Data --");
            out.push_str(&render_frame(records, MAX_ROWS));
        }
        out
    }
}

impl RenderText for DailyPage {
    fn render_text(&self) -> String {
        let mut out = String::new();
        heading(&mut out, "Daily Attendance Dashboard");
        options(
            &mut out,
            "Sheet",
            self.sheet.as_deref().unwrap_or("-"),
            &self.sheet_options,
        );
        if let Some(range) = &self.available_range {
            let _ = writeln!(out, "Dates available: {} to {}", range.start, range.end);
        }
        options(&mut out, "Staff", &self.filters.staff.to_string(), &self.staff_options);
        notices(&mut out, &self.notices);
        if let Some(overview) = &self.overview {
            section(&mut out, &overview.kpis, |out, k| kpis(out, k));
            section(&mut out, &overview.attendance, chart);
            section(&mut out, &overview.hours_trend, chart);
            let _ = writeln!(out, "-- Daily Records --");
            out.push_str(&render_frame(&overview.records, MAX_ROWS));
        }
        out
    }
}

impl RenderText for DataInfoPage {
    fn render_text(&self) -> String {
        let mut out = String::new();
        heading(&mut out, "Data Info");
        notices(&mut out, &self.notices);
        for table in &self.tables {
            let _ = writeln!(out, "  {}: ({}, {})", table.name, table.rows, table.columns);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use crate::models::Value;

    #[test]
    fn test_render_frame_aligns_columns() {
        let frame = Frame::new(
            vec!["Name".into(), "Days".into()],
            vec![
                vec![Value::text("Asha"), Value::Float(20.0)],
                vec![Value::text("Ravindran"), Value::Float(3.5)],
                vec![Value::text("Meena"), Value::Float(1.0)],
            ],
        );
        let text = render_frame(&frame, 2);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "  Name      | Days");
        assert_eq!(lines[1], "  Asha      | 20");
        assert_eq!(lines[2], "  Ravindran | 3.5");
        assert_eq!(lines[3], "  ... 1 more rows");
    }

    #[test]
    fn test_render_notice_levels() {
        let err = DashboardError::data_shape("Salary", "salary chart");
        assert_eq!(
            render_notice(&Notice::from(&err)),
            "[info] Column 'Salary' not available, skipping salary chart"
        );
        let sample = Frame::new(vec!["Name".into()], vec![vec![Value::text("Asha")]]);
        let err = DashboardError::render("Salary Distribution", "column 'Salary' is missing", sample);
        let text = render_notice(&Notice::from(&err));
        assert!(text.starts_with("[error] Error generating Salary Distribution"));
        assert!(text.contains("Data sample:"));
    }
}
