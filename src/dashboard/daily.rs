//! Daily attendance page

use serde::Serialize;

use super::chart::{ChartKind, ChartSpec};
use super::{Kpi, Notice, Section, serialize_section};
use crate::dataset_manager::{DatasetManager, Loaded};
use crate::filter::{
    ALL, DateRange, FilteredView, Predicate, PredicateSet, Selection, date_bounds, filter,
    selection_options,
};
use crate::metrics::{Frame, breakdown_frame, category_breakdown, count_where, mean_by};
use crate::models::DailyRecord;
use crate::models::columns::{ATTENDANCE, DATE, HOURS_WORKED, STAFF_NAME};
use crate::reader::RecordSource;

/// Shown instead of the overview when nothing matches
pub const NO_DAILY_DATA: &str = "No daily data available for selected filters";

/// Picker selections of the daily page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DailyFilters {
    /// Daily sheet; the first available sheet when `None`
    pub sheet: Option<String>,
    pub staff: Selection,
    /// Defaults to the full range of the sheet
    pub date_range: Option<DateRange>,
}

/// The daily overview
#[derive(Debug, Serialize)]
pub struct DailyPage {
    pub filters: DailyFilters,
    pub sheet_options: Vec<String>,
    /// The sheet actually shown
    pub sheet: Option<String>,
    /// Earliest and latest date in the sheet
    pub available_range: Option<DateRange>,
    pub staff_options: Vec<String>,
    pub notices: Vec<Notice>,
    /// `None` when no rows match the filters
    pub overview: Option<DailyOverview>,
}

/// KPIs, charts and records for the selection
#[derive(Debug, Serialize)]
pub struct DailyOverview {
    #[serde(serialize_with = "serialize_section")]
    pub kpis: Section<Vec<Kpi>>,
    #[serde(serialize_with = "serialize_section")]
    pub attendance: Section<ChartSpec>,
    #[serde(serialize_with = "serialize_section")]
    pub hours_trend: Section<ChartSpec>,
    pub records: Frame,
}

impl DailyPage {
    /// List the daily sheets, load the selected one and build the page
    pub fn load<S: RecordSource>(manager: &DatasetManager<S>, filters: DailyFilters) -> Self {
        let mut notices = Vec::new();
        let sheet_options = manager.daily_sheets().unwrap_or_else(|err| {
            notices.push(Notice::from(&err));
            Vec::new()
        });
        let sheet = filters
            .sheet
            .clone()
            .or_else(|| sheet_options.first().cloned());

        let Some(sheet) = sheet else {
            notices.push(Notice::warning(NO_DAILY_DATA));
            return Self {
                filters,
                sheet_options,
                sheet: None,
                available_range: None,
                staff_options: vec![ALL.to_string()],
                notices,
                overview: None,
            };
        };

        let loaded = manager.load_daily(&sheet);
        let mut page = Self::build(&loaded, filters);
        notices.append(&mut page.notices);
        page.notices = notices;
        page.sheet_options = sheet_options;
        page.sheet = Some(sheet);
        page
    }

    /// Build the page from an already loaded sheet
    ///
    /// The date range is applied first, then the staff selection; the staff
    /// options come from the date-filtered rows.
    #[must_use]
    pub fn build(loaded: &Loaded<DailyRecord>, filters: DailyFilters) -> Self {
        let table = loaded.table.as_ref();
        let mut notices: Vec<Notice> = loaded.warning.iter().map(Notice::from).collect();
        let available_range = date_bounds(table);
        let range = filters.date_range.or(available_range);

        let dated = PredicateSet::new().with(Predicate::DateWithin(range));
        let staff_options = match filter(table, &dated) {
            Ok(view) => selection_options(&view.to_table(), STAFF_NAME),
            Err(_) => vec![ALL.to_string()],
        };

        let selected = filter(table, &dated.with(Predicate::Staff(filters.staff.clone())));
        let overview = match selected {
            Ok(view) if view.is_empty() => None,
            Ok(view) => Some(DailyOverview::build(&view, &filters.staff)),
            Err(err) => {
                notices.push(Notice::from(&err));
                None
            }
        };
        if overview.is_none() {
            notices.push(Notice::warning(NO_DAILY_DATA));
        }

        Self {
            sheet: filters.sheet.clone(),
            filters,
            sheet_options: Vec::new(),
            available_range,
            staff_options,
            notices,
            overview,
        }
    }
}

impl DailyOverview {
    #[must_use]
    pub fn build(view: &FilteredView<'_, DailyRecord>, staff: &Selection) -> Self {
        Self {
            kpis: kpis(view),
            attendance: attendance_chart(view),
            hours_trend: hours_trend(view, staff),
            records: view.to_frame(),
        }
    }
}

fn kpis(view: &FilteredView<'_, DailyRecord>) -> Section<Vec<Kpi>> {
    let total = view.len();
    let mut kpis = vec![Kpi::new("Total Days Recorded", total.to_string())];
    if view.has_column(HOURS_WORKED) {
        let average = mean_by(view, HOURS_WORKED)?.unwrap_or(0.0);
        kpis.push(Kpi::new("Average Hours Worked", format!("{average:.1} hours")));
    }
    if view.has_column(ATTENDANCE) {
        let present = count_where(view, ATTENDANCE, "Present")?;
        kpis.push(Kpi::new("Days Present", format!("{present}/{total}")));
    }
    Ok(kpis)
}

fn attendance_chart(view: &FilteredView<'_, DailyRecord>) -> Section<ChartSpec> {
    let counts = category_breakdown(view, ATTENDANCE)?;
    ChartSpec::new(
        "Attendance Status",
        ChartKind::Pie,
        "Status",
        "Count",
        breakdown_frame(&counts, "Status", "Count"),
    )
    .color_by("Status")
    .validate()
}

fn hours_trend(view: &FilteredView<'_, DailyRecord>, staff: &Selection) -> Section<ChartSpec> {
    let sorted = view.sorted_by(DATE, false)?;
    let chart = ChartSpec::new(
        "Hours Worked Trend",
        ChartKind::Line,
        DATE,
        HOURS_WORKED,
        sorted.to_frame(),
    )
    .label(HOURS_WORKED, "Hours");
    if staff.is_all() {
        chart.color_by(STAFF_NAME).validate()
    } else {
        chart.validate()
    }
}
