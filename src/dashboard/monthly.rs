//! Monthly payroll page

use serde::Serialize;

use super::chart::{ChartKind, ChartSpec, palette};
use super::{
    Kpi, Notice, Section, non_empty_view, serialize_optional_section, serialize_section,
};
use crate::dataset_manager::{DatasetManager, Loaded};
use crate::filter::{FilteredView, Predicate, PredicateSet, Selection, selection_options};
use crate::metrics::{group_sum, reshape_wide_to_long, sum_by};
use crate::models::columns::{ABSENT_DAYS, MONTH, NAME, PAYABLE_DAYS, SALARY};
use crate::models::{MonthlyRecord, NormalizedTable, Value};
use crate::reader::RecordSource;
use crate::utils::format::{format_currency, format_number};

/// Picker selections of the monthly page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonthlyFilters {
    pub month: Selection,
}

/// The monthly overview
#[derive(Debug, Serialize)]
pub struct MonthlyPage {
    pub filters: MonthlyFilters,
    pub month_options: Vec<String>,
    pub notices: Vec<Notice>,
    /// `None` when no rows match the filters; a notice says why
    pub overview: Option<MonthlyOverview>,
}

/// KPIs and charts for the selected month
#[derive(Debug, Serialize)]
pub struct MonthlyOverview {
    #[serde(serialize_with = "serialize_section")]
    pub kpis: Section<Vec<Kpi>>,
    #[serde(serialize_with = "serialize_section")]
    pub salary: Section<ChartSpec>,
    #[serde(serialize_with = "serialize_section")]
    pub attendance: Section<ChartSpec>,
    /// Only built when every month is selected
    #[serde(serialize_with = "serialize_optional_section")]
    pub salary_trend: Option<Section<ChartSpec>>,
}

impl MonthlyPage {
    /// Load the monthly table and build the page
    pub fn load<S: RecordSource>(manager: &DatasetManager<S>, filters: MonthlyFilters) -> Self {
        Self::build(
            &manager.load_monthly(),
            filters,
            &manager.config().currency_symbol,
        )
    }

    /// Build the page from an already loaded table
    #[must_use]
    pub fn build(loaded: &Loaded<MonthlyRecord>, filters: MonthlyFilters, currency: &str) -> Self {
        let table = loaded.table.as_ref();
        let mut notices: Vec<Notice> = loaded.warning.iter().map(Notice::from).collect();

        let predicates = PredicateSet::new().with(Predicate::Month(filters.month.clone()));
        let overview = non_empty_view(loaded, &predicates, &mut notices)
            .map(|view| MonthlyOverview::build(table, &view, &filters, currency));

        Self {
            month_options: selection_options(table, MONTH),
            filters,
            notices,
            overview,
        }
    }
}

impl MonthlyOverview {
    /// Build the sections; the salary trend always covers the whole table
    #[must_use]
    pub fn build(
        table: &NormalizedTable<MonthlyRecord>,
        view: &FilteredView<'_, MonthlyRecord>,
        filters: &MonthlyFilters,
        currency: &str,
    ) -> Self {
        Self {
            kpis: kpis(view, currency),
            salary: salary_chart(view, currency),
            attendance: attendance_chart(view),
            salary_trend: filters
                .month
                .is_all()
                .then(|| salary_trend(table, currency)),
        }
    }
}

fn kpis(view: &FilteredView<'_, MonthlyRecord>, currency: &str) -> Section<Vec<Kpi>> {
    let salary = Value::Float(sum_by(view, SALARY)?);
    Ok(vec![
        Kpi::new("Total Salary", format_currency(&salary, currency)),
        Kpi::new("Total Payable Days", format_number(sum_by(view, PAYABLE_DAYS)?)),
        Kpi::new("Total Absent Days", format_number(sum_by(view, ABSENT_DAYS)?)),
    ])
}

fn salary_chart(view: &FilteredView<'_, MonthlyRecord>, currency: &str) -> Section<ChartSpec> {
    ChartSpec::new(
        "Salary Distribution",
        ChartKind::Bar,
        NAME,
        SALARY,
        view.to_frame(),
    )
    .color_by(NAME)
    .label(SALARY, format!("Amount ({currency})"))
    .label(NAME, "Article")
    .validate()
}

fn attendance_chart(view: &FilteredView<'_, MonthlyRecord>) -> Section<ChartSpec> {
    let long = reshape_wide_to_long(
        view,
        &[NAME, MONTH],
        &[PAYABLE_DAYS, ABSENT_DAYS],
        "Type",
        "Days",
    )?;
    ChartSpec::new("Attendance Days", ChartKind::GroupedBar, NAME, "Days", long)
        .color_by("Type")
        .map_color(PAYABLE_DAYS, palette::PRESENT)
        .map_color(ABSENT_DAYS, palette::ABSENT)
        .label(NAME, "Article")
        .label("Days", "Number of Days")
        .validate()
}

fn salary_trend(table: &NormalizedTable<MonthlyRecord>, currency: &str) -> Section<ChartSpec> {
    let trend = group_sum(&table.view(), &[MONTH, NAME], SALARY)?;
    ChartSpec::new("Salary Trend Over Months", ChartKind::Line, MONTH, SALARY, trend)
        .color_by(NAME)
        .label(SALARY, format!("Amount ({currency})"))
        .validate()
}
