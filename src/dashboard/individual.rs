//! Individual article page

use serde::Serialize;

use super::chart::{ChartKind, ChartSpec, palette};
use super::{Kpi, Notice, Section, non_empty_view, serialize_optional_section};
use crate::dataset_manager::{DatasetManager, Loaded};
use crate::filter::{FilteredView, Predicate, PredicateSet, Selection, selection_options};
use crate::metrics::{Frame, reshape_wide_to_long, residual, sum_by};
use crate::models::columns::{
    ABSENT_DAYS, ABSENT_DAYS_TOTAL, DAYS_IN_MONTH, MONTH, NAME, PAYABLE_DAYS, PAYABLE_DAYS_TOTAL,
    SALARY,
};
use crate::models::{AnnualRecord, MonthlyRecord, Value};
use crate::reader::RecordSource;
use crate::utils::format::format_number;

/// Picker selections of the individual page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndividualFilters {
    pub name: Selection,
    pub month: Selection,
}

/// Headline figures for one person
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonSummary {
    pub name: String,
    pub kpis: Vec<Kpi>,
}

/// The individual overview
#[derive(Debug, Serialize)]
pub struct IndividualPage {
    pub filters: IndividualFilters,
    pub name_options: Vec<String>,
    pub month_options: Vec<String>,
    pub notices: Vec<Notice>,
    /// Only built when a single person is selected
    #[serde(serialize_with = "serialize_optional_section")]
    pub summary: Option<Section<PersonSummary>>,
    /// Monthly trend, or a breakdown pie for a single month
    #[serde(serialize_with = "serialize_optional_section")]
    pub attendance: Option<Section<ChartSpec>>,
    /// Only built when the monthly sheet carries salaries
    #[serde(serialize_with = "serialize_optional_section")]
    pub salary: Option<Section<ChartSpec>>,
    pub annual_records: Option<Frame>,
    pub monthly_records: Option<Frame>,
}

impl IndividualPage {
    /// Load the annual and monthly tables and build the page
    pub fn load<S: RecordSource>(manager: &DatasetManager<S>, filters: IndividualFilters) -> Self {
        Self::build(&manager.load_annual(), &manager.load_monthly(), filters)
    }

    /// Build the page from already loaded tables
    #[must_use]
    pub fn build(
        annual: &Loaded<AnnualRecord>,
        monthly: &Loaded<MonthlyRecord>,
        filters: IndividualFilters,
    ) -> Self {
        let mut notices: Vec<Notice> = annual
            .warning
            .iter()
            .chain(monthly.warning.iter())
            .map(Notice::from)
            .collect();

        let annual_predicates = PredicateSet::new().with(Predicate::Name(filters.name.clone()));
        let monthly_predicates = annual_predicates
            .clone()
            .with(Predicate::Month(filters.month.clone()));

        let annual_view = non_empty_view(annual, &annual_predicates, &mut notices);
        let monthly_view = non_empty_view(monthly, &monthly_predicates, &mut notices);

        let summary = match (&filters.name, &annual_view) {
            (Selection::Only(name), Some(view)) => Some(person_summary(name, view)),
            _ => None,
        };
        let attendance = monthly_view
            .as_ref()
            .map(|view| attendance_chart(view, &filters.month));
        let salary = monthly_view
            .as_ref()
            .filter(|view| view.has_column(SALARY))
            .map(|view| salary_chart(view, &filters.month));

        Self {
            name_options: selection_options(annual.table.as_ref(), NAME),
            month_options: selection_options(monthly.table.as_ref(), MONTH),
            annual_records: annual_view.as_ref().map(FilteredView::to_frame),
            monthly_records: monthly_view.as_ref().map(FilteredView::to_frame),
            filters,
            notices,
            summary,
            attendance,
            salary,
        }
    }
}

fn person_summary(name: &str, view: &FilteredView<'_, AnnualRecord>) -> Section<PersonSummary> {
    let status = view
        .first()
        .map(|row| row.defaulter.label())
        .filter(|label| !label.is_empty())
        .unwrap_or("Unknown");
    Ok(PersonSummary {
        name: name.to_string(),
        kpis: vec![
            Kpi::new("Total Present Days", format_number(sum_by(view, PAYABLE_DAYS_TOTAL)?)),
            Kpi::new("Total Absent Days", format_number(sum_by(view, ABSENT_DAYS_TOTAL)?)),
            Kpi::new("Defaulter Status", status),
        ],
    })
}

fn attendance_chart(view: &FilteredView<'_, MonthlyRecord>, month: &Selection) -> Section<ChartSpec> {
    if month.is_all() {
        let long = reshape_wide_to_long(view, &[MONTH], &[PAYABLE_DAYS, ABSENT_DAYS], "Type", "Days")?;
        return ChartSpec::new("Attendance Breakdown", ChartKind::Line, MONTH, "Days", long)
            .color_by("Type")
            .map_color(PAYABLE_DAYS, palette::PRESENT)
            .map_color(ABSENT_DAYS, palette::ABSENT)
            .validate();
    }

    let payable = sum_by(view, PAYABLE_DAYS)?;
    let absent = sum_by(view, ABSENT_DAYS)?;
    let other = residual(sum_by(view, DAYS_IN_MONTH)?, &[payable, absent]);
    let data = Frame::new(
        vec!["Category".to_string(), "Count".to_string()],
        [(PAYABLE_DAYS, payable), (ABSENT_DAYS, absent), ("Other Days", other)]
            .into_iter()
            .map(|(category, count)| vec![Value::text(category), Value::Float(count)])
            .collect(),
    );
    ChartSpec::new("Attendance Breakdown", ChartKind::Pie, "Category", "Count", data)
        .color_by("Category")
        .map_color(PAYABLE_DAYS, palette::PRESENT)
        .map_color(ABSENT_DAYS, palette::ABSENT)
        .validate()
}

fn salary_chart(view: &FilteredView<'_, MonthlyRecord>, month: &Selection) -> Section<ChartSpec> {
    let x = if month.is_all() { MONTH } else { NAME };
    ChartSpec::new("Salary Information", ChartKind::Bar, x, SALARY, view.to_frame())
        .label(SALARY, "Amount")
        .validate()
}
