//! Annual overview page

use serde::Serialize;

use super::chart::{ChartKind, ChartSpec, palette};
use super::{Kpi, Notice, Section, non_empty_view, serialize_section};
use crate::dataset_manager::{DatasetManager, Loaded};
use crate::error::DashboardError;
use crate::filter::{FilteredView, Predicate, PredicateSet, Selection, selection_options};
use crate::metrics::{
    breakdown_frame, category_breakdown, count_where, group_sum_many, reshape_wide_to_long, sum_by,
};
use crate::models::AnnualRecord;
use crate::models::columns::{
    ABSENT_DAYS_TOTAL, DEFAULTER, EXTENSION_DAYS, NAME, PAYABLE_DAYS_TOTAL, TRANSFER_CASE,
};
use crate::reader::RecordSource;
use crate::utils::format::format_number;

/// Picker selections of the annual page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnnualFilters {
    pub name: Selection,
}

/// The annual overview
#[derive(Debug, Serialize)]
pub struct AnnualPage {
    pub filters: AnnualFilters,
    pub name_options: Vec<String>,
    pub notices: Vec<Notice>,
    /// `None` when no rows match the filters; a notice says why
    pub overview: Option<AnnualOverview>,
}

/// KPIs and charts for the selected people
#[derive(Debug, Serialize)]
pub struct AnnualOverview {
    #[serde(serialize_with = "serialize_section")]
    pub kpis: Section<Vec<Kpi>>,
    #[serde(serialize_with = "serialize_section")]
    pub attendance: Section<ChartSpec>,
    #[serde(serialize_with = "serialize_section")]
    pub defaulters: Section<ChartSpec>,
    #[serde(serialize_with = "serialize_section")]
    pub transfer_cases: Section<ChartSpec>,
    /// `None` when nobody has extension days
    #[serde(serialize_with = "serialize_section")]
    pub extension_days: Section<Option<ChartSpec>>,
}

impl AnnualPage {
    /// Load the annual table and build the page
    pub fn load<S: RecordSource>(manager: &DatasetManager<S>, filters: AnnualFilters) -> Self {
        Self::build(&manager.load_annual(), filters)
    }

    /// Build the page from an already loaded table
    #[must_use]
    pub fn build(loaded: &Loaded<AnnualRecord>, filters: AnnualFilters) -> Self {
        let table = loaded.table.as_ref();
        let mut notices: Vec<Notice> = loaded.warning.iter().map(Notice::from).collect();

        let predicates = PredicateSet::new().with(Predicate::Name(filters.name.clone()));
        let overview = non_empty_view(loaded, &predicates, &mut notices)
            .map(|view| AnnualOverview::build(&view));

        Self {
            name_options: selection_options(table, NAME),
            filters,
            notices,
            overview,
        }
    }
}

impl AnnualOverview {
    #[must_use]
    pub fn build(view: &FilteredView<'_, AnnualRecord>) -> Self {
        Self {
            kpis: kpis(view),
            attendance: attendance_chart(view),
            defaulters: defaulter_chart(view),
            transfer_cases: transfer_chart(view),
            extension_days: extension_chart(view),
        }
    }
}

fn kpis(view: &FilteredView<'_, AnnualRecord>) -> Section<Vec<Kpi>> {
    Ok(vec![
        Kpi::new("Total Present Days", format_number(sum_by(view, PAYABLE_DAYS_TOTAL)?)),
        Kpi::new("Total Absent Days", format_number(sum_by(view, ABSENT_DAYS_TOTAL)?)),
        Kpi::new("Defaulters", count_where(view, DEFAULTER, "Defaulter")?.to_string()),
    ])
}

fn attendance_chart(view: &FilteredView<'_, AnnualRecord>) -> Section<ChartSpec> {
    let values = [PAYABLE_DAYS_TOTAL, ABSENT_DAYS_TOTAL];
    let per_person = group_sum_many(view, &[NAME], &values)?;
    let long = reshape_wide_to_long(&per_person, &[NAME], &values, "Type", "Days")?;
    ChartSpec::new(
        "Present vs Absent Days by Article",
        ChartKind::GroupedBar,
        NAME,
        "Days",
        long,
    )
    .color_by("Type")
    .map_color(PAYABLE_DAYS_TOTAL, palette::PRESENT)
    .map_color(ABSENT_DAYS_TOTAL, palette::ABSENT)
    .label(NAME, "Article")
    .label("Days", "Number of Days")
    .validate()
}

fn defaulter_chart(view: &FilteredView<'_, AnnualRecord>) -> Section<ChartSpec> {
    ChartSpec::new(
        "Defaulter Status",
        ChartKind::Bar,
        NAME,
        ABSENT_DAYS_TOTAL,
        view.to_frame(),
    )
    .color_by(DEFAULTER)
    .label(NAME, "Article")
    .label(ABSENT_DAYS_TOTAL, "Days Absent")
    .validate()
}

fn transfer_chart(view: &FilteredView<'_, AnnualRecord>) -> Section<ChartSpec> {
    let counts = category_breakdown(view, TRANSFER_CASE)?;
    ChartSpec::new(
        "Transfer Case Distribution",
        ChartKind::Donut,
        TRANSFER_CASE,
        "Count",
        breakdown_frame(&counts, TRANSFER_CASE, "Count"),
    )
    .color_by(TRANSFER_CASE)
    .validate()
}

fn extension_chart(view: &FilteredView<'_, AnnualRecord>) -> Section<Option<ChartSpec>> {
    if !view.has_column(EXTENSION_DAYS) {
        return Err(DashboardError::data_shape(EXTENSION_DAYS, "extension days chart"));
    }
    let extended = view.clone().retain_where(|row| row.extension_days > 0.0);
    if extended.is_empty() {
        return Ok(None);
    }
    let sorted = extended.sorted_by(EXTENSION_DAYS, true)?;
    ChartSpec::new(
        "Extension Days",
        ChartKind::Bar,
        NAME,
        EXTENSION_DAYS,
        sorted.to_frame(),
    )
    .map_color(EXTENSION_DAYS, palette::PRESENT)
    .label(NAME, "Article")
    .label(EXTENSION_DAYS, "Days")
    .validate()
    .map(Some)
}
