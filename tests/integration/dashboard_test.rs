use std::sync::Arc;
use std::time::Duration;

use attendance_dashboard::cache::{Clock, ManualClock};
use attendance_dashboard::dashboard::{
    AnnualFilters, AnnualPage, ChartKind, DailyFilters, DailyPage, DataInfoPage,
    IndividualFilters, IndividualPage, Kpi, MonthlyFilters, MonthlyPage, NO_DATA,
    NO_MATCHING_ROWS,
};
use attendance_dashboard::filter::Selection;
use attendance_dashboard::utils::console::RenderText;
use attendance_dashboard::{
    DashboardConfig, DatasetManager, FetchErrorKind, MemorySource, NoticeLevel, Tabular, Value,
};

use crate::utils::{fixture_manager, fixture_source};

fn values(kpis: &[Kpi]) -> Vec<(&str, &str)> {
    kpis.iter()
        .map(|k| (k.label.as_str(), k.value.as_str()))
        .collect()
}

#[test]
fn test_annual_overview_for_everyone() {
    let (_clock, manager) = fixture_manager();
    let page = AnnualPage::load(&manager, AnnualFilters::default());
    assert_eq!(page.name_options, ["All", "Asha", "Meena", "Ravi"]);

    let overview = page.overview.unwrap();
    assert_eq!(
        values(overview.kpis.as_ref().unwrap()),
        [
            ("Total Present Days", "38"),
            ("Total Absent Days", "8"),
            ("Defaulters", "2"),
        ]
    );

    let attendance = overview.attendance.unwrap();
    assert_eq!(attendance.kind, ChartKind::GroupedBar);
    assert_eq!(attendance.data.row_count(), 6);

    let transfers = overview.transfer_cases.unwrap();
    assert_eq!(transfers.data.cell(0, "Count"), Some(Value::Int(2)));
    assert!(overview.extension_days.unwrap().is_some());
}

#[test]
fn test_annual_selection_without_rows_has_no_overview() {
    let (_clock, manager) = fixture_manager();
    let page = AnnualPage::load(
        &manager,
        AnnualFilters {
            name: Selection::only("Nobody"),
        },
    );
    assert!(page.overview.is_none());
    assert_eq!(page.notices.len(), 1);
    assert_eq!(page.notices[0].level, NoticeLevel::Info);
    assert!(page.render_text().contains(NO_MATCHING_ROWS));
}

#[test]
fn test_empty_monthly_sheet_reports_no_data() {
    let source = fixture_source().with_sheet("main", "pdftosheet", Vec::new());
    let manager = DatasetManager::new(
        source,
        DashboardConfig::default(),
        Arc::new(ManualClock::new()) as Arc<dyn Clock>,
    );
    assert!(manager.load_monthly().is_no_data());

    let page = MonthlyPage::load(&manager, MonthlyFilters::default());
    assert!(page.overview.is_none());
    assert_eq!(page.notices.len(), 1);
    assert_eq!(page.notices[0].level, NoticeLevel::Warning);
    assert!(page.render_text().contains(NO_DATA));

    let page = IndividualPage::load(&manager, IndividualFilters::default());
    assert!(page.annual_records.is_some());
    assert!(page.render_text().contains(NO_DATA));
}

#[test]
fn test_failed_fetch_renders_warning_and_retries() {
    let (_clock, manager) = fixture_manager();
    manager
        .source()
        .fail("main", "Main", FetchErrorKind::Transport);

    let page = AnnualPage::load(&manager, AnnualFilters::default());
    assert_eq!(page.notices.len(), 1);
    assert_eq!(page.notices[0].level, NoticeLevel::Warning);
    assert_eq!(page.name_options, ["All"]);
    assert!(page.overview.is_none());
    assert!(page.render_text().contains("[warning]"));

    manager.source().recover("main", "Main");
    let page = AnnualPage::load(&manager, AnnualFilters::default());
    assert!(page.notices.is_empty());
    assert!(page.overview.is_some());
}

#[test]
fn test_tables_are_cached_until_ttl() {
    let (clock, manager) = fixture_manager();
    manager.load_annual();
    manager.load_annual();
    assert_eq!(manager.source().fetch_count(), 1);

    clock.advance(Duration::from_secs(3601));
    manager.load_annual();
    assert_eq!(manager.source().fetch_count(), 2);

    manager.reload();
    manager.load_annual();
    assert_eq!(manager.source().fetch_count(), 3);
}

#[test]
fn test_monthly_single_month() {
    let (_clock, manager) = fixture_manager();
    let page = MonthlyPage::load(
        &manager,
        MonthlyFilters {
            month: Selection::only("January"),
        },
    );
    assert_eq!(page.month_options, ["All", "February", "January"]);

    let overview = page.overview.unwrap();
    assert_eq!(
        values(overview.kpis.as_ref().unwrap()),
        [
            ("Total Salary", "₹55,000"),
            ("Total Payable Days", "38"),
            ("Total Absent Days", "6"),
        ]
    );
    assert!(overview.salary_trend.is_none());
    assert_eq!(overview.attendance.unwrap().data.row_count(), 4);
}

#[test]
fn test_monthly_all_months_has_trend() {
    let (_clock, manager) = fixture_manager();
    let page = MonthlyPage::load(&manager, MonthlyFilters::default());
    let trend = page.overview.unwrap().salary_trend.unwrap().unwrap();
    assert_eq!(trend.kind, ChartKind::Line);
}

#[test]
fn test_individual_single_month_pie() {
    let (_clock, manager) = fixture_manager();
    let page = IndividualPage::load(
        &manager,
        IndividualFilters {
            name: Selection::only("Asha"),
            month: Selection::only("January"),
        },
    );

    let summary = page.summary.unwrap().unwrap();
    assert_eq!(
        values(&summary.kpis),
        [
            ("Total Present Days", "20"),
            ("Total Absent Days", "2"),
            ("Defaulter Status", "Non-Defaulter"),
        ]
    );

    let pie = page.attendance.unwrap().unwrap();
    assert_eq!(pie.kind, ChartKind::Pie);
    assert_eq!(pie.data.cell(2, "Count"), Some(Value::Float(9.0)));
    assert_eq!(page.monthly_records.unwrap().row_count(), 1);
}

#[test]
fn test_individual_without_name_has_no_summary() {
    let (_clock, manager) = fixture_manager();
    let page = IndividualPage::load(&manager, IndividualFilters::default());
    assert!(page.summary.is_none());
    let trend = page.attendance.unwrap().unwrap();
    assert_eq!(trend.kind, ChartKind::Line);
}

#[test]
fn test_daily_page_defaults_to_first_sheet() {
    let (_clock, manager) = fixture_manager();
    let page = DailyPage::load(&manager, DailyFilters::default());
    assert_eq!(page.sheet_options, ["Week 10"]);
    assert_eq!(page.sheet.as_deref(), Some("Week 10"));
    assert_eq!(page.staff_options, ["All", "Asha", "Ravi"]);

    let overview = page.overview.unwrap();
    assert_eq!(
        values(overview.kpis.as_ref().unwrap()),
        [
            ("Total Days Recorded", "5"),
            ("Average Hours Worked", "4.2 hours"),
            ("Days Present", "3/5"),
        ]
    );
    assert_eq!(overview.records.row_count(), 5);
}

#[test]
fn test_daily_page_without_sheets() {
    let source = MemorySource::new().with_sheet("daily", "Sheet1", Vec::new());
    let manager = DatasetManager::new(
        source,
        DashboardConfig::default(),
        Arc::new(ManualClock::new()) as Arc<dyn Clock>,
    );
    let page = DailyPage::load(&manager, DailyFilters::default());
    assert!(page.sheet.is_none());
    assert!(page.overview.is_none());
    assert!(page.render_text().contains("No daily data available"));
}

#[test]
fn test_info_page_shapes() {
    let manager = DatasetManager::new(
        fixture_source(),
        DashboardConfig::default(),
        Arc::new(ManualClock::new()) as Arc<dyn Clock>,
    );
    let page = DataInfoPage::load(&manager, Some("Week 10"));
    let shapes: Vec<(usize, usize)> = page.tables.iter().map(|t| (t.rows, t.columns)).collect();
    assert_eq!(shapes, [(3, 7), (4, 6), (5, 4)]);
    assert!(page.render_text().contains("main/Main: (3, 7)"));
}

#[test]
fn test_pages_serialize_to_json() {
    let (_clock, manager) = fixture_manager();
    let page = MonthlyPage::load(&manager, MonthlyFilters::default());
    let json = serde_json::to_value(&page).unwrap();
    assert_eq!(json["filters"]["month"], "All");
    assert_eq!(json["overview"]["kpis"][0]["label"], "Total Salary");
    assert_eq!(json["overview"]["salary"]["kind"], "Bar");
}
