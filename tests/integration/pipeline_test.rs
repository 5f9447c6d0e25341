use attendance_dashboard::filter::{Predicate, PredicateSet, Selection, filter};
use attendance_dashboard::metrics::{category_breakdown, group_sum, sum_by};
use attendance_dashboard::models::columns::{
    ABSENT_DAYS_TOTAL, DATE, DEFAULTER, NAME, PAYABLE_DAYS, PAYABLE_DAYS_TOTAL, STAFF_NAME,
    TRANSFER_CASE,
};
use attendance_dashboard::{
    AnnualRecord, CleanStatus, DailyRecord, DashboardError, DefaulterStatus, MonthlyRecord,
    NormalizedTable, Tabular, clean_rows,
};
use chrono::NaiveDate;

use crate::utils::{annual_rows, daily_rows, monthly_rows};

#[test]
fn test_annual_cleaning_drops_placeholders_and_coerces_numbers() {
    let outcome = clean_rows::<AnnualRecord>(&annual_rows());
    assert_eq!(outcome.status, CleanStatus::Loaded);
    assert_eq!(outcome.dropped_rows, 1);
    assert!(outcome.missing_columns.is_empty());

    let table = outcome.table;
    assert_eq!(table.len(), 3);
    assert!(table.has_column(NAME));

    let asha = &table.rows()[0];
    assert_eq!(asha.name, "Asha");
    assert_eq!(asha.payable_days, 20.0);
    assert_eq!(asha.defaulter, DefaulterStatus::NonDefaulter);

    let ravi = &table.rows()[1];
    assert_eq!(ravi.payable_days, 0.0);
    assert_eq!(ravi.absent_days, 0.0);
    assert_eq!(ravi.extension_days, 4.0);
    assert_eq!(ravi.transfer_case, "Yes");
}

#[test]
fn test_no_rows_is_no_data() {
    let outcome = clean_rows::<MonthlyRecord>(&[]);
    assert!(outcome.is_no_data());
    assert!(outcome.table.is_empty());
}

#[test]
fn test_all_selection_keeps_every_row() {
    let table = clean_rows::<AnnualRecord>(&annual_rows()).table;
    let view = filter(&table, &PredicateSet::new().with(Predicate::Name(Selection::All))).unwrap();
    assert_eq!(view.len(), table.len());
    assert_eq!(sum_by(&view, PAYABLE_DAYS_TOTAL).unwrap(), 38.0);
    assert_eq!(sum_by(&view, ABSENT_DAYS_TOTAL).unwrap(), 8.0);
}

#[test]
fn test_name_selection_narrows_view() {
    let table = clean_rows::<AnnualRecord>(&annual_rows()).table;
    let view = filter(
        &table,
        &PredicateSet::new().with(Predicate::Name(Selection::from("Meena"))),
    )
    .unwrap();
    assert_eq!(view.len(), 1);
    assert_eq!(sum_by(&view, ABSENT_DAYS_TOTAL).unwrap(), 6.0);
}

#[test]
fn test_defaulter_and_transfer_breakdowns() {
    let table = clean_rows::<AnnualRecord>(&annual_rows()).table;
    let view = table.view();
    assert_eq!(
        category_breakdown(&view, DEFAULTER).unwrap(),
        vec![("Defaulter".to_string(), 2), ("Non-Defaulter".to_string(), 1)]
    );
    assert_eq!(
        category_breakdown(&view, TRANSFER_CASE).unwrap(),
        vec![("No".to_string(), 2), ("Yes".to_string(), 1)]
    );
}

#[test]
fn test_monthly_month_filter_and_group_sum() {
    let table = clean_rows::<MonthlyRecord>(&monthly_rows()).table;
    let january = filter(
        &table,
        &PredicateSet::new().with(Predicate::Month(Selection::only("January"))),
    )
    .unwrap();
    assert_eq!(january.len(), 2);

    let per_person = group_sum(&table.view(), &[NAME], PAYABLE_DAYS).unwrap();
    assert_eq!(per_person.row_count(), 2);
    assert_eq!(per_person.cell(0, PAYABLE_DAYS).and_then(|v| v.as_number()), Some(39.0));
    assert_eq!(per_person.cell(1, PAYABLE_DAYS).and_then(|v| v.as_number()), Some(43.0));
}

#[test]
fn test_daily_dates_are_day_first() {
    let outcome = clean_rows::<DailyRecord>(&daily_rows());
    assert_eq!(outcome.dropped_rows, 1);
    let first = &outcome.table.rows()[0];
    assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
}

#[test]
fn test_daily_range_and_staff_filters() {
    let table = clean_rows::<DailyRecord>(&daily_rows()).table;
    let range = attendance_dashboard::DateRange::new(
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
    );
    let predicates = PredicateSet::new()
        .with(Predicate::DateWithin(Some(range)))
        .with(Predicate::Staff(Selection::only("Asha")));
    let view = filter(&table, &predicates).unwrap();
    assert_eq!(view.len(), 2);
    assert!(view.iter().all(|row| row.staff_name == "Asha"));
}

#[test]
fn test_selection_without_matches_is_empty_view() {
    let table = clean_rows::<DailyRecord>(&daily_rows()).table;
    let view = filter(
        &table,
        &PredicateSet::new().with(Predicate::Staff(Selection::only("Nobody"))),
    )
    .unwrap();
    assert!(view.is_empty());
    assert!(category_breakdown(&view, DATE).unwrap().is_empty());
}

#[test]
fn test_predicate_on_missing_column_is_data_shape() {
    let rows = clean_rows::<DailyRecord>(&daily_rows()).table.rows().to_vec();
    let table: NormalizedTable<DailyRecord> = NormalizedTable::new(vec![DATE.to_string()], rows);
    let err = filter(
        &table,
        &PredicateSet::new().with(Predicate::Staff(Selection::only("Asha"))),
    );
    assert!(matches!(err, Err(DashboardError::DataShape { ref column, .. }) if column == STAFF_NAME));
}
