//! Randomized checks of the cleaner and the metrics on seeded input

use attendance_dashboard::metrics::{group_sum, reshape_wide_to_long, residual};
use attendance_dashboard::models::columns::{
    ABSENT_DAYS, DAYS_IN_MONTH, MONTH, NAME, PAYABLE_DAYS, SALARY,
};
use attendance_dashboard::{AnnualRecord, MonthlyRecord, RawRow, Tabular, Value, clean_rows};
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const NAMES: [&str; 6] = ["Asha", " Ravi ", "Meena", "nan", "", "NaN"];
const MONTHS: [&str; 3] = ["January", "February", "March"];
const LABELS: [&str; 4] = ["Defaulter", "Non-Defaulter", "", "Pending"];

fn random_number(rng: &mut StdRng) -> Value {
    match rng.random_range(0..5) {
        0 => Value::Float(rng.random_range(-50.0..50.0)),
        1 => Value::Int(rng.random_range(-10..40)),
        2 => Value::text(format!("{}", rng.random_range(-5..30))),
        3 => Value::text("n/a"),
        _ => Value::Empty,
    }
}

fn random_annual_rows(rng: &mut StdRng, count: usize) -> Vec<RawRow> {
    (0..count)
        .map(|_| {
            RawRow::new()
                .with("Name", NAMES[rng.random_range(0..NAMES.len())])
                .with("SUM of Payable Days", random_number(rng))
                .with("Updated Absent Days", random_number(rng))
                .with("Extension Days", random_number(rng))
                .with("Transfer case", if rng.random_bool(0.5) { " Yes" } else { "No " })
                .with("Defaulter", LABELS[rng.random_range(0..LABELS.len())])
                .with("Year", random_number(rng))
        })
        .collect()
}

fn random_monthly_rows(rng: &mut StdRng, count: usize) -> Vec<RawRow> {
    (0..count)
        .map(|_| {
            RawRow::new()
                .with("Name", NAMES[rng.random_range(0..NAMES.len())])
                .with("Month", MONTHS[rng.random_range(0..MONTHS.len())])
                .with("Payable Days", random_number(rng))
                .with("Absent Days", random_number(rng))
                .with("Days in Month", random_number(rng))
                .with("Salary", random_number(rng))
        })
        .collect()
}

#[test]
fn test_cleaning_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let rows = random_annual_rows(&mut rng, 30);
        let once = clean_rows::<AnnualRecord>(&rows).table;
        let twice = clean_rows::<AnnualRecord>(&once.to_raw_rows()).table;
        assert_eq!(once.rows(), twice.rows());
        assert_eq!(once.columns(), twice.columns());
    }
}

#[test]
fn test_cleaned_numbers_are_non_negative_and_names_usable() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..20 {
        let table = clean_rows::<MonthlyRecord>(&random_monthly_rows(&mut rng, 40)).table;
        for row in table.rows() {
            assert!(!row.name.is_empty());
            assert!(!row.name.eq_ignore_ascii_case("nan"));
            assert_eq!(row.name, row.name.trim());
            for n in [row.payable_days, row.absent_days, row.days_in_month, row.salary] {
                assert!(n >= 0.0 && n.is_finite());
            }
        }
    }
}

#[test]
fn test_group_count_matches_distinct_keys() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..20 {
        let table = clean_rows::<MonthlyRecord>(&random_monthly_rows(&mut rng, 40)).table;
        let view = table.view();
        let distinct = table.rows().iter().map(|r| (&r.name, &r.month)).unique().count();
        let grouped = group_sum(&view, &[NAME, MONTH], SALARY).unwrap();
        assert_eq!(grouped.row_count(), distinct);

        let total: f64 = table.rows().iter().map(|r| r.salary).sum();
        let grouped_total: f64 = grouped
            .column_values(SALARY)
            .unwrap_or_default()
            .iter()
            .filter_map(Value::as_number)
            .sum();
        assert!((total - grouped_total).abs() < 1e-6);
    }
}

#[test]
fn test_reshape_emits_every_id_value_pair_once() {
    let mut rng = StdRng::seed_from_u64(31);
    for _ in 0..20 {
        let table = clean_rows::<MonthlyRecord>(&random_monthly_rows(&mut rng, 25)).table;
        let view = table.view();
        let ids = [NAME, MONTH];
        let values = [PAYABLE_DAYS, ABSENT_DAYS, DAYS_IN_MONTH];
        let long = reshape_wide_to_long(&view, &ids, &values, "Type", "Days").unwrap();
        assert_eq!(long.row_count(), table.len() * values.len());

        for r in 0..view.row_count() {
            for (k, column) in values.iter().enumerate() {
                let out = r * values.len() + k;
                for id in ids {
                    assert_eq!(long.cell(out, id), view.cell(r, id));
                }
                assert_eq!(long.cell(out, "Type"), Some(Value::text(*column)));
                assert_eq!(long.cell(out, "Days"), view.cell(r, column));
            }
        }
    }
}

#[test]
fn test_residual_never_negative() {
    let mut rng = StdRng::seed_from_u64(43);
    for _ in 0..500 {
        let total = rng.random_range(0.0..31.0);
        let parts: Vec<f64> = (0..rng.random_range(0..4))
            .map(|_| rng.random_range(0.0..31.0))
            .collect();
        let rest = residual(total, &parts);
        assert!(rest >= 0.0);
        if parts.iter().sum::<f64>() <= total {
            assert!((rest + parts.iter().sum::<f64>() - total).abs() < 1e-9);
        }
    }
}
