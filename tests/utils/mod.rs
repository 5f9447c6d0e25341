use std::sync::Arc;

use attendance_dashboard::cache::ManualClock;
use attendance_dashboard::{DashboardConfig, DatasetManager, MemorySource, RawRow};

/// Annual sheet as exported: padded headers, numeric text, a placeholder row
#[must_use]
pub fn annual_rows() -> Vec<RawRow> {
    vec![
        RawRow::new()
            .with(" Name ", " Asha ")
            .with("SUM of Payable Days", "20")
            .with("Updated Absent Days", 2.0)
            .with("Extension Days", 0.0)
            .with("Transfer case", "No")
            .with("Defaulter", "Non-Defaulter")
            .with("Year", 2024_i64),
        RawRow::new()
            .with(" Name ", "nan")
            .with("SUM of Payable Days", 5.0)
            .with("Updated Absent Days", 1.0)
            .with("Extension Days", 0.0)
            .with("Transfer case", "No")
            .with("Defaulter", "Defaulter")
            .with("Year", 2024_i64),
        RawRow::new()
            .with(" Name ", "Ravi")
            .with("SUM of Payable Days", "abc")
            .with("Updated Absent Days", "-3")
            .with("Extension Days", "4")
            .with("Transfer case", "Yes")
            .with("Defaulter", "Defaulter")
            .with("Year", 2024_i64),
        RawRow::new()
            .with(" Name ", "Meena")
            .with("SUM of Payable Days", 18.0)
            .with("Updated Absent Days", 6.0)
            .with("Extension Days", 2.0)
            .with("Transfer case", "No")
            .with("Defaulter", "Defaulter")
            .with("Year", 2024_i64),
    ]
}

fn monthly(name: &str, month: &str, payable: f64, absent: f64, days: f64, salary: f64) -> RawRow {
    RawRow::new()
        .with("Name", name)
        .with("Month", month)
        .with("Payable Days", payable)
        .with("Absent Days", absent)
        .with("Days in Month", days)
        .with("Salary", salary)
}

/// Monthly payroll sheet for two people over two months
#[must_use]
pub fn monthly_rows() -> Vec<RawRow> {
    vec![
        monthly("Asha", "January", 20.0, 2.0, 31.0, 30000.0),
        monthly("Ravi", "January", 18.0, 4.0, 31.0, 25000.0),
        monthly("Asha", "February", 19.0, 1.0, 29.0, 31000.0),
        monthly("Ravi", "February", 25.0, 10.0, 29.0, 24000.0),
    ]
}

fn daily(staff: &str, date: &str, attendance: &str, hours: f64) -> RawRow {
    RawRow::new()
        .with("Staff Name", staff)
        .with("Date", date)
        .with("Attendance", attendance)
        .with("Hours Worked", hours)
}

/// A week of daily attendance with day-first dates and one bad date
#[must_use]
pub fn daily_rows() -> Vec<RawRow> {
    vec![
        daily("Asha", "04/03/2024", "Present", 8.0),
        daily("Ravi", "04/03/2024", "Absent", 0.0),
        daily("Asha", "05/03/2024", "Present", 7.0),
        daily("Ravi", "05/03/2024", "Present", 6.0),
        daily("Asha", "not a date", "Present", 8.0),
        daily("Asha", "06/03/2024", "Leave", 0.0),
    ]
}

/// A source holding every fixture sheet under the default dataset ids
#[must_use]
pub fn fixture_source() -> MemorySource {
    MemorySource::new()
        .with_sheet("main", "Main", annual_rows())
        .with_sheet("main", "pdftosheet", monthly_rows())
        .with_sheet("daily", "Sheet1", Vec::new())
        .with_sheet("daily", "Week 10", daily_rows())
}

/// A manager over the fixture source on a manual clock
#[must_use]
pub fn fixture_manager() -> (Arc<ManualClock>, DatasetManager<MemorySource>) {
    let clock = Arc::new(ManualClock::new());
    let manager = DatasetManager::new(
        fixture_source(),
        DashboardConfig::default(),
        Arc::clone(&clock) as Arc<dyn attendance_dashboard::cache::Clock>,
    );
    (clock, manager)
}
