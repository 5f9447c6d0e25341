use std::fs;
use std::path::Path;

use attendance_dashboard::config::{ENV_DAILY_TTL, ENV_DATA_DIR};
use attendance_dashboard::dashboard::{AnnualFilters, AnnualPage, DailyFilters, DailyPage};
use attendance_dashboard::filter::Selection;
use attendance_dashboard::{
    DashboardConfig, DashboardError, DatasetManager, FetchErrorKind, FileSource, RecordSource,
};

const ANNUAL_CSV: &str = "\
 Name ,SUM of Payable Days,Updated Absent Days,Extension Days,Transfer case,Defaulter,Year
Asha,20,2,0,No,Non-Defaulter,2024
nan,1,1,0,No,Defaulter,2024
Ravi,18,\"1,5\",3,Yes,Defaulter,2024
";

const DAILY_JSON: &str = r#"[
    {"Staff Name": "Asha", "Date": "11/03/2024", "Attendance": "Present", "Hours Worked": 8},
    {"Staff Name": "Ravi", "Date": "12/03/2024", "Attendance": "Absent", "Hours Worked": 0}
]"#;

fn write_data(root: &Path) {
    let main = root.join("main");
    let daily = root.join("daily");
    fs::create_dir_all(&main).unwrap();
    fs::create_dir_all(&daily).unwrap();
    fs::write(main.join("Main.csv"), ANNUAL_CSV).unwrap();
    fs::write(daily.join("Sheet1.csv"), "Staff Name,Date\n").unwrap();
    fs::write(daily.join("Week 11.json"), DAILY_JSON).unwrap();
    fs::write(
        daily.join("Week 10.csv"),
        "Staff Name,Date,Attendance,Hours Worked\nAsha,04/03/2024,Present,7\n",
    )
    .unwrap();
}

fn manager(root: &Path) -> DatasetManager<FileSource> {
    let config = DashboardConfig {
        data_dir: root.to_path_buf(),
        ..DashboardConfig::default()
    };
    DatasetManager::with_system_clock(FileSource::new(root), config)
}

#[test]
fn test_annual_page_from_csv() {
    let dir = tempfile::tempdir().unwrap();
    write_data(dir.path());
    let manager = manager(dir.path());

    let loaded = manager.load_annual();
    assert!(loaded.is_ok());
    assert_eq!(loaded.table.len(), 2);
    assert_eq!(loaded.table.rows()[1].absent_days, 15.0);

    let page = AnnualPage::load(
        &manager,
        AnnualFilters {
            name: Selection::All,
        },
    );
    assert_eq!(page.name_options, ["All", "Asha", "Ravi"]);
    assert!(page.notices.is_empty());
    assert!(page.overview.is_some());
}

#[test]
fn test_missing_monthly_sheet_is_warning_not_failure() {
    let dir = tempfile::tempdir().unwrap();
    write_data(dir.path());
    let manager = manager(dir.path());

    let loaded = manager.load_monthly();
    assert!(loaded.table.is_empty());
    assert!(matches!(
        loaded.warning,
        Some(DashboardError::RemoteFetch {
            kind: FetchErrorKind::NotFound,
            ..
        })
    ));

    fs::write(
        dir.path().join("main").join("pdftosheet.csv"),
        "Name,Month,Payable Days,Absent Days,Days in Month,Salary\nAsha,March,20,1,31,30000\n",
    )
    .unwrap();
    let loaded = manager.load_monthly();
    assert!(loaded.is_ok());
    assert_eq!(loaded.table.len(), 1);
}

#[test]
fn test_daily_sheets_are_sorted_and_exclude_sheet1() {
    let dir = tempfile::tempdir().unwrap();
    write_data(dir.path());
    let manager = manager(dir.path());

    assert_eq!(
        manager.source().list_subsheets("daily").unwrap(),
        ["Sheet1", "Week 10", "Week 11"]
    );
    assert_eq!(manager.daily_sheets().unwrap(), ["Week 10", "Week 11"]);

    let page = DailyPage::load(&manager, DailyFilters::default());
    assert_eq!(page.sheet.as_deref(), Some("Week 10"));
    assert_eq!(page.staff_options, ["All", "Asha"]);

    let page = DailyPage::load(
        &manager,
        DailyFilters {
            sheet: Some("Week 11".to_string()),
            ..DailyFilters::default()
        },
    );
    assert_eq!(page.staff_options, ["All", "Asha", "Ravi"]);
    assert!(page.overview.is_some());
}

#[test]
fn test_config_file_then_environment() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dashboard.json");
    fs::write(&path, r#"{"daily_dataset": "attendance", "daily_ttl_secs": 60}"#).unwrap();

    let config = DashboardConfig::from_file(&path).unwrap();
    assert_eq!(config.daily_dataset, "attendance");
    assert_eq!(config.daily_ttl_secs, 60);
    assert_eq!(config.annual_sheet, "Main");

    let config = config
        .with_env_from(|key| match key {
            k if k == ENV_DATA_DIR => Some("/srv/sheets".to_string()),
            k if k == ENV_DAILY_TTL => Some("120".to_string()),
            _ => None,
        })
        .unwrap();
    assert_eq!(config.data_dir, Path::new("/srv/sheets"));
    assert_eq!(config.daily_ttl_secs, 120);

    assert!(matches!(
        DashboardConfig::from_file(&dir.path().join("missing.json")),
        Err(DashboardError::Config(_))
    ));
}
