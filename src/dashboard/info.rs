//! Data info page: the shape of every loaded table

use serde::Serialize;

use super::Notice;
use crate::dataset_manager::{DatasetManager, Loaded};
use crate::models::Record;
use crate::reader::RecordSource;

/// Shape of one loaded table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableInfo {
    pub name: String,
    pub rows: usize,
    pub columns: usize,
    pub column_names: Vec<String>,
}

impl TableInfo {
    fn of<T: Record>(name: impl Into<String>, loaded: &Loaded<T>) -> Self {
        let (rows, columns) = loaded.table.shape();
        Self {
            name: name.into(),
            rows,
            columns,
            column_names: loaded.table.columns().to_vec(),
        }
    }
}

/// Debug view of what was loaded
#[derive(Debug, Serialize)]
pub struct DataInfoPage {
    pub tables: Vec<TableInfo>,
    pub notices: Vec<Notice>,
}

impl DataInfoPage {
    /// Load the annual and monthly tables, and a daily sheet if one is given
    pub fn load<S: RecordSource>(manager: &DatasetManager<S>, daily_sheet: Option<&str>) -> Self {
        let config = manager.config();
        let annual = manager.load_annual();
        let monthly = manager.load_monthly();

        let mut notices: Vec<Notice> = annual
            .warning
            .iter()
            .chain(monthly.warning.iter())
            .map(Notice::from)
            .collect();
        let mut tables = vec![
            TableInfo::of(format!("{}/{}", config.main_dataset, config.annual_sheet), &annual),
            TableInfo::of(format!("{}/{}", config.main_dataset, config.monthly_sheet), &monthly),
        ];

        if let Some(sheet) = daily_sheet {
            let daily = manager.load_daily(sheet);
            notices.extend(daily.warning.iter().map(Notice::from));
            tables.push(TableInfo::of(format!("{}/{sheet}", config.daily_dataset), &daily));
        }

        Self { tables, notices }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::models::RawRow;
    use crate::reader::MemorySource;

    #[test]
    fn test_shapes() {
        let source = MemorySource::new().with_sheet(
            "main",
            "Main",
            vec![
                RawRow::new().with("Name", "Asha").with("Year", 2024_i64),
                RawRow::new().with("Name", "Ravi").with("Year", 2024_i64),
            ],
        );
        let manager = DatasetManager::with_system_clock(source, DashboardConfig::default());
        let page = DataInfoPage::load(&manager, None);
        assert_eq!(page.tables[0].rows, 2);
        assert_eq!(page.tables[0].columns, 2);
        assert_eq!(page.tables[1].rows, 0);
        assert_eq!(page.notices.len(), 1);
    }
}
