//! Configuration for the dashboard pipeline.
//!
//! Values are layered: built-in defaults, then an optional JSON file, then
//! environment variables, then command line flags (applied by the binary).

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};
use crate::error::util::safe_read_to_string;

pub use crate::clean::DateFormatConfig;

/// Environment variable overriding [`DashboardConfig::data_dir`]
pub const ENV_DATA_DIR: &str = "ATTENDANCE_DATA_DIR";
/// Environment variable overriding [`DashboardConfig::main_dataset`]
pub const ENV_MAIN_DATASET: &str = "ATTENDANCE_MAIN_DATASET";
/// Environment variable overriding [`DashboardConfig::daily_dataset`]
pub const ENV_DAILY_DATASET: &str = "ATTENDANCE_DAILY_DATASET";
/// Environment variable overriding [`DashboardConfig::annual_ttl_secs`]
pub const ENV_ANNUAL_TTL: &str = "ATTENDANCE_ANNUAL_TTL_SECS";
/// Environment variable overriding [`DashboardConfig::daily_ttl_secs`]
pub const ENV_DAILY_TTL: &str = "ATTENDANCE_DAILY_TTL_SECS";

/// Configuration for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Root directory of the file-backed record source
    pub data_dir: PathBuf,
    /// Dataset holding the annual and monthly subsheets
    pub main_dataset: String,
    /// Dataset holding one subsheet per daily attendance period
    pub daily_dataset: String,
    /// Subsheet of the main dataset with one row per person for the year
    pub annual_sheet: String,
    /// Subsheet of the main dataset with one row per person and month
    pub monthly_sheet: String,
    /// Daily subsheets hidden from the sheet picker
    pub excluded_daily_sheets: Vec<String>,
    /// Cache lifetime of the annual and monthly tables, in seconds
    pub annual_ttl_secs: u64,
    /// Cache lifetime of a daily table, in seconds
    pub daily_ttl_secs: u64,
    /// Symbol prefixed to salary figures
    pub currency_symbol: String,
    /// Formats used to parse daily dates
    pub date_format: DateFormatConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            main_dataset: "main".to_string(),
            daily_dataset: "daily".to_string(),
            annual_sheet: "Main".to_string(),
            monthly_sheet: "pdftosheet".to_string(),
            excluded_daily_sheets: vec!["Sheet1".to_string()],
            annual_ttl_secs: 3600,
            daily_ttl_secs: 600,
            currency_symbol: "₹".to_string(),
            date_format: DateFormatConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Load a configuration file; missing keys keep their defaults
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = safe_read_to_string(path, "loading configuration")
            .map_err(|e| DashboardError::Config(format!("{e:#}")))?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Apply overrides from the process environment
    ///
    /// # Errors
    /// Returns an error if a TTL variable is not a whole number of seconds.
    pub fn with_env(self) -> Result<Self> {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    ///
    /// # Errors
    /// Returns an error if a TTL variable is not a whole number of seconds.
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(dataset) = lookup(ENV_MAIN_DATASET) {
            self.main_dataset = dataset;
        }
        if let Some(dataset) = lookup(ENV_DAILY_DATASET) {
            self.daily_dataset = dataset;
        }
        if let Some(secs) = lookup(ENV_ANNUAL_TTL) {
            self.annual_ttl_secs = parse_secs(ENV_ANNUAL_TTL, &secs)?;
        }
        if let Some(secs) = lookup(ENV_DAILY_TTL) {
            self.daily_ttl_secs = parse_secs(ENV_DAILY_TTL, &secs)?;
        }
        Ok(self)
    }

    #[must_use]
    pub const fn annual_ttl(&self) -> Duration {
        Duration::from_secs(self.annual_ttl_secs)
    }

    #[must_use]
    pub const fn daily_ttl(&self) -> Duration {
        Duration::from_secs(self.daily_ttl_secs)
    }

    /// Whether a daily subsheet should be offered in the sheet picker
    #[must_use]
    pub fn is_daily_sheet_visible(&self, sheet: &str) -> bool {
        !self.excluded_daily_sheets.iter().any(|s| s == sheet)
    }
}

fn parse_secs(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| DashboardError::Config(format!("{key} must be a number of seconds, got '{value}'")))
}
