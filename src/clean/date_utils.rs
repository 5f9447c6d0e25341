//! Module for handling day-first date parsing.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::Value;

/// Configuration for date format handling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateFormatConfig {
    /// List of date format strings to try when parsing dates, in order
    pub date_formats: Vec<String>,
    /// Time-of-day suffixes accepted after a date (the time is discarded)
    pub time_formats: Vec<String>,
    /// Enable heuristic format detection
    pub enable_format_detection: bool,
}

impl Default for DateFormatConfig {
    fn default() -> Self {
        Self {
            // Two-digit years first: `%y` rejects a four-digit year, while
            // `%Y` would read "24" as the year 24.
            date_formats: vec![
                "%d-%m-%y".to_string(), // 31-01-24
                "%d/%m/%y".to_string(), // 31/01/24
                "%d.%m.%y".to_string(), // 31.01.24
                "%d-%m-%Y".to_string(), // 31-01-2024
                "%d/%m/%Y".to_string(), // 31/01/2024
                "%d.%m.%Y".to_string(), // 31.01.2024
                "%d %b %Y".to_string(), // 31 Jan 2024
                "%d %B %Y".to_string(), // 31 January 2024
                "%d-%b-%Y".to_string(), // 31-Jan-2024
                "%Y-%m-%d".to_string(), // ISO, unambiguous
            ],
            time_formats: vec![
                " %H:%M:%S".to_string(),
                " %H:%M".to_string(),
                "T%H:%M:%S".to_string(),
            ],
            enable_format_detection: true,
        }
    }
}

/// Parse a cell as a calendar date, day first
///
/// Text is trimmed first. Any time of day is ignored. Numbers, booleans and
/// blanks are not dates.
#[must_use]
pub fn parse_date_value(value: &Value, config: &DateFormatConfig) -> Option<NaiveDate> {
    match value {
        Value::Date(d) => Some(*d),
        Value::Text(s) => parse_date_string(s.trim(), config),
        _ => None,
    }
}

/// Earliest year accepted from a `%Y` match
///
/// chrono's `%Y` takes any number of digits, so a short year would otherwise
/// land in the first millennium.
pub const MIN_YEAR: i32 = 1000;

/// Parse a date string with multiple format attempts
#[must_use]
pub fn parse_date_string(s: &str, config: &DateFormatConfig) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }
    let plausible = |date: &NaiveDate| date.year() >= MIN_YEAR;

    for format in &config.date_formats {
        if let Some(date) = NaiveDate::parse_from_str(s, format).ok().filter(plausible) {
            return Some(date);
        }
    }

    for format in &config.date_formats {
        for time in &config.time_formats {
            let full = format!("{format}{time}");
            if let Some(date) = NaiveDateTime::parse_from_str(s, &full)
                .ok()
                .map(|dt| dt.date())
                .filter(plausible)
            {
                return Some(date);
            }
        }
    }

    if config.enable_format_detection {
        if let Some(detected_format) = detect_date_format(s) {
            if let Some(date) = NaiveDate::parse_from_str(s, detected_format).ok().filter(plausible) {
                return Some(date);
            }
        }
    }

    None
}

/// Try to detect the date format based on string patterns
///
/// Only year-first layouts are detected; everything else is covered by the
/// day-first format list.
#[must_use]
pub fn detect_date_format(s: &str) -> Option<&'static str> {
    for separator in ['/', '-', '.'] {
        let parts: Vec<&str> = s.split(separator).collect();
        if parts.len() != 3 || !parts.iter().all(|p| p.chars().all(|c| c.is_ascii_digit())) {
            continue;
        }
        if parts[0].len() == 4 {
            return Some(match separator {
                '/' => "%Y/%m/%d",
                '-' => "%Y-%m-%d",
                _ => "%Y.%m.%d",
            });
        }
    }

    // Compact format (YYYYMMDD)
    if s.len() == 8 && s.chars().all(|c| c.is_ascii_digit()) {
        return Some("%Y%m%d");
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_first() {
        let config = DateFormatConfig::default();
        assert_eq!(parse_date_string("31-01-2024", &config), Some(ymd(2024, 1, 31)));
        assert_eq!(parse_date_string("02/03/2024", &config), Some(ymd(2024, 3, 2)));
        assert_eq!(parse_date_string("5 Feb 2024", &config), Some(ymd(2024, 2, 5)));
        assert_eq!(parse_date_string("2024-01-31", &config), Some(ymd(2024, 1, 31)));
    }

    #[test]
    fn test_two_digit_years() {
        let config = DateFormatConfig::default();
        assert_eq!(parse_date_string("31-01-24", &config), Some(ymd(2024, 1, 31)));
        assert_eq!(parse_date_string("31/01/24", &config), Some(ymd(2024, 1, 31)));
        assert_eq!(parse_date_string("05.03.24 09:30", &config), Some(ymd(2024, 3, 5)));
        // No two-digit form for month names; a short year is rejected
        assert_eq!(parse_date_string("31 Jan 24", &config), None);
    }

    #[test]
    fn test_invalid_dates() {
        let config = DateFormatConfig::default();
        assert_eq!(parse_date_string("13-13-2024", &config), None);
        assert_eq!(parse_date_string("31-02-2024", &config), None);
        assert_eq!(parse_date_string("soon", &config), None);
        assert_eq!(parse_date_string("", &config), None);
    }

    #[test]
    fn test_time_of_day_ignored() {
        let config = DateFormatConfig::default();
        assert_eq!(
            parse_date_string("31-01-2024 17:45:00", &config),
            Some(ymd(2024, 1, 31))
        );
        assert_eq!(
            parse_date_string("2024-01-31T08:00:00", &config),
            Some(ymd(2024, 1, 31))
        );
    }

    #[test]
    fn test_detection() {
        let config = DateFormatConfig::default();
        assert_eq!(detect_date_format("2024/01/31"), Some("%Y/%m/%d"));
        assert_eq!(detect_date_format("31-01-2024"), None);
        assert_eq!(parse_date_string("20240131", &config), Some(ymd(2024, 1, 31)));
    }

    #[test]
    fn test_values() {
        let config = DateFormatConfig::default();
        assert_eq!(
            parse_date_value(&Value::text(" 31-01-2024 "), &config),
            Some(ymd(2024, 1, 31))
        );
        assert_eq!(parse_date_value(&Value::Int(45000), &config), None);
        let date = ymd(2024, 5, 1);
        assert_eq!(parse_date_value(&Value::Date(date), &config), Some(date));
    }
}
