//! Display formatting for KPI values

use crate::models::Value;

/// Format an amount as currency: symbol prefix, thousands separators, no decimals
///
/// Values that are not numbers are returned as their display text.
///
/// # Examples
/// ```
/// use attendance_dashboard::models::Value;
/// use attendance_dashboard::utils::format::format_currency;
///
/// assert_eq!(format_currency(&Value::Float(1234567.6), "₹"), "₹1,234,568");
/// assert_eq!(format_currency(&Value::text("n/a"), "₹"), "n/a");
/// ```
#[must_use]
pub fn format_currency(amount: &Value, symbol: &str) -> String {
    match amount.as_number() {
        Some(n) => format!("{symbol}{}", group_thousands(n)),
        None => amount.to_string(),
    }
}

/// Format a day count the way a metric tile shows it
///
/// Whole numbers have no decimals, anything else keeps one.
#[must_use]
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{n:.0}")
    } else {
        format!("{n:.1}")
    }
}

fn group_thousands(n: f64) -> String {
    let rounded = format!("{:.0}", n.abs());
    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3 + 1);
    if n.round() < 0.0 {
        grouped.push('-');
    }
    for (idx, digit) in rounded.chars().enumerate() {
        if idx > 0 && (rounded.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
