//! Cell coercion rules

use crate::models::Value;

/// Placeholder text some exports write for missing values
pub const PLACEHOLDER: &str = "nan";

/// Coerce a cell to a non-negative number
///
/// Unparseable, non-finite and negative values become `0.0`.
#[must_use]
pub fn coerce_number(value: &Value) -> f64 {
    value.as_number().filter(|n| *n > 0.0).unwrap_or(0.0)
}

/// Coerce a cell to a non-negative integer, truncating fractions
#[must_use]
pub fn coerce_integer(value: &Value) -> i64 {
    match value {
        Value::Int(i) => (*i).max(0),
        other => coerce_number(other).trunc() as i64,
    }
}

/// Coerce a cell to trimmed text
#[must_use]
pub fn clean_text(value: &Value) -> String {
    value.to_string().trim().to_string()
}

/// Whether an identity value is unusable
#[must_use]
pub fn is_placeholder(text: &str) -> bool {
    text.is_empty() || text.eq_ignore_ascii_case(PLACEHOLDER)
}
