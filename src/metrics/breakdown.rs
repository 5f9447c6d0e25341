//! Category counts for pie charts

use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::metrics::frame::{Frame, Tabular};
use crate::metrics::require_column;
use crate::models::Value;

/// Count rows per distinct value of a column
///
/// Pairs are ordered by count descending; ties keep first-seen order.
///
/// # Errors
/// Returns a `DataShape` error if a non-empty input lacks the column.
pub fn category_breakdown<I: Tabular + ?Sized>(
    input: &I,
    column: &str,
) -> Result<Vec<(String, usize)>> {
    if input.is_empty() {
        return Ok(Vec::new());
    }
    require_column(input, column, "breakdown")?;

    let mut index: FxHashMap<String, usize> = FxHashMap::default();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for row in 0..input.row_count() {
        let label = input
            .cell(row, column)
            .map(|v| v.to_string())
            .unwrap_or_default();
        match index.get(&label) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(label.clone(), counts.len());
                counts.push((label, 1));
            }
        }
    }
    // sort_by is stable
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(counts)
}

/// Turn breakdown pairs into a two-column frame
#[must_use]
pub fn breakdown_frame(pairs: &[(String, usize)], label_column: &str, count_column: &str) -> Frame {
    Frame::new(
        vec![label_column.to_string(), count_column.to_string()],
        pairs
            .iter()
            .map(|(label, count)| {
                vec![
                    Value::text(label.as_str()),
                    Value::Int(i64::try_from(*count).unwrap_or(i64::MAX)),
                ]
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statuses(values: &[&str]) -> Frame {
        Frame::new(
            vec!["Attendance".into()],
            values.iter().map(|v| vec![Value::text(*v)]).collect(),
        )
    }

    #[test]
    fn test_counts_descending() {
        let input = statuses(&["Present", "Absent", "Present", "Present"]);
        assert_eq!(
            category_breakdown(&input, "Attendance").unwrap(),
            vec![("Present".to_string(), 3), ("Absent".to_string(), 1)]
        );
    }

    #[test]
    fn test_ties_keep_first_seen() {
        let input = statuses(&["Leave", "Present", "Absent", "Present", "Leave"]);
        let out = category_breakdown(&input, "Attendance").unwrap();
        assert_eq!(out[0].0, "Leave");
        assert_eq!(out[1].0, "Present");
        assert_eq!(out[2].0, "Absent");
    }

    #[test]
    fn test_frame() {
        let frame = breakdown_frame(&[("Yes".to_string(), 2)], "Transfer case", "Count");
        assert_eq!(frame.cell(0, "Count"), Some(Value::Int(2)));
    }
}
