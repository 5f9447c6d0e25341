//! CSV subsheets: a header row followed by data rows

use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::Context;

use crate::error::util::safe_open_file;
use crate::models::{RawRow, Value};

/// Read a CSV file with a header row
///
/// Every cell is returned as text; blank cells become [`Value::Empty`].
/// Short rows are padded with blanks so each row carries every header.
///
/// # Errors
/// Returns an error if the file cannot be opened or is not valid CSV.
pub fn read_csv(path: &Path) -> anyhow::Result<Vec<RawRow>> {
    let file = safe_open_file(path, "reading CSV subsheet")?;
    parse_csv_rows(BufReader::new(file))
        .with_context(|| format!("Failed to decode {}", path.display()))
}

/// Parse CSV data from any reader
///
/// # Errors
/// Returns an error if the data is not valid CSV.
pub fn parse_csv_rows<R: Read>(reader: R) -> anyhow::Result<Vec<RawRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::None)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .context("Failed to read CSV header row")?
        .iter()
        .map(ToString::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let row: RawRow = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let value = match record.get(idx) {
                    Some(cell) if !cell.is_empty() => Value::text(cell),
                    _ => Value::Empty,
                };
                (header.clone(), value)
            })
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rows() {
        let data = "Name ,Payable Days,Month\nAsha,20,Jan\nRavi,,Feb\n";
        let rows = parse_csv_rows(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("Name "), Some(&Value::text("Asha")));
        assert_eq!(rows[1].get("Payable Days"), Some(&Value::Empty));
    }

    #[test]
    fn test_short_rows_are_padded() {
        let rows = parse_csv_rows("Name,Month\nAsha\n".as_bytes()).unwrap();
        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[0].get("Month"), Some(&Value::Empty));
    }

    #[test]
    fn test_header_only() {
        assert!(parse_csv_rows("Name,Month\n".as_bytes()).unwrap().is_empty());
    }
}
