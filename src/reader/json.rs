//! JSON subsheets: an array of row objects

use std::io;
use std::path::Path;

use anyhow::Context;

use crate::error::util::safe_read_to_string;
use crate::models::{RawRow, Value};

/// Read a JSON file holding an array of objects
///
/// Column order follows the key order of each object.
///
/// # Errors
/// Returns an error if the file cannot be read, is not valid JSON, or is
/// not an array of objects.
pub fn read_json(path: &Path) -> anyhow::Result<Vec<RawRow>> {
    let text = safe_read_to_string(path, "reading JSON subsheet")?;
    parse_json_rows(&text).with_context(|| format!("Failed to decode {}", path.display()))
}

/// Parse JSON text holding an array of objects
///
/// # Errors
/// Returns an error if the text is not valid JSON or not an array of objects.
pub fn parse_json_rows(text: &str) -> anyhow::Result<Vec<RawRow>> {
    let parsed: serde_json::Value = serde_json::from_str(text)?;
    let serde_json::Value::Array(items) = parsed else {
        return Err(invalid("expected an array of row objects").into());
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| -> anyhow::Result<RawRow> {
            match item {
                serde_json::Value::Object(map) => Ok(map
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect()),
                other => Err(invalid(&format!("row {idx} is not an object: {other}")).into()),
            }
        })
        .collect()
}

fn invalid(message: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message.to_string())
}
