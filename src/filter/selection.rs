//! Picker selections and the option lists that feed them

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use serde::{Serialize, Serializer};

use crate::models::{NormalizedTable, Record, Value};

/// Sentinel label meaning "do not filter"
pub const ALL: &str = "All";

/// A picker choice: everything, or one exact value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// Select a single value
    pub fn only(value: impl Into<String>) -> Self {
        Self::Only(value.into())
    }

    /// Whether this selection filters anything
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// The selected value, if any
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Only(v) => Some(v),
        }
    }

    /// Whether a cell satisfies the selection
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => value.to_string() == *selected,
        }
    }
}

impl FromStr for Selection {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(if s == ALL {
            Self::All
        } else {
            Self::Only(s.to_string())
        })
    }
}

impl From<&str> for Selection {
    fn from(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl From<Option<String>> for Selection {
    fn from(s: Option<String>) -> Self {
        s.as_deref().map(Self::from).unwrap_or_default()
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Only(v) => f.write_str(v),
        }
    }
}

/// Serialized as the picker label, `"All"` or the selected value
impl Serialize for Selection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Picker options for a column: `"All"` followed by the sorted distinct values
///
/// Blank values are left out. A column the table does not carry yields just
/// `"All"`.
#[must_use]
pub fn selection_options<T: Record>(table: &NormalizedTable<T>, column: &str) -> Vec<String> {
    let mut options = vec![ALL.to_string()];
    if !table.has_column(column) {
        return options;
    }
    options.extend(
        table
            .rows()
            .iter()
            .filter_map(|row| row.field(column))
            .map(|value| value.to_string())
            .filter(|value| !value.is_empty())
            .unique()
            .sorted(),
    );
    options
}
