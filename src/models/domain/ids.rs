use std::fmt;

use serde::{Deserialize, Serialize};

/// An id or answer key as it is stored in content documents.
///
/// The stored data types ids inconsistently: headings use letters, text
/// blocks and situations use numbers, and keys point across the two. Values
/// are kept as they arrive and compared through [`ids_equal`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseId {
    Number(i64),
    Float(f64),
    Text(String),
}

impl LooseId {
    /// Canonical string form used for every key comparison.
    pub fn canonical(&self) -> String {
        match self {
            LooseId::Number(n) => n.to_string(),
            // Adding zero folds -0.0 into 0.
            LooseId::Float(f) if f.fract() == 0.0 && f.is_finite() => format!("{:.0}", f + 0.0),
            LooseId::Float(f) => f.to_string(),
            LooseId::Text(s) => s.trim().to_string(),
        }
    }

    /// A blank text value does not count as an answer.
    pub fn is_blank(&self) -> bool {
        matches!(self, LooseId::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for LooseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl From<i64> for LooseId {
    fn from(value: i64) -> Self {
        LooseId::Number(value)
    }
}

impl From<&str> for LooseId {
    fn from(value: &str) -> Self {
        LooseId::Text(value.to_string())
    }
}

impl From<String> for LooseId {
    fn from(value: String) -> Self {
        LooseId::Text(value)
    }
}

/// Compares two ids after normalizing both to their canonical string form.
pub fn ids_equal(a: &LooseId, b: &LooseId) -> bool {
    a.canonical() == b.canonical()
}
