//! Column descriptors for fixed-width records.

use serde::{Deserialize, Serialize};

/// One column of a fixed-width record.
///
/// `start` and `end` offsets are tolerated on input for compatibility with
/// existing column specs, but only `len` drives the generated pattern
/// width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Field name for the parsed output.
    pub name: String,
    /// Width of the column in characters.
    pub len: usize,
    /// One-based start offset (informational only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,
    /// One-based end offset (informational only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<usize>,
}

impl ColumnSpec {
    /// Creates a new column descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>, len: usize) -> Self {
        Self {
            name: name.into(),
            len,
            start: None,
            end: None,
        }
    }

    /// Attaches informational start/end offsets.
    #[must_use]
    pub fn with_offsets(mut self, start: usize, end: usize) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }
}

/// Parses an ordered column list from its JSON representation.
pub fn columns_from_json(json: &str) -> Result<Vec<ColumnSpec>, serde_json::Error> {
    serde_json::from_str(json)
}
