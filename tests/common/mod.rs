//! Common test utilities: CSV fixtures and assertion helpers.
//!
//! # Example
//!
//! ```rust,ignore
//! let csv = CsvBuilder::new(&["name", "age"])
//!     .row(&["Alice", "30"])
//!     .row(&["Bob", "25"])
//!     .build();
//! let session = load(&csv);
//! assert_row(&session, 0, &[("name", "Alice"), ("age", "30")]);
//! ```
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use csvedit::{FileMeta, Session};

/// The sample file used throughout the scenario tests.
pub const PEOPLE_CSV: &str = "name,age\nAlice,30\nBob,25\n";

// ============================================================================
// CSV Builder
// ============================================================================

/// Builder for CSV text with RFC 4180 quoting.
#[derive(Debug, Clone)]
pub struct CsvBuilder {
    lines: Vec<String>,
    line_ending: &'static str,
    trailing_newline: bool,
}

impl CsvBuilder {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            lines: vec![Self::join(headers)],
            line_ending: "\n",
            trailing_newline: true,
        }
    }

    /// An input without any header line.
    pub fn empty() -> Self {
        Self {
            lines: Vec::new(),
            line_ending: "\n",
            trailing_newline: true,
        }
    }

    pub fn row(mut self, values: &[&str]) -> Self {
        self.lines.push(Self::join(values));
        self
    }

    /// Insert a blank line.
    pub fn blank(mut self) -> Self {
        self.lines.push(String::new());
        self
    }

    pub fn crlf(mut self) -> Self {
        self.line_ending = "\r\n";
        self
    }

    pub fn no_trailing_newline(mut self) -> Self {
        self.trailing_newline = false;
        self
    }

    pub fn build(&self) -> String {
        let mut out = self.lines.join(self.line_ending);
        if self.trailing_newline && !self.lines.is_empty() {
            out.push_str(self.line_ending);
        }
        out
    }

    fn join(values: &[&str]) -> String {
        values
            .iter()
            .map(|v| quote(v))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Quote a field if it contains a delimiter, quote or line break.
pub fn quote(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

// ============================================================================
// Session helpers
// ============================================================================

pub fn csv_file(name: &str) -> FileMeta {
    FileMeta::new(name, "text/csv")
}

/// A session with `csv` imported as `test.csv`. Panics on import failure.
pub fn load(csv: &str) -> Session {
    let mut session = Session::default();
    session
        .import(&csv_file("test.csv"), csv.as_bytes())
        .expect("import should succeed");
    session
}

/// All rows as `(header, value)` pairs.
pub fn rows_of(session: &Session) -> Vec<Vec<(String, String)>> {
    let ds = session.dataset();
    (0..ds.row_count())
        .map(|i| {
            ds.row_pairs(i)
                .unwrap()
                .into_iter()
                .map(|(h, v)| (h.to_string(), v.to_string()))
                .collect()
        })
        .collect()
}

pub fn assert_headers(session: &Session, expected: &[&str]) {
    assert_eq!(session.dataset().headers(), expected, "headers mismatch");
}

pub fn assert_row(session: &Session, row: usize, expected: &[(&str, &str)]) {
    let actual = session
        .dataset()
        .row_pairs(row)
        .unwrap_or_else(|| panic!("row {row} should exist"));
    assert_eq!(actual, expected, "row {row} mismatch");
}

/// Split exported CSV text into lines regardless of terminator.
pub fn export_lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}
