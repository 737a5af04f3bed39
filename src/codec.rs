//! CSV codec: converts raw CSV bytes into a header/rows table and back.
//!
//! Parsing and writing are delegated to the `csv` crate (RFC 4180 quoting,
//! escaped quotes, custom delimiters). This module only decides the table
//! conventions around it:
//! - the first non-blank record is the header row
//! - blank lines are skipped
//! - short rows are padded with `""`, extra trailing fields are dropped
//! - duplicate header names get `_1`, `_2`, ... suffixes
//! - output uses CRLF between records and no trailing terminator

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{CsvEditError, Result};
use crate::types::Dataset;

/// Field delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    #[default]
    Comma,
    Semicolon,
    Tab,
    Pipe,
}

impl Delimiter {
    #[must_use]
    pub fn byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Semicolon => b';',
            Delimiter::Tab => b'\t',
            Delimiter::Pipe => b'|',
        }
    }
}

/// Codec settings shared by import and export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CodecOptions {
    pub delimiter: Delimiter,
}

/// What the codec had to adjust while reading a file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    /// Data rows read (header row excluded).
    pub rows: usize,
    /// Rows with fewer fields than headers.
    pub padded_rows: usize,
    /// Rows with more fields than headers.
    pub truncated_rows: usize,
    /// Header names renamed to keep them unique.
    pub renamed_headers: usize,
}

impl ImportReport {
    /// Whether any row or header had to be adjusted.
    #[must_use]
    pub fn has_adjustments(&self) -> bool {
        self.padded_rows > 0 || self.truncated_rows > 0 || self.renamed_headers > 0
    }
}

/// Output of [`parse`]: headers plus rows already aligned to them.
#[derive(Debug, Clone, Default)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub report: ImportReport,
}

/// Parse CSV bytes into headers and rows.
///
/// Bytes are decoded lossily, so invalid UTF-8 never fails the import.
/// A leading UTF-8 byte order mark is always dropped.
/// An input with no records (or a header row only) yields an empty
/// `rows` vector; deciding whether that is an error is up to the caller.
pub fn parse(data: &[u8], options: &CodecOptions) -> Result<ParsedTable> {
    let text = String::from_utf8_lossy(data);
    let text = text.strip_prefix('\u{feff}').unwrap_or(&*text);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter.byte())
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut table = ParsedTable::default();
    let mut have_headers = false;

    for result in reader.records() {
        let record = result?;
        if !have_headers {
            let (headers, renamed) = dedupe_headers(record.iter().map(str::to_string));
            table.headers = headers;
            table.report.renamed_headers = renamed;
            have_headers = true;
            continue;
        }

        let width = table.headers.len();
        let mut values: Vec<String> = record.iter().take(width).map(str::to_string).collect();
        if record.len() < width {
            table.report.padded_rows += 1;
            values.resize(width, String::new());
        } else if record.len() > width {
            table.report.truncated_rows += 1;
        }
        table.rows.push(values);
    }

    table.report.rows = table.rows.len();
    Ok(table)
}

/// Serialize a dataset (header line first) back into CSV text.
///
/// A dataset without headers serializes to the empty string.
pub fn write(dataset: &Dataset, options: &CodecOptions) -> Result<String> {
    if dataset.headers().is_empty() {
        return Ok(String::new());
    }

    let mut writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter.byte())
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(dataset.headers())?;
    for record in dataset.rows() {
        writer.write_record(record.values())?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CsvEditError::Io(e.into_error()))?;
    let mut text = String::from_utf8(bytes).map_err(|e| CsvEditError::from(e.to_string()))?;
    if text.ends_with("\r\n") {
        text.truncate(text.len() - 2);
    }
    Ok(text)
}

/// Make header names unique, returning how many were renamed.
fn dedupe_headers(raw: impl Iterator<Item = String>) -> (Vec<String>, usize) {
    let mut seen: HashSet<String> = HashSet::new();
    let mut headers = Vec::new();
    let mut renamed = 0;

    for name in raw {
        if seen.insert(name.clone()) {
            headers.push(name);
            continue;
        }
        let mut n = 1usize;
        let candidate = loop {
            let c = format!("{name}_{n}");
            if !seen.contains(&c) {
                break c;
            }
            n += 1;
        };
        seen.insert(candidate.clone());
        headers.push(candidate);
        renamed += 1;
    }

    (headers, renamed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn parse_default(data: &[u8]) -> ParsedTable {
        parse(data, &CodecOptions::default()).unwrap()
    }

    #[test]
    fn test_parse_csv_basic() {
        let table = parse_default(b"Name,Age,City\nAlice,30,NYC\nBob,25,LA");
        assert_eq!(table.headers, vec!["Name", "Age", "City"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec!["Alice", "30", "NYC"]);
        assert!(!table.report.has_adjustments());
    }

    #[test]
    fn test_parse_tsv() {
        let options = CodecOptions {
            delimiter: Delimiter::Tab,
        };
        let table = parse(b"A\tB\n1\t2", &options).unwrap();
        assert_eq!(table.headers, vec!["A", "B"]);
        assert_eq!(table.rows[0], vec!["1", "2"]);
    }

    #[test]
    fn test_quoted_csv() {
        let table = parse_default(b"text,n\n\"Hello, World\",42\n\"She said \"\"hi\"\"\",0");
        assert_eq!(table.rows[0][0], "Hello, World");
        assert_eq!(table.rows[1][0], "She said \"hi\"");
    }

    #[test]
    fn test_quoted_newline_stays_in_field() {
        let table = parse_default(b"a,b\n\"line1\nline2\",x\n");
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][0], "line1\nline2");
    }

    #[test]
    fn test_empty_csv() {
        let table = parse_default(b"");
        assert!(table.headers.is_empty());
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_header_only_has_no_rows() {
        let table = parse_default(b"name,age\n");
        assert_eq!(table.headers, vec!["name", "age"]);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_blank_lines_skipped() {
        let table = parse_default(b"\n\nname,age\n\nAlice,30\n\n\nBob,25\n\n");
        assert_eq!(table.headers, vec!["name", "age"]);
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn test_crlf_line_endings() {
        let table = parse_default(b"name,age\r\nAlice,30\r\n");
        assert_eq!(table.rows, vec![vec!["Alice", "30"]]);
    }

    #[test]
    fn test_bom_is_stripped() {
        let table = parse_default("\u{feff}name,age\nAlice,30".as_bytes());
        assert_eq!(table.headers[0], "name");
    }

    #[test]
    fn test_bom_stripped_for_every_delimiter() {
        for delimiter in [Delimiter::Comma, Delimiter::Semicolon, Delimiter::Tab, Delimiter::Pipe] {
            let sep = char::from(delimiter.byte());
            let input = format!("\u{feff}name{sep}age\nAlice{sep}30");
            let table = parse(input.as_bytes(), &CodecOptions { delimiter }).unwrap();
            assert_eq!(table.headers, vec!["name", "age"], "{delimiter:?}");
        }
    }

    #[test]
    fn test_ragged_rows_padded_and_truncated() {
        let table = parse_default(b"a,b,c\n1,2\n1,2,3,4\n");
        assert_eq!(table.rows[0], vec!["1", "2", ""]);
        assert_eq!(table.rows[1], vec!["1", "2", "3"]);
        assert_eq!(table.report.padded_rows, 1);
        assert_eq!(table.report.truncated_rows, 1);
        assert!(table.report.has_adjustments());
    }

    #[test]
    fn test_duplicate_headers_renamed() {
        let table = parse_default(b"a,a,b,a\n1,2,3,4\n");
        assert_eq!(table.headers, vec!["a", "a_1", "b", "a_2"]);
        assert_eq!(table.report.renamed_headers, 2);
    }

    #[test]
    fn test_duplicate_header_skips_taken_suffix() {
        let (headers, renamed) =
            dedupe_headers(["x", "x_1", "x"].iter().map(|s| (*s).to_string()));
        assert_eq!(headers, vec!["x", "x_1", "x_2"]);
        assert_eq!(renamed, 1);
    }

    #[test]
    fn test_invalid_utf8_is_lossy() {
        let table = parse_default(b"name\n\xff\xfe\n");
        assert_eq!(table.rows.len(), 1);
        assert!(table.rows[0][0].contains('\u{fffd}'));
    }

    #[test]
    fn test_write_basic() {
        let ds = Dataset::new(
            vec!["name".into(), "age".into()],
            vec![vec!["Bob".into(), "25".into()], vec!["Carol".into(), String::new()]],
        );
        let text = write(&ds, &CodecOptions::default()).unwrap();
        assert_eq!(text, "name,age\r\nBob,25\r\nCarol,");
    }

    #[test]
    fn test_write_quotes_when_needed() {
        let ds = Dataset::new(
            vec!["text".into()],
            vec![vec!["a,b".into()], vec!["say \"hi\"".into()], vec!["plain".into()]],
        );
        let text = write(&ds, &CodecOptions::default()).unwrap();
        let lines: Vec<&str> = text.split("\r\n").collect();
        assert_eq!(lines, vec!["text", "\"a,b\"", "\"say \"\"hi\"\"\"", "plain"]);
    }

    #[test]
    fn test_write_header_only() {
        let ds = Dataset::new(vec!["a".into(), "b".into()], Vec::new());
        assert_eq!(write(&ds, &CodecOptions::default()).unwrap(), "a,b");
    }

    #[test]
    fn test_write_without_headers_is_empty() {
        let ds = Dataset::default();
        assert_eq!(write(&ds, &CodecOptions::default()).unwrap(), "");
    }

    #[test]
    fn test_write_semicolon() {
        let options = CodecOptions {
            delimiter: Delimiter::Semicolon,
        };
        let ds = Dataset::new(vec!["a".into(), "b".into()], vec![vec!["1".into(), "2".into()]]);
        assert_eq!(write(&ds, &options).unwrap(), "a;b\r\n1;2");
    }

    #[test]
    fn test_single_empty_field_survives_round_trip() {
        let ds = Dataset::new(vec!["only".into()], vec![vec![String::new()], vec!["x".into()]]);
        let text = write(&ds, &CodecOptions::default()).unwrap();
        let table = parse_default(text.as_bytes());
        assert_eq!(table.rows, vec![vec![""], vec!["x"]]);
    }
}
