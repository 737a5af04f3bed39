//! Dataset mutations.
//!
//! Applies user edits to the in-memory table. Every function either fully
//! applies its change or leaves the dataset untouched.

use crate::error::{CsvEditError, Result};
use crate::types::{Dataset, Record};

/// Replace the value at `(row, column)`.
///
/// Returns whether the stored value actually changed.
pub(crate) fn apply_cell_edit(
    dataset: &mut Dataset,
    row: usize,
    column: &str,
    value: &str,
) -> Result<bool> {
    let len = dataset.rows.len();
    if row >= len {
        return Err(CsvEditError::IndexOutOfRange { index: row, len });
    }
    let col = dataset
        .column_index(column)
        .ok_or_else(|| CsvEditError::UnknownColumn(column.to_string()))?;

    let cell = dataset
        .rows
        .get_mut(row)
        .and_then(|record| record.values.get_mut(col))
        .ok_or(CsvEditError::IndexOutOfRange { index: row, len })?;

    if cell.as_str() == value {
        return Ok(false);
    }
    value.clone_into(cell);
    Ok(true)
}

/// Append a row with an empty value for every header, returning its index.
pub(crate) fn append_blank_row(dataset: &mut Dataset) -> usize {
    dataset.rows.push(Record::blank(dataset.headers.len()));
    dataset.rows.len() - 1
}

/// Remove the row at `row`; out-of-range indices remove nothing.
pub(crate) fn remove_row(dataset: &mut Dataset, row: usize) -> Option<Record> {
    (row < dataset.rows.len()).then(|| dataset.rows.remove(row))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn people() -> Dataset {
        Dataset::new(
            vec!["name".into(), "age".into()],
            vec![
                vec!["Alice".into(), "30".into()],
                vec!["Bob".into(), "25".into()],
            ],
        )
    }

    #[test]
    fn test_edit_changes_one_cell() {
        let mut ds = people();
        let before = ds.clone();
        assert!(apply_cell_edit(&mut ds, 1, "age", "26").unwrap());
        assert_eq!(ds.cell(1, "age"), Some("26"));
        assert_eq!(ds.rows()[0], before.rows()[0]);
        assert_eq!(ds.cell(1, "name"), Some("Bob"));
    }

    #[test]
    fn test_edit_same_value_reports_unchanged() {
        let mut ds = people();
        assert!(!apply_cell_edit(&mut ds, 0, "name", "Alice").unwrap());
    }

    #[test]
    fn test_edit_out_of_range_rejected() {
        let mut ds = people();
        let err = apply_cell_edit(&mut ds, 2, "name", "x").unwrap_err();
        assert!(matches!(
            err,
            CsvEditError::IndexOutOfRange { index: 2, len: 2 }
        ));
        assert_eq!(ds, people());
    }

    #[test]
    fn test_edit_unknown_column_rejected() {
        let mut ds = people();
        let err = apply_cell_edit(&mut ds, 0, "city", "Oslo").unwrap_err();
        assert!(matches!(err, CsvEditError::UnknownColumn(ref c) if c == "city"));
        assert_eq!(ds, people());
    }

    #[test]
    fn test_edit_accepts_csv_unsafe_text() {
        let mut ds = people();
        apply_cell_edit(&mut ds, 0, "name", "Smith, \"Al\"\nJr").unwrap();
        assert_eq!(ds.cell(0, "name"), Some("Smith, \"Al\"\nJr"));
    }

    #[test]
    fn test_append_blank_row() {
        let mut ds = people();
        let idx = append_blank_row(&mut ds);
        assert_eq!(idx, 2);
        assert_eq!(ds.row_pairs(2).unwrap(), vec![("name", ""), ("age", "")]);
        assert_eq!(ds.headers(), &["name", "age"]);
    }

    #[test]
    fn test_append_without_headers() {
        let mut ds = Dataset::default();
        assert_eq!(append_blank_row(&mut ds), 0);
        assert!(ds.rows()[0].is_empty());
    }

    #[test]
    fn test_remove_row_preserves_order() {
        let mut ds = people();
        append_blank_row(&mut ds);
        let removed = remove_row(&mut ds, 0).unwrap();
        assert_eq!(removed.values(), &["Alice", "30"]);
        assert_eq!(ds.cell(0, "name"), Some("Bob"));
        assert_eq!(ds.cell(1, "name"), Some(""));
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut ds = people();
        assert!(remove_row(&mut ds, 2).is_none());
        assert!(remove_row(&mut ds, usize::MAX).is_none());
        assert_eq!(ds, people());
    }
}
