use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

/// A single row, with one value per header in header order.
///
/// Values are stored positionally so a record can never hold a key that
/// is missing from the headers, or miss one that is present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub(crate) values: Vec<String>,
}

impl Record {
    /// A record with `width` empty values.
    #[must_use]
    pub fn blank(width: usize) -> Self {
        Self {
            values: vec![String::new(); width],
        }
    }

    /// Values in header order.
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Vec<String>> for Record {
    fn from(values: Vec<String>) -> Self {
        Self { values }
    }
}

/// The in-memory table being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    pub(crate) headers: Vec<String>,
    pub(crate) rows: Vec<Record>,
    pub(crate) source_file_name: Option<String>,
}

impl Dataset {
    /// Build a dataset, padding or truncating each row to the header width.
    #[must_use]
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut values| {
                values.resize(width, String::new());
                Record { values }
            })
            .collect();
        Self {
            headers,
            rows,
            source_file_name: None,
        }
    }

    /// Attach the originating file name.
    #[must_use]
    pub fn with_source_file_name(mut self, name: impl Into<String>) -> Self {
        self.source_file_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    #[must_use]
    pub fn source_file_name(&self) -> Option<&str> {
        self.source_file_name.as_deref()
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a header, if present.
    #[must_use]
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    /// Read the value at `(row, column)`.
    #[must_use]
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        self.rows
            .get(row)?
            .values
            .get(col)
            .map(String::as_str)
    }

    /// A row as `(header, value)` pairs in header order.
    #[must_use]
    pub fn row_pairs(&self, row: usize) -> Option<Vec<(&str, &str)>> {
        let record = self.rows.get(row)?;
        Some(
            self.headers
                .iter()
                .map(String::as_str)
                .zip(record.values.iter().map(String::as_str))
                .collect(),
        )
    }
}

/// Serializes a record as a `{header: value}` map.
struct RecordView<'a> {
    headers: &'a [String],
    record: &'a Record,
}

impl Serialize for RecordView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.headers.len()))?;
        for (header, value) in self.headers.iter().zip(&self.record.values) {
            map.serialize_entry(header, value)?;
        }
        map.end()
    }
}

struct RowsView<'a>(&'a Dataset);

impl Serialize for RowsView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.rows.iter().map(|record| RecordView {
            headers: &self.0.headers,
            record,
        }))
    }
}

impl Serialize for Dataset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("Dataset", 3)?;
        st.serialize_field("headers", &self.headers)?;
        st.serialize_field("rows", &RowsView(self))?;
        st.serialize_field("sourceFileName", &self.source_file_name)?;
        st.end()
    }
}
