//! Structured error types for csvedit.
//!
//! Every operation on the editing session returns one of these; the UI layer
//! decides how to surface it via [`CsvEditError::presentation`].

/// All errors that can occur while importing, editing or exporting CSV.
#[derive(Debug, thiserror::Error)]
pub enum CsvEditError {
    /// The selected file does not declare a CSV media type.
    #[error("Please upload a valid .csv file (got media type {0:?})")]
    InvalidFileType(String),

    /// The parsed file contains no data rows to derive headers from.
    #[error("The selected file contains no data rows")]
    EmptyFile,

    /// A row index does not address an existing row.
    #[error("Row {index} is out of range (table has {len} rows)")]
    IndexOutOfRange { index: usize, len: usize },

    /// A column name is not part of the loaded headers.
    #[error("Unknown column: {0:?}")]
    UnknownColumn(String),

    /// A newer import was started before this one completed.
    #[error("Import superseded by a newer import")]
    Superseded,

    /// The CSV codec rejected the input or failed to write output.
    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid editor configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Catch-all for string errors from the browser boundary.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CsvEditError>;

/// How an error should be shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Blocking `window.alert`.
    Alert,
    /// Non-blocking toast notification.
    Toast,
    /// Not shown; logged only.
    Silent,
}

impl CsvEditError {
    /// Pick the notification style for this error.
    #[must_use]
    pub fn presentation(&self) -> Notice {
        match self {
            Self::InvalidFileType(_) => Notice::Alert,
            Self::Superseded => Notice::Silent,
            _ => Notice::Toast,
        }
    }
}

impl From<String> for CsvEditError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

#[cfg(target_arch = "wasm32")]
impl From<CsvEditError> for wasm_bindgen::JsValue {
    fn from(e: CsvEditError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
