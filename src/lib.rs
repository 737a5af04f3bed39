//! csvedit - CSV viewer/editor for the web
//!
//! Imports a local CSV file into an editable table in the browser via
//! WebAssembly:
//! - Edit any cell, add and delete rows
//! - Export back to CSV as a download
//! - Header-consistent rows (short rows padded, duplicate headers renamed)
//! - The newest import always wins when several are in flight
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { CsvEdit } from 'csvedit';
//! await init();
//! const editor = new CsvEdit(document.getElementById('app'));
//! // or: CsvEdit.withConfig(el, { defaultFileName: 'table.csv', logLevel: 'debug' });
//! ```

pub mod codec;
pub mod config;
pub mod editor;
pub mod error;
pub mod logging;
pub mod session;
pub mod types;

use wasm_bindgen::prelude::*;

pub use codec::{CodecOptions, Delimiter, ImportReport};
pub use config::EditorConfig;
pub use editor::CsvEdit;
pub use error::{CsvEditError, Notice, Result};
pub use session::{ImportToken, Session, SessionState};
pub use types::*;

/// Parse CSV text and return a JSON string `{ headers, rows, sourceFileName }`
///
/// Uses the default codec settings (comma delimiter, header row, blank lines
/// skipped).
///
/// # Errors
/// Returns an error if the text has no data rows or cannot be parsed.
#[wasm_bindgen]
pub fn parse_csv(text: &str) -> std::result::Result<String, JsValue> {
    let dataset = parse_dataset(text.as_bytes(), &CodecOptions::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_json::to_string(&dataset)
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Parse CSV bytes into a [`Dataset`] without a session.
///
/// # Errors
/// Returns [`CsvEditError::EmptyFile`] if there are no data rows.
pub fn parse_dataset(data: &[u8], options: &CodecOptions) -> Result<Dataset> {
    let table = codec::parse(data, options)?;
    if table.rows.is_empty() {
        return Err(CsvEditError::EmptyFile);
    }
    Ok(Dataset::new(table.headers, table.rows))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
