//! Browser-facing CSV editor.
//!
//! `CsvEdit` owns a [`Session`] and connects it to the page:
//! - A file picker that imports `.csv` files
//! - An editable table (one text input per cell, a Delete button per row)
//! - Add Row / Download CSV actions
//! - Alerts and toasts for errors
//!
//! Native builds get the same operations without the DOM, for tests and
//! the CLI.

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod download;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod toast;

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::session::Session;

#[cfg(target_arch = "wasm32")]
use dom::EditorUi;
#[cfg(target_arch = "wasm32")]
use web_sys::{Event, File, HtmlElement};

/// Row index as sent by JavaScript; negative values address no row.
fn row_from_js(row: i32) -> Option<usize> {
    usize::try_from(row).ok()
}

fn row_to_js(row: usize) -> u32 {
    u32::try_from(row).unwrap_or(u32::MAX)
}

/// The main editor struct exported to JavaScript.
#[wasm_bindgen]
pub struct CsvEdit {
    #[cfg(target_arch = "wasm32")]
    session: Rc<RefCell<Session>>,
    #[cfg(target_arch = "wasm32")]
    ui: Rc<EditorUi>,
    #[cfg(target_arch = "wasm32")]
    _closures: Vec<Closure<dyn FnMut(Event)>>,

    // Non-wasm32 fields (for tests/CLI)
    #[cfg(not(target_arch = "wasm32"))]
    session: Session,
}

// ============================================================================
// WASM32 Implementation
// ============================================================================

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl CsvEdit {
    /// Mount an editor with the default configuration inside `container`.
    #[wasm_bindgen(constructor)]
    pub fn new(container: HtmlElement) -> Result<CsvEdit, JsValue> {
        Self::with_config(container, JsValue::UNDEFINED)
    }

    /// Mount an editor with a configuration object (see `EditorConfig`).
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(container: HtmlElement, config: JsValue) -> Result<CsvEdit, JsValue> {
        console_error_panic_hook::set_once();

        let config: crate::config::EditorConfig = if config.is_undefined() || config.is_null() {
            crate::config::EditorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| crate::error::CsvEditError::Config(e.to_string()))?
        };
        crate::logging::init(&config.log_level);

        let ui = Rc::new(EditorUi::mount(&container, config.toast_duration_ms)?);
        let session = Rc::new(RefCell::new(Session::new(config)));
        let closures = Self::wire_events(&session, &ui);

        Ok(CsvEdit {
            session,
            ui,
            _closures: closures,
        })
    }

    /// Import a `File` (e.g. from a drop event) as if it was picked.
    #[wasm_bindgen]
    pub fn import_file(&self, file: File) {
        Self::start_import(&self.session, &self.ui, file);
    }

    /// Set a cell value and re-render.
    #[wasm_bindgen]
    pub fn set_cell(&self, row: u32, column: &str, value: &str) -> Result<(), JsValue> {
        let row = usize::try_from(row).unwrap_or(usize::MAX);
        self.session.borrow_mut().set_cell(row, column, value)?;
        self.render()
    }

    /// Append an empty row and return its index.
    #[wasm_bindgen]
    pub fn add_row(&self) -> Result<u32, JsValue> {
        let index = self.session.borrow_mut().add_row();
        self.render()?;
        Ok(row_to_js(index))
    }

    /// Delete a row. Returns `false` (and changes nothing) for unknown rows.
    #[wasm_bindgen]
    pub fn delete_row(&self, row: i32) -> Result<bool, JsValue> {
        let removed = row_from_js(row)
            .and_then(|row| self.session.borrow_mut().delete_row(row))
            .is_some();
        if removed {
            self.render()?;
        }
        Ok(removed)
    }

    /// Serialize the table: `{ fileName, mediaType, contents }`.
    #[wasm_bindgen]
    pub fn export(&self) -> Result<JsValue, JsValue> {
        let file = self.session.borrow_mut().export()?;
        serde_wasm_bindgen::to_value(&file)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Export and trigger a browser download.
    #[wasm_bindgen]
    pub fn download(&self) -> Result<(), JsValue> {
        let file = self.session.borrow_mut().export()?;
        download::offer_download(&self.ui.document, &file)
    }

    /// The current table as `{ headers, rows, sourceFileName }`.
    #[wasm_bindgen]
    pub fn dataset(&self) -> Result<JsValue, JsValue> {
        use serde::Serialize;

        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        self.session
            .borrow()
            .dataset()
            .serialize(&serializer)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// `"empty"`, `"importing"` or `"loaded"`.
    #[wasm_bindgen]
    pub fn state(&self) -> String {
        self.session.borrow().state().as_str().to_string()
    }

    /// Check if the table changed since the last import or export.
    #[wasm_bindgen]
    pub fn is_dirty(&self) -> bool {
        self.session.borrow().is_dirty()
    }
}

#[cfg(target_arch = "wasm32")]
impl CsvEdit {
    fn render(&self) -> Result<(), JsValue> {
        self.ui.render(self.session.borrow().dataset())
    }
}

// ============================================================================
// Non-WASM32 Implementation (for tests)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
impl CsvEdit {
    /// Create an editor without a DOM (non-WASM, for testing/CLI).
    #[must_use]
    pub fn new_test() -> Self {
        Self::with_config(crate::config::EditorConfig::default())
    }

    /// Create an editor without a DOM using `config`.
    #[must_use]
    pub fn with_config(config: crate::config::EditorConfig) -> Self {
        CsvEdit {
            session: Session::new(config),
        }
    }

    /// Import file contents with the browser-reported name and media type.
    pub fn import(
        &mut self,
        name: &str,
        media_type: &str,
        data: &[u8],
    ) -> crate::error::Result<crate::codec::ImportReport> {
        let file = crate::types::FileMeta::new(name, media_type);
        self.session.import(&file, data)
    }

    /// Set a cell value.
    pub fn set_cell(&mut self, row: u32, column: &str, value: &str) -> crate::error::Result<()> {
        let row = usize::try_from(row).unwrap_or(usize::MAX);
        self.session.set_cell(row, column, value)
    }

    /// Append an empty row and return its index.
    pub fn add_row(&mut self) -> u32 {
        row_to_js(self.session.add_row())
    }

    /// Delete a row. Returns `false` (and changes nothing) for unknown rows.
    pub fn delete_row(&mut self, row: i32) -> bool {
        row_from_js(row)
            .and_then(|row| self.session.delete_row(row))
            .is_some()
    }

    /// Serialize the table to CSV.
    pub fn export(&mut self) -> crate::error::Result<crate::types::ExportFile> {
        self.session.export()
    }

    /// The current table as JSON: `{ headers, rows, sourceFileName }`.
    pub fn dataset_json(&self) -> crate::error::Result<String> {
        serde_json::to_string(self.session.dataset())
            .map_err(|e| crate::error::CsvEditError::from(format!("JSON serialization error: {e}")))
    }

    /// `"empty"`, `"importing"` or `"loaded"`.
    #[must_use]
    pub fn state(&self) -> String {
        self.session.state().as_str().to_string()
    }

    /// Check if the table changed since the last import or export.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.session.is_dirty()
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_from_js() {
        assert_eq!(row_from_js(0), Some(0));
        assert_eq!(row_from_js(12), Some(12));
        assert_eq!(row_from_js(-1), None);
        assert_eq!(row_from_js(i32::MIN), None);
    }

    #[test]
    fn test_row_to_js_saturates() {
        assert_eq!(row_to_js(3), 3);
        assert_eq!(row_to_js(usize::MAX), u32::MAX);
    }
}
