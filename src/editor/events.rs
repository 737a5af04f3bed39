//! DOM event handlers for `CsvEdit`.
//!
//! Listeners are registered once when the editor is mounted. Table events
//! are delegated to the table host, so re-rendering the table never has to
//! re-register anything.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, Event, File, HtmlInputElement};

use super::dom::{EditorUi, ATTR_COL, ATTR_DELETE_ROW, ATTR_ROW};
use super::download::offer_download;
use super::CsvEdit;
use crate::error::{CsvEditError, Result};
use crate::session::{Session, SessionState};
use crate::types::FileMeta;

fn js_error_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Read a `File`'s bytes.
async fn read_file(file: &File) -> Result<Vec<u8>> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| CsvEditError::from(format!("could not read file: {}", js_error_message(&e))))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

impl CsvEdit {
    /// Validate `file`, then read and import it in the background.
    pub(crate) fn start_import(session: &Rc<RefCell<Session>>, ui: &Rc<EditorUi>, file: File) {
        let meta = FileMeta::new(file.name(), file.type_());
        let begun = session.borrow_mut().begin_import(&meta);
        let token = match begun {
            Ok(token) => token,
            Err(err) => {
                ui.notify(&err);
                return;
            }
        };
        ui.set_busy(true);

        let session = Rc::clone(session);
        let ui = Rc::clone(ui);
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = match read_file(&file).await {
                Ok(bytes) => session.borrow_mut().complete_import(token, &bytes),
                Err(err) => {
                    if session.borrow_mut().cancel_import(token) {
                        Err(err)
                    } else {
                        Err(CsvEditError::Superseded)
                    }
                }
            };

            match outcome {
                Ok(report) => {
                    if let Err(e) = ui.render(session.borrow().dataset()) {
                        ui.notify(&CsvEditError::from(js_error_message(&e)));
                    }
                    let adjusted = report.padded_rows + report.truncated_rows;
                    if adjusted > 0 {
                        ui.toast(&format!(
                            "{adjusted} row(s) did not match the header and were adjusted"
                        ));
                    }
                }
                Err(err) => ui.notify(&err),
            }
            ui.set_busy(session.borrow().state() == SessionState::Importing);
        });
    }

    fn rerender(session: &Rc<RefCell<Session>>, ui: &EditorUi) {
        if let Err(e) = ui.render(session.borrow().dataset()) {
            ui.notify(&CsvEditError::from(js_error_message(&e)));
        }
    }

    /// Register all listeners; the returned closures must outlive the DOM.
    pub(crate) fn wire_events(
        session: &Rc<RefCell<Session>>,
        ui: &Rc<EditorUi>,
    ) -> Vec<Closure<dyn FnMut(Event)>> {
        let mut closures: Vec<Closure<dyn FnMut(Event)>> = Vec::new();

        // File picked
        {
            let session = Rc::clone(session);
            let ui_ref = Rc::clone(ui);
            let closure = Closure::wrap(Box::new(move |_event: Event| {
                if let Some(file) = ui_ref.file_input.files().and_then(|list| list.get(0)) {
                    Self::start_import(&session, &ui_ref, file);
                }
            }) as Box<dyn FnMut(Event)>);
            ui.file_input
                .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())
                .ok();
            closures.push(closure);
        }

        // Upload button: re-import the picked file, or open the picker
        {
            let session = Rc::clone(session);
            let ui_ref = Rc::clone(ui);
            let closure = Closure::wrap(Box::new(move |_event: Event| {
                match ui_ref.file_input.files().and_then(|list| list.get(0)) {
                    Some(file) => Self::start_import(&session, &ui_ref, file),
                    None => ui_ref.file_input.click(),
                }
            }) as Box<dyn FnMut(Event)>);
            ui.upload_button
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
                .ok();
            closures.push(closure);
        }

        // Cell edits (delegated)
        {
            let session = Rc::clone(session);
            let ui_ref = Rc::clone(ui);
            let closure = Closure::wrap(Box::new(move |event: Event| {
                let Some(input) = event
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                else {
                    return;
                };
                let (Some(row), Some(column)) =
                    (input.get_attribute(ATTR_ROW), input.get_attribute(ATTR_COL))
                else {
                    return;
                };
                let Ok(row) = row.parse::<usize>() else {
                    return;
                };
                let result = session.borrow_mut().set_cell(row, &column, &input.value());
                if let Err(err) = result {
                    ui_ref.notify(&err);
                    Self::rerender(&session, &ui_ref);
                }
            }) as Box<dyn FnMut(Event)>);
            ui.table_host
                .add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())
                .ok();
            closures.push(closure);
        }

        // Row deletes (delegated)
        {
            let session = Rc::clone(session);
            let ui_ref = Rc::clone(ui);
            let closure = Closure::wrap(Box::new(move |event: Event| {
                let selector = format!("[{ATTR_DELETE_ROW}]");
                let Some(button) = event
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .and_then(|el| el.closest(&selector).ok().flatten())
                else {
                    return;
                };
                let Some(row) = button
                    .get_attribute(ATTR_DELETE_ROW)
                    .and_then(|r| r.parse::<usize>().ok())
                else {
                    return;
                };
                let removed = session.borrow_mut().delete_row(row);
                if removed.is_some() {
                    Self::rerender(&session, &ui_ref);
                }
            }) as Box<dyn FnMut(Event)>);
            ui.table_host
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
                .ok();
            closures.push(closure);
        }

        // Add row
        {
            let session = Rc::clone(session);
            let ui_ref = Rc::clone(ui);
            let closure = Closure::wrap(Box::new(move |_event: Event| {
                session.borrow_mut().add_row();
                Self::rerender(&session, &ui_ref);
            }) as Box<dyn FnMut(Event)>);
            ui.add_row_button
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
                .ok();
            closures.push(closure);
        }

        // Download
        {
            let session = Rc::clone(session);
            let ui_ref = Rc::clone(ui);
            let closure = Closure::wrap(Box::new(move |_event: Event| {
                let exported = session.borrow_mut().export();
                match exported {
                    Ok(file) => {
                        if let Err(e) = offer_download(&ui_ref.document, &file) {
                            ui_ref.notify(&CsvEditError::from(js_error_message(&e)));
                        }
                    }
                    Err(err) => ui_ref.notify(&err),
                }
            }) as Box<dyn FnMut(Event)>);
            ui.download_button
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
                .ok();
            closures.push(closure);
        }

        closures
    }
}
