//! DOM layout and table rendering for `CsvEdit`.
//!
//! Builds the static chrome once (file picker, upload button, table host,
//! Add Row / Download CSV buttons, toast stack) and re-renders the table
//! from the session's dataset. Cell inputs and Delete buttons carry
//! `data-*` attributes so one delegated listener on the table host can map
//! DOM events back to `(row, column)`.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, HtmlButtonElement, HtmlElement, HtmlInputElement, HtmlTableCellElement,
    HtmlTableElement, HtmlTableRowElement, HtmlTableSectionElement,
};

use super::toast::Toaster;
use crate::error::{CsvEditError, Notice};
use crate::types::Dataset;

pub(crate) const ATTR_ROW: &str = "data-row";
pub(crate) const ATTR_COL: &str = "data-col";
pub(crate) const ATTR_DELETE_ROW: &str = "data-delete-row";
pub(crate) const ATTR_ACTION: &str = "data-action";

/// Create an element and cast it to its concrete type.
pub(crate) fn create<T: JsCast>(document: &Document, tag: &str) -> Result<T, JsValue> {
    document
        .create_element(tag)?
        .dyn_into::<T>()
        .map_err(JsValue::from)
}

fn button(document: &Document, label: &str, background: &str) -> Result<HtmlButtonElement, JsValue> {
    let el: HtmlButtonElement = create(document, "button")?;
    el.set_type("button");
    el.set_text_content(Some(label));
    let style = el.style();
    let _ = style.set_property("padding", "6px 14px");
    let _ = style.set_property("border", "none");
    let _ = style.set_property("border-radius", "6px");
    let _ = style.set_property("background", background);
    let _ = style.set_property("color", "#fff");
    let _ = style.set_property("font", "inherit");
    let _ = style.set_property("cursor", "pointer");
    Ok(el)
}

/// The editor's DOM, mounted inside a host element.
pub(crate) struct EditorUi {
    pub(crate) document: Document,
    pub(crate) file_input: HtmlInputElement,
    pub(crate) upload_button: HtmlButtonElement,
    pub(crate) table_host: HtmlElement,
    pub(crate) actions: HtmlElement,
    pub(crate) add_row_button: HtmlButtonElement,
    pub(crate) download_button: HtmlButtonElement,
    toaster: Toaster,
}

impl EditorUi {
    /// Build the editor chrome inside `container`.
    pub(crate) fn mount(container: &HtmlElement, toast_duration_ms: u32) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;

        let toolbar: HtmlElement = create(&document, "div")?;
        {
            let style = toolbar.style();
            let _ = style.set_property("display", "flex");
            let _ = style.set_property("align-items", "center");
            let _ = style.set_property("gap", "16px");
            let _ = style.set_property("margin-bottom", "16px");
        }

        let file_input: HtmlInputElement = create(&document, "input")?;
        file_input.set_type("file");
        file_input.set_accept(".csv");

        let upload_button = button(&document, "Upload CSV", "#111827")?;
        upload_button.set_attribute(ATTR_ACTION, "upload")?;
        toolbar.append_child(&file_input)?;
        toolbar.append_child(&upload_button)?;

        let table_host: HtmlElement = create(&document, "div")?;
        let _ = table_host.style().set_property("overflow", "auto");
        let _ = table_host.style().set_property("margin-bottom", "16px");

        let actions: HtmlElement = create(&document, "div")?;
        {
            let style = actions.style();
            let _ = style.set_property("display", "none");
            let _ = style.set_property("gap", "16px");
        }
        let add_row_button = button(&document, "Add Row", "#111827")?;
        add_row_button.set_attribute(ATTR_ACTION, "add-row")?;
        let download_button = button(&document, "Download CSV", "#111827")?;
        download_button.set_attribute(ATTR_ACTION, "download")?;
        actions.append_child(&add_row_button)?;
        actions.append_child(&download_button)?;

        let toaster = Toaster::new(&document, toast_duration_ms)?;

        container.append_child(toaster.element())?;
        container.append_child(&toolbar)?;
        container.append_child(&table_host)?;
        container.append_child(&actions)?;

        Ok(Self {
            document,
            file_input,
            upload_button,
            table_host,
            actions,
            add_row_button,
            download_button,
            toaster,
        })
    }

    /// Replace the table with the current dataset.
    ///
    /// Nothing but the file picker is shown while the dataset has no rows.
    pub(crate) fn render(&self, dataset: &Dataset) -> Result<(), JsValue> {
        self.table_host.set_inner_html("");
        if dataset.is_empty() {
            let _ = self.actions.style().set_property("display", "none");
            return Ok(());
        }

        let table: HtmlTableElement = create(&self.document, "table")?;
        {
            let style = table.style();
            let _ = style.set_property("border-collapse", "collapse");
            let _ = style.set_property("width", "100%");
        }

        let head: HtmlTableSectionElement = create(&self.document, "thead")?;
        let head_row: HtmlTableRowElement = create(&self.document, "tr")?;
        for header in dataset.headers() {
            head_row.append_child(&self.header_cell(header)?)?;
        }
        head_row.append_child(&self.header_cell("Actions")?)?;
        head.append_child(&head_row)?;
        table.append_child(&head)?;

        let body: HtmlTableSectionElement = create(&self.document, "tbody")?;
        for (row_idx, record) in dataset.rows().iter().enumerate() {
            let tr: HtmlTableRowElement = create(&self.document, "tr")?;
            let row_attr = row_idx.to_string();

            for (header, value) in dataset.headers().iter().zip(record.values()) {
                let td: HtmlTableCellElement = create(&self.document, "td")?;
                let _ = td.style().set_property("padding", "4px");
                let input: HtmlInputElement = create(&self.document, "input")?;
                input.set_type("text");
                input.set_value(value);
                input.set_attribute(ATTR_ROW, &row_attr)?;
                input.set_attribute(ATTR_COL, header)?;
                {
                    let style = input.style();
                    let _ = style.set_property("width", "100%");
                    let _ = style.set_property("box-sizing", "border-box");
                    let _ = style.set_property("padding", "4px 8px");
                    let _ = style.set_property("border", "1px solid #d1d5db");
                    let _ = style.set_property("border-radius", "4px");
                }
                td.append_child(&input)?;
                tr.append_child(&td)?;
            }

            let td: HtmlTableCellElement = create(&self.document, "td")?;
            let _ = td.style().set_property("padding", "4px");
            let delete = button(&self.document, "Delete", "#dc2626")?;
            delete.set_attribute(ATTR_DELETE_ROW, &row_attr)?;
            td.append_child(&delete)?;
            tr.append_child(&td)?;

            body.append_child(&tr)?;
        }
        table.append_child(&body)?;

        self.table_host.append_child(&table)?;
        let _ = self.actions.style().set_property("display", "flex");
        Ok(())
    }

    fn header_cell(&self, text: &str) -> Result<HtmlTableCellElement, JsValue> {
        let th: HtmlTableCellElement = create(&self.document, "th")?;
        th.set_text_content(Some(text));
        let style = th.style();
        let _ = style.set_property("text-align", "left");
        let _ = style.set_property("padding", "8px 4px");
        let _ = style.set_property("border-bottom", "1px solid #e5e7eb");
        Ok(th)
    }

    /// Disable the picker while a file is being read.
    pub(crate) fn set_busy(&self, busy: bool) {
        self.file_input.set_disabled(busy);
        self.upload_button.set_disabled(busy);
    }

    /// Surface an error the way its variant asks for.
    pub(crate) fn notify(&self, err: &CsvEditError) {
        match err.presentation() {
            Notice::Alert => {
                if let Some(window) = web_sys::window() {
                    let _ = window.alert_with_message(&err.to_string());
                }
            }
            Notice::Toast => self.toaster.show(&err.to_string()),
            Notice::Silent => tracing::debug!(error = %err, "notice suppressed"),
        }
    }

    /// Show an informational toast.
    pub(crate) fn toast(&self, message: &str) {
        self.toaster.show(message);
    }
}
