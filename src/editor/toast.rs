//! Non-blocking toast notifications.
//!
//! A fixed stack in the bottom-right corner; each toast removes itself
//! after the configured duration.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement};

use super::dom::create;

pub(crate) struct Toaster {
    document: Document,
    stack: HtmlElement,
    duration_ms: i32,
}

impl Toaster {
    pub(crate) fn new(document: &Document, duration_ms: u32) -> Result<Self, JsValue> {
        let stack: HtmlElement = create(document, "div")?;
        let style = stack.style();
        let _ = style.set_property("position", "fixed");
        let _ = style.set_property("right", "16px");
        let _ = style.set_property("bottom", "16px");
        let _ = style.set_property("display", "flex");
        let _ = style.set_property("flex-direction", "column");
        let _ = style.set_property("gap", "8px");
        let _ = style.set_property("z-index", "1000");

        Ok(Self {
            document: document.clone(),
            stack,
            duration_ms: i32::try_from(duration_ms).unwrap_or(i32::MAX),
        })
    }

    pub(crate) fn element(&self) -> &HtmlElement {
        &self.stack
    }

    /// Show `message` and schedule its removal.
    pub(crate) fn show(&self, message: &str) {
        let Ok(toast) = create::<HtmlElement>(&self.document, "div") else {
            return;
        };
        toast.set_text_content(Some(message));
        let _ = toast.set_attribute("role", "status");
        {
            let style = toast.style();
            let _ = style.set_property("padding", "10px 14px");
            let _ = style.set_property("border-radius", "6px");
            let _ = style.set_property("background", "#111827");
            let _ = style.set_property("color", "#fff");
            let _ = style.set_property("box-shadow", "0 4px 12px rgba(0,0,0,0.15)");
            let _ = style.set_property("max-width", "360px");
        }
        if self.stack.append_child(&toast).is_err() {
            return;
        }

        let Some(window) = web_sys::window() else {
            return;
        };
        let remove = Closure::once_into_js(move || toast.remove());
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            remove.unchecked_ref(),
            self.duration_ms,
        );
    }
}
