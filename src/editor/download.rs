//! Offer an exported CSV as a browser download.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, Document, HtmlAnchorElement, Url};

use super::dom::create;
use crate::types::ExportFile;

/// Wrap the CSV in a Blob and click a temporary `<a download>` link.
pub(crate) fn offer_download(document: &Document, file: &ExportFile) -> Result<(), JsValue> {
    let parts = js_sys::Array::of1(&JsValue::from_str(&file.contents));
    let options = BlobPropertyBag::new();
    options.set_type(&file.media_type);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let link: HtmlAnchorElement = create(document, "a")?;
    link.set_href(&url);
    link.set_download(&file.file_name);

    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;
    body.append_child(&link)?;
    link.click();
    body.remove_child(&link)?;
    revoke_later(url)
}

/// Release the object URL on the next tick; revoking during the click
/// handler can cancel the download.
fn revoke_later(url: String) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let revoke = Closure::once_into_js(move || {
        let _ = Url::revoke_object_url(&url);
    });
    window.set_timeout_with_callback_and_timeout_and_arguments_0(revoke.unchecked_ref(), 0)?;
    Ok(())
}
