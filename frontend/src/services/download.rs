//! Browser-side file download and print.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

fn js_error(context: &str, value: JsValue) -> String {
    format!("{}: {:?}", context, value)
}

/// Offer `content` as a download named `file_name`.
pub fn download_text(file_name: &str, mime_type: &str, content: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window available")?;
    let document = window.document().ok_or("No document available")?;

    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(content));
    let options = BlobPropertyBag::new();
    options.set_type(mime_type);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(|e| js_error("Failed to create file", e))?;
    let url = Url::create_object_url_with_blob(&blob).map_err(|e| js_error("Failed to create link", e))?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| js_error("Failed to create link", e))?
        .dyn_into()
        .map_err(|_| "Created element is not an anchor".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    Url::revoke_object_url(&url).map_err(|e| js_error("Failed to release link", e))?;
    Ok(())
}

pub fn print_page() -> Result<(), String> {
    let window = web_sys::window().ok_or("No window available")?;
    window.print().map_err(|e| js_error("Failed to print", e))
}
