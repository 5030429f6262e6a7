//! Saved-quote download through a temporary object URL

use gleaner_core::{to_json, Quote};
use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

pub const EXPORT_FILENAME: &str = "gleaner-quotes.json";

/// `quotes` in the export layout
pub fn quotes_json(quotes: &[&Quote]) -> Result<String, JsValue> {
    to_json(quotes.iter().copied()).map_err(|e| JsValue::from_str(&format!("{e:#}")))
}

/// Serialize `quotes` and offer them as a file
pub fn download_quotes(quotes: &[&Quote]) -> Result<(), JsValue> {
    let json = quotes_json(quotes)?;
    let url = json_object_url(&json)?;
    let clicked = click_download_link(&url, EXPORT_FILENAME);
    // The blob is released even when the click failed
    Url::revoke_object_url(&url)?;
    clicked
}

fn json_object_url(json: &str) -> Result<String, JsValue> {
    let parts = js_sys::Array::of1(&JsValue::from_str(json));
    let options = BlobPropertyBag::new();
    options.set_type("application/json");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    Url::create_object_url_with_blob(&blob)
}

fn click_download_link(url: &str, filename: &str) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document to attach the download to"))?;
    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(url);
    anchor.set_download(filename);
    anchor.click();
    Ok(())
}
