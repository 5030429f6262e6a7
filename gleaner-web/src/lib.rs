//! Gleaner Web - WebAssembly bindings for the selection engine
//!
//! The JavaScript UI draws the photo and forwards container size and pointer
//! events; this crate owns the scan state and hands back overlays and text.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use gleaner_core::{
    EngineConfig, ExportQuote, GestureEvent, InMemoryQuoteStore, QuoteDraft, QuoteStore,
    ScanCapture, ScanSession, Viewport,
};

pub mod io;

/// One word box as the UI should draw it
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayView {
    pub text: String,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub rotation_degrees: f64,
    pub selected: bool,
}

pub fn overlay_views(session: &ScanSession) -> Vec<OverlayView> {
    session
        .overlays()
        .into_iter()
        .map(|overlay| OverlayView {
            text: overlay.fragment.text.clone(),
            left: overlay.rect.left,
            top: overlay.rect.top,
            width: overlay.rect.width,
            height: overlay.rect.height,
            rotation_degrees: overlay.rect.rotation_degrees,
            selected: overlay.selected,
        })
        .collect()
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Initialize the module
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"Gleaner WASM initialized".into());
}

/// Scan workflow state exposed to JavaScript
#[wasm_bindgen]
pub struct ScanWorkflow {
    session: ScanSession,
    store: InMemoryQuoteStore,
}

#[wasm_bindgen]
impl ScanWorkflow {
    /// Create a workflow, optionally tuned by a TOML config
    #[wasm_bindgen(constructor)]
    pub fn new(config_toml: Option<String>) -> Result<ScanWorkflow, JsValue> {
        let config = match config_toml {
            Some(toml) => EngineConfig::from_toml_str(&toml).map_err(js_error)?,
            None => EngineConfig::default(),
        };
        Ok(ScanWorkflow {
            session: ScanSession::new(config),
            store: InMemoryQuoteStore::new(),
        })
    }

    /// Load a recognized photo; returns the number of words found
    #[wasm_bindgen(js_name = loadCapture)]
    pub fn load_capture(&mut self, json: &str) -> Result<usize, JsValue> {
        let capture = ScanCapture::from_json(json).map_err(js_error)?;
        self.session.load(&capture).map_err(js_error)
    }

    /// The overlay container was measured
    pub fn layout(&mut self, width: f64, height: f64) {
        self.session.on_layout(Viewport::new(width, height));
    }

    #[wasm_bindgen(js_name = gestureStart)]
    pub fn gesture_start(&mut self, x: Option<f64>, y: Option<f64>) -> bool {
        self.session.handle_gesture(GestureEvent::Start { x, y })
    }

    #[wasm_bindgen(js_name = gestureMove)]
    pub fn gesture_move(&mut self, x: Option<f64>, y: Option<f64>) -> bool {
        self.session.handle_gesture(GestureEvent::Move { x, y })
    }

    #[wasm_bindgen(js_name = gestureEnd)]
    pub fn gesture_end(&mut self) {
        self.session.handle_gesture(GestureEvent::End);
    }

    /// The responder was taken away mid-drag
    #[wasm_bindgen(js_name = gestureTerminate)]
    pub fn gesture_terminate(&mut self) {
        self.session.handle_gesture(GestureEvent::Terminate);
    }

    pub fn quote(&self) -> String {
        self.session.quote().to_string()
    }

    #[wasm_bindgen(js_name = overlaysJson)]
    pub fn overlays_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&overlay_views(&self.session)).map_err(js_error)
    }

    #[wasm_bindgen(js_name = detectedCount)]
    pub fn detected_count(&self) -> usize {
        self.session.stats().detected
    }

    #[wasm_bindgen(js_name = selectedCount)]
    pub fn selected_count(&self) -> usize {
        self.session.stats().selected
    }

    #[wasm_bindgen(js_name = clearSelection)]
    pub fn clear_selection(&mut self) {
        self.session.clear_selection();
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    #[wasm_bindgen(js_name = toggleDebugAngles)]
    pub fn toggle_debug_angles(&mut self) -> bool {
        self.session.toggle_debug_angles()
    }

    #[wasm_bindgen(js_name = debugAngles)]
    pub fn debug_angles(&self) -> Option<String> {
        self.session.debug_angles()
    }

    /// Save the quote and reset; returns the saved quote as JSON
    pub fn save(
        &mut self,
        book: Option<String>,
        author: Option<String>,
        text: Option<String>,
    ) -> Result<String, JsValue> {
        let draft = QuoteDraft {
            text: text.unwrap_or_default(),
            book,
            author,
        };
        let quote = self.session.save(draft, &mut self.store).map_err(js_error)?;
        serde_json::to_string(&ExportQuote::from(&quote)).map_err(js_error)
    }

    #[wasm_bindgen(js_name = exportJson)]
    pub fn export_json(&self) -> Result<String, JsValue> {
        io::quotes_json(&self.store.list())
    }

    /// Offer the saved quotes as a file download
    #[wasm_bindgen(js_name = downloadQuotes)]
    pub fn download_quotes(&self) -> Result<(), JsValue> {
        io::download_quotes(&self.store.list())
    }
}
