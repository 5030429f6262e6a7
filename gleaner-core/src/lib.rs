//! Gleaner Core - Platform-agnostic quotation selection engine
//!
//! Takes the words an OCR recognizer found on a photographed page, places
//! them on screen, turns finger drags into a selection and rebuilds the
//! selected words into a quotation in reading order. Used by both the
//! terminal host and the WASM host.

pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod gesture;
pub mod model;
pub mod reading_order;
pub mod selection;
pub mod session;
pub mod store;

pub use config::EngineConfig;
pub use error::ScanError;
pub use export::{to_json, ExportQuote};
pub use geometry::{
    estimate_rotation, map_to_screen, rotate_to_upright, DisplayTransform, Layout, Orientation,
    PhotoInfo, ScreenRect, Viewport,
};
pub use gesture::{sample_segment, GestureEvent, GestureState, GestureTracker, HitSurface, StrokeMode};
pub use model::{
    BoundingBox, FragmentKey, Outline, PhotoMetadata, Point, Quote, QuoteDraft, RecognitionResult,
    ScanCapture, TextFragment, UNKNOWN_AUTHOR, UNKNOWN_BOOK,
};
pub use reading_order::{global_rotation, reconstruct_quote};
pub use selection::SelectionSet;
pub use session::{angle_label, Overlay, ScanSession, ScanStats};
pub use store::{InMemoryQuoteStore, QuoteStore};
