pub mod fragment;
pub mod quote;
pub mod recognition;

pub use fragment::{BoundingBox, FragmentKey, Outline, Point, TextFragment};
pub use quote::{Quote, QuoteDraft, UNKNOWN_AUTHOR, UNKNOWN_BOOK};
pub use recognition::{
    PhotoMetadata, RecognitionResult, RecognizedBlock, RecognizedElement, RecognizedLine,
    ScanCapture,
};
