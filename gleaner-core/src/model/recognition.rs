use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{BoundingBox, Point, TextFragment};
use crate::geometry::{Orientation, PhotoInfo};

/// Recognizer output: blocks of lines of elements
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecognitionResult {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub blocks: Vec<RecognizedBlock>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecognizedBlock {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub lines: Vec<RecognizedLine>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecognizedLine {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub elements: Vec<RecognizedElement>,
}

/// A single recognized word
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognizedElement {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<BoundingBox>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_points: Option<Vec<Point>>,
}

impl RecognizedElement {
    /// Elements without a frame cannot be placed on screen and are dropped
    pub fn to_fragment(&self) -> Option<TextFragment> {
        let frame = self.frame?;
        let fragment = match self.corner_points.as_deref() {
            Some(&[a, b, c, d]) => TextFragment::with_corners(self.text.clone(), frame, [a, b, c, d]),
            Some(points) => {
                warn!(
                    text = %self.text,
                    corners = points.len(),
                    "ignoring corner points that do not form a quadrilateral"
                );
                TextFragment::new(self.text.clone(), frame)
            }
            None => TextFragment::new(self.text.clone(), frame),
        };
        Some(fragment)
    }
}

impl RecognitionResult {
    /// Flatten every placeable element into fragments, in recognizer order
    pub fn fragments(&self) -> Vec<TextFragment> {
        self.blocks
            .iter()
            .flat_map(|block| block.lines.iter())
            .flat_map(|line| line.elements.iter())
            .filter_map(RecognizedElement::to_fragment)
            .collect()
    }
}

/// Photo facts reported by the capture layer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhotoMetadata {
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    /// EXIF orientation tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<u16>,
}

impl From<&PhotoMetadata> for PhotoInfo {
    fn from(meta: &PhotoMetadata) -> Self {
        PhotoInfo::new(
            meta.width,
            meta.height,
            Orientation::from_exif(meta.orientation.unwrap_or(1)),
        )
    }
}

/// A captured photo together with what the recognizer found on it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanCapture {
    pub photo: PhotoMetadata,
    pub recognition: RecognitionResult,
}

impl ScanCapture {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
