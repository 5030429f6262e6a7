use serde::{Deserialize, Serialize};

use crate::geometry::estimate_rotation;

/// A 2D point in image or screen space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned box in source-image space, either normalized to [0, 1] or in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Recognizers report fractional boxes with every component <= 1
    pub fn is_normalized(&self) -> bool {
        self.left <= 1.0 && self.top <= 1.0 && self.width <= 1.0 && self.height <= 1.0
    }

    /// Finite with a positive area
    pub fn is_usable(&self) -> bool {
        [self.left, self.top, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width > 0.0
            && self.height > 0.0
    }
}

/// Shape data the recognizer supplied for a fragment
#[derive(Debug, Clone, PartialEq)]
pub enum Outline {
    /// Only the axis-aligned box is known
    Axis,
    /// Four detected corners and the baseline tilt derived from them
    Quad {
        corners: [Point; 4],
        rotation_degrees: f64,
    },
}

/// Identity of a fragment within one scan: text plus top-left corner
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FragmentKey {
    text: String,
    left: u64,
    top: u64,
}

/// One recognized word with its geometry
#[derive(Debug, Clone, PartialEq)]
pub struct TextFragment {
    pub text: String,
    pub bounding_box: BoundingBox,
    pub outline: Outline,
}

impl TextFragment {
    pub fn new(text: impl Into<String>, bounding_box: BoundingBox) -> Self {
        Self {
            text: text.into(),
            bounding_box,
            outline: Outline::Axis,
        }
    }

    /// Create a fragment from its detected quadrilateral, estimating the tilt once
    pub fn with_corners(text: impl Into<String>, bounding_box: BoundingBox, corners: [Point; 4]) -> Self {
        Self {
            text: text.into(),
            bounding_box,
            outline: Outline::Quad {
                corners,
                rotation_degrees: estimate_rotation(&corners),
            },
        }
    }

    pub fn has_orientation_data(&self) -> bool {
        matches!(self.outline, Outline::Quad { .. })
    }

    pub fn rotation_degrees(&self) -> f64 {
        match self.outline {
            Outline::Axis => 0.0,
            Outline::Quad {
                rotation_degrees, ..
            } => rotation_degrees,
        }
    }

    pub fn key(&self) -> FragmentKey {
        // Adding 0.0 folds -0.0 into 0.0 so both hash alike
        FragmentKey {
            text: self.text.clone(),
            left: (self.bounding_box.left + 0.0).to_bits(),
            top: (self.bounding_box.top + 0.0).to_bits(),
        }
    }
}
