use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{map_to_screen, ScreenRect};
use crate::model::{Point, TextFragment};

/// Quarter-turn needed to present a captured photo upright
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Upright,
    Rotated90,
    Rotated180,
    Rotated270,
}

impl Orientation {
    /// Map an EXIF orientation tag; mirrored and unknown tags count as upright
    pub fn from_exif(tag: u16) -> Self {
        match tag {
            3 => Orientation::Rotated180,
            6 => Orientation::Rotated90,
            8 => Orientation::Rotated270,
            _ => Orientation::Upright,
        }
    }

    pub fn degrees(&self) -> u16 {
        match self {
            Orientation::Upright => 0,
            Orientation::Rotated90 => 90,
            Orientation::Rotated180 => 180,
            Orientation::Rotated270 => 270,
        }
    }

    /// Quarter and three-quarter turns exchange width and height
    pub fn swaps_axes(&self) -> bool {
        matches!(self, Orientation::Rotated90 | Orientation::Rotated270)
    }
}

/// Native pixel size and orientation of the captured photo
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotoInfo {
    pub width: f64,
    pub height: f64,
    pub orientation: Orientation,
}

impl PhotoInfo {
    /// Unknown or unusable dimensions fall back to 1
    pub fn new(width: f64, height: f64, orientation: Orientation) -> Self {
        Self {
            width: positive_or_one(width),
            height: positive_or_one(height),
            orientation,
        }
    }

    /// Dimensions once the photo is turned upright
    pub fn oriented_size(&self) -> (f64, f64) {
        if self.orientation.swaps_axes() {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }
}

fn positive_or_one(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        1.0
    }
}

/// Measured size of the overlay container
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_measured(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Where the upright photo lands inside the viewport under a "contain" fit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayTransform {
    pub displayed_width: f64,
    pub displayed_height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl DisplayTransform {
    /// Letterbox the photo into the viewport; `None` until the viewport has been measured
    pub fn contain(photo: &PhotoInfo, viewport: Viewport) -> Option<Self> {
        if !viewport.is_measured() {
            return None;
        }

        let (image_width, image_height) = photo.oriented_size();
        let image_aspect = image_width / image_height;
        let container_aspect = viewport.width / viewport.height;

        let transform = if image_aspect > container_aspect {
            let displayed_height = viewport.width / image_aspect;
            DisplayTransform {
                displayed_width: viewport.width,
                displayed_height,
                offset_x: 0.0,
                offset_y: (viewport.height - displayed_height) / 2.0,
            }
        } else {
            let displayed_width = viewport.height * image_aspect;
            DisplayTransform {
                displayed_width,
                displayed_height: viewport.height,
                offset_x: (viewport.width - displayed_width) / 2.0,
                offset_y: 0.0,
            }
        };
        Some(transform)
    }

    /// Center of the displayed image
    pub fn center(&self) -> Point {
        Point::new(
            self.offset_x + self.displayed_width / 2.0,
            self.offset_y + self.displayed_height / 2.0,
        )
    }
}

/// A photo placed in a measured viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    photo: PhotoInfo,
    transform: DisplayTransform,
}

impl Layout {
    pub fn measure(photo: PhotoInfo, viewport: Viewport) -> Option<Self> {
        let transform = DisplayTransform::contain(&photo, viewport)?;
        debug!(
            orientation = photo.orientation.degrees(),
            width = transform.displayed_width,
            height = transform.displayed_height,
            offset_x = transform.offset_x,
            offset_y = transform.offset_y,
            "display transform computed"
        );
        Some(Self { photo, transform })
    }

    pub fn photo(&self) -> &PhotoInfo {
        &self.photo
    }

    pub fn transform(&self) -> &DisplayTransform {
        &self.transform
    }

    pub fn center(&self) -> Point {
        self.transform.center()
    }

    pub fn screen_rect(&self, fragment: &TextFragment) -> Option<ScreenRect> {
        map_to_screen(fragment, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exif_orientation() {
        assert_eq!(Orientation::from_exif(1), Orientation::Upright);
        assert_eq!(Orientation::from_exif(3), Orientation::Rotated180);
        assert_eq!(Orientation::from_exif(6), Orientation::Rotated90);
        assert_eq!(Orientation::from_exif(8), Orientation::Rotated270);
        assert_eq!(Orientation::from_exif(2), Orientation::Upright);
        assert_eq!(Orientation::from_exif(0), Orientation::Upright);
    }

    #[test]
    fn test_contain_wide_image() {
        let photo = PhotoInfo::new(400.0, 200.0, Orientation::Upright);
        let transform = DisplayTransform::contain(&photo, Viewport::new(200.0, 200.0)).unwrap();
        assert_eq!(transform.displayed_width, 200.0);
        assert_eq!(transform.displayed_height, 100.0);
        assert_eq!(transform.offset_x, 0.0);
        assert_eq!(transform.offset_y, 50.0);
        assert_eq!(transform.center(), Point::new(100.0, 100.0));
    }

    #[test]
    fn test_contain_tall_image() {
        let photo = PhotoInfo::new(100.0, 400.0, Orientation::Upright);
        let transform = DisplayTransform::contain(&photo, Viewport::new(300.0, 200.0)).unwrap();
        assert_eq!(transform.displayed_height, 200.0);
        assert_eq!(transform.displayed_width, 50.0);
        assert_eq!(transform.offset_x, 125.0);
        assert_eq!(transform.offset_y, 0.0);
    }

    #[test]
    fn test_contain_swaps_for_quarter_turn() {
        // A landscape sensor frame shown in portrait
        let photo = PhotoInfo::new(400.0, 200.0, Orientation::Rotated90);
        assert_eq!(photo.oriented_size(), (200.0, 400.0));

        let transform = DisplayTransform::contain(&photo, Viewport::new(200.0, 200.0)).unwrap();
        assert_eq!(transform.displayed_width, 100.0);
        assert_eq!(transform.displayed_height, 200.0);
        assert_eq!(transform.offset_x, 50.0);
    }

    #[test]
    fn test_unmeasured_viewport() {
        let photo = PhotoInfo::new(400.0, 200.0, Orientation::Upright);
        assert!(DisplayTransform::contain(&photo, Viewport::default()).is_none());
        assert!(Layout::measure(photo, Viewport::new(0.0, 300.0)).is_none());
        assert!(Layout::measure(photo, Viewport::new(f64::NAN, 300.0)).is_none());
    }

    #[test]
    fn test_missing_photo_size_falls_back() {
        let photo = PhotoInfo::new(0.0, f64::NAN, Orientation::Upright);
        assert_eq!((photo.width, photo.height), (1.0, 1.0));
    }
}
