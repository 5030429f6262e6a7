use super::{Layout, Orientation, ScreenRect};
use crate::model::{BoundingBox, TextFragment};

/// Re-express a box from the sensor frame in the upright frame.
///
/// `base_width` and `base_height` are the dimensions of the frame the box
/// was reported in, before rotation.
pub fn rotate_to_upright(
    bbox: BoundingBox,
    orientation: Orientation,
    base_width: f64,
    base_height: f64,
) -> BoundingBox {
    let BoundingBox {
        left,
        top,
        width,
        height,
    } = bbox;

    match orientation {
        Orientation::Upright => bbox,
        Orientation::Rotated90 => BoundingBox {
            left: top,
            top: base_width - (left + width),
            width: height,
            height: width,
        },
        Orientation::Rotated180 => BoundingBox {
            left: base_width - (left + width),
            top: base_height - (top + height),
            width,
            height,
        },
        Orientation::Rotated270 => BoundingBox {
            left: base_height - (top + height),
            top: left,
            width: height,
            height: width,
        },
    }
}

/// Place a fragment's box on screen for the given layout.
///
/// Returns `None` for fragments whose box is missing, empty or not finite.
pub fn map_to_screen(fragment: &TextFragment, layout: &Layout) -> Option<ScreenRect> {
    let bbox = fragment.bounding_box;
    if !bbox.is_usable() {
        return None;
    }

    let photo = layout.photo();
    let transform = layout.transform();
    let orientation = photo.orientation;

    let (base_width, base_height) = if bbox.is_normalized() {
        (1.0, 1.0)
    } else {
        (photo.width, photo.height)
    };
    let upright = rotate_to_upright(bbox, orientation, base_width, base_height);

    let (oriented_width, oriented_height) = if orientation.swaps_axes() {
        (base_height, base_width)
    } else {
        (base_width, base_height)
    };
    let scale_x = transform.displayed_width / oriented_width;
    let scale_y = transform.displayed_height / oriented_height;

    // Quarter turns also flip which edge reads as left and top
    let (left, top) = if orientation.swaps_axes() {
        (
            (oriented_width - (upright.left + upright.width)) * scale_x + transform.offset_x,
            (oriented_height - (upright.top + upright.height)) * scale_y + transform.offset_y,
        )
    } else {
        (
            upright.left * scale_x + transform.offset_x,
            upright.top * scale_y + transform.offset_y,
        )
    };

    let rect = ScreenRect {
        left,
        top,
        width: upright.width * scale_x,
        height: upright.height * scale_y,
        rotation_degrees: fragment.rotation_degrees(),
    };
    rect.is_finite().then_some(rect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{PhotoInfo, Viewport};

    fn layout(width: f64, height: f64, orientation: Orientation, viewport: Viewport) -> Layout {
        Layout::measure(PhotoInfo::new(width, height, orientation), viewport).unwrap()
    }

    #[test]
    fn test_rotate_180_twice_is_identity() {
        let bbox = BoundingBox::new(12.0, 40.0, 30.0, 18.0);
        let once = rotate_to_upright(bbox, Orientation::Rotated180, 400.0, 300.0);
        assert_eq!(once, BoundingBox::new(358.0, 242.0, 30.0, 18.0));
        let twice = rotate_to_upright(once, Orientation::Rotated180, 400.0, 300.0);
        assert_eq!(twice, bbox);
    }

    #[test]
    fn test_quarter_turn_remaps() {
        let bbox = BoundingBox::new(10.0, 20.0, 30.0, 5.0);
        assert_eq!(
            rotate_to_upright(bbox, Orientation::Rotated90, 100.0, 50.0),
            BoundingBox::new(20.0, 60.0, 5.0, 30.0)
        );
        assert_eq!(
            rotate_to_upright(bbox, Orientation::Rotated270, 100.0, 50.0),
            BoundingBox::new(25.0, 10.0, 5.0, 30.0)
        );
    }

    #[test]
    fn test_upright_pixel_box_scales_and_offsets() {
        // 400x200 photo in a 200x200 viewport: scale 0.5, offset_y 50
        let layout = layout(400.0, 200.0, Orientation::Upright, Viewport::new(200.0, 200.0));
        let fragment = TextFragment::new("word", BoundingBox::new(40.0, 20.0, 100.0, 30.0));
        let rect = layout.screen_rect(&fragment).unwrap();
        assert_eq!(rect.left, 20.0);
        assert_eq!(rect.top, 60.0);
        assert_eq!(rect.width, 50.0);
        assert_eq!(rect.height, 15.0);
        assert_eq!(rect.rotation_degrees, 0.0);
    }

    #[test]
    fn test_normalized_box_uses_unit_base() {
        let layout = layout(400.0, 200.0, Orientation::Upright, Viewport::new(200.0, 200.0));
        let fragment = TextFragment::new("word", BoundingBox::new(0.1, 0.2, 0.5, 0.25));
        let rect = layout.screen_rect(&fragment).unwrap();
        assert!((rect.left - 20.0).abs() < 1e-9);
        assert!((rect.top - 70.0).abs() < 1e-9);
        assert!((rect.width - 100.0).abs() < 1e-9);
        assert!((rect.height - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_180_orientation_mirrors_rect() {
        let viewport = Viewport::new(400.0, 300.0);
        let upright = layout(400.0, 300.0, Orientation::Upright, viewport);
        let flipped = layout(400.0, 300.0, Orientation::Rotated180, viewport);

        let bbox = BoundingBox::new(12.0, 40.0, 30.0, 18.0);
        let rect = upright.screen_rect(&TextFragment::new("a", bbox)).unwrap();

        // The same word as the sensor reports it in an upside-down photo
        let sensor = rotate_to_upright(bbox, Orientation::Rotated180, 400.0, 300.0);
        let mirrored = flipped.screen_rect(&TextFragment::new("a", sensor)).unwrap();

        assert_eq!(rect, mirrored);
    }

    #[test]
    fn test_quarter_turn_screen_rect() {
        // 100x50 sensor frame, shown as 50x100 in a 50x100 viewport at scale 1
        let layout = layout(100.0, 50.0, Orientation::Rotated90, Viewport::new(50.0, 100.0));
        let fragment = TextFragment::new("word", BoundingBox::new(10.0, 20.0, 30.0, 5.0));
        let rect = layout.screen_rect(&fragment).unwrap();
        // upright box (20, 60, 5, 30), then mirrored inside the 50x100 frame
        assert_eq!(rect.left, 25.0);
        assert_eq!(rect.top, 10.0);
        assert_eq!(rect.width, 5.0);
        assert_eq!(rect.height, 30.0);
    }

    #[test]
    fn test_three_quarter_turn_screen_rect() {
        let layout = layout(100.0, 50.0, Orientation::Rotated270, Viewport::new(50.0, 100.0));
        let fragment = TextFragment::new("word", BoundingBox::new(10.0, 20.0, 30.0, 5.0));
        let rect = layout.screen_rect(&fragment).unwrap();
        // upright box (25, 10, 5, 30), mirrored to the opposite corner
        assert_eq!(rect.left, 20.0);
        assert_eq!(rect.top, 60.0);
        assert_eq!(rect.width, 5.0);
        assert_eq!(rect.height, 30.0);
    }

    #[test]
    fn test_malformed_box_has_no_rect() {
        let layout = layout(400.0, 200.0, Orientation::Upright, Viewport::new(200.0, 200.0));
        let empty = TextFragment::new("ghost", BoundingBox::new(10.0, 10.0, 0.0, 0.0));
        assert!(layout.screen_rect(&empty).is_none());
    }

    #[test]
    fn test_rotation_carried_through() {
        let layout = layout(400.0, 200.0, Orientation::Upright, Viewport::new(400.0, 200.0));
        let corners = [
            crate::model::Point::new(0.0, 0.0),
            crate::model::Point::new(100.0, 10.0),
            crate::model::Point::new(98.0, 30.0),
            crate::model::Point::new(-2.0, 20.0),
        ];
        let fragment = TextFragment::with_corners("tilted", BoundingBox::new(0.0, 0.0, 100.0, 30.0), corners);
        let rect = layout.screen_rect(&fragment).unwrap();
        assert_eq!(rect.rotation_degrees, fragment.rotation_degrees());
        assert!(rect.rotation_degrees > 5.0);
    }
}
