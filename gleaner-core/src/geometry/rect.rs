use serde::Serialize;

use super::unrotate;
use crate::model::Point;

/// A fragment's box in screen pixels for the current layout, with its visual tilt
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub rotation_degrees: f64,
}

impl ScreenRect {
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn is_rotated(&self) -> bool {
        self.rotation_degrees != 0.0
    }

    pub fn is_finite(&self) -> bool {
        [self.left, self.top, self.width, self.height, self.rotation_degrees]
            .iter()
            .all(|v| v.is_finite())
    }

    /// Hit-test a point against the rect grown by `padding` on every side.
    ///
    /// Rotated rects are tested in their own frame: the point is moved to the
    /// rect center and turned back by the rect's rotation.
    pub fn contains(&self, point: Point, padding: f64) -> bool {
        if !self.is_rotated() {
            return point.x >= self.left - padding
                && point.x <= self.left + self.width + padding
                && point.y >= self.top - padding
                && point.y <= self.top + self.height + padding;
        }

        let center = self.center();
        let (local_x, local_y) = unrotate(point.x - center.x, point.y - center.y, self.rotation_degrees);
        let half_width = self.width / 2.0;
        let half_height = self.height / 2.0;

        local_x >= -half_width - padding
            && local_x <= half_width + padding
            && local_y >= -half_height - padding
            && local_y <= half_height + padding
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(left: f64, top: f64, width: f64, height: f64, rotation_degrees: f64) -> ScreenRect {
        ScreenRect {
            left,
            top,
            width,
            height,
            rotation_degrees,
        }
    }

    #[test]
    fn test_padded_containment() {
        let r = rect(10.0, 10.0, 20.0, 10.0, 0.0);
        assert!(r.contains(Point::new(9.0, 15.0), 1.0));
        assert!(!r.contains(Point::new(0.0, 15.0), 1.0));
        assert!(!r.contains(Point::new(9.0, 15.0), 0.0));
        assert!(r.contains(Point::new(31.0, 21.0), 1.0));
    }

    #[test]
    fn test_rotated_containment() {
        // 40x10 bar centered on (50, 50), turned to stand upright
        let r = rect(30.0, 45.0, 40.0, 10.0, 90.0);
        assert!(r.contains(Point::new(50.0, 65.0), 1.0));
        assert!(!r.contains(Point::new(65.0, 50.0), 1.0));
        assert!(r.contains(Point::new(50.0, 50.0), 0.0));
    }

    #[test]
    fn test_slight_tilt_matches_axis_test_near_center() {
        let r = rect(10.0, 10.0, 60.0, 20.0, 5.0);
        assert!(r.contains(r.center(), 0.0));
        assert!(!r.contains(Point::new(r.center().x, r.top - 10.0), 1.0));
    }

    #[test]
    fn test_center() {
        assert_eq!(rect(10.0, 20.0, 30.0, 40.0, 0.0).center(), Point::new(25.0, 40.0));
    }
}
