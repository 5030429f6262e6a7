//! Geometry shared by hit-testing, rendering and reading order

mod display;
mod mapper;
mod rect;
mod rotation;

pub use display::{DisplayTransform, Layout, Orientation, PhotoInfo, Viewport};
pub use mapper::{map_to_screen, rotate_to_upright};
pub use rect::ScreenRect;
pub use rotation::estimate_rotation;

use crate::model::Point;

/// Express an offset in a frame turned by `degrees`
pub(crate) fn unrotate(dx: f64, dy: f64, degrees: f64) -> (f64, f64) {
    let (sin, cos) = degrees.to_radians().sin_cos();
    (dx * cos + dy * sin, -dx * sin + dy * cos)
}

/// Turn `point` around `pivot` by `-degrees`
pub(crate) fn unrotate_about(point: Point, pivot: Point, degrees: f64) -> Point {
    let (x, y) = unrotate(point.x - pivot.x, point.y - pivot.y, degrees);
    Point::new(pivot.x + x, pivot.y + y)
}
