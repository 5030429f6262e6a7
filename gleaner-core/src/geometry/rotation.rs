use crate::model::Point;

/// Baseline angles strictly inside this band are recognizer artifacts on
/// vertical edges and are read as horizontal text.
const VERTICAL_BAND: (f64, f64) = (85.0, 95.0);

/// Estimate the text tilt, in degrees, from a fragment's four corners.
///
/// The edge with the smallest vertical delta is taken as the baseline; its
/// angle is normalized into (-180, 180].
pub fn estimate_rotation(corners: &[Point; 4]) -> f64 {
    let mut best_dy = f64::INFINITY;
    let mut best_angle = 0.0;

    for i in 0..corners.len() {
        let from = corners[i];
        let to = corners[(i + 1) % corners.len()];
        let dx = to.x - from.x;
        let dy = to.y - from.y;

        if dy.abs() < best_dy {
            best_dy = dy.abs();
            best_angle = normalize_degrees(dy.atan2(dx).to_degrees());
        }
    }

    let magnitude = best_angle.abs();
    if magnitude > VERTICAL_BAND.0 && magnitude < VERTICAL_BAND.1 {
        0.0
    } else {
        best_angle
    }
}

fn normalize_degrees(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let mut angle = angle % 360.0;
    if angle > 180.0 {
        angle -= 360.0;
    } else if angle <= -180.0 {
        angle += 360.0;
    }
    angle
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad(points: [(f64, f64); 4]) -> [Point; 4] {
        points.map(|(x, y)| Point::new(x, y))
    }

    #[test]
    fn test_horizontal_quad_is_zero() {
        let corners = quad([(10.0, 10.0), (90.0, 10.0), (90.0, 30.0), (10.0, 30.0)]);
        assert_eq!(estimate_rotation(&corners), 0.0);
    }

    #[test]
    fn test_tilted_quad() {
        let corners = quad([(0.0, 0.0), (100.0, 10.0), (98.0, 30.0), (-2.0, 20.0)]);
        let expected = 0.1f64.atan().to_degrees();
        assert!((estimate_rotation(&corners) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_near_vertical_snaps_to_zero() {
        // Every edge is steep; the flattest one sits at about 87 degrees
        let corners = quad([(0.0, 0.0), (0.5, 10.0), (0.0, 20.0), (-0.5, 10.0)]);
        assert_eq!(estimate_rotation(&corners), 0.0);

        let corners = quad([(0.0, 0.0), (-0.5, -10.0), (0.0, -20.0), (0.5, -10.0)]);
        assert_eq!(estimate_rotation(&corners), 0.0);
    }

    #[test]
    fn test_upside_down_baseline() {
        // Winding starts on the bottom-right corner
        let corners = quad([(90.0, 30.0), (10.0, 30.0), (10.0, 10.0), (90.0, 10.0)]);
        assert_eq!(estimate_rotation(&corners), 180.0);
    }

    #[test]
    fn test_degenerate_quad() {
        let corners = quad([(5.0, 5.0); 4]);
        assert_eq!(estimate_rotation(&corners), 0.0);

        let corners = quad([(f64::NAN, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        assert!(estimate_rotation(&corners).is_finite());
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(-180.0), 180.0);
        assert_eq!(normalize_degrees(270.0), -90.0);
        assert_eq!(normalize_degrees(45.0), 45.0);
        assert_eq!(normalize_degrees(f64::INFINITY), 0.0);
    }
}
