//! Polar/cartesian conversion helpers.

use crate::types::{CartesianPoint, PolarPoint};

/// Convert a single polar point to `(x, y)` millimeters, sensor at the
/// origin.
pub fn polar_to_cartesian(angle_deg: f64, distance_mm: f64) -> (f64, f64) {
    let rad = angle_deg.to_radians();
    (distance_mm * rad.cos(), distance_mm * rad.sin())
}

/// Convert a batch of polar points to cartesian points.
pub fn polar_points_to_cartesian(points: &[PolarPoint]) -> Vec<CartesianPoint> {
    points
        .iter()
        .map(|p| {
            let (x, y) = polar_to_cartesian(p.angle_deg, p.distance_mm);
            CartesianPoint::new(x, y)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_degrees_is_positive_x() {
        let (x, y) = polar_to_cartesian(0.0, 1000.0);
        assert!((x - 1000.0).abs() < 1e-9);
        assert!(y.abs() < 1e-9);
    }

    #[test]
    fn ninety_degrees_is_positive_y() {
        let (x, y) = polar_to_cartesian(90.0, 1000.0);
        assert!(x.abs() < 1e-6);
        assert!((y - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn batch_matches_scalar() {
        let points = vec![
            PolarPoint::new(0.0, 1000.0),
            PolarPoint::new(180.0, 500.0),
        ];
        let cart = polar_points_to_cartesian(&points);
        assert_eq!(cart.len(), 2);
        assert!((cart[0].x - 1000.0).abs() < 1e-6);
        assert!((cart[1].x + 500.0).abs() < 1e-3);
    }
}
