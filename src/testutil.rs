//! Synthetic scan generators shared by the unit test suites, grounded on
//! the reference implementation's pytest fixtures.

use crate::types::PolarPoint;

/// A circular room scan: every point at a uniform wall distance.
///
/// Defaulting `num_points` to the engine's 720 angular bins ensures every
/// bin gets background data.
pub fn make_room_scan(wall_distance_mm: f64, num_points: usize) -> Vec<PolarPoint> {
    let step = 360.0 / num_points as f64;
    (0..num_points).map(|i| PolarPoint::new(i as f64 * step, wall_distance_mm)).collect()
}

/// Points simulating a person at a given angle and distance.
pub fn make_person_points(angle_center_deg: f64, distance_mm: f64) -> Vec<PolarPoint> {
    let width_deg = 8.0;
    let num_points = 10;
    let start = angle_center_deg - width_deg / 2.0;
    let step = width_deg / (num_points - 1) as f64;
    (0..num_points)
        .map(|i| {
            let angle = (start + i as f64 * step).rem_euclid(360.0);
            let distance = distance_mm + (i % 3) as f64 * 10.0;
            PolarPoint::new(angle, distance)
        })
        .collect()
}

/// A room scan with one or more people spliced in.
pub fn make_scan_with_people(wall_distance_mm: f64, num_wall_points: usize, people: &[(f64, f64)]) -> Vec<PolarPoint> {
    let mut scan = make_room_scan(wall_distance_mm, num_wall_points);
    for &(angle, dist) in people {
        scan.extend(make_person_points(angle, dist));
    }
    scan
}
