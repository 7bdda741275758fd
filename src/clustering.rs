//! Grid-indexed DBSCAN over cartesian foreground points.

use std::collections::HashMap;

use crate::types::{CartesianPoint, Cluster};

const UNVISITED: i64 = -1;

/// Group nearby cartesian points into clusters using a grid-indexed DBSCAN.
///
/// Points that don't reach the density threshold are discarded as noise.
/// Clusters whose bounding radius exceeds `max_cluster_radius_mm` are also
/// discarded (too big to be a single person-sized object).
pub fn cluster_points(
    points: &[CartesianPoint],
    eps_mm: f64,
    min_samples: usize,
    max_cluster_radius_mm: f64,
) -> Vec<Cluster> {
    if points.len() < min_samples {
        return Vec::new();
    }

    let labels = grid_dbscan(points, eps_mm, min_samples);
    let num_clusters = labels.iter().filter(|&&l| l >= 0).max().map_or(0, |&m| m as usize + 1);

    let mut members: Vec<Vec<usize>> = vec![Vec::new(); num_clusters];
    for (i, &label) in labels.iter().enumerate() {
        if label >= 0 {
            members[label as usize].push(i);
        }
    }

    let mut clusters = Vec::new();
    for member_indices in members {
        if member_indices.is_empty() {
            continue;
        }
        let n = member_indices.len() as f64;
        let (sum_x, sum_y) = member_indices
            .iter()
            .fold((0.0, 0.0), |(sx, sy), &i| (sx + points[i].x, sy + points[i].y));
        let centroid = CartesianPoint::new(sum_x / n, sum_y / n);

        let bounding_radius_mm = member_indices
            .iter()
            .map(|&i| points[i].distance_to(&centroid))
            .fold(0.0_f64, f64::max);

        if bounding_radius_mm > max_cluster_radius_mm {
            continue;
        }

        let cluster_points: Vec<CartesianPoint> = member_indices.iter().map(|&i| points[i]).collect();
        clusters.push(Cluster {
            centroid,
            points: cluster_points,
            bounding_radius_mm,
        });
    }

    clusters
}

/// Cell size equals `eps`, so a 3x3 neighborhood of cells always covers the
/// full eps-radius search.
fn grid_dbscan(points: &[CartesianPoint], eps: f64, min_samples: usize) -> Vec<i64> {
    let n = points.len();
    let cell_size = eps;
    let eps_sq = eps * eps;

    let mut cells: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
    for (i, p) in points.iter().enumerate() {
        cells.entry(cell_of(p, cell_size)).or_default().push(i);
    }

    let mut labels = vec![UNVISITED; n];
    let mut next_cluster_id: i64 = 0;

    for i in 0..n {
        if labels[i] != UNVISITED {
            continue;
        }

        let neighbors = range_query(points, i, &cells, cell_size, eps_sq);
        if neighbors.len() < min_samples {
            // Left unlabeled (noise); may still be absorbed later if it falls
            // within another point's expansion.
            continue;
        }

        labels[i] = next_cluster_id;
        let mut seeds = neighbors;
        let mut j = 0;
        while j < seeds.len() {
            let q = seeds[j];
            j += 1;

            if labels[q] != UNVISITED {
                continue;
            }
            labels[q] = next_cluster_id;

            let q_neighbors = range_query(points, q, &cells, cell_size, eps_sq);
            if q_neighbors.len() >= min_samples {
                seeds.extend(q_neighbors);
            }
        }

        next_cluster_id += 1;
    }

    labels
}

fn cell_of(p: &CartesianPoint, cell_size: f64) -> (i64, i64) {
    ((p.x / cell_size).floor() as i64, (p.y / cell_size).floor() as i64)
}

fn range_query(
    points: &[CartesianPoint],
    idx: usize,
    cells: &HashMap<(i64, i64), Vec<usize>>,
    cell_size: f64,
    eps_sq: f64,
) -> Vec<usize> {
    let p = points[idx];
    let (cx, cy) = cell_of(&p, cell_size);

    let mut neighbors = Vec::new();
    for dx in -1..=1 {
        for dy in -1..=1 {
            if let Some(indices) = cells.get(&(cx + dx, cy + dy)) {
                for &j in indices {
                    let d = points[j];
                    let dist_sq = (d.x - p.x).powi(2) + (d.y - p.y).powi(2);
                    if dist_sq <= eps_sq {
                        neighbors.push(j);
                    }
                }
            }
        }
    }
    neighbors
}
