//! Greedy-gated multi-object tracking with a constant-velocity motion model.

use log::debug;

use crate::types::{CartesianPoint, Cluster, TrackedObject};

/// Tunables for [`ObjectTracker`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerConfig {
    /// Gate: a track can only match a cluster within this predicted distance.
    pub max_match_distance_mm: f64,
    /// A track is retired once `missing_frames` exceeds this.
    pub max_missing_frames: u32,
    /// Matches required before a track becomes `confirmed` (and thus visible).
    pub min_confirm_frames: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_match_distance_mm: 800.0,
            max_missing_frames: 10,
            min_confirm_frames: 2,
        }
    }
}

/// Internal per-identity state. Owned exclusively by [`ObjectTracker`].
#[derive(Debug, Clone)]
struct Track {
    track_id: u64,
    centroid: CartesianPoint,
    velocity: CartesianPoint,
    bounding_radius_mm: f64,
    points: Vec<CartesianPoint>,
    age: u32,
    missing_frames: u32,
    confirmed: bool,
}

/// Assigns persistent identities to clusters across frames.
#[derive(Debug, Clone)]
pub struct ObjectTracker {
    config: TrackerConfig,
    next_id: u64,
    tracks: Vec<Track>,
}

impl Default for ObjectTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

impl ObjectTracker {
    /// Build a tracker with the given configuration. `next_id` starts at 1.
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            next_id: 1,
            tracks: Vec::new(),
        }
    }

    /// Predict each track one step, greedily match predictions to clusters
    /// under the distance gate, update matched tracks, age unmatched ones,
    /// spawn tracks for unmatched clusters, retire over-aged tracks, and
    /// return the confirmed, currently visible tracks.
    pub fn update(&mut self, clusters: &[Cluster]) -> Vec<TrackedObject> {
        let predicted: Vec<CartesianPoint> = self
            .tracks
            .iter()
            .map(|t| CartesianPoint::new(t.centroid.x + t.velocity.x, t.centroid.y + t.velocity.y))
            .collect();

        let (matches, unmatched_tracks, unmatched_clusters) = self.assign(&predicted, clusters);

        for (track_idx, cluster_idx) in matches {
            let c = &clusters[cluster_idx];
            let t = &mut self.tracks[track_idx];
            t.velocity = CartesianPoint::new(c.centroid.x - t.centroid.x, c.centroid.y - t.centroid.y);
            t.centroid = c.centroid;
            t.bounding_radius_mm = c.bounding_radius_mm;
            t.points = c.points.clone();
            t.age += 1;
            t.missing_frames = 0;
            if t.age >= self.config.min_confirm_frames {
                t.confirmed = true;
            }
        }

        for track_idx in unmatched_tracks {
            self.tracks[track_idx].missing_frames += 1;
            self.tracks[track_idx].age += 1;
        }

        for cluster_idx in unmatched_clusters {
            let c = &clusters[cluster_idx];
            let track_id = self.next_id;
            self.next_id += 1;
            self.tracks.push(Track {
                track_id,
                centroid: c.centroid,
                velocity: CartesianPoint::default(),
                bounding_radius_mm: c.bounding_radius_mm,
                points: c.points.clone(),
                age: 1,
                missing_frames: 0,
                confirmed: self.config.min_confirm_frames <= 1,
            });
            debug!("spawned track {track_id}");
        }

        let max_missing = self.config.max_missing_frames;
        self.tracks.retain(|t| {
            let keep = t.missing_frames <= max_missing;
            if !keep {
                debug!("retired track {}", t.track_id);
            }
            keep
        });

        self.tracks
            .iter()
            .filter(|t| t.confirmed && t.missing_frames == 0)
            .map(|t| TrackedObject {
                object_id: t.track_id,
                centroid: t.centroid,
                velocity: t.velocity,
                bounding_radius_mm: t.bounding_radius_mm,
                age: t.age,
                points: t.points.clone(),
            })
            .collect()
    }

    /// Greedy nearest-neighbor assignment with gating. Returns
    /// `(track_idx, cluster_idx)` matches plus the indices left unmatched on
    /// each side. Ties break on ascending `(cost, track_idx, cluster_idx)`.
    fn assign(
        &self,
        predicted: &[CartesianPoint],
        clusters: &[Cluster],
    ) -> (Vec<(usize, usize)>, Vec<usize>, Vec<usize>) {
        let num_tracks = predicted.len();
        let num_clusters = clusters.len();

        if num_tracks == 0 {
            return (Vec::new(), Vec::new(), (0..num_clusters).collect());
        }
        if num_clusters == 0 {
            return (Vec::new(), (0..num_tracks).collect(), Vec::new());
        }

        let gate = self.config.max_match_distance_mm;
        let mut pairs: Vec<(f64, usize, usize)> = Vec::new();
        for (t, pred) in predicted.iter().enumerate() {
            for (c, cluster) in clusters.iter().enumerate() {
                let d = pred.distance_to(&cluster.centroid);
                if d <= gate {
                    pairs.push((d, t, c));
                }
            }
        }
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)).then(a.2.cmp(&b.2)));

        let mut used_tracks = vec![false; num_tracks];
        let mut used_clusters = vec![false; num_clusters];
        let mut matches = Vec::new();
        for (_, t, c) in pairs {
            if !used_tracks[t] && !used_clusters[c] {
                matches.push((t, c));
                used_tracks[t] = true;
                used_clusters[c] = true;
            }
        }

        let unmatched_tracks: Vec<usize> = (0..num_tracks).filter(|&t| !used_tracks[t]).collect();
        let unmatched_clusters: Vec<usize> = (0..num_clusters).filter(|&c| !used_clusters[c]).collect();
        (matches, unmatched_tracks, unmatched_clusters)
    }
}
