//! The orchestrator binding background learning, clustering, tracking, and
//! trajectory recording into a single per-scan pipeline.

use std::collections::HashMap;

use log::debug;

use crate::background::BackgroundModel;
use crate::clustering::cluster_points;
use crate::math::polar_points_to_cartesian;
use crate::tracker::{ObjectTracker, TrackerConfig};
use crate::trajectory::TrajectoryStore;
use crate::types::{PolarPoint, ScanPoint, TrackingFrame, TrajectoryPoint};

/// All tunables for an [`Engine`], mirroring the defaults from the
/// pipeline's component specs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Angular resolution of the background model.
    pub angle_bins: usize,
    /// EMA learning rate for background updates.
    pub background_learning_rate: f64,
    /// Minimum distance delta (closer than background) to flag foreground.
    pub foreground_threshold_mm: f64,
    /// Frames of observation required before the background is ready.
    pub min_learning_frames: u32,
    /// DBSCAN epsilon (also the grid cell size).
    pub cluster_eps_mm: f64,
    /// DBSCAN core-point threshold.
    pub cluster_min_samples: usize,
    /// Upper bound on emitted cluster radius.
    pub max_cluster_radius_mm: f64,
    /// Tracker gating distance.
    pub max_match_distance_mm: f64,
    /// Frames a track may go unmatched before retirement.
    pub max_missing_frames: u32,
    /// Matches required for a track to become confirmed.
    pub min_confirm_frames: u32,
    /// Per-object trajectory cap (`0` = unbounded).
    pub max_trajectory_length: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            angle_bins: 720,
            background_learning_rate: 0.02,
            foreground_threshold_mm: 150.0,
            min_learning_frames: 30,
            cluster_eps_mm: 200.0,
            cluster_min_samples: 3,
            max_cluster_radius_mm: 500.0,
            max_match_distance_mm: 800.0,
            max_missing_frames: 10,
            min_confirm_frames: 2,
            max_trajectory_length: 0,
        }
    }
}

/// Owns one [`BackgroundModel`], one clustering configuration, one
/// [`ObjectTracker`], one [`TrajectoryStore`], and a monotonically
/// increasing frame counter.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    background: BackgroundModel,
    tracker: ObjectTracker,
    trajectories: TrajectoryStore,
    frame_count: u64,
}

impl Engine {
    /// Build an engine from a configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            background: BackgroundModel::new(
                config.angle_bins,
                config.background_learning_rate,
                config.foreground_threshold_mm,
                config.min_learning_frames,
            ),
            tracker: ObjectTracker::new(TrackerConfig {
                max_match_distance_mm: config.max_match_distance_mm,
                max_missing_frames: config.max_missing_frames,
                min_confirm_frames: config.min_confirm_frames,
            }),
            trajectories: TrajectoryStore::new(config.max_trajectory_length),
            frame_count: 0,
            config,
        }
    }

    /// Process a single scan end to end and return the resulting frame.
    ///
    /// Points are normalized to [`PolarPoint`] (accepting either
    /// [`PolarPoint`] or raw `(angle_deg, distance_mm)` pairs via
    /// [`ScanPoint`]); points with `distance_mm <= 0.0` are dropped before
    /// entering the pipeline.
    pub fn process_scan<P: Into<ScanPoint>>(
        &mut self,
        points: impl IntoIterator<Item = P>,
        timestamp: Option<f64>,
    ) -> TrackingFrame {
        let polar: Vec<PolarPoint> = points
            .into_iter()
            .map(|p| p.into().into_polar())
            .filter(|p| p.distance_mm > 0.0)
            .collect();

        self.background.update(&polar);
        let foreground = self.background.classify(&polar);
        let cartesian = polar_points_to_cartesian(&foreground);
        let clusters = cluster_points(
            &cartesian,
            self.config.cluster_eps_mm,
            self.config.cluster_min_samples,
            self.config.max_cluster_radius_mm,
        );
        let tracked = self.tracker.update(&clusters);

        for obj in &tracked {
            self.trajectories.record(obj.object_id, obj.centroid.x, obj.centroid.y, self.frame_count, timestamp);
        }

        let frame = TrackingFrame {
            frame_number: self.frame_count,
            objects: tracked,
            timestamp,
        };
        debug!("frame {}: {} objects", frame.frame_number, frame.objects.len());
        self.frame_count += 1;
        frame
    }

    /// True once the background model has learned the static scene.
    pub fn background_ready(&self) -> bool {
        self.background.is_ready()
    }

    /// Number of `process_scan` calls so far (since construction or the
    /// last [`Engine::reset`]).
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Position history for a specific tracked object. Empty for an
    /// unknown id.
    pub fn get_trajectory(&self, object_id: u64) -> Vec<TrajectoryPoint> {
        self.trajectories.get(object_id)
    }

    /// All trajectory histories.
    pub fn get_all_trajectories(&self) -> HashMap<u64, Vec<TrajectoryPoint>> {
        self.trajectories.get_all()
    }

    /// Clear the background model only; tracker and trajectory state are
    /// untouched.
    pub fn reset_background(&mut self) {
        self.background.reset();
    }

    /// Full reset: clear the background, replace the tracker with a fresh
    /// one (new id space starting at 1) and the trajectory store with a
    /// fresh one, and zero the frame counter.
    pub fn reset(&mut self) {
        self.background.reset();
        self.tracker = ObjectTracker::new(TrackerConfig {
            max_match_distance_mm: self.config.max_match_distance_mm,
            max_missing_frames: self.config.max_missing_frames,
            min_confirm_frames: self.config.min_confirm_frames,
        });
        self.trajectories = TrajectoryStore::new(self.config.max_trajectory_length);
        self.frame_count = 0;
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
