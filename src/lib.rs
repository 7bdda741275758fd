// SPDX-License-Identifier: Apache-2.0

//! Lidar Tracker
//!
//! Real-time 2D LiDAR people-tracking pipeline for a single stationary
//! sensor. Consumes a stream of angular range scans and emits, per scan, a
//! set of persistent object identities with their positions, velocities,
//! spatial extents, and per-identity trajectory history.
//!
//! # Pipeline
//!
//! - **Background model** - learns the static environment from a stream of
//!   noisy polar samples and classifies incoming points as foreground.
//! - **Clustering** - grid-indexed DBSCAN groups foreground points into
//!   object-sized clusters.
//! - **Tracking** - associates clusters to persistent tracks across frames
//!   under a constant-velocity motion model with gated greedy assignment.
//! - **Trajectories** - a bounded per-identity position history.
//!
//! [`engine::Engine`] binds these stages together.
//!
//! # Example
//!
//! ```
//! use lidar_tracker::{Engine, EngineConfig};
//!
//! let mut engine = Engine::new(EngineConfig::default());
//! for scan in std::iter::repeat(vec![(0.0, 5000.0), (180.0, 5000.0)]).take(5) {
//!     let frame = engine.process_scan(scan, None);
//!     println!("frame {}: {} objects", frame.frame_number, frame.objects.len());
//! }
//! ```

#![warn(missing_docs)]

/// Online background learning and foreground classification.
pub mod background;

/// Grid-indexed DBSCAN clustering of foreground points.
pub mod clustering;

/// Orchestrates background learning, clustering, tracking, and trajectory
/// recording into a single per-scan pipeline.
pub mod engine;

/// Polar/cartesian conversion helpers.
pub mod math;

/// Greedy-gated multi-object tracking.
pub mod tracker;

/// Bounded per-object position history.
pub mod trajectory;

/// Core data types shared across the pipeline.
pub mod types;

#[cfg(test)]
mod testutil;

pub use background::BackgroundModel;
pub use clustering::cluster_points;
pub use engine::{Engine, EngineConfig};
pub use tracker::{ObjectTracker, TrackerConfig};
pub use trajectory::TrajectoryStore;
pub use types::{
    CartesianPoint, Cluster, PolarPoint, ScanPoint, TrackedObject, TrackingFrame, TrajectoryPoint,
};
