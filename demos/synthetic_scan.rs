// SPDX-License-Identifier: Apache-2.0

//! Synthetic Scan Demo
//!
//! Drives the tracking pipeline against an entirely in-memory synthetic
//! scan stream (a circular room plus a few wandering "people") and logs
//! the resulting frames. There is no hardware or network I/O here — it
//! exists to exercise [`lidar_tracker::Engine`] without a real sensor.

use clap::Parser;
use lidar_tracker::{Engine, EngineConfig};
use log::info;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Synthetic lidar scan demo", long_about = None)]
struct Args {
    /// Number of scans to feed the engine.
    #[arg(long, env, default_value = "200")]
    frames: u32,

    /// Wall distance of the synthetic room, in millimeters.
    #[arg(long, env, default_value = "5000.0")]
    wall_distance_mm: f64,

    /// Number of angular samples per synthetic scan.
    #[arg(long, env, default_value = "720")]
    samples_per_scan: usize,

    /// Starting angle (degrees) of the synthetic walker.
    #[arg(long, env, default_value = "90.0")]
    walker_start_deg: f64,

    /// Angular speed (degrees per frame) of the synthetic walker.
    #[arg(long, env, default_value = "2.0")]
    walker_speed_deg: f64,

    /// Distance (mm) of the synthetic walker from the sensor.
    #[arg(long, env, default_value = "2000.0")]
    walker_distance_mm: f64,
}

fn room_scan(wall_distance_mm: f64, samples: usize) -> Vec<(f64, f64)> {
    let step = 360.0 / samples as f64;
    (0..samples).map(|i| (i as f64 * step, wall_distance_mm)).collect()
}

fn walker_points(angle_center_deg: f64, distance_mm: f64) -> impl Iterator<Item = (f64, f64)> {
    let width_deg = 8.0;
    let num_points = 10;
    let start = angle_center_deg - width_deg / 2.0;
    let step = width_deg / (num_points - 1) as f64;
    (0..num_points).map(move |i| ((start + i as f64 * step).rem_euclid(360.0), distance_mm + (i % 3) as f64 * 10.0))
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut engine = Engine::new(EngineConfig::default());
    let mut walker_angle = args.walker_start_deg;

    for frame_idx in 0..args.frames {
        let mut scan = room_scan(args.wall_distance_mm, args.samples_per_scan);
        scan.extend(walker_points(walker_angle, args.walker_distance_mm));
        walker_angle = (walker_angle + args.walker_speed_deg).rem_euclid(360.0);

        let frame = engine.process_scan(scan, Some(frame_idx as f64));
        if !frame.objects.is_empty() {
            for obj in &frame.objects {
                info!(
                    "frame {}: object {} at ({:.1}, {:.1}) vel ({:.1}, {:.1})",
                    frame.frame_number, obj.object_id, obj.centroid.x, obj.centroid.y, obj.velocity.x, obj.velocity.y
                );
            }
        }
    }

    info!("processed {} frames, background_ready={}", engine.frame_count(), engine.background_ready());
}
