//! Online background learning and foreground classification.

use log::debug;

use crate::types::PolarPoint;

/// Learns the static scene and classifies points as foreground/background.
///
/// Uses an exponential moving average (EMA) per angular bin to learn the
/// typical distance at each angle. Points significantly closer than the
/// learned background are classified as foreground (moving objects).
#[derive(Debug, Clone)]
pub struct BackgroundModel {
    num_bins: usize,
    learning_rate: f64,
    threshold_mm: f64,
    min_frames: u32,
    bin_width: f64,
    background: Vec<f64>,
    bin_counts: Vec<u32>,
    frame_count: u32,
}

impl Default for BackgroundModel {
    fn default() -> Self {
        Self::new(720, 0.02, 150.0, 30)
    }
}

impl BackgroundModel {
    /// Build a background model.
    ///
    /// `angle_bins` must be non-zero; `learning_rate` should lie in
    /// `(0, 1]`. The spec leaves validation of these to the caller.
    pub fn new(angle_bins: usize, learning_rate: f64, foreground_threshold_mm: f64, min_learning_frames: u32) -> Self {
        Self {
            num_bins: angle_bins,
            learning_rate,
            threshold_mm: foreground_threshold_mm,
            min_frames: min_learning_frames,
            bin_width: 360.0 / angle_bins as f64,
            background: vec![f64::INFINITY; angle_bins],
            bin_counts: vec![0; angle_bins],
            frame_count: 0,
        }
    }

    fn angle_to_bin(&self, angle_deg: f64) -> usize {
        ((angle_deg / self.bin_width) as i64).rem_euclid(self.num_bins as i64) as usize
    }

    /// Fold a scan into the per-bin EMA.
    pub fn update(&mut self, points: &[PolarPoint]) {
        for p in points {
            let b = self.angle_to_bin(p.angle_deg);
            if self.bin_counts[b] == 0 {
                self.background[b] = p.distance_mm;
            } else if p.distance_mm >= self.background[b] - self.threshold_mm {
                // Only let the background drift toward points at or beyond its current
                // estimate; a closer reading is a foreground intrusion, not drift.
                self.background[b] += self.learning_rate * (p.distance_mm - self.background[b]);
            }
            self.bin_counts[b] += 1;
        }
        self.frame_count += 1;
        if self.frame_count == self.min_frames {
            debug!("background model ready after {} frames", self.frame_count);
        }
    }

    /// Return only the points classified as foreground (closer than the
    /// learned background by more than the threshold). Empty before
    /// [`BackgroundModel::is_ready`].
    pub fn classify(&self, points: &[PolarPoint]) -> Vec<PolarPoint> {
        if !self.is_ready() {
            return Vec::new();
        }
        points
            .iter()
            .copied()
            .filter(|p| {
                let b = self.angle_to_bin(p.angle_deg);
                let bg = self.background[b];
                bg.is_finite() && bg - p.distance_mm > self.threshold_mm
            })
            .collect()
    }

    /// True once enough frames have been observed to trust the model.
    pub fn is_ready(&self) -> bool {
        self.frame_count >= self.min_frames
    }

    /// Clear all learned state.
    pub fn reset(&mut self) {
        self.background.fill(f64::INFINITY);
        self.bin_counts.fill(0);
        self.frame_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::make_room_scan;

    #[test]
    fn not_ready_before_min_frames() {
        let mut model = BackgroundModel::new(720, 0.02, 150.0, 10);
        let scan = make_room_scan(5000.0, 720);
        for _ in 0..9 {
            model.update(&scan);
        }
        assert!(!model.is_ready());
        model.update(&scan);
        assert!(model.is_ready());
    }

    #[test]
    fn empty_foreground_for_static_room() {
        let mut model = BackgroundModel::new(720, 0.02, 150.0, 5);
        let scan = make_room_scan(4000.0, 720);
        for _ in 0..10 {
            model.update(&scan);
        }
        assert!(model.classify(&scan).is_empty());
    }

    #[test]
    fn detects_person_as_foreground() {
        let mut model = BackgroundModel::new(720, 0.02, 150.0, 5);
        let room = make_room_scan(5000.0, 720);
        for _ in 0..10 {
            model.update(&room);
        }
        let with_person = crate::testutil::make_scan_with_people(5000.0, 720, &[(90.0, 2000.0)]);
        model.update(&with_person);
        let fg = model.classify(&with_person);
        assert!(fg.len() > 0);
        for p in &fg {
            assert!(p.distance_mm < 5000.0 - 150.0);
        }
    }

    #[test]
    fn reset_clears_model() {
        let mut model = BackgroundModel::new(720, 0.02, 150.0, 5);
        let scan = make_room_scan(5000.0, 720);
        for _ in 0..10 {
            model.update(&scan);
        }
        assert!(model.is_ready());
        model.reset();
        assert!(!model.is_ready());
    }

    #[test]
    fn returns_empty_when_not_ready() {
        let mut model = BackgroundModel::new(720, 0.02, 150.0, 10);
        let scan = crate::testutil::make_scan_with_people(5000.0, 720, &[(90.0, 2000.0)]);
        for _ in 0..5 {
            model.update(&scan);
        }
        assert!(model.classify(&scan).is_empty());
    }

    #[test]
    fn raising_threshold_never_increases_foreground() {
        let room = make_room_scan(5000.0, 720);
        let with_person = crate::testutil::make_scan_with_people(5000.0, 720, &[(90.0, 2000.0)]);

        let mut low = BackgroundModel::new(720, 0.02, 50.0, 5);
        let mut high = BackgroundModel::new(720, 0.02, 500.0, 5);
        for _ in 0..10 {
            low.update(&room);
            high.update(&room);
        }
        let fg_low = low.classify(&with_person);
        let fg_high = high.classify(&with_person);
        assert!(fg_high.len() <= fg_low.len());
    }
}
