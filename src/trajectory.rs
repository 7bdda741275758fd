//! Bounded per-object position history.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::types::TrajectoryPoint;

/// Records position history for all tracked objects.
///
/// With `max_trajectory_length > 0`, each object's history is capped at
/// that many points, dropping the oldest on overflow. `0` means unbounded.
#[derive(Debug, Clone, Default)]
pub struct TrajectoryStore {
    max_length: usize,
    trajectories: HashMap<u64, VecDeque<TrajectoryPoint>>,
}

impl TrajectoryStore {
    /// Build a store with the given per-object history cap (`0` = unbounded).
    pub fn new(max_trajectory_length: usize) -> Self {
        Self {
            max_length: max_trajectory_length,
            trajectories: HashMap::new(),
        }
    }

    /// Append a position to this object's trajectory, creating the history
    /// on first use and dropping the oldest point if the store is bounded
    /// and already full.
    pub fn record(&mut self, object_id: u64, x: f64, y: f64, frame_number: u64, timestamp: Option<f64>) {
        let history = self.trajectories.entry(object_id).or_default();
        if self.max_length > 0 && history.len() >= self.max_length {
            history.pop_front();
        }
        history.push_back(TrajectoryPoint {
            x,
            y,
            frame_number,
            timestamp,
        });
    }

    /// Snapshot copy of an object's history in insertion order. Empty for
    /// an unknown id.
    pub fn get(&self, object_id: u64) -> Vec<TrajectoryPoint> {
        self.trajectories.get(&object_id).map(|h| h.iter().copied().collect()).unwrap_or_default()
    }

    /// Snapshot of every known history.
    pub fn get_all(&self) -> HashMap<u64, Vec<TrajectoryPoint>> {
        self.trajectories.iter().map(|(&id, h)| (id, h.iter().copied().collect())).collect()
    }

    /// Remove and return the histories of every id not in `active_ids`.
    pub fn prune_inactive(&mut self, active_ids: &HashSet<u64>) -> HashMap<u64, Vec<TrajectoryPoint>> {
        let to_remove: Vec<u64> = self
            .trajectories
            .keys()
            .copied()
            .filter(|id| !active_ids.contains(id))
            .collect();

        let mut pruned = HashMap::new();
        for id in to_remove {
            if let Some(history) = self.trajectories.remove(&id) {
                pruned.insert(id, history.into_iter().collect());
            }
        }
        pruned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_id_returns_empty() {
        let store = TrajectoryStore::new(0);
        assert!(store.get(42).is_empty());
    }

    #[test]
    fn unbounded_store_keeps_everything() {
        let mut store = TrajectoryStore::new(0);
        for i in 0..100 {
            store.record(1, i as f64, 0.0, i, None);
        }
        assert_eq!(store.get(1).len(), 100);
    }

    #[test]
    fn bounded_store_drops_oldest() {
        let mut store = TrajectoryStore::new(3);
        for i in 0..5 {
            store.record(1, i as f64, 0.0, i, None);
        }
        let history = store.get(1);
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].frame_number, 2);
        assert_eq!(history[2].frame_number, 4);
    }

    #[test]
    fn get_all_snapshots_every_id() {
        let mut store = TrajectoryStore::new(0);
        store.record(1, 0.0, 0.0, 0, None);
        store.record(2, 1.0, 1.0, 0, None);
        let all = store.get_all();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn prune_inactive_removes_and_returns_dropped_histories() {
        let mut store = TrajectoryStore::new(0);
        store.record(1, 0.0, 0.0, 0, None);
        store.record(2, 1.0, 1.0, 0, None);

        let active: HashSet<u64> = [1].into_iter().collect();
        let pruned = store.prune_inactive(&active);

        assert_eq!(pruned.len(), 1);
        assert!(pruned.contains_key(&2));
        assert!(store.get(2).is_empty());
        assert_eq!(store.get(1).len(), 1);
    }

    #[test]
    fn snapshots_are_copies_not_views() {
        let mut store = TrajectoryStore::new(0);
        store.record(1, 0.0, 0.0, 0, None);
        let mut snapshot = store.get(1);
        snapshot.push(TrajectoryPoint {
            x: 999.0,
            y: 999.0,
            frame_number: 999,
            timestamp: None,
        });
        assert_eq!(store.get(1).len(), 1);
    }
}
