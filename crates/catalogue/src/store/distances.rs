//! Directional road-distance overrides.

use std::collections::HashMap;

use crate::identifiers::StopId;

/// Road distances in meters keyed by `(from, to)`.
///
/// Setting `from -> to` also fills `to -> from` unless that direction already
/// has its own value. An explicit reverse value is never overwritten.
#[derive(Clone, Debug, Default)]
pub struct DistanceTable {
    meters: HashMap<(StopId, StopId), f64>,
}

impl DistanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, from: StopId, to: StopId, meters: f64) {
        self.meters.insert((from, to), meters);
        self.meters.entry((to, from)).or_insert(meters);
    }

    pub fn get(&self, from: StopId, to: StopId) -> Option<f64> {
        self.meters.get(&(from, to)).copied()
    }

    pub fn len(&self) -> usize {
        self.meters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meters.is_empty()
    }
}
