//! Read-only view of catalogue contents.
//!
//! Statistics, the routing graph builder and the map renderer only ever read
//! the catalogue; they take `&impl Catalogue` so that alternative stores can
//! be plugged in.

use crate::identifiers::*;
use crate::models::types::*;

pub trait Catalogue: Send + Sync {
    // ---- Lookups ----
    fn stop(&self, id: StopId) -> &Stop;
    fn bus(&self, id: BusId) -> &Bus;
    fn stop_id(&self, name: &str) -> Option<StopId>;
    fn bus_id(&self, name: &str) -> Option<BusId>;

    fn stop_by_name(&self, name: &str) -> Option<&Stop> {
        self.stop_id(name).map(|id| self.stop(id))
    }

    fn bus_by_name(&self, name: &str) -> Option<&Bus> {
        self.bus_id(name).map(|id| self.bus(id))
    }

    // ---- Collections ----
    fn stop_count(&self) -> usize;

    /// All buses in ascending name order
    fn buses(&self) -> Vec<&Bus>;

    // ---- Distances ----

    /// Road distance in meters: explicit override, else great-circle distance
    fn distance(&self, from: StopId, to: StopId) -> f64;

    /// Great-circle distance in meters, ignoring overrides
    fn geo_distance(&self, from: StopId, to: StopId) -> f64 {
        crate::spatial::great_circle_distance(
            self.stop(from).coordinates,
            self.stop(to).coordinates,
        )
    }

    /// Stamp of the current contents, renewed by every successful mutation.
    ///
    /// Two catalogues report the same value only if they hold the same data,
    /// so derived data keyed on it can be reused across instances.
    fn generation(&self) -> u64;
}
