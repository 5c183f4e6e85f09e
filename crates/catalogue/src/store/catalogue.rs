//! In-memory entity store.
//!
//! Stops and buses live in append-only arenas and are addressed by
//! `StopId`/`BusId`. Name lookup maps, the stop -> buses index and the
//! distance table all hold indices or names, never references.

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::trace;

use crate::identifiers::*;
use crate::models::{traits::*, types::*};
use crate::spatial::great_circle_distance;
use crate::stats;
use crate::store::distances::DistanceTable;

// Shared by every catalogue so that no two diverging states carry the same
// generation, even across clones.
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

#[derive(Clone, Debug, Default)]
pub struct TransportCatalogue {
    // Arenas
    stops: Vec<Stop>,
    buses: Vec<Bus>,

    // Lookup maps
    stop_index: HashMap<StopName, StopId>,
    bus_index: HashMap<BusName, BusId>,

    // Derived
    buses_by_stop: HashMap<StopId, BTreeSet<BusName>>,
    distances: DistanceTable,

    generation: u64,
}

impl TransportCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    pub fn add_stop(&mut self, name: impl Into<StopName>, coordinates: Coordinates) -> Result<StopId> {
        let name = name.into();
        if name.is_empty() {
            return Err(CatalogueError::EmptyName(EntityKind::Stop));
        }
        if self.stop_index.contains_key(&name) {
            return Err(CatalogueError::DuplicateEntity {
                kind: EntityKind::Stop,
                name: name.to_string(),
            });
        }

        let id = StopId(self.stops.len() as u32);
        trace!(stop = %name, ?coordinates, "adding stop");
        self.stop_index.insert(name.clone(), id);
        self.stops.push(Stop { name, coordinates });
        self.generation = next_generation();
        Ok(id)
    }

    /// Registers a bus over existing stops.
    ///
    /// For a there-and-back route `stops` is the outbound leg only.
    pub fn add_bus<S: AsRef<str>>(
        &mut self,
        name: impl Into<BusName>,
        stops: &[S],
        is_roundtrip: bool,
    ) -> Result<BusId> {
        let name = name.into();
        if name.is_empty() {
            return Err(CatalogueError::EmptyName(EntityKind::Bus));
        }
        if self.bus_index.contains_key(&name) {
            return Err(CatalogueError::DuplicateEntity {
                kind: EntityKind::Bus,
                name: name.to_string(),
            });
        }
        if stops.len() < 2 {
            return Err(CatalogueError::InvalidRoute {
                bus: name,
                stops: stops.len(),
            });
        }

        let route = stops
            .iter()
            .map(|stop| self.resolve_stop(stop.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let id = BusId(self.buses.len() as u32);
        trace!(bus = %name, stops = route.len(), is_roundtrip, "adding bus");
        for stop in &route {
            self.buses_by_stop
                .entry(*stop)
                .or_default()
                .insert(name.clone());
        }
        self.bus_index.insert(name.clone(), id);
        self.buses.push(Bus {
            name,
            stops: route,
            is_roundtrip,
        });
        self.generation = next_generation();
        Ok(id)
    }

    /// Sets the road distance `from -> to`, and `to -> from` if that
    /// direction has no value of its own yet.
    pub fn set_distance(&mut self, from: &str, to: &str, meters: f64) -> Result<()> {
        let from_id = self.resolve_stop(from)?;
        let to_id = self.resolve_stop(to)?;
        if !(meters > 0.0 && meters.is_finite()) {
            return Err(CatalogueError::InvalidDistance {
                from: self.stop(from_id).name.clone(),
                to: self.stop(to_id).name.clone(),
                meters,
            });
        }

        self.distances.set(from_id, to_id, meters);
        self.generation = next_generation();
        Ok(())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Road distance in meters between two named stops
    pub fn get_distance(&self, from: &str, to: &str) -> Result<f64> {
        Ok(self.distance(self.resolve_stop(from)?, self.resolve_stop(to)?))
    }

    pub fn buses_for_stop(&self, name: &str) -> StopBuses {
        let Some(id) = self.stop_index.get(name) else {
            return StopBuses::UnknownStop;
        };
        match self.buses_by_stop.get(id) {
            Some(buses) if !buses.is_empty() => StopBuses::Buses(buses.iter().cloned().collect()),
            _ => StopBuses::NoBuses,
        }
    }

    /// Statistics for the named bus, `None` if no such bus exists
    pub fn bus_stat(&self, name: &str) -> Option<BusStat> {
        self.bus_by_name(name).map(|bus| stats::bus_stat(self, bus))
    }

    pub fn stops(&self) -> impl Iterator<Item = &Stop> {
        self.stops.iter()
    }

    pub fn bus_count(&self) -> usize {
        self.buses.len()
    }

    pub fn distance_count(&self) -> usize {
        self.distances.len()
    }

    fn resolve_stop(&self, name: &str) -> Result<StopId> {
        self.stop_index
            .get(name)
            .copied()
            .ok_or_else(|| CatalogueError::UnknownStop(StopName::new(name)))
    }
}

impl Catalogue for TransportCatalogue {
    fn stop(&self, id: StopId) -> &Stop {
        &self.stops[id.index()]
    }

    fn bus(&self, id: BusId) -> &Bus {
        &self.buses[id.index()]
    }

    fn stop_id(&self, name: &str) -> Option<StopId> {
        self.stop_index.get(name).copied()
    }

    fn bus_id(&self, name: &str) -> Option<BusId> {
        self.bus_index.get(name).copied()
    }

    fn stop_count(&self) -> usize {
        self.stops.len()
    }

    fn buses(&self) -> Vec<&Bus> {
        let mut buses: Vec<&Bus> = self.buses.iter().collect();
        buses.sort_by(|a, b| a.name.cmp(&b.name));
        buses
    }

    fn distance(&self, from: StopId, to: StopId) -> f64 {
        self.distances.get(from, to).unwrap_or_else(|| {
            great_circle_distance(self.stop(from).coordinates, self.stop(to).coordinates)
        })
    }

    fn generation(&self) -> u64 {
        self.generation
    }
}
