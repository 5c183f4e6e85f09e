//! Per-bus route statistics.
//!
//! A there-and-back route is driven outbound and then back, so its lengths add
//! the forward and the reverse traversal separately: road distances need not
//! be symmetric.

use std::collections::HashSet;

use crate::identifiers::StopId;
use crate::models::{traits::Catalogue, types::*};

pub fn bus_stat(catalogue: &impl Catalogue, bus: &Bus) -> BusStat {
    let stops = &bus.stops;

    let mut route_length = leg_length(stops.iter().copied(), |a, b| catalogue.distance(a, b));
    let mut geo_length = leg_length(stops.iter().copied(), |a, b| catalogue.geo_distance(a, b));
    if !bus.is_roundtrip {
        route_length += leg_length(stops.iter().rev().copied(), |a, b| catalogue.distance(a, b));
        geo_length += leg_length(stops.iter().rev().copied(), |a, b| catalogue.geo_distance(a, b));
    }

    BusStat {
        stop_count: stop_count(bus),
        unique_stop_count: stops.iter().collect::<HashSet<_>>().len(),
        route_length,
        geo_length,
        curvature: curvature(route_length, geo_length),
    }
}

/// Road length over great-circle length, 1 when all stops coincide
fn curvature(route_length: f64, geo_length: f64) -> f64 {
    if geo_length > 0.0 {
        route_length / geo_length
    } else {
        1.0
    }
}

/// Stops visited by one full run; the turnaround stop is counted once.
pub fn stop_count(bus: &Bus) -> usize {
    if bus.is_roundtrip {
        bus.stops.len()
    } else {
        bus.stops.len() * 2 - 1
    }
}

fn leg_length<I, F>(stops: I, distance: F) -> f64
where
    I: Iterator<Item = StopId> + Clone,
    F: Fn(StopId, StopId) -> f64,
{
    stops
        .clone()
        .zip(stops.skip(1))
        .map(|(from, to)| distance(from, to))
        .sum()
}
