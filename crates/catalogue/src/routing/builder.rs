//! Compiles catalogue buses into a routing graph.
//!
//! Every stop served by a bus gets two vertices: riders arrive at the *wait*
//! vertex and leave from the *depart* vertex. The single wait edge between
//! them carries the boarding penalty, so it is paid once per boarding. Ride
//! edges go from the depart vertex of one stop straight to the wait vertex of
//! any later stop on the same bus, so staying on board across several stops is
//! a single edge with no extra wait.

use std::collections::HashMap;

use tracing::debug;

use crate::graph::{DirectedWeightedGraph, EdgeId, PathFinder, VertexId};
use crate::identifiers::*;
use crate::models::{traits::Catalogue, types::Bus};
use crate::routing::itinerary::{Itinerary, Step};
use crate::routing::settings::RoutingSettings;
use crate::routing::RouteError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StopVertices {
    pub wait: VertexId,
    pub depart: VertexId,
}

/// Routing graph for one catalogue generation.
///
/// Immutable once built; `steps` is indexed by edge id and holds the
/// rider-facing meaning of every edge.
#[derive(Clone, Debug)]
pub struct RoutingGraph {
    graph: DirectedWeightedGraph,
    vertices: HashMap<StopName, StopVertices>,
    steps: Vec<Step>,
    generation: u64,
}

impl RoutingGraph {
    pub fn build(catalogue: &impl Catalogue, settings: &RoutingSettings) -> Result<Self, RouteError> {
        settings.validate()?;

        let mut builder = Builder {
            catalogue,
            settings,
            graph: RoutingGraph {
                graph: DirectedWeightedGraph::with_capacity(catalogue.stop_count() * 2),
                vertices: HashMap::new(),
                steps: Vec::new(),
                generation: catalogue.generation(),
            },
            by_id: HashMap::new(),
        };
        for bus in catalogue.buses() {
            builder.add_bus(bus)?;
        }

        let graph = builder.graph;
        debug!(
            generation = graph.generation,
            stops = graph.vertices.len(),
            edges = graph.graph.edge_count(),
            "routing graph built"
        );
        Ok(graph)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn stop_vertices(&self, stop: &str) -> Option<StopVertices> {
        self.vertices.get(stop).copied()
    }

    pub fn step(&self, edge: EdgeId) -> &Step {
        &self.steps[edge.0]
    }

    pub fn graph(&self) -> &DirectedWeightedGraph {
        &self.graph
    }

    /// Fastest itinerary between two stops.
    ///
    /// A stop no bus serves has no vertices and is reported as unknown. A
    /// trip from a routable stop to itself is empty and takes no time.
    pub fn find_route(&self, finder: &impl PathFinder, from: &str, to: &str) -> Result<Itinerary, RouteError> {
        let source = self
            .stop_vertices(from)
            .ok_or_else(|| RouteError::UnknownStop(StopName::new(from)))?;
        let target = self
            .stop_vertices(to)
            .ok_or_else(|| RouteError::UnknownStop(StopName::new(to)))?;

        let path = finder
            .find_path(&self.graph, source.wait, target.wait)
            .ok_or(RouteError::NoPath)?;

        Ok(Itinerary {
            total_time: path.weight,
            steps: path.edges.iter().map(|&edge| self.step(edge).clone()).collect(),
        })
    }
}

struct Builder<'a, C> {
    catalogue: &'a C,
    settings: &'a RoutingSettings,
    graph: RoutingGraph,
    by_id: HashMap<StopId, StopVertices>,
}

impl<C: Catalogue> Builder<'_, C> {
    fn add_bus(&mut self, bus: &Bus) -> Result<(), RouteError> {
        let stops = &bus.stops;

        for (i, &origin) in stops.iter().enumerate() {
            let from = self.vertices_for(origin)?;
            let mut forward_meters = 0.0;
            let mut backward_meters = 0.0;

            for j in i + 1..stops.len() {
                forward_meters += self.catalogue.distance(stops[j - 1], stops[j]);
                backward_meters += self.catalogue.distance(stops[j], stops[j - 1]);
                if stops[j] == origin {
                    continue;
                }

                let to = self.vertices_for(stops[j])?;
                let span_count = j - i;
                self.add_ride(from.depart, to.wait, bus, span_count, forward_meters)?;
                if !bus.is_roundtrip {
                    self.add_ride(to.depart, from.wait, bus, span_count, backward_meters)?;
                }
            }
        }
        Ok(())
    }

    /// Vertices of `stop`, creating them and the stop's wait edge on first use
    fn vertices_for(&mut self, stop: StopId) -> Result<StopVertices, RouteError> {
        if let Some(vertices) = self.by_id.get(&stop) {
            return Ok(*vertices);
        }

        let name = self.catalogue.stop(stop).name.clone();
        let vertices = StopVertices {
            wait: self.graph.graph.add_vertex(),
            depart: self.graph.graph.add_vertex(),
        };
        let minutes = self.settings.bus_wait_time;
        self.add_edge(
            vertices.wait,
            vertices.depart,
            Step::Wait {
                stop: name.clone(),
                minutes,
            },
        )?;

        self.by_id.insert(stop, vertices);
        self.graph.vertices.insert(name, vertices);
        Ok(vertices)
    }

    fn add_ride(
        &mut self,
        from: VertexId,
        to: VertexId,
        bus: &Bus,
        span_count: usize,
        meters: f64,
    ) -> Result<(), RouteError> {
        let step = Step::Ride {
            bus: bus.name.clone(),
            span_count,
            minutes: self.settings.travel_minutes(meters),
        };
        self.add_edge(from, to, step)
    }

    fn add_edge(&mut self, from: VertexId, to: VertexId, step: Step) -> Result<(), RouteError> {
        let edge = self.graph.graph.add_edge(from, to, step.minutes())?;
        debug_assert_eq!(edge.0, self.graph.steps.len());
        self.graph.steps.push(step);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Dijkstra;
    use crate::models::types::Coordinates;
    use crate::store::TransportCatalogue;
    use approx::assert_relative_eq;

    fn line(roundtrip: bool) -> TransportCatalogue {
        let mut catalogue = TransportCatalogue::new();
        catalogue.add_stop("A", Coordinates::new(0.0, 0.0)).unwrap();
        catalogue.add_stop("B", Coordinates::new(0.0, 0.01)).unwrap();
        catalogue.add_stop("C", Coordinates::new(0.0, 0.02)).unwrap();
        catalogue.set_distance("A", "B", 1000.0).unwrap();
        catalogue.set_distance("B", "C", 2000.0).unwrap();
        catalogue.set_distance("C", "B", 3000.0).unwrap();
        catalogue.add_bus("1", &["A", "B", "C"], roundtrip).unwrap();
        catalogue
    }

    fn settings() -> RoutingSettings {
        RoutingSettings::new(6.0, 60.0)
    }

    fn ride(graph: &RoutingGraph, from: &str, to: &str) -> Vec<Step> {
        let depart = graph.stop_vertices(from).unwrap().depart;
        let wait = graph.stop_vertices(to).unwrap().wait;
        graph
            .graph()
            .incident_edges(depart)
            .iter()
            .filter(|&&edge| graph.graph().edge(edge).to == wait)
            .map(|&edge| graph.step(edge).clone())
            .collect()
    }

    #[test]
    fn test_roundtrip_edges() {
        let graph = RoutingGraph::build(&line(true), &settings()).unwrap();

        // 3 wait edges + ride spans A-B, A-C, B-C
        assert_eq!(graph.graph().vertex_count(), 6);
        assert_eq!(graph.graph().edge_count(), 6);

        let steps = ride(&graph, "A", "C");
        assert_eq!(steps.len(), 1);
        let Step::Ride { bus, span_count, minutes } = &steps[0] else {
            panic!("expected a ride edge");
        };
        assert_eq!(bus.as_str(), "1");
        assert_eq!(*span_count, 2);
        assert_relative_eq!(*minutes, 3.0);

        assert!(ride(&graph, "C", "A").is_empty());
    }

    #[test]
    fn test_there_and_back_uses_reverse_distances() {
        let graph = RoutingGraph::build(&line(false), &settings()).unwrap();

        assert_eq!(graph.graph().edge_count(), 3 + 6);
        // C -> B -> A rides 3000 m then 1000 m
        let back = ride(&graph, "C", "A");
        assert_eq!(back.len(), 1);
        assert_relative_eq!(back[0].minutes(), 4.0);
        assert_relative_eq!(ride(&graph, "C", "B")[0].minutes(), 3.0);
        assert_relative_eq!(ride(&graph, "B", "C")[0].minutes(), 2.0);
    }

    #[test]
    fn test_one_wait_edge_per_stop() {
        let mut catalogue = line(true);
        catalogue.add_bus("2", &["C", "B", "A"], false).unwrap();
        let graph = RoutingGraph::build(&catalogue, &settings()).unwrap();

        let waits = (0..graph.graph().edge_count())
            .filter(|&edge| matches!(graph.step(EdgeId(edge)), Step::Wait { .. }))
            .count();
        assert_eq!(waits, 3);
        assert_eq!(graph.graph().vertex_count(), 6);
    }

    #[test]
    fn test_unserved_stop_has_no_vertices() {
        let mut catalogue = line(true);
        catalogue.add_stop("Lonely", Coordinates::new(1.0, 1.0)).unwrap();
        let graph = RoutingGraph::build(&catalogue, &settings()).unwrap();

        assert!(graph.stop_vertices("Lonely").is_none());
        assert!(graph.stop_vertices("Nowhere").is_none());
        assert_eq!(graph.generation(), catalogue.generation());
    }

    #[test]
    fn test_repeated_stop_gets_no_self_loop() {
        let mut catalogue = line(true);
        catalogue.add_bus("loop", &["A", "B", "A"], true).unwrap();
        let graph = RoutingGraph::build(&catalogue, &settings()).unwrap();

        assert!(ride(&graph, "A", "A").is_empty());
        // B -> A on the loop bus
        assert_eq!(ride(&graph, "B", "A").len(), 1);
    }

    #[test]
    fn test_invalid_settings() {
        let result = RoutingGraph::build(&line(true), &RoutingSettings::new(6.0, 0.0));
        assert!(matches!(result, Err(RouteError::InvalidSettings(_))));
    }

    #[test]
    fn test_find_route_worked_example() {
        let mut catalogue = TransportCatalogue::new();
        catalogue.add_stop("A", Coordinates::new(0.0, 0.0)).unwrap();
        catalogue.add_stop("B", Coordinates::new(0.0, 0.01)).unwrap();
        catalogue.set_distance("A", "B", 1000.0).unwrap();
        catalogue.add_bus("bus", &["A", "B"], false).unwrap();

        let graph = RoutingGraph::build(&catalogue, &settings()).unwrap();
        let itinerary = graph.find_route(&Dijkstra, "A", "B").unwrap();

        assert_relative_eq!(itinerary.total_time, 7.0);
        assert_eq!(
            itinerary.steps,
            vec![
                Step::Wait { stop: StopName::new("A"), minutes: 6.0 },
                Step::Ride { bus: BusName::new("bus"), span_count: 1, minutes: 1.0 },
            ]
        );
    }

    #[test]
    fn test_staying_on_board_waits_once() {
        let graph = RoutingGraph::build(&line(true), &settings()).unwrap();
        let itinerary = graph.find_route(&Dijkstra, "A", "C").unwrap();

        assert_relative_eq!(itinerary.total_time, 6.0 + 3.0);
        assert_eq!(itinerary.steps.len(), 2);
    }
}
