//! Itinerary service with a lazily built routing graph.
//!
//! The graph is built on the first route request and kept while the catalogue
//! passed in reports the same generation. Generations are unique per
//! catalogue state, so a mutation or a different catalogue both count as
//! stale. A stale graph is dropped and rebuilt before the next
//! request is answered, so at most one build happens per generation.

use tracing::debug;

use crate::graph::{Dijkstra, PathFinder};
use crate::models::traits::Catalogue;
use crate::routing::builder::RoutingGraph;
use crate::routing::itinerary::Itinerary;
use crate::routing::settings::RoutingSettings;
use crate::routing::RouteError;

/// Observable state of the graph cache
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphState {
    Unbuilt,
    Built { generation: u64 },
}

#[derive(Debug)]
enum GraphCache {
    Unbuilt,
    Built(RoutingGraph),
}

#[derive(Debug)]
pub struct TransportRouter<P = Dijkstra> {
    settings: RoutingSettings,
    finder: P,
    cache: GraphCache,
}

impl TransportRouter<Dijkstra> {
    pub fn new(settings: RoutingSettings) -> Result<Self, RouteError> {
        Self::with_finder(settings, Dijkstra)
    }
}

impl<P: PathFinder> TransportRouter<P> {
    pub fn with_finder(settings: RoutingSettings, finder: P) -> Result<Self, RouteError> {
        settings.validate()?;
        Ok(Self {
            settings,
            finder,
            cache: GraphCache::Unbuilt,
        })
    }

    pub fn settings(&self) -> &RoutingSettings {
        &self.settings
    }

    pub fn state(&self) -> GraphState {
        match &self.cache {
            GraphCache::Unbuilt => GraphState::Unbuilt,
            GraphCache::Built(graph) => GraphState::Built {
                generation: graph.generation(),
            },
        }
    }

    /// Built -> Unbuilt
    pub fn invalidate(&mut self) {
        if let GraphCache::Built(graph) = &self.cache {
            debug!(generation = graph.generation(), "routing graph invalidated");
        }
        self.cache = GraphCache::Unbuilt;
    }

    /// Unbuilt -> Built, unconditionally rebuilding from `catalogue`
    pub fn rebuild(&mut self, catalogue: &impl Catalogue) -> Result<&RoutingGraph, RouteError> {
        self.invalidate();
        self.cache = GraphCache::Built(RoutingGraph::build(catalogue, &self.settings)?);
        Ok(self.built())
    }

    /// Graph for the current catalogue generation, building it if needed
    pub fn ensure_built(&mut self, catalogue: &impl Catalogue) -> Result<&RoutingGraph, RouteError> {
        let fresh = matches!(
            &self.cache,
            GraphCache::Built(graph) if graph.generation() == catalogue.generation()
        );
        if fresh {
            return Ok(self.built());
        }
        self.rebuild(catalogue)
    }

    /// The cached graph, if built. It may belong to an older generation.
    pub fn graph(&self) -> Option<&RoutingGraph> {
        match &self.cache {
            GraphCache::Built(graph) => Some(graph),
            GraphCache::Unbuilt => None,
        }
    }

    pub fn find_best_route(
        &mut self,
        catalogue: &impl Catalogue,
        from: &str,
        to: &str,
    ) -> Result<Itinerary, RouteError> {
        self.ensure_built(catalogue)?;
        self.built().find_route(&self.finder, from, to)
    }

    fn built(&self) -> &RoutingGraph {
        match &self.cache {
            GraphCache::Built(graph) => graph,
            GraphCache::Unbuilt => unreachable!("routing graph requested before build"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::{BusName, StopName};
    use crate::models::types::Coordinates;
    use crate::routing::itinerary::Step;
    use crate::store::TransportCatalogue;
    use approx::assert_relative_eq;

    fn catalogue() -> TransportCatalogue {
        let mut catalogue = TransportCatalogue::new();
        catalogue.add_stop("A", Coordinates::new(0.0, 0.0)).unwrap();
        catalogue.add_stop("B", Coordinates::new(0.0, 0.01)).unwrap();
        catalogue.add_stop("C", Coordinates::new(0.0, 0.02)).unwrap();
        catalogue.add_stop("D", Coordinates::new(0.0, 0.03)).unwrap();
        catalogue.set_distance("A", "B", 1000.0).unwrap();
        catalogue.set_distance("B", "C", 1000.0).unwrap();
        catalogue.set_distance("C", "D", 1000.0).unwrap();
        catalogue.add_bus("1", &["A", "B"], false).unwrap();
        catalogue.add_bus("2", &["B", "C"], false).unwrap();
        catalogue
    }

    fn router() -> TransportRouter {
        TransportRouter::new(RoutingSettings::new(6.0, 60.0)).unwrap()
    }

    #[test]
    fn test_lazy_build() {
        let catalogue = catalogue();
        let mut router = router();
        assert_eq!(router.state(), GraphState::Unbuilt);

        router.find_best_route(&catalogue, "A", "B").unwrap();
        assert_eq!(
            router.state(),
            GraphState::Built {
                generation: catalogue.generation()
            }
        );
    }

    #[test]
    fn test_mutation_triggers_rebuild() {
        let mut catalogue = catalogue();
        let mut router = router();

        assert_eq!(
            router.find_best_route(&catalogue, "A", "D"),
            Err(RouteError::UnknownStop(StopName::new("D")))
        );

        catalogue.add_bus("3", &["C", "D"], false).unwrap();
        assert_ne!(
            router.state(),
            GraphState::Built {
                generation: catalogue.generation()
            }
        );

        let itinerary = router.find_best_route(&catalogue, "A", "D").unwrap();
        assert_relative_eq!(itinerary.total_time, 3.0 * (6.0 + 1.0));
        assert_eq!(itinerary.boardings(), 3);
        assert_eq!(
            router.state(),
            GraphState::Built {
                generation: catalogue.generation()
            }
        );
    }

    #[test]
    fn test_graph_not_shared_between_catalogues() {
        let one_way = |from: &str, to: &str| {
            let mut catalogue = TransportCatalogue::new();
            catalogue.add_stop("A", Coordinates::new(0.0, 0.0)).unwrap();
            catalogue.add_stop("B", Coordinates::new(0.0, 0.01)).unwrap();
            catalogue.add_bus("1", &[from, to], true).unwrap();
            catalogue
        };
        let forward = one_way("A", "B");
        let backward = one_way("B", "A");
        let mut router = router();

        assert!(router.find_best_route(&forward, "A", "B").is_ok());
        assert_eq!(router.find_best_route(&backward, "A", "B"), Err(RouteError::NoPath));
        assert_eq!(
            router.state(),
            GraphState::Built {
                generation: backward.generation()
            }
        );
    }

    #[test]
    fn test_invalidate_and_rebuild() {
        let catalogue = catalogue();
        let mut router = router();

        router.rebuild(&catalogue).unwrap();
        assert!(router.graph().is_some());

        router.invalidate();
        assert_eq!(router.state(), GraphState::Unbuilt);
        assert!(router.graph().is_none());
    }

    #[test]
    fn test_transfer_itinerary() {
        let catalogue = catalogue();
        let mut router = router();
        let itinerary = router.find_best_route(&catalogue, "C", "A").unwrap();

        assert_relative_eq!(itinerary.total_time, 14.0);
        assert_eq!(
            itinerary.steps,
            vec![
                Step::Wait { stop: StopName::new("C"), minutes: 6.0 },
                Step::Ride { bus: BusName::new("2"), span_count: 1, minutes: 1.0 },
                Step::Wait { stop: StopName::new("B"), minutes: 6.0 },
                Step::Ride { bus: BusName::new("1"), span_count: 1, minutes: 1.0 },
            ]
        );
    }

    #[test]
    fn test_unknown_and_unserved_stops() {
        let catalogue = catalogue();
        let mut router = router();

        assert_eq!(
            router.find_best_route(&catalogue, "Nowhere", "A"),
            Err(RouteError::UnknownStop(StopName::new("Nowhere")))
        );
        // D exists but no bus serves it
        assert_eq!(
            router.find_best_route(&catalogue, "A", "D"),
            Err(RouteError::UnknownStop(StopName::new("D")))
        );
        assert!(RouteError::UnknownStop(StopName::new("D")).is_not_found());
    }

    #[test]
    fn test_no_path() {
        let mut catalogue = catalogue();
        catalogue.add_stop("X", Coordinates::new(1.0, 1.0)).unwrap();
        catalogue.add_stop("Y", Coordinates::new(1.0, 1.01)).unwrap();
        catalogue.add_bus("island", &["X", "Y"], true).unwrap();
        let mut router = router();

        assert_eq!(router.find_best_route(&catalogue, "A", "X"), Err(RouteError::NoPath));
        // roundtrip X -> Y only runs one way
        assert!(router.find_best_route(&catalogue, "X", "Y").is_ok());
        assert_eq!(router.find_best_route(&catalogue, "Y", "X"), Err(RouteError::NoPath));
    }

    #[test]
    fn test_same_stop_is_empty_trip() {
        let catalogue = catalogue();
        let mut router = router();

        let itinerary = router.find_best_route(&catalogue, "B", "B").unwrap();
        assert_eq!(itinerary.total_time, 0.0);
        assert!(itinerary.is_empty());

        assert_eq!(
            router.find_best_route(&catalogue, "D", "D"),
            Err(RouteError::UnknownStop(StopName::new("D")))
        );
    }

    #[test]
    fn test_rejects_invalid_settings() {
        assert!(TransportRouter::new(RoutingSettings::new(6.0, -10.0)).is_err());
    }
}
