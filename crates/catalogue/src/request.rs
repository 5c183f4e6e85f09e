//! Query dispatch over a loaded catalogue.

use tracing::trace;

use crate::models::types::{BusStat, StopBuses};
use crate::render::{MapData, MapRenderer};
use crate::routing::{Itinerary, RouteError, RoutingSettings, TransportRouter};
use crate::store::TransportCatalogue;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Query {
    Stop { name: String },
    Bus { name: String },
    Route { from: String, to: String },
    Map,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Response {
    Stop(StopBuses),
    Bus(Option<BusStat>),
    /// `None` when either stop is not routable or no path exists
    Route(Option<Itinerary>),
    /// `None` when no renderer is configured
    Map(Option<String>),
}

pub struct RequestHandler<'a> {
    catalogue: &'a TransportCatalogue,
    router: TransportRouter,
    renderer: Option<MapRenderer>,
}

impl<'a> RequestHandler<'a> {
    pub fn new(catalogue: &'a TransportCatalogue, settings: RoutingSettings) -> Result<Self, RouteError> {
        Ok(Self {
            catalogue,
            router: TransportRouter::new(settings)?,
            renderer: None,
        })
    }

    pub fn with_renderer(mut self, renderer: MapRenderer) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn handle(&mut self, query: &Query) -> Result<Response, RouteError> {
        trace!(?query, "handling query");
        Ok(match query {
            Query::Stop { name } => Response::Stop(self.stop(name)),
            Query::Bus { name } => Response::Bus(self.bus(name)),
            Query::Route { from, to } => Response::Route(self.route(from, to)?),
            Query::Map => Response::Map(self.map()),
        })
    }

    pub fn stop(&self, name: &str) -> StopBuses {
        self.catalogue.buses_for_stop(name)
    }

    pub fn bus(&self, name: &str) -> Option<BusStat> {
        self.catalogue.bus_stat(name)
    }

    pub fn route(&mut self, from: &str, to: &str) -> Result<Option<Itinerary>, RouteError> {
        match self.router.find_best_route(self.catalogue, from, to) {
            Ok(itinerary) => Ok(Some(itinerary)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn map(&self) -> Option<String> {
        let renderer = self.renderer.as_ref()?;
        Some(renderer.render(&MapData::from_catalogue(self.catalogue)).render())
    }
}
