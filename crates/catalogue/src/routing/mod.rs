//! Routing graph construction and itinerary search.

pub mod builder;
pub mod itinerary;
pub mod router;
pub mod settings;

pub use builder::{RoutingGraph, StopVertices};
pub use itinerary::{Itinerary, Step};
pub use router::{GraphState, TransportRouter};
pub use settings::RoutingSettings;

use crate::graph::GraphError;
use crate::identifiers::StopName;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RouteError {
    /// Stop unknown to the catalogue or served by no bus
    #[error("Stop not routable: {0}")]
    UnknownStop(StopName),

    #[error("No path between stops")]
    NoPath,

    #[error("Invalid routing settings: {0}")]
    InvalidSettings(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl RouteError {
    /// Expected "not found" outcomes, as opposed to configuration or internal faults
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UnknownStop(_) | Self::NoPath)
    }
}
