//! # transport-catalogue
//!
//! In-memory catalogue of bus stops and routes with route statistics,
//! fastest-itinerary search and SVG map rendering.
//!
//! ## Features
//!
//! - **Entity store**: stops, buses and directed road distances with reverse fallback
//! - **Statistics**: stop counts, road and geographic length, curvature
//! - **Routing**: lazily built wait/ride graph searched with Dijkstra
//! - **Rendering**: SVG map of every route (optional `serde` for settings)
//!
//! ## Example
//!
//! ```
//! use transport_catalogue::prelude::*;
//!
//! let mut catalogue = TransportCatalogue::new();
//! catalogue.add_stop("A", Coordinates::new(55.611087, 37.20829)).unwrap();
//! catalogue.add_stop("B", Coordinates::new(55.595884, 37.209755)).unwrap();
//! catalogue.set_distance("A", "B", 3000.0).unwrap();
//! catalogue.add_bus("256", &["A", "B"], false).unwrap();
//!
//! let stat = catalogue.bus_stat("256").unwrap();
//! assert_eq!(stat.stop_count, 3);
//! assert_eq!(stat.route_length, 6000.0);
//!
//! let mut router = TransportRouter::new(RoutingSettings::new(6.0, 40.0)).unwrap();
//! let itinerary = router.find_best_route(&catalogue, "A", "B").unwrap();
//! assert_eq!(itinerary.total_time, 6.0 + 4.5);
//! ```

pub mod graph;
pub mod identifiers;
pub mod loader;
pub mod models;
pub mod render;
pub mod request;
pub mod routing;
pub mod spatial;
pub mod stats;
pub mod store;

// Re-exports for convenience
pub mod prelude {
    pub use crate::identifiers::*;
    pub use crate::loader::{load, LoadError, LoadPolicy, LoadRecord, LoadReport};
    pub use crate::models::{traits::*, types::*};
    pub use crate::render::{MapData, MapRenderer, RenderSettings};
    pub use crate::request::{Query, RequestHandler, Response};
    pub use crate::routing::{Itinerary, RouteError, RoutingSettings, Step, TransportRouter};
    pub use crate::store::TransportCatalogue;
}

pub use prelude::*;
