//! Entity store: stops, buses and road distances.

pub mod catalogue;
pub mod distances;

pub use catalogue::TransportCatalogue;
pub use distances::DistanceTable;
