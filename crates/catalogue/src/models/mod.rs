//! Catalogue data models, types, and traits.

pub mod traits;
pub mod types;

// Re-exports for convenience
pub use traits::Catalogue;
pub use types::{
    Bus, BusStat, CatalogueError, Coordinates, EntityKind, Result, Stop, StopBuses,
};
