//! Geographic distance utilities.

pub mod queries;

pub use queries::great_circle_distance;
