//! Core data types and errors for the catalogue.

use geo::Point;

use crate::identifiers::*;

// ============================================================================
// Data Structures
// ============================================================================

/// Geographic position in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `geo` points are (x, y) = (longitude, latitude)
    pub fn to_point(self) -> Point {
        Point::new(self.lng, self.lat)
    }
}

impl From<Point> for Coordinates {
    fn from(point: Point) -> Self {
        Self::new(point.y(), point.x())
    }
}

/// A named stop
#[derive(Clone, Debug, PartialEq)]
pub struct Stop {
    pub name: StopName,
    pub coordinates: Coordinates,
}

/// A bus route over stops already registered in the catalogue.
///
/// `stops` holds arena indices into the owning catalogue. For a
/// there-and-back route only the outbound leg is stored.
#[derive(Clone, Debug, PartialEq)]
pub struct Bus {
    pub name: BusName,
    pub stops: Vec<StopId>,
    pub is_roundtrip: bool,
}

/// Descriptive statistics of a single bus route
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BusStat {
    pub stop_count: usize,
    pub unique_stop_count: usize,
    /// Road length in meters
    pub route_length: f64,
    /// Great-circle length in meters
    pub geo_length: f64,
    /// `route_length / geo_length`, or 1 when the geographic length is zero
    pub curvature: f64,
}

/// Answer to "which buses pass through this stop?"
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StopBuses {
    UnknownStop,
    NoBuses,
    /// Bus names in ascending order
    Buses(Vec<BusName>),
}

impl StopBuses {
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::UnknownStop)
    }

    /// Bus names, empty for both a known stop with no buses and an unknown stop
    pub fn names(&self) -> &[BusName] {
        match self {
            Self::Buses(names) => names,
            Self::UnknownStop | Self::NoBuses => &[],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Stop,
    Bus,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stop => f.write_str("stop"),
            Self::Bus => f.write_str("bus"),
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CatalogueError {
    #[error("Duplicate {kind}: {name}")]
    DuplicateEntity { kind: EntityKind, name: String },

    #[error("Empty {0} name")]
    EmptyName(EntityKind),

    #[error("Stop not found: {0}")]
    UnknownStop(StopName),

    #[error("Invalid route {bus}: {stops} stop(s), at least 2 required")]
    InvalidRoute { bus: BusName, stops: usize },

    #[error("Invalid distance {from} -> {to}: {meters} m")]
    InvalidDistance {
        from: StopName,
        to: StopName,
        meters: f64,
    },
}

pub type Result<T> = std::result::Result<T, CatalogueError>;
