//! Bulk loading of stops, distances and buses.
//!
//! Records are applied in three passes: every stop first, then every road
//! distance, then every bus. Distances and buses may therefore name stops that
//! appear later in the input.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::models::types::{CatalogueError, Coordinates};
use crate::store::TransportCatalogue;

#[derive(Clone, Debug, PartialEq)]
pub enum LoadRecord {
    Stop {
        name: String,
        coordinates: Coordinates,
        /// Road distances in meters from this stop to the named stops
        road_distances: Vec<(String, f64)>,
    },
    Bus {
        name: String,
        stops: Vec<String>,
        is_roundtrip: bool,
    },
}

impl LoadRecord {
    pub fn name(&self) -> &str {
        match self {
            Self::Stop { name, .. } | Self::Bus { name, .. } => name,
        }
    }
}

/// What to do with a record the catalogue rejects
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadPolicy {
    /// Stop at the first rejected record
    Abort,
    /// Log and drop rejected records, keep loading the rest
    #[default]
    Skip,
}

#[derive(Debug, PartialEq)]
pub struct Rejected {
    /// Position of the record in the input
    pub index: usize,
    pub error: CatalogueError,
}

#[derive(Debug, Default, PartialEq)]
pub struct LoadReport {
    pub stops: usize,
    pub distances: usize,
    pub buses: usize,
    pub rejected: Vec<Rejected>,
}

#[derive(Debug, thiserror::Error, PartialEq)]
#[error("Record {index} ({name}) rejected: {source}")]
pub struct LoadError {
    pub index: usize,
    pub name: String,
    #[source]
    pub source: CatalogueError,
}

pub fn load(
    catalogue: &mut TransportCatalogue,
    records: &[LoadRecord],
    policy: LoadPolicy,
) -> Result<LoadReport, LoadError> {
    let mut loader = Loader {
        policy,
        report: LoadReport::default(),
    };

    let mut rejected_stops = HashSet::new();
    for (index, record) in records.iter().enumerate() {
        if let LoadRecord::Stop { name, coordinates, .. } = record {
            let result = catalogue.add_stop(name.as_str(), *coordinates);
            if result.is_err() {
                rejected_stops.insert(index);
            }
            loader.record(index, record, result.map(|_| ()), |r| r.stops += 1)?;
        }
    }

    // A rejected stop record contributes nothing, its distances included
    for (index, record) in records.iter().enumerate() {
        if rejected_stops.contains(&index) {
            continue;
        }
        if let LoadRecord::Stop { name, road_distances, .. } = record {
            for (to, meters) in road_distances {
                let result = catalogue.set_distance(name, to, *meters);
                loader.record(index, record, result, |r| r.distances += 1)?;
            }
        }
    }

    for (index, record) in records.iter().enumerate() {
        if let LoadRecord::Bus { name, stops, is_roundtrip } = record {
            let result = catalogue.add_bus(name.as_str(), stops.as_slice(), *is_roundtrip);
            loader.record(index, record, result.map(|_| ()), |r| r.buses += 1)?;
        }
    }

    let report = loader.report;
    debug!(
        stops = report.stops,
        distances = report.distances,
        buses = report.buses,
        rejected = report.rejected.len(),
        "catalogue loaded"
    );
    Ok(report)
}

struct Loader {
    policy: LoadPolicy,
    report: LoadReport,
}

impl Loader {
    fn record(
        &mut self,
        index: usize,
        record: &LoadRecord,
        result: Result<(), CatalogueError>,
        on_success: impl FnOnce(&mut LoadReport),
    ) -> Result<(), LoadError> {
        match (result, self.policy) {
            (Ok(()), _) => {
                on_success(&mut self.report);
                Ok(())
            }
            (Err(source), LoadPolicy::Abort) => Err(LoadError {
                index,
                name: record.name().to_string(),
                source,
            }),
            (Err(error), LoadPolicy::Skip) => {
                warn!(index, name = record.name(), %error, "skipping record");
                self.report.rejected.push(Rejected { index, error });
                Ok(())
            }
        }
    }
}
