//! Rider-facing itinerary steps.

use crate::identifiers::{BusName, StopName};

#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    /// Wait at `stop` for the next bus
    Wait { stop: StopName, minutes: f64 },
    /// Ride `bus` for `span_count` stops
    Ride {
        bus: BusName,
        span_count: usize,
        minutes: f64,
    },
}

impl Step {
    pub fn minutes(&self) -> f64 {
        match self {
            Self::Wait { minutes, .. } | Self::Ride { minutes, .. } => *minutes,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Itinerary {
    /// Trip duration in minutes
    pub total_time: f64,
    pub steps: Vec<Step>,
}

impl Itinerary {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn boardings(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| matches!(step, Step::Wait { .. }))
            .count()
    }
}
