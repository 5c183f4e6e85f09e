//! Routing parameters.

use crate::routing::RouteError;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct RoutingSettings {
    /// Minutes spent waiting at a stop before each boarding
    pub bus_wait_time: f64,
    /// Average bus speed in km/h
    pub bus_velocity: f64,
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            bus_wait_time: 6.0,
            bus_velocity: 40.0,
        }
    }
}

impl RoutingSettings {
    pub fn new(bus_wait_time: f64, bus_velocity: f64) -> Self {
        Self {
            bus_wait_time,
            bus_velocity,
        }
    }

    pub fn validate(&self) -> Result<(), RouteError> {
        if !(self.bus_velocity > 0.0 && self.bus_velocity.is_finite()) {
            return Err(RouteError::InvalidSettings(format!(
                "bus_velocity must be positive, got {}",
                self.bus_velocity
            )));
        }
        if !(self.bus_wait_time >= 0.0 && self.bus_wait_time.is_finite()) {
            return Err(RouteError::InvalidSettings(format!(
                "bus_wait_time must be non-negative, got {}",
                self.bus_wait_time
            )));
        }
        Ok(())
    }

    /// Minutes needed to ride `meters` at the configured velocity
    pub fn travel_minutes(&self, meters: f64) -> f64 {
        meters / (self.bus_velocity * 1000.0) * 60.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_travel_minutes() {
        let settings = RoutingSettings::new(6.0, 60.0);
        assert_relative_eq!(settings.travel_minutes(1000.0), 1.0);

        let settings = RoutingSettings::new(6.0, 40.0);
        assert_relative_eq!(settings.travel_minutes(3900.0), 5.85);
    }

    #[test]
    fn test_validate() {
        assert!(RoutingSettings::default().validate().is_ok());
        assert!(RoutingSettings::new(0.0, 30.0).validate().is_ok());
        assert!(RoutingSettings::new(6.0, 0.0).validate().is_err());
        assert!(RoutingSettings::new(-1.0, 30.0).validate().is_err());
        assert!(RoutingSettings::new(6.0, f64::NAN).validate().is_err());
    }
}
