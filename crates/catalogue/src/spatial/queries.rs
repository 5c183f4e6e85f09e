//! Distance calculations on the Earth's surface.
//!
//! Uses the Haversine formula; identical coordinates are exactly zero apart.

use geo::HaversineDistance;

use crate::models::types::Coordinates;

/// Great-circle distance between two coordinates in meters
pub fn great_circle_distance(from: Coordinates, to: Coordinates) -> f64 {
    if from == to {
        return 0.0;
    }
    from.to_point().haversine_distance(&to.to_point())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_great_circle_distance() {
        // Distance from NYC to LA is approximately 3,936 km
        let nyc = Coordinates::new(40.7128, -74.0060);
        let la = Coordinates::new(34.0522, -118.2437);

        let dist = great_circle_distance(nyc, la);
        assert!((dist - 3_936_000.0).abs() < 50_000.0); // Within 50km
    }

    #[test]
    fn test_same_point_is_zero() {
        let p = Coordinates::new(55.574371, 37.6517);
        assert_eq!(great_circle_distance(p, p), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Coordinates::new(55.611087, 37.20829);
        let b = Coordinates::new(55.595884, 37.209755);
        assert_relative_eq!(great_circle_distance(a, b), great_circle_distance(b, a));
    }

    #[test]
    fn test_hundredth_degree_on_equator() {
        // ~1.11 km per 0.01 degree of longitude on the equator
        let dist = great_circle_distance(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 0.01));
        assert!((dist - 1_112.0).abs() < 2.0);
    }
}
