//! Projection of geographic coordinates onto a flat canvas.

use crate::models::types::Coordinates;
use crate::render::svg::Point;

const EPSILON: f64 = 1e-6;

fn is_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

/// Equirectangular projection fitted to a set of points.
///
/// Longitude grows to the right and latitude grows upwards; the bounding box
/// is scaled uniformly so it fits the canvas minus `padding` on every side.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SphereProjector {
    padding: f64,
    min_lng: f64,
    max_lat: f64,
    zoom: f64,
}

impl SphereProjector {
    pub fn new<I>(points: I, width: f64, height: f64, padding: f64) -> Self
    where
        I: IntoIterator<Item = Coordinates>,
    {
        let mut points = points.into_iter().peekable();
        if points.peek().is_none() {
            return Self {
                padding,
                ..Self::default()
            };
        }

        let (mut min_lat, mut max_lat) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut min_lng, mut max_lng) = (f64::INFINITY, f64::NEG_INFINITY);
        for p in points {
            min_lat = min_lat.min(p.lat);
            max_lat = max_lat.max(p.lat);
            min_lng = min_lng.min(p.lng);
            max_lng = max_lng.max(p.lng);
        }

        let width_zoom = (!is_zero(max_lng - min_lng)).then(|| (width - 2.0 * padding) / (max_lng - min_lng));
        let height_zoom = (!is_zero(max_lat - min_lat)).then(|| (height - 2.0 * padding) / (max_lat - min_lat));
        let zoom = match (width_zoom, height_zoom) {
            (Some(w), Some(h)) => w.min(h),
            (Some(z), None) | (None, Some(z)) => z,
            (None, None) => 0.0,
        };

        Self {
            padding,
            min_lng,
            max_lat,
            zoom,
        }
    }

    pub fn project(&self, coordinates: Coordinates) -> Point {
        Point::new(
            (coordinates.lng - self.min_lng) * self.zoom + self.padding,
            (self.max_lat - coordinates.lat) * self.zoom + self.padding,
        )
    }
}
