//! SVG map of all bus routes.

pub mod projector;
pub mod svg;

use std::collections::BTreeMap;

use crate::identifiers::*;
use crate::models::{traits::Catalogue, types::Coordinates};

pub use projector::SphereProjector;
use svg::{Circle, Color, Document, Point, Polyline, StrokeLineCap, StrokeLineJoin, Text};

const FONT_FAMILY: &str = "Verdana";

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct RenderSettings {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub line_width: f64,
    pub stop_radius: f64,
    pub bus_label_font_size: u32,
    pub bus_label_offset: Point,
    pub stop_label_font_size: u32,
    pub stop_label_offset: Point,
    pub underlayer_color: Color,
    pub underlayer_width: f64,
    pub color_palette: Vec<Color>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 1200.0,
            padding: 50.0,
            line_width: 14.0,
            stop_radius: 5.0,
            bus_label_font_size: 20,
            bus_label_offset: Point::new(7.0, 15.0),
            stop_label_font_size: 20,
            stop_label_offset: Point::new(7.0, -3.0),
            underlayer_color: Color::Rgba(255, 255, 255, 0.85),
            underlayer_width: 3.0,
            color_palette: vec!["green".into(), Color::Rgb(255, 160, 0), "red".into()],
        }
    }
}

// ============================================================================
// Map data
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct MapStop {
    pub name: StopName,
    pub coordinates: Coordinates,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MapRoute {
    pub name: BusName,
    pub is_roundtrip: bool,
    /// Outbound stops in route order
    pub stops: Vec<MapStop>,
}

/// Everything the renderer needs: buses in name order with resolved stops
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MapData {
    pub routes: Vec<MapRoute>,
}

impl MapData {
    pub fn from_catalogue(catalogue: &impl Catalogue) -> Self {
        let routes = catalogue
            .buses()
            .into_iter()
            .map(|bus| MapRoute {
                name: bus.name.clone(),
                is_roundtrip: bus.is_roundtrip,
                stops: bus
                    .stops
                    .iter()
                    .map(|&id| {
                        let stop = catalogue.stop(id);
                        MapStop {
                            name: stop.name.clone(),
                            coordinates: stop.coordinates,
                        }
                    })
                    .collect(),
            })
            .collect();
        Self { routes }
    }

    /// Stops served by at least one route, in name order
    pub fn stops(&self) -> Vec<&MapStop> {
        let by_name: BTreeMap<&StopName, &MapStop> = self
            .routes
            .iter()
            .flat_map(|route| &route.stops)
            .map(|stop| (&stop.name, stop))
            .collect();
        by_name.into_values().collect()
    }
}

// ============================================================================
// Renderer
// ============================================================================

#[derive(Clone, Debug, Default)]
pub struct MapRenderer {
    settings: RenderSettings,
}

impl MapRenderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Draws route lines, route labels, stop circles and stop labels, in
    /// that order so later layers stay readable on top of earlier ones.
    pub fn render(&self, data: &MapData) -> Document {
        let routes: Vec<&MapRoute> = data.routes.iter().filter(|r| !r.stops.is_empty()).collect();
        let stops = data.stops();
        let projector = SphereProjector::new(
            stops.iter().map(|stop| stop.coordinates),
            self.settings.width,
            self.settings.height,
            self.settings.padding,
        );

        let mut doc = Document::new();
        self.render_lines(&routes, &projector, &mut doc);
        self.render_route_labels(&routes, &projector, &mut doc);
        self.render_stop_points(&stops, &projector, &mut doc);
        self.render_stop_labels(&stops, &projector, &mut doc);
        doc
    }

    fn route_color(&self, index: usize) -> Color {
        let palette = &self.settings.color_palette;
        if palette.is_empty() {
            return Color::None;
        }
        palette[index % palette.len()].clone()
    }

    fn render_lines(&self, routes: &[&MapRoute], projector: &SphereProjector, doc: &mut Document) {
        for (index, route) in routes.iter().enumerate() {
            let mut line = Polyline::new()
                .stroke(self.route_color(index))
                .fill(Color::None)
                .stroke_width(self.settings.line_width)
                .line_cap(StrokeLineCap::Round)
                .line_join(StrokeLineJoin::Round);

            let outbound = route.stops.iter();
            let back = route.stops.iter().rev().skip(1).filter(|_| !route.is_roundtrip);
            for stop in outbound.chain(back) {
                line = line.point(projector.project(stop.coordinates));
            }
            doc.add(line);
        }
    }

    fn render_route_labels(&self, routes: &[&MapRoute], projector: &SphereProjector, doc: &mut Document) {
        for (index, route) in routes.iter().enumerate() {
            let (Some(first), Some(last)) = (route.stops.first(), route.stops.last()) else {
                continue;
            };
            let mut ends = vec![first];
            if !route.is_roundtrip && first.name != last.name {
                ends.push(last);
            }

            for stop in ends {
                let text = Text::new(projector.project(stop.coordinates), route.name.as_str())
                    .offset(self.settings.bus_label_offset)
                    .font_size(self.settings.bus_label_font_size)
                    .font_family(FONT_FAMILY)
                    .font_weight("bold");
                doc.add(self.underlayer(text.clone()));
                doc.add(text.fill(self.route_color(index)));
            }
        }
    }

    fn render_stop_points(&self, stops: &[&MapStop], projector: &SphereProjector, doc: &mut Document) {
        for stop in stops {
            doc.add(Circle::new(projector.project(stop.coordinates), self.settings.stop_radius).fill("white"));
        }
    }

    fn render_stop_labels(&self, stops: &[&MapStop], projector: &SphereProjector, doc: &mut Document) {
        for stop in stops {
            let text = Text::new(projector.project(stop.coordinates), stop.name.as_str())
                .offset(self.settings.stop_label_offset)
                .font_size(self.settings.stop_label_font_size)
                .font_family(FONT_FAMILY);
            doc.add(self.underlayer(text.clone()));
            doc.add(text.fill("black"));
        }
    }

    fn underlayer(&self, text: Text) -> Text {
        text.fill(self.settings.underlayer_color.clone())
            .stroke(self.settings.underlayer_color.clone())
            .stroke_width(self.settings.underlayer_width)
            .line_cap(StrokeLineCap::Round)
            .line_join(StrokeLineJoin::Round)
    }
}
