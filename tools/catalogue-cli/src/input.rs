use std::collections::BTreeMap;

use serde::Deserialize;
use transport_catalogue::prelude::*;

/// Top-level request document
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RequestDocument {
    pub base_requests: Vec<BaseRequest>,
    pub render_settings: Option<RenderSettings>,
    pub routing_settings: Option<RoutingSettings>,
    pub stat_requests: Vec<StatRequest>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum BaseRequest {
    Stop {
        name: String,
        latitude: f64,
        longitude: f64,
        #[serde(default)]
        road_distances: BTreeMap<String, f64>,
    },
    Bus {
        name: String,
        stops: Vec<String>,
        is_roundtrip: bool,
    },
}

impl From<BaseRequest> for LoadRecord {
    fn from(request: BaseRequest) -> Self {
        match request {
            BaseRequest::Stop {
                name,
                latitude,
                longitude,
                road_distances,
            } => LoadRecord::Stop {
                name,
                coordinates: Coordinates::new(latitude, longitude),
                road_distances: road_distances.into_iter().collect(),
            },
            BaseRequest::Bus {
                name,
                stops,
                is_roundtrip,
            } => LoadRecord::Bus {
                name,
                stops,
                is_roundtrip,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum StatRequest {
    Stop { id: i64, name: String },
    Bus { id: i64, name: String },
    Route { id: i64, from: String, to: String },
    Map { id: i64 },
}

impl StatRequest {
    pub fn id(&self) -> i64 {
        match self {
            Self::Stop { id, .. } | Self::Bus { id, .. } | Self::Route { id, .. } | Self::Map { id } => *id,
        }
    }

    pub fn query(&self) -> Query {
        match self {
            Self::Stop { name, .. } => Query::Stop { name: name.clone() },
            Self::Bus { name, .. } => Query::Bus { name: name.clone() },
            Self::Route { from, to, .. } => Query::Route {
                from: from.clone(),
                to: to.clone(),
            },
            Self::Map { .. } => Query::Map,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use transport_catalogue::render::svg::{Color, Point};

    #[test]
    fn test_parse_document() {
        let doc: RequestDocument = serde_json::from_str(
            r#"{
                "base_requests": [
                    {"type": "Bus", "name": "114", "stops": ["Morskoy vokzal", "Rivierskiy most"], "is_roundtrip": false},
                    {"type": "Stop", "name": "Rivierskiy most", "latitude": 43.587795, "longitude": 39.716901,
                     "road_distances": {"Morskoy vokzal": 850}},
                    {"type": "Stop", "name": "Morskoy vokzal", "latitude": 43.581969, "longitude": 39.719848}
                ],
                "routing_settings": {"bus_wait_time": 2, "bus_velocity": 30},
                "render_settings": {
                    "width": 600, "height": 400, "padding": 50,
                    "bus_label_offset": [7, 15],
                    "underlayer_color": [255, 255, 255, 0.85],
                    "color_palette": ["green", [255, 160, 0], "red"]
                },
                "stat_requests": [
                    {"id": 1, "type": "Stop", "name": "Rivierskiy most"},
                    {"id": 2, "type": "Route", "from": "Morskoy vokzal", "to": "Rivierskiy most"},
                    {"id": 3, "type": "Map"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(doc.base_requests.len(), 3);
        assert_eq!(doc.routing_settings, Some(RoutingSettings::new(2.0, 30.0)));

        let render = doc.render_settings.unwrap();
        assert_eq!(render.width, 600.0);
        assert_eq!(render.bus_label_offset, Point::new(7.0, 15.0));
        assert_eq!(render.underlayer_color, Color::Rgba(255, 255, 255, 0.85));
        assert_eq!(render.color_palette[1], Color::Rgb(255, 160, 0));
        // omitted keys keep their defaults
        assert_eq!(render.stop_radius, RenderSettings::default().stop_radius);

        let ids: Vec<i64> = doc.stat_requests.iter().map(StatRequest::id).collect();
        assert_eq!(ids, [1, 2, 3]);
        assert_eq!(doc.stat_requests[2].query(), Query::Map);
    }

    #[test]
    fn test_stop_record() {
        let request: BaseRequest = serde_json::from_str(
            r#"{"type": "Stop", "name": "A", "latitude": 1.5, "longitude": 2.5, "road_distances": {"B": 100}}"#,
        )
        .unwrap();

        assert_eq!(
            LoadRecord::from(request),
            LoadRecord::Stop {
                name: "A".into(),
                coordinates: Coordinates::new(1.5, 2.5),
                road_distances: vec![("B".into(), 100.0)],
            }
        );
    }

    #[test]
    fn test_rejects_unknown_type() {
        let result = serde_json::from_str::<StatRequest>(r#"{"id": 1, "type": "Train"}"#);
        assert!(result.is_err());
    }
}
