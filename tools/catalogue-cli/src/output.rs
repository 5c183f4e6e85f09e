use serde_json::{json, Value};
use transport_catalogue::prelude::*;

const NOT_FOUND: &str = "not found";

fn not_found(id: i64) -> Value {
    json!({ "request_id": id, "error_message": NOT_FOUND })
}

pub fn response_to_json(id: i64, response: &Response) -> Value {
    match response {
        Response::Stop(buses) if buses.is_unknown() => not_found(id),
        Response::Stop(buses) => {
            let names: Vec<&str> = buses.names().iter().map(BusName::as_str).collect();
            json!({ "request_id": id, "buses": names })
        }
        Response::Bus(None) | Response::Route(None) | Response::Map(None) => not_found(id),
        Response::Bus(Some(stat)) => json!({
            "request_id": id,
            "curvature": stat.curvature,
            "route_length": stat.route_length,
            "stop_count": stat.stop_count,
            "unique_stop_count": stat.unique_stop_count,
        }),
        Response::Route(Some(itinerary)) => json!({
            "request_id": id,
            "total_time": itinerary.total_time,
            "items": itinerary.steps.iter().map(step_to_json).collect::<Vec<_>>(),
        }),
        Response::Map(Some(svg)) => json!({ "request_id": id, "map": svg }),
    }
}

fn step_to_json(step: &Step) -> Value {
    match step {
        Step::Wait { stop, minutes } => json!({
            "type": "Wait",
            "stop_name": stop.as_str(),
            "time": minutes,
        }),
        Step::Ride {
            bus,
            span_count,
            minutes,
        } => json!({
            "type": "Bus",
            "bus": bus.as_str(),
            "span_count": span_count,
            "time": minutes,
        }),
    }
}
