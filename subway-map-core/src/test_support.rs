//! Fixtures shared by unit tests

use serde_json::json;

use crate::{
    TopologyStore, create_topology_store,
    loading::RawTopology,
    model::{DirectionalRoutings, Service},
};

pub(crate) fn topology(value: serde_json::Value) -> TopologyStore {
    let stations: RawTopology = serde_json::from_value(value).unwrap();
    create_topology_store(stations, &[]).unwrap()
}

/// `A01 -> B01 -> C01` northbound. `A01 -> B01` has one curve point at
/// (-74.005, 40.705); `B01 -> C01` is straight.
pub(crate) fn linear_topology() -> TopologyStore {
    topology(json!({
        "A01": {"name": "Rector St", "borough": "M", "latitude": 40.70, "longitude": -74.00,
                "north": {"B01": [[-74.005, 40.705]]}},
        "B01": {"name": "Canal St", "borough": "M", "latitude": 40.71, "longitude": -74.00,
                "north": {"C01": []}},
        "C01": {"name": "Court Sq - 23 St", "borough": "Q", "latitude": 40.72, "longitude": -74.00}
    }))
}

pub(crate) fn service(id: &str, north: &[&[&str]], south: &[&[&str]]) -> Service {
    let routings = |list: &[&[&str]]| {
        list.iter()
            .map(|routing| routing.iter().map(|s| (*s).to_string()).collect())
            .collect()
    };
    Service {
        id: id.to_string(),
        display_name: id.to_string(),
        color: "#000000".to_string(),
        routings: DirectionalRoutings {
            north: routings(north),
            south: routings(south),
        },
    }
}

/// Five stations on one line from Brooklyn through Manhattan to the Bronx,
/// plus a Queens branch off `103`.
///
/// ```text
/// 201 (Bk) -> 104 (M) -> 103 (M) -> 102 (M) -> 101 (Bx)
///                          \-> 301 (Q)
/// ```
pub(crate) fn borough_topology() -> TopologyStore {
    topology(json!({
        "101": {"name": "Van Cortlandt Park - 242 St", "borough": "Bx",
                "latitude": 40.889, "longitude": -73.898},
        "102": {"name": "Dyckman St", "borough": "M",
                "latitude": 40.860, "longitude": -73.925, "north": {"101": []}},
        "103": {"name": "Times Sq - 42 St", "borough": "M",
                "latitude": 40.755, "longitude": -73.987,
                "north": {"102": [[-73.95, 40.80]], "301": []}},
        "104": {"name": "Chambers St", "borough": "M",
                "latitude": 40.715, "longitude": -74.009, "north": {"103": []}},
        "201": {"name": "Flatbush Av", "borough": "Bk",
                "latitude": 40.632, "longitude": -73.947, "north": {"104": []}},
        "301": {"name": "Flushing - Main St", "borough": "Q",
                "latitude": 40.759, "longitude": -73.830}
    }))
}
