use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    ServiceId, StationId,
    model::{DirectionalRoutings, Service},
};

/// Station record of the topology file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStation {
    pub name: String,
    #[serde(default)]
    pub secondary_name: Option<String>,
    #[serde(default)]
    pub borough: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Northbound neighbor -> intermediate `[lon, lat]` curve points
    #[serde(default, alias = "north")]
    pub adjacency: BTreeMap<StationId, Vec<[f64; 2]>>,
}

/// Topology file contents: station id -> station record
pub type RawTopology = BTreeMap<StationId, RawStation>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransfer {
    pub from: StationId,
    pub to: StationId,
}

/// Service entry of a routing snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawService {
    pub color: String,
    #[serde(alias = "name")]
    pub display_name: String,
    pub routings: DirectionalRoutings,
}

/// Periodic routing feed: a checksum plus the current routings per service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingSnapshot {
    pub checksum: String,
    #[serde(alias = "routes")]
    pub services: BTreeMap<ServiceId, RawService>,
}

impl RoutingSnapshot {
    /// Services in ascending id order. A missing display name falls back to
    /// the service id.
    pub fn services(&self) -> impl Iterator<Item = Service> + '_ {
        self.services.iter().map(|(id, raw)| Service {
            id: id.clone(),
            display_name: if raw.display_name.is_empty() {
                id.clone()
            } else {
                raw.display_name.clone()
            },
            color: raw.color.clone(),
            routings: raw.routings.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Direction;

    #[test]
    fn test_station_accepts_north_alias() {
        let station: RawStation = serde_json::from_str(
            r#"{
                "name": "Inwood - 207 St",
                "borough": "M",
                "latitude": 40.868072,
                "longitude": -73.919899,
                "north": {}
            }"#,
        )
        .unwrap();
        assert!(station.adjacency.is_empty());
        assert_eq!(station.secondary_name, None);
    }

    #[test]
    fn test_snapshot_accepts_routes_alias() {
        let snapshot: RoutingSnapshot = serde_json::from_str(
            r##"{
                "checksum": "abc",
                "routes": {
                    "A": {
                        "color": "#0039a6",
                        "name": "A",
                        "routings": {"north": [["A02N", "A03N"]], "south": []}
                    },
                    "H": {"color": "#808183", "routings": {}}
                }
            }"##,
        )
        .unwrap();
        let services: Vec<Service> = snapshot.services().collect();
        assert_eq!(services.len(), 2);
        assert_eq!(services[0].routings.get(Direction::North).len(), 1);
        assert_eq!(services[1].display_name, "H");
    }
}
