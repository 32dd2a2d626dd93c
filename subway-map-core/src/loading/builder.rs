use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use geo::{Coord, Point};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use super::raw_types::{RawTopology, RawTransfer, RoutingSnapshot};
use crate::{
    Error,
    model::{Station, TopologyStore, TrackCurve},
};

/// Reads the topology file and, if given, the transfers file
///
/// # Errors
///
/// Returns an error if a file cannot be read or parsed, or if the topology
/// is invalid (see [`create_topology_store`]).
pub fn load_topology(
    stations_path: &Path,
    transfers_path: Option<&Path>,
) -> Result<TopologyStore, Error> {
    info!("Loading station topology: {}", stations_path.display());
    let stations: RawTopology = read_json(stations_path)?;
    let transfers = match transfers_path {
        Some(path) => load_transfers(path)?,
        None => Vec::new(),
    };
    create_topology_store(stations, &transfers)
}

/// Reads a transfers file (`[{"from": .., "to": ..}, ...]`)
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_transfers(path: &Path) -> Result<Vec<RawTransfer>, Error> {
    read_json(path)
}

/// Reads one routing snapshot
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_routing_snapshot(path: &Path) -> Result<RoutingSnapshot, Error> {
    read_json(path)
}

/// Builds the topology store from parsed station records and transfer pairs
///
/// Adjacency entries pointing at unknown stations are skipped with a
/// warning. Transfers are recorded on both stations when both exist.
///
/// # Errors
///
/// Returns [`Error::InvalidData`] if there are no stations or a station or
/// curve coordinate is not finite.
pub fn create_topology_store(
    stations: RawTopology,
    transfers: &[RawTransfer],
) -> Result<TopologyStore, Error> {
    if stations.is_empty() {
        return Err(Error::InvalidData(
            "Topology contains no stations".to_string(),
        ));
    }

    let mut store = TopologyStore::with_capacity(stations.len());

    for (id, raw) in &stations {
        if !raw.longitude.is_finite() || !raw.latitude.is_finite() {
            return Err(Error::InvalidData(format!(
                "Station {id} has invalid coordinates ({}, {})",
                raw.longitude, raw.latitude
            )));
        }
        store.add_station(Station {
            id: id.clone(),
            name: raw.name.clone(),
            secondary_name: raw.secondary_name.clone().filter(|name| !name.is_empty()),
            borough: raw.borough.clone(),
            geometry: Point::new(raw.longitude, raw.latitude),
            transfers: Default::default(),
        });
    }

    let mut skipped_tracks = 0;
    for (id, raw) in &stations {
        let Some(from) = store.node(id) else {
            continue;
        };
        for (neighbor, curve) in &raw.adjacency {
            let Some(to) = store.node(neighbor) else {
                warn!("Station {id} lists unknown neighbor {neighbor}, skipping track");
                skipped_tracks += 1;
                continue;
            };
            let points = curve
                .iter()
                .map(|&[x, y]| {
                    if x.is_finite() && y.is_finite() {
                        Ok(Coord { x, y })
                    } else {
                        Err(Error::InvalidData(format!(
                            "Track {id} -> {neighbor} has invalid curve point ({x}, {y})"
                        )))
                    }
                })
                .collect::<Result<Vec<_>, _>>()?;
            store.add_track(from, to, TrackCurve { points });
        }
    }

    let mut recorded = 0;
    for transfer in transfers {
        if store.add_transfer(&transfer.from, &transfer.to) {
            recorded += 1;
        } else {
            debug!(
                "Ignoring transfer {} -> {}: station not in topology",
                transfer.from, transfer.to
            );
        }
    }

    info!(
        "Topology loaded: {} stations, {} tracks ({} skipped), {} transfers",
        store.station_count(),
        store.track_count(),
        skipped_tracks,
        recorded
    );
    Ok(store)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn raw(value: serde_json::Value) -> RawTopology {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_topology_is_rejected() {
        let result = create_topology_store(RawTopology::new(), &[]);
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_unknown_neighbor_is_skipped() {
        let store = create_topology_store(
            raw(json!({
                "A01": {"name": "A", "latitude": 40.0, "longitude": -73.0,
                        "north": {"B01": [], "X99": []}},
                "B01": {"name": "B", "latitude": 40.1, "longitude": -73.0}
            })),
            &[],
        )
        .unwrap();
        assert_eq!(store.track_count(), 1);
        assert!(store.track("A01", "B01").is_some());
    }

    #[test]
    fn test_invalid_curve_point_is_rejected() {
        // serde_json cannot carry NaN, so build the record directly
        let mut stations = raw(json!({
            "A01": {"name": "A", "latitude": 40.0, "longitude": -73.0, "north": {"B01": []}},
            "B01": {"name": "B", "latitude": 40.1, "longitude": -73.0}
        }));
        if let Some(a) = stations.get_mut("A01") {
            a.adjacency.insert("B01".into(), vec![[f64::NAN, 40.05]]);
        }
        assert!(create_topology_store(stations, &[]).is_err());
    }

    #[test]
    fn test_transfers_are_symmetric() {
        let store = create_topology_store(
            raw(json!({
                "A01": {"name": "A", "latitude": 40.0, "longitude": -73.0},
                "B01": {"name": "B", "latitude": 40.1, "longitude": -73.0}
            })),
            &[
                RawTransfer {
                    from: "A01".into(),
                    to: "B01".into(),
                },
                RawTransfer {
                    from: "A01".into(),
                    to: "X99".into(),
                },
            ],
        )
        .unwrap();
        assert!(store.station("A01").unwrap().transfers.contains("B01"));
        assert!(store.station("B01").unwrap().transfers.contains("A01"));
        assert_eq!(store.station("A01").unwrap().transfers.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_routing_snapshot(Path::new("/nonexistent/routes.json"));
        assert!(matches!(result, Err(Error::IoError(_))));
    }
}
