//! Station detail view: both directions plus transfers

use serde::Serialize;

use super::{
    classify::StopIcon,
    direction::{DirectionResolver, DirectionSummary},
};
use crate::{
    Error, ServiceId, StationId,
    loading::DirectionConfig,
    model::{Direction, NetworkSnapshot, TopologyStore},
};

/// A station reachable by in-system transfer, with what serves it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferDetails {
    pub station_id: StationId,
    pub name: String,
    pub north_services: Vec<ServiceId>,
    pub south_services: Vec<ServiceId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationDetails {
    pub id: StationId,
    pub name: String,
    pub secondary_name: Option<String>,
    /// Borough display name
    pub borough: String,
    /// `[lon, lat]`
    pub coordinates: [f64; 2],
    pub icon: StopIcon,
    pub north: DirectionSummary,
    pub south: DirectionSummary,
    /// Sorted by transfer station id
    pub transfers: Vec<TransferDetails>,
}

/// Everything the detail view shows for `station_id`
///
/// # Errors
///
/// Returns [`Error::StationNotFound`] if the station is not in the topology.
pub fn station_details(
    topology: &TopologyStore,
    snapshot: &NetworkSnapshot,
    directions: &DirectionConfig,
    station_id: &str,
) -> Result<StationDetails, Error> {
    let station = topology
        .station(station_id)
        .ok_or_else(|| Error::StationNotFound(station_id.to_string()))?;
    let resolver = DirectionResolver::new(topology, snapshot.derived(), directions);

    let transfers = station
        .transfers
        .iter()
        .filter_map(|id| topology.station(id))
        .map(|transfer| TransferDetails {
            station_id: transfer.id.clone(),
            name: transfer.display_name(),
            north_services: resolver.services(&transfer.id, Direction::North),
            south_services: resolver.services(&transfer.id, Direction::South),
        })
        .collect();

    Ok(StationDetails {
        id: station.id.clone(),
        name: station.display_name(),
        secondary_name: station.secondary_name.clone(),
        borough: directions.borough_name(&station.borough).to_string(),
        coordinates: [station.geometry.x(), station.geometry.y()],
        icon: snapshot.classify(station_id, None),
        north: resolver.resolve(station_id, Direction::North)?,
        south: resolver.resolve(station_id, Direction::South)?,
        transfers,
    })
}
