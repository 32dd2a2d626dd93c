//! Render output: GeoJSON feature collections for lines and stop markers.

mod to_geojson;

use crate::{ServiceId, StationId};

pub use to_geojson::{lines_to_geojson, stops_to_geojson};

/// What the viewer currently has selected; drives opacity hints and the
/// icon mode of stop markers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Service(ServiceId),
    Station(StationId),
}

impl Selection {
    pub fn service(&self) -> Option<&str> {
        match self {
            Selection::Service(id) => Some(id.as_str()),
            _ => None,
        }
    }
}
