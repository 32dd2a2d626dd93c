use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{Error, MAX_PATH_HOPS, OffsetIndex, ServiceId, StationId};

/// Engine configuration
///
/// Every field has a default matching the New York City subway data the map
/// was first built for, so an empty TOML table is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Order in which services receive lateral offsets. Services missing from
    /// the list are allocated afterwards in ascending id order.
    pub service_priority: Vec<ServiceId>,
    /// Hop limit for track search between two consecutive stops
    pub max_path_hops: usize,
    pub offset_table: OffsetTable,
    pub directions: DirectionConfig,
    pub opacity: OpacityConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            service_priority: [
                "2", "3", "1", "4", "5", "6", "6X", "7", "7X", "A", "C", "E", "F", "FX", "D", "B",
                "M", "J", "Z", "R", "N", "Q", "W", "G", "H", "FS", "GS", "L", "SI",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            max_path_hops: MAX_PATH_HOPS,
            offset_table: OffsetTable::default(),
            directions: DirectionConfig::default(),
            opacity: OpacityConfig::default(),
        }
    }
}

impl MapConfig {
    /// Rejects configurations the engine cannot work with
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] for an empty offset table or a zero hop
    /// limit.
    pub fn validate(&self) -> Result<(), Error> {
        if self.offset_table.is_empty() {
            return Err(Error::InvalidData(
                "Offset table must contain at least one entry".to_string(),
            ));
        }
        if self.max_path_hops == 0 {
            return Err(Error::InvalidData(
                "max_path_hops must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Zoom level and pixel displacement at that zoom
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomStop(pub f64, pub f64);

/// Zoom-dependent lateral displacement of a line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LateralOffset {
    pub stops: Vec<ZoomStop>,
}

impl LateralOffset {
    fn symmetric(step: f64) -> Self {
        Self {
            stops: vec![
                ZoomStop(8.0, step),
                ZoomStop(14.0, step * 2.0),
                ZoomStop(16.0, step * 3.0),
            ],
        }
    }
}

/// Offset index -> lateral displacement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OffsetTable(pub Vec<LateralOffset>);

impl Default for OffsetTable {
    fn default() -> Self {
        // centre, then alternating left/right at growing distance
        Self(
            [0.0, -2.0, 2.0, -4.0, 4.0, -6.0, 6.0]
                .into_iter()
                .map(LateralOffset::symmetric)
                .collect(),
        )
    }
}

impl OffsetTable {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Displacement for an offset index. Indices past the end wrap around.
    pub fn get(&self, index: OffsetIndex) -> Option<&LateralOffset> {
        if self.0.is_empty() {
            return None;
        }
        self.0.get(index % self.0.len())
    }
}

/// A service whose feed direction is reversed at some stations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReversedService {
    pub service: ServiceId,
    pub stations: BTreeSet<StationId>,
}

/// Rules for station detail direction labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionConfig {
    /// Boroughs where staying in the borough is labelled Uptown / Downtown
    pub uptown_downtown_boroughs: BTreeSet<String>,
    /// Stations where latitude gives misleading Uptown / Downtown labels
    pub exempt_from_uptown_downtown: BTreeSet<StationId>,
    /// Stations that get no southbound label at all
    pub exempt_from_south_label: BTreeSet<StationId>,
    pub reversed_service: Option<ReversedService>,
    /// Borough code -> display name
    pub borough_names: BTreeMap<String, String>,
}

fn string_set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl Default for DirectionConfig {
    fn default() -> Self {
        Self {
            uptown_downtown_boroughs: string_set(&["M", "Bx"]),
            exempt_from_uptown_downtown: string_set(&[
                "901", "902", "723", "724", "725", "726", "L06", "L05", "L03", "L02", "L01",
            ]),
            exempt_from_south_label: string_set(&["M18"]),
            // M trains run reversed between Essex St and Myrtle Av to line up with J/Z
            reversed_service: Some(ReversedService {
                service: "M".to_string(),
                stations: string_set(&[
                    "M21", "M20", "M19", "M18", "M16", "M14", "M13", "M12", "M11",
                ]),
            }),
            borough_names: [
                ("M", "Manhattan"),
                ("Bx", "The Bronx"),
                ("Bk", "Brooklyn"),
                ("Q", "Queens"),
                ("SI", "Staten Island"),
            ]
            .into_iter()
            .map(|(code, name)| (code.to_string(), name.to_string()))
            .collect(),
        }
    }
}

impl DirectionConfig {
    /// True if `service` runs opposite to its feed direction at `station`
    pub fn is_reversed(&self, service: &str, station: &str) -> bool {
        self.reversed_service
            .as_ref()
            .is_some_and(|rule| rule.service == service && rule.stations.contains(station))
    }

    pub fn borough_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.borough_names.get(code).map_or(code, String::as_str)
    }
}

/// Opacity hints for the render adapter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpacityConfig {
    pub line_selected: f64,
    pub line_dimmed: f64,
    pub stop_selected: f64,
    pub stop_dimmed: f64,
}

impl Default for OpacityConfig {
    fn default() -> Self {
        Self {
            line_selected: 1.0,
            line_dimmed: 0.1,
            stop_selected: 1.0,
            stop_dimmed: 0.3,
        }
    }
}
