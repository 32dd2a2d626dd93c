//! Per-refresh derived state
//!
//! Everything here is produced by phase one of a refresh and never modified
//! afterwards; consumers only get shared references.

use std::collections::{BTreeMap, BTreeSet};

use geo::{BoundingRect, LineString, Rect};
use hashbrown::HashMap;

use crate::{ServiceId, StationId, model::Direction};

/// Services stopping at or passing one station
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationSets {
    /// Services departing this station northbound
    pub north_stops: BTreeSet<ServiceId>,
    /// Services departing this station southbound
    pub south_stops: BTreeSet<ServiceId>,
    /// Services stopping here in either direction
    pub through_stops: BTreeSet<ServiceId>,
    /// Services whose drawn line crosses this station, stopping or not
    pub passed_by: BTreeSet<ServiceId>,
}

static EMPTY_SETS: StationSets = StationSets {
    north_stops: BTreeSet::new(),
    south_stops: BTreeSet::new(),
    through_stops: BTreeSet::new(),
    passed_by: BTreeSet::new(),
};

impl StationSets {
    pub fn stops(&self, direction: Direction) -> &BTreeSet<ServiceId> {
        match direction {
            Direction::North => &self.north_stops,
            Direction::South => &self.south_stops,
        }
    }

    pub fn has_service(&self) -> bool {
        !self.through_stops.is_empty()
    }

    pub(crate) fn record_stop(&mut self, service: &str, direction: Direction) {
        let directional = match direction {
            Direction::North => &mut self.north_stops,
            Direction::South => &mut self.south_stops,
        };
        directional.insert(service.to_string());
        self.through_stops.insert(service.to_string());
    }
}

/// Resolved geometry and stop data of one service
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceGeometry {
    pub id: ServiceId,
    pub display_name: String,
    pub color: String,
    /// Deduplicated polylines, each in north-relative order
    pub polylines: Vec<LineString<f64>>,
    /// Stations the service stops at in either direction
    pub stops: BTreeSet<StationId>,
    /// Accepted northbound routings in travel order, as canonical station ids
    pub north_routings: Vec<Vec<StationId>>,
    /// Accepted southbound routings in travel order, as canonical station ids
    pub south_routings: Vec<Vec<StationId>>,
}

impl ServiceGeometry {
    pub fn routings(&self, direction: Direction) -> &[Vec<StationId>] {
        match direction {
            Direction::North => &self.north_routings,
            Direction::South => &self.south_routings,
        }
    }

    /// Bounding rectangle of all polylines, used to frame a selected service
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.polylines
            .iter()
            .filter_map(BoundingRect::bounding_rect)
            .reduce(|acc, rect| {
                Rect::new(
                    geo::coord! {
                        x: acc.min().x.min(rect.min().x),
                        y: acc.min().y.min(rect.min().y),
                    },
                    geo::coord! {
                        x: acc.max().x.max(rect.max().x),
                        y: acc.max().y.max(rect.max().y),
                    },
                )
            })
    }
}

/// Frozen output of the geometry pass
#[derive(Debug, Clone, Default)]
pub struct DerivedState {
    stations: HashMap<StationId, StationSets>,
    services: BTreeMap<ServiceId, ServiceGeometry>,
}

impl DerivedState {
    pub(crate) fn new(
        stations: HashMap<StationId, StationSets>,
        services: BTreeMap<ServiceId, ServiceGeometry>,
    ) -> Self {
        Self { stations, services }
    }

    /// Derived sets of a station; stations no service touches have none
    pub fn station_sets(&self, station: &str) -> Option<&StationSets> {
        self.stations.get(station)
    }

    /// Like [`Self::station_sets`] but with empty sets for untouched stations
    pub fn station_sets_or_empty(&self, station: &str) -> &StationSets {
        self.stations.get(station).unwrap_or(&EMPTY_SETS)
    }

    pub fn service(&self, id: &str) -> Option<&ServiceGeometry> {
        self.services.get(id)
    }

    /// Services in ascending id order
    pub fn services(&self) -> impl Iterator<Item = &ServiceGeometry> {
        self.services.values()
    }

    pub fn service_count(&self) -> usize {
        self.services.len()
    }

    /// Stop set of every service, the input of offset allocation
    pub fn stops_by_service(&self) -> BTreeMap<ServiceId, BTreeSet<StationId>> {
        self.services
            .values()
            .map(|service| (service.id.clone(), service.stops.clone()))
            .collect()
    }

    /// Every station some service touched, in no particular order
    pub fn stations(&self) -> impl Iterator<Item = (&StationId, &StationSets)> {
        self.stations.iter()
    }
}
