//! Direction labels and destinations for the station detail view
//!
//! For one station and direction, every routing passing through the station
//! is walked past it. Its terminal becomes a destination and the boroughs of
//! the remaining stops make up the label ("Uptown & The Bronx"). Inside the
//! configured boroughs, a following stop in the same borough adds "Uptown"
//! or "Downtown" by latitude.

use std::collections::BTreeSet;

use itertools::Itertools;
use serde::Serialize;

use crate::{
    Error, ServiceId, StationId,
    loading::DirectionConfig,
    model::{DerivedState, Direction, Station, TopologyStore},
};

/// A routing terminal reachable from a station
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Destination {
    pub station_id: StationId,
    pub name: String,
}

/// One direction of a station detail view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectionSummary {
    pub direction: Direction,
    /// `None` when nothing lies past the station or the direction is
    /// configured to go unlabelled
    pub label: Option<String>,
    /// Sorted by station name
    pub destinations: Vec<Destination>,
    /// Services stopping here in this direction, sorted by id
    pub services: Vec<ServiceId>,
}

/// A routing through the station, from the stop after it onwards
struct Walk<'a> {
    remaining: &'a [StationId],
    terminal: &'a StationId,
    reversed: bool,
}

pub struct DirectionResolver<'a> {
    topology: &'a TopologyStore,
    derived: &'a DerivedState,
    config: &'a DirectionConfig,
}

impl<'a> DirectionResolver<'a> {
    pub fn new(
        topology: &'a TopologyStore,
        derived: &'a DerivedState,
        config: &'a DirectionConfig,
    ) -> Self {
        Self {
            topology,
            derived,
            config,
        }
    }

    /// Label, destinations and services of `station_id` towards `direction`
    ///
    /// # Errors
    ///
    /// Returns [`Error::StationNotFound`] for an id missing from the topology.
    pub fn resolve(&self, station_id: &str, direction: Direction) -> Result<DirectionSummary, Error> {
        let station = self
            .topology
            .station(station_id)
            .ok_or_else(|| Error::StationNotFound(station_id.to_string()))?;
        let walks = self.walks(station_id, direction);

        Ok(DirectionSummary {
            direction,
            label: self.label(station, direction, &walks),
            destinations: self.destinations(&walks),
            services: self.services(station_id, direction),
        })
    }

    /// Services stopping at `station_id` towards `direction`. The reversed
    /// service is listed under the direction it actually travels.
    pub fn services(&self, station_id: &str, direction: Direction) -> Vec<ServiceId> {
        let sets = self.derived.station_sets_or_empty(station_id);
        let mut services: BTreeSet<ServiceId> = sets.stops(direction).clone();
        if let Some(rule) = &self.config.reversed_service
            && rule.stations.contains(station_id)
        {
            services.remove(&rule.service);
            if sets.stops(direction.opposite()).contains(&rule.service) {
                services.insert(rule.service.clone());
            }
        }
        services.into_iter().collect()
    }

    /// Routings through the station, reversed service last
    fn walks(&self, station_id: &str, direction: Direction) -> Vec<Walk<'a>> {
        let derived: &'a DerivedState = self.derived;
        let mut walks: Vec<Walk<'a>> = Vec::new();
        for service in derived.services() {
            let reversed = self.config.is_reversed(&service.id, station_id);
            let feed_direction = if reversed {
                direction.opposite()
            } else {
                direction
            };
            for routing in service.routings(feed_direction) {
                let Some(position) = routing.iter().position(|stop| stop == station_id) else {
                    continue;
                };
                let Some(terminal) = routing.last() else {
                    continue;
                };
                walks.push(Walk {
                    remaining: &routing[position + 1..],
                    terminal,
                    reversed,
                });
            }
        }
        walks.sort_by_key(|walk| walk.reversed);
        walks
    }

    fn label(&self, station: &Station, direction: Direction, walks: &[Walk<'_>]) -> Option<String> {
        if direction == Direction::South && self.config.exempt_from_south_label.contains(&station.id) {
            return None;
        }

        let latitude_labels = self.config.uptown_downtown_boroughs.contains(&station.borough)
            && !self.config.exempt_from_uptown_downtown.contains(&station.id);

        let mut vertical = None;
        let mut boroughs: Vec<&str> = Vec::new();
        for walk in walks {
            for next in walk
                .remaining
                .iter()
                .filter_map(|id| self.topology.station(id))
            {
                if next.borough != station.borough {
                    if !boroughs.contains(&next.borough.as_str()) {
                        boroughs.push(&next.borough);
                    }
                } else if latitude_labels && !walk.reversed {
                    match direction {
                        Direction::North if next.latitude() > station.latitude() => {
                            vertical = Some("Uptown");
                        }
                        Direction::South if next.latitude() < station.latitude() => {
                            vertical = Some("Downtown");
                        }
                        _ => {}
                    }
                }
            }
        }

        let parts: Vec<&str> = vertical
            .into_iter()
            .chain(boroughs.into_iter().map(|code| self.config.borough_name(code)))
            .collect();
        join_labels(&parts)
    }

    fn destinations(&self, walks: &[Walk<'_>]) -> Vec<Destination> {
        walks
            .iter()
            .map(|walk| walk.terminal)
            .unique()
            .filter_map(|id| self.topology.station(id))
            .sorted_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)))
            .map(|station| Destination {
                station_id: station.id.clone(),
                name: station.display_name(),
            })
            .collect()
    }
}

/// Joins label parts as `X, Y & Z`; `None` if there are none
pub fn join_labels<S: AsRef<str>>(parts: &[S]) -> Option<String> {
    match parts {
        [] => None,
        [only] => Some(only.as_ref().to_string()),
        [rest @ .., last] => Some(format!(
            "{} & {}",
            rest.iter().map(AsRef::as_ref).join(", "),
            last.as_ref()
        )),
    }
}
