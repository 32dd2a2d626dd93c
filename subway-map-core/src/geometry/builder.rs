//! Phase one of a refresh: routings to polylines and per-station sets.

use std::collections::{BTreeMap, BTreeSet};

use geo::{Coord, LineString};
use hashbrown::HashMap;
use itertools::Itertools;
use log::{debug, trace};

use super::path::resolve_path;
use crate::{
    ServiceId, StationId,
    model::{
        Anomaly, DerivedState, Direction, Service, ServiceGeometry, StationSets, TopologyStore,
        split_stop_id,
    },
};

/// Accumulates derived state for one refresh.
///
/// This is the only place station sets are written. [`Self::finish`]
/// consumes the builder and freezes what it collected.
pub struct GeometryBuilder<'a> {
    topology: &'a TopologyStore,
    max_hops: usize,
    stations: HashMap<StationId, StationSets>,
    services: BTreeMap<ServiceId, ServiceGeometry>,
    anomalies: Vec<Anomaly>,
}

impl<'a> GeometryBuilder<'a> {
    pub fn new(topology: &'a TopologyStore, max_hops: usize) -> Self {
        Self {
            topology,
            max_hops,
            stations: HashMap::new(),
            services: BTreeMap::new(),
            anomalies: Vec::new(),
        }
    }

    /// Records stops, polylines and passed-by sets of one service
    pub fn add_service(&mut self, service: &Service) {
        let mut stops = BTreeSet::new();
        let north_routings = self.accept_routings(service, Direction::North, &mut stops);
        let south_routings = self.accept_routings(service, Direction::South, &mut stops);

        let polylines = self.build_geometry(&service.id, &north_routings, &south_routings);
        self.mark_passed(&service.id, &polylines);

        debug!(
            "Service {}: {} polylines, {} stops",
            service.id,
            polylines.len(),
            stops.len()
        );

        self.services.insert(
            service.id.clone(),
            ServiceGeometry {
                id: service.id.clone(),
                display_name: service.display_name.clone(),
                color: service.color.clone(),
                polylines,
                stops,
                north_routings,
                south_routings,
            },
        );
    }

    /// Deduplicated polylines for one service.
    ///
    /// Southbound routings are reversed so every sequence runs north, which
    /// lets a north and south routing over the same stops share a polyline.
    pub fn build_geometry(
        &mut self,
        service: &str,
        north: &[Vec<StationId>],
        south: &[Vec<StationId>],
    ) -> Vec<LineString<f64>> {
        let sequences = north
            .iter()
            .cloned()
            .chain(
                south
                    .iter()
                    .map(|routing| routing.iter().rev().cloned().collect::<Vec<_>>()),
            )
            .unique();

        let mut polylines: Vec<LineString<f64>> = Vec::new();
        for sequence in sequences {
            for line in self.sequence_polylines(service, &sequence) {
                if !polylines.contains(&line) {
                    polylines.push(line);
                }
            }
        }
        polylines
    }

    /// Consumes the builder; anomalies are deduplicated in first-seen order
    pub fn finish(self) -> (DerivedState, Vec<Anomaly>) {
        let anomalies = self.anomalies.into_iter().unique().collect();
        (DerivedState::new(self.stations, self.services), anomalies)
    }

    /// Validates the routings of one direction and records their stops.
    /// Returns the accepted routings as canonical station ids.
    fn accept_routings(
        &mut self,
        service: &Service,
        direction: Direction,
        stops: &mut BTreeSet<StationId>,
    ) -> Vec<Vec<StationId>> {
        let mut accepted = Vec::new();

        for (index, routing) in service.routings.get(direction).iter().enumerate() {
            let consistent = routing.iter().all(|stop_id| {
                split_stop_id(stop_id).is_some_and(|(_, marker)| marker == direction.marker())
            });
            if !consistent {
                self.anomalies.push(Anomaly::MalformedRouting {
                    service: service.id.clone(),
                    direction,
                    index,
                });
                continue;
            }

            let mut sequence: Vec<StationId> = Vec::with_capacity(routing.len());
            for stop_id in routing {
                let Some((station_id, _)) = split_stop_id(stop_id) else {
                    continue;
                };
                if !self.topology.contains(station_id) {
                    self.anomalies.push(Anomaly::MissingStationReference {
                        service: service.id.clone(),
                        stop_id: stop_id.clone(),
                    });
                    continue;
                }
                self.stations
                    .entry_ref(station_id)
                    .or_default()
                    .record_stop(&service.id, direction);
                stops.insert(station_id.to_string());
                sequence.push(station_id.to_string());
            }

            sequence.dedup();
            if !sequence.is_empty() {
                accepted.push(sequence);
            }
        }

        accepted
    }

    /// Polylines of one north-relative stop sequence. A pair with no track
    /// between them ends the current polyline.
    fn sequence_polylines(&mut self, service: &str, sequence: &[StationId]) -> Vec<LineString<f64>> {
        let topology = self.topology;
        let mut lines = Vec::new();
        let mut current: Vec<Coord<f64>> = Vec::new();

        for (from, to) in sequence.iter().tuple_windows() {
            let (Some(from_station), Some(to_station)) =
                (topology.station(from), topology.station(to))
            else {
                continue;
            };
            match resolve_path(topology, from, to, self.max_hops) {
                Some(curve) => {
                    current.push(from_station.coord());
                    current.extend(curve);
                    current.push(to_station.coord());
                }
                None => {
                    trace!("{service}: no track between {from} and {to}");
                    self.anomalies.push(Anomaly::UnresolvablePath {
                        service: service.to_string(),
                        from: from.clone(),
                        to: to.clone(),
                    });
                    flush_polyline(&mut current, &mut lines);
                }
            }
        }

        flush_polyline(&mut current, &mut lines);
        lines
    }

    fn mark_passed(&mut self, service: &str, polylines: &[LineString<f64>]) {
        let topology = self.topology;
        for coord in polylines.iter().flat_map(|line| line.coords()) {
            for station in topology.stations_at(*coord) {
                self.stations
                    .entry_ref(station.id.as_str())
                    .or_default()
                    .passed_by
                    .insert(service.to_string());
            }
        }
    }
}

fn flush_polyline(coords: &mut Vec<Coord<f64>>, lines: &mut Vec<LineString<f64>>) {
    coords.dedup();
    if coords.len() >= 2 {
        lines.push(LineString::new(std::mem::take(coords)));
    } else {
        coords.clear();
    }
}

/// Runs phase one over `services`
pub fn build_derived_state<'s>(
    topology: &TopologyStore,
    services: impl IntoIterator<Item = &'s Service>,
    max_hops: usize,
) -> (DerivedState, Vec<Anomaly>) {
    let mut builder = GeometryBuilder::new(topology, max_hops);
    for service in services {
        builder.add_service(service);
    }
    builder.finish()
}
