//! Static station graph
//!
//! Stations are graph nodes and northbound track segments are edges; each
//! edge carries the intermediate shape coordinates between its two stations.
//! The store is built once at startup and only read afterwards.

use std::collections::BTreeSet;

use geo::{Coord, Point};
use hashbrown::HashMap;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::StationId;

/// Station node
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub secondary_name: Option<String>,
    /// Borough code as it appears in the topology data (`M`, `Bk`, ...)
    pub borough: String,
    /// Station coordinates (lon, lat)
    pub geometry: Point<f64>,
    /// Stations reachable through an in-system transfer
    pub transfers: BTreeSet<StationId>,
}

impl Station {
    /// Name with ` - ` separators rendered as an en dash
    pub fn display_name(&self) -> String {
        self.name.replace(" - ", "–")
    }

    pub fn coord(&self) -> Coord<f64> {
        self.geometry.into()
    }

    pub fn latitude(&self) -> f64 {
        self.geometry.y()
    }
}

/// Northbound track between two adjacent stations.
///
/// `points` holds intermediate shape coordinates only. An empty curve is a
/// straight segment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackCurve {
    pub points: Vec<Coord<f64>>,
}

pub type TrackGraph = DiGraph<Station, TrackCurve>;

type LocationKey = (u64, u64);

// Polylines reuse station coordinates verbatim, so exact bit equality is the
// right notion of "at this station".
fn location_key(coord: Coord<f64>) -> LocationKey {
    // + 0.0 folds -0.0 into 0.0
    ((coord.x + 0.0).to_bits(), (coord.y + 0.0).to_bits())
}

/// Canonical station records and track adjacency
#[derive(Debug, Clone, Default)]
pub struct TopologyStore {
    graph: TrackGraph,
    index: HashMap<StationId, NodeIndex>,
    locations: HashMap<LocationKey, Vec<NodeIndex>>,
}

impl TopologyStore {
    pub(crate) fn with_capacity(stations: usize) -> Self {
        Self {
            graph: TrackGraph::with_capacity(stations, stations * 2),
            index: HashMap::with_capacity(stations),
            locations: HashMap::with_capacity(stations),
        }
    }

    /// Adds a station and registers it at its location for passed-by lookups
    pub(crate) fn add_station(&mut self, station: Station) -> NodeIndex {
        let key = location_key(station.coord());
        let id = station.id.clone();
        let node = self.graph.add_node(station);
        self.index.insert(id, node);
        let shared = self.locations.entry(key).or_default();
        if let Some(&first) = shared.first() {
            log::debug!(
                "Stations {} and {} share a location",
                self.graph[first].id,
                self.graph[node].id
            );
        }
        shared.push(node);
        node
    }

    pub(crate) fn add_track(&mut self, from: NodeIndex, to: NodeIndex, curve: TrackCurve) {
        self.graph.add_edge(from, to, curve);
    }

    /// Records an unordered transfer between two known stations
    pub(crate) fn add_transfer(&mut self, from: &str, to: &str) -> bool {
        let (Some(&a), Some(&b)) = (self.index.get(from), self.index.get(to)) else {
            return false;
        };
        if a == b {
            return false;
        }
        self.graph[a].transfers.insert(to.to_string());
        self.graph[b].transfers.insert(from.to_string());
        true
    }

    pub fn station(&self, id: &str) -> Option<&Station> {
        self.index.get(id).map(|&node| &self.graph[node])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Every station located exactly at `coord`
    pub fn stations_at(&self, coord: Coord<f64>) -> impl Iterator<Item = &Station> {
        self.locations
            .get(&location_key(coord))
            .into_iter()
            .flatten()
            .map(|&node| &self.graph[node])
    }

    /// All stations in insertion order (ascending id when loaded from a file)
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.graph.node_weights()
    }

    /// Curve of the direct northbound track `from -> to`
    pub fn track(&self, from: &str, to: &str) -> Option<&TrackCurve> {
        let from = *self.index.get(from)?;
        let to = *self.index.get(to)?;
        self.graph
            .find_edge(from, to)
            .map(|edge| &self.graph[edge])
    }

    pub fn station_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn track_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub(crate) fn node(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    pub(crate) fn graph(&self) -> &TrackGraph {
        &self.graph
    }
}
