//! Track search between two stops of a routing
//!
//! Consecutive stops of an express routing are usually not adjacent in the
//! track graph, so the curve between them is found with a depth-first search
//! over northbound adjacency. A station is entered at most once per call and
//! paths longer than the hop limit are rejected.
//!
//! When several branches reach the target, the first one in store order
//! wins. Uniqueness of the path is not checked.

use fixedbitset::FixedBitSet;
use geo::Coord;
use log::trace;
use petgraph::{graph::NodeIndex, visit::EdgeRef};

use crate::model::{TopologyStore, TrackGraph};

/// Coordinates strictly between `start` and `end` along northbound track.
///
/// Endpoints are not included; `Some(vec![])` means a straight segment.
/// Returns `None` if either station is unknown, `start` has no northbound
/// track, or `end` is not reachable within `max_hops` hops.
pub fn resolve_path(
    topology: &TopologyStore,
    start: &str,
    end: &str,
    max_hops: usize,
) -> Option<Vec<Coord<f64>>> {
    let start = topology.node(start)?;
    let end = topology.node(end)?;
    let graph = topology.graph();
    let mut visited = FixedBitSet::with_capacity(graph.node_count());
    search(graph, start, end, 0, max_hops, &mut visited)
}

fn search(
    graph: &TrackGraph,
    node: NodeIndex,
    target: NodeIndex,
    hops: usize,
    max_hops: usize,
    visited: &mut FixedBitSet,
) -> Option<Vec<Coord<f64>>> {
    if visited.put(node.index()) {
        return None;
    }

    let mut edges: Vec<_> = graph.edges(node).collect();
    if edges.is_empty() {
        trace!("Station {} has no northbound track", graph[node].id);
        return None;
    }

    if let Some(edge) = edges.iter().find(|edge| edge.target() == target) {
        return Some(edge.weight().points.clone());
    }

    // a detour needs at least two more hops
    if hops + 2 > max_hops {
        return None;
    }

    edges.sort_by_key(|edge| edge.target());
    for edge in edges {
        let next = edge.target();
        if let Some(rest) = search(graph, next, target, hops + 1, max_hops, visited) {
            let curve = &edge.weight().points;
            let mut path = Vec::with_capacity(curve.len() + 1 + rest.len());
            path.extend_from_slice(curve);
            path.push(graph[next].coord());
            path.extend(rest);
            return Some(path);
        }
    }

    None
}
