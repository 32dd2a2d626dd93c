//! Route geometry and stop classification for a live transit map.
//!
//! The crate takes a static station topology (stations, northbound track
//! adjacency with curve hints, transfers) and periodic routing snapshots, and
//! derives everything a map renderer needs:
//!
//! - deduplicated polylines per service that follow the track between stops,
//! - a lateral draw offset per service so lines sharing stops do not overlap,
//! - an icon category per station describing which directions stop there,
//! - direction labels and destinations for a station detail view.
//!
//! A refresh runs in two phases. Phase one walks every service and fills a
//! fresh set of per-station derived sets; phase two allocates offsets from
//! the finished sets. The result is an immutable [`NetworkSnapshot`] that
//! [`MapState`] swaps in whole.

pub mod algo;
pub mod error;
pub mod export;
pub mod geometry;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod refresh;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::Error;
pub use loading::{
    MapConfig, RoutingSnapshot, create_topology_store, load_routing_snapshot, load_topology,
};
pub use model::{Direction, NetworkSnapshot, Station, TopologyStore};
pub use refresh::{MapState, RefreshOutcome, build_snapshot};

/// Canonical station id (a feed stop id without its direction marker)
pub type StationId = String;

/// Service (line) id, e.g. `"A"` or `"6X"`
pub type ServiceId = String;

/// Index into the lateral offset table
pub type OffsetIndex = usize;

/// Default hop limit when searching track between two consecutive stops
pub const MAX_PATH_HOPS: usize = 12;
