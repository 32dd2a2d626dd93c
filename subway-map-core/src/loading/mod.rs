//! Loading of topology and routing snapshot inputs and engine configuration.

mod builder;
mod config;
mod raw_types;

pub use builder::{create_topology_store, load_routing_snapshot, load_topology, load_transfers};
pub use config::{
    DirectionConfig, LateralOffset, MapConfig, OffsetTable, OpacityConfig, ReversedService,
    ZoomStop,
};
pub use raw_types::{RawService, RawStation, RawTopology, RawTransfer, RoutingSnapshot};
