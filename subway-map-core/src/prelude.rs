pub use crate::MAX_PATH_HOPS;

// Re-export key components
pub use crate::algo::{
    OffsetAssignment, StationDetails, StopIcon, assign_offsets, classify, station_details,
};
pub use crate::export::{Selection, lines_to_geojson, stops_to_geojson};
pub use crate::geometry::resolve_path;
pub use crate::loading::{
    MapConfig, RoutingSnapshot, create_topology_store, load_routing_snapshot, load_topology,
};
pub use crate::model::{
    Anomaly, DerivedState, Direction, NetworkSnapshot, Service, ServiceGeometry, Station,
    StationSets, TopologyStore,
};
pub use crate::refresh::{MapState, RefreshOutcome, build_snapshot};

// Core identifier types
pub use crate::OffsetIndex;
pub use crate::ServiceId;
pub use crate::StationId;
pub use crate::error::Error;
