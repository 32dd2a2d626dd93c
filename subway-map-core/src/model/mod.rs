//! Data model for the transit map
//!
//! Static topology owned for the process lifetime, services as reported by a
//! routing snapshot, and the derived state rebuilt on every refresh.

pub mod anomaly;
pub mod derived;
pub mod service;
pub mod snapshot;
pub mod topology;

pub use anomaly::Anomaly;
pub use derived::{DerivedState, ServiceGeometry, StationSets};
pub use service::{Direction, DirectionalRoutings, Service, split_stop_id};
pub use snapshot::NetworkSnapshot;
pub use topology::{Station, TopologyStore, TrackCurve, TrackGraph};
