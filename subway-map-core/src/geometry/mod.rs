//! Route geometry: track search between stops and per-service polylines.

mod builder;
mod path;

pub use builder::{GeometryBuilder, build_derived_state};
pub use path::resolve_path;
