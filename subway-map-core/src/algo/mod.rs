//! Algorithms over a finished geometry pass: offsets, stop icons and the
//! station detail view.

mod classify;
mod details;
mod direction;
mod offsets;

pub use classify::{StopIcon, classify};
pub use details::{StationDetails, TransferDetails, station_details};
pub use direction::{Destination, DirectionResolver, DirectionSummary, join_labels};
pub use offsets::{OffsetAssignment, assign_offsets};
