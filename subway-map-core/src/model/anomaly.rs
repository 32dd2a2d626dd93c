//! Non-fatal data problems met while building a snapshot.
//!
//! None of these abort a refresh; the affected stop, routing or segment is
//! left out and the anomaly is recorded on the snapshot and logged.

use thiserror::Error;

use crate::{OffsetIndex, ServiceId, StationId, model::Direction};

#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum Anomaly {
    #[error("{service}: stop {stop_id} is not in the topology")]
    MissingStationReference { service: ServiceId, stop_id: String },
    #[error("{service}: {direction:?} routing #{index} mixes direction markers")]
    MalformedRouting {
        service: ServiceId,
        direction: Direction,
        index: usize,
    },
    #[error("{service}: no track found from {from} to {to}")]
    UnresolvablePath {
        service: ServiceId,
        from: StationId,
        to: StationId,
    },
    #[error("{service}: offset {offset} is past the end of the offset table")]
    OffsetTableExhaustion {
        service: ServiceId,
        offset: OffsetIndex,
    },
}
