//! Immutable result of one refresh

use crate::{
    OffsetIndex,
    algo::{OffsetAssignment, StopIcon, classify},
    model::{Anomaly, DerivedState},
};

#[derive(Debug, Clone, Default)]
pub struct NetworkSnapshot {
    checksum: Option<String>,
    derived: DerivedState,
    offsets: OffsetAssignment,
    anomalies: Vec<Anomaly>,
}

impl NetworkSnapshot {
    pub(crate) fn new(
        checksum: String,
        derived: DerivedState,
        offsets: OffsetAssignment,
        anomalies: Vec<Anomaly>,
    ) -> Self {
        Self {
            checksum: Some(checksum),
            derived,
            offsets,
            anomalies,
        }
    }

    /// Checksum of the routing snapshot this was built from; `None` before
    /// the first refresh
    pub fn checksum(&self) -> Option<&str> {
        self.checksum.as_deref()
    }

    pub fn derived(&self) -> &DerivedState {
        &self.derived
    }

    pub fn offsets(&self) -> &OffsetAssignment {
        &self.offsets
    }

    pub fn offset_of(&self, service: &str) -> Option<OffsetIndex> {
        self.offsets.get(service)
    }

    pub fn anomalies(&self) -> &[Anomaly] {
        &self.anomalies
    }

    /// Icon category of a station, optionally filtered to one service
    pub fn classify(&self, station: &str, selected_service: Option<&str>) -> StopIcon {
        classify(self.derived.station_sets_or_empty(station), selected_service)
    }
}
