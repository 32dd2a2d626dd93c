//! Lateral offset allocation
//!
//! Greedy coloring over the "shares a stop" relation: services are visited
//! in priority order and each takes the lowest offset no earlier service
//! sharing one of its stops holds. Offsets are only ever compared, never
//! reassigned, so one pass is enough.

use std::collections::{BTreeMap, BTreeSet};

use hashbrown::{HashMap, HashSet};
use itertools::Itertools;
use log::trace;

use crate::{OffsetIndex, ServiceId, StationId};

/// Offset index of every service in one snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OffsetAssignment {
    offsets: BTreeMap<ServiceId, OffsetIndex>,
}

impl OffsetAssignment {
    pub fn get(&self, service: &str) -> Option<OffsetIndex> {
        self.offsets.get(service).copied()
    }

    /// Services with their offsets, in ascending service id order
    pub fn iter(&self) -> impl Iterator<Item = (&ServiceId, OffsetIndex)> {
        self.offsets.iter().map(|(service, &offset)| (service, offset))
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Largest assigned offset, `None` if nothing was assigned
    pub fn max_offset(&self) -> Option<OffsetIndex> {
        self.offsets.values().copied().max()
    }
}

/// Assigns an offset to every service in `stops_by_service`.
///
/// Services listed in `priority` go first, in list order; ids in the list
/// with no entry in `stops_by_service` are ignored. The rest follow in
/// ascending id order. Two services sharing a stop never get the same
/// offset. A service with no stops gets offset 0.
pub fn assign_offsets(
    stops_by_service: &BTreeMap<ServiceId, BTreeSet<StationId>>,
    priority: &[ServiceId],
) -> OffsetAssignment {
    let prioritized: Vec<&ServiceId> = priority
        .iter()
        .filter(|service| stops_by_service.contains_key(*service))
        .unique()
        .collect();
    let ranked: HashSet<&ServiceId> = prioritized.iter().copied().collect();
    let order = prioritized.into_iter().chain(
        stops_by_service
            .keys()
            .filter(|service| !ranked.contains(*service)),
    );

    let mut used_at: HashMap<&str, Vec<OffsetIndex>> = HashMap::new();
    let mut offsets = BTreeMap::new();

    for service in order {
        let stops = &stops_by_service[service];
        let conflicts: HashSet<OffsetIndex> = stops
            .iter()
            .filter_map(|station| used_at.get(station.as_str()))
            .flatten()
            .copied()
            .collect();

        let mut offset = 0;
        while conflicts.contains(&offset) {
            offset += 1;
        }

        trace!("Service {service} gets offset {offset}");
        for station in stops {
            used_at.entry(station.as_str()).or_default().push(offset);
        }
        offsets.insert(service.clone(), offset);
    }

    OffsetAssignment { offsets }
}
