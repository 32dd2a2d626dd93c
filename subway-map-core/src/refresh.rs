//! Two-phase refresh and the live map state
//!
//! Phase one builds every service's geometry and the per-station sets into a
//! fresh [`DerivedState`](crate::model::DerivedState). Phase two allocates
//! offsets from the finished state. The resulting [`NetworkSnapshot`] is
//! swapped in whole, so readers never see a half-built network.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::{
    Error,
    algo::{StationDetails, StopIcon, assign_offsets, station_details},
    geometry::GeometryBuilder,
    loading::{MapConfig, RoutingSnapshot},
    model::{Anomaly, NetworkSnapshot, TopologyStore},
};

/// Builds a snapshot from one routing feed
pub fn build_snapshot(
    topology: &TopologyStore,
    config: &MapConfig,
    routing: &RoutingSnapshot,
) -> NetworkSnapshot {
    let mut builder = GeometryBuilder::new(topology, config.max_path_hops);
    for service in routing.services() {
        builder.add_service(&service);
    }
    let (derived, mut anomalies) = builder.finish();

    let offsets = assign_offsets(&derived.stops_by_service(), &config.service_priority);
    let table_len = config.offset_table.len();
    for (service, offset) in offsets.iter() {
        if offset >= table_len {
            anomalies.push(Anomaly::OffsetTableExhaustion {
                service: service.clone(),
                offset,
            });
        }
    }

    NetworkSnapshot::new(routing.checksum.clone(), derived, offsets, anomalies)
}

/// What [`MapState::refresh`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Rebuilt { services: usize, anomalies: usize },
    /// The checksum matched the current snapshot
    Skipped,
}

/// Topology, configuration and the current snapshot
#[derive(Debug)]
pub struct MapState {
    topology: TopologyStore,
    config: MapConfig,
    current: Arc<NetworkSnapshot>,
}

impl MapState {
    /// # Errors
    ///
    /// Returns an error if `config` fails [`MapConfig::validate`].
    pub fn new(topology: TopologyStore, config: MapConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            topology,
            config,
            current: Arc::new(NetworkSnapshot::default()),
        })
    }

    /// Rebuilds the snapshot unless `routing` carries the current checksum
    pub fn refresh(&mut self, routing: &RoutingSnapshot) -> RefreshOutcome {
        if self.current.checksum() == Some(routing.checksum.as_str()) {
            debug!("Routing checksum {} unchanged, skipping rebuild", routing.checksum);
            return RefreshOutcome::Skipped;
        }

        let snapshot = build_snapshot(&self.topology, &self.config, routing);
        for anomaly in snapshot.anomalies() {
            warn!("{anomaly}");
        }
        info!(
            "Rebuilt network for checksum {}: {} services, {} anomalies",
            routing.checksum,
            snapshot.derived().service_count(),
            snapshot.anomalies().len()
        );

        let outcome = RefreshOutcome::Rebuilt {
            services: snapshot.derived().service_count(),
            anomalies: snapshot.anomalies().len(),
        };
        self.current = Arc::new(snapshot);
        outcome
    }

    /// Current snapshot; stays valid after later refreshes
    pub fn snapshot(&self) -> Arc<NetworkSnapshot> {
        Arc::clone(&self.current)
    }

    pub fn topology(&self) -> &TopologyStore {
        &self.topology
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Icon of a station in the current snapshot
    ///
    /// # Errors
    ///
    /// Returns [`Error::StationNotFound`] for an unknown station.
    pub fn classify(&self, station: &str, selected_service: Option<&str>) -> Result<StopIcon, Error> {
        if !self.topology.contains(station) {
            return Err(Error::StationNotFound(station.to_string()));
        }
        Ok(self.current.classify(station, selected_service))
    }

    /// # Errors
    ///
    /// Returns [`Error::StationNotFound`] for an unknown station.
    pub fn station_details(&self, station: &str) -> Result<StationDetails, Error> {
        station_details(
            &self.topology,
            &self.current,
            &self.config.directions,
            station,
        )
    }
}
