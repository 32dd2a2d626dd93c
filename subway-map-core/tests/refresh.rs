use std::sync::Arc;

use geo::coord;
use serde_json::{Value, json};
use subway_map_core::{
    loading::{RawTopology, RawTransfer},
    prelude::*,
};

/// Trunk `S01..S06` running north with a curve between each pair, and a
/// spur `S03 -> T01` off the middle.
fn trunk_topology() -> TopologyStore {
    let stations: RawTopology = serde_json::from_value(json!({
        "S01": {"name": "South Ferry", "borough": "M", "latitude": 40.70, "longitude": -74.01,
                "north": {"S02": [[-74.012, 40.705]]}},
        "S02": {"name": "Rector St", "borough": "M", "latitude": 40.71, "longitude": -74.01,
                "north": {"S03": [[-74.008, 40.715]]}},
        "S03": {"name": "Canal St", "borough": "M", "latitude": 40.72, "longitude": -74.01,
                "north": {"S04": [], "T01": [[-73.99, 40.722]]}},
        "S04": {"name": "14 St", "borough": "M", "latitude": 40.73, "longitude": -74.01,
                "north": {"S05": []}},
        "S05": {"name": "34 St - Penn Station", "borough": "M", "latitude": 40.75, "longitude": -74.01,
                "north": {"S06": [[-74.0, 40.76]]}},
        "S06": {"name": "Yankee Stadium - 161 St", "borough": "Bx", "latitude": 40.83, "longitude": -73.93},
        "T01": {"name": "Court Sq", "borough": "Q", "latitude": 40.75, "longitude": -73.94},
        "U01": {"name": "Aqueduct Racetrack", "borough": "Q", "latitude": 40.67, "longitude": -73.83}
    }))
    .unwrap();
    create_topology_store(
        stations,
        &[RawTransfer {
            from: "S03".into(),
            to: "T01".into(),
        }],
    )
    .unwrap()
}

fn routing(checksum: &str, services: Value) -> RoutingSnapshot {
    serde_json::from_value(json!({"checksum": checksum, "routes": services})).unwrap()
}

fn weekday() -> RoutingSnapshot {
    routing(
        "weekday",
        json!({
            "1": {"color": "#ee352e", "name": "Local", "routings": {
                "north": [["S01N", "S02N", "S03N", "S04N", "S05N", "S06N"]],
                "south": [["S06S", "S05S", "S04S", "S03S", "S02S", "S01S"]]
            }},
            "2": {"color": "#ee352e", "name": "Express", "routings": {
                "north": [["S01N", "S03N", "S05N", "S06N"], ["S03N", "S05N"]],
                "south": [["S06S", "S05S", "S03S", "S01S"]]
            }},
            "7": {"color": "#b933ad", "routings": {
                "north": [["S01N", "S03N", "T01N"]],
                "south": [["T01S", "S03S", "S01S"]]
            }},
            "H": {"color": "#808183", "routings": {
                "north": [["S01N", "X99N", "S02N"], ["S02N", "S03S"]],
                "south": []
            }}
        }),
    )
}

#[test]
fn directional_sets_are_subsets_of_through_stops() {
    let topology = trunk_topology();
    let snapshot = build_snapshot(&topology, &MapConfig::default(), &weekday());
    for (station, sets) in snapshot.derived().stations() {
        assert!(sets.north_stops.is_subset(&sets.through_stops), "{station}");
        assert!(sets.south_stops.is_subset(&sets.through_stops), "{station}");
    }
}

#[test]
fn polylines_are_unique_per_service() {
    let topology = trunk_topology();
    let snapshot = build_snapshot(&topology, &MapConfig::default(), &weekday());
    for service in snapshot.derived().services() {
        for (i, a) in service.polylines.iter().enumerate() {
            for b in &service.polylines[i + 1..] {
                assert_ne!(a, b, "service {} has a duplicate polyline", service.id);
            }
        }
    }
    // local runs both ways over the same stops: one line
    assert_eq!(snapshot.derived().service("1").unwrap().polylines.len(), 1);
    // express: full run plus the short turn
    assert_eq!(snapshot.derived().service("2").unwrap().polylines.len(), 2);
}

#[test]
fn express_line_hugs_track_and_passes_skipped_stations() {
    let topology = trunk_topology();
    let snapshot = build_snapshot(&topology, &MapConfig::default(), &weekday());
    let express = snapshot.derived().service("2").unwrap();
    assert_eq!(
        express.polylines[0].0[..5],
        [
            coord! { x: -74.01, y: 40.70 },
            coord! { x: -74.012, y: 40.705 },
            coord! { x: -74.01, y: 40.71 },
            coord! { x: -74.008, y: 40.715 },
            coord! { x: -74.01, y: 40.72 },
        ]
    );

    let s02 = snapshot.derived().station_sets("S02").unwrap();
    assert!(s02.passed_by.contains("2"));
    assert!(!s02.through_stops.contains("2"));
    assert_eq!(snapshot.classify("S02", None), StopIcon::Generic);
    assert_eq!(snapshot.classify("S03", None), StopIcon::ExpressStop);
}

#[test]
fn rebuild_is_deterministic() {
    let topology = trunk_topology();
    let config = MapConfig::default();
    let first = build_snapshot(&topology, &config, &weekday());
    let second = build_snapshot(&topology, &config, &weekday());

    assert_eq!(first.offsets(), second.offsets());
    assert_eq!(first.anomalies(), second.anomalies());
    for service in first.derived().services() {
        let other = second.derived().service(&service.id).unwrap();
        assert_eq!(service.polylines, other.polylines);
    }
    for station in topology.stations() {
        assert_eq!(
            first.classify(&station.id, None),
            second.classify(&station.id, None)
        );
    }
}

#[test]
fn services_sharing_a_stop_get_distinct_offsets() {
    let topology = trunk_topology();
    let snapshot = build_snapshot(&topology, &MapConfig::default(), &weekday());
    let stops = snapshot.derived().stops_by_service();
    for (a, stops_a) in &stops {
        for (b, stops_b) in &stops {
            if a != b && !stops_a.is_disjoint(stops_b) {
                assert_ne!(snapshot.offset_of(a), snapshot.offset_of(b), "{a} / {b}");
            }
        }
    }
    // default priority puts 2 ahead of 1
    assert_eq!(snapshot.offset_of("2"), Some(0));
    assert_eq!(snapshot.offset_of("1"), Some(1));
}

#[test]
fn anomalies_are_recorded_without_failing() {
    let topology = trunk_topology();
    let snapshot = build_snapshot(&topology, &MapConfig::default(), &weekday());
    let anomalies = snapshot.anomalies();
    assert!(anomalies.contains(&Anomaly::MissingStationReference {
        service: "H".into(),
        stop_id: "X99N".into(),
    }));
    assert!(anomalies.contains(&Anomaly::MalformedRouting {
        service: "H".into(),
        direction: Direction::North,
        index: 1,
    }));
    // the shuttle still draws what it can
    assert_eq!(snapshot.derived().service("H").unwrap().polylines.len(), 1);
}

#[test]
fn station_without_service_shows_no_service() {
    let topology = trunk_topology();
    let snapshot = build_snapshot(&topology, &MapConfig::default(), &weekday());
    assert_eq!(snapshot.classify("U01", None), StopIcon::NoService);
    assert_eq!(snapshot.classify("U01", Some("1")), StopIcon::NoService);
}

#[test]
fn unchanged_checksum_keeps_snapshot() {
    let mut state = MapState::new(trunk_topology(), MapConfig::default()).unwrap();
    assert!(matches!(
        state.refresh(&weekday()),
        RefreshOutcome::Rebuilt { services: 4, .. }
    ));
    let before = state.snapshot();

    assert_eq!(state.refresh(&weekday()), RefreshOutcome::Skipped);
    let after = state.snapshot();
    assert!(Arc::ptr_eq(&before, &after));
    assert_eq!(after.offsets(), before.offsets());

    let weekend = routing(
        "weekend",
        json!({"1": {"color": "#ee352e", "routings": {"north": [["S01N", "S06N"]]}}}),
    );
    assert!(matches!(state.refresh(&weekend), RefreshOutcome::Rebuilt { .. }));
    assert!(state.snapshot().derived().service("2").is_none());
    assert!(before.derived().service("2").is_some());
}

#[test]
fn station_details_through_map_state() {
    let mut state = MapState::new(trunk_topology(), MapConfig::default()).unwrap();
    state.refresh(&weekday());
    let details = state.station_details("S03").unwrap();

    assert_eq!(details.north.services, vec!["1", "2", "7"]);
    assert_eq!(details.north.label.as_deref(), Some("Uptown, The Bronx & Queens"));
    assert_eq!(details.south.label.as_deref(), Some("Downtown"));
    let north: Vec<&str> = details
        .north
        .destinations
        .iter()
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(north, vec!["34 St–Penn Station", "Court Sq", "Yankee Stadium–161 St"]);
    assert_eq!(details.transfers.len(), 1);
    assert_eq!(details.transfers[0].north_services, vec!["7"]);
}

#[test]
fn geojson_export() {
    let mut state = MapState::new(trunk_topology(), MapConfig::default()).unwrap();
    state.refresh(&weekday());
    let snapshot = state.snapshot();

    let lines = lines_to_geojson(&snapshot, state.config(), &Selection::None).unwrap();
    let polylines: usize = snapshot.derived().services().map(|s| s.polylines.len()).sum();
    assert_eq!(lines.features.len(), polylines);

    let stops = stops_to_geojson(
        state.topology(),
        &snapshot,
        state.config(),
        &Selection::Station("S03".into()),
    )
    .unwrap();
    assert_eq!(stops.features.len(), state.topology().station_count());
    let text = serde_json::to_string(&stops).unwrap();
    assert!(text.contains("\"icon\":\"cross-15\""));
}

#[test]
fn load_from_files() {
    let dir = std::env::temp_dir().join(format!("subway-map-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let stations = dir.join("stations.json");
    let transfers = dir.join("transfers.json");
    let routes = dir.join("routes.json");
    std::fs::write(
        &stations,
        r#"{"A": {"name": "A", "latitude": 40.0, "longitude": -73.0, "north": {"B": []}},
            "B": {"name": "B", "latitude": 40.1, "longitude": -73.0}}"#,
    )
    .unwrap();
    std::fs::write(&transfers, r#"[{"from": "A", "to": "B"}]"#).unwrap();
    std::fs::write(
        &routes,
        r#"{"checksum": "c", "routes": {"Z": {"routings": {"north": [["AN", "BN"]]}}}}"#,
    )
    .unwrap();

    let topology = load_topology(&stations, Some(&transfers)).unwrap();
    assert_eq!(topology.station_count(), 2);
    assert!(topology.station("A").unwrap().transfers.contains("B"));

    let snapshot = build_snapshot(
        &topology,
        &MapConfig::default(),
        &load_routing_snapshot(&routes).unwrap(),
    );
    assert_eq!(snapshot.checksum(), Some("c"));
    assert_eq!(snapshot.classify("B", Some("Z")), StopIcon::AllUptown);

    std::fs::remove_dir_all(&dir).unwrap();
}
