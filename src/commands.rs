use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use subway_map_core::{Error, prelude::*};
use tracing::{info, warn};

use crate::{
    cli::{Command, InputArgs},
    error::CliError,
};

pub fn run(command: Command, config: MapConfig) -> Result<(), CliError> {
    match command {
        Command::Render {
            input,
            out_dir,
            service,
            station,
        } => {
            let selection = match (service, station) {
                (Some(service), _) => Selection::Service(service),
                (None, Some(station)) => Selection::Station(station),
                (None, None) => Selection::None,
            };
            render(&input, &out_dir, &selection, config)
        }
        Command::Station { input, id } => station(&input, &id, config),
        Command::Check { input, next_routes } => check(&input, next_routes.as_deref(), config),
    }
}

/// Loads the inputs and runs the first refresh
fn load_state(input: &InputArgs, config: MapConfig) -> Result<MapState, CliError> {
    let topology = load_topology(&input.stations, input.transfers.as_deref())?;
    let routing = load_routing_snapshot(&input.routes)?;
    let mut state = MapState::new(topology, config)?;
    state.refresh(&routing);
    Ok(state)
}

fn render(
    input: &InputArgs,
    out_dir: &Path,
    selection: &Selection,
    config: MapConfig,
) -> Result<(), CliError> {
    let state = load_state(input, config)?;
    let snapshot = state.snapshot();

    match selection {
        Selection::Service(id) if snapshot.derived().service(id).is_none() => {
            return Err(Error::ServiceNotFound(id.clone()).into());
        }
        Selection::Station(id) if !state.topology().contains(id) => {
            return Err(Error::StationNotFound(id.clone()).into());
        }
        _ => {}
    }

    if let Selection::Service(id) = selection
        && let Some(bounds) = snapshot.derived().service(id).and_then(|s| s.bounds())
    {
        info!(
            "Service {id} spans ({:.5}, {:.5}) to ({:.5}, {:.5})",
            bounds.min().x,
            bounds.min().y,
            bounds.max().x,
            bounds.max().y
        );
    }

    fs::create_dir_all(out_dir)?;
    let lines = lines_to_geojson(&snapshot, state.config(), selection)?;
    let stops = stops_to_geojson(state.topology(), &snapshot, state.config(), selection)?;
    write_json(&out_dir.join("lines.geojson"), &lines)?;
    write_json(&out_dir.join("stops.geojson"), &stops)?;

    info!(
        "Wrote {} line features and {} stop features to {}",
        lines.features.len(),
        stops.features.len(),
        out_dir.display()
    );
    Ok(())
}

fn station(input: &InputArgs, id: &str, config: MapConfig) -> Result<(), CliError> {
    let state = load_state(input, config)?;
    let details = state.station_details(id)?;
    print_json(&details)
}

#[derive(Debug, Serialize)]
struct CheckReport {
    checksum: Option<String>,
    stations: usize,
    services: usize,
    polylines: usize,
    max_offset: Option<OffsetIndex>,
    anomalies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    next: Option<NextCheck>,
}

#[derive(Debug, Serialize)]
struct NextCheck {
    checksum: String,
    rebuilt: bool,
}

fn check(input: &InputArgs, next_routes: Option<&Path>, config: MapConfig) -> Result<(), CliError> {
    let mut state = load_state(input, config)?;
    let snapshot = state.snapshot();

    let mut report = CheckReport {
        checksum: snapshot.checksum().map(str::to_string),
        stations: state.topology().station_count(),
        services: snapshot.derived().service_count(),
        polylines: snapshot
            .derived()
            .services()
            .map(|service| service.polylines.len())
            .sum(),
        max_offset: snapshot.offsets().max_offset(),
        anomalies: snapshot.anomalies().iter().map(ToString::to_string).collect(),
        next: None,
    };

    if let Some(path) = next_routes {
        let next = load_routing_snapshot(path)?;
        let rebuilt = matches!(state.refresh(&next), RefreshOutcome::Rebuilt { .. });
        report.next = Some(NextCheck {
            checksum: next.checksum,
            rebuilt,
        });
    }

    if !report.anomalies.is_empty() {
        warn!("{} anomalies in routing snapshot", report.anomalies.len());
    }
    print_json(&report)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), CliError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
