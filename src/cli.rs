use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "subway-map",
    version,
    about = "Build transit map line geometry and stop icons from topology and routing feeds"
)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter (e.g. `debug`); overrides RUST_LOG and the config file
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Topology and routing inputs shared by every command
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Station topology JSON
    #[arg(short, long)]
    pub stations: PathBuf,

    /// Transfer pairs JSON
    #[arg(short, long)]
    pub transfers: Option<PathBuf>,

    /// Routing snapshot JSON
    #[arg(short, long)]
    pub routes: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write lines.geojson and stops.geojson
    Render {
        #[command(flatten)]
        input: InputArgs,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Highlight one service
        #[arg(long, conflicts_with = "station")]
        service: Option<String>,

        /// Highlight the services stopping at one station
        #[arg(long)]
        station: Option<String>,
    },
    /// Print the detail view of one station as JSON
    Station {
        #[command(flatten)]
        input: InputArgs,

        /// Station id
        id: String,
    },
    /// Build a snapshot and print a summary with every anomaly
    Check {
        #[command(flatten)]
        input: InputArgs,

        /// A later routing snapshot, to check whether it triggers a rebuild
        #[arg(long)]
        next_routes: Option<PathBuf>,
    },
}
