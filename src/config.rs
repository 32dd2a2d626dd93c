//! Front-end configuration file
//!
//! ```toml
//! [logging]
//! level = "debug"
//!
//! [map]
//! max_path_hops = 10
//! service_priority = ["A", "C", "E"]
//!
//! [map.directions]
//! uptown_downtown_boroughs = ["M"]
//! ```

use std::path::Path;

use serde::Deserialize;
use subway_map_core::MapConfig;

use crate::error::CliError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub map: MapConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `info` or `subway_map_core=debug`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Reads the config file, or returns defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
