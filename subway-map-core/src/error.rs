use thiserror::Error;

use crate::{ServiceId, StationId};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Station not found: {0}")]
    StationNotFound(StationId),
    #[error("Service not found: {0}")]
    ServiceNotFound(ServiceId),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
}
