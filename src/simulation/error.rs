//! Error type shared by the simulation and the evolution driver.

use thiserror::Error;

/// Errors surfaced to callers of the simulation entry points.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// A configuration value is out of range. Raised before any tick runs.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// Reading or writing a config/report file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// A config/report file is not valid JSON for the expected shape.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
