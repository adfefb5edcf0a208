//! On-disk configuration for the command-line driver.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::SimulationError;
use super::evolution::EvolutionConfig;
use super::params::Params;

/// Tick limit applied by [`Settings::default`] so evolution runs always end.
pub const DEFAULT_TICK_LIMIT: u64 = 20_000;

/// World parameters and evolution settings in one JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// World geometry, physics and rewards.
    pub params: Params,
    /// Population and breeding settings.
    pub evolution: EvolutionConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            params: Params {
                max_ticks: Some(DEFAULT_TICK_LIMIT),
                ..Params::default()
            },
            evolution: EvolutionConfig::default(),
        }
    }
}

impl Settings {
    /// Validates both halves.
    pub fn validate(&self) -> Result<(), SimulationError> {
        self.params.validate()?;
        self.evolution.validate()
    }

    /// Saves the settings to a JSON file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), SimulationError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads and validates settings from a JSON file.
    ///
    /// A file that leaves out `max_ticks` gets [`DEFAULT_TICK_LIMIT`].
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SimulationError> {
        let json = std::fs::read_to_string(path)?;
        let mut settings: Self = serde_json::from_str(&json)?;
        settings.params.max_ticks.get_or_insert(DEFAULT_TICK_LIMIT);
        settings.validate()?;
        Ok(settings)
    }
}
