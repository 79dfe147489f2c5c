//! Structured TOML configuration, the Rust-native analogue of the ns-3
//! attribute system's `AddAttribute` calls — loaded once at startup the
//! way `knhk_config::load_config` reads a TOML file into a
//! `serde::Deserialize` struct.

use std::path::Path;

use serde::Deserialize;
use tas_core::Schedule;

use crate::error::ConfigError;
use crate::wire;

/// On-disk shape of the core configuration. The schedule may be given
/// inline as wire-format text or as a path to a file holding that text;
/// exactly one should be set.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoreConfigFile {
    #[serde(default)]
    pub schedule: Option<String>,
    #[serde(default)]
    pub schedule_path: Option<String>,
    #[serde(default)]
    pub trust_qostag: bool,
    #[serde(default = "default_max_size")]
    pub max_size: usize,
    #[serde(default = "default_data_rate_bps")]
    pub data_rate_bps: u64,
}

fn default_max_size() -> usize {
    800
}

/// 1.5 Mbit/s, matching the `DataRate` attribute's default.
fn default_data_rate_bps() -> u64 {
    1_500_000
}

impl CoreConfigFile {
    /// Parse a TOML document already read into memory.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Toml {
            path: "<inline>".to_string(),
            source,
        })
    }

    /// Read and parse a TOML config file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Toml {
            path: path.display().to_string(),
            source,
        })
    }

    /// Resolve the configured schedule: inline text wins over a referenced
    /// file when both are somehow set.
    pub fn resolve_schedule(&self) -> Result<Schedule, ConfigError> {
        if let Some(inline) = &self.schedule {
            return Ok(wire::parse(inline)?);
        }
        if let Some(path) = &self.schedule_path {
            let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;
            return Ok(wire::parse(&contents)?);
        }
        Err(ConfigError::MissingSchedule)
    }
}
