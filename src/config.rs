//! Engine configuration: rounding of partial plunder and the raid threshold.
//! Loaded from JSON or YAML; every field falls back to its default.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "plunder.json";
pub const CONFIG_PATH_ENV: &str = "PLUNDER_CONFIG";

/// Money per marine at or below which raiding is not worth it: an idle crew
/// member earns this much by staying home.
pub const DEFAULT_RAID_RATIO_THRESHOLD: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Drop the fractional part.
    Truncate,
    /// Nearest integer, halves rounded up.
    #[default]
    HalfUp,
}

impl RoundingMode {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::Truncate => value.floor(),
            Self::HalfUp => (value + 0.5).floor(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rounding: RoundingMode,
    pub raid_ratio_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rounding: RoundingMode::HalfUp,
            raid_ratio_threshold: DEFAULT_RAID_RATIO_THRESHOLD,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Read(std::io::Error),
    ParseJson(serde_json::Error),
    ParseYaml(serde_yaml::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(err) => write!(f, "failed to read config file: {err}"),
            Self::ParseJson(err) => write!(f, "failed to parse config JSON: {err}"),
            Self::ParseYaml(err) => write!(f, "failed to parse config YAML: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load a config file; `.yaml`/`.yml` are read as YAML, anything else as JSON.
pub fn load_config(path: impl AsRef<Path>) -> Result<EngineConfig, ConfigError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(ConfigError::Read)?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
    if is_yaml {
        serde_yaml::from_str(&raw).map_err(ConfigError::ParseYaml)
    } else {
        serde_json::from_str(&raw).map_err(ConfigError::ParseJson)
    }
}

/// Like [load_config] but a missing file yields the defaults. A file that
/// exists and fails to parse is still an error.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<EngineConfig, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        return Ok(EngineConfig::default());
    }
    load_config(path)
}
