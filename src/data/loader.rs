//! Load island datasets from JSON (`[{"name", "money", "marines"}]`) or CSV
//! (header `name,money,marines`).
//!
//! Marines are read as signed so that bad rows reach validation instead of
//! failing the whole parse.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::island::Island;
use crate::error::AllocationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawIsland {
    pub name: String,
    pub money: f64,
    pub marines: i64,
}

impl RawIsland {
    pub fn into_island(self) -> Result<Island, AllocationError> {
        let marines = u32::try_from(self.marines).map_err(|_| AllocationError::InvalidTarget {
            name: self.name.clone(),
            reason: "marines must be between 0 and u32::MAX",
        })?;
        Ok(Island::new(self.name, self.money, marines))
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IslandFile {
    Islands(Vec<RawIsland>),
    Wrapped { islands: Vec<RawIsland> },
}

#[derive(Debug)]
pub enum LoadError {
    Read(std::io::Error),
    ParseJson(serde_json::Error),
    ParseCsv(csv::Error),
    UnsupportedFormat(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(err) => write!(f, "failed to read island file: {err}"),
            Self::ParseJson(err) => write!(f, "failed to parse island JSON: {err}"),
            Self::ParseCsv(err) => write!(f, "failed to parse island CSV: {err}"),
            Self::UnsupportedFormat(ext) => {
                write!(f, "unsupported island file extension '{ext}' (expected json or csv)")
            }
        }
    }
}

impl std::error::Error for LoadError {}

/// Load raw islands, choosing the parser by file extension.
pub fn load_islands(path: impl AsRef<Path>) -> Result<Vec<RawIsland>, LoadError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let parse: fn(&str) -> Result<Vec<RawIsland>, LoadError> = match extension.as_str() {
        "json" => parse_islands_json,
        "csv" => parse_islands_csv,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };
    let raw = fs::read_to_string(path).map_err(LoadError::Read)?;
    let islands = parse(&raw)?;
    tracing::debug!(path = %path.display(), count = islands.len(), "islands loaded");
    Ok(islands)
}

/// Accepts a bare array or `{ "islands": [...] }`.
pub fn parse_islands_json(raw: &str) -> Result<Vec<RawIsland>, LoadError> {
    let file: IslandFile = serde_json::from_str(raw).map_err(LoadError::ParseJson)?;
    Ok(match file {
        IslandFile::Islands(islands) => islands,
        IslandFile::Wrapped { islands } => islands,
    })
}

pub fn parse_islands_csv(raw: &str) -> Result<Vec<RawIsland>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(raw.as_bytes());
    reader
        .deserialize()
        .collect::<Result<Vec<RawIsland>, _>>()
        .map_err(LoadError::ParseCsv)
}

/// Convert raw islands, skipping (and logging) rows that cannot be indexed.
pub fn usable_islands(raw: Vec<RawIsland>) -> Vec<Island> {
    raw.into_iter()
        .filter_map(|entry| match entry.into_island() {
            Ok(island) if island.validate().is_ok() => Some(island),
            Ok(island) => {
                tracing::warn!(island = %island.name, "skipping island that cannot be indexed");
                None
            }
            Err(err) => {
                tracing::warn!(%err, "skipping island");
                None
            }
        })
        .collect()
}
