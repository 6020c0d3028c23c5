//! Snapshot - portable JSON form of a map

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{MapError, Result};
use crate::hex::{Hex, DEFAULT_MAP_RADIUS};
use crate::map::HexMap;
use crate::terrain::Terrain;

/// Current snapshot schema version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Exported map document.
///
/// Cell keys are `"q,r"`; `s` is always derivable. Documents written before
/// the `version` field existed are read as version 1.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default = "legacy_version")]
    pub version: u32,
    #[serde(default = "default_radius")]
    pub radius: i32,
    pub cells: BTreeMap<String, String>,
    #[serde(default, alias = "generatedAt")]
    pub timestamp: Option<DateTime<Utc>>,
}

fn legacy_version() -> u32 {
    1
}

fn default_radius() -> i32 {
    DEFAULT_MAP_RADIUS
}

impl Snapshot {
    /// Capture the current state of a map
    pub fn capture(map: &HexMap) -> Self {
        let cells = map
            .iter()
            .map(|(hex, terrain)| (hex.to_string(), terrain.tag().to_string()))
            .collect();
        Self {
            version: SNAPSHOT_VERSION,
            radius: map.radius(),
            cells,
            timestamp: Some(Utc::now()),
        }
    }

    /// Parse a snapshot document. Any structural problem is reported as
    /// [`MapError::MalformedSnapshot`].
    pub fn from_json(text: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(text)
            .map_err(|e| MapError::MalformedSnapshot(e.to_string()))?;
        if snapshot.version == 0 || snapshot.version > SNAPSHOT_VERSION {
            return Err(MapError::MalformedSnapshot(format!(
                "unsupported snapshot version {}",
                snapshot.version
            )));
        }
        Ok(snapshot)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| MapError::MalformedSnapshot(e.to_string()))
    }

    /// Typed cells, validated against the snapshot's own radius
    pub fn parse_cells(&self) -> Result<Vec<(Hex, Terrain)>> {
        self.cells
            .iter()
            .map(|(key, tag)| {
                let hex: Hex = key.parse()?;
                if !hex.is_within(self.radius) {
                    return Err(MapError::MalformedSnapshot(format!(
                        "cell ({hex}) lies outside radius {}",
                        self.radius
                    )));
                }
                let terrain = Terrain::from_tag(tag).ok_or_else(|| {
                    MapError::MalformedSnapshot(format!("unknown terrain '{tag}' at ({hex})"))
                })?;
                Ok((hex, terrain))
            })
            .collect()
    }

    /// Build the map this snapshot describes. The camp is re-pinned.
    pub fn into_map(self) -> Result<HexMap> {
        let cells = self.parse_cells()?;
        let mut map =
            HexMap::new(self.radius).map_err(|e| MapError::MalformedSnapshot(e.to_string()))?;
        map.replace_all(cells)?;
        Ok(map)
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = self.to_json_pretty()?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Map to pretty JSON
pub fn encode(map: &HexMap) -> Result<String> {
    Snapshot::capture(map).to_json_pretty()
}

/// Pretty JSON to map
pub fn decode(text: &str) -> Result<HexMap> {
    Snapshot::from_json(text)?.into_map()
}
