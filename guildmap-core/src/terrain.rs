//! Terrain classification and traversability

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What an explorer has recorded for a cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terrain {
    #[default]
    Unknown,
    Camp,
    Field,
    Signal,
    Mountain,
    Lake,
    Chest,
    Mine,
    Enemy,
}

/// Presentation metadata for a terrain tag
#[derive(Clone, Debug, Serialize)]
pub struct TerrainInfo {
    pub tag: &'static str,
    pub name: &'static str,
    pub color: &'static str,
    pub label: &'static str,
    pub terrain: Terrain,
}

impl TerrainInfo {
    const fn new(
        terrain: Terrain,
        tag: &'static str,
        name: &'static str,
        color: &'static str,
        label: &'static str,
    ) -> Self {
        Self {
            tag,
            name,
            color,
            label,
            terrain,
        }
    }
}

/// All terrain types, in declaration order of [`Terrain`]
pub static TERRAIN_TYPES: [TerrainInfo; 9] = [
    TerrainInfo::new(Terrain::Unknown, "unknown", "Unknown", "#2a2a2a", ""),
    TerrainInfo::new(Terrain::Camp, "camp", "Camp", "#4ade80", "🏕️"),
    TerrainInfo::new(Terrain::Field, "field", "Field", "#4ade80", "🌾"),
    TerrainInfo::new(Terrain::Signal, "signal", "Unknown Signal", "#fbbf24", "📡"),
    TerrainInfo::new(Terrain::Mountain, "mountain", "Mountain", "#78716c", "⛰️"),
    TerrainInfo::new(Terrain::Lake, "lake", "Lake", "#3b82f6", "💧"),
    TerrainInfo::new(Terrain::Chest, "chest", "Chest", "#f59e0b", "📦"),
    TerrainInfo::new(Terrain::Mine, "mine", "Mine", "#dc2626", "⛏️"),
    TerrainInfo::new(Terrain::Enemy, "enemy", "Enemy Encampment", "#dc2626", "🗡️"),
];

impl Terrain {
    /// Mountains and lakes block movement. Everything else, including
    /// undiscovered cells, is assumed passable.
    pub fn is_traversable(self) -> bool {
        !matches!(self, Terrain::Mountain | Terrain::Lake)
    }

    /// Whether a collaborator may paint this terrain onto a cell
    pub fn is_editable(self) -> bool {
        self != Terrain::Camp
    }

    pub fn info(self) -> &'static TerrainInfo {
        &TERRAIN_TYPES[self as usize]
    }

    pub fn tag(self) -> &'static str {
        self.info().tag
    }

    /// Look up a terrain by its wire tag
    pub fn from_tag(tag: &str) -> Option<Terrain> {
        TERRAIN_TYPES
            .iter()
            .find(|info| info.tag == tag)
            .map(|info| info.terrain)
    }

    pub fn all() -> impl Iterator<Item = Terrain> {
        TERRAIN_TYPES.iter().map(|info| info.terrain)
    }
}

/// Free-standing form of [`Terrain::is_traversable`]
pub fn is_traversable(terrain: Terrain) -> bool {
    terrain.is_traversable()
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Terrain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Terrain::from_tag(s).ok_or_else(|| format!("unknown terrain '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_enum() {
        for (i, info) in TERRAIN_TYPES.iter().enumerate() {
            assert_eq!(info.terrain as usize, i, "{} out of place", info.tag);
            assert_eq!(Terrain::from_tag(info.tag), Some(info.terrain));
        }
        assert_eq!(Terrain::from_tag("swamp"), None);
        assert_eq!(Terrain::from_tag("Mountain"), None);
    }

    #[test]
    fn test_traversability() {
        assert!(!is_traversable(Terrain::Mountain));
        assert!(!is_traversable(Terrain::Lake));
        assert!(is_traversable(Terrain::Unknown));
        assert!(is_traversable(Terrain::Camp));
        assert!(is_traversable(Terrain::Enemy));
        assert_eq!(Terrain::all().filter(|t| !t.is_traversable()).count(), 2);
    }

    #[test]
    fn test_serde_tags() {
        let json = serde_json::to_string(&Terrain::Enemy).unwrap();
        assert_eq!(json, "\"enemy\"");
        let back: Terrain = serde_json::from_str("\"lake\"").unwrap();
        assert_eq!(back, Terrain::Lake);
        assert!(serde_json::from_str::<Terrain>("\"volcano\"").is_err());
    }

    #[test]
    fn test_only_camp_is_locked() {
        let locked: Vec<Terrain> = Terrain::all().filter(|t| !t.is_editable()).collect();
        assert_eq!(locked, vec![Terrain::Camp]);
    }
}
