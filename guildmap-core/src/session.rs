//! Map session - the operations a UI drives
//!
//! A session owns exactly one map for its lifetime. Routes are computed on
//! demand from the current state and never cached, so any edit implicitly
//! invalidates a route the caller is holding.

use crate::error::{MapError, Result};
use crate::hex::Hex;
use crate::map::HexMap;
use crate::pathfinding::{find_route_from_camp, Route};
use crate::snapshot::Snapshot;
use crate::terrain::Terrain;

/// Defaults to an empty map of [`DEFAULT_MAP_RADIUS`](crate::hex::DEFAULT_MAP_RADIUS)
#[derive(Clone, Debug, Default)]
pub struct MapSession {
    map: HexMap,
}

impl MapSession {
    pub fn new(radius: i32) -> Result<Self> {
        Ok(Self {
            map: HexMap::new(radius)?,
        })
    }

    /// Adopt an existing map, e.g. one loaded from disk
    pub fn from_map(map: HexMap) -> Self {
        Self { map }
    }

    pub fn map(&self) -> &HexMap {
        &self.map
    }

    pub fn radius(&self) -> i32 {
        self.map.radius()
    }

    /// Paint one cell. Returns the terrain that was replaced.
    pub fn edit_cell(&mut self, q: i32, r: i32, terrain: Terrain) -> Result<Terrain> {
        self.map.set(Hex::new(q, r), terrain)
    }

    /// Shortest route from the camp. Empty when the destination can't be
    /// reached.
    pub fn find_route(&self, dest_q: i32, dest_r: i32) -> Result<Route> {
        find_route_from_camp(&self.map, Hex::new(dest_q, dest_r))
    }

    pub fn reset_map(&mut self) {
        self.map.clear();
    }

    pub fn export_snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.map)
    }

    /// Replace the map from a snapshot document.
    ///
    /// The document is fully decoded and validated first; on any error the
    /// current map is left as it was.
    pub fn import_snapshot(&mut self, text: &str) -> Result<&HexMap> {
        let map = decode_for_radius(text, self.radius())?;
        self.map = map;
        Ok(&self.map)
    }
}

/// Decode a document that must describe a map of exactly `radius`
pub fn decode_for_radius(text: &str, radius: i32) -> Result<HexMap> {
    let snapshot = Snapshot::from_json(text)?;
    if snapshot.radius != radius {
        return Err(MapError::MalformedSnapshot(format!(
            "snapshot radius {} does not match map radius {}",
            snapshot.radius, radius
        )));
    }
    snapshot.into_map()
}
