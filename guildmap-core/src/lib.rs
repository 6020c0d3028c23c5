//! Guildmap Core - hex map and route planning
//!
//! This crate provides the map engine behind the guild map editor:
//! - Hex geometry (cube/axial coordinates, bounded regions, projection)
//! - Terrain catalogue and traversability
//! - Map state with the camp pinned at the origin
//! - A* route search from the camp
//! - JSON snapshots for export and import

pub mod error;
pub mod hex;
pub mod map;
pub mod pathfinding;
pub mod session;
pub mod snapshot;
pub mod terrain;

// Re-exports for convenient access
pub use error::MapError;
pub use hex::{region, Hex, DEFAULT_CELL_SIZE, DEFAULT_MAP_RADIUS, DIRECTIONS, MAX_MAP_RADIUS, ORIGIN};
pub use map::HexMap;
pub use pathfinding::{find_path, find_route_from_camp, Route};
pub use session::MapSession;
pub use snapshot::{decode, encode, Snapshot, SNAPSHOT_VERSION};
pub use terrain::{is_traversable, Terrain, TerrainInfo, TERRAIN_TYPES};
