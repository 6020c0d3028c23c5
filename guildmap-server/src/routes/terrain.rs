//! Terrain catalogue endpoint

use axum::Json;
use guildmap_core::TERRAIN_TYPES;
use serde::Serialize;

#[derive(Serialize)]
pub struct TerrainEntry {
    pub tag: &'static str,
    pub name: &'static str,
    pub color: &'static str,
    pub label: &'static str,
    pub traversable: bool,
    pub editable: bool,
}

/// Get all terrain types, camp included
pub async fn get_terrain() -> Json<Vec<TerrainEntry>> {
    let entries = TERRAIN_TYPES
        .iter()
        .map(|info| TerrainEntry {
            tag: info.tag,
            name: info.name,
            color: info.color,
            label: info.label,
            traversable: info.terrain.is_traversable(),
            editable: info.terrain.is_editable(),
        })
        .collect();
    Json(entries)
}
