//! Map API endpoints
//!
//! Reads, cell edits, reset, and snapshot export/import.

use crate::routes::{ApiError, ApiResult, CellPosition};
use crate::state::ServerState;
use axum::{extract::State, Json};
use guildmap_core::{session::decode_for_radius, Hex, MapSession, Snapshot, Terrain, DEFAULT_CELL_SIZE};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Serialize)]
pub struct MapCell {
    #[serde(flatten)]
    pub position: CellPosition,
    pub terrain: Terrain,
}

#[derive(Serialize)]
pub struct MapView {
    pub radius: i32,
    pub cell_size: f64,
    pub revision: u64,
    pub cells: Vec<MapCell>,
}

/// Get every cell with its terrain and plane position
pub async fn get_map(State(state): State<Arc<ServerState>>) -> Json<MapView> {
    let shared = state.read();
    let map = shared.session.map();
    let cells = map
        .iter()
        .map(|(hex, terrain)| MapCell {
            position: hex.into(),
            terrain,
        })
        .collect();

    Json(MapView {
        radius: map.radius(),
        cell_size: DEFAULT_CELL_SIZE,
        revision: shared.revision,
        cells,
    })
}

/// Edit request
#[derive(Deserialize)]
pub struct EditRequest {
    pub q: i32,
    pub r: i32,
    pub terrain: String,
}

#[derive(Serialize)]
pub struct EditResponse {
    pub success: bool,
    pub revision: u64,
    pub previous: Terrain,
    pub cell: MapCell,
}

/// Paint a single cell
pub async fn edit_cell(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<EditRequest>,
) -> ApiResult<EditResponse> {
    let terrain: Terrain = req
        .terrain
        .parse()
        .map_err(|e: String| ApiError::bad_request("unknown_terrain", e))?;

    let mut shared = state.write();
    let previous = shared.session.edit_cell(req.q, req.r, terrain)?;
    let revision = shared.touch();
    tracing::debug!("cell ({}, {}) {} -> {}", req.q, req.r, previous, terrain);

    Ok(Json(EditResponse {
        success: true,
        revision,
        previous,
        cell: MapCell {
            position: Hex::new(req.q, req.r).into(),
            terrain,
        },
    }))
}

#[derive(Serialize)]
pub struct ChangeResponse {
    pub success: bool,
    pub revision: u64,
}

/// Reset every cell to unknown, keeping the camp
pub async fn reset_map(State(state): State<Arc<ServerState>>) -> Json<ChangeResponse> {
    let mut shared = state.write();
    shared.session.reset_map();
    let revision = shared.touch();
    tracing::info!("map reset (revision {})", revision);

    Json(ChangeResponse {
        success: true,
        revision,
    })
}

/// Export the current map as a snapshot document
pub async fn export_map(State(state): State<Arc<ServerState>>) -> Json<Snapshot> {
    let shared = state.read();
    Json(shared.session.export_snapshot())
}

/// Import a snapshot document sent as the raw request body
pub async fn import_map(
    State(state): State<Arc<ServerState>>,
    body: String,
) -> ApiResult<ChangeResponse> {
    let radius = state.read().session.radius();
    // decode outside the write lock; only the swap is exclusive
    let map = decode_for_radius(&body, radius).map_err(|e| {
        tracing::warn!("rejected map import: {}", e);
        ApiError::from(e)
    })?;

    let mut shared = state.write();
    shared.session = MapSession::from_map(map);
    let revision = shared.touch();
    tracing::info!("map imported (revision {})", revision);

    Ok(Json(ChangeResponse {
        success: true,
        revision,
    }))
}
