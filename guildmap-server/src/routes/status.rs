//! Status endpoint

use crate::state::ServerState;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub radius: i32,
    pub cells: usize,
    pub revision: u64,
}

/// Liveness plus enough about the session for a renderer to size its canvas
pub async fn status_handler(State(state): State<Arc<ServerState>>) -> Json<StatusResponse> {
    let shared = state.read();
    Json(StatusResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        radius: shared.session.radius(),
        cells: shared.session.map().len(),
        revision: shared.revision,
    })
}
