//! Route endpoint

use crate::routes::{ApiResult, CellPosition};
use crate::state::ServerState;
use axum::extract::{Query, State};
use axum::Json;
use guildmap_core::Hex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct RouteParams {
    pub q: i32,
    pub r: i32,
}

#[derive(Serialize)]
pub struct RouteResponse {
    pub destination: CellPosition,
    pub reachable: bool,
    pub hops: usize,
    pub steps: Vec<CellPosition>,
}

/// Shortest route from the camp to `(q, r)`
pub async fn find_route(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<RouteParams>,
) -> ApiResult<RouteResponse> {
    let route = state.read().session.find_route(params.q, params.r)?;

    Ok(Json(RouteResponse {
        destination: Hex::new(params.q, params.r).into(),
        reachable: route.is_reachable(),
        hops: route.hops(),
        steps: route.into_steps().into_iter().map(CellPosition::from).collect(),
    }))
}
