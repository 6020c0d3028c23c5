//! HTTP route handlers

pub mod map;
pub mod route;
pub mod status;
pub mod terrain;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use guildmap_core::{Hex, MapError, DEFAULT_CELL_SIZE};
use serde::Serialize;
use serde_json::json;

/// Error body returned by every endpoint: `{ "error", "kind" }`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    kind: &'static str,
    message: String,
}

impl ApiError {
    pub fn bad_request(kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            kind,
            message: message.into(),
        }
    }
}

impl From<MapError> for ApiError {
    fn from(err: MapError) -> Self {
        let status = match &err {
            MapError::InvalidCoordinate { .. } | MapError::InvalidRadius(_) => {
                StatusCode::BAD_REQUEST
            }
            MapError::InvariantViolation(_) => StatusCode::CONFLICT,
            MapError::MalformedSnapshot(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        Self {
            status,
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.message, "kind": self.kind }));
        (self.status, body).into_response()
    }
}

pub type ApiResult<T> = Result<Json<T>, ApiError>;

/// A cell as the renderer sees it: cube coordinates plus plane position
#[derive(Clone, Debug, Serialize)]
pub struct CellPosition {
    pub q: i32,
    pub r: i32,
    pub s: i32,
    pub x: f64,
    pub y: f64,
}

impl From<Hex> for CellPosition {
    fn from(hex: Hex) -> Self {
        let (x, y) = hex.to_plane(DEFAULT_CELL_SIZE);
        Self {
            q: hex.q,
            r: hex.r,
            s: hex.s(),
            x,
            y,
        }
    }
}
