//! Error types for map operations

use crate::hex::Hex;

/// Errors raised at the map boundary. None of them leave the map modified.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    /// Coordinate outside the map radius
    #[error("coordinate ({q}, {r}) is outside a map of radius {radius}")]
    InvalidCoordinate { q: i32, r: i32, radius: i32 },

    /// Attempt to break the camp invariant
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// Snapshot document failed structural validation
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),

    /// Radius negative or above `MAX_MAP_RADIUS`
    #[error("invalid map radius: {0}")]
    InvalidRadius(i32),
}

impl MapError {
    pub fn out_of_bounds(hex: Hex, radius: i32) -> Self {
        MapError::InvalidCoordinate {
            q: hex.q,
            r: hex.r,
            radius,
        }
    }

    /// Short machine-readable name, used by the HTTP API
    pub fn kind(&self) -> &'static str {
        match self {
            MapError::InvalidCoordinate { .. } => "invalid_coordinate",
            MapError::InvariantViolation(_) => "invariant_violation",
            MapError::MalformedSnapshot(_) => "malformed_snapshot",
            MapError::InvalidRadius(_) => "invalid_radius",
        }
    }
}

pub type Result<T> = std::result::Result<T, MapError>;
