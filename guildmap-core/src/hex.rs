//! Hex geometry with axial/cube coordinates

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MapError;

/// Default map radius (distance from camp to edge)
pub const DEFAULT_MAP_RADIUS: i32 = 16;

/// Largest radius a map may have. Keeps region allocation bounded for
/// radii that arrive from files or requests.
pub const MAX_MAP_RADIUS: i32 = 1024;

/// Default cell size used by the planar projection
pub const DEFAULT_CELL_SIZE: f64 = 15.0;

/// The camp sits here, always
pub const ORIGIN: Hex = Hex::new(0, 0);

/// Axial hex coordinates. The cube component `s` is derived as `-q - r`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hex {
    pub q: i32,
    pub r: i32,
}

impl Hex {
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Third cube component. Exact for every coordinate whose `q + r`
    /// fits in an `i32`, which includes all in-bounds cells.
    pub const fn s(&self) -> i32 {
        0i32.wrapping_sub(self.q).wrapping_sub(self.r)
    }

    pub fn is_origin(&self) -> bool {
        *self == ORIGIN
    }

    /// Check if this hex lies inside a map of the given radius
    pub fn is_within(&self, radius: i32) -> bool {
        radius >= 0 && cube_distance(self, &ORIGIN) <= radius as u64
    }

    /// Distance from center (0,0)
    pub fn distance_to_center(&self) -> i32 {
        self.distance_to(ORIGIN)
    }

    /// Distance between two hexes: `max(|dq|, |dr|, |ds|)`.
    /// Saturates at `i32::MAX` for coordinates near the ends of the range.
    pub fn distance_to(&self, other: Hex) -> i32 {
        i32::try_from(cube_distance(self, &other)).unwrap_or(i32::MAX)
    }

    /// Get neighbor in direction (0-5)
    pub fn neighbor(&self, direction: usize) -> Hex {
        let (dq, dr) = DIRECTIONS[direction % 6];
        Hex::new(self.q + dq, self.r + dr)
    }

    /// All six neighbors, unbounded
    pub fn neighbors(&self) -> [Hex; 6] {
        std::array::from_fn(|d| self.neighbor(d))
    }

    /// Neighbors that stay inside a map of the given radius
    pub fn neighbors_within(&self, radius: i32) -> impl Iterator<Item = Hex> {
        self.neighbors().into_iter().filter(move |h| h.is_within(radius))
    }

    /// Planar center of this cell for a renderer, flat-top layout
    pub fn to_plane(&self, size: f64) -> (f64, f64) {
        let sqrt3 = 3f64.sqrt();
        let q = f64::from(self.q);
        let r = f64::from(self.r);
        let x = size * (sqrt3 * q + sqrt3 / 2.0 * r);
        let y = size * (1.5 * r);
        (x, y)
    }
}

/// Cube distance computed in `i64`, so no pair of `i32` coordinates overflows
fn cube_distance(a: &Hex, b: &Hex) -> u64 {
    let dq = i64::from(a.q) - i64::from(b.q);
    let dr = i64::from(a.r) - i64::from(b.r);
    let ds = -dq - dr;
    dq.unsigned_abs().max(dr.unsigned_abs()).max(ds.unsigned_abs())
}

/// Direction vectors in axial coordinates (dq, dr).
/// Neighbor enumeration follows this order.
pub const DIRECTIONS: [(i32, i32); 6] = [
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
];

/// Every coordinate of a hexagonal region, ordered by `q` then `r`.
///
/// Yields `3R² + 3R + 1` hexes for `R >= 0` and nothing for a negative radius.
pub fn region(radius: i32) -> Vec<Hex> {
    if radius < 0 {
        return Vec::new();
    }
    let mut hexes = Vec::with_capacity(region_size(radius));
    for q in -radius..=radius {
        let r1 = (-radius).max(-q - radius);
        let r2 = radius.min(-q + radius);
        for r in r1..=r2 {
            hexes.push(Hex::new(q, r));
        }
    }
    hexes
}

/// Number of cells in a region of the given radius
pub fn region_size(radius: i32) -> usize {
    if radius < 0 {
        return 0;
    }
    let r = radius as usize;
    3 * r * r + 3 * r + 1
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.q, self.r)
    }
}

/// Parses the `"q,r"` cell key used by snapshots and the CLI
impl FromStr for Hex {
    type Err = MapError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let bad = || MapError::MalformedSnapshot(format!("invalid cell key '{key}'"));
        let (q, r) = key.split_once(',').ok_or_else(bad)?;
        let q = q.trim().parse::<i32>().map_err(|_| bad())?;
        let r = r.trim().parse::<i32>().map_err(|_| bad())?;
        Ok(Hex::new(q, r))
    }
}
