//! Map state: terrain per cell, with the camp pinned at the origin

use rand::Rng;
use rustc_hash::FxHashMap;

use crate::error::{MapError, Result};
use crate::hex::{region, Hex, DEFAULT_MAP_RADIUS, MAX_MAP_RADIUS, ORIGIN};
use crate::terrain::Terrain;

/// Terrain a random map scatters when a cell is discovered but passable
const OPEN_TERRAIN: [Terrain; 6] = [
    Terrain::Field,
    Terrain::Field,
    Terrain::Field,
    Terrain::Signal,
    Terrain::Chest,
    Terrain::Mine,
];

/// A bounded hexagonal map.
///
/// Every in-bounds coordinate has an entry, the origin is always
/// [`Terrain::Camp`], and no other cell is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HexMap {
    radius: i32,
    coords: Vec<Hex>,
    cells: FxHashMap<Hex, Terrain>,
}

impl HexMap {
    /// Fresh map: everything unknown except the camp
    pub fn new(radius: i32) -> Result<Self> {
        if !(0..=MAX_MAP_RADIUS).contains(&radius) {
            return Err(MapError::InvalidRadius(radius));
        }
        let coords = region(radius);
        let cells = default_cells(&coords);
        Ok(Self {
            radius,
            coords,
            cells,
        })
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn contains(&self, hex: Hex) -> bool {
        hex.is_within(self.radius)
    }

    /// Terrain at `hex`; unknown for anything the map doesn't hold
    pub fn get(&self, hex: Hex) -> Terrain {
        self.cells.get(&hex).copied().unwrap_or_default()
    }

    /// Out-of-bounds cells are never traversable
    pub fn is_traversable(&self, hex: Hex) -> bool {
        self.contains(hex) && self.get(hex).is_traversable()
    }

    /// Record terrain for a single cell, returning what was there before
    pub fn set(&mut self, hex: Hex, terrain: Terrain) -> Result<Terrain> {
        self.check_bounds(hex)?;
        if hex.is_origin() {
            return Err(MapError::InvariantViolation(
                "the camp at (0, 0) cannot be changed".to_string(),
            ));
        }
        if terrain == Terrain::Camp {
            return Err(MapError::InvariantViolation(format!(
                "cannot place a second camp at ({hex})"
            )));
        }
        Ok(self.cells.insert(hex, terrain).unwrap_or_default())
    }

    /// Replace the whole map. Entries are validated before anything is
    /// applied; cells not mentioned become unknown. The camp is re-pinned
    /// to the origin whatever the input says.
    pub fn replace_all<I>(&mut self, cells: I) -> Result<()>
    where
        I: IntoIterator<Item = (Hex, Terrain)>,
    {
        let mut next = default_cells(&self.coords);
        for (hex, terrain) in cells {
            self.check_bounds(hex)?;
            next.insert(hex, terrain);
        }

        match next.insert(ORIGIN, Terrain::Camp) {
            Some(Terrain::Camp) | None => {}
            Some(other) => {
                tracing::warn!("imported map overwrote the camp with '{}', restoring camp", other);
            }
        }
        for (hex, terrain) in next.iter_mut() {
            if *terrain == Terrain::Camp && !hex.is_origin() {
                tracing::warn!("imported map placed a camp at ({}), marking it unknown", hex);
                *terrain = Terrain::Unknown;
            }
        }

        self.cells = next;
        Ok(())
    }

    /// Back to the initial state at the same radius
    pub fn clear(&mut self) {
        self.cells = default_cells(&self.coords);
    }

    /// Cells in region order (`q` then `r`)
    pub fn iter(&self) -> impl Iterator<Item = (Hex, Terrain)> + '_ {
        self.coords.iter().map(move |&hex| (hex, self.get(hex)))
    }

    /// Number of cells per terrain, in [`Terrain`] declaration order
    pub fn census(&self) -> Vec<(Terrain, usize)> {
        let mut counts = FxHashMap::<Terrain, usize>::default();
        for terrain in self.cells.values() {
            *counts.entry(*terrain).or_default() += 1;
        }
        Terrain::all()
            .map(|t| (t, counts.get(&t).copied().unwrap_or(0)))
            .collect()
    }

    /// Random discovered map for benchmarking.
    ///
    /// Each non-camp cell is discovered with probability 0.5; a discovered
    /// cell is impassable (mountain or lake) with probability
    /// `obstacle_ratio`, otherwise some passable terrain.
    pub fn random<R: Rng>(radius: i32, obstacle_ratio: f64, rng: &mut R) -> Result<Self> {
        let mut map = Self::new(radius)?;
        let ratio = if obstacle_ratio.is_nan() {
            0.0
        } else {
            obstacle_ratio.clamp(0.0, 1.0)
        };
        for hex in map.coords.clone() {
            if hex.is_origin() || !rng.gen_bool(0.5) {
                continue;
            }
            let terrain = if rng.gen_bool(ratio) {
                if rng.gen_bool(0.5) {
                    Terrain::Mountain
                } else {
                    Terrain::Lake
                }
            } else {
                OPEN_TERRAIN[rng.gen_range(0..OPEN_TERRAIN.len())]
            };
            map.cells.insert(hex, terrain);
        }
        Ok(map)
    }

    fn check_bounds(&self, hex: Hex) -> Result<()> {
        if self.contains(hex) {
            Ok(())
        } else {
            Err(MapError::out_of_bounds(hex, self.radius))
        }
    }
}

impl Default for HexMap {
    fn default() -> Self {
        let coords = region(DEFAULT_MAP_RADIUS);
        let cells = default_cells(&coords);
        Self {
            radius: DEFAULT_MAP_RADIUS,
            coords,
            cells,
        }
    }
}

fn default_cells(coords: &[Hex]) -> FxHashMap<Hex, Terrain> {
    coords
        .iter()
        .map(|&hex| {
            let terrain = if hex.is_origin() {
                Terrain::Camp
            } else {
                Terrain::Unknown
            };
            (hex, terrain)
        })
        .collect()
}
