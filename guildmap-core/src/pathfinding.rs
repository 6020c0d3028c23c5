//! A* route search over the hex adjacency graph
//!
//! Edges have uniform cost, hex distance is the heuristic, and only
//! traversable cells are entered. The frontier is a min-heap keyed on
//! `(f, discovery order)`: among nodes with equal `f`, the one first
//! discovered is expanded first, which fixes which of several shortest
//! routes is returned.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use crate::error::{MapError, Result};
use crate::hex::{Hex, ORIGIN};
use crate::map::HexMap;

// ============================================================================
// ROUTE
// ============================================================================

/// Ordered cells from start to end. Empty means no route exists.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Route {
    steps: Vec<Hex>,
}

impl Route {
    /// The "no route" result
    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[Hex] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<Hex> {
        self.steps
    }

    /// Number of cells, start and end included
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_reachable(&self) -> bool {
        !self.steps.is_empty()
    }

    /// Moves needed to walk the route
    pub fn hops(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<Hex> {
        self.steps.first().copied()
    }

    pub fn end(&self) -> Option<Hex> {
        self.steps.last().copied()
    }

    pub fn contains(&self, hex: Hex) -> bool {
        self.steps.contains(&hex)
    }
}

// ============================================================================
// FRONTIER
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Frontier {
    f: i32,
    g: i32,
    order: u32,
    hex: Hex,
}

impl Ord for Frontier {
    // BinaryHeap is a max-heap: reverse so the smallest (f, order) pops first
    fn cmp(&self, other: &Self) -> Ordering {
        Reverse((self.f, self.order)).cmp(&Reverse((other.f, other.order)))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================================
// SEARCH
// ============================================================================

/// Shortest traversable route from `start` to `end`.
///
/// Errors only for out-of-bounds coordinates. An impassable destination, or
/// one walled off from `start`, yields an empty route. The start cell itself
/// is not checked for traversability.
pub fn find_path(map: &HexMap, start: Hex, end: Hex) -> Result<Route> {
    for hex in [start, end] {
        if !map.contains(hex) {
            return Err(MapError::out_of_bounds(hex, map.radius()));
        }
    }

    if !map.get(end).is_traversable() {
        tracing::debug!("destination ({}) is impassable", end);
        return Ok(Route::unreachable());
    }

    let radius = map.radius();
    let mut open = BinaryHeap::new();
    let mut came_from: FxHashMap<Hex, Hex> = FxHashMap::default();
    let mut g_score: FxHashMap<Hex, i32> = FxHashMap::default();
    let mut discovered: FxHashMap<Hex, u32> = FxHashMap::default();
    let mut closed: FxHashSet<Hex> = FxHashSet::default();
    let mut next_order = 0u32;

    g_score.insert(start, 0);
    discovered.insert(start, next_order);
    open.push(Frontier {
        f: start.distance_to(end),
        g: 0,
        order: next_order,
        hex: start,
    });

    while let Some(node) = open.pop() {
        let current = node.hex;
        if g_score.get(&current) != Some(&node.g) || !closed.insert(current) {
            continue; // stale entry
        }

        if current == end {
            tracing::debug!(
                "route ({}) -> ({}) found: {} hops, {} nodes expanded",
                start,
                end,
                node.g,
                closed.len()
            );
            return Ok(reconstruct(&came_from, start, end));
        }

        for neighbor in current.neighbors_within(radius) {
            if !map.get(neighbor).is_traversable() {
                continue;
            }

            let tentative = node.g + 1;
            let improves = g_score.get(&neighbor).map_or(true, |&g| tentative < g);
            if !improves {
                continue;
            }

            came_from.insert(neighbor, current);
            g_score.insert(neighbor, tentative);
            let order = *discovered.entry(neighbor).or_insert_with(|| {
                next_order += 1;
                next_order
            });
            open.push(Frontier {
                f: tentative + neighbor.distance_to(end),
                g: tentative,
                order,
                hex: neighbor,
            });
        }
    }

    tracing::debug!(
        "no route ({}) -> ({}), {} nodes expanded",
        start,
        end,
        closed.len()
    );
    Ok(Route::unreachable())
}

/// Route from the camp to `end`
pub fn find_route_from_camp(map: &HexMap, end: Hex) -> Result<Route> {
    find_path(map, ORIGIN, end)
}

fn reconstruct(came_from: &FxHashMap<Hex, Hex>, start: Hex, end: Hex) -> Route {
    let mut steps = vec![end];
    let mut current = end;
    while current != start {
        match came_from.get(&current) {
            Some(&prev) => {
                steps.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    steps.reverse();
    Route { steps }
}

// ============================================================================
// TESTS
// ============================================================================
