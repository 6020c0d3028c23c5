//! Integration tests for the guild map workspace
//!
//! Tests the full stack: geometry, map edits, route planning, snapshots and
//! server startup state.

use guildmap_core::{
    find_path, find_route_from_camp, region, Hex, HexMap, MapError, MapSession, Route, Snapshot,
    Terrain, ORIGIN,
};
use guildmap_server::{initial_state, ServerConfig};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST FIXTURES
// ============================================================================

/// Radius-2 map with a mountain east of the camp and a field north-east
fn detour_map() -> HexMap {
    let mut map = HexMap::new(2).unwrap();
    map.set(Hex::new(1, 0), Terrain::Mountain).unwrap();
    map.set(Hex::new(1, -1), Terrain::Field).unwrap();
    map
}

/// Impassable ring of the given radius around `center`
fn ring(center: Hex, radius: i32) -> Vec<Hex> {
    region(radius + 1)
        .into_iter()
        .map(|h| Hex::new(h.q + center.q, h.r + center.r))
        .filter(|h| h.distance_to(center) == radius)
        .collect()
}

fn assert_walkable(map: &HexMap, route: &Route) {
    for pair in route.steps().windows(2) {
        assert_eq!(pair[0].distance_to(pair[1]), 1);
    }
    for hex in route.steps().iter().skip(1) {
        assert!(map.is_traversable(*hex), "route enters {hex}");
    }
}

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("guildmap-it-{}-{}.json", name, std::process::id()))
}

// ============================================================================
// GEOMETRY
// ============================================================================

#[test]
fn test_region_and_neighbors() {
    for radius in 0..=10 {
        let hexes = region(radius);
        assert_eq!(hexes.len() as i32, 3 * radius * radius + 3 * radius + 1);

        for hex in &hexes {
            let neighbors: Vec<Hex> = hex.neighbors_within(radius).collect();
            for n in &neighbors {
                assert_eq!(hex.distance_to(*n), 1);
                assert!(n.is_within(radius));
            }
            if hex.distance_to_center() < radius {
                assert_eq!(neighbors.len(), 6, "interior {hex} at radius {radius}");
            }
        }
    }
}

// ============================================================================
// ROUTE PLANNING
// ============================================================================

#[test]
fn test_route_around_mountain() {
    let map = detour_map();
    let route = find_route_from_camp(&map, Hex::new(2, -1)).unwrap();

    assert_eq!(route.len(), 3);
    assert_eq!(route.start(), Some(ORIGIN));
    assert_eq!(route.end(), Some(Hex::new(2, -1)));
    assert!(!route.contains(Hex::new(1, 0)));
    assert_walkable(&map, &route);
}

#[test]
fn test_open_map_route_lengths() {
    let map = HexMap::new(6).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let hexes = region(6);

    for _ in 0..200 {
        let a = hexes[rng.gen_range(0..hexes.len())];
        let b = hexes[rng.gen_range(0..hexes.len())];
        let route = find_path(&map, a, b).unwrap();
        assert_eq!(route.len() as i32, a.distance_to(b) + 1);
        assert_walkable(&map, &route);
    }
}

#[test]
fn test_impassable_destinations() {
    let mut map = HexMap::new(5).unwrap();
    map.set(Hex::new(-3, 1), Terrain::Mountain).unwrap();
    map.set(Hex::new(2, 2), Terrain::Lake).unwrap();

    assert!(find_route_from_camp(&map, Hex::new(-3, 1)).unwrap().is_empty());
    assert!(find_route_from_camp(&map, Hex::new(2, 2)).unwrap().is_empty());
}

#[test]
fn test_enclosed_destination_unreachable() {
    let mut map = HexMap::new(8).unwrap();
    let target = Hex::new(4, -2);
    for hex in ring(target, 2) {
        map.set(hex, Terrain::Lake).unwrap();
    }
    map.set(target, Terrain::Chest).unwrap();

    assert!(find_route_from_camp(&map, target).unwrap().is_empty());
    // cells inside the ring can still reach each other
    let inner = find_path(&map, target, Hex::new(5, -2)).unwrap();
    assert_eq!(inner.hops(), 1);
}

#[test]
fn test_routes_through_fog() {
    let mut map = HexMap::new(4).unwrap();
    map.set(Hex::new(0, -1), Terrain::Field).unwrap();
    // everything else is unknown and still walkable
    let route = find_route_from_camp(&map, Hex::new(0, -4)).unwrap();
    assert_eq!(route.hops(), 4);
}

#[test]
fn test_edit_invalidates_route() {
    let mut session = MapSession::new(3).unwrap();
    let before = session.find_route(2, 0).unwrap();
    assert_eq!(before.hops(), 2);

    let middle = before.steps()[1];
    session.edit_cell(middle.q, middle.r, Terrain::Mountain).unwrap();

    let after = session.find_route(2, 0).unwrap();
    assert!(!after.contains(middle));
    assert_walkable(session.map(), &after);
}

// ============================================================================
// INVARIANTS
// ============================================================================

#[test]
fn test_camp_survives_everything() {
    let mut rng = ChaCha8Rng::seed_from_u64(77);
    let mut session = MapSession::new(4).unwrap();
    let terrains: Vec<Terrain> = Terrain::all().collect();

    for _ in 0..300 {
        let q = rng.gen_range(-5..=5);
        let r = rng.gen_range(-5..=5);
        let terrain = terrains[rng.gen_range(0..terrains.len())];
        match session.edit_cell(q, r, terrain) {
            Ok(_) => {}
            Err(MapError::InvalidCoordinate { .. }) => assert!(!Hex::new(q, r).is_within(4)),
            Err(MapError::InvariantViolation(_)) => {
                assert!(Hex::new(q, r).is_origin() || terrain == Terrain::Camp)
            }
            Err(e) => panic!("unexpected error {e}"),
        }
        assert_eq!(session.map().get(ORIGIN), Terrain::Camp);
    }

    let hostile = r#"{"radius": 4, "cells": {"0,0": "mountain", "2,2": "camp"}}"#;
    session.import_snapshot(hostile).unwrap();
    assert_eq!(session.map().get(ORIGIN), Terrain::Camp);
    assert_eq!(session.map().get(Hex::new(2, 2)), Terrain::Unknown);

    session.reset_map();
    assert_eq!(session.map(), &HexMap::new(4).unwrap());
}

// ============================================================================
// SNAPSHOTS
// ============================================================================

#[test]
fn test_snapshot_file_roundtrip() {
    let mut rng = ChaCha8Rng::seed_from_u64(12);
    let map = HexMap::random(7, 0.35, &mut rng).unwrap();
    let path = temp_path("roundtrip");

    Snapshot::capture(&map).save(&path).unwrap();
    let loaded = Snapshot::load(&path).unwrap().into_map().unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded, map);
    // same routes on both
    for target in [Hex::new(7, 0), Hex::new(-3, -4), Hex::new(0, 7)] {
        assert_eq!(
            find_route_from_camp(&map, target).unwrap(),
            find_route_from_camp(&loaded, target).unwrap()
        );
    }
}

#[test]
fn test_missing_cells_rejected() {
    let mut session = MapSession::new(2).unwrap();
    session.edit_cell(1, 1, Terrain::Enemy).unwrap();
    let before = session.map().clone();

    let err = session
        .import_snapshot(r#"{"radius": 2, "timestamp": "2025-02-03T04:05:06Z"}"#)
        .unwrap_err();
    assert_eq!(err.kind(), "malformed_snapshot");
    assert_eq!(session.map(), &before);
}

// ============================================================================
// SERVER STARTUP
// ============================================================================

#[test]
fn test_server_initial_state_from_snapshot() {
    let map = detour_map();
    let path = temp_path("server");
    Snapshot::capture(&map).save(&path).unwrap();

    let config = ServerConfig {
        radius: 2,
        snapshot: Some(path.clone()),
        ..ServerConfig::default()
    };
    let state = initial_state(&config).unwrap();
    assert_eq!(state.read().session.map(), &map);

    let mismatched = ServerConfig {
        radius: 3,
        snapshot: Some(path.clone()),
        ..ServerConfig::default()
    };
    assert!(initial_state(&mismatched).is_err());
    std::fs::remove_file(&path).ok();

    let huge = temp_path("huge");
    std::fs::write(&huge, r#"{"radius": 2147483647, "cells": {}}"#).unwrap();
    let oversized = ServerConfig {
        radius: 2147483647,
        snapshot: Some(huge.clone()),
        ..ServerConfig::default()
    };
    assert!(initial_state(&oversized).is_err());
    std::fs::remove_file(&huge).ok();

    let blank = initial_state(&ServerConfig {
        radius: 3,
        ..ServerConfig::default()
    })
    .unwrap();
    assert_eq!(blank.read().session.radius(), 3);
}
