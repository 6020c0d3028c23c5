//! Route and show commands - read-only queries against a snapshot file
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run_route(), run_show() - orchestration
//! - Level 2: plan_route(), report_route(), report_census()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use guildmap_core::{find_path, Hex, HexMap, Route, Snapshot, ORIGIN};

use crate::edit::load_map;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct RouteArgs {
    /// Snapshot file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Destination cell as "q,r"
    #[arg(long, value_name = "Q,R", allow_hyphen_values = true)]
    pub to: Hex,

    /// Start cell as "q,r" (defaults to the camp)
    #[arg(long, value_name = "Q,R", allow_hyphen_values = true)]
    pub from: Option<Hex>,

    /// Output the route as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Snapshot file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Serialize)]
struct RouteReport {
    from: Hex,
    to: Hex,
    reachable: bool,
    hops: usize,
    steps: Vec<Hex>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Plan a route and print it
pub fn run_route(args: RouteArgs) -> Result<()> {
    let map = load_map(&args.file)?;
    let from = args.from.unwrap_or(ORIGIN);
    let route = plan_route(&map, from, args.to)?;

    report_route(&route, from, args.to, args.json)
}

/// Print radius, capture time and per-terrain counts
pub fn run_show(args: ShowArgs) -> Result<()> {
    let snapshot = Snapshot::load(&args.file)
        .with_context(|| format!("Failed to load snapshot {}", args.file.display()))?;
    let timestamp = snapshot
        .timestamp
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| "unknown".to_string());
    let map = snapshot.into_map()?;

    println!("Map: {}", args.file.display());
    println!("Radius: {} ({} cells)", map.radius(), map.len());
    println!("Captured: {}", timestamp);
    report_census(&map);
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn plan_route(map: &HexMap, from: Hex, to: Hex) -> Result<Route> {
    let route = find_path(map, from, to)
        .with_context(|| format!("Cannot route ({from}) -> ({to})"))?;
    tracing::debug!("Route ({}) -> ({}): {} cells", from, to, route.len());
    Ok(route)
}

fn report_route(route: &Route, from: Hex, to: Hex, json: bool) -> Result<()> {
    if json {
        let report = RouteReport {
            from,
            to,
            reachable: route.is_reachable(),
            hops: route.hops(),
            steps: route.steps().to_vec(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if !route.is_reachable() {
        println!("No route from ({}) to ({})", from, to);
        return Ok(());
    }

    println!("Route ({}) -> ({}): {} hops", from, to, route.hops());
    println!("{}", format_steps(route.steps()));
    Ok(())
}

fn report_census(map: &HexMap) {
    println!("\n{:<18} {:>6}  {}", "Terrain", "Cells", "Passable");
    println!("{}", "-".repeat(36));
    for (terrain, count) in map.census() {
        let info = terrain.info();
        let passable = if terrain.is_traversable() { "yes" } else { "no" };
        println!("{:<18} {:>6}  {}", info.name, count, passable);
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn format_steps(steps: &[Hex]) -> String {
    steps
        .iter()
        .map(|h| format!("({h})"))
        .collect::<Vec<_>>()
        .join(" -> ")
}

// ============================================================================
// TESTS
// ============================================================================
