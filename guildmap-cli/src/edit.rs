//! Map file commands - create and edit snapshot files
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run_new(), run_edit() - orchestration
//! - Level 2: load_map(), apply_edits(), save_map()
//! - Level 4: path checks

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use guildmap_core::{Hex, HexMap, Snapshot, Terrain, DEFAULT_MAP_RADIUS};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct NewArgs {
    /// Output snapshot file
    #[arg(long, short, value_name = "FILE")]
    pub output: PathBuf,

    /// Map radius
    #[arg(long, default_value_t = DEFAULT_MAP_RADIUS)]
    pub radius: i32,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct EditArgs {
    /// Snapshot file to edit in place
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Cell to paint as "q,r" (repeatable)
    #[arg(long = "cell", value_name = "Q,R", required = true, allow_hyphen_values = true)]
    pub cells: Vec<Hex>,

    /// Terrain tag to paint
    #[arg(long)]
    pub terrain: Terrain,

    /// Write to a different file instead of editing in place
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Write a blank map
pub fn run_new(args: NewArgs) -> Result<()> {
    if args.output.exists() && !args.force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            args.output.display()
        );
    }

    let map = HexMap::new(args.radius)?;
    save_map(&map, &args.output)?;

    tracing::info!(
        "Wrote blank map of radius {} ({} cells) to {}",
        map.radius(),
        map.len(),
        args.output.display()
    );
    Ok(())
}

/// Paint cells in a snapshot file
///
/// All edits are applied to an in-memory copy first; the file is only
/// written if every edit succeeds.
pub fn run_edit(args: EditArgs) -> Result<()> {
    let mut map = load_map(&args.file)?;
    let changed = apply_edits(&mut map, &args.cells, args.terrain)?;

    let output = args.output.as_deref().unwrap_or(&args.file);
    save_map(&map, output)?;

    tracing::info!(
        "Painted {} cell(s) as {} ({} changed), saved to {}",
        args.cells.len(),
        args.terrain,
        changed,
        output.display()
    );
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Load a snapshot file into a map
pub fn load_map(path: &Path) -> Result<HexMap> {
    let snapshot = Snapshot::load(path)
        .with_context(|| format!("Failed to load snapshot {}", path.display()))?;
    let map = snapshot
        .into_map()
        .with_context(|| format!("Invalid snapshot {}", path.display()))?;
    Ok(map)
}

/// Apply edits, returning how many cells actually changed
fn apply_edits(map: &mut HexMap, cells: &[Hex], terrain: Terrain) -> Result<usize> {
    let mut changed = 0;
    for &hex in cells {
        let previous = map
            .set(hex, terrain)
            .with_context(|| format!("Cannot paint ({hex})"))?;
        if previous != terrain {
            changed += 1;
        }
    }
    Ok(changed)
}

fn save_map(map: &HexMap, path: &Path) -> Result<()> {
    Snapshot::capture(map)
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))
}

// ============================================================================
// TESTS
// ============================================================================
