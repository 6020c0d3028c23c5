//! Server command - start the map editor server
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: configure_server(), start_server()
//! - Level 3: (delegated to guildmap-server crate)
//! - Level 4: configuration validation

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use guildmap_core::{DEFAULT_MAP_RADIUS, MAX_MAP_RADIUS};
use guildmap_server::{run_server, ServerConfig};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ServerArgs {
    /// Port number to listen on
    #[arg(long, default_value = "8017")]
    pub port: u16,

    /// Directory containing static files for the map renderer
    #[arg(long, default_value = "web")]
    pub static_dir: PathBuf,

    /// Map radius for this session
    #[arg(long, default_value_t = DEFAULT_MAP_RADIUS)]
    pub radius: i32,

    /// Snapshot to load at startup
    #[arg(long, value_name = "FILE")]
    pub snapshot: Option<PathBuf>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run server command
///
/// 1. Configure server
/// 2. Start server (blocking)
pub fn run(args: ServerArgs) -> Result<()> {
    let config = configure_server(&args)?;

    tracing::info!("Starting guildmap server on port {}", config.port);

    start_server(config)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Configure server from command arguments
fn configure_server(args: &ServerArgs) -> Result<ServerConfig> {
    validate_static_dir(&args.static_dir)?;
    validate_radius(args.radius)?;
    if let Some(path) = &args.snapshot {
        validate_snapshot_path(path)?;
    }

    Ok(ServerConfig {
        port: args.port,
        static_dir: args.static_dir.to_string_lossy().to_string(),
        radius: args.radius,
        snapshot: args.snapshot.clone(),
    })
}

/// Start the server (blocking)
fn start_server(config: ServerConfig) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;

    runtime.block_on(async { run_server(config).await })
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Validate that static directory exists
fn validate_static_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        tracing::warn!(
            "Static directory does not exist: {}. Server will start but may not serve files.",
            path.display()
        );
    } else if !path.is_dir() {
        anyhow::bail!(
            "Static path exists but is not a directory: {}",
            path.display()
        );
    }

    Ok(())
}

fn validate_radius(radius: i32) -> Result<()> {
    if !(0..=MAX_MAP_RADIUS).contains(&radius) {
        anyhow::bail!(
            "Map radius must be between 0 and {}, got {}",
            MAX_MAP_RADIUS,
            radius
        );
    }
    Ok(())
}

fn validate_snapshot_path(path: &Path) -> Result<()> {
    if !path.is_file() {
        anyhow::bail!("Snapshot file not found: {}", path.display());
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ServerArgs {
        ServerArgs {
            port: 8017,
            static_dir: PathBuf::from("test_static"),
            radius: 5,
            snapshot: None,
        }
    }

    #[test]
    fn test_configure_server_defaults() {
        let config = configure_server(&args()).unwrap();
        assert_eq!(config.port, 8017);
        assert_eq!(config.static_dir, "test_static");
        assert_eq!(config.radius, 5);
        assert!(config.snapshot.is_none());
    }

    #[test]
    fn test_validate_static_dir_nonexistent() {
        // Should not error, just warn
        let result = validate_static_dir(Path::new("/nonexistent/path"));
        assert!(result.is_ok());
    }

    #[test]
    fn test_rejects_bad_radius_and_missing_snapshot() {
        let mut bad = args();
        bad.radius = -2;
        assert!(configure_server(&bad).is_err());
        bad.radius = MAX_MAP_RADIUS + 1;
        assert!(configure_server(&bad).is_err());
        bad.radius = MAX_MAP_RADIUS;
        assert!(configure_server(&bad).is_ok());

        let mut missing = args();
        missing.snapshot = Some(PathBuf::from("/nonexistent/map.json"));
        assert!(configure_server(&missing).is_err());
    }
}
