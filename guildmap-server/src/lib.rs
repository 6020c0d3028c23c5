//! Guildmap Server - HTTP API for the map editor
//!
//! This crate provides the web backend:
//! - REST API for map reads, cell edits, reset and routes
//! - Snapshot export/import
//! - Static file serving for the browser renderer

mod routes;
mod state;

use axum::{
    routing::{get, post},
    Router,
};
use guildmap_core::{Snapshot, DEFAULT_MAP_RADIUS};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;

pub use routes::ApiError;
pub use state::{ServerState, SharedMap};

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: String,
    pub radius: i32,
    /// Snapshot loaded into the session at startup
    pub snapshot: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8017,
            static_dir: "web".to_string(),
            radius: DEFAULT_MAP_RADIUS,
            snapshot: None,
        }
    }
}

/// Create the router with all routes
pub fn create_router(config: &ServerConfig, state: Arc<ServerState>) -> Router {
    let static_service = ServeDir::new(&config.static_dir);

    Router::new()
        // Status endpoint
        .route("/api/status", get(routes::status::status_handler))
        // Terrain catalogue
        .route("/api/terrain", get(routes::terrain::get_terrain))
        // Map API
        .route("/api/map", get(routes::map::get_map))
        .route("/api/map/cell", post(routes::map::edit_cell))
        .route("/api/map/reset", post(routes::map::reset_map))
        .route("/api/map/export", get(routes::map::export_map))
        .route("/api/map/import", post(routes::map::import_map))
        // Route planning
        .route("/api/route", get(routes::route::find_route))
        // Shared state
        .with_state(state)
        // Static file serving (must be last)
        .fallback_service(static_service)
}

/// Build the initial state: a blank map, or the configured snapshot
pub fn initial_state(config: &ServerConfig) -> anyhow::Result<ServerState> {
    let Some(path) = &config.snapshot else {
        return Ok(ServerState::new(config.radius)?);
    };

    let snapshot = Snapshot::load(path)?;
    if snapshot.radius != config.radius {
        anyhow::bail!(
            "snapshot {} has radius {}, server is configured for {}",
            path.display(),
            snapshot.radius,
            config.radius
        );
    }
    let map = snapshot.into_map()?;
    tracing::info!("Loaded map snapshot from {}", path.display());
    Ok(ServerState::with_map(map))
}

/// Start the HTTP server
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(initial_state(&config)?);
    let router = create_router(&config, state);

    tracing::info!("Guildmap server starting on http://0.0.0.0:{}", config.port);
    tracing::info!("Map radius {}", config.radius);
    tracing::info!("Static files served from: {}", config.static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
