//! Server state management
//!
//! One map session shared by every request. Edits, resets and imports take
//! the write lock; reads, routes and exports take the read lock, so a reader
//! never sees a half-applied import.

use guildmap_core::{HexMap, MapError, MapSession};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// The session plus a revision counter bumped on every change, so a
/// renderer can tell when its copy is stale
#[derive(Debug, Default)]
pub struct SharedMap {
    pub session: MapSession,
    pub revision: u64,
}

impl SharedMap {
    pub fn touch(&mut self) -> u64 {
        self.revision += 1;
        self.revision
    }
}

/// Server-wide shared state
pub struct ServerState {
    map: RwLock<SharedMap>,
}

impl ServerState {
    pub fn new(radius: i32) -> Result<Self, MapError> {
        Ok(Self::with_session(MapSession::new(radius)?))
    }

    pub fn with_map(map: HexMap) -> Self {
        Self::with_session(MapSession::from_map(map))
    }

    pub fn with_session(session: MapSession) -> Self {
        Self {
            map: RwLock::new(SharedMap {
                session,
                revision: 0,
            }),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, SharedMap> {
        self.map.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, SharedMap> {
        self.map.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::with_session(MapSession::default())
    }
}
