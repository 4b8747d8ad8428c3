//! Persistence layer for the Pencil Village state core.
//!
//! The ledger and the grid store persist themselves as string blobs in an
//! asynchronous key-value store. This crate provides that store as
//! [`KvStore`], with two backends:
//!
//! ```text
//! ResourceLedger ---+
//!                   +--> KvStore --+--> DragonflyStore (Redis protocol)
//! GridStateStore ---+              +--> MemoryStore    (in-process map)
//! ```
//!
//! # Modules
//!
//! - [`store`] -- [`KvStore`], the enum-dispatched get/set/remove contract
//! - [`dragonfly`] -- `Dragonfly` (Redis-compatible) backend
//! - [`memory`] -- In-memory backend with injectable failures
//! - [`keys`] -- The keys used by the core
//! - [`error`] -- Shared error types

pub mod dragonfly;
pub mod error;
pub mod memory;
pub mod store;

// Re-export primary types for convenience.
pub use dragonfly::DragonflyStore;
pub use error::StoreError;
pub use memory::MemoryStore;
pub use store::KvStore;

/// Keys written by the core.
///
/// | Key | Value |
/// |-----|-------|
/// | `player-resources` | JSON `{Wood, Stone, Gold, DepotCount}` |
/// | `grid-state` | JSON array of `{Row, Col, Terrain, Building}` |
/// | `terrain-initialized` | Presence marker, `"true"` |
pub mod keys {
    /// The ledger snapshot.
    pub const PLAYER_RESOURCES: &str = "player-resources";
    /// The grid snapshot.
    pub const GRID_STATE: &str = "grid-state";
    /// Written once default terrain has been generated.
    pub const TERRAIN_INITIALIZED: &str = "terrain-initialized";
    /// Value stored under [`TERRAIN_INITIALIZED`].
    pub const MARKER_VALUE: &str = "true";
}
