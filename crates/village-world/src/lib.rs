//! Terrain, grid, and grid persistence for the Pencil Village state core.
//!
//! # Modules
//!
//! - [`terrain`] -- Deterministic default terrain in column bands.
//! - [`grid`] -- [`Grid`], the coordinate-keyed map of cells.
//! - [`grid_store`] -- [`GridStateStore`]: load (with one-time terrain
//!   generation), save, and clear against the key-value store.
//! - [`error`] -- Error types for grid operations.

pub mod error;
pub mod grid;
pub mod grid_store;
pub mod terrain;

// Re-export primary types at crate root.
pub use error::WorldError;
pub use grid::Grid;
pub use grid_store::GridStateStore;
pub use terrain::{GridDimensions, TerrainBand, TerrainBands, generate_terrain};
