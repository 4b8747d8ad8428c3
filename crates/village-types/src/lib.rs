//! Shared type definitions for the Pencil Village state core.
//!
//! The resource ledger, the grid store and the UI layer all speak in these
//! types. UI-facing types flow downstream to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`enums`] -- [`Resource`], [`Terrain`], [`BuildingState`] and tag parsing
//! - [`structs`] -- Grid coordinates, cells, and persisted JSON records

pub mod enums;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{BuildingState, Resource, Terrain, UnknownTag};
pub use structs::{Cell, CellRecord, GridPos, ResourceRecord, ResourceSnapshot};
