//! Value objects shared by the grid and the ledger.
//!
//! Covers grid coordinates and cells, plus the JSON records written to the
//! key-value store. Persisted records use `PascalCase` field names.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{BuildingState, Terrain};

// ---------------------------------------------------------------------------
// Grid coordinates and cells
// ---------------------------------------------------------------------------

/// A grid coordinate. The identity of a [`Cell`].
///
/// Ordered row-major, so a `BTreeMap<GridPos, _>` iterates row by row.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub struct GridPos {
    /// Zero-based row index.
    pub row: u32,
    /// Zero-based column index.
    pub col: u32,
}

impl GridPos {
    /// Create a coordinate.
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl core::fmt::Display for GridPos {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One square of the village grid.
///
/// Two cells are equal (and hash alike) when they sit at the same
/// [`GridPos`]; terrain and building state are not part of identity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Cell {
    /// Where the cell sits.
    pub pos: GridPos,
    /// Terrain assigned at generation.
    pub terrain: Terrain,
    /// Building coverage.
    pub building: BuildingState,
}

impl Cell {
    /// An unbuilt cell with the given terrain.
    pub const fn new(pos: GridPos, terrain: Terrain) -> Self {
        Self {
            pos,
            terrain,
            building: BuildingState::None,
        }
    }

    /// Whether this cell is one square of a building.
    pub const fn is_built(&self) -> bool {
        matches!(self.building, BuildingState::PartOfBuilding)
    }

}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl Eq for Cell {}

impl core::hash::Hash for Cell {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.pos.hash(state);
    }
}

impl core::fmt::Display for Cell {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Cell{} - {}, {}", self.pos, self.terrain, self.building)
    }
}

// ---------------------------------------------------------------------------
// Persisted records
// ---------------------------------------------------------------------------

/// One element of the `grid-state` JSON array.
///
/// Terrain and building are kept as raw strings so a record with an
/// unknown tag can be detected and dropped on load instead of failing the
/// whole array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CellRecord {
    /// Row index.
    pub row: u32,
    /// Column index.
    pub col: u32,
    /// Terrain tag, e.g. `"Woods"`.
    pub terrain: String,
    /// Building tag, e.g. `"None"`.
    pub building: String,
}

impl From<&Cell> for CellRecord {
    fn from(cell: &Cell) -> Self {
        Self {
            row: cell.pos.row,
            col: cell.pos.col,
            terrain: cell.terrain.as_str().to_owned(),
            building: cell.building.as_str().to_owned(),
        }
    }
}

impl TryFrom<CellRecord> for Cell {
    type Error = crate::enums::UnknownTag;

    fn try_from(record: CellRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            pos: GridPos::new(record.row, record.col),
            terrain: record.terrain.parse()?,
            building: record.building.parse()?,
        })
    }
}

/// The `player-resources` JSON object.
///
/// Max storage is deliberately absent: it is re-derived from the depot
/// count on every load. Fields are signed so that out-of-range values in
/// hand-edited or older snapshots still deserialize and can be clamped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ResourceRecord {
    /// Stored wood.
    pub wood: i64,
    /// Stored stone.
    pub stone: i64,
    /// Stored gold.
    pub gold: i64,
    /// Number of depots.
    pub depot_count: i64,
}

/// A read-only view of the ledger, handed to observers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ResourceSnapshot {
    /// Stored wood.
    pub wood: u32,
    /// Stored stone.
    pub stone: u32,
    /// Stored gold.
    pub gold: u32,
    /// Number of depots (0 to 4).
    pub depot_count: u32,
    /// Per-resource cap derived from the depot count.
    pub max_storage: u32,
}
