//! The village grid: one [`Cell`] per coordinate.
//!
//! Cells are keyed by [`GridPos`] in a `BTreeMap`, so iteration (and
//! therefore the persisted snapshot) runs row-major.

use std::collections::BTreeMap;

use village_types::{BuildingState, Cell, GridPos};

use crate::error::WorldError;

/// The terrain/building map held in memory.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    /// All cells indexed by their coordinate.
    cells: BTreeMap<GridPos, Cell>,
}

impl Grid {
    /// Create an empty grid.
    pub const fn new() -> Self {
        Self {
            cells: BTreeMap::new(),
        }
    }

    /// Insert a cell, replacing any cell already at its coordinate.
    ///
    /// Returns the replaced cell.
    pub fn insert(&mut self, cell: Cell) -> Option<Cell> {
        self.cells.insert(cell.pos, cell)
    }

    /// The cell at `pos`.
    pub fn get(&self, pos: GridPos) -> Option<&Cell> {
        self.cells.get(&pos)
    }

    /// Return the number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Return whether the grid holds no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }

    /// Set the building state of an existing cell.
    ///
    /// Returns the previous state.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::CellNotFound`] if the grid has no cell at `pos`.
    pub fn set_building(
        &mut self,
        pos: GridPos,
        state: BuildingState,
    ) -> Result<BuildingState, WorldError> {
        let cell = self
            .cells
            .get_mut(&pos)
            .ok_or(WorldError::CellNotFound(pos))?;
        let previous = cell.building;
        cell.building = state;
        Ok(previous)
    }

    /// Count cells in the given building state.
    pub fn count_in_state(&self, state: BuildingState) -> usize {
        self.cells.values().filter(|c| c.building == state).count()
    }
}

impl FromIterator<Cell> for Grid {
    fn from_iter<T: IntoIterator<Item = Cell>>(iter: T) -> Self {
        let mut grid = Self::new();
        for cell in iter {
            grid.insert(cell);
        }
        grid
    }
}
