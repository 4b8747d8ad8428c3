//! Persistence of the village grid.
//!
//! The grid lives under `grid-state` as a JSON array of
//! `{Row, Col, Terrain, Building}` records. A second key,
//! `terrain-initialized`, records that default terrain has been generated
//! once, which separates "never started" from "deliberately cleared":
//!
//! | `grid-state` | marker | `load()` returns |
//! |--------------|--------|------------------|
//! | present | any | the decoded grid (bad records dropped) |
//! | absent | absent | freshly generated terrain, persisted |
//! | absent | present | an empty grid |
//!
//! Storage failures never escape this module. They are logged and the
//! caller gets an empty grid (on load) or nothing (on save/clear).

use tracing::{debug, info, warn};
use village_store::{KvStore, StoreError, keys};
use village_types::{BuildingState, Cell, CellRecord};

use crate::grid::Grid;
use crate::terrain::{GridDimensions, TerrainBands, generate_terrain};

/// Loads, saves and clears the grid snapshot.
///
/// Holds no grid itself; every [`load`](Self::load) reads the store.
#[derive(Debug, Clone)]
pub struct GridStateStore {
    store: KvStore,
    dims: GridDimensions,
    bands: TerrainBands,
}

impl GridStateStore {
    /// Create a grid store over `store` generating `dims`-sized default
    /// terrain with bands scaled to the width.
    pub fn new(store: KvStore, dims: GridDimensions) -> Self {
        Self::with_bands(store, dims, TerrainBands::for_width(dims.cols))
    }

    /// Create a grid store with an explicit band layout.
    pub const fn with_bands(store: KvStore, dims: GridDimensions, bands: TerrainBands) -> Self {
        Self { store, dims, bands }
    }

    /// Dimensions of generated terrain.
    pub const fn dimensions(&self) -> GridDimensions {
        self.dims
    }

    /// Load the persisted grid, generating default terrain on first run.
    pub async fn load(&self) -> Grid {
        match self.try_load().await {
            Ok(grid) => grid,
            Err(e) => {
                warn!(error = %e, key = keys::GRID_STATE, "Failed to load grid state");
                Grid::new()
            }
        }
    }

    async fn try_load(&self) -> Result<Grid, StoreError> {
        if let Some(blob) = self.store.get(keys::GRID_STATE).await? {
            let grid = decode_snapshot(&blob)?;
            debug!(cells = grid.len(), "Grid state loaded");
            return Ok(grid);
        }

        if self.store.get(keys::TERRAIN_INITIALIZED).await?.is_some() {
            debug!("Grid was cleared after initialization; starting empty");
            return Ok(Grid::new());
        }

        let grid = generate_terrain(self.dims, &self.bands);
        info!(
            rows = self.dims.rows,
            cols = self.dims.cols,
            cells = grid.len(),
            "Generated default terrain"
        );

        // Without a stored grid the marker would turn the next load into an
        // empty grid, so it is only written after the grid itself.
        self.try_save(&grid).await?;
        if let Err(e) = self
            .store
            .set(keys::TERRAIN_INITIALIZED, keys::MARKER_VALUE)
            .await
        {
            // The grid is stored, so later loads find it without the marker.
            warn!(error = %e, key = keys::TERRAIN_INITIALIZED, "Failed to write terrain marker");
        }
        Ok(grid)
    }

    /// Persist every cell of `grid`, overwriting the previous snapshot.
    pub async fn save(&self, grid: &Grid) {
        if let Err(e) = self.try_save(grid).await {
            warn!(error = %e, key = keys::GRID_STATE, "Failed to save grid state");
        }
    }

    async fn try_save(&self, grid: &Grid) -> Result<(), StoreError> {
        let records: Vec<CellRecord> = grid.cells().map(CellRecord::from).collect();
        self.store.set_json(keys::GRID_STATE, &records).await?;
        debug!(cells = records.len(), "Grid state saved");
        Ok(())
    }

    /// Remove the snapshot and the initialization marker, so the next
    /// [`load`](Self::load) regenerates default terrain.
    pub async fn clear(&self) {
        for key in [keys::GRID_STATE, keys::TERRAIN_INITIALIZED] {
            if let Err(e) = self.store.remove(key).await {
                warn!(error = %e, key, "Failed to clear grid state");
            }
        }
        info!("Grid state cleared");
    }

    /// Load the grid and count cells that are part of a building.
    pub async fn count_building_cells(&self) -> usize {
        self.load()
            .await
            .count_in_state(BuildingState::PartOfBuilding)
    }
}

/// Decode a `grid-state` blob.
///
/// The blob must be a JSON array; individual elements that are not valid
/// records or carry unknown tags are dropped.
fn decode_snapshot(blob: &str) -> Result<Grid, StoreError> {
    let raw: Vec<serde_json::Value> = serde_json::from_str(blob)?;
    let total = raw.len();

    let grid: Grid = raw
        .into_iter()
        .filter_map(|value| {
            let record: CellRecord = serde_json::from_value(value).ok()?;
            Cell::try_from(record).ok()
        })
        .collect();

    let dropped = total.saturating_sub(grid.len());
    if dropped > 0 {
        debug!(dropped, kept = grid.len(), "Dropped malformed cell records");
    }
    Ok(grid)
}
