//! The per-session aggregate: one grid, one ledger, one store.
//!
//! [`Village`] is the only place where the grid and the ledger meet.
//! Building placement edits the in-memory grid, persists it, and then asks
//! the ledger to recount depots from what was persisted.

use std::path::Path;

use tracing::{debug, info};
use village_ledger::{ResourceCallback, ResourceLedger};
use village_store::{DragonflyStore, KvStore, MemoryStore, StoreError};
use village_types::{BuildingState, GridPos};
use village_world::{Grid, GridDimensions, GridStateStore, WorldError};

use crate::config::{ConfigError, StorageBackend, StorageConfig, VillageConfig};

/// Errors surfaced by the session aggregate.
#[derive(Debug, thiserror::Error)]
pub enum VillageError {
    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The storage backend could not be reached.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A grid edit referenced an invalid cell.
    #[error("world error: {0}")]
    World(#[from] WorldError),
}

/// A running village session.
#[derive(Debug)]
pub struct Village {
    store: KvStore,
    dims: GridDimensions,
    grid_store: GridStateStore,
    grid: Grid,
    ledger: ResourceLedger,
}

impl Village {
    /// Load configuration from `path` and open the village it describes.
    pub async fn open_file(path: &Path) -> Result<Self, VillageError> {
        let config = VillageConfig::from_file(path)?;
        Self::open(&config).await
    }

    /// Connect to the configured backend and build an unloaded session.
    ///
    /// Call [`load`](Self::load) before use.
    pub async fn open(config: &VillageConfig) -> Result<Self, VillageError> {
        let store = connect(&config.storage).await?;
        Ok(Self::new(store, config))
    }

    /// Build an unloaded session over an existing store.
    pub fn new(store: KvStore, config: &VillageConfig) -> Self {
        let dims = config.grid.dimensions();
        let grid_store = GridStateStore::with_bands(store.clone(), dims, config.grid.terrain_bands());
        let ledger = ResourceLedger::new(store.clone(), grid_store.clone());
        Self {
            store,
            dims,
            grid_store,
            grid: Grid::new(),
            ledger,
        }
    }

    /// Restore the grid, then the ledger, then recount depots.
    pub async fn load(&mut self) {
        self.grid = self.grid_store.load().await;
        self.ledger.load().await;
        let depots = self.ledger.refresh_depots_from_grid().await;
        info!(
            backend = self.store.name(),
            cells = self.grid.len(),
            depots,
            "Village loaded"
        );
    }

    /// Mark every cell in `positions` as part of a building.
    ///
    /// All positions are checked before any cell changes. Returns the depot
    /// count after the refresh.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] for a position outside the grid,
    /// or [`WorldError::CellNotFound`] if the loaded grid has no such cell.
    pub async fn place_building(&mut self, positions: &[GridPos]) -> Result<u32, VillageError> {
        self.set_cells(positions, BuildingState::PartOfBuilding).await
    }

    /// Return every cell in `positions` to unbuilt ground.
    ///
    /// Same checks and return value as [`place_building`](Self::place_building).
    pub async fn demolish(&mut self, positions: &[GridPos]) -> Result<u32, VillageError> {
        self.set_cells(positions, BuildingState::None).await
    }

    async fn set_cells(
        &mut self,
        positions: &[GridPos],
        state: BuildingState,
    ) -> Result<u32, VillageError> {
        for &pos in positions {
            self.check(pos)?;
        }
        for &pos in positions {
            self.grid.set_building(pos, state)?;
        }
        debug!(cells = positions.len(), state = %state, "Cells updated");

        self.grid_store.save(&self.grid).await;
        Ok(self.ledger.refresh_depots_from_grid().await)
    }

    fn check(&self, pos: GridPos) -> Result<(), WorldError> {
        if !self.dims.contains(pos) {
            return Err(WorldError::OutOfBounds {
                pos,
                rows: self.dims.rows,
                cols: self.dims.cols,
            });
        }
        if self.grid.get(pos).is_none() {
            return Err(WorldError::CellNotFound(pos));
        }
        Ok(())
    }

    /// Forget all persisted state and start over with default terrain and
    /// empty stockpiles.
    pub async fn reset(&mut self) {
        self.grid_store.clear().await;
        self.ledger.clear().await;
        self.load().await;
        info!("Village reset");
    }

    /// Register a ledger observer.
    pub fn subscribe(&mut self, callback: Box<dyn ResourceCallback>) {
        self.ledger.subscribe(callback);
    }

    /// The in-memory grid.
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The resource ledger.
    pub const fn ledger(&self) -> &ResourceLedger {
        &self.ledger
    }

    /// The resource ledger, mutably.
    pub const fn ledger_mut(&mut self) -> &mut ResourceLedger {
        &mut self.ledger
    }

    /// Grid dimensions.
    pub const fn dimensions(&self) -> GridDimensions {
        self.dims
    }
}

/// Build the configured backend.
async fn connect(storage: &StorageConfig) -> Result<KvStore, StoreError> {
    match storage.backend {
        StorageBackend::Memory => Ok(KvStore::from(MemoryStore::new())),
        StorageBackend::Dragonfly => {
            let store = DragonflyStore::connect(&storage.dragonfly_url).await?;
            Ok(KvStore::from(store))
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn small_config() -> VillageConfig {
        let mut config = VillageConfig::default();
        config.grid.rows = 3;
        config
    }

    #[tokio::test]
    async fn open_memory_backend() {
        let mut village = Village::open(&small_config()).await.unwrap();
        village.load().await;
        assert_eq!(village.grid().len(), 3 * 57);
        assert_eq!(village.ledger().depot_count(), 0);
    }

    #[tokio::test]
    async fn open_file_reads_yaml() {
        let path = std::env::temp_dir().join(format!("village-{}.yaml", std::process::id()));
        std::fs::write(&path, "grid:\n  rows: 2\n  cols: 10\n").unwrap();
        let opened = Village::open_file(&path).await;
        let _ = std::fs::remove_file(&path);

        let mut village = opened.unwrap();
        village.load().await;
        assert_eq!(village.dimensions(), GridDimensions::new(2, 10));
        assert_eq!(village.grid().len(), 20);
    }

    #[tokio::test]
    async fn open_file_missing_is_config_error() {
        let result = Village::open_file(Path::new("/nonexistent/village.yaml")).await;
        assert!(matches!(
            result,
            Err(VillageError::Config(ConfigError::Io { .. }))
        ));
    }

    #[tokio::test]
    async fn out_of_bounds_rejected_before_mutation() {
        let mut village = Village::new(KvStore::from(MemoryStore::new()), &small_config());
        village.load().await;

        let result = village
            .place_building(&[GridPos::new(0, 0), GridPos::new(3, 0)])
            .await;
        assert!(matches!(
            result,
            Err(VillageError::World(WorldError::OutOfBounds { rows: 3, cols: 57, .. }))
        ));
        assert_eq!(village.grid().count_in_state(BuildingState::PartOfBuilding), 0);
    }

    #[tokio::test]
    async fn missing_cell_rejected() {
        let memory = MemoryStore::new();
        memory.set(village_store::keys::GRID_STATE, "[]").await.unwrap();
        let mut village = Village::new(KvStore::from(memory), &small_config());
        village.load().await;

        let pos = GridPos::new(1, 1);
        assert!(matches!(
            village.place_building(&[pos]).await,
            Err(VillageError::World(WorldError::CellNotFound(p))) if p == pos
        ));
    }
}
