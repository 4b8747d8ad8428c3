//! The resource ledger service.
//!
//! [`ResourceLedger`] owns the session's [`Resources`] and is the only way
//! to change them. Every successful mutator runs the same sequence:
//!
//! ```text
//! mutate in memory -> persist `player-resources` -> notify callbacks
//! ```
//!
//! Validation failures return `false` and skip the rest. Persistence
//! failures are logged and otherwise ignored, leaving memory ahead of the
//! store until the next successful write.
//!
//! The ledger expects one caller at a time: each method takes `&mut self`
//! and the only await points are store calls.

use tracing::{debug, info, warn};
use village_store::{KvStore, keys};
use village_types::{Resource, ResourceRecord, ResourceSnapshot};
use village_world::GridStateStore;

use crate::callback::ResourceCallback;
use crate::resources::{MAX_DEPOTS, Resources};

/// Bounded stockpiles of wood, stone and gold with depot-driven capacity.
pub struct ResourceLedger {
    resources: Resources,
    store: KvStore,
    grid: GridStateStore,
    callbacks: Vec<Box<dyn ResourceCallback>>,
}

impl core::fmt::Debug for ResourceLedger {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResourceLedger")
            .field("resources", &self.resources)
            .field("store", &self.store.name())
            .field("callbacks", &self.callbacks.len())
            .finish_non_exhaustive()
    }
}

impl ResourceLedger {
    /// Create a ledger with empty stockpiles.
    ///
    /// Call [`load`](Self::load) to restore a saved session.
    pub const fn new(store: KvStore, grid: GridStateStore) -> Self {
        Self {
            resources: Resources::new(),
            store,
            grid,
            callbacks: Vec::new(),
        }
    }

    /// Register an observer. Observers run in registration order.
    pub fn subscribe(&mut self, callback: Box<dyn ResourceCallback>) {
        self.callbacks.push(callback);
    }

    // -------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------

    /// The current resource model.
    pub const fn resources(&self) -> &Resources {
        &self.resources
    }

    /// A copy of the current values.
    pub const fn snapshot(&self) -> ResourceSnapshot {
        self.resources.snapshot()
    }

    /// Stored wood.
    pub const fn wood(&self) -> u32 {
        self.resources.wood()
    }

    /// Stored stone.
    pub const fn stone(&self) -> u32 {
        self.resources.stone()
    }

    /// Stored gold.
    pub const fn gold(&self) -> u32 {
        self.resources.gold()
    }

    /// Amount of `resource` held.
    pub const fn amount(&self, resource: Resource) -> u32 {
        self.resources.amount(resource)
    }

    /// Number of depots.
    pub const fn depot_count(&self) -> u32 {
        self.resources.depot_count()
    }

    /// Current per-resource cap.
    pub const fn max_storage(&self) -> u32 {
        self.resources.max_storage()
    }

    /// Whether at least the given amounts are held.
    pub const fn has_enough(&self, wood: u32, stone: u32, gold: u32) -> bool {
        self.resources.has_enough(wood, stone, gold)
    }

    /// Whether any resource has reached the cap.
    pub const fn is_storage_full(&self) -> bool {
        self.resources.is_storage_full()
    }

    // -------------------------------------------------------------------
    // Mutators
    // -------------------------------------------------------------------

    /// Add wood up to the cap. Fails if `amount <= 0`.
    pub async fn add_wood(&mut self, amount: i64) -> bool {
        self.add(Resource::Wood, amount).await
    }

    /// Add stone up to the cap. Fails if `amount <= 0`.
    pub async fn add_stone(&mut self, amount: i64) -> bool {
        self.add(Resource::Stone, amount).await
    }

    /// Add gold up to the cap. Fails if `amount <= 0`.
    pub async fn add_gold(&mut self, amount: i64) -> bool {
        self.add(Resource::Gold, amount).await
    }

    /// Add `amount` of `resource`, silently discarding overflow past the
    /// cap. Fails if `amount <= 0`.
    pub async fn add(&mut self, resource: Resource, amount: i64) -> bool {
        if !self.resources.add(resource, amount) {
            return false;
        }
        debug!(
            ?resource,
            amount,
            now = self.resources.amount(resource),
            max_storage = self.resources.max_storage(),
            "Resource added"
        );
        self.save_and_notify().await;
        true
    }

    /// Spend all three amounts at once, or nothing if any is short.
    pub async fn spend(&mut self, wood: u32, stone: u32, gold: u32) -> bool {
        if !self.resources.spend(wood, stone, gold) {
            return false;
        }
        debug!(wood, stone, gold, "Resources spent");
        self.save_and_notify().await;
        true
    }

    /// Add a depot, raising the cap by 2. Fails at 4 depots.
    pub async fn add_depot(&mut self) -> bool {
        if !self.resources.add_depot() {
            return false;
        }
        debug!(
            depot_count = self.resources.depot_count(),
            max_storage = self.resources.max_storage(),
            "Depot added"
        );
        self.save_and_notify().await;
        true
    }

    /// Remove a depot, lowering the cap by 2 and discarding anything above
    /// it. Fails at 0 depots.
    pub async fn remove_depot(&mut self) -> bool {
        if !self.resources.remove_depot() {
            return false;
        }
        debug!(
            depot_count = self.resources.depot_count(),
            max_storage = self.resources.max_storage(),
            "Depot removed"
        );
        self.save_and_notify().await;
        true
    }

    /// Recount depots from the saved grid.
    ///
    /// Every cell in the `PartOfBuilding` state counts as one depot, up to
    /// four. Resources above the resulting cap are discarded. Returns the
    /// new depot count.
    pub async fn refresh_depots_from_grid(&mut self) -> u32 {
        let built_cells = self.grid.count_building_cells().await;
        let depot_count = u32::try_from(built_cells)
            .unwrap_or(MAX_DEPOTS)
            .min(MAX_DEPOTS);

        self.resources.set_depot_count(depot_count);
        debug!(
            built_cells,
            depot_count,
            max_storage = self.resources.max_storage(),
            "Depots refreshed from grid"
        );
        self.save_and_notify().await;
        depot_count
    }

    // -------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------

    /// Restore the saved ledger, or start from zero if there is none.
    ///
    /// The cap is re-derived from the saved depot count and the resources
    /// are clamped to it. A snapshot that cannot be read or parsed is
    /// logged and replaced by the empty state.
    pub async fn load(&mut self) {
        self.resources = match self
            .store
            .get_json::<ResourceRecord>(keys::PLAYER_RESOURCES)
            .await
        {
            Ok(Some(record)) => Resources::from_record(record),
            Ok(None) => Resources::new(),
            Err(e) => {
                warn!(error = %e, key = keys::PLAYER_RESOURCES, "Failed to load resources");
                Resources::new()
            }
        };
        info!(
            wood = self.resources.wood(),
            stone = self.resources.stone(),
            gold = self.resources.gold(),
            depot_count = self.resources.depot_count(),
            max_storage = self.resources.max_storage(),
            "Resources loaded"
        );
    }

    /// Forget the saved ledger and return to empty stockpiles.
    pub async fn clear(&mut self) {
        if let Err(e) = self.store.remove(keys::PLAYER_RESOURCES).await {
            warn!(error = %e, key = keys::PLAYER_RESOURCES, "Failed to clear resources");
        }
        self.resources = Resources::new();
        info!("Resources cleared");
        self.notify();
    }

    async fn save(&self) {
        let record = self.resources.to_record();
        if let Err(e) = self.store.set_json(keys::PLAYER_RESOURCES, &record).await {
            warn!(error = %e, key = keys::PLAYER_RESOURCES, "Failed to save resources");
        }
    }

    fn notify(&mut self) {
        let snapshot = self.resources.snapshot();
        for callback in &mut self.callbacks {
            callback.on_change(&snapshot);
        }
    }

    async fn save_and_notify(&mut self) {
        self.save().await;
        self.notify();
    }
}
