//! The in-memory resource model: three stockpiles and a depot count.
//!
//! Max storage is not stored. It is computed from the depot count every
//! time it is needed, so a stale or hand-edited snapshot can never carry
//! a cap that disagrees with its depots.
//!
//! Every method leaves the model satisfying:
//! - `depot_count <= MAX_DEPOTS`
//! - each resource `<= max_storage()`

use village_types::{Resource, ResourceRecord, ResourceSnapshot};

/// Storage available with no depots.
pub const BASE_STORAGE: u32 = 4;

/// Extra storage granted by each depot.
pub const STORAGE_PER_DEPOT: u32 = 2;

/// Most depots that count toward storage.
pub const MAX_DEPOTS: u32 = 4;

/// Per-resource cap for a given depot count: `4 + 2 * depots`.
pub const fn max_storage_for(depot_count: u32) -> u32 {
    let depots = if depot_count > MAX_DEPOTS {
        MAX_DEPOTS
    } else {
        depot_count
    };
    BASE_STORAGE.saturating_add(STORAGE_PER_DEPOT.saturating_mul(depots))
}

/// Wood, stone, gold and depots for one game session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resources {
    wood: u32,
    stone: u32,
    gold: u32,
    depot_count: u32,
}

impl Resources {
    /// Empty stockpiles, no depots.
    pub const fn new() -> Self {
        Self {
            wood: 0,
            stone: 0,
            gold: 0,
            depot_count: 0,
        }
    }

    /// Rebuild from a persisted record.
    ///
    /// The depot count is clamped to `0..=MAX_DEPOTS`, then each resource
    /// to `0..=max_storage()`.
    pub fn from_record(record: ResourceRecord) -> Self {
        let depot_count = clamp_to(record.depot_count, MAX_DEPOTS);
        let cap = max_storage_for(depot_count);
        Self {
            wood: clamp_to(record.wood, cap),
            stone: clamp_to(record.stone, cap),
            gold: clamp_to(record.gold, cap),
            depot_count,
        }
    }

    /// The record persisted under `player-resources`.
    pub fn to_record(&self) -> ResourceRecord {
        ResourceRecord {
            wood: i64::from(self.wood),
            stone: i64::from(self.stone),
            gold: i64::from(self.gold),
            depot_count: i64::from(self.depot_count),
        }
    }

    /// A copy of the current values, including the derived cap.
    pub const fn snapshot(&self) -> ResourceSnapshot {
        ResourceSnapshot {
            wood: self.wood,
            stone: self.stone,
            gold: self.gold,
            depot_count: self.depot_count,
            max_storage: self.max_storage(),
        }
    }

    /// Stored wood.
    pub const fn wood(&self) -> u32 {
        self.wood
    }

    /// Stored stone.
    pub const fn stone(&self) -> u32 {
        self.stone
    }

    /// Stored gold.
    pub const fn gold(&self) -> u32 {
        self.gold
    }

    /// Amount of `resource` held.
    pub const fn amount(&self, resource: Resource) -> u32 {
        match resource {
            Resource::Wood => self.wood,
            Resource::Stone => self.stone,
            Resource::Gold => self.gold,
        }
    }

    /// Number of depots.
    pub const fn depot_count(&self) -> u32 {
        self.depot_count
    }

    /// Current per-resource cap.
    pub const fn max_storage(&self) -> u32 {
        max_storage_for(self.depot_count)
    }

    const fn slot_mut(&mut self, resource: Resource) -> &mut u32 {
        match resource {
            Resource::Wood => &mut self.wood,
            Resource::Stone => &mut self.stone,
            Resource::Gold => &mut self.gold,
        }
    }

    /// Add `amount` of `resource`, discarding anything above the cap.
    ///
    /// Returns `false` without change if `amount <= 0`.
    pub fn add(&mut self, resource: Resource, amount: i64) -> bool {
        if amount <= 0 {
            return false;
        }
        let cap = self.max_storage();
        let amount = u32::try_from(amount).unwrap_or(u32::MAX);
        let slot = self.slot_mut(resource);
        *slot = slot.saturating_add(amount).min(cap);
        true
    }

    /// Whether at least the given amounts are held.
    pub const fn has_enough(&self, wood: u32, stone: u32, gold: u32) -> bool {
        self.wood >= wood && self.stone >= stone && self.gold >= gold
    }

    /// Whether any resource has reached the cap.
    pub const fn is_storage_full(&self) -> bool {
        let cap = self.max_storage();
        self.wood >= cap || self.stone >= cap || self.gold >= cap
    }

    /// Take all three amounts, or nothing.
    pub fn spend(&mut self, wood: u32, stone: u32, gold: u32) -> bool {
        let (Some(w), Some(s), Some(g)) = (
            self.wood.checked_sub(wood),
            self.stone.checked_sub(stone),
            self.gold.checked_sub(gold),
        ) else {
            return false;
        };
        self.wood = w;
        self.stone = s;
        self.gold = g;
        true
    }

    /// Add one depot. Fails at [`MAX_DEPOTS`].
    ///
    /// The cap only grows, so nothing is clamped.
    pub const fn add_depot(&mut self) -> bool {
        if self.depot_count >= MAX_DEPOTS {
            return false;
        }
        self.depot_count = self.depot_count.saturating_add(1);
        true
    }

    /// Remove one depot. Fails at zero.
    ///
    /// Resources above the smaller cap are lost.
    pub fn remove_depot(&mut self) -> bool {
        if self.depot_count == 0 {
            return false;
        }
        self.depot_count = self.depot_count.saturating_sub(1);
        self.clamp_to_capacity();
        true
    }

    /// Set the depot count (clamped to `0..=MAX_DEPOTS`) and clamp
    /// resources to the resulting cap.
    pub fn set_depot_count(&mut self, depot_count: u32) {
        self.depot_count = depot_count.min(MAX_DEPOTS);
        self.clamp_to_capacity();
    }

    /// Lower any resource above the cap to exactly the cap.
    pub fn clamp_to_capacity(&mut self) {
        let cap = self.max_storage();
        for resource in Resource::ALL {
            let slot = self.slot_mut(resource);
            *slot = (*slot).min(cap);
        }
    }
}

/// Clamp a persisted signed value into `0..=max`.
fn clamp_to(value: i64, max: u32) -> u32 {
    u32::try_from(value.clamp(0, i64::from(max))).unwrap_or(0)
}
