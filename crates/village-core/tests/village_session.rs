//! End-to-end tests of a village session over the in-memory store.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use std::sync::{Arc, Mutex};

use village_core::{Village, VillageConfig};
use village_store::{KvStore, MemoryStore, keys};
use village_types::{BuildingState, GridPos, Resource, ResourceSnapshot, Terrain};

fn config(rows: u32) -> VillageConfig {
    let mut config = VillageConfig::default();
    config.grid.rows = rows;
    config
}

async fn session(memory: &MemoryStore) -> Village {
    let mut village = Village::new(KvStore::from(memory.clone()), &config(5));
    village.load().await;
    village
}

fn row(row: u32, cols: std::ops::Range<u32>) -> Vec<GridPos> {
    cols.map(|col| GridPos::new(row, col)).collect()
}

#[tokio::test]
async fn fresh_village_has_reference_terrain_and_no_depots() {
    let memory = MemoryStore::new();
    let village = session(&memory).await;

    assert_eq!(village.grid().len(), 5 * 57);
    assert_eq!(
        village.grid().get(GridPos::new(4, 56)).map(|c| c.terrain),
        Some(Terrain::Crag)
    );
    assert_eq!(village.ledger().depot_count(), 0);
    assert_eq!(village.ledger().max_storage(), 4);
    assert!(memory.contains(keys::TERRAIN_INITIALIZED).await);
}

#[tokio::test]
async fn building_cells_raise_storage_up_to_four_depots() {
    let memory = MemoryStore::new();
    let mut village = session(&memory).await;

    assert_eq!(village.place_building(&row(0, 0..3)).await.unwrap(), 3);
    assert_eq!(village.ledger().max_storage(), 10);

    assert_eq!(village.place_building(&row(1, 0..3)).await.unwrap(), 4);
    assert_eq!(village.ledger().max_storage(), 12);
    assert_eq!(
        village
            .grid()
            .count_in_state(BuildingState::PartOfBuilding),
        6
    );
}

#[tokio::test]
async fn demolish_lowers_cap_and_clamps_resources() {
    let memory = MemoryStore::new();
    let mut village = session(&memory).await;

    village.place_building(&row(2, 10..14)).await.unwrap();
    for resource in Resource::ALL {
        village.ledger_mut().add(resource, 12).await;
    }
    assert_eq!(village.ledger().wood(), 12);

    assert_eq!(village.demolish(&row(2, 11..14)).await.unwrap(), 1);
    assert_eq!(village.ledger().max_storage(), 6);
    for resource in Resource::ALL {
        assert_eq!(village.ledger().amount(resource), 6);
    }
}

#[tokio::test]
async fn state_survives_a_new_session() {
    let memory = MemoryStore::new();
    {
        let mut village = session(&memory).await;
        village.place_building(&row(3, 20..22)).await.unwrap();
        village.ledger_mut().add_stone(5).await;
        village.ledger_mut().add_gold(2).await;
    }

    let village = session(&memory).await;
    assert_eq!(village.ledger().depot_count(), 2);
    assert_eq!(village.ledger().stone(), 5);
    assert_eq!(village.ledger().gold(), 2);
    assert_eq!(
        village.grid().get(GridPos::new(3, 21)).map(|c| c.building),
        Some(BuildingState::PartOfBuilding)
    );
}

#[tokio::test]
async fn reset_restores_default_village() {
    let memory = MemoryStore::new();
    let mut village = session(&memory).await;
    village.place_building(&row(0, 0..4)).await.unwrap();
    village.ledger_mut().add_wood(9).await;

    village.reset().await;

    assert_eq!(village.grid().len(), 5 * 57);
    assert_eq!(
        village
            .grid()
            .count_in_state(BuildingState::PartOfBuilding),
        0
    );
    assert_eq!(village.ledger().wood(), 0);
    assert_eq!(village.ledger().depot_count(), 0);
}

#[tokio::test]
async fn observers_see_depot_changes() {
    let memory = MemoryStore::new();
    let mut village = session(&memory).await;

    let seen: Arc<Mutex<Vec<ResourceSnapshot>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    village.subscribe(Box::new(move |snapshot: &ResourceSnapshot| {
        sink.lock().unwrap().push(*snapshot);
    }));

    village.place_building(&row(4, 0..2)).await.unwrap();

    let seen = seen.lock().unwrap();
    let last = seen.last().expect("observer was notified");
    assert_eq!(last.depot_count, 2);
    assert_eq!(last.max_storage, 8);
}

#[tokio::test]
async fn failed_grid_write_keeps_in_memory_edit() {
    let memory = MemoryStore::new();
    let mut village = session(&memory).await;

    memory.set_fail_writes(true);
    let depots = village.place_building(&row(0, 0..2)).await.unwrap();

    // The grid could not be saved, so the recount still sees the old grid.
    assert_eq!(depots, 0);
    assert_eq!(
        village
            .grid()
            .count_in_state(BuildingState::PartOfBuilding),
        2
    );
}

#[tokio::test]
async fn unwritable_marker_does_not_block_building() {
    let memory = MemoryStore::new();
    memory
        .set_fail_writes_for(keys::TERRAIN_INITIALIZED, true)
        .await;
    let mut village = session(&memory).await;

    assert_eq!(village.grid().len(), 5 * 57);
    assert_eq!(village.place_building(&row(0, 0..2)).await.unwrap(), 2);
}
