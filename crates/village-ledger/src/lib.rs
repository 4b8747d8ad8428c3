//! Resource ledger for the Pencil Village state core.
//!
//! The player holds three resources (wood, stone, gold), each capped at a
//! shared max storage. Depots raise the cap:
//!
//! ```text
//! max_storage = 4 + 2 * depot_count      depot_count in 0..=4
//! ```
//!
//! Adding past the cap silently discards the excess. Removing a depot
//! lowers the cap and discards whatever no longer fits. Spending is
//! all-or-nothing across the three resources.
//!
//! # Modules
//!
//! - [`resources`] -- [`Resources`], the pure in-memory model.
//! - [`ledger`] -- [`ResourceLedger`], the service that persists and
//!   notifies after each mutation.
//! - [`callback`] -- [`ResourceCallback`], the observer hook.
//!
//! # Usage
//!
//! ```
//! use village_ledger::ResourceLedger;
//! use village_store::{KvStore, MemoryStore};
//! use village_world::{GridDimensions, GridStateStore};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let store = KvStore::from(MemoryStore::new());
//! let grid = GridStateStore::new(store.clone(), GridDimensions::default());
//! let mut ledger = ResourceLedger::new(store, grid);
//! ledger.load().await;
//!
//! assert!(ledger.add_wood(10).await);
//! assert_eq!(ledger.wood(), 4);
//! assert!(ledger.add_depot().await);
//! assert_eq!(ledger.max_storage(), 6);
//! # }
//! ```

pub mod callback;
pub mod ledger;
pub mod resources;

// Re-export primary types at crate root.
pub use callback::ResourceCallback;
pub use ledger::ResourceLedger;
pub use resources::{BASE_STORAGE, MAX_DEPOTS, Resources, STORAGE_PER_DEPOT, max_storage_for};
