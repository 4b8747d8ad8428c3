//! Configuration, logging, and the session aggregate for Pencil Village.
//!
//! # Modules
//!
//! - [`config`] -- YAML configuration into strongly-typed structs.
//! - [`logging`] -- `tracing-subscriber` setup driven by [`LoggingConfig`].
//! - [`village`] -- [`Village`], which owns the grid, the grid store and
//!   the resource ledger for one session and keeps depots in step with
//!   placed buildings.
//!
//! ```no_run
//! use village_core::{Village, VillageConfig};
//! use village_types::GridPos;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), village_core::VillageError> {
//! let config = VillageConfig::default();
//! village_core::logging::init(&config.logging);
//!
//! let mut village = Village::open(&config).await?;
//! village.load().await;
//! let depots = village.place_building(&[GridPos::new(20, 30)]).await?;
//! assert_eq!(village.ledger().max_storage(), 4 + 2 * depots);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod logging;
pub mod village;

pub use config::{ConfigError, LoggingConfig, VillageConfig};
pub use village::{Village, VillageError};
