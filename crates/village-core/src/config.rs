//! Configuration loading and typed config structures for Pencil Village.
//!
//! The configuration is a small YAML document with three sections:
//! `grid`, `storage` and `logging`. Every field has a default, so an empty
//! file (or no file at all) yields the reference 41x57 village backed by
//! the in-memory store.
//!
//! The storage mechanic itself (base capacity, capacity per depot, depot
//! limit) is fixed and deliberately absent from this file.

use std::path::Path;

use serde::Deserialize;
use village_types::Terrain;
use village_world::{GridDimensions, TerrainBands};
use village_world::terrain::{DEFAULT_ROWS, REFERENCE_COLS};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level village configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VillageConfig {
    /// Grid size and terrain layout.
    #[serde(default)]
    pub grid: GridConfig,

    /// Persistence backend.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log level and format.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl VillageConfig {
    /// Load configuration from a YAML file and apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML or does not
    /// match the expected structure.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.storage.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// Environment overrides are not applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the YAML is invalid.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }
}

/// Grid dimensions and terrain bands.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GridConfig {
    /// Number of rows.
    #[serde(default = "default_rows")]
    pub rows: u32,

    /// Number of columns.
    #[serde(default = "default_cols")]
    pub cols: u32,

    /// Explicit column bands, left to right. When absent the reference
    /// layout is scaled to `cols`.
    #[serde(default)]
    pub bands: Option<Vec<BandConfig>>,
}

impl GridConfig {
    /// The configured dimensions.
    pub const fn dimensions(&self) -> GridDimensions {
        GridDimensions::new(self.rows, self.cols)
    }

    /// The configured bands, or the reference layout scaled to `cols`.
    pub fn terrain_bands(&self) -> TerrainBands {
        self.bands.as_ref().map_or_else(
            || TerrainBands::for_width(self.cols),
            |bands| TerrainBands::from_widths(bands.iter().map(|b| (b.terrain, b.width))),
        )
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            bands: None,
        }
    }
}

/// One terrain band: `width` columns of `terrain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BandConfig {
    /// Terrain of every cell in the band.
    pub terrain: Terrain,
    /// Number of columns.
    pub width: u32,
}

/// Which key-value backend to persist to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// In-process map; state is lost when the process exits.
    #[default]
    Memory,
    /// `Dragonfly` or any Redis-compatible server.
    Dragonfly,
}

/// Persistence settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// Backend selection.
    #[serde(default)]
    pub backend: StorageBackend,

    /// Dragonfly (Redis-compatible) URL.
    #[serde(default = "default_dragonfly_url")]
    pub dragonfly_url: String,
}

impl StorageConfig {
    /// Override the Dragonfly URL with `DRAGONFLY_URL` when set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("DRAGONFLY_URL")
            && !url.is_empty()
        {
            self.dragonfly_url = url;
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            dragonfly_url: default_dragonfly_url(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions for serde
// ---------------------------------------------------------------------------

const fn default_rows() -> u32 {
    DEFAULT_ROWS
}

const fn default_cols() -> u32 {
    REFERENCE_COLS
}

fn default_dragonfly_url() -> String {
    "redis://localhost:6379".to_owned()
}

fn default_log_level() -> String {
    "info".to_owned()
}
