//! Error types for the persistence layer.
//!
//! All backend failures surface as [`StoreError`]. Callers in the ledger
//! and grid crates log these and degrade; they never propagate further.

/// Errors that can occur talking to a key-value backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A `Dragonfly`/Redis operation failed.
    #[error("Dragonfly error: {0}")]
    Dragonfly(#[from] fred::error::Error),

    /// A serialization or deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backend refused the call (quota, offline, injected failure).
    #[error("store unavailable for {op} on {key}")]
    Unavailable {
        /// The operation that was refused (`get`, `set`, `remove`).
        op: &'static str,
        /// The key involved.
        key: String,
    },

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
