//! Error types for the `village-world` crate.

use village_types::GridPos;

/// Errors that can occur during grid operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// The coordinate lies outside the configured grid.
    #[error("cell {pos} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        /// The offending coordinate.
        pos: GridPos,
        /// Configured row count.
        rows: u32,
        /// Configured column count.
        cols: u32,
    },

    /// The grid holds no cell at this coordinate.
    #[error("no cell at {0}")]
    CellNotFound(GridPos),
}
