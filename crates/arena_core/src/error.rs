//! Error types for map generation and map queries.

use thiserror::Error;

use crate::coord::Coord;

/// Result type alias using [`MapError`].
pub type Result<T> = std::result::Result<T, MapError>;

/// Top-level error type for all map generation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    /// Requested map index does not name a configured map.
    #[error("Map index {index} out of range ({count} maps configured)")]
    InvalidMapIndex {
        /// Requested index.
        index: usize,
        /// Number of configured maps.
        count: usize,
    },

    /// Wave numbers are 1-based; wave 0 has no map.
    #[error("Invalid wave number: {0}")]
    InvalidWaveNumber(u32),

    /// A map or generator configuration failed validation.
    #[error("Invalid configuration '{name}': {reason}")]
    InvalidConfig {
        /// Name of the offending configuration.
        name: String,
        /// Why validation failed.
        reason: String,
    },

    /// Coordinate lookup outside the grid.
    #[error("Coordinate ({}, {}) outside {width}x{height} grid", coord.x, coord.y)]
    OutOfBounds {
        /// Requested coordinate.
        coord: Coord,
        /// Grid width.
        width: i32,
        /// Grid height.
        height: i32,
    },

    /// No open tiles left to hand out.
    #[error("Map has no open tiles")]
    EmptyMap,

    /// Query issued before any map was generated.
    #[error("No map has been generated yet")]
    NotGenerated,

    /// Settings text failed to parse.
    #[error("Failed to parse data file '{path}': {message}")]
    DataParseError {
        /// Path (or label) of the text that failed to parse.
        path: String,
        /// Error message.
        message: String,
    },

    /// Invalid layout state (serialization failures).
    #[error("Invalid map state: {0}")]
    InvalidState(String),
}
