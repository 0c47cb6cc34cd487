//! Crate error type
//!
//! Only loading boundaries (maps, tuning, settings, question banks) can fail.
//! The per-tick simulation never returns errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Map parsing
    #[error("Grid map has no cells")]
    EmptyMap,

    #[error("Grid row {row} has {found} cells, expected {expected}")]
    RaggedMap {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Unknown cell code {code} at row {row}, col {col}")]
    UnknownCell { row: usize, col: usize, code: u8 },

    #[error("Map is not enclosed: border cell at row {row}, col {col} is not a wall")]
    OpenBoundary { row: usize, col: usize },

    #[error("No level with index {0}")]
    UnknownLevel(u32),

    // Data files
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for all fallible operations
pub type Result<T> = std::result::Result<T, Error>;
