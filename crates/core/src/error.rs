//! Error types for the engine

use std::path::PathBuf;

use thiserror::Error;

/// Why a piece could not be written into the grid.
///
/// Coordinates are the absolute board cell that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LockError {
    /// Part of the piece is still above the visible board: the stack has
    /// reached the top.
    #[error("cell ({x}, {y}) locks above the top of the board")]
    SpawnAboveTop { x: i8, y: i8 },
    /// The target cell is outside the walls/floor or already occupied.
    #[error("cell ({x}, {y}) is out of bounds or already occupied")]
    Obstructed { x: i8, y: i8 },
}

/// Failure loading or validating a [`Rules`](crate::Rules) table
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("failed to read rules file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed rules JSON")]
    Parse(#[from] serde_json::Error),
    #[error("invalid rules: {0}")]
    Invalid(&'static str),
}
