//! Error types
//!
//! Asset failures belong to the host. The core only reports bad level
//! layouts, bad settings and misuse of the level index.

use thiserror::Error;

/// A level layout that could not be turned into a brick grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LevelLoadError {
    /// Layout contained no tiles at all.
    #[error("level layout is empty")]
    Empty,

    /// A token that is not a non-negative integer tile code.
    #[error("invalid tile {token:?} at row {row}, column {column}")]
    InvalidTile {
        row: usize,
        column: usize,
        token: String,
    },

    /// Rows must all have the same number of columns.
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The target area has no positive extent.
    #[error("level area must be positive")]
    InvalidArea,
}

/// Errors surfaced by the simulation to its host.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("failed to load level: {0}")]
    LevelLoad(#[from] LevelLoadError),

    /// A session needs at least one level.
    #[error("no levels loaded")]
    NoLevels,

    #[error("level index {index} out of range ({count} levels loaded)")]
    LevelIndexOutOfRange { index: usize, count: usize },

    /// Elapsed time must be finite and non-negative.
    #[error("invalid timestep {0}")]
    InvalidTimestep(f32),

    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),

    /// A dimension or scale that must be finite and positive was not.
    #[error("setting `{0}` must be positive")]
    InvalidSettings(&'static str),

    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
