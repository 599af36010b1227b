// error.rs - Error types for the Game of Life engine

use thiserror::Error;

/// A `#RRGGBB` string that could not be read as a color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color {0:?}: expected #RRGGBB")]
pub struct ColorParseError(pub String);

/// History navigation that has no valid target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("cannot go back")]
    CannotGoBack,
    #[error("cannot go forward")]
    CannotGoForward,
}

/// A history log rebuilt from stored entries that breaks its invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("history has no entries")]
    Empty,
    #[error("cursor {cursor} is outside a history of {len} entries")]
    CursorOutOfRange { cursor: usize, len: usize },
    #[error("history entry {index} is {actual}x{actual}, expected {expected}x{expected}")]
    SizeMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },
}

/// Sparse grid that cannot be expanded back into a dense one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("grid size must be at least 1")]
    ZeroSize,
    #[error("live cell ({row}, {col}) lies outside a {size}x{size} grid")]
    CellOutOfBounds { row: usize, col: usize, size: usize },
}

/// Dense snapshot that does not have the expected shape.
#[derive(Debug, Error)]
pub enum ImportFormatError {
    #[error("snapshot is not valid grid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot grid has no rows")]
    EmptyGrid,
    #[error("row {row} has {actual} cells, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// Failure inside a key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error on key {key:?}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("storage quota of {quota} bytes exceeded")]
    QuotaExceeded { quota: usize },
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
}

/// Anything that stops the session state from being saved or restored.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("stored state is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error("chunk {0} is missing")]
    MissingChunk(usize),
    #[error("invalid chunk count {0:?}")]
    InvalidChunkCount(String),
    #[error("current grid is {actual}x{actual} but history holds {expected}x{expected} grids")]
    GridSizeMismatch { expected: usize, actual: usize },
}

/// Errors returned by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("cell ({row}, {col}) is outside a {size}x{size} grid")]
    CellOutOfBounds { row: usize, col: usize, size: usize },
    #[error("grid size must be at least 1")]
    InvalidSize,
    #[error("pattern {name} needs {needed}x{needed} cells but the grid is {size}x{size}")]
    PatternTooLarge {
        name: &'static str,
        needed: usize,
        size: usize,
    },
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    #[error(transparent)]
    Import(#[from] ImportFormatError),
    #[error("failed to export grid: {0}")]
    Export(#[source] serde_json::Error),
}
