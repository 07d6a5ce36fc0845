//! Errors raised while building grids from outside data.
//!
//! The deduction pass itself cannot fail; these only surface when decoding
//! cell codes, parsing text fixtures, or generating a board.

use thiserror::Error;

/// Failure to build a [`Snapshot`](crate::types::Snapshot).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("expected {expected} cells for the given dimensions, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("unknown cell code {code} at ({x}, {y})")]
    InvalidCode { code: i8, x: usize, y: usize },

    #[error("unknown cell character {ch:?} at row {row}, column {column}")]
    InvalidChar { ch: char, row: usize, column: usize },

    #[error("row {row} has {actual} cells, expected {expected}")]
    RaggedRow { row: usize, expected: usize, actual: usize },

    #[error("grid text contains no rows")]
    Empty,
}

/// Failure to lay out a board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("cannot place {requested} hazards, only {available} eligible cells")]
    TooManyHazards { requested: usize, available: usize },

    #[error("expected {expected} hazard cells for the given dimensions, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}
