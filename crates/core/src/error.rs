//! Error types for piece lookup, hand-built shapes and boards.
//!
//! Gameplay itself never fails: collisions revert and game over is a state.
//! These errors only cover programming mistakes at construction time, where
//! silently producing an empty shape would corrupt collision and locking.

use thiserror::Error;

use crate::types::{Cell, MAX_CELL, MAX_SHAPE_SIZE};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PieceError {
    #[error("unknown piece letter {0:?}")]
    UnknownLetter(String),

    #[error("unknown piece colour id {0} (expected 1..=7)")]
    UnknownColorId(Cell),

    #[error("shape must be square with side 1..={max}, got {rows} rows x {cols} columns", max = MAX_SHAPE_SIZE)]
    NotSquare { rows: usize, cols: usize },

    #[error("shape cell value {0} is outside 0..={max}", max = MAX_CELL)]
    InvalidCell(Cell),

    #[error("shape has no filled cells")]
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board cell value {value} at ({x}, {y}) is outside 0..={max}", max = MAX_CELL)]
    InvalidCell { x: usize, y: usize, value: Cell },
}
