//! Core engine - pure, deterministic, and testable
//!
//! This crate holds every rule of the game: the board, the piece catalog and
//! rotation, collision, locking, line clearing, scoring and the session that
//! ties them together. It has no dependency on terminals, timers or
//! networking:
//!
//! - **Deterministic**: the same seed produces the same piece sequence
//! - **Host-agnostic**: commands in, snapshots out
//! - **Allocation-free hot path**: board and shapes are fixed-size arrays
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision checks and line clearing
//! - [`pieces`]: the seven shapes and 90° matrix rotation
//! - [`rng`]: seeded uniform piece generator
//! - [`scoring`]: points table, level and gravity period
//! - [`game_state`]: the [`GameSession`] engine and its command API
//! - [`snapshot`]: the read-only view handed to presenters
//! - [`error`]: construction-time lookup errors
//!
//! # Rules
//!
//! - Pieces spawn centred with their matrix one row above the top.
//! - Shifts and rotations that collide are reverted; there are no wall kicks.
//! - A drop that collides locks the piece, clears full rows, scores
//!   `40/100/300/1200 * (level + 1)` and activates the queued piece.
//! - If the new piece collides where it spawns, the game is over.
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameSession;
//! use blockfall_core::types::Command;
//!
//! let mut session = GameSession::new(12345);
//! session.apply(Command::ShiftLeft);
//! session.apply(Command::Rotate);
//! while session.apply(Command::SoftDrop) {}
//!
//! let snap = session.snapshot();
//! assert!(!snap.game_over);
//! assert_eq!(snap.score, 0);
//! ```

pub mod board;
pub mod error;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoardGrid};
pub use error::{BoardError, PieceError};
pub use game_state::{GameSession, Piece};
pub use pieces::{get_shape, Shape};
pub use rng::PieceGenerator;
pub use scoring::{calculate_clear_score, calculate_level, gravity_interval_ms};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
