//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`KeyInput`]s and drives a
//! [`GameSession`](crate::core::GameSession) through the [`Controller`], which
//! owns the start / pause / game-over phase and the gravity schedule. The
//! controller only sees elapsed milliseconds, so it works the same under a
//! real terminal loop and in tests.

pub mod controller;
pub mod map;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use controller::{Controller, GravityTimer, KeyInput};
pub use map::{handle_key_event, should_quit};
