//! Adapter - async hosting for the engine
//!
//! The engine is synchronous and single-owner. This crate provides the two
//! ways it is hosted off the game loop thread:
//!
//! - [`session`]: a tokio task that owns a `GameSession`. Callers hold a
//!   cloneable [`SessionHandle`] and send `Command`, `Reset` and `Snapshot`
//!   requests; replies come back on a oneshot channel. Requests from any
//!   number of tasks are applied strictly one at a time.
//! - [`recorder`]: [`StateRecorder`] appends one JSON [`Observation`] per line
//!   to a file from a background task, so the terminal loop never waits on
//!   disk.
//!
//! # Observation format
//!
//! ```text
//! {"type":"observation","seq":3,"ts":1700000000000,
//!  "board":{"width":10,"height":20,"cells":[[0,0,...],...]},
//!  "active":{"kind":"T","x":3,"y":-1},"next":"O",
//!  "score":40,"lines":1,"level":0,"game_over":false,"seed":7,
//!  "last_event":{"kind":"I","lines_cleared":1,"points":40,"game_over":false}}
//! ```
//!
//! `active` is null after game over; `last_event` is omitted unless the
//! record follows a lock.

pub mod protocol;
pub mod recorder;
pub mod session;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use protocol::{now_ms, ActiveObservation, BoardObservation, LockObservation, Observation};
pub use recorder::StateRecorder;
pub use session::{CommandOutcome, SessionHandle};
