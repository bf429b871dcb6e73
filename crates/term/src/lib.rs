//! Terminal presenter.
//!
//! Renders the game into a small framebuffer of styled glyphs and flushes it
//! to the terminal, rewriting only what changed between frames. No widget
//! toolkit is involved: each board cell is two columns wide so the field keeps
//! a roughly square aspect.
//!
//! - [`fb`]: glyphs, styles and the framebuffer
//! - [`game_view`]: start, play, pause and game-over screens (pure)
//! - [`renderer`]: terminal setup/teardown and diff flushing

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{cell_color, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
