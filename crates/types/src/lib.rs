//! Shared types module - data structures and constants used by every crate
//!
//! Everything here is plain data with no external dependencies, so the engine,
//! the input controller, the terminal presenter and the session adapter can
//! all agree on the same vocabulary.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//!
//! # Cell Values
//!
//! Board and shape cells are small integers: `0` is empty, `1..=7` is a block
//! coloured by piece kind (I=1, J=2, L=3, O=4, S=5, T=6, Z=7).
//!
//! # Gravity
//!
//! The gravity period shrinks by 100ms per level and bottoms out at 100ms:
//!
//! | Level | Interval |
//! |-------|----------|
//! | 0 | 1000ms |
//! | 1 | 900ms |
//! | 5 | 500ms |
//! | 9+ | 100ms |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(PieceKind::T.color_id(), 6);
//! assert_eq!(Command::from_str("shiftLeft"), Some(Command::ShiftLeft));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Largest side length of a piece matrix (I and O use 4x4)
pub const MAX_SHAPE_SIZE: usize = 4;

/// Anchor row every freshly activated piece starts on
pub const SPAWN_Y: i8 = -1;

/// Gravity interval at level 0
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity speed-up per level
pub const DROP_STEP_MS: u32 = 100;

/// Fastest gravity interval, reached at level 9
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Cleared lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// How long a held Down key survives without a repeat on terminals that never
/// report key release.
pub const SOFT_DROP_GRACE_MS: u32 = 150;

/// Default render / input poll period of the terminal loop (~60 FPS)
pub const FRAME_MS: u32 = 16;

/// A board or shape cell: `EMPTY` or a piece colour id in `1..=7`
pub type Cell = u8;

/// The empty cell value
pub const EMPTY: Cell = 0;

/// Highest colour id a cell may hold
pub const MAX_CELL: Cell = 7;

/// Line clear scoring table
///
/// Base points for clearing N lines at level 0:
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by (level + 1).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// The seven piece kinds, in colour-id order
///
/// - **I** (1): cyan bar
/// - **J** (2): blue
/// - **L** (3): orange
/// - **O** (4): yellow square
/// - **S** (5): green
/// - **T** (6): purple
/// - **Z** (7): red
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds, indexed by `color_id() - 1`
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Colour id written into board cells for this kind (1..=7)
    pub const fn color_id(self) -> Cell {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Reverse of [`PieceKind::color_id`]
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_color_id(1), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_color_id(7), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_color_id(0), None);
    /// assert_eq!(PieceKind::from_color_id(8), None);
    /// ```
    pub fn from_color_id(id: Cell) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }

    /// Parse piece kind from its letter (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Uppercase letter for display and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

/// Commands accepted by the engine
///
/// This is the closed set of state transitions a host can request; the engine
/// dispatches them with an exhaustive match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move the active piece one column left
    ShiftLeft,
    /// Move the active piece one column right
    ShiftRight,
    /// Rotate the active piece 90° clockwise (no wall kicks)
    Rotate,
    /// Player-requested one-row drop
    SoftDrop,
    /// Gravity step, identical to a soft drop
    Tick,
}

impl Command {
    /// Parse a command from its camelCase name (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("rotate"), Some(Command::Rotate));
    /// assert_eq!(Command::from_str("SOFTDROP"), Some(Command::SoftDrop));
    /// assert_eq!(Command::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "shiftleft" => Some(Command::ShiftLeft),
            "shiftright" => Some(Command::ShiftRight),
            "rotate" => Some(Command::Rotate),
            "softdrop" => Some(Command::SoftDrop),
            "tick" => Some(Command::Tick),
            _ => None,
        }
    }

    /// camelCase name used in logs and the JSON observation stream
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::ShiftLeft => "shiftLeft",
            Command::ShiftRight => "shiftRight",
            Command::Rotate => "rotate",
            Command::SoftDrop => "softDrop",
            Command::Tick => "tick",
        }
    }
}

/// Engine-side event emitted after a piece locks.
///
/// Observers (logging, the state recorder) consume it with
/// `GameSession::take_lock_event`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    /// Kind of the piece that was written into the board
    pub kind: PieceKind,
    pub lines_cleared: u32,
    /// Points awarded for this lock (0 when nothing cleared)
    pub points: u32,
    /// Whether the piece spawned after this lock immediately collided
    pub game_over: bool,
}

/// Where the host-side game loop currently is
///
/// The engine itself only knows "game over or not"; the start / pause
/// distinction lives in the controller and is shown by the presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayPhase {
    #[default]
    NotStarted,
    Playing,
    Paused,
    GameOver,
}

impl PlayPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayPhase::NotStarted => "notStarted",
            PlayPhase::Playing => "playing",
            PlayPhase::Paused => "paused",
            PlayPhase::GameOver => "gameOver",
        }
    }
}
