use crate::board::BoardGrid;
use crate::pieces::{get_shape, Shape};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH, EMPTY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub x: i8,
    pub y: i8,
}

/// Immutable copy of everything a presenter needs.
///
/// `board` already has the active piece overlaid. It is a value type, so a
/// snapshot never aliases engine memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: BoardGrid,
    /// None once the game is over; the board then shows only locked cells.
    pub active: Option<ActiveSnapshot>,
    pub next_kind: PieceKind,
    pub next_shape: Shape,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub game_over: bool,
    pub seed: u64,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[EMPTY; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.next_kind = PieceKind::I;
        self.next_shape = get_shape(PieceKind::I);
        self.score = 0;
        self.lines = 0;
        self.level = 0;
        self.game_over = false;
        self.seed = 0;
    }

    /// Number of non-empty cells in `board`
    pub fn filled_count(&self) -> usize {
        self.board
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&c| c != EMPTY)
            .count()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[EMPTY; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next_kind: PieceKind::I,
            next_shape: get_shape(PieceKind::I),
            score: 0,
            lines: 0,
            level: 0,
            game_over: false,
            seed: 0,
        }
    }
}
