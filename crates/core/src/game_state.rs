//! Game state module - the engine session
//!
//! `GameSession` ties together the board, the active and next pieces, the
//! generator and the score. It advances only through the command methods;
//! every blocked move is reverted rather than reported as an error, and game
//! over is an ordinary state that only `reset` leaves.

use arrayvec::ArrayVec;
use tracing::{debug, info, warn};

use crate::board::Board;
use crate::pieces::{get_shape, Shape};
use crate::rng::PieceGenerator;
use crate::scoring::{calculate_clear_score, calculate_level};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// A shape plus the board position of its matrix's top-left corner.
///
/// `y` may be negative while the piece is still entering from above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Place `kind` at the spawn position: horizontally centred, one row above
    /// the top.
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = get_shape(kind);
        Self {
            kind,
            shape,
            x: shape.spawn_x(),
            y: SPAWN_Y,
        }
    }

    /// Check whether any block is out of bounds or overlaps a locked cell
    pub fn collides(&self, board: &Board) -> bool {
        board.collides(&self.shape, self.x, self.y)
    }

    /// Absolute `(x, y, colour)` of every block
    pub fn blocks(&self) -> impl Iterator<Item = (i8, i8, Cell)> + '_ {
        self.shape
            .filled()
            .map(move |(dx, dy, v)| (self.x + dx, self.y + dy, v))
    }
}

/// Lock events not yet taken by an observer.
pub const PENDING_LOCK_EVENTS: usize = 8;

/// Complete engine state
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    active: Piece,
    next: PieceKind,
    generator: PieceGenerator,
    score: u32,
    lines: u32,
    game_over: bool,
    /// Lock events in lock order, consumed by observers.
    lock_events: ArrayVec<LockEvent, PENDING_LOCK_EVENTS>,
}

impl GameSession {
    /// Create a session in the freshly reset state with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_generator(Board::new(), PieceGenerator::new(seed))
    }

    /// Create a session seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::with_generator(Board::new(), PieceGenerator::from_entropy())
    }

    /// Build a session over a pre-filled board with chosen active and next
    /// pieces. Later pieces come from a generator seeded with `seed`.
    pub fn from_parts(board: Board, active: PieceKind, next: PieceKind, seed: u64) -> Self {
        let mut session = Self {
            board,
            active: Piece::spawn(active),
            next,
            generator: PieceGenerator::new(seed),
            score: 0,
            lines: 0,
            game_over: false,
            lock_events: ArrayVec::new(),
        };
        session.game_over = session.active.collides(&session.board);
        session
    }

    /// Start from existing score and cleared-line counters (puzzle setups,
    /// replays).
    pub fn with_progress(mut self, score: u32, lines: u32) -> Self {
        self.score = score;
        self.lines = lines;
        self
    }

    fn with_generator(board: Board, mut generator: PieceGenerator) -> Self {
        let active = Piece::spawn(generator.draw());
        let next = generator.draw();
        Self {
            board,
            active,
            next,
            generator,
            score: 0,
            lines: 0,
            game_over: false,
            lock_events: ArrayVec::new(),
        }
    }

    /// Start over: empty board, zero score and lines, two fresh pieces.
    ///
    /// The generator keeps running, so a reset does not replay the previous
    /// piece sequence.
    pub fn reset(&mut self) {
        self.board.clear();
        self.score = 0;
        self.lines = 0;
        self.game_over = false;
        self.lock_events.clear();
        self.active = Piece::spawn(self.generator.draw());
        self.next = self.generator.draw();
        info!(
            active = self.active.kind.as_str(),
            next = self.next.as_str(),
            "session reset"
        );
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        calculate_level(self.lines)
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn active(&self) -> Piece {
        self.active
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn seed(&self) -> u64 {
        self.generator.seed()
    }

    /// Take the oldest lock event not yet taken.
    ///
    /// Events queue up in lock order, so several locks between two calls are
    /// all reported. Only the newest `PENDING_LOCK_EVENTS` are kept when
    /// nobody drains the queue.
    pub fn take_lock_event(&mut self) -> Option<LockEvent> {
        if self.lock_events.is_empty() {
            return None;
        }
        Some(self.lock_events.remove(0))
    }

    /// Number of lock events waiting in the queue
    pub fn pending_lock_events(&self) -> usize {
        self.lock_events.len()
    }

    /// Apply a command. Returns whether the active piece moved or rotated.
    ///
    /// A drop that locks the piece returns false; the lock is reported via
    /// [`GameSession::take_lock_event`]. Every command is a no-op after game
    /// over.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::ShiftLeft => self.shift_left(),
            Command::ShiftRight => self.shift_right(),
            Command::Rotate => self.rotate(),
            Command::SoftDrop => self.soft_drop(),
            Command::Tick => self.tick(),
        }
    }

    pub fn shift_left(&mut self) -> bool {
        self.try_shift(-1)
    }

    pub fn shift_right(&mut self) -> bool {
        self.try_shift(1)
    }

    fn try_shift(&mut self, dx: i8) -> bool {
        if self.game_over {
            return false;
        }

        self.active.x += dx;
        if self.active.collides(&self.board) {
            self.active.x -= dx;
            return false;
        }
        true
    }

    /// Rotate clockwise in place, reverting on collision (no wall kicks).
    pub fn rotate(&mut self) -> bool {
        if self.game_over {
            return false;
        }

        self.active.shape = self.active.shape.rotated_cw();
        if self.active.collides(&self.board) {
            self.active.shape = self.active.shape.rotated_ccw();
            return false;
        }
        true
    }

    pub fn soft_drop(&mut self) -> bool {
        self.step_down()
    }

    /// Gravity step; behaves exactly like [`GameSession::soft_drop`]
    pub fn tick(&mut self) -> bool {
        self.step_down()
    }

    fn step_down(&mut self) -> bool {
        if self.game_over {
            return false;
        }

        self.active.y += 1;
        if !self.active.collides(&self.board) {
            return true;
        }

        self.active.y -= 1;
        self.lock_active();
        false
    }

    /// Lock the active piece, clear lines, score, and activate the next piece
    fn lock_active(&mut self) {
        let locked = self.active;
        self.board.lock_shape(&locked.shape, locked.x, locked.y);

        let cleared = self.board.clear_full_rows();
        let lines_cleared = cleared.len() as u32;
        let points = calculate_clear_score(cleared.len(), self.lines);

        if lines_cleared > 0 {
            self.score = self.score.saturating_add(points);
            self.lines = self.lines.saturating_add(lines_cleared);
            info!(
                lines_cleared,
                points,
                score = self.score,
                level = self.level(),
                "lines cleared"
            );
        }

        self.active = Piece::spawn(self.next);
        self.next = self.generator.draw();

        if self.active.collides(&self.board) {
            self.game_over = true;
            info!(score = self.score, lines = self.lines, "game over");
        }

        debug!(
            kind = locked.kind.as_str(),
            x = locked.x,
            y = locked.y,
            "piece locked"
        );

        if self.lock_events.is_full() {
            let dropped = self.lock_events.remove(0);
            warn!(kind = dropped.kind.as_str(), "lock event queue full; oldest dropped");
        }
        self.lock_events.push(LockEvent {
            kind: locked.kind,
            lines_cleared,
            points,
            game_over: self.game_over,
        });
    }

    /// Refresh an existing snapshot without allocating.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);

        if self.game_over {
            out.active = None;
        } else {
            for (x, y, v) in self.active.blocks() {
                if (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y) {
                    out.board[y as usize][x as usize] = v;
                }
            }
            out.active = Some(ActiveSnapshot {
                kind: self.active.kind,
                x: self.active.x,
                y: self.active.y,
            });
        }

        out.next_kind = self.next;
        out.next_shape = get_shape(self.next);
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level();
        out.game_over = self.game_over;
        out.seed = self.generator.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(1)
    }
}
