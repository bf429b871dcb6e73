//! Property tests for the engine laws.
//!
//! - A clockwise turn followed by a counter-clockwise turn restores any shape.
//! - Adding locked cells never turns a colliding placement into a legal one.
//! - Clearing rows keeps every other row, in order, and only adds empty rows
//!   at the top.
//! - Over any command sequence the score never decreases, changes only on a
//!   clear, and the level stays `lines / 10`.

use proptest::prelude::*;

use blockfall::core::{get_shape, Board, GameSession, Shape};
use blockfall::types::{Command, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, LINE_SCORES};

const W: usize = BOARD_WIDTH as usize;
const H: usize = BOARD_HEIGHT as usize;

const COMMANDS: [Command; 5] = [
    Command::ShiftLeft,
    Command::ShiftRight,
    Command::Rotate,
    Command::SoftDrop,
    Command::Tick,
];

fn kind_strategy() -> impl Strategy<Value = PieceKind> {
    (0usize..7).prop_map(|i| PieceKind::ALL[i])
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    (1usize..=4)
        .prop_flat_map(|n| prop::collection::vec(prop::collection::vec(0u8..=7, n), n))
        .prop_filter_map("shape needs a filled cell", |rows| {
            let slices: Vec<&[u8]> = rows.iter().map(|r| r.as_slice()).collect();
            Shape::from_rows(&slices).ok()
        })
}

fn cells_strategy(max: usize) -> impl Strategy<Value = Vec<(i8, i8)>> {
    prop::collection::vec((0i8..BOARD_WIDTH as i8, 0i8..BOARD_HEIGHT as i8), 0..max)
}

/// A contiguous stack: `(full, cells)` per row, bottom rows of the board.
fn stack_strategy() -> impl Strategy<Value = Vec<(bool, Vec<u8>)>> {
    prop::collection::vec((any::<bool>(), prop::collection::vec(0u8..=7, W)), 0..=H)
}

fn build_stack(rows: &[(bool, Vec<u8>)]) -> Vec<[u8; W]> {
    rows.iter()
        .map(|(full, cells)| {
            let mut row = [0u8; W];
            row.copy_from_slice(cells);
            if *full {
                for c in row.iter_mut().filter(|c| **c == 0) {
                    *c = 1;
                }
            } else if row.iter().all(|&c| c == 0) {
                row[0] = 1;
            }
            row
        })
        .collect()
}

proptest! {
    #[test]
    fn rotation_round_trip(shape in shape_strategy()) {
        prop_assert_eq!(shape.rotated_cw().rotated_ccw(), shape);
        prop_assert_eq!(shape.rotated_ccw().rotated_cw(), shape);
        prop_assert_eq!(shape.filled().count(), shape.rotated_cw().filled().count());
    }

    #[test]
    fn collision_is_monotonic(
        base in cells_strategy(60),
        extra in cells_strategy(60),
        kind in kind_strategy(),
        turns in 0usize..4,
        x in -3i8..12,
        y in -4i8..22,
    ) {
        let mut shape = get_shape(kind);
        for _ in 0..turns {
            shape = shape.rotated_cw();
        }

        let mut board = Board::new();
        for &(cx, cy) in &base {
            board.set(cx, cy, 1);
        }
        let before = board.collides(&shape, x, y);

        for &(cx, cy) in &extra {
            board.set(cx, cy, 2);
        }
        let after = board.collides(&shape, x, y);

        prop_assert!(!before || after);
    }

    #[test]
    fn line_clear_keeps_other_rows_in_order(rows in stack_strategy()) {
        let stack = build_stack(&rows);
        let top = H - stack.len();

        let mut board = Board::new();
        for (i, row) in stack.iter().enumerate() {
            for (x, &c) in row.iter().enumerate() {
                board.set(x as i8, (top + i) as i8, c);
            }
        }

        let full = stack.iter().filter(|r| r.iter().all(|&c| c != 0)).count();
        let kept: Vec<[u8; W]> = stack.iter().copied().filter(|r| r.iter().any(|&c| c == 0)).collect();

        let mut expected = vec![[0u8; W]; H - kept.len()];
        expected.extend(kept.iter().copied());

        let kept_cells: usize = kept.iter().map(|r| r.iter().filter(|&&c| c != 0).count()).sum();

        let cleared = board.clear_full_rows();
        prop_assert_eq!(cleared.len(), full);
        prop_assert_eq!(board.filled_count(), kept_cells);
        prop_assert_eq!(board.to_grid().to_vec(), expected);
    }

    #[test]
    fn score_only_grows_on_clears(
        seed in any::<u64>(),
        commands in prop::collection::vec(0usize..COMMANDS.len(), 1..400),
    ) {
        let mut session = GameSession::new(seed);

        for i in commands {
            let (score, lines) = (session.score(), session.lines());
            let level_before = session.level();

            session.apply(COMMANDS[i]);
            let event = session.take_lock_event();

            prop_assert!(session.score() >= score);
            prop_assert_eq!(session.level(), session.lines() / 10);

            match event {
                Some(e) if e.lines_cleared > 0 => {
                    prop_assert!(e.lines_cleared <= 4);
                    let points = LINE_SCORES[e.lines_cleared as usize] * (level_before + 1);
                    prop_assert_eq!(e.points, points);
                    prop_assert_eq!(session.score(), score + points);
                    prop_assert_eq!(session.lines(), lines + e.lines_cleared);
                }
                _ => {
                    prop_assert_eq!(session.score(), score);
                    prop_assert_eq!(session.lines(), lines);
                }
            }
        }
    }
}
