//! Pieces module - the seven-shape catalog and matrix rotation
//!
//! Each piece is a square matrix (3x3, or 4x4 for I and O) whose non-zero
//! cells carry the piece's colour id. Rotation is a plain 90° matrix turn
//! with no wall kicks; the counter-clockwise turn is its exact inverse.

use crate::error::PieceError;
use crate::types::{Cell, PieceKind, BOARD_WIDTH, EMPTY, MAX_CELL, MAX_SHAPE_SIZE};

/// Backing storage of a shape; cells outside `size x size` stay empty.
pub type ShapeMatrix = [[Cell; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];

/// A square piece footprint of side 1..=4 (catalog shapes use 3 or 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    cells: ShapeMatrix,
}

impl Shape {
    const fn from_3x3(rows: [[Cell; 3]; 3]) -> Self {
        let mut cells = [[EMPTY; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < 3 {
            let mut x = 0;
            while x < 3 {
                cells[y][x] = rows[y][x];
                x += 1;
            }
            y += 1;
        }
        Self { size: 3, cells }
    }

    const fn from_4x4(cells: ShapeMatrix) -> Self {
        Self { size: 4, cells }
    }

    /// Build a shape from explicit rows, validating it the same way the
    /// catalog shapes are guaranteed to be valid.
    ///
    /// ```
    /// use blockfall_core::pieces::Shape;
    ///
    /// let s = Shape::from_rows(&[&[0, 6, 0], &[6, 6, 6], &[0, 0, 0]]).unwrap();
    /// assert_eq!(s.size(), 3);
    /// assert!(Shape::from_rows(&[&[1, 1], &[1]]).is_err());
    /// ```
    pub fn from_rows(rows: &[&[Cell]]) -> Result<Self, PieceError> {
        let n = rows.len();
        if n == 0 || n > MAX_SHAPE_SIZE {
            return Err(PieceError::NotSquare {
                rows: n,
                cols: rows.first().map_or(0, |r| r.len()),
            });
        }

        let mut cells = [[EMPTY; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut filled = 0usize;
        for (y, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(PieceError::NotSquare {
                    rows: n,
                    cols: row.len(),
                });
            }
            for (x, &v) in row.iter().enumerate() {
                if v > MAX_CELL {
                    return Err(PieceError::InvalidCell(v));
                }
                if v != EMPTY {
                    filled += 1;
                }
                cells[y][x] = v;
            }
        }

        if filled == 0 {
            return Err(PieceError::Empty);
        }

        Ok(Self {
            size: n as u8,
            cells,
        })
    }

    /// Side length of the matrix
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Cell at local (x, y); empty outside the matrix
    pub fn get(&self, x: usize, y: usize) -> Cell {
        if x >= self.size() || y >= self.size() {
            return EMPTY;
        }
        self.cells[y][x]
    }

    /// Row `y` of the matrix, `size()` cells long
    pub fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y][..self.size()]
    }

    /// Iterate over the matrix rows
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        (0..self.size()).map(move |y| self.row(y))
    }

    /// Non-zero cells as `(local_x, local_y, value)`
    pub fn filled(&self) -> impl Iterator<Item = (i8, i8, Cell)> + '_ {
        let n = self.size();
        (0..n).flat_map(move |y| {
            (0..n).filter_map(move |x| {
                let v = self.cells[y][x];
                (v != EMPTY).then_some((x as i8, y as i8, v))
            })
        })
    }

    /// Clockwise quarter turn: `dst[x][y] = src[n-1-y][x]`
    pub fn rotated_cw(&self) -> Self {
        let n = self.size();
        let mut cells = [[EMPTY; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for y in 0..n {
            for x in 0..n {
                cells[x][y] = self.cells[n - 1 - y][x];
            }
        }
        Self {
            size: self.size,
            cells,
        }
    }

    /// Counter-clockwise quarter turn: `dst[x][y] = src[y][n-1-x]`
    pub fn rotated_ccw(&self) -> Self {
        let n = self.size();
        let mut cells = [[EMPTY; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for y in 0..n {
            for x in 0..n {
                cells[x][y] = self.cells[y][n - 1 - x];
            }
        }
        Self {
            size: self.size,
            cells,
        }
    }

    /// Spawn column: the matrix is centred, rounding left.
    pub fn spawn_x(&self) -> i8 {
        ((BOARD_WIDTH - self.size) / 2) as i8
    }
}

const I_SHAPE: Shape = Shape::from_4x4([
    [0, 0, 0, 0],
    [1, 1, 1, 1],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
]);

const J_SHAPE: Shape = Shape::from_3x3([
    [0, 0, 0],
    [2, 2, 2],
    [0, 0, 2],
]);

const L_SHAPE: Shape = Shape::from_3x3([
    [0, 0, 0],
    [3, 3, 3],
    [3, 0, 0],
]);

const O_SHAPE: Shape = Shape::from_4x4([
    [0, 0, 0, 0],
    [0, 4, 4, 0],
    [0, 4, 4, 0],
    [0, 0, 0, 0],
]);

const S_SHAPE: Shape = Shape::from_3x3([
    [0, 0, 0],
    [0, 5, 5],
    [5, 5, 0],
]);

const T_SHAPE: Shape = Shape::from_3x3([
    [0, 0, 0],
    [6, 6, 6],
    [0, 6, 0],
]);

const Z_SHAPE: Shape = Shape::from_3x3([
    [0, 0, 0],
    [7, 7, 0],
    [0, 7, 7],
]);

/// Get the spawn-orientation shape for a piece kind
pub fn get_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::Z => Z_SHAPE,
    }
}

/// Look up a piece kind by letter, failing on anything outside `IJLOSTZ`.
pub fn kind_from_letter(letter: &str) -> Result<PieceKind, PieceError> {
    PieceKind::from_str(letter).ok_or_else(|| PieceError::UnknownLetter(letter.to_string()))
}

/// Look up a piece kind by colour id, failing on anything outside `1..=7`.
pub fn kind_from_color_id(id: Cell) -> Result<PieceKind, PieceError> {
    PieceKind::from_color_id(id).ok_or(PieceError::UnknownColorId(id))
}

/// Shape lookup by letter.
pub fn shape_for_letter(letter: &str) -> Result<Shape, PieceError> {
    kind_from_letter(letter).map(get_shape)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_sizes() {
        assert_eq!(get_shape(PieceKind::I).size(), 4);
        assert_eq!(get_shape(PieceKind::O).size(), 4);
        for kind in [PieceKind::J, PieceKind::L, PieceKind::S, PieceKind::T, PieceKind::Z] {
            assert_eq!(get_shape(kind).size(), 3, "{kind:?}");
        }
    }

    #[test]
    fn catalog_cells_carry_color_id() {
        for kind in PieceKind::ALL {
            let shape = get_shape(kind);
            let cells: Vec<_> = shape.filled().collect();
            assert_eq!(cells.len(), 4, "{kind:?} should have four blocks");
            assert!(cells.iter().all(|&(_, _, v)| v == kind.color_id()));
        }
    }

    #[test]
    fn spawn_columns() {
        assert_eq!(get_shape(PieceKind::I).spawn_x(), 3);
        assert_eq!(get_shape(PieceKind::O).spawn_x(), 3);
        assert_eq!(get_shape(PieceKind::T).spawn_x(), 3);
    }

    #[test]
    fn t_rotates_clockwise() {
        let t = get_shape(PieceKind::T).rotated_cw();
        assert_eq!(t.row(0), &[0, 6, 0]);
        assert_eq!(t.row(1), &[6, 6, 0]);
        assert_eq!(t.row(2), &[0, 6, 0]);
    }

    #[test]
    fn i_rotates_to_vertical() {
        let i = get_shape(PieceKind::I).rotated_cw();
        for y in 0..4 {
            assert_eq!(i.row(y), &[0, 0, 1, 0]);
        }
    }

    #[test]
    fn rotation_inverse_restores_matrix() {
        for kind in PieceKind::ALL {
            let s = get_shape(kind);
            assert_eq!(s.rotated_cw().rotated_ccw(), s);
            assert_eq!(s.rotated_ccw().rotated_cw(), s);
        }
    }

    #[test]
    fn four_turns_are_identity() {
        for kind in PieceKind::ALL {
            let s = get_shape(kind);
            let turned = s.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
            assert_eq!(turned, s);
        }
    }

    #[test]
    fn unknown_lookups_fail() {
        assert_eq!(
            kind_from_letter("X"),
            Err(PieceError::UnknownLetter("X".to_string()))
        );
        assert_eq!(kind_from_color_id(0), Err(PieceError::UnknownColorId(0)));
        assert_eq!(kind_from_color_id(8), Err(PieceError::UnknownColorId(8)));
        assert!(shape_for_letter("q").is_err());
        assert_eq!(shape_for_letter("z"), Ok(get_shape(PieceKind::Z)));
    }

    #[test]
    fn from_rows_rejects_bad_matrices() {
        assert!(matches!(
            Shape::from_rows(&[]),
            Err(PieceError::NotSquare { .. })
        ));
        assert!(matches!(
            Shape::from_rows(&[&[1, 1, 1], &[1, 1, 1]]),
            Err(PieceError::NotSquare { .. })
        ));
        assert_eq!(
            Shape::from_rows(&[&[9, 0], &[0, 0]]),
            Err(PieceError::InvalidCell(9))
        );
        assert_eq!(Shape::from_rows(&[&[0, 0], &[0, 0]]), Err(PieceError::Empty));
    }

    #[test]
    fn from_rows_matches_catalog() {
        let built = Shape::from_rows(&[&[0, 0, 0], &[7, 7, 0], &[0, 7, 7]]).unwrap();
        assert_eq!(built, get_shape(PieceKind::Z));
    }
}
