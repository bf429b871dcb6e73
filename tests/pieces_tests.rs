//! Pieces tests - catalog, rotation and lookup

use blockfall::core::pieces::{kind_from_color_id, kind_from_letter, shape_for_letter};
use blockfall::core::{get_shape, PieceError, Shape};
use blockfall::types::PieceKind;

fn rows_of(shape: &Shape) -> Vec<Vec<u8>> {
    shape.rows().map(|r| r.to_vec()).collect()
}

#[test]
fn test_catalog_matrices() {
    assert_eq!(
        rows_of(&get_shape(PieceKind::I)),
        vec![vec![0, 0, 0, 0], vec![1, 1, 1, 1], vec![0, 0, 0, 0], vec![0, 0, 0, 0]]
    );
    assert_eq!(
        rows_of(&get_shape(PieceKind::O)),
        vec![vec![0, 0, 0, 0], vec![0, 4, 4, 0], vec![0, 4, 4, 0], vec![0, 0, 0, 0]]
    );
    assert_eq!(
        rows_of(&get_shape(PieceKind::J)),
        vec![vec![0, 0, 0], vec![2, 2, 2], vec![0, 0, 2]]
    );
    assert_eq!(
        rows_of(&get_shape(PieceKind::L)),
        vec![vec![0, 0, 0], vec![3, 3, 3], vec![3, 0, 0]]
    );
    assert_eq!(
        rows_of(&get_shape(PieceKind::S)),
        vec![vec![0, 0, 0], vec![0, 5, 5], vec![5, 5, 0]]
    );
    assert_eq!(
        rows_of(&get_shape(PieceKind::T)),
        vec![vec![0, 0, 0], vec![6, 6, 6], vec![0, 6, 0]]
    );
    assert_eq!(
        rows_of(&get_shape(PieceKind::Z)),
        vec![vec![0, 0, 0], vec![7, 7, 0], vec![0, 7, 7]]
    );
}

#[test]
fn test_every_shape_has_four_blocks_of_its_colour() {
    for kind in PieceKind::ALL {
        let shape = get_shape(kind);
        let blocks: Vec<_> = shape.filled().collect();
        assert_eq!(blocks.len(), 4, "{kind:?}");
        assert!(blocks.iter().all(|&(_, _, v)| v == kind.color_id()));
    }
}

#[test]
fn test_spawn_columns() {
    assert_eq!(get_shape(PieceKind::I).spawn_x(), 3);
    assert_eq!(get_shape(PieceKind::O).spawn_x(), 3);
    assert_eq!(get_shape(PieceKind::T).spawn_x(), 3);
}

#[test]
fn test_clockwise_turns() {
    let s = get_shape(PieceKind::S).rotated_cw();
    assert_eq!(rows_of(&s), vec![vec![5, 0, 0], vec![5, 5, 0], vec![0, 5, 0]]);

    let i = get_shape(PieceKind::I).rotated_cw();
    assert!(i.rows().all(|r| r == [0, 0, 1, 0]));
}

#[test]
fn test_rotation_round_trip_and_period() {
    for kind in PieceKind::ALL {
        let shape = get_shape(kind);
        assert_eq!(shape.rotated_cw().rotated_ccw(), shape, "{kind:?}");
        assert_eq!(shape.rotated_ccw().rotated_cw(), shape, "{kind:?}");

        let four = shape.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
        assert_eq!(four, shape, "{kind:?}");
    }
}

#[test]
fn test_lookup_by_letter_and_color() {
    assert_eq!(kind_from_letter("t"), Ok(PieceKind::T));
    assert_eq!(kind_from_letter("Z"), Ok(PieceKind::Z));
    assert_eq!(
        kind_from_letter("X"),
        Err(PieceError::UnknownLetter("X".to_string()))
    );

    assert_eq!(kind_from_color_id(1), Ok(PieceKind::I));
    assert_eq!(kind_from_color_id(0), Err(PieceError::UnknownColorId(0)));
    assert_eq!(kind_from_color_id(8), Err(PieceError::UnknownColorId(8)));

    assert_eq!(shape_for_letter("o"), Ok(get_shape(PieceKind::O)));
    assert!(shape_for_letter("").is_err());
}

#[test]
fn test_from_rows_validation() {
    let t = Shape::from_rows(&[&[0, 0, 0], &[6, 6, 6], &[0, 6, 0]]).unwrap();
    assert_eq!(t, get_shape(PieceKind::T));

    assert_eq!(Shape::from_rows(&[]), Err(PieceError::NotSquare { rows: 0, cols: 0 }));
    assert_eq!(
        Shape::from_rows(&[&[1, 1], &[1, 1, 1]]),
        Err(PieceError::NotSquare { rows: 2, cols: 3 })
    );
    assert_eq!(Shape::from_rows(&[&[9]]), Err(PieceError::InvalidCell(9)));
    assert_eq!(Shape::from_rows(&[&[0, 0], &[0, 0]]), Err(PieceError::Empty));

    let wide: &[u8] = &[1; 5];
    let err = Shape::from_rows(&[wide; 5]).unwrap_err();
    assert_eq!(err.to_string(), "shape must be square with side 1..=4, got 5 rows x 5 columns");
}
