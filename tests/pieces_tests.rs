//! Piece catalog tests - canonical matrices, rotation and kicks

use blocktris::core::pieces::{rotate_clockwise, shape_of, spawn_x, try_rotate, Shape};
use blocktris::core::{Board, Tetromino};
use blocktris::types::{PieceKind, WALL_KICKS};

fn rows_of(shape: &Shape) -> Vec<String> {
    let n = shape.size() as usize;
    (0..n)
        .map(|r| {
            (0..n)
                .map(|c| if shape.get(r, c) { '#' } else { '.' })
                .collect()
        })
        .collect()
}

#[test]
fn test_canonical_matrices() {
    assert_eq!(rows_of(&shape_of(PieceKind::I)), ["....", "####", "....", "...."]);
    assert_eq!(rows_of(&shape_of(PieceKind::J)), ["#..", "###", "..."]);
    assert_eq!(rows_of(&shape_of(PieceKind::L)), ["..#", "###", "..."]);
    assert_eq!(rows_of(&shape_of(PieceKind::O)), ["##", "##"]);
    assert_eq!(rows_of(&shape_of(PieceKind::S)), [".##", "##.", "..."]);
    assert_eq!(rows_of(&shape_of(PieceKind::T)), [".#.", "###", "..."]);
    assert_eq!(rows_of(&shape_of(PieceKind::Z)), ["##.", ".##", "..."]);
}

#[test]
fn test_color_indices_follow_catalog_order() {
    let colors: Vec<u8> = PieceKind::ALL.iter().map(|k| k.color_index()).collect();
    assert_eq!(colors, vec![0, 1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_rotation_keeps_size_and_mino_count() {
    for kind in PieceKind::ALL {
        let shape = shape_of(kind);
        let rotated = rotate_clockwise(&shape);
        assert_eq!(rotated.size(), shape.size(), "{:?}", kind);
        assert_eq!(rotated.cells().len(), 4, "{:?}", kind);
    }
}

#[test]
fn test_j_rotation_sequence() {
    let east = rotate_clockwise(&shape_of(PieceKind::J));
    assert_eq!(rows_of(&east), [".##", ".#.", ".#."]);

    let south = rotate_clockwise(&east);
    assert_eq!(rows_of(&south), ["...", "###", "..#"]);
}

#[test]
fn test_o_rotation_is_identity() {
    let o = shape_of(PieceKind::O);
    assert_eq!(rotate_clockwise(&o), o);
}

#[test]
fn test_rotating_a_copy_leaves_catalog_untouched() {
    let mut piece = Tetromino::spawn(PieceKind::T, 10);
    piece.shape = piece.shape.rotated_cw();
    assert_ne!(piece.shape, shape_of(PieceKind::T));
    assert_eq!(Tetromino::spawn(PieceKind::T, 10).shape, shape_of(PieceKind::T));
}

#[test]
fn test_spawn_positions() {
    for kind in PieceKind::ALL {
        let piece = Tetromino::spawn(kind, 10);
        let expected = 5 - (shape_of(kind).size() / 2) as i8;
        assert_eq!(piece.x, expected, "{:?}", kind);
        assert_eq!(piece.y, 0);
        assert_eq!(spawn_x(10, &piece.shape), expected);
    }
}

#[test]
fn test_kick_off_right_wall() {
    let board = Board::default();
    // Vertical I hugging the right wall: column offset 2 at x = 7.
    let vertical = rotate_clockwise(&shape_of(PieceKind::I));
    assert!(!board.would_collide(&vertical, 7, 5));

    // Back to horizontal (row offset 2, columns 0..=3): x = 7 and 8 overflow,
    // x = 6 fits.
    let (shape, dx) = try_rotate(&vertical, 7, 5, &WALL_KICKS, |s, x, y| {
        board.would_collide(s, x, y)
    })
    .unwrap();
    assert_eq!(dx, -1);
    assert_eq!(shape.cells().len(), 4);
}

#[test]
fn test_rotation_blocked_everywhere() {
    // Rows 2..=19 are full; the spawned T itself still fits above them.
    let board = Board::from_rows(10, 20, &["ZZZZZZZZZZ"; 18]);
    assert!(!board.would_collide(&shape_of(PieceKind::T), 4, 0));

    let result = try_rotate(&shape_of(PieceKind::T), 4, 0, &WALL_KICKS, |s, x, y| {
        board.would_collide(s, x, y)
    });
    assert!(result.is_none());
}
