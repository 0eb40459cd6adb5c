//! Pieces module - tetromino catalog and matrix rotation
//!
//! Every shape is a square boolean matrix (2x2, 3x3 or 4x4), so a clockwise
//! turn never changes the bounding box and a rotated shape can be collision
//! checked at the same origin.
//!
//! Rotation uses a single horizontal kick list shared by all kinds instead of
//! per-piece SRS tables: the direct rotation is tried first, then each kick
//! offset in order.

use arrayvec::ArrayVec;
use rand::Rng;
use serde::Serialize;

use crate::types::PieceKind;

/// Largest bounding box in the catalog (the I piece)
pub const MAX_SHAPE_SIZE: usize = 4;

/// Offset of a single mino relative to the piece origin, `(dx, dy)`
pub type MinoOffset = (i8, i8);

/// Occupied offsets of a shape, listed row by row
pub type MinoList = ArrayVec<MinoOffset, { MAX_SHAPE_SIZE * MAX_SHAPE_SIZE }>;

/// A square occupancy matrix.
///
/// `Shape` is `Copy`: a piece owns its own value and rotating it never touches
/// the catalog entry it was spawned from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Shape {
    size: u8,
    rows: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from per-row bit masks.
    ///
    /// The most significant of the `size` low bits is column 0, so
    /// `0b100` in a 3x3 shape marks the leftmost cell.
    ///
    /// ```
    /// use blocktris_core::pieces::Shape;
    ///
    /// let t = Shape::from_masks(3, [0b010, 0b111, 0b000, 0]);
    /// assert!(t.get(0, 1));
    /// assert!(!t.get(0, 0));
    /// assert_eq!(t.cells().len(), 4);
    /// ```
    pub const fn from_masks(size: u8, masks: [u8; MAX_SHAPE_SIZE]) -> Self {
        let mut rows = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let n = if (size as usize) > MAX_SHAPE_SIZE {
            MAX_SHAPE_SIZE
        } else {
            size as usize
        };
        let mut r = 0;
        while r < n {
            let mut c = 0;
            while c < n {
                rows[r][c] = (masks[r] & (1 << (n - 1 - c))) != 0;
                c += 1;
            }
            r += 1;
        }
        Self {
            size: n as u8,
            rows,
        }
    }

    /// Side length of the bounding box
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Whether the cell at `(row, col)` is occupied.
    /// Out-of-box coordinates read as empty.
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.size as usize && col < self.size as usize && self.rows[row][col]
    }

    /// Occupied offsets as `(dx, dy)` = `(col, row)`
    pub fn cells(&self) -> MinoList {
        let mut out = MinoList::new();
        let n = self.size as usize;
        for row in 0..n {
            for col in 0..n {
                if self.rows[row][col] {
                    out.push((col as i8, row as i8));
                }
            }
        }
        out
    }

    /// Index of the lowest occupied row, or `None` for an empty shape
    pub fn bottom_row(&self) -> Option<u8> {
        let n = self.size as usize;
        (0..n)
            .rev()
            .find(|&row| self.rows[row][..n].iter().any(|&c| c))
            .map(|row| row as u8)
    }

    /// This shape turned 90° clockwise
    pub fn rotated_cw(&self) -> Self {
        rotate_clockwise(self)
    }
}

/// Turn a shape 90° clockwise: `new[col][n - 1 - row] = old[row][col]`.
pub fn rotate_clockwise(shape: &Shape) -> Shape {
    let n = shape.size as usize;
    let mut rows = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
    for row in 0..n {
        for col in 0..n {
            rows[col][n - 1 - row] = shape.rows[row][col];
        }
    }
    Shape {
        size: shape.size,
        rows,
    }
}

const I_SHAPE: Shape = Shape::from_masks(4, [0b0000, 0b1111, 0b0000, 0b0000]);
const J_SHAPE: Shape = Shape::from_masks(3, [0b100, 0b111, 0b000, 0]);
const L_SHAPE: Shape = Shape::from_masks(3, [0b001, 0b111, 0b000, 0]);
const O_SHAPE: Shape = Shape::from_masks(2, [0b11, 0b11, 0, 0]);
const S_SHAPE: Shape = Shape::from_masks(3, [0b011, 0b110, 0b000, 0]);
const T_SHAPE: Shape = Shape::from_masks(3, [0b010, 0b111, 0b000, 0]);
const Z_SHAPE: Shape = Shape::from_masks(3, [0b110, 0b011, 0b000, 0]);

/// Canonical spawn shape for a piece kind
pub fn shape_of(kind: PieceKind) -> Shape {
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

/// Draw a kind uniformly from the seven
pub fn random_kind<R: Rng + ?Sized>(rng: &mut R) -> PieceKind {
    PieceKind::ALL[rng.gen_range(0..PieceKind::ALL.len())]
}

/// Spawn column for a shape: centered, rounding toward the left
pub fn spawn_x(cols: u8, shape: &Shape) -> i8 {
    (cols / 2) as i8 - (shape.size / 2) as i8
}

/// Try to rotate a shape clockwise with horizontal wall kicks.
///
/// `collides(shape, x, y)` reports whether the candidate would overlap a wall,
/// the floor or a locked cell. The unkicked position is tried first, then
/// `x + kick` for each entry of `kicks` in order.
///
/// Returns `Some((rotated, dx))` for the first clear position, `None` if every
/// candidate collides.
pub fn try_rotate(
    shape: &Shape,
    x: i8,
    y: i8,
    kicks: &[i8],
    collides: impl Fn(&Shape, i8, i8) -> bool,
) -> Option<(Shape, i8)> {
    let rotated = rotate_clockwise(shape);

    std::iter::once(0)
        .chain(kicks.iter().copied())
        .find(|&dx| !collides(&rotated, x + dx, y))
        .map(|dx| (rotated, dx))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(shape_of(PieceKind::I).size(), 4);
        assert_eq!(shape_of(PieceKind::O).size(), 2);
        for kind in [
            PieceKind::J,
            PieceKind::L,
            PieceKind::S,
            PieceKind::T,
            PieceKind::Z,
        ] {
            assert_eq!(shape_of(kind).size(), 3, "{:?}", kind);
        }
    }

    #[test]
    fn test_every_shape_has_four_minos() {
        for kind in PieceKind::ALL {
            assert_eq!(shape_of(kind).cells().len(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_i_rotates_into_third_column() {
        let vertical = shape_of(PieceKind::I).rotated_cw();
        assert_eq!(vertical.cells().as_slice(), &[(2, 0), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_t_rotation_points_right() {
        // .#.      .#.
        // ###  ->  .##
        // ...      .#.
        let east = shape_of(PieceKind::T).rotated_cw();
        assert_eq!(east, Shape::from_masks(3, [0b010, 0b011, 0b010, 0]));
    }

    #[test]
    fn test_spawn_x_centers_shapes() {
        assert_eq!(spawn_x(10, &shape_of(PieceKind::I)), 3);
        assert_eq!(spawn_x(10, &shape_of(PieceKind::O)), 4);
        assert_eq!(spawn_x(10, &shape_of(PieceKind::T)), 4);
    }

    #[test]
    fn test_bottom_row() {
        assert_eq!(shape_of(PieceKind::I).bottom_row(), Some(1));
        assert_eq!(shape_of(PieceKind::O).bottom_row(), Some(1));
        assert_eq!(shape_of(PieceKind::I).rotated_cw().bottom_row(), Some(3));
        assert_eq!(Shape::from_masks(3, [0; 4]).bottom_row(), None);
    }

    #[test]
    fn test_try_rotate_prefers_unkicked() {
        let result = try_rotate(&shape_of(PieceKind::T), 4, 5, &[1, -1, 2, -2], |_, _, _| false);
        let (shape, dx) = result.unwrap();
        assert_eq!(shape, shape_of(PieceKind::T).rotated_cw());
        assert_eq!(dx, 0);
    }

    #[test]
    fn test_try_rotate_kick_order() {
        // Only x = 2 (kick -2 from x = 4) is free.
        let result = try_rotate(&shape_of(PieceKind::J), 4, 0, &[1, -1, 2, -2], |_, x, _| x != 2);
        assert_eq!(result.map(|(_, dx)| dx), Some(-2));

        // +1 wins over -1 when both are free.
        let result = try_rotate(&shape_of(PieceKind::J), 4, 0, &[1, -1, 2, -2], |_, x, _| {
            x == 4
        });
        assert_eq!(result.map(|(_, dx)| dx), Some(1));
    }

    #[test]
    fn test_try_rotate_fails_when_blocked() {
        let result = try_rotate(&shape_of(PieceKind::S), 4, 0, &[1, -1, 2, -2], |_, _, _| true);
        assert!(result.is_none());
    }

    #[test]
    fn test_random_kind_covers_all_kinds() {
        use rand::{rngs::StdRng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 7];
        for _ in 0..500 {
            seen[random_kind(&mut rng).color_index() as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
