use std::str::FromStr;

use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize, Serializer};

use super::board::Board;

/// Row of the shape's top-left corner when a piece spawns.
pub const SPAWN_ROW: i32 = 0;

/// Column of the shape's top-left corner when a piece spawns.
pub const SPAWN_COL: i32 = 3;

/// A falling piece: one tetromino kind in one rotation state, anchored on the board.
///
/// `row`/`col` are the board coordinates of the shape matrix's top-left corner.
/// They are signed so that candidate placements left of or above the board can be
/// expressed and then rejected by [`Board::is_colliding`].
///
/// Pieces are values: movement and rotation return new `Piece` instances and never
/// check legality themselves.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, Piece, PieceKind};
///
/// let board = Board::EMPTY;
/// let piece = Piece::new(PieceKind::O);
/// assert_eq!((piece.row(), piece.col()), (0, 3));
///
/// let landed = piece.simulate_drop_position(&board);
/// assert_eq!(landed.row(), 18);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Piece {
    kind: PieceKind,
    shape: Shape,
    row: i32,
    col: i32,
}

impl Piece {
    /// Creates a piece of the given kind in its spawn shape at the spawn anchor.
    #[must_use]
    pub const fn new(kind: PieceKind) -> Self {
        Self::with_position(kind, kind.spawn_shape(), SPAWN_ROW, SPAWN_COL)
    }

    #[must_use]
    pub const fn with_position(kind: PieceKind, shape: Shape, row: i32, col: i32) -> Self {
        Self {
            kind,
            shape,
            row,
            col,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    #[must_use]
    pub const fn col(&self) -> i32 {
        self.col
    }

    /// Returns the absolute `(row, col)` board positions covered by this piece.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape.occupied_cells().map(move |(r, c)| {
            // shape offsets are < 4, always representable
            #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let (r, c) = (r as i32, c as i32);
            (self.row + r, self.col + c)
        })
    }

    #[must_use]
    pub const fn left(&self) -> Self {
        self.moved(0, -1)
    }

    #[must_use]
    pub const fn right(&self) -> Self {
        self.moved(0, 1)
    }

    #[must_use]
    pub const fn down(&self) -> Self {
        self.moved(1, 0)
    }

    const fn moved(&self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
            ..*self
        }
    }

    /// Returns this piece with its shape rotated 90° clockwise around the same anchor.
    ///
    /// There is no wall kick: if the rotated piece collides, the caller discards it.
    #[must_use]
    pub fn rotated_cw(&self) -> Self {
        Self {
            shape: self.shape.rotated_cw(),
            ..*self
        }
    }

    /// Returns the lowest legal placement reachable by moving straight down.
    ///
    /// This is the ghost piece. If `self` is already colliding, `self` is returned.
    #[must_use]
    pub fn simulate_drop_position(&self, board: &Board) -> Self {
        let mut dropped = *self;
        while !board.is_colliding(&dropped.down()) {
            dropped = dropped.down();
        }
        dropped
    }
}

/// One rotation state of a tetromino: an occupancy matrix of up to 4×4 cells.
///
/// The matrix is stored with explicit `height` and `width`; cells outside them are
/// always empty. Serialized as rows of `#` (occupied) and `.` (empty).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    height: u8,
    width: u8,
    cells: [[bool; Shape::MAX_SIZE]; Shape::MAX_SIZE],
}

impl Serialize for Shape {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.rows().map(|row| {
            row.iter()
                .map(|&occupied| if occupied { '#' } else { '.' })
                .collect::<String>()
        }))
    }
}

impl Shape {
    pub const MAX_SIZE: usize = 4;

    /// Builds a shape from a `0`/`1` matrix.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is empty or larger than 4×4.
    #[must_use]
    pub const fn from_matrix<const H: usize, const W: usize>(matrix: [[u8; W]; H]) -> Self {
        assert!(H > 0 && H <= Self::MAX_SIZE);
        assert!(W > 0 && W <= Self::MAX_SIZE);
        let mut cells = [[false; Self::MAX_SIZE]; Self::MAX_SIZE];
        let mut r = 0;
        while r < H {
            let mut c = 0;
            while c < W {
                cells[r][c] = matrix[r][c] != 0;
                c += 1;
            }
            r += 1;
        }
        #[expect(clippy::cast_possible_truncation)]
        let (height, width) = (H as u8, W as u8);
        Self {
            height,
            width,
            cells,
        }
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height as usize
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width as usize
    }

    #[must_use]
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        row < self.height() && col < self.width() && self.cells[row][col]
    }

    /// Returns the matrix rows, each `width()` cells long.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells[..self.height()]
            .iter()
            .map(|row| &row[..self.width()])
    }

    /// Returns `(row, col)` offsets of occupied cells, relative to the top-left corner.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(c, &occupied)| occupied.then_some((r, c)))
        })
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.occupied_cells().count()
    }

    /// Rotates the matrix 90° clockwise: transpose, then reverse each row.
    ///
    /// A `h×w` shape becomes `w×h`, with `new[i][j] = old[h - 1 - j][i]`.
    #[must_use]
    pub fn rotated_cw(&self) -> Self {
        let (h, w) = (self.height(), self.width());
        let mut cells = [[false; Self::MAX_SIZE]; Self::MAX_SIZE];
        for (i, new_row) in cells.iter_mut().enumerate().take(w) {
            for (j, cell) in new_row.iter_mut().enumerate().take(h) {
                *cell = self.cells[h - 1 - j][i];
            }
        }
        Self {
            height: self.width,
            width: self.height,
            cells,
        }
    }
}

/// The seven tetromino kinds.
///
/// The discriminant plus one is the kind's palette index (0 is reserved for empty cells).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece (cyan).
    I = 0,
    /// O-piece (yellow).
    O = 1,
    /// T-piece (purple).
    T = 2,
    /// S-piece (green).
    S = 3,
    /// Z-piece (red).
    Z = 4,
    /// J-piece (blue).
    J = 5,
    /// L-piece (orange).
    L = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

const SPAWN_SHAPES: [Shape; PieceKind::LEN] = [
    Shape::from_matrix([[1, 1, 1, 1]]),
    Shape::from_matrix([[1, 1], [1, 1]]),
    Shape::from_matrix([[0, 1, 0], [1, 1, 1]]),
    Shape::from_matrix([[1, 1, 0], [0, 1, 1]]),
    Shape::from_matrix([[0, 1, 1], [1, 1, 0]]),
    Shape::from_matrix([[1, 0, 0], [1, 1, 1]]),
    Shape::from_matrix([[0, 0, 1], [1, 1, 1]]),
];

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [PieceKind; PieceKind::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Returns the shape this kind spawns with.
    #[must_use]
    pub const fn spawn_shape(self) -> Shape {
        SPAWN_SHAPES[self as usize]
    }

    /// Returns the palette index of this kind (1-7).
    #[must_use]
    pub const fn palette_index(self) -> u8 {
        self as u8 + 1
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    /// Parses a piece kind from a single character (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('o'), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid piece kind: {input:?}")]
pub struct ParsePieceKindError {
    input: String,
}

impl FromStr for PieceKind {
    type Err = ParsePieceKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => PieceKind::from_char(c),
            _ => None,
        }
        .ok_or_else(|| ParsePieceKindError {
            input: s.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape_rows(shape: &Shape) -> Vec<String> {
        shape
            .rows()
            .map(|row| row.iter().map(|&c| if c { '#' } else { '.' }).collect())
            .collect()
    }

    #[test]
    fn test_spawn_shapes_have_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(kind.spawn_shape().cell_count(), 4, "{kind:?}");
        }
    }

    #[test]
    fn test_rotate_t_clockwise() {
        let shape = PieceKind::T.spawn_shape();
        assert_eq!(shape_rows(&shape), [".#.", "###"]);

        let rotated = shape.rotated_cw();
        assert_eq!((rotated.height(), rotated.width()), (3, 2));
        assert_eq!(shape_rows(&rotated), ["#.", "##", "#."]);

        assert_eq!(shape_rows(&rotated.rotated_cw()), ["###", ".#."]);
    }

    #[test]
    fn test_rotate_i_is_vertical() {
        let rotated = PieceKind::I.spawn_shape().rotated_cw();
        assert_eq!((rotated.height(), rotated.width()), (4, 1));
        assert_eq!(rotated.cell_count(), 4);
    }

    #[test]
    fn test_rotate_j_clockwise() {
        let rotated = PieceKind::J.spawn_shape().rotated_cw();
        assert_eq!(shape_rows(&rotated), ["##", "#.", "#."]);
    }

    #[test]
    fn test_four_rotations_are_identity() {
        for kind in PieceKind::ALL {
            let shape = kind.spawn_shape();
            let rotated = shape.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
            assert_eq!(rotated, shape, "{kind:?}");
        }
    }

    #[test]
    fn test_o_rotation_is_fixed_point() {
        let shape = PieceKind::O.spawn_shape();
        assert_eq!(shape.rotated_cw(), shape);
    }

    #[test]
    fn test_occupied_positions_are_absolute() {
        let piece = Piece::new(PieceKind::T);
        let positions: Vec<_> = piece.occupied_positions().collect();
        assert_eq!(positions, [(0, 4), (1, 3), (1, 4), (1, 5)]);

        let moved = piece.down().right();
        let positions: Vec<_> = moved.occupied_positions().collect();
        assert_eq!(positions, [(1, 5), (2, 4), (2, 5), (2, 6)]);
    }

    #[test]
    fn test_left_can_go_negative() {
        let piece = Piece::with_position(PieceKind::O, PieceKind::O.spawn_shape(), 0, 0);
        assert_eq!(piece.left().col(), -1);
    }

    #[test]
    fn test_ghost_on_empty_board_lands_on_floor() {
        let board = Board::EMPTY;
        for kind in PieceKind::ALL {
            let piece = Piece::new(kind);
            let ghost = piece.simulate_drop_position(&board);
            #[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
            let expected = (Board::ROWS - kind.spawn_shape().height()) as i32;
            assert_eq!(ghost.row(), expected, "{kind:?}");
            assert_eq!(ghost.col(), piece.col());
        }
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("L".parse::<PieceKind>(), Ok(PieceKind::L));
        assert_eq!("z".parse::<PieceKind>(), Ok(PieceKind::Z));
        assert!("".parse::<PieceKind>().is_err());
        assert!("IO".parse::<PieceKind>().is_err());
        assert!("Q".parse::<PieceKind>().is_err());
    }

    #[test]
    fn test_palette_index() {
        assert_eq!(PieceKind::I.palette_index(), 1);
        assert_eq!(PieceKind::L.palette_index(), 7);
    }

    #[test]
    fn test_shape_serialization() {
        let json = serde_json::to_string(&PieceKind::S.spawn_shape()).unwrap();
        assert_eq!(json, r###"["##.",".##"]"###);
    }
}
