use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::piece::{Piece, PieceKind};

/// Number of board rows.
pub const ROWS: usize = 20;

/// Number of board columns.
pub const COLS: usize = 10;

/// A single board cell: empty, or a locked block remembering its origin piece kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Piece(PieceKind),
}

impl Cell {
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Returns `.` for empty cells and the piece letter otherwise.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Piece(kind) => kind.as_char(),
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        if c == '.' {
            return Some(Cell::Empty);
        }
        match PieceKind::from_char(c) {
            Some(kind) => Some(Cell::Piece(kind)),
            None => None,
        }
    }
}

/// A single board row.
pub type Row = [Cell; COLS];

const EMPTY_ROW: Row = [Cell::Empty; COLS];

/// The fixed 20×10 grid of locked cells.
///
/// Row 0 is the top of the board. The falling piece is never stored here; it is
/// written in only when it locks ([`Board::fill_piece`]).
///
/// The text form (used for serialization and [`Board::from_rows`]) is one string per
/// row, `.` for empty cells and the piece letter for locked ones.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, Cell, PieceKind};
///
/// let mut board = Board::from_rows(&["IIIII.IIII"]).unwrap();
/// assert_eq!(board.occupied_count(), 9);
///
/// board.set_cell(19, 5, Cell::Piece(PieceKind::T));
/// assert_eq!(board.clear_lines(), 1);
/// assert_eq!(board, Board::EMPTY);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    rows: [Row; ROWS],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.row_strings()).finish()
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.row_strings())
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rows = Vec::<String>::deserialize(deserializer)?;
        Board::from_rows(rows.as_slice()).map_err(serde::de::Error::custom)
    }
}

impl Board {
    pub const ROWS: usize = ROWS;
    pub const COLS: usize = COLS;

    pub const EMPTY: Self = Self {
        rows: [EMPTY_ROW; ROWS],
    };

    /// Builds a board from its text form.
    ///
    /// Rows are bottom-aligned: when fewer than [`ROWS`] rows are given, the missing
    /// rows at the top are empty.
    pub fn from_rows<S>(lines: &[S]) -> Result<Self, ParseBoardError>
    where
        S: AsRef<str>,
    {
        if lines.len() > ROWS {
            return Err(ParseBoardError::TooManyRows { rows: lines.len() });
        }
        let mut board = Self::EMPTY;
        let offset = ROWS - lines.len();
        for (i, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            let width = line.chars().count();
            if width != COLS {
                return Err(ParseBoardError::RowWidth { row: i, width });
            }
            for (col, ch) in line.chars().enumerate() {
                let cell = Cell::from_char(ch).ok_or(ParseBoardError::InvalidCell {
                    row: i,
                    col,
                    ch,
                })?;
                board.rows[offset + i][col] = cell;
            }
        }
        Ok(board)
    }

    /// Returns the rows from top (index 0) to bottom.
    #[must_use]
    pub fn rows(&self) -> &[Row; ROWS] {
        &self.rows
    }

    /// Returns the cell at `(row, col)`, or `None` outside the board.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.rows.get(row)?.get(col).copied()
    }

    /// Overwrites a single cell.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is outside the board.
    pub fn set_cell(&mut self, row: usize, col: usize, cell: Cell) {
        self.rows[row][col] = cell;
    }

    /// Returns the number of non-empty cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }

    fn is_free(&self, row: i32, col: i32) -> bool {
        let (Ok(row), Ok(col)) = (usize::try_from(row), usize::try_from(col)) else {
            return false;
        };
        self.cell(row, col).is_some_and(Cell::is_empty)
    }

    /// Returns `true` if any occupied cell of `piece` is off the board (in any
    /// direction, including above row 0) or overlaps a locked block.
    #[must_use]
    pub fn is_colliding(&self, piece: &Piece) -> bool {
        piece
            .occupied_positions()
            .any(|(row, col)| !self.is_free(row, col))
    }

    /// Writes the piece's cells into the board, tagged with the piece's kind.
    ///
    /// Cells outside the board are skipped; callers only lock legal placements.
    pub fn fill_piece(&mut self, piece: &Piece) {
        let cell = Cell::Piece(piece.kind());
        for (row, col) in piece.occupied_positions() {
            if let (Ok(row), Ok(col)) = (usize::try_from(row), usize::try_from(col))
                && row < ROWS
                && col < COLS
            {
                self.rows[row][col] = cell;
            }
        }
    }

    /// Removes every complete row and returns how many were removed.
    ///
    /// Rows are scanned from the bottom up. When a row is removed, everything above
    /// it shifts down by one and an empty row enters at the top; the same index is
    /// then examined again, since it now holds the row that used to be above it.
    pub fn clear_lines(&mut self) -> usize {
        let mut cleared = 0;
        let mut row = ROWS;
        while row > 0 {
            let index = row - 1;
            if self.rows[index].iter().all(|cell| !cell.is_empty()) {
                self.rows[..=index].rotate_right(1);
                self.rows[0] = EMPTY_ROW;
                cleared += 1;
            } else {
                row -= 1;
            }
        }
        cleared
    }

    fn row_strings(&self) -> impl Iterator<Item = String> + '_ {
        self.rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.as_char()).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    #[display("board has {rows} rows, at most {} allowed", ROWS)]
    TooManyRows { rows: usize },
    #[display("row {row} has {width} cells, expected {}", COLS)]
    RowWidth { row: usize, width: usize },
    #[display("invalid cell {ch:?} at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, ch: char },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_row(kind: PieceKind) -> Row {
        [Cell::Piece(kind); COLS]
    }

    #[test]
    fn test_initial_board() {
        let board = Board::EMPTY;
        assert_eq!(board.occupied_count(), 0);
        for row in board.rows() {
            assert!(row.iter().all(|cell| cell.is_empty()));
        }
        assert_eq!(board.cell(ROWS, 0), None);
        assert_eq!(board.cell(0, COLS), None);
    }

    #[test]
    fn test_is_colliding_bounds() {
        let board = Board::EMPTY;
        let shape = PieceKind::O.spawn_shape();

        let inside = Piece::with_position(PieceKind::O, shape, 18, 8);
        assert!(!board.is_colliding(&inside));

        for (row, col) in [(19, 0), (0, 9), (0, -1), (-1, 0)] {
            let piece = Piece::with_position(PieceKind::O, shape, row, col);
            assert!(board.is_colliding(&piece), "({row}, {col})");
        }
    }

    #[test]
    fn test_is_colliding_with_blocks() {
        let mut board = Board::EMPTY;
        board.set_cell(10, 4, Cell::Piece(PieceKind::I));
        let shape = PieceKind::O.spawn_shape();

        assert!(board.is_colliding(&Piece::with_position(PieceKind::O, shape, 9, 3)));
        assert!(board.is_colliding(&Piece::with_position(PieceKind::O, shape, 10, 4)));
        assert!(!board.is_colliding(&Piece::with_position(PieceKind::O, shape, 8, 3)));
        assert!(!board.is_colliding(&Piece::with_position(PieceKind::O, shape, 10, 5)));
    }

    #[test]
    fn test_empty_shape_cells_do_not_collide() {
        let mut board = Board::EMPTY;
        // T spawn shape has an empty top-left corner
        board.set_cell(0, 3, Cell::Piece(PieceKind::I));
        assert!(!board.is_colliding(&Piece::new(PieceKind::T)));
    }

    #[test]
    fn test_fill_piece() {
        let mut board = Board::EMPTY;
        let piece = Piece::with_position(PieceKind::O, PieceKind::O.spawn_shape(), 18, 3);
        board.fill_piece(&piece);

        assert_eq!(board.occupied_count(), 4);
        for (row, col) in [(18, 3), (18, 4), (19, 3), (19, 4)] {
            assert_eq!(board.cell(row, col), Some(Cell::Piece(PieceKind::O)));
        }
    }

    #[test]
    fn test_clear_lines_single_bottom_row() {
        let mut board = Board::from_rows(&["..T.......", "IIIIIIIIII"]).unwrap();
        assert_eq!(board.clear_lines(), 1);
        assert_eq!(board.cell(19, 2), Some(Cell::Piece(PieceKind::T)));
        assert_eq!(board.occupied_count(), 1);
        assert!(board.rows()[0].iter().all(|cell| cell.is_empty()));
    }

    #[test]
    fn test_clear_lines_preserves_order() {
        let mut board = Board::from_rows(&[
            "J.........",
            "LLLLLLLLLL",
            ".S........",
            "..Z.......",
        ])
        .unwrap();
        let before = board.clone();

        assert_eq!(board.clear_lines(), 1);

        // Rows above the cleared one shift down by one
        assert_eq!(board.rows()[17], before.rows()[16]);
        // Rows below it stay in place
        assert_eq!(board.rows()[18], before.rows()[18]);
        assert_eq!(board.rows()[19], before.rows()[19]);
        for row in 1..17 {
            assert_eq!(board.rows()[row], before.rows()[row - 1]);
        }
        assert_eq!(board.rows()[0], EMPTY_ROW);
    }

    #[test]
    fn test_clear_lines_adjacent_rows() {
        let mut board = Board::from_rows(&[
            "O.........",
            "IIIIIIIIII",
            "TTTTTTTTTT",
            ".J........",
            "SSSSSSSSSS",
        ])
        .unwrap();

        assert_eq!(board.clear_lines(), 3);
        assert_eq!(board.occupied_count(), 2);
        assert_eq!(board.cell(18, 0), Some(Cell::Piece(PieceKind::O)));
        assert_eq!(board.cell(19, 1), Some(Cell::Piece(PieceKind::J)));
    }

    #[test]
    fn test_clear_lines_all_filled() {
        let mut board = Board::EMPTY;
        for row in 0..ROWS {
            board.rows[row] = full_row(PieceKind::L);
        }
        assert_eq!(board.clear_lines(), ROWS);
        assert_eq!(board, Board::EMPTY);
    }

    #[test]
    fn test_clear_lines_partial_row_untouched() {
        let mut board = Board::from_rows(&["ZZZZZZZZZ."]).unwrap();
        let before = board.clone();
        assert_eq!(board.clear_lines(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_from_rows_errors() {
        let too_many = vec![".........."; ROWS + 1];
        assert_eq!(
            Board::from_rows(too_many.as_slice()),
            Err(ParseBoardError::TooManyRows { rows: ROWS + 1 })
        );
        assert_eq!(
            Board::from_rows(&["...."]),
            Err(ParseBoardError::RowWidth { row: 0, width: 4 })
        );
        assert_eq!(
            Board::from_rows(&["....x....."]),
            Err(ParseBoardError::InvalidCell {
                row: 0,
                col: 4,
                ch: 'x'
            })
        );
    }

    #[test]
    fn test_board_serialization() {
        let board = Board::from_rows(&["I.........", "OO.......T"]).unwrap();
        let json = serde_json::to_value(&board).unwrap();
        let rows = json.as_array().unwrap();
        assert_eq!(rows.len(), ROWS);
        assert_eq!(rows[0], "..........");
        assert_eq!(rows[18], "I.........");
        assert_eq!(rows[19], "OO.......T");

        let parsed: Board = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, board);
    }
}
