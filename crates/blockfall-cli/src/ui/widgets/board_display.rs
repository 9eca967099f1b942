use blockfall_engine::{Board, Piece};
use ratatui::{
    prelude::{Buffer, Rect},
    widgets::{Block, Widget},
};

use crate::ui::widgets::{BlockDisplay, block_horizontal_margin, block_vertical_margin};

/// The board with the active piece and, optionally, its ghost drawn over it.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    active: Option<&'a Piece>,
    ghost: Option<Piece>,
    block: Option<Block<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            active: None,
            ghost: None,
            block: None,
        }
    }

    pub fn active_piece(self, active: &'a Piece) -> Self {
        Self {
            active: Some(active),
            ..self
        }
    }

    pub fn ghost(self, ghost: Piece) -> Self {
        Self {
            ghost: Some(ghost),
            ..self
        }
    }

    pub fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        Board::COLS as u16 * BlockDisplay::WIDTH + block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        Board::ROWS as u16 * BlockDisplay::HEIGHT + block_vertical_margin(self.block.as_ref())
    }
}

/// Area of the board cell at (`row`, `col`), if it lies inside `inner`.
fn cell_area(inner: Rect, row: i32, col: i32) -> Option<Rect> {
    let row = u16::try_from(row).ok()?;
    let col = u16::try_from(col).ok()?;
    let area = Rect::new(
        inner.x + col * BlockDisplay::WIDTH,
        inner.y + row * BlockDisplay::HEIGHT,
        BlockDisplay::WIDTH,
        BlockDisplay::HEIGHT,
    );
    (inner.intersection(area) == area).then_some(area)
}

fn render_piece(piece: &Piece, display: &BlockDisplay, inner: Rect, buf: &mut Buffer) {
    for (row, col) in piece.occupied_positions() {
        if let Some(area) = cell_area(inner, row, col) {
            display.render(area, buf);
        }
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let inner = match &self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.clone().render(area, buf);
                inner
            }
            None => area,
        };

        for (row, cells) in (0..).zip(self.board.rows()) {
            for (col, &cell) in (0..).zip(cells) {
                if let Some(area) = cell_area(inner, row, col) {
                    BlockDisplay::from_cell(cell).render(area, buf);
                }
            }
        }
        if let Some(ghost) = &self.ghost {
            render_piece(ghost, &BlockDisplay::ghost(), inner, buf);
        }
        if let Some(active) = self.active {
            render_piece(active, &BlockDisplay::piece(active.kind()), inner, buf);
        }
    }
}
