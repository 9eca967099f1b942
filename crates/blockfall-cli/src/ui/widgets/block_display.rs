use blockfall_engine::{Cell, PieceKind};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::ui::widgets::style;

/// One board cell, two terminal columns wide.
#[derive(Debug)]
pub struct BlockDisplay {
    style: Style,
    symbol: &'static str,
}

impl BlockDisplay {
    pub const WIDTH: u16 = 2;
    pub const HEIGHT: u16 = 1;

    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub const fn from_cell(cell: Cell) -> Self {
        match cell {
            Cell::Empty => Self::new(style::EMPTY_DOT, "."),
            Cell::Piece(kind) => Self::piece(kind),
        }
    }

    pub const fn piece(kind: PieceKind) -> Self {
        Self::new(style::piece(kind), "")
    }

    pub const fn ghost() -> Self {
        Self::new(style::GHOST, "[]")
    }
}

impl Widget for BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // Use a Paragraph to fill the whole area, not just the cells with the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
