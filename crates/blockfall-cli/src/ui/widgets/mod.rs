use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{block_display::*, board_display::*, session_display::*, stats_display::*};

mod block_display;
mod board_display;
mod session_display;
mod stats_display;

mod color {
    use ratatui::style::Color;

    pub const CYAN: Color = Color::Rgb(0, 240, 240);
    pub const YELLOW: Color = Color::Rgb(240, 240, 0);
    pub const PURPLE: Color = Color::Rgb(160, 0, 240);
    pub const GREEN: Color = Color::Rgb(0, 240, 0);
    pub const RED: Color = Color::Rgb(240, 0, 0);
    pub const BLUE: Color = Color::Rgb(0, 0, 240);
    pub const ORANGE: Color = Color::Rgb(240, 160, 0);
    pub const NAVY: Color = Color::Rgb(0, 5, 32);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const DARK_GRAY: Color = Color::Rgb(40, 40, 40);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub mod style {
    use blockfall_engine::PieceKind;
    use ratatui::style::{Color, Style};

    use crate::ui::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::NAVY);
    pub const EMPTY: Style = bg_only(color::NAVY);
    pub const EMPTY_DOT: Style = fg_bg(color::DARK_GRAY, color::NAVY);
    pub const GHOST: Style = fg_bg(color::GRAY, color::NAVY);
    pub const HELP: Style = Style::new().fg(color::GRAY);
    pub const START_POPUP: Style = fg_bg(color::BLACK, color::YELLOW);
    pub const GAME_OVER_POPUP: Style = fg_bg(color::WHITE, color::RED);

    /// Palette by [`PieceKind::palette_index`], slot 0 being the empty cell.
    const PALETTE: [Style; PieceKind::LEN + 1] = [
        EMPTY,
        bg_only(color::CYAN),
        bg_only(color::YELLOW),
        bg_only(color::PURPLE),
        bg_only(color::GREEN),
        bg_only(color::RED),
        bg_only(color::BLUE),
        bg_only(color::ORANGE),
    ];

    pub const fn piece(kind: PieceKind) -> Style {
        PALETTE[kind.palette_index() as usize]
    }

    pub const fn border(game_over: bool) -> Color {
        if game_over { color::RED } else { color::WHITE }
    }
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
