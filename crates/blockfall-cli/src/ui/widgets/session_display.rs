use blockfall_engine::{Engine, RunState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::ui::widgets::{BoardDisplay, StatsDisplay, style};

#[derive(Debug)]
pub struct SessionDisplay<'a> {
    engine: &'a Engine,
    score: usize,
    show_ghost: bool,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(engine: &'a Engine, score: usize, show_ghost: bool) -> Self {
        Self {
            engine,
            score,
            show_ghost,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let run_state = self.engine.run_state();
        let border_style = style::border(run_state.is_game_over());
        let block_padding = Padding::symmetric(self.horizontal_padding, self.vertical_padding);

        let game_board = {
            let widget = BoardDisplay::new(self.engine.board())
                .active_piece(self.engine.active_piece())
                .block(
                    Block::bordered()
                        .border_style(border_style)
                        .style(style::DEFAULT),
                );
            if self.show_ghost && run_state.is_running() {
                widget.ghost(self.engine.ghost_piece())
            } else {
                widget
            }
        };
        let stats = StatsDisplay::new(self.score, self.engine.stats()).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT),
        );

        let [stats_column, board_column] = Layout::horizontal([
            Constraint::Length(stats.width()),
            Constraint::Length(game_board.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);
        let [stats_area] =
            Layout::vertical([Constraint::Length(stats.height())]).areas(stats_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(board_column);

        let game_board_width = game_board.width();
        stats.render(stats_area, buf);
        game_board.render(board_area, buf);

        let popup = match run_state {
            RunState::Running => None,
            RunState::Idle => Some(("PRESS ENTER", style::START_POPUP)),
            RunState::GameOver => Some(("GAME OVER!!", style::GAME_OVER_POPUP)),
        };

        if let Some((text, style)) = popup {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area =
                board_area.centered(Constraint::Length(game_board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
