use blockfall_engine::GameStats;
use ratatui::{
    prelude::{Buffer, Rect},
    text::Line,
    widgets::{Block, Paragraph, Widget},
};

use crate::ui::widgets::{block_horizontal_margin, block_vertical_margin};

const LABEL_WIDTH: usize = 8;
const VALUE_WIDTH: usize = 7;
const CLEAR_LABELS: [&str; 4] = ["SINGLE", "DOUBLE", "TRIPLE", "TETRIS"];

#[derive(Debug)]
pub struct StatsDisplay<'a> {
    score: usize,
    stats: &'a GameStats,
    block: Option<Block<'a>>,
}

impl<'a> StatsDisplay<'a> {
    /// `score` is shown as given; it is tracked from score-change events by the caller.
    pub fn new(score: usize, stats: &'a GameStats) -> Self {
        Self {
            score,
            stats,
            block: None,
        }
    }

    pub fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let row = |label: &str, value: usize| {
            Line::from(format!("{label:<LABEL_WIDTH$}{value:>VALUE_WIDTH$}"))
        };
        let mut lines = vec![
            row("SCORE", self.score),
            Line::default(),
            row("PIECES", self.stats.completed_pieces()),
            row("LINES", self.stats.total_cleared_lines()),
        ];
        lines.extend(
            CLEAR_LABELS
                .iter()
                .zip(&self.stats.line_cleared_counter()[1..])
                .map(|(&label, &count)| row(label, count)),
        );
        lines.push(row("DROPPED", self.stats.hard_drop_distance()));
        lines
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        (LABEL_WIDTH + VALUE_WIDTH) as u16 + block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        self.lines().len() as u16 + block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let mut paragraph = Paragraph::new(self.lines());
        if let Some(block) = &self.block {
            paragraph = paragraph.block(block.clone());
        }
        paragraph.render(area, buf);
    }
}
