use std::time::Duration;

use blockfall_engine::{Command, EngineEvent, GameSession, RunState};
use crossterm::event::{Event, KeyCode, KeyEventKind};
use log::{debug, info};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Text,
};

use crate::{
    tui::{App, RenderMode, Tui},
    ui::widgets::{SessionDisplay, style},
};

const FRAME_RATE: f64 = 60.0;

#[derive(Debug)]
pub struct PlayApp {
    session: GameSession,
    show_ghost: bool,
    score: usize,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(session: GameSession, show_ghost: bool) -> Self {
        let score = session.engine().score();
        Self {
            session,
            show_ghost,
            score,
            is_exiting: false,
        }
    }

    pub fn score(&self) -> usize {
        self.score
    }

    fn command_for_key(code: KeyCode) -> Option<Command> {
        match code {
            KeyCode::Left => Some(Command::MoveLeft),
            KeyCode::Right => Some(Command::MoveRight),
            KeyCode::Up => Some(Command::Rotate),
            KeyCode::Down => Some(Command::SoftDrop),
            KeyCode::Char(' ') => Some(Command::HardDrop),
            _ => None,
        }
    }

    fn process_engine_events(&mut self) {
        for event in self.session.drain_events() {
            debug!("{event:?}");
            match event {
                EngineEvent::ScoreChanged { score } => self.score = score,
                EngineEvent::PieceLocked { .. } => {}
                EngineEvent::GameOver => info!("game over with score {}", self.score),
            }
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_render_mode(RenderMode::throttled_from_rate(FRAME_RATE));
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn time_until_next_tick(&self) -> Option<Duration> {
        self.session.time_until_next_tick()
    }

    fn handle_event(&mut self, event: &Event) {
        let Some(key) = event.as_key_event() else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.is_exiting = true,
            KeyCode::Enter | KeyCode::Char('r') => _ = self.session.start(),
            code => {
                if let Some(command) = Self::command_for_key(code) {
                    _ = self.session.apply(command);
                }
            }
        }
        self.process_engine_events();
    }

    fn draw(&self, frame: &mut Frame) {
        let session_display =
            SessionDisplay::new(self.session.engine(), self.score, self.show_ghost);
        let help_text = match self.session.run_state() {
            RunState::Idle => "Controls: Enter (Start) | Q (Quit)",
            RunState::Running => {
                "Controls: ← → (Move) | ↑ (Rotate) | ↓ (Soft Drop) | Space (Hard Drop) | Q (Quit)"
            }
            RunState::GameOver => "Controls: Enter / R (Restart) | Q (Quit)",
        };
        let help_text = Text::from(help_text).style(style::HELP).centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(22), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(help_text, help_area);
    }

    fn update(&mut self) {
        self.session.update();
        self.process_engine_events();
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{Engine, FixedPieces, PieceKind, SystemClock};
    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn app() -> PlayApp {
        let engine = Engine::idle(FixedPieces::new([PieceKind::O]));
        let session = GameSession::new(engine, Duration::from_secs(3600), SystemClock);
        PlayApp::new(session, true)
    }

    #[test]
    fn test_enter_starts_game() {
        let mut app = app();
        assert_eq!(app.time_until_next_tick(), None);
        app.handle_event(&press(KeyCode::Left));
        assert_eq!(app.session.engine().active_piece().col(), 3);

        app.handle_event(&press(KeyCode::Enter));
        assert_eq!(app.session.run_state(), RunState::Running);
        assert!(app.time_until_next_tick().is_some());

        app.handle_event(&press(KeyCode::Left));
        assert_eq!(app.session.engine().active_piece().col(), 2);
    }

    #[test]
    fn test_keys_map_to_commands() {
        let mut app = app();
        app.handle_event(&press(KeyCode::Enter));
        app.handle_event(&press(KeyCode::Down));
        assert_eq!(app.session.engine().active_piece().row(), 1);

        app.handle_event(&press(KeyCode::Char(' ')));
        assert_eq!(app.session.engine().board().occupied_count(), 4);
        assert_eq!(app.session.engine().active_piece().row(), 0);
    }

    #[test]
    fn test_quit_keys() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            let mut app = app();
            assert!(!app.should_exit());
            app.handle_event(&press(code));
            assert!(app.should_exit());
        }
    }
}
