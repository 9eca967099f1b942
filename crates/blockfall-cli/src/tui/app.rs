use std::time::Duration;

use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Tui;

/// Trait for TUI applications.
///
/// Applications executed by `Tui::run()` must implement this trait.
pub trait App {
    /// Initializes the application.
    ///
    /// Called at the start of `Tui::run()`. Use this to configure the render mode.
    fn init(&mut self, tui: &mut Tui);

    /// Returns whether the application should exit.
    fn should_exit(&self) -> bool;

    /// Returns how long until `update()` has work to do, or `None` to wait for input only.
    ///
    /// Queried before every wait, so the deadline may move as the application's state changes.
    fn time_until_next_tick(&self) -> Option<Duration>;

    /// Handles terminal events (key input, mouse, resize, etc.).
    fn handle_event(&mut self, event: &Event);

    /// Draws the screen (called on each `Event::Render`).
    fn draw(&self, frame: &mut Frame);

    /// Updates game logic (called on each `Event::Tick`).
    fn update(&mut self);
}
