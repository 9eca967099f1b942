use crossterm::event::Event as CrosstermEvent;

/// Events processed by TUI applications.
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// The deadline reported by `App::time_until_next_tick()` was reached.
    Tick,
    /// Screen render timing (based on the render mode).
    Render,
    /// Terminal events such as key input, mouse, and resize.
    Crossterm(CrosstermEvent),
}
