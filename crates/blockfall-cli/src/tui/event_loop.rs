use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Rendering trigger mode.
#[derive(Debug, Clone, Copy, Default)]
pub enum RenderMode {
    /// Render after state changes (tick or crossterm event).
    #[default]
    OnDirty,
    /// Render after state changes, but with minimum interval between renders.
    ///
    /// If events occur faster than the interval, they are batched into one render.
    Throttled(Duration),
}

impl RenderMode {
    /// Creates `Throttled` mode from frame rate (FPS).
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        Self::Throttled(Duration::from_secs_f64(1.0 / rate))
    }
}

/// Event loop state management.
///
/// Returns the next event via `next()`. Ticks are not periodic here: the caller
/// passes the time left until its next tick on every call.
#[derive(Debug)]
pub(super) struct EventLoop {
    render_mode: RenderMode,
    last_render: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    /// Creates a new `EventLoop` with render mode `OnDirty`.
    pub fn new() -> Self {
        let now = Instant::now();
        let past_time = now.checked_sub(Duration::from_secs(86400)).unwrap_or(now);
        Self {
            render_mode: RenderMode::default(),
            last_render: past_time,
            dirty: true, // Initial render is required on startup
        }
    }

    /// Sets the render mode.
    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Returns the next event.
    ///
    /// Blocks until the tick deadline or a render time is reached, or a crossterm
    /// event occurs. With no tick deadline and nothing to render, only waits for
    /// crossterm events.
    pub(super) fn next(&mut self, time_until_tick: Option<Duration>) -> io::Result<TuiEvent> {
        let tick_at = time_until_tick.map(|timeout| Instant::now() + timeout);
        loop {
            let now = Instant::now();
            if tick_at.is_some_and(|tick_at| now >= tick_at) {
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            let do_render = match self.render_mode {
                RenderMode::OnDirty => self.dirty,
                RenderMode::Throttled(interval) => {
                    self.dirty && now.duration_since(self.last_render) >= interval
                }
            };
            if do_render {
                self.last_render = now;
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(timeout) = self.compute_timeout(now, tick_at)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn compute_timeout(&self, now: Instant, tick_at: Option<Instant>) -> Option<Duration> {
        let next_render_at = match self.render_mode {
            RenderMode::OnDirty => self.dirty.then_some(now),
            RenderMode::Throttled(interval) => self.dirty.then(|| self.last_render + interval),
        };
        let next_timeout_at = [tick_at, next_render_at].into_iter().flatten().min()?;
        Some(next_timeout_at.saturating_duration_since(now))
    }
}
