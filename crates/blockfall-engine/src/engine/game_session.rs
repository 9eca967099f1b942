use std::{
    cell::Cell,
    fmt,
    time::{Duration, Instant},
    vec,
};

use super::{Command, Engine, EngineEvent, RunState, Snapshot};

/// Gravity interval used when none is configured.
pub const DEFAULT_GRAVITY_INTERVAL: Duration = Duration::from_millis(800);

/// Source of the current time for a [`GameSession`].
pub trait Clock: fmt::Debug {
    fn now(&self) -> Instant;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::{Clock as _, ManualClock};
///
/// let clock = ManualClock::new();
/// let start = clock.now();
/// clock.advance(Duration::from_millis(250));
/// assert_eq!(clock.now() - start, Duration::from_millis(250));
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<Instant>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Cell::new(Instant::now()),
        }
    }

    pub fn advance(&self, duration: Duration) {
        self.now.set(self.now.get() + duration);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Fixed-rate gravity timer.
///
/// While armed, a tick becomes due every `interval` after the instant it was armed.
/// Ticks keep their cadence: a late [`take_due_tick`](Self::take_due_tick) does not
/// push the following ticks back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GravityTimer {
    interval: Duration,
    next_tick: Option<Instant>,
}

impl Default for GravityTimer {
    fn default() -> Self {
        Self::new(DEFAULT_GRAVITY_INTERVAL)
    }
}

impl GravityTimer {
    /// Creates a disarmed timer.
    ///
    /// # Panics
    ///
    /// Panics if `interval` is zero.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        assert!(!interval.is_zero(), "gravity interval must be non-zero");
        Self {
            interval,
            next_tick: None,
        }
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.next_tick.is_some()
    }

    /// Arms the timer so that the first tick is due one interval after `now`.
    pub fn arm(&mut self, now: Instant) {
        self.next_tick = Some(now + self.interval);
    }

    pub const fn disarm(&mut self) {
        self.next_tick = None;
    }

    /// Returns how long until the next tick is due, or `None` while disarmed.
    #[must_use]
    pub fn time_until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.next_tick
            .map(|next_tick| next_tick.saturating_duration_since(now))
    }

    /// Consumes one due tick, if any.
    pub fn take_due_tick(&mut self, now: Instant) -> bool {
        if let Some(next_tick) = self.next_tick
            && next_tick <= now
        {
            self.next_tick = Some(next_tick + self.interval);
            return true;
        }
        false
    }
}

/// Drives an [`Engine`] with gravity ticks taken from a [`Clock`].
///
/// The gravity timer is armed exactly while the engine is [`RunState::Running`]:
/// entering game over (or any other transition out of `Running`) cancels it, and
/// starting a new game re-arms it from the current time. Ticks and commands both go
/// through `&mut self`, so they never interleave.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::{Engine, FixedPieces, GameSession, ManualClock, PieceKind};
///
/// let engine = Engine::idle(FixedPieces::new([PieceKind::T]));
/// let mut session = GameSession::new(engine, Duration::from_millis(500), ManualClock::new());
/// assert_eq!(session.time_until_next_tick(), None);
///
/// session.start();
/// session.clock().advance(Duration::from_millis(1000));
/// assert_eq!(session.update(), 2);
/// assert_eq!(session.engine().active_piece().row(), 2);
/// ```
#[derive(Debug)]
pub struct GameSession<C = SystemClock> {
    engine: Engine,
    timer: GravityTimer,
    clock: C,
}

impl<C> GameSession<C>
where
    C: Clock,
{
    #[must_use]
    pub fn new(engine: Engine, gravity_interval: Duration, clock: C) -> Self {
        let mut session = Self {
            engine,
            timer: GravityTimer::new(gravity_interval),
            clock,
        };
        session.sync_timer();
        session
    }

    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    #[must_use]
    pub fn timer(&self) -> &GravityTimer {
        &self.timer
    }

    #[must_use]
    pub fn run_state(&self) -> RunState {
        self.engine.run_state()
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.engine.snapshot()
    }

    /// Starts a game unless one is already running.
    ///
    /// Returns `true` if a new game was started.
    pub fn start(&mut self) -> bool {
        if self.engine.run_state().is_running() {
            return false;
        }
        self.restart();
        true
    }

    /// Resets the engine and re-arms gravity, whatever the current state.
    pub fn restart(&mut self) {
        self.engine.reset();
        self.timer.arm(self.clock.now());
    }

    /// Fires every gravity tick that is due at the current time.
    ///
    /// Returns the number of ticks applied. Stops early if the engine leaves
    /// `Running` part way through.
    pub fn update(&mut self) -> usize {
        let now = self.clock.now();
        let mut ticks = 0;
        while self.engine.run_state().is_running() && self.timer.take_due_tick(now) {
            self.engine.step();
            ticks += 1;
        }
        self.sync_timer();
        ticks
    }

    /// Forwards a player command to the engine.
    ///
    /// [`Command::Reset`] behaves like [`restart`](Self::restart).
    pub fn apply(&mut self, command: Command) -> bool {
        let changed = if command == Command::Reset {
            self.restart();
            true
        } else {
            self.engine.apply(command)
        };
        self.sync_timer();
        changed
    }

    /// Returns how long the caller may wait before the next [`update`](Self::update)
    /// has work to do, or `None` while gravity is stopped.
    #[must_use]
    pub fn time_until_next_tick(&self) -> Option<Duration> {
        self.timer.time_until_next_tick(self.clock.now())
    }

    pub fn drain_events(&mut self) -> vec::Drain<'_, EngineEvent> {
        self.engine.drain_events()
    }

    fn sync_timer(&mut self) {
        match (self.engine.run_state().is_running(), self.timer.is_armed()) {
            (true, false) => self.timer.arm(self.clock.now()),
            (false, true) => self.timer.disarm(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Board, FixedPieces, PieceKind};

    use super::*;

    const INTERVAL: Duration = Duration::from_millis(800);

    fn idle_session(kinds: &[PieceKind]) -> GameSession<ManualClock> {
        let engine = Engine::idle(FixedPieces::new(kinds.iter().copied()));
        GameSession::new(engine, INTERVAL, ManualClock::new())
    }

    #[test]
    fn test_timer_keeps_cadence() {
        let clock = ManualClock::new();
        let mut timer = GravityTimer::new(Duration::from_millis(100));
        assert!(!timer.take_due_tick(clock.now()));

        timer.arm(clock.now());
        clock.advance(Duration::from_millis(250));
        assert!(timer.take_due_tick(clock.now()));
        assert!(timer.take_due_tick(clock.now()));
        assert!(!timer.take_due_tick(clock.now()));
        assert_eq!(
            timer.time_until_next_tick(clock.now()),
            Some(Duration::from_millis(50))
        );

        timer.disarm();
        assert_eq!(timer.time_until_next_tick(clock.now()), None);
    }

    #[test]
    #[should_panic(expected = "non-zero")]
    fn test_zero_interval_is_rejected() {
        let _ = GravityTimer::new(Duration::ZERO);
    }

    #[test]
    fn test_idle_session_has_no_gravity() {
        let mut session = idle_session(&[PieceKind::O]);
        assert!(!session.timer().is_armed());

        session.clock().advance(INTERVAL * 10);
        assert_eq!(session.update(), 0);
        assert_eq!(session.engine().active_piece().row(), 0);
        assert!(!session.apply(Command::MoveLeft));
    }

    #[test]
    fn test_ticks_fire_on_interval() {
        let mut session = idle_session(&[PieceKind::O]);
        assert!(session.start());
        assert!(!session.start());
        assert_eq!(session.time_until_next_tick(), Some(INTERVAL));

        session.clock().advance(INTERVAL - Duration::from_millis(1));
        assert_eq!(session.update(), 0);
        session.clock().advance(Duration::from_millis(1));
        assert_eq!(session.update(), 1);
        assert_eq!(session.engine().active_piece().row(), 1);

        session.clock().advance(INTERVAL * 2);
        assert_eq!(session.update(), 2);
        assert_eq!(session.engine().active_piece().row(), 3);
    }

    #[test]
    fn test_commands_do_not_shift_gravity() {
        let mut session = idle_session(&[PieceKind::T]);
        session.start();

        session.clock().advance(INTERVAL / 2);
        assert!(session.apply(Command::MoveLeft));
        assert!(session.apply(Command::SoftDrop));
        assert_eq!(session.time_until_next_tick(), Some(INTERVAL / 2));
    }

    #[test]
    fn test_game_over_cancels_gravity() {
        let board = Board::from_rows(&["...OO....."; 18]).unwrap();
        let engine = Engine::with_board(FixedPieces::new([PieceKind::O]), board);
        let mut session = GameSession::new(engine, INTERVAL, ManualClock::new());
        assert!(session.timer().is_armed());

        session.clock().advance(INTERVAL * 5);
        assert_eq!(session.update(), 1);
        assert_eq!(session.run_state(), RunState::GameOver);
        assert!(!session.timer().is_armed());
        assert_eq!(session.time_until_next_tick(), None);
        assert_eq!(session.drain_events().last(), Some(EngineEvent::GameOver));

        session.clock().advance(INTERVAL * 5);
        assert_eq!(session.update(), 0);
        assert!(!session.apply(Command::HardDrop));
        assert!(!session.timer().is_armed());
    }

    #[test]
    fn test_restart_rearms_from_now() {
        let mut session = idle_session(&[PieceKind::I]);
        session.start();
        session.clock().advance(INTERVAL * 3 + INTERVAL / 4);
        session.update();
        assert_eq!(session.engine().active_piece().row(), 3);

        assert!(session.apply(Command::Reset));
        assert_eq!(session.run_state(), RunState::Running);
        assert_eq!(session.engine().active_piece().row(), 0);
        assert_eq!(session.time_until_next_tick(), Some(INTERVAL));
    }
}
