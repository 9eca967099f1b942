use std::vec;

use log::{debug, info, trace};
use serde::Serialize;

use crate::{Board, Piece};

use super::{Command, EngineEvent, GameStats, PieceSource, Snapshot};

/// Lifecycle state of an [`Engine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    /// Not started yet. Ticks and commands are ignored.
    Idle,
    /// Ticks and commands are applied.
    Running,
    /// A spawned piece collided. Everything except [`Engine::reset`] is ignored.
    GameOver,
}

/// The falling-block simulation: board, active piece, score and run state.
///
/// The engine is advanced by [`step`](Self::step) (one gravity tick) and by player
/// commands. Every call completes synchronously; illegal moves and rotations are
/// rejected silently and leave the state unchanged. The ghost piece is never stored:
/// [`ghost_piece`](Self::ghost_piece) recomputes it from the board and active piece.
///
/// Score changes, locks and the transition into game over are queued as
/// [`EngineEvent`]s and taken out with [`drain_events`](Self::drain_events).
///
/// # Example
///
/// ```
/// use blockfall_engine::{Engine, EngineEvent, FixedPieces, PieceKind};
///
/// let mut engine = Engine::new(FixedPieces::new([PieceKind::O]));
/// assert!(engine.run_state().is_running());
///
/// engine.move_left();
/// engine.hard_drop();
///
/// assert_eq!(engine.board().occupied_count(), 4);
/// assert_eq!(engine.score(), 0);
/// assert_eq!(
///     engine.drain_events().collect::<Vec<_>>(),
///     [EngineEvent::PieceLocked { kind: PieceKind::O, lines_cleared: 0 }],
/// );
/// ```
#[derive(Debug)]
pub struct Engine {
    board: Board,
    active: Piece,
    stats: GameStats,
    run_state: RunState,
    pieces: Box<dyn PieceSource>,
    events: Vec<EngineEvent>,
}

impl Engine {
    /// Creates a running engine with an empty board.
    ///
    /// The first piece is the first kind `pieces` yields.
    #[must_use]
    pub fn new(pieces: impl PieceSource + 'static) -> Self {
        Self::with_board(pieces, Board::EMPTY)
    }

    /// Creates an engine in [`RunState::Idle`] with an empty board and zero score.
    ///
    /// A piece is already spawned so that there is something to render, but nothing
    /// moves until [`reset`](Self::reset) is called. That piece is the one the game
    /// starts with.
    #[must_use]
    pub fn idle(pieces: impl PieceSource + 'static) -> Self {
        Self::spawn_first(Box::new(pieces), Board::EMPTY, RunState::Idle)
    }

    /// Creates a running engine whose board starts with the given content.
    ///
    /// If the first spawned piece collides with `board`, the engine starts in
    /// [`RunState::GameOver`].
    #[must_use]
    pub fn with_board(pieces: impl PieceSource + 'static, board: Board) -> Self {
        let mut engine = Self::spawn_first(Box::new(pieces), board, RunState::Running);
        info!("game started with {:?}", engine.active.kind());
        if engine.board.is_colliding(&engine.active) {
            engine.enter_game_over();
        }
        engine
    }

    fn spawn_first(mut pieces: Box<dyn PieceSource>, board: Board, run_state: RunState) -> Self {
        let active = Piece::new(pieces.next_kind());
        Self {
            board,
            active,
            stats: GameStats::new(),
            run_state,
            pieces,
            events: vec![],
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn active_piece(&self) -> &Piece {
        &self.active
    }

    /// Returns where the active piece would land if hard-dropped now.
    #[must_use]
    pub fn ghost_piece(&self) -> Piece {
        self.active.simulate_drop_position(&self.board)
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            active: self.active,
            ghost: self.ghost_piece(),
            score: self.score(),
            run_state: self.run_state,
        }
    }

    /// Removes and returns all queued events, oldest first.
    pub fn drain_events(&mut self) -> vec::Drain<'_, EngineEvent> {
        self.events.drain(..)
    }

    /// Clears the board and score, spawns a new piece and enters [`RunState::Running`].
    ///
    /// Safe to call in any state. Starting from [`RunState::Idle`] keeps the piece
    /// already on display instead of spawning another.
    pub fn reset(&mut self) {
        let previous_score = self.stats.score();
        self.board = Board::EMPTY;
        self.stats = GameStats::new();
        if !self.run_state.is_idle() {
            self.active = Piece::new(self.pieces.next_kind());
        }
        self.run_state = RunState::Running;
        if previous_score != 0 {
            self.events.push(EngineEvent::ScoreChanged { score: 0 });
        }
        info!("game started with {:?}", self.active.kind());
    }

    /// Applies a player command. Returns `true` if anything changed.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::Rotate => self.rotate(),
            Command::SoftDrop => self.step(),
            Command::HardDrop => self.hard_drop(),
            Command::Reset => {
                self.reset();
                true
            }
        }
    }

    /// Advances one gravity step (also used for soft drop).
    ///
    /// Moves the active piece down one row if it can; otherwise locks it, clears
    /// complete rows and spawns the next piece.
    pub fn step(&mut self) -> bool {
        if !self.run_state.is_running() {
            return false;
        }
        let moved = self.active.down();
        if self.board.is_colliding(&moved) {
            self.lock_and_spawn();
        } else {
            self.active = moved;
        }
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_set_active(self.active.left())
    }

    pub fn move_right(&mut self) -> bool {
        self.try_set_active(self.active.right())
    }

    /// Rotates the active piece 90° clockwise, if the rotated shape fits where it is.
    pub fn rotate(&mut self) -> bool {
        self.try_set_active(self.active.rotated_cw())
    }

    /// Drops the active piece as far as it goes and locks it immediately.
    ///
    /// The distance travelled is recorded in [`GameStats::hard_drop_distance`] but
    /// awards no points.
    pub fn hard_drop(&mut self) -> bool {
        if !self.run_state.is_running() {
            return false;
        }
        let landed = self.ghost_piece();
        let distance = usize::try_from(landed.row() - self.active.row()).unwrap_or(0);
        self.stats.record_hard_drop(distance);
        self.active = landed;
        self.lock_and_spawn();
        true
    }

    fn try_set_active(&mut self, candidate: Piece) -> bool {
        if !self.run_state.is_running() {
            return false;
        }
        if self.board.is_colliding(&candidate) {
            trace!(
                "rejected {:?} at ({}, {})",
                candidate.kind(),
                candidate.row(),
                candidate.col()
            );
            return false;
        }
        self.active = candidate;
        true
    }

    fn lock_and_spawn(&mut self) {
        let kind = self.active.kind();
        let previous_score = self.stats.score();

        self.board.fill_piece(&self.active);
        let lines_cleared = self.board.clear_lines();
        self.stats.complete_piece_drop(lines_cleared);
        debug!(
            "locked {kind:?} at ({}, {}), {lines_cleared} lines cleared",
            self.active.row(),
            self.active.col()
        );

        self.events.push(EngineEvent::PieceLocked {
            kind,
            lines_cleared,
        });
        if self.stats.score() != previous_score {
            self.events.push(EngineEvent::ScoreChanged {
                score: self.stats.score(),
            });
        }

        self.active = Piece::new(self.pieces.next_kind());
        if self.board.is_colliding(&self.active) {
            self.enter_game_over();
        }
    }

    fn enter_game_over(&mut self) {
        self.run_state = RunState::GameOver;
        self.events.push(EngineEvent::GameOver);
        info!(
            "game over: score {}, {} pieces",
            self.stats.score(),
            self.stats.completed_pieces()
        );
    }
}
