use serde::Serialize;

use crate::PieceKind;

/// Notification produced by the engine as a side effect of a tick or command.
///
/// Events are queued inside the [`Engine`](super::Engine) and taken out with
/// [`Engine::drain_events`](super::Engine::drain_events), in the order they happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EngineEvent {
    /// The score changed to `score`.
    ScoreChanged { score: usize },
    /// The active piece locked into the board.
    PieceLocked {
        kind: PieceKind,
        lines_cleared: usize,
    },
    /// The newly spawned piece collided; the game is over until the next reset.
    GameOver,
}
