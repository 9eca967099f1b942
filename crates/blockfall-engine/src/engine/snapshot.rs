use serde::Serialize;

use crate::{Board, Piece};

use super::RunState;

/// A read-only copy of everything a renderer needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub board: Board,
    pub active: Piece,
    pub ghost: Piece,
    pub score: usize,
    pub run_state: RunState,
}
