//! Board and piece geometry.
//!
//! - [`Board`] - the fixed 20×10 grid of locked cells, with collision and line clearing
//! - [`Piece`] - a tetromino shape anchored at a board position
//! - [`Shape`] - one rotation state as an occupancy matrix

pub use self::{board::*, piece::*};

pub(crate) mod board;
pub(crate) mod piece;
