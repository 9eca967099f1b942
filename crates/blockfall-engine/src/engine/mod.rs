//! Game rules, state machine and gravity driver.
//!
//! - [`Engine`] - the board, the active piece, score and [`RunState`]
//! - [`GameSession`] - drives an [`Engine`] with gravity ticks from a [`Clock`]
//! - [`PieceSource`] - where spawned pieces come from ([`RandomPieces`], [`FixedPieces`])
//! - [`GameStats`] - score and per-lock statistics
//! - [`EngineEvent`] - notifications queued for the front end
//! - [`Command`] - player input, also parseable from text for scripted runs
//!
//! # Game Flow
//!
//! 1. A piece spawns at the top of the board
//! 2. Gravity ticks and soft drops move it down; the player moves and rotates it
//! 3. When it cannot move down any more (or is hard-dropped) it locks
//! 4. Complete rows are cleared and scored, and the next piece spawns
//! 5. Repeat until a spawned piece collides, which ends the game

pub use self::{
    command::*, event::*, game_engine::*, game_session::*, game_stats::*, piece_source::*,
    snapshot::*,
};

mod command;
mod event;
mod game_engine;
mod game_session;
mod game_stats;
mod piece_source;
mod snapshot;
