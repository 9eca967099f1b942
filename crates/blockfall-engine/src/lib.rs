//! A falling-block puzzle engine.
//!
//! Pieces fall onto a 20×10 board, complete rows are cleared and scored, and the game
//! ends when a new piece has no room to spawn. The engine is pure state: time enters
//! only through [`GameSession`], and drawing is left to the caller, which reads a
//! [`Snapshot`] and drains [`EngineEvent`]s.
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{CommandScript, Engine, RandomPieces};
//!
//! let mut engine = Engine::new(RandomPieces::from_seed(7));
//! let script: CommandScript = "hhrd\nllrd".parse().unwrap();
//! for &command in script.commands() {
//!     engine.apply(command);
//! }
//!
//! assert_eq!(engine.stats().completed_pieces(), 2);
//! assert_eq!(engine.board().occupied_count(), 8);
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;
