use std::{path::PathBuf, str::FromStr, time::Duration};

use anyhow::Context as _;
use blockfall_engine::{
    Board, CommandScript, Engine, EngineEvent, FixedPieces, GameSession, GameStats, ManualClock,
    ParsePieceKindError, PieceKind, PieceSource, RandomPieces, Snapshot,
};
use log::info;
use serde::Serialize;

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Seed for random piece selection (random if omitted)
    #[clap(long)]
    pub(crate) seed: Option<u64>,
    /// Fixed piece sequence to cycle instead of random pieces, such as `OIT`
    #[clap(long, conflicts_with = "seed")]
    pub(crate) pieces: Option<PieceSequence>,
    /// Commands to apply in order: h/< left, l/> right, r/^ rotate, j/v soft drop,
    /// d/space hard drop, n reset
    #[clap(long, default_value = "")]
    pub(crate) script: CommandScript,
    /// Number of gravity ticks to run after the script
    #[clap(long, default_value_t = 0)]
    pub(crate) ticks: usize,
    /// Gravity interval in milliseconds
    #[clap(long, default_value_t = 800, value_parser = clap::value_parser!(u64).range(1..))]
    pub(crate) gravity_ms: u64,
    /// JSON file with the starting board, as an array of row strings
    #[clap(long)]
    pub(crate) board: Option<PathBuf>,
    /// Output file (stdout if omitted)
    #[clap(long)]
    pub(crate) output: Option<PathBuf>,
    /// Pretty-print the JSON output
    #[clap(long)]
    pub(crate) pretty: bool,
}

/// A non-empty piece sequence written as piece letters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PieceSequence(Vec<PieceKind>);

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub(crate) enum ParsePieceSequenceError {
    #[display("piece sequence must not be empty")]
    Empty,
    #[display("{_0}")]
    #[from]
    Kind(ParsePieceKindError),
}

impl FromStr for PieceSequence {
    type Err = ParsePieceSequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kinds = s
            .chars()
            .map(|ch| ch.to_string().parse::<PieceKind>())
            .collect::<Result<Vec<_>, _>>()?;
        if kinds.is_empty() {
            return Err(ParsePieceSequenceError::Empty);
        }
        Ok(Self(kinds))
    }
}

#[derive(Debug, Serialize)]
struct SimulationReport {
    snapshot: Snapshot,
    stats: GameStats,
    events: Vec<EngineEvent>,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    util::init_stderr_logger();

    let board = arg
        .board
        .as_ref()
        .map(|path| util::read_json_file::<Board, _>("board", path))
        .transpose()?;
    let report = simulate(arg, board);

    let mut output = Output::from_output_path(arg.output.as_deref())?;
    output
        .write_json(&report, arg.pretty)
        .context("Failed to write simulation report")?;
    Ok(())
}

fn piece_source(arg: &SimulateArg) -> Box<dyn PieceSource> {
    match (&arg.pieces, arg.seed) {
        (Some(PieceSequence(kinds)), _) => Box::new(FixedPieces::new(kinds.iter().copied())),
        (None, Some(seed)) => Box::new(RandomPieces::from_seed(seed)),
        (None, None) => Box::new(RandomPieces::new()),
    }
}

fn simulate(arg: &SimulateArg, board: Option<Board>) -> SimulationReport {
    let pieces = piece_source(arg);
    let engine = match board {
        Some(board) => Engine::with_board(pieces, board),
        None => Engine::new(pieces),
    };
    let interval = Duration::from_millis(arg.gravity_ms);
    let mut session = GameSession::new(engine, interval, ManualClock::new());
    let mut events = vec![];

    for &command in arg.script.commands() {
        session.apply(command);
        events.extend(session.drain_events());
    }

    let mut ticks_run = 0;
    for _ in 0..arg.ticks {
        if !session.run_state().is_running() {
            break;
        }
        session.clock().advance(interval);
        ticks_run += session.update();
        events.extend(session.drain_events());
    }

    let snapshot = session.snapshot();
    info!(
        "simulation finished after {} commands and {ticks_run} ticks: {:?}, score {}",
        arg.script.commands().len(),
        snapshot.run_state,
        snapshot.score
    );

    SimulationReport {
        snapshot,
        stats: session.engine().stats().clone(),
        events,
    }
}
