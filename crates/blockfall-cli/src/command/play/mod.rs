use std::{path::PathBuf, time::Duration};

use blockfall_engine::{Engine, GameSession, RandomPieces, SystemClock};

use crate::{command::play::app::PlayApp, tui::Tui, util};

mod app;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Gravity interval in milliseconds
    #[clap(long, default_value_t = 800, value_parser = clap::value_parser!(u64).range(1..))]
    gravity_ms: u64,
    /// Seed for random piece selection (random if omitted)
    #[clap(long)]
    seed: Option<u64>,
    /// Hide the ghost piece showing where the active piece will land
    #[clap(long)]
    no_ghost: bool,
    /// Write log messages to this file (logging is off otherwise)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            gravity_ms: 800,
            seed: None,
            no_ghost: false,
            log_file: None,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        gravity_ms,
        seed,
        no_ghost,
        log_file,
    } = arg;

    if let Some(path) = log_file {
        util::init_file_logger(path)?;
    }

    let pieces = seed.map_or_else(RandomPieces::new, RandomPieces::from_seed);
    let session = GameSession::new(
        Engine::idle(pieces),
        Duration::from_millis(*gravity_ms),
        SystemClock,
    );
    let mut app = PlayApp::new(session, !no_ghost);

    Tui::new().run(&mut app)?;

    log::info!("exited with score {}", app.score());
    Ok(())
}
