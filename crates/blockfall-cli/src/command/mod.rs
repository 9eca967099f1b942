use clap::{Parser, Subcommand};

use self::{play::PlayArg, simulate::SimulateArg};

mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Run a game headlessly from a command script and print the result as JSON
    Simulate(#[clap(flatten)] SimulateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_play() {
        let args = CommandArgs::try_parse_from(["blockfall"]).unwrap();
        assert!(args.mode.is_none());
    }

    #[test]
    fn test_parse_simulate() {
        let args = CommandArgs::try_parse_from([
            "blockfall",
            "simulate",
            "--seed",
            "3",
            "--script",
            "hhd",
            "--ticks",
            "40",
        ])
        .unwrap();
        let Some(Mode::Simulate(arg)) = args.mode else {
            panic!("expected simulate mode");
        };
        assert_eq!(arg.seed, Some(3));
        assert_eq!(arg.ticks, 40);
        assert_eq!(arg.script.commands().len(), 3);
    }
}
