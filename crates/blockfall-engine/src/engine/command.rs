use std::str::FromStr;

/// A discrete player intent forwarded to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Rotate,
    /// One row down; identical to a gravity tick.
    SoftDrop,
    HardDrop,
    Reset,
}

impl Command {
    /// Parses a command from its script character.
    ///
    /// | Command | Characters |
    /// |---------|------------|
    /// | `MoveLeft` | `h`, `<` |
    /// | `MoveRight` | `l`, `>` |
    /// | `Rotate` | `r`, `^` |
    /// | `SoftDrop` | `j`, `v` |
    /// | `HardDrop` | `d`, space |
    /// | `Reset` | `n` |
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::Command;
    ///
    /// assert_eq!(Command::from_char('h'), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_char(' '), Some(Command::HardDrop));
    /// assert_eq!(Command::from_char('?'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'h' | '<' => Some(Command::MoveLeft),
            'l' | '>' => Some(Command::MoveRight),
            'r' | '^' => Some(Command::Rotate),
            'j' | 'v' => Some(Command::SoftDrop),
            'd' | ' ' => Some(Command::HardDrop),
            'n' => Some(Command::Reset),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Command::MoveLeft => 'h',
            Command::MoveRight => 'l',
            Command::Rotate => 'r',
            Command::SoftDrop => 'j',
            Command::HardDrop => 'd',
            Command::Reset => 'n',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid command {ch:?} at position {position}")]
pub struct ParseCommandError {
    ch: char,
    position: usize,
}

/// A sequence of commands, written as one character per command.
///
/// Whitespace other than the space character (hard drop) is ignored, so scripts
/// may be split across lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandScript(Vec<Command>);

impl CommandScript {
    #[must_use]
    pub fn commands(&self) -> &[Command] {
        &self.0
    }
}

impl FromStr for CommandScript {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .filter(|&(_, ch)| ch == ' ' || !ch.is_whitespace())
            .map(|(position, ch)| Command::from_char(ch).ok_or(ParseCommandError { ch, position }))
            .collect::<Result<_, _>>()
            .map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_round_trip() {
        for command in [
            Command::MoveLeft,
            Command::MoveRight,
            Command::Rotate,
            Command::SoftDrop,
            Command::HardDrop,
            Command::Reset,
        ] {
            assert_eq!(Command::from_char(command.as_char()), Some(command));
        }
    }

    #[test]
    fn test_parse_script() {
        let script: CommandScript = "hh r\nv>".parse().unwrap();
        assert_eq!(
            script.commands(),
            [
                Command::MoveLeft,
                Command::MoveLeft,
                Command::HardDrop,
                Command::Rotate,
                Command::SoftDrop,
                Command::MoveRight,
            ]
        );
    }

    #[test]
    fn test_parse_script_error_position() {
        let err = "hhx".parse::<CommandScript>().unwrap_err();
        assert_eq!(err, ParseCommandError { ch: 'x', position: 2 });
        assert_eq!(err.to_string(), "invalid command 'x' at position 2");
    }
}
