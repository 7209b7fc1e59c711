use std::str::FromStr;

use sweeper_core::{Coord, Coord2};
use thiserror::Error;

/// A single line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Show,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command `{0}`, type `help` for a list")]
    Unknown(String),
    #[error("`{0}` expects a row and a column")]
    MissingCoords(&'static str),
    #[error("Invalid coordinate `{0}`")]
    InvalidCoord(String),
    #[error("Unexpected trailing input `{0}`")]
    Trailing(String),
}

pub const HELP: &str = "\
commands:
  r, reveal ROW COL   reveal a cell
  f, flag ROW COL     toggle a flag
  s, show             redraw the board
  h, help             show this message
  q, quit             leave the game";

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(ParseCommandError::Empty)?;

        let command = match name.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Command::Reveal(parse_coords(&mut words, "reveal")?),
            "f" | "flag" => Command::Flag(parse_coords(&mut words, "flag")?),
            "s" | "show" => Command::Show,
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            _ => return Err(ParseCommandError::Unknown(name.to_owned())),
        };

        match words.next() {
            Some(extra) => Err(ParseCommandError::Trailing(extra.to_owned())),
            None => Ok(command),
        }
    }
}

fn parse_coords<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
) -> Result<Coord2, ParseCommandError> {
    let mut next = || -> Result<Coord, ParseCommandError> {
        let word = words
            .next()
            .ok_or(ParseCommandError::MissingCoords(command))?;
        word.parse()
            .map_err(|_| ParseCommandError::InvalidCoord(word.to_owned()))
    };
    Ok((next()?, next()?))
}
