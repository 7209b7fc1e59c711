use std::io::{BufRead, Write};

use anyhow::Context;
use clap::ValueEnum;
use serde::Serialize;
use sweeper_core::{Coord2, FlagOutcome, GameSession, Observation, RevealOutcome};

use crate::command::{Command, HELP};
use crate::render::{BoardDisplay, status_message};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Redraw the board as text after every command
    #[default]
    Text,
    /// Print one JSON object per command
    Json,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Message<'a> {
    Reveal {
        coords: Coord2,
        outcome: &'a RevealOutcome,
    },
    Flag {
        coords: Coord2,
        outcome: FlagOutcome,
    },
    Board {
        observation: &'a Observation,
    },
    Error {
        message: String,
    },
    Help {
        text: &'static str,
    },
}

/// Drives one session from line-based input, the terminal stand-in for clicks.
pub struct Shell<W> {
    game: GameSession,
    mode: OutputMode,
    output: W,
}

impl<W: Write> Shell<W> {
    pub fn new(game: GameSession, mode: OutputMode, output: W) -> Self {
        Self { game, mode, output }
    }

    pub fn game(&self) -> &GameSession {
        &self.game
    }

    /// Reads commands until `quit`, end of input, or the end of the game.
    pub fn run(&mut self, input: impl BufRead) -> anyhow::Result<()> {
        if self.mode == OutputMode::Text {
            self.draw()?;
            writeln!(self.output, "type `help` for a list of commands")?;
        }

        for line in input.lines() {
            let line = line.context("Failed to read command")?;
            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command)?,
                Err(err) => self.report(err.to_string())?,
            }

            if self.game.is_finished() {
                break;
            }
        }

        self.output.flush().context("Failed to flush output")
    }

    fn execute(&mut self, command: Command) -> anyhow::Result<()> {
        log::debug!("Executing {:?}", command);
        match command {
            Command::Reveal(coords) => match self.game.reveal(coords) {
                Ok(outcome) => self.show_reveal(coords, &outcome),
                Err(err) => self.report(err.to_string()),
            },
            Command::Flag(coords) => match self.game.flag(coords) {
                Ok(outcome) => self.show_flag(coords, outcome),
                Err(err) => self.report(err.to_string()),
            },
            Command::Show => match self.mode {
                OutputMode::Text => self.draw(),
                OutputMode::Json => {
                    let observation = self.game.observe();
                    self.emit(&Message::Board {
                        observation: &observation,
                    })
                }
            },
            Command::Help => match self.mode {
                OutputMode::Text => Ok(writeln!(self.output, "{HELP}")?),
                OutputMode::Json => self.emit(&Message::Help { text: HELP }),
            },
            Command::Quit => Ok(()),
        }
    }

    fn show_reveal(&mut self, coords: Coord2, outcome: &RevealOutcome) -> anyhow::Result<()> {
        log::debug!(
            "Reveal at {:?} changed {} cells, status {:?}",
            coords,
            outcome.changed.len(),
            outcome.status
        );
        match self.mode {
            OutputMode::Text if outcome.has_update() => self.draw(),
            OutputMode::Text => Ok(writeln!(self.output, "nothing to reveal at {coords:?}")?),
            OutputMode::Json => self.emit(&Message::Reveal { coords, outcome }),
        }
    }

    fn show_flag(&mut self, coords: Coord2, outcome: FlagOutcome) -> anyhow::Result<()> {
        match self.mode {
            OutputMode::Text if outcome.has_update() => self.draw(),
            OutputMode::Text => Ok(writeln!(self.output, "cannot flag {coords:?}")?),
            OutputMode::Json => self.emit(&Message::Flag { coords, outcome }),
        }
    }

    fn draw(&mut self) -> anyhow::Result<()> {
        let observation = self.game.observe();
        write!(self.output, "{}", BoardDisplay(&observation))?;
        if let Some(message) = status_message(self.game.status(), self.game.triggered_mine()) {
            writeln!(self.output, "{message}")?;
        }
        Ok(())
    }

    fn report(&mut self, message: String) -> anyhow::Result<()> {
        log::warn!("{}", message);
        match self.mode {
            OutputMode::Text => Ok(writeln!(self.output, "error: {message}")?),
            OutputMode::Json => self.emit(&Message::Error { message }),
        }
    }

    fn emit(&mut self, message: &Message<'_>) -> anyhow::Result<()> {
        serde_json::to_writer(&mut self.output, message).context("Failed to encode message")?;
        writeln!(self.output)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use sweeper_core::{GameStatus, MineField};

    fn shell(mode: OutputMode) -> Shell<Vec<u8>> {
        let field = MineField::from_mine_coords((2, 3), &[(0, 0)]).unwrap();
        Shell::new(GameSession::from_minefield(field), mode, Vec::new())
    }

    fn run(shell: &mut Shell<Vec<u8>>, input: &str) -> String {
        shell.run(Cursor::new(input.to_owned())).unwrap();
        String::from_utf8(shell.output.clone()).unwrap()
    }

    #[test]
    fn text_session_until_win() {
        let mut shell = shell(OutputMode::Text);

        let text = run(&mut shell, "r 1 2\nr 9 9\nf 1 2\nr 1 0\nr 0 1\n");

        assert_eq!(shell.game().status(), GameStatus::Won);
        assert!(text.contains("error: Coordinates (9, 9) are out of bounds"));
        assert!(text.contains("cannot flag (1, 2)"));
        assert!(text.ends_with("All safe cells cleared, you win!\n"));
    }

    #[test]
    fn text_session_stops_after_loss() {
        let mut shell = shell(OutputMode::Text);

        let text = run(&mut shell, "r 0 0\nr 1 2\n");

        assert_eq!(shell.game().status(), GameStatus::Lost);
        assert_eq!(shell.game().is_revealed((1, 2)), Ok(false));
        assert!(text.ends_with("Boom! Stepped on a mine at (0, 0).\n"));
    }

    #[test]
    fn bad_input_keeps_the_loop_going() {
        let mut shell = shell(OutputMode::Text);

        let text = run(&mut shell, "dig\n\nr 1\nq\nr 0 0\n");

        assert!(text.contains("error: Unknown command `dig`"));
        assert!(text.contains("error: `reveal` expects a row and a column"));
        assert_eq!(shell.game().status(), GameStatus::InProgress);
    }

    #[test]
    fn json_mode_emits_one_object_per_command() {
        let mut shell = shell(OutputMode::Json);

        let text = run(&mut shell, "f 0 0\nr -1 0\nr 1 2\n");
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["type"], "flag");
        assert_eq!(lines[0]["outcome"]["flagged"], true);
        assert_eq!(lines[1]["type"], "error");
        assert_eq!(lines[2]["type"], "reveal");
        assert_eq!(lines[2]["outcome"]["status"], "InProgress");
        assert_eq!(lines[2]["outcome"]["changed"].as_array().unwrap().len(), 4);
    }
}
