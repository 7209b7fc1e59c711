use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid board size {rows}x{cols}, both sides must be positive")]
    InvalidSize { rows: Coord, cols: Coord },
    #[error("Too many mines, requested {mines} but the board only has {cells} cells")]
    TooManyMines { mines: CellCount, cells: CellCount },
    #[error("Coordinates ({0}, {1}) are out of bounds")]
    OutOfBounds(Coord, Coord),
    #[error("Cell ({0}, {1}) holds a mine and has no adjacency count")]
    MineCell(Coord, Coord),
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
}

impl GameError {
    /// Whether this error was caused by invalid game parameters.
    pub const fn is_configuration(self) -> bool {
        matches!(self, Self::InvalidSize { .. } | Self::TooManyMines { .. })
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
