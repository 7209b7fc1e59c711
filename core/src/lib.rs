#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use error::*;
pub use generator::*;
pub use minefield::*;
pub use session::*;
pub use tile::*;
pub use types::*;
pub use view::*;

mod board;
mod error;
mod generator;
mod minefield;
mod session;
mod tile;
mod types;
mod view;

/// Board dimensions and mine count, validated on construction.
///
/// Fields are private so every config in circulation went through [`GameConfig::new`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameConfig {
    size: Coord2,
    mines: CellCount,
}

impl GameConfig {
    pub(crate) const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Both sides must be positive and at least one cell must be left without a mine.
    pub fn new((rows, cols): Coord2, mines: CellCount) -> Result<Self> {
        if rows <= 0 || cols <= 0 {
            return Err(GameError::InvalidSize { rows, cols });
        }
        let cells = mult(rows, cols);
        if mines >= cells {
            return Err(GameError::TooManyMines { mines, cells });
        }
        Ok(Self::new_unchecked((rows, cols), mines))
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn cols(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

/// Result of a reveal: the cells that became visible and the status afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealOutcome {
    pub changed: Vec<Coord2>,
    pub status: GameStatus,
}

impl RevealOutcome {
    pub const fn unchanged(status: GameStatus) -> Self {
        Self {
            changed: Vec::new(),
            status,
        }
    }

    /// Whether this outcome could have caused an update to the game
    pub fn has_update(&self) -> bool {
        !self.changed.is_empty()
    }
}

/// Result of a flag toggle: the flag state of the cell after the call.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagOutcome {
    pub flagged: bool,
    pub changed: bool,
}

impl FlagOutcome {
    pub const fn changed(flagged: bool) -> Self {
        Self {
            flagged,
            changed: true,
        }
    }

    pub const fn unchanged(flagged: bool) -> Self {
        Self {
            flagged,
            changed: false,
        }
    }

    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        self.changed
    }
}
