use alloc::collections::{BTreeSet, VecDeque};
use alloc::vec;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Visibility and flag state of every cell, plus the win/loss state machine.
///
/// The board never owns mines, each move is checked against a [`MineField`] of the same size.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    cells: Array2<CellState>,
    revealed_safe: CellCount,
    flagged: CellCount,
    status: GameStatus,
    triggered_mine: Option<Coord2>,
}

impl Board {
    /// A fully hidden board, both sides of `size` must be positive.
    pub fn new(size: Coord2) -> Result<Self> {
        let (rows, cols) = size;
        if rows <= 0 || cols <= 0 {
            return Err(GameError::InvalidSize { rows, cols });
        }
        Ok(Self::new_unchecked(size))
    }

    /// A fully hidden board matching the shape of `field`.
    pub fn for_field(field: &MineField) -> Self {
        Self::new_unchecked(field.size())
    }

    fn new_unchecked(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
            revealed_safe: 0,
            flagged: 0,
            status: Default::default(),
            triggered_mine: None,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    /// Number of safe cells revealed so far.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_safe
    }

    pub fn flag_count(&self) -> CellCount {
        self.flagged
    }

    /// The mine that ended the game, if it was lost.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size()) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds(coords.0, coords.1))
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<CellState> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    pub fn is_revealed(&self, coords: Coord2) -> Result<bool> {
        self.cell_at(coords).map(CellState::is_revealed)
    }

    pub fn is_flagged(&self, coords: Coord2) -> Result<bool> {
        self.cell_at(coords).map(CellState::is_flagged)
    }

    /// Toggle the flag on a hidden cell.
    ///
    /// Revealed cells and finished games are left untouched.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        use CellState::*;

        let coords = self.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];

        if self.status.is_finished() {
            return Ok(FlagOutcome::unchanged(cell.is_flagged()));
        }

        Ok(match *cell {
            Hidden => {
                *cell = Flagged;
                self.flagged += 1;
                log::debug!("Flagged cell at {:?}", coords);
                FlagOutcome::changed(true)
            }
            Flagged => {
                *cell = Hidden;
                self.flagged -= 1;
                log::debug!("Unflagged cell at {:?}", coords);
                FlagOutcome::changed(false)
            }
            Revealed => FlagOutcome::unchanged(false),
        })
    }

    /// Reveal a hidden cell, flood-filling from cells with no adjacent mines.
    ///
    /// Flagged and revealed cells, as well as finished games, are no-ops.
    pub fn reveal(&mut self, field: &MineField, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        if field.size() != self.size() {
            return Err(GameError::InvalidBoardShape);
        }

        if self.status.is_finished() || self.cells[coords.to_nd_index()] != CellState::Hidden {
            return Ok(RevealOutcome::unchanged(self.status));
        }

        let changed = match field.content_unchecked(coords) {
            CellContent::Mine => {
                self.cells[coords.to_nd_index()] = CellState::Revealed;
                self.triggered_mine = Some(coords);
                self.status = GameStatus::Lost;
                log::debug!("Revealed mine at {:?}, game lost", coords);
                vec![coords]
            }
            CellContent::Count(count) => {
                log::debug!("Reveal cell at {:?}, mine count: {}", coords, count);
                let changed = self.flood_reveal(field, coords);

                if self.revealed_safe == field.safe_cell_count() {
                    self.status = GameStatus::Won;
                    log::debug!("All {} safe cells revealed, game won", self.revealed_safe);
                }
                changed
            }
        };

        Ok(RevealOutcome {
            changed,
            status: self.status,
        })
    }

    /// Reveals the safe cell at `start` and, while counts are zero, its hidden neighbors.
    fn flood_reveal(&mut self, field: &MineField, start: Coord2) -> Vec<Coord2> {
        let mut changed = Vec::new();
        let mut visited = BTreeSet::from([start]);
        let mut to_visit = VecDeque::from([start]);

        while let Some(visit_coords) = to_visit.pop_front() {
            // flags are never opened by propagation
            if self.cells[visit_coords.to_nd_index()] != CellState::Hidden {
                log::trace!("Skipping cell at {:?}", visit_coords);
                continue;
            }

            // zero cells only border safe cells, so this never opens a mine
            let CellContent::Count(count) = field.content_unchecked(visit_coords) else {
                continue;
            };

            self.cells[visit_coords.to_nd_index()] = CellState::Revealed;
            self.revealed_safe += 1;
            changed.push(visit_coords);
            log::trace!("Flood revealed cell at {:?}, mine count: {}", visit_coords, count);

            if count == 0 {
                for neighbor in field.iter_neighbors(visit_coords) {
                    if visited.insert(neighbor) {
                        to_visit.push_back(neighbor);
                    }
                }
            }
        }

        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(size: Coord2, mines: &[Coord2]) -> MineField {
        MineField::from_mine_coords(size, mines).unwrap()
    }

    #[test]
    fn reveal_hits_mine_and_sets_triggered_cell() {
        let field = field((2, 2), &[(0, 0)]);
        let mut board = Board::for_field(&field);

        let outcome = board.reveal(&field, (0, 0)).unwrap();

        assert_eq!(outcome.changed, [(0, 0)]);
        assert_eq!(outcome.status, GameStatus::Lost);
        assert_eq!(board.triggered_mine(), Some((0, 0)));
        assert_eq!(board.is_revealed((0, 0)), Ok(true));
    }

    #[test]
    fn reveal_flood_fill_opens_zero_region() {
        let field = field((3, 3), &[(2, 2)]);
        let mut board = Board::for_field(&field);

        let outcome = board.reveal(&field, (0, 0)).unwrap();

        assert_eq!(outcome.status, GameStatus::Won);
        assert_eq!(outcome.changed.len(), 8);
        assert_eq!(board.is_revealed((1, 1)), Ok(true));
        assert_eq!(board.is_revealed((2, 2)), Ok(false));
    }

    #[test]
    fn numbered_cell_does_not_propagate() {
        let field = field((3, 3), &[(0, 0)]);
        let mut board = Board::for_field(&field);

        let outcome = board.reveal(&field, (1, 1)).unwrap();

        assert_eq!(outcome.changed, [(1, 1)]);
        assert_eq!(outcome.status, GameStatus::InProgress);
        assert_eq!(board.revealed_count(), 1);
    }

    #[test]
    fn flood_fill_stops_at_flags() {
        let field = field((1, 4), &[]);
        let mut board = Board::for_field(&field);

        board.toggle_flag((0, 2)).unwrap();
        let outcome = board.reveal(&field, (0, 0)).unwrap();

        assert_eq!(outcome.changed, [(0, 0), (0, 1)]);
        assert_eq!(outcome.status, GameStatus::InProgress);
        assert_eq!(board.is_flagged((0, 2)), Ok(true));
        assert_eq!(board.is_revealed((0, 3)), Ok(false));
    }

    #[test]
    fn flagged_cell_cannot_be_revealed() {
        let field = field((2, 2), &[(1, 1)]);
        let mut board = Board::for_field(&field);

        board.toggle_flag((1, 1)).unwrap();
        let outcome = board.reveal(&field, (1, 1)).unwrap();

        assert!(!outcome.has_update());
        assert_eq!(board.status(), GameStatus::InProgress);

        board.toggle_flag((1, 1)).unwrap();
        assert_eq!(board.reveal(&field, (1, 1)).unwrap().status, GameStatus::Lost);
    }

    #[test]
    fn toggle_flag_reports_new_state() {
        let mut board = Board::new((2, 2)).unwrap();

        assert_eq!(board.toggle_flag((0, 1)), Ok(FlagOutcome::changed(true)));
        assert_eq!(board.flag_count(), 1);
        assert_eq!(board.toggle_flag((0, 1)), Ok(FlagOutcome::changed(false)));
        assert_eq!(board.flag_count(), 0);
    }

    #[test]
    fn flagging_revealed_cell_is_a_no_op() {
        let field = field((2, 2), &[(0, 0)]);
        let mut board = Board::for_field(&field);

        board.reveal(&field, (1, 1)).unwrap();

        assert_eq!(board.toggle_flag((1, 1)), Ok(FlagOutcome::unchanged(false)));
        assert_eq!(board.flag_count(), 0);
    }

    #[test]
    fn moves_after_loss_are_no_ops() {
        let field = field((2, 2), &[(0, 0)]);
        let mut board = Board::for_field(&field);

        board.toggle_flag((1, 0)).unwrap();
        board.reveal(&field, (0, 0)).unwrap();
        let before = board.clone();

        assert_eq!(
            board.reveal(&field, (1, 1)).unwrap(),
            RevealOutcome::unchanged(GameStatus::Lost)
        );
        assert_eq!(board.toggle_flag((0, 1)), Ok(FlagOutcome::unchanged(false)));
        assert_eq!(board.toggle_flag((1, 0)), Ok(FlagOutcome::unchanged(true)));
        assert_eq!(board, before);
    }

    #[test]
    fn out_of_bounds_leaves_board_untouched() {
        let field = field((2, 3), &[(0, 0)]);
        let mut board = Board::for_field(&field);
        let before = board.clone();

        assert_eq!(board.reveal(&field, (-1, 0)), Err(GameError::OutOfBounds(-1, 0)));
        assert_eq!(board.reveal(&field, (2, 0)), Err(GameError::OutOfBounds(2, 0)));
        assert_eq!(board.toggle_flag((0, -1)), Err(GameError::OutOfBounds(0, -1)));
        assert_eq!(board.is_revealed((0, 3)), Err(GameError::OutOfBounds(0, 3)));
        assert_eq!(board, before);
    }

    #[test]
    fn mismatched_field_is_rejected() {
        let field = field((3, 3), &[]);
        let mut board = Board::new((2, 2)).unwrap();

        assert_eq!(board.reveal(&field, (0, 0)), Err(GameError::InvalidBoardShape));
    }

    #[test]
    fn empty_axes_are_rejected() {
        assert_eq!(Board::new((0, 3)), Err(GameError::InvalidSize { rows: 0, cols: 3 }));
        assert_eq!(Board::new((3, -1)), Err(GameError::InvalidSize { rows: 3, cols: -1 }));
    }

    #[test]
    fn winning_needs_no_flags() {
        let field = field((2, 1), &[(0, 0)]);
        let mut board = Board::for_field(&field);

        assert_eq!(board.reveal(&field, (1, 0)).unwrap().status, GameStatus::Won);
        assert!(board.is_finished());
        assert_eq!(board.flag_count(), 0);
    }
}
