use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a player is allowed to see of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    #[default]
    Hidden,
    Flagged,
    Revealed(CellContent),
    // these are only used to show the result after the game finishes:
    Mine,
    IncorrectFlag,
}

/// Player-visible snapshot of a session, hidden content is never included while the game runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub size: Coord2,
    pub mine_count: CellCount,
    pub mines_left: i64,
    pub status: GameStatus,
    pub cells: Array2<CellView>,
}

impl Observation {
    pub(crate) fn new(minefield: &MineField, board: &Board) -> Self {
        let size = board.size();
        let status = board.status();
        let mut cells = Array2::default(size.to_nd_index());

        let (row_end, col_end) = size;
        for row in 0..row_end {
            for col in 0..col_end {
                let coords = (row, col);
                let state = board.cell_at(coords).unwrap_or_default();
                cells[coords.to_nd_index()] =
                    Self::cell_view(state, minefield.content_unchecked(coords), status);
            }
        }

        Self {
            size,
            mine_count: minefield.mine_count(),
            mines_left: i64::from(minefield.mine_count()) - i64::from(board.flag_count()),
            status,
            cells,
        }
    }

    fn cell_view(state: CellState, content: CellContent, status: GameStatus) -> CellView {
        use CellState::*;
        use GameStatus::*;

        match (state, content.is_mine(), status) {
            (Revealed, _, _) => CellView::Revealed(content),
            (Hidden, true, Won) => CellView::Flagged,
            (Hidden, true, Lost) => CellView::Mine,
            (Hidden, _, _) => CellView::Hidden,
            (Flagged, false, Lost) => CellView::IncorrectFlag,
            (Flagged, _, _) => CellView::Flagged,
        }
    }

    pub fn cell(&self, coords: Coord2) -> Option<CellView> {
        in_bounds(coords, self.size).then(|| self.cells[coords.to_nd_index()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(size: Coord2, mines: &[Coord2]) -> GameSession {
        GameSession::from_minefield(MineField::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn hidden_content_does_not_leak() {
        let mut game = session((2, 3), &[(0, 0)]);

        game.flag((0, 1)).unwrap();
        game.reveal((1, 2)).unwrap();
        let obs = game.observe();

        assert_eq!(obs.cell((0, 0)), Some(CellView::Hidden));
        assert_eq!(obs.cell((0, 1)), Some(CellView::Flagged));
        assert_eq!(obs.cell((1, 2)), Some(CellView::Revealed(CellContent::Count(0))));
        assert_eq!(obs.cell((1, 1)), Some(CellView::Revealed(CellContent::Count(1))));
        assert_eq!(obs.cell((2, 0)), None);
        assert_eq!(obs.mines_left, 0);
    }

    #[test]
    fn loss_shows_mines_and_wrong_flags() {
        let mut game = session((2, 2), &[(0, 0), (1, 1)]);

        game.flag((0, 1)).unwrap();
        game.flag((1, 1)).unwrap();
        game.reveal((0, 0)).unwrap();
        let obs = game.observe();

        assert_eq!(obs.status, GameStatus::Lost);
        assert_eq!(obs.cell((0, 0)), Some(CellView::Revealed(CellContent::Mine)));
        assert_eq!(obs.cell((0, 1)), Some(CellView::IncorrectFlag));
        assert_eq!(obs.cell((1, 1)), Some(CellView::Flagged));
        assert_eq!(obs.cell((1, 0)), Some(CellView::Hidden));
    }

    #[test]
    fn win_flags_remaining_mines() {
        let mut game = session((1, 2), &[(0, 0)]);

        game.reveal((0, 1)).unwrap();
        let obs = game.observe();

        assert_eq!(obs.status, GameStatus::Won);
        assert_eq!(obs.cell((0, 0)), Some(CellView::Flagged));
    }
}
