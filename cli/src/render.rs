use std::fmt;

use sweeper_core::{CellContent, CellView, Coord, Coord2, GameStatus, Observation};

/// Text grid of an [`Observation`], with row labels on the left and column labels on top.
pub struct BoardDisplay<'a>(pub &'a Observation);

fn symbol(cell: CellView) -> char {
    match cell {
        CellView::Hidden => '#',
        CellView::Flagged => 'F',
        CellView::Revealed(CellContent::Count(0)) => '.',
        CellView::Revealed(CellContent::Count(count)) => char::from(b'0' + count.min(9)),
        CellView::Revealed(CellContent::Mine) => 'X',
        CellView::Mine => '*',
        CellView::IncorrectFlag => '!',
    }
}

fn digits(max_index: Coord) -> usize {
    max_index.max(0).to_string().len()
}

impl fmt::Display for BoardDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let obs = self.0;
        let (rows, cols) = obs.size;
        let label_width = digits(rows - 1);
        let cell_width = digits(cols - 1);

        write!(f, "{:label_width$}", "")?;
        for col in 0..cols {
            write!(f, " {col:>cell_width$}")?;
        }
        writeln!(f)?;

        for row in 0..rows {
            write!(f, "{row:>label_width$}")?;
            for col in 0..cols {
                let cell = obs.cell((row, col)).unwrap_or_default();
                write!(f, " {:>cell_width$}", symbol(cell))?;
            }
            writeln!(f)?;
        }

        writeln!(f, "mines left: {}", obs.mines_left)
    }
}

/// Closing line for a finished game.
pub fn status_message(status: GameStatus, triggered_mine: Option<Coord2>) -> Option<String> {
    match (status, triggered_mine) {
        (GameStatus::InProgress, _) => None,
        (GameStatus::Won, _) => Some("All safe cells cleared, you win!".to_owned()),
        (GameStatus::Lost, Some((row, col))) => {
            Some(format!("Boom! Stepped on a mine at ({row}, {col})."))
        }
        (GameStatus::Lost, None) => Some("Boom! Stepped on a mine.".to_owned()),
    }
}
