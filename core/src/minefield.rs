use core::ops::Index;
use ndarray::Array2;

use crate::*;

/// Mine positions and the precomputed adjacency count of every safe cell.
///
/// Immutable once built; a [`GameSession`] owns exactly one.
#[derive(Clone, Debug, PartialEq)]
pub struct MineField {
    mine_mask: Array2<bool>,
    adjacency: Array2<u8>,
    mine_count: CellCount,
}

impl MineField {
    /// Builds a field from a full mine mask, indexed `[row, col]`.
    ///
    /// An axis longer than [`Coord`] can address is [`GameError::InvalidBoardShape`].
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let size = grid_size(&mine_mask).ok_or(GameError::InvalidBoardShape)?;
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        GameConfig::new(size, mine_count)?;
        Ok(Self::new_unchecked(mine_mask, mine_count))
    }

    /// Computes adjacency for a mask already known to match a valid [`GameConfig`].
    pub(crate) fn new_unchecked(mine_mask: Array2<bool>, mine_count: CellCount) -> Self {
        let adjacency = Array2::from_shape_fn(mine_mask.raw_dim(), |(row, col)| {
            if mine_mask[[row, col]] {
                return 0;
            }
            mine_mask
                .iter_neighbors((row as Coord, col as Coord))
                .filter(|&pos| mine_mask[pos.to_nd_index()])
                .count() as u8
        });

        let (rows, cols) = mine_mask.dim();
        log::debug!("Built minefield {}x{} with {} mines", rows, cols, mine_count);
        Self {
            mine_mask,
            adjacency,
            mine_count,
        }
    }

    /// Builds a field with mines at exactly the given coordinates, duplicates collapse.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 <= 0 || size.1 <= 0 {
            return Err(GameError::InvalidSize {
                rows: size.0,
                cols: size.1,
            });
        }

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::OutOfBounds(coords.0, coords.1));
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size()) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds(coords.0, coords.1))
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mine_mask.dim();
        // both axes were checked against `Coord` on construction
        (rows as Coord, cols as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn is_mine(&self, coords: Coord2) -> Result<bool> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    /// Number of mines among the neighbors of a safe cell.
    ///
    /// Mines have no count, asking for one is an error.
    pub fn adjacency_count(&self, coords: Coord2) -> Result<u8> {
        match self.content(coords)? {
            CellContent::Count(count) => Ok(count),
            CellContent::Mine => Err(GameError::MineCell(coords.0, coords.1)),
        }
    }

    pub fn content(&self, coords: Coord2) -> Result<CellContent> {
        let coords = self.validate_coords(coords)?;
        Ok(self.content_unchecked(coords))
    }

    pub(crate) fn content_unchecked(&self, coords: Coord2) -> CellContent {
        if self[coords] {
            CellContent::Mine
        } else {
            CellContent::Count(self.adjacency[coords.to_nd_index()])
        }
    }

    /// Coordinates of every mine, in row-major order.
    pub fn mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }
}

impl Index<Coord2> for MineField {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}
