use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Hidden contents of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Mine,
    /// Safe cell with the number of mines in its Moore neighbourhood.
    Empty(u8),
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }
}

/// Immutable minefield with precomputed adjacency counts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl Board {
    /// Builds a board from a mine mask, computing every safe cell's count.
    pub fn from_mine_mask(mine_mask: &Array2<bool>) -> Self {
        let size = grid_size(mine_mask);
        let cells = Array2::from_shape_fn(mine_mask.dim(), |(x, y)| {
            if mine_mask[[x, y]] {
                Cell::Mine
            } else {
                let count = NeighborIter::new((x as Coord, y as Coord), size)
                    .filter(|&pos| mine_mask[pos.to_nd_index()])
                    .count();
                Cell::Empty(count as u8)
            }
        });
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;

        Self { cells, mine_count }
    }

    /// Builds a board of `size` with mines at `mine_coords`; repeated coordinates count once.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(ConfigIssue::EmptyBoard.into());
        }

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(&mine_mask))
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.cells)
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self[coords]
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords].is_mine()
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// Coordinates of every mine, in column-major order.
    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.cells
            .indexed_iter()
            .filter(|(_, cell)| cell.is_mine())
            .map(|((x, y), _)| (x as Coord, y as Coord))
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.cells[(x as usize, y as usize)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn counts_follow_moore_neighbourhood() {
        let board = Board::from_mine_coords((3, 3), &[(0, 0), (2, 2)]).unwrap();

        assert_eq!(board[(0, 0)], Cell::Mine);
        assert_eq!(board[(1, 1)], Cell::Empty(2));
        assert_eq!(board[(2, 0)], Cell::Empty(0));
        assert_eq!(board[(1, 0)], Cell::Empty(1));
        assert_eq!(board[(2, 1)], Cell::Empty(1));
        assert_eq!(board.mine_count(), 2);
        assert_eq!(board.safe_cell_count(), 7);
    }

    #[test]
    fn duplicate_mine_coords_collapse() {
        let board = Board::from_mine_coords((2, 2), &[(1, 1), (1, 1)]).unwrap();

        assert_eq!(board.mine_count(), 1);
        assert_eq!(board.iter_mines().collect::<Vec<_>>(), [(1, 1)]);
    }

    #[test]
    fn rejects_out_of_bounds_mines() {
        assert_eq!(
            Board::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn rejects_empty_size() {
        assert_eq!(
            Board::from_mine_coords((0, 4), &[]),
            Err(GameError::InvalidConfiguration(ConfigIssue::EmptyBoard))
        );
    }
}
