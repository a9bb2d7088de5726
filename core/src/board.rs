use ndarray::Array2;
use std::ops::{Index, IndexMut};

use crate::*;

/// Owned grid of cells, indexed by `(x, y)`.
///
/// Mines are placed once while the board is built; after that only the open and flag bits change.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl Board {
    /// Creates a board without mines.
    pub fn new(size: Coord2) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(ConfigError::EmptyBoard {
                width: size.0,
                height: size.1,
            }
            .into());
        }

        Ok(Self {
            cells: Array2::default(size.to_nd_index()),
            mine_count: 0,
        })
    }

    /// Creates a board with mines at exactly `mine_coords`.
    ///
    /// Every coordinate is checked before any mine is placed. Repeated coordinates hold a single mine.
    pub fn with_mines(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut board = Self::new(size)?;

        if let Some(&coords) = mine_coords.iter().find(|&&coords| !in_bounds(coords, size)) {
            return Err(GameError::InvalidCoordinate(coords));
        }

        for &coords in mine_coords {
            if !board.place_mine(coords) {
                log::debug!("Ignoring duplicate mine at {:?}", coords);
            }
        }

        Ok(board)
    }

    /// Puts a mine on `coords` and bumps the adjacent count of each neighbor.
    ///
    /// Returns `false` without touching anything if the cell already holds a mine.
    fn place_mine(&mut self, coords: Coord2) -> bool {
        if self[coords].is_mine {
            return false;
        }

        self[coords].is_mine = true;
        self.mine_count += 1;
        for pos in self.iter_neighbors(coords) {
            self[pos].adjacent_mines += 1;
        }
        true
    }

    pub fn size(&self) -> Coord2 {
        let (dim_x, dim_y) = self.cells.dim();
        (dim_x as Coord, dim_y as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        let (width, height) = self.size();
        mult(width, height)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size()) {
            Ok(coords)
        } else {
            Err(GameError::IndexOutOfRange(coords))
        }
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// Marks every cell opened, returning how many were closed before.
    pub(crate) fn open_all(&mut self) -> CellCount {
        let mut newly_opened = 0;
        for cell in self.cells.iter_mut().filter(|cell| !cell.is_opened) {
            cell.is_opened = true;
            newly_opened += 1;
        }
        newly_opened
    }

    /// One string per row, top to bottom, one character per cell.
    pub fn render_rows(&self) -> Vec<String> {
        let (width, height) = self.size();
        (0..height)
            .map(|y| (0..width).map(|x| self[(x, y)].view().symbol()).collect())
            .collect()
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        Board::with_mines(size, mines).unwrap()
    }

    fn counted_mine_neighbors(board: &Board, coords: Coord2) -> u8 {
        board
            .iter_neighbors(coords)
            .filter(|&pos| board[pos].is_mine())
            .count() as u8
    }

    #[test]
    fn adjacent_counts_match_single_corner_mine() {
        let board = board((3, 3), &[(2, 0)]);

        assert_eq!(board[(1, 0)].adjacent_mines(), 1);
        assert_eq!(board[(1, 1)].adjacent_mines(), 1);
        assert_eq!(board[(2, 1)].adjacent_mines(), 1);
        assert_eq!(board[(0, 0)].adjacent_mines(), 0);
        assert_eq!(board[(0, 2)].adjacent_mines(), 0);
        assert_eq!(board[(2, 2)].adjacent_mines(), 0);
        assert_eq!(board.mine_count(), 1);
        assert_eq!(board.safe_cell_count(), 8);
    }

    #[test]
    fn adjacent_counts_match_neighbor_scan() {
        let mines = &[(0, 0), (1, 1), (4, 0), (2, 3), (3, 3), (0, 3)];
        let board = board((5, 4), mines);

        for x in 0..5 {
            for y in 0..4 {
                let coords = (x, y);
                assert_eq!(
                    board[coords].adjacent_mines(),
                    counted_mine_neighbors(&board, coords),
                    "at {coords:?}"
                );
            }
        }
    }

    #[test]
    fn fully_surrounded_cell_counts_eight() {
        let mines: Vec<_> = NeighborIter::new((1, 1), (3, 3)).collect();
        let board = board((3, 3), &mines);

        assert_eq!(board[(1, 1)].adjacent_mines(), 8);
    }

    #[test]
    fn duplicate_mines_are_placed_once() {
        let board = board((3, 3), &[(1, 1), (1, 1), (1, 1)]);

        assert_eq!(board.mine_count(), 1);
        assert_eq!(board.safe_cell_count(), 8);
        assert_eq!(board[(0, 0)].adjacent_mines(), 1);
    }

    #[test]
    fn rejects_out_of_bounds_mine() {
        assert_eq!(
            Board::with_mines((3, 2), &[(0, 0), (1, 2)]),
            Err(GameError::InvalidCoordinate((1, 2)))
        );
    }

    #[test]
    fn rejects_empty_board() {
        assert_eq!(
            Board::new((0, 4)),
            Err(GameError::InvalidConfiguration(ConfigError::EmptyBoard {
                width: 0,
                height: 4
            }))
        );
    }

    #[test]
    fn validate_coords_reports_index_out_of_range() {
        let board = board((4, 2), &[]);

        assert_eq!(board.validate_coords((3, 1)), Ok((3, 1)));
        assert_eq!(
            board.validate_coords((4, 0)),
            Err(GameError::IndexOutOfRange((4, 0)))
        );
    }

    #[test]
    fn render_rows_are_row_major() {
        let mut board = board((3, 2), &[(2, 0)]);
        board[(2, 0)].is_opened = true;
        board[(1, 1)].is_opened = true;
        board[(0, 1)].is_flagged = true;

        assert_eq!(board.render_rows(), vec!["--*", "?1-"]);
    }

    #[test]
    fn open_all_counts_only_closed_cells() {
        let mut board = board((2, 2), &[(0, 0)]);
        board[(1, 1)].is_opened = true;

        assert_eq!(board.open_all(), 3);
        assert_eq!(board.render_rows(), vec!["*1", "11"]);
    }
}
