use alloc::collections::VecDeque;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Grid of cells owned by a single game. Content is fixed at construction, reveals only clear `covered` flags.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardParts", into = "BoardParts")]
pub struct Board {
    cells: Array2<Cell>,
    size: Coord2,
    mine_count: CellCount,
}

impl Board {
    /// Builds a fully covered board from explicit mine positions, duplicates are merged.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(size, &mine_mask))
    }

    /// `mine_mask` must have the shape given by `size`.
    pub(crate) fn from_mine_mask(size: Coord2, mine_mask: &Array2<bool>) -> Self {
        debug_assert_eq!(mine_mask.dim(), (usize::from(size.0), usize::from(size.1)));

        let cells = Array2::from_shape_fn(mine_mask.dim(), |(row, col)| {
            if mine_mask[(row, col)] {
                return Cell::covered(Content::Mine);
            }
            let adjacent = mine_mask
                .iter_neighbors((row as Coord, col as Coord))
                .filter(|&pos| mine_mask[pos.to_nd_index()])
                .count();
            Cell::covered(Content::AdjacentCount(adjacent as u8))
        });
        let mine_count = cells.iter().filter(|cell| cell.is_mine()).count() as CellCount;

        Self {
            cells,
            size,
            mine_count,
        }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.size.0 && coords.1 < self.size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// `(rows, columns)`
    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn covered_safe_count(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| cell.is_covered_safe())
            .count() as CellCount
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self[coords]
    }

    pub fn view_at(&self, coords: Coord2) -> CellView {
        self[coords].view()
    }

    /// Every cell with its coordinates, in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// Uncovers the cell at `coords`.
    ///
    /// A mine uncovers the whole board, an empty cell flood-fills its 8-connected zero region together with the
    /// bordering numbers, and a number uncovers only itself.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = self[coords];

        if !cell.is_covered() {
            return Err(GameError::AlreadyUncovered);
        }

        Ok(match cell.content() {
            Content::Mine => {
                self.uncover_all();
                log::debug!("Mine hit at {:?}, board uncovered", coords);
                RevealOutcome::MineHit
            }
            Content::AdjacentCount(0) => {
                let uncovered = self.flood_uncover(coords);
                log::debug!("Flood reveal from {:?} uncovered {} cells", coords, uncovered);
                RevealOutcome::FloodRevealed
            }
            Content::AdjacentCount(count) => {
                self.cells[coords.to_nd_index()].covered = false;
                log::debug!("Reveal cell at {:?}, mine count: {}", coords, count);
                RevealOutcome::AdjacentCount(count)
            }
        })
    }

    /// Derives the game state from cell visibility alone.
    pub fn evaluate(&self) -> GameState {
        if self
            .cells
            .iter()
            .any(|cell| cell.is_mine() && !cell.is_covered())
        {
            GameState::Loss
        } else if self.cells.iter().any(|cell| cell.is_covered_safe()) {
            GameState::Continue
        } else {
            GameState::Win
        }
    }

    fn uncover_all(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.covered = false;
        }
    }

    fn flood_uncover(&mut self, start: Coord2) -> CellCount {
        let mut uncovered = 0;
        let mut to_visit = VecDeque::from([start]);

        while let Some(visit_coords) = to_visit.pop_front() {
            let cell = &mut self.cells[visit_coords.to_nd_index()];
            // queued more than once through different neighbors
            if !cell.covered {
                continue;
            }

            cell.covered = false;
            let content = cell.content;
            uncovered += 1;
            log::trace!("Flood uncovered cell at {:?}: {:?}", visit_coords, content);

            // zero cells never border a mine, so only safe cells get queued
            if content == Content::AdjacentCount(0) {
                to_visit.extend(
                    self.cells
                        .iter_neighbors(visit_coords)
                        .filter(|&pos| self.cells[pos.to_nd_index()].covered),
                );
            }
        }

        uncovered
    }
}

/// Serialized form of a [`Board`], checked against the mine layout when read back.
#[derive(Serialize, Deserialize)]
#[serde(rename = "Board")]
struct BoardParts {
    size: Coord2,
    cells: Array2<Cell>,
}

impl From<Board> for BoardParts {
    fn from(board: Board) -> Self {
        Self {
            size: board.size,
            cells: board.cells,
        }
    }
}

impl TryFrom<BoardParts> for Board {
    type Error = GameError;

    fn try_from(parts: BoardParts) -> Result<Self> {
        let BoardParts { size, cells } = parts;
        if cells.dim() != (usize::from(size.0), usize::from(size.1)) {
            return Err(GameError::InvalidBoardShape);
        }

        // rebuilding from the mines gives the only valid counts
        let layout = Self::from_mine_mask(size, &cells.map(|cell| cell.is_mine()));
        if layout
            .cells
            .iter()
            .zip(cells.iter())
            .any(|(expected, actual)| expected.content != actual.content)
        {
            return Err(GameError::InvalidBoardContent);
        }

        Ok(Self {
            cells,
            size,
            mine_count: layout.mine_count,
        })
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        Board::from_mine_coords(size, mines).unwrap()
    }

    fn count_at(board: &Board, coords: Coord2) -> u8 {
        match board.cell_at(coords).content() {
            Content::AdjacentCount(count) => count,
            Content::Mine => panic!("unexpected mine at {:?}", coords),
        }
    }

    #[test]
    fn adjacency_counts_surround_single_mine() {
        let board = board((2, 2), &[(0, 0)]);

        assert_eq!(board.mine_count(), 1);
        assert!(board.cell_at((0, 0)).is_mine());
        assert_eq!(count_at(&board, (0, 1)), 1);
        assert_eq!(count_at(&board, (1, 0)), 1);
        assert_eq!(count_at(&board, (1, 1)), 1);
    }

    #[test]
    fn duplicate_mine_coords_are_merged() {
        let board = board((3, 3), &[(1, 1), (1, 1)]);

        assert_eq!(board.mine_count(), 1);
        assert_eq!(board.covered_safe_count(), 8);
    }

    #[test]
    fn out_of_range_mine_is_rejected() {
        assert_eq!(
            Board::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn reveal_number_uncovers_only_target() {
        let mut board = board((3, 3), &[(0, 0)]);

        let outcome = board.reveal((1, 1)).unwrap();

        assert_eq!(outcome, RevealOutcome::AdjacentCount(1));
        assert_eq!(board.view_at((1, 1)), CellView::Count(1));
        assert_eq!(board.covered_safe_count(), 7);
        assert_eq!(board.evaluate(), GameState::Continue);
    }

    #[test]
    fn flood_stops_at_numbered_border() {
        // mine in the far corner of a 4x4 board: everything except the mine opens
        let mut board = board((4, 4), &[(3, 3)]);

        assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::FloodRevealed);
        assert_eq!(board.view_at((0, 0)), CellView::Empty);
        assert_eq!(board.view_at((2, 2)), CellView::Count(1));
        assert_eq!(board.view_at((3, 3)), CellView::Covered);
        assert_eq!(board.evaluate(), GameState::Win);
    }

    #[test]
    fn flood_does_not_cross_a_wall_of_numbers() {
        // a column of mines splits the board, the right side stays covered
        let mut board = board((3, 5), &[(0, 2), (1, 2), (2, 2)]);

        board.reveal((1, 0)).unwrap();

        assert_eq!(board.view_at((1, 0)), CellView::Empty);
        assert_eq!(board.view_at((1, 1)), CellView::Count(3));
        assert!(board.view_at((1, 3)).is_covered());
        assert!(board.view_at((1, 4)).is_covered());
        assert_eq!(board.covered_safe_count(), 6);
    }

    #[test]
    fn mine_hit_uncovers_everything() {
        let mut board = board((3, 3), &[(0, 0), (2, 2)]);
        let before: alloc::vec::Vec<_> = board.iter_cells().map(|(_, c)| c.content()).collect();

        assert_eq!(board.reveal((2, 2)).unwrap(), RevealOutcome::MineHit);

        assert!(board.iter_cells().all(|(_, cell)| !cell.is_covered()));
        let after: alloc::vec::Vec<_> = board.iter_cells().map(|(_, c)| c.content()).collect();
        assert_eq!(before, after);
        assert_eq!(board.view_at((0, 0)), CellView::Mine);
        assert_eq!(board.evaluate(), GameState::Loss);
    }

    #[test]
    fn reveal_rejects_bad_preconditions() {
        let mut board = board((2, 2), &[(0, 0)]);

        assert_eq!(board.reveal((2, 0)), Err(GameError::InvalidCoords));
        board.reveal((1, 1)).unwrap();
        assert_eq!(board.reveal((1, 1)), Err(GameError::AlreadyUncovered));
        assert_eq!(board.view_at((1, 1)), CellView::Count(1));
    }

    #[test]
    fn win_ignores_covered_mines() {
        let mut board = board((2, 2), &[(0, 0)]);

        board.reveal((0, 1)).unwrap();
        board.reveal((1, 0)).unwrap();
        assert_eq!(board.evaluate(), GameState::Continue);
        board.reveal((1, 1)).unwrap();

        assert_eq!(board.evaluate(), GameState::Win);
        assert!(board.cell_at((0, 0)).is_covered());
    }
}
