use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Mutable per-session state: what the player has uncovered and marked, and where the cursor is.
///
/// A cell is never revealed and flagged at the same time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayState {
    revealed: Array2<bool>,
    flagged: Array2<bool>,
    cursor: Coord2,
    /// Safe cells revealed so far.
    revealed_count: CellCount,
    flagged_count: CellCount,
    triggered_mine: Option<Coord2>,
}

impl PlayState {
    pub fn new(size: Coord2) -> Self {
        Self {
            revealed: Array2::default(size.to_nd_index()),
            flagged: Array2::default(size.to_nd_index()),
            cursor: (0, 0),
            revealed_count: 0,
            flagged_count: 0,
            triggered_mine: None,
        }
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.revealed)
    }

    pub fn cursor(&self) -> Coord2 {
        self.cursor
    }

    pub fn is_revealed(&self, coords: Coord2) -> bool {
        self.revealed[coords.to_nd_index()]
    }

    pub fn is_flagged(&self, coords: Coord2) -> bool {
        self.flagged[coords.to_nd_index()]
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// The mine whose reveal ended the game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Reveals `coords`, flooding outwards from zero cells.
    ///
    /// Hitting a mine reveals every mine on `board` and reports [`RevealOutcome::HitMine`].
    ///
    /// # Panics
    ///
    /// When `coords` is outside the grid.
    pub fn reveal(&mut self, board: &Board, coords: Coord2) -> RevealOutcome {
        self.assert_in_bounds(coords);
        debug_assert_eq!(board.size(), self.size());

        if self.is_revealed(coords) || self.is_flagged(coords) {
            return RevealOutcome::NoChange;
        }

        self.revealed[coords.to_nd_index()] = true;
        match board[coords] {
            Cell::Mine => {
                log::debug!("Hit mine at {:?}", coords);
                self.triggered_mine = Some(coords);
                self.reveal_all_mines(board);
                RevealOutcome::HitMine
            }
            Cell::Empty(count) => {
                self.revealed_count += 1;
                log::debug!("Revealed {:?}, adjacent mines: {}", coords, count);
                if count == 0 {
                    self.flood_fill(board, coords);
                }
                RevealOutcome::Revealed
            }
        }
    }

    /// Expands from an already revealed zero cell until the region is bounded by numbered cells.
    fn flood_fill(&mut self, board: &Board, start: Coord2) {
        let mut to_visit = Vec::from([start]);
        let before = self.revealed_count;

        while let Some(visit_coords) = to_visit.pop() {
            for pos in board.iter_neighbors(visit_coords) {
                if self.is_revealed(pos) || self.is_flagged(pos) {
                    continue;
                }

                let Cell::Empty(count) = board[pos] else {
                    debug_assert!(false, "zero cell {:?} borders mine {:?}", visit_coords, pos);
                    continue;
                };
                self.revealed[pos.to_nd_index()] = true;
                self.revealed_count += 1;

                if count == 0 {
                    to_visit.push(pos);
                }
            }
        }

        log::trace!(
            "Flood fill from {:?} revealed {} more cells",
            start,
            self.revealed_count - before
        );
    }

    fn reveal_all_mines(&mut self, board: &Board) {
        for coords in board.iter_mines() {
            let index = coords.to_nd_index();
            self.revealed[index] = true;
            if self.flagged[index] {
                self.flagged[index] = false;
                self.flagged_count -= 1;
            }
        }
    }

    /// Flips the flag on an unrevealed cell; revealed cells are left alone.
    ///
    /// # Panics
    ///
    /// When `coords` is outside the grid.
    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        self.assert_in_bounds(coords);

        if self.is_revealed(coords) {
            return MarkOutcome::NoChange;
        }

        let flag = &mut self.flagged[coords.to_nd_index()];
        *flag = !*flag;
        if *flag {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        log::debug!("Flag at {:?} set to {}", coords, *flag);
        MarkOutcome::Changed
    }

    /// Moves the cursor by `step`; a move leaving the grid on either axis is rejected whole.
    pub fn move_cursor(&mut self, step: Step) -> bool {
        let step = (step.0.signum(), step.1.signum());
        match apply_step(self.cursor, step, self.size()) {
            Some(next) => {
                self.cursor = next;
                true
            }
            None => false,
        }
    }

    pub fn set_cursor(&mut self, coords: Coord2) -> Result<()> {
        let (size_x, size_y) = self.size();
        if coords.0 < size_x && coords.1 < size_y {
            self.cursor = coords;
            Ok(())
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    fn assert_in_bounds(&self, coords: Coord2) {
        let size = self.size();
        assert!(
            coords.0 < size.0 && coords.1 < size.1,
            "coordinates {:?} outside {:?} grid",
            coords,
            size
        );
    }
}
