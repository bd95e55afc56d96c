#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use driver::*;
pub use error::*;
pub use generator::*;
pub use input::*;
pub use play::*;
pub use session::*;
pub use tile::*;
pub use types::*;

mod board;
mod driver;
mod error;
mod generator;
mod input;
mod play;
mod session;
mod tile;
mod types;

/// Side length of the default square board.
pub const DEFAULT_SIZE: Coord = 16;

/// Mine count of the default board.
pub const DEFAULT_MINES: CellCount = 40;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub(crate) const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Validated config; at least one cell must stay free of mines.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(ConfigIssue::EmptyBoard.into());
        }
        let cells = mult(size.0, size.1);
        if mines >= cells {
            return Err(ConfigIssue::TooManyMines { mines, cells }.into());
        }
        Ok(Self::new_unchecked(size, mines))
    }

    pub fn square(size: Coord, mines: CellCount) -> Result<Self> {
        Self::new((size, size), mines)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((DEFAULT_SIZE, DEFAULT_SIZE), DEFAULT_MINES)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
}
