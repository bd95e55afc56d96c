use thiserror::Error;

use crate::CellCount;

/// Reason a [`GameConfig`](crate::GameConfig) was rejected.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    #[error("board size must be at least 1")]
    EmptyBoard,
    #[error("{mines} mines do not fit on a board of {cells} cells")]
    TooManyMines { mines: CellCount, cells: CellCount },
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigIssue),
    #[error("Invalid coordinates")]
    InvalidCoords,
}

pub type Result<T> = core::result::Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn too_many_mines_display() {
        let err = GameError::from(ConfigIssue::TooManyMines {
            mines: 9,
            cells: 9,
        });
        assert_eq!(
            err.to_string(),
            "Invalid configuration: 9 mines do not fit on a board of 9 cells"
        );
    }
}
