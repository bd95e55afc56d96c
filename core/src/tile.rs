use serde::{Deserialize, Serialize};

/// What a renderer should draw for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
    /// The mine that ended the game.
    Exploded,
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}
