use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Uniform generation strategy, reproducible from a seed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Board {
        log::debug!("Generating {:?} with seed {}", config, self.seed);
        let mut rng = SmallRng::seed_from_u64(self.seed);
        generate(config, &mut rng)
    }
}

/// Places `config.mines` mines by rejection sampling, then computes adjacency counts.
///
/// # Panics
///
/// When the config leaves no safe cell or has an empty axis.
pub fn generate<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Board {
    let (size_x, size_y) = config.size;
    assert!(size_x > 0 && size_y > 0, "board must have at least one cell");
    assert!(
        config.mines < config.total_cells(),
        "{} mines leave no safe cell on {} cells",
        config.mines,
        config.total_cells()
    );

    let mut mines: Array2<bool> = Array2::default(config.size.to_nd_index());
    let mut mines_placed: CellCount = 0;
    let mut attempts: u32 = 0;

    while mines_placed < config.mines {
        let coords: Coord2 = (rng.random_range(0..size_x), rng.random_range(0..size_y));
        attempts += 1;
        let tile = &mut mines[coords.to_nd_index()];
        if !*tile {
            *tile = true;
            mines_placed += 1;
        }
    }
    log::trace!(
        "Placed {} mines in {} attempts",
        mines_placed,
        attempts
    );

    Board::from_mine_mask(&mines)
}
