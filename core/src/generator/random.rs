use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Uniform generation by rejection sampling, reproducible for a given seed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> Board {
        log::debug!("Generating {:?} with seed {}", config, self.seed);
        let mut rng = SmallRng::seed_from_u64(self.seed);
        generate_with(&mut rng, config)
    }
}

/// Generates a covered board drawing mines from `rng`.
pub fn generate_with<R: Rng>(rng: &mut R, config: GameConfig) -> Board {
    let mine_mask = place_mines(rng, config);
    let board = Board::from_mine_mask(config.dimensions(), &mine_mask);

    // double check mine count
    if board.mine_count() != config.mines {
        log::warn!(
            "Generated minefield count mismatch, actual: {}, requested: {}",
            board.mine_count(),
            config.mines
        );
    }
    board
}

/// Draws uniformly random cells, redrawing any that already hold a mine, until `config.mines` distinct mines are
/// placed.
pub fn place_mines<R: Rng>(rng: &mut R, config: GameConfig) -> Array2<bool> {
    let (rows, cols) = config.dimensions();
    let mut mine_mask: Array2<bool> = Array2::default(config.dimensions().to_nd_index());

    let total_cells = config.total_cells();
    if total_cells == 0 {
        log::warn!("Empty minefield requested, no mines placed");
        return mine_mask;
    }

    let target = if config.mines > total_cells {
        log::warn!(
            "Minefield already full, requested {} but only fits {}",
            config.mines,
            total_cells
        );
        total_cells
    } else {
        config.mines
    };

    let mut placed: CellCount = 0;
    let mut redraws: u32 = 0;
    while placed < target {
        let coords: Coord2 = (rng.random_range(0..rows), rng.random_range(0..cols));
        let cell = &mut mine_mask[coords.to_nd_index()];
        if *cell {
            redraws += 1;
            continue;
        }
        *cell = true;
        placed += 1;
    }
    log::debug!("Placed {} mines with {} redraws", placed, redraws);

    mine_mask
}
