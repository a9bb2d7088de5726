use rand::rngs::SmallRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

use super::*;

/// Purely random placement: every layout with the requested mine count is equally likely.
#[derive(Clone, Debug)]
pub struct RandomMineGenerator<R = SmallRng> {
    rng: R,
}

impl<R: Rng> RandomMineGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomMineGenerator<SmallRng> {
    /// Deterministic generator, the same seed always yields the same sequence of layouts.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl Default for RandomMineGenerator<SmallRng> {
    fn default() -> Self {
        Self::new(SmallRng::from_os_rng())
    }
}

impl<R: Rng> MineGenerator for RandomMineGenerator<R> {
    fn generate(&mut self, config: GameConfig) -> Vec<Coord2> {
        let total_cells = config.total_cells() as usize;
        let mut mines = config.mines as usize;

        if mines > total_cells {
            log::warn!(
                "Minefield already full, requested {} mines but only {} fit",
                mines,
                total_cells
            );
            mines = total_cells;
        }

        let width = usize::from(config.size.0);
        // uniform sample without replacement, the prefix of a random permutation of cell indices
        index::sample(&mut self.rng, total_cells, mines)
            .into_iter()
            .map(|i| ((i % width) as Coord, (i / width) as Coord))
            .collect()
    }
}
