use crate::*;
pub use random::*;

mod random;

/// Chooses where the mines of a new game go.
pub trait MineGenerator {
    /// Returns exactly `config.mines` distinct coordinates inside `config.size`.
    fn generate(&mut self, config: GameConfig) -> Vec<Coord2>;
}
