//! Minesweeper game-state engine: mine placement, flood-fill reveal, flagging, win/loss detection, and timing.

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use clock::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod board;
mod cell;
mod clock;
mod engine;
mod error;
mod generator;
mod types;

/// Dimensions and mine count of a randomly mined game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let (width, height) = size;
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyBoard { width, height }.into());
        }

        let capacity = mult(width, height);
        if mines > capacity {
            return Err(ConfigError::TooManyMines {
                requested: mines,
                capacity,
            }
            .into());
        }

        Ok(Self { size, mines })
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}
