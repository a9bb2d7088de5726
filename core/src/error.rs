use thiserror::Error;

use crate::{CellCount, Coord, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("Mine coordinates {0:?} are outside the board")]
    InvalidCoordinate(Coord2),
    #[error("Coordinates {0:?} are outside the board")]
    IndexOutOfRange(Coord2),
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board must have at least one cell, got {width}x{height}")]
    EmptyBoard { width: Coord, height: Coord },
    #[error("too many mines, requested {requested} but only {capacity} fit")]
    TooManyMines {
        requested: CellCount,
        capacity: CellCount,
    },
}

pub type Result<T> = core::result::Result<T, GameError>;
