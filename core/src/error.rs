use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Grid size {0} is outside the allowed range")]
    InvalidSize(Coord),
    #[error("Mine count {mines} is outside the allowed range 1..={max}")]
    InvalidMineCount { mines: CellCount, max: CellCount },
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Cell contents do not match the mine layout")]
    InvalidBoardContent,
    #[error("Cell is already uncovered")]
    AlreadyUncovered,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
