#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod board;
mod cell;
mod engine;
mod error;
mod generator;
mod types;

/// Smallest accepted side of the square grid.
pub const MIN_SIZE: Coord = 2;

/// Largest accepted side of the square grid, rows are labelled `A` to `J`.
pub const MAX_SIZE: Coord = 10;

/// Upper bound on mine density, in percent of the total cells.
pub const MAX_MINE_PERCENT: CellCount = 35;

/// Square board side and mine count, validated on construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ConfigParts")]
pub struct GameConfig {
    pub size: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord, mines: CellCount) -> Result<Self> {
        Self::validate_size(size)?;
        let max = Self::max_mines(size);
        if mines == 0 || mines > max {
            return Err(GameError::InvalidMineCount { mines, max });
        }
        Ok(Self::new_unchecked(size, mines))
    }

    pub fn validate_size(size: Coord) -> Result<Coord> {
        if (MIN_SIZE..=MAX_SIZE).contains(&size) {
            Ok(size)
        } else {
            Err(GameError::InvalidSize(size))
        }
    }

    /// `floor(35% of size²)`, computed in integers so that it matches `mines / cells <= 0.35` exactly.
    pub const fn max_mines(size: Coord) -> CellCount {
        (mult(size, size) as u32 * MAX_MINE_PERCENT as u32 / 100) as CellCount
    }

    pub const fn dimensions(&self) -> Coord2 {
        (self.size, self.size)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

#[derive(Deserialize)]
#[serde(rename = "GameConfig")]
struct ConfigParts {
    size: Coord,
    mines: CellCount,
}

impl TryFrom<ConfigParts> for GameConfig {
    type Error = GameError;

    fn try_from(parts: ConfigParts) -> Result<Self> {
        Self::new(parts.size, parts.mines)
    }
}

/// Result of a single successful reveal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// A numbered cell was uncovered on its own.
    AdjacentCount(u8),
    /// An empty cell was uncovered and the flood fill cascaded from it.
    FloodRevealed,
    /// A mine was uncovered, the whole board is now visible.
    MineHit,
}

impl RevealOutcome {
    /// Mines adjacent to the revealed cell as reported to the player, zero for floods and mine hits.
    pub const fn adjacent_mines(self) -> u8 {
        match self {
            Self::AdjacentCount(count) => count,
            Self::FloodRevealed | Self::MineHit => 0,
        }
    }

    pub const fn is_mine_hit(self) -> bool {
        matches!(self, Self::MineHit)
    }
}
