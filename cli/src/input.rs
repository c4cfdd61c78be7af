//! Parsing of the strings typed at the prompts.

use minefield_core::{
    CellCount, Coord, Coord2, GameConfig, GameError, MAX_MINE_PERCENT, MAX_SIZE, MIN_SIZE,
};
use thiserror::Error;

/// Row labels, one letter per row of the largest board.
pub const ROW_LABELS: [char; MAX_SIZE as usize] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J'];

/// Recoverable input problems. Each one is shown to the player and the prompt repeats.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid Input")]
    InvalidNumber,
    #[error("Incorrect input.")]
    InvalidCoordinateFormat,
    #[error("{}", describe(.0))]
    Game(#[from] GameError),
}

fn describe(err: &GameError) -> String {
    match *err {
        GameError::InvalidSize(size) if size < MIN_SIZE => {
            format!("Minimum size of grid is {MIN_SIZE}.")
        }
        GameError::InvalidSize(_) => format!("Maximum size of grid is {MAX_SIZE}."),
        GameError::InvalidMineCount { mines: 0, .. } => "There must be at least 1 mine.".into(),
        GameError::InvalidMineCount { .. } => {
            format!("Maximum number is {MAX_MINE_PERCENT}% of total squares.")
        }
        GameError::InvalidCoords => "Invalid coordinates".into(),
        GameError::AlreadyUncovered => "This field is already uncovered".into(),
        GameError::AlreadyEnded => "The game is already over".into(),
        GameError::InvalidBoardShape | GameError::InvalidBoardContent => err.to_string(),
    }
}

fn parse_integer(input: &str) -> Result<i64, InputError> {
    input
        .trim()
        .parse()
        .map_err(|_| InputError::InvalidNumber)
}

/// Parses a grid side, out of range values saturate so they report the nearest bound.
pub fn parse_size(input: &str) -> Result<Coord, InputError> {
    let value = parse_integer(input)?.clamp(0, Coord::MAX.into()) as Coord;
    Ok(GameConfig::validate_size(value)?)
}

pub fn parse_mines(input: &str, size: Coord) -> Result<GameConfig, InputError> {
    let value = parse_integer(input)?.clamp(0, CellCount::MAX.into()) as CellCount;
    Ok(GameConfig::new(size, value)?)
}

pub fn row_label(row: Coord) -> char {
    ROW_LABELS.get(usize::from(row)).copied().unwrap_or('?')
}

/// Parses `A1`-style coordinates into a 0-based `(row, col)`.
///
/// Columns above `total_cells` are a format error. Tighter bounds against the current board are left to the reveal
/// itself.
pub fn parse_coords(input: &str, total_cells: CellCount) -> Result<Coord2, InputError> {
    let input = input.trim();
    if !(2..=3).contains(&input.len()) {
        return Err(InputError::InvalidCoordinateFormat);
    }

    let mut chars = input.chars();
    let letter = chars
        .next()
        .ok_or(InputError::InvalidCoordinateFormat)?
        .to_ascii_uppercase();
    let row = ROW_LABELS
        .iter()
        .position(|&label| label == letter)
        .ok_or(InputError::InvalidCoordinateFormat)? as Coord;

    let column: CellCount = chars
        .as_str()
        .parse()
        .map_err(|_| InputError::InvalidCoordinateFormat)?;
    if column == 0 || column > total_cells {
        return Err(InputError::InvalidCoordinateFormat);
    }
    let column = Coord::try_from(column - 1).map_err(|_| InputError::InvalidCoordinateFormat)?;

    Ok((row, column))
}
