use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Continue -> Continue
/// - Continue -> Win
/// - Continue -> Loss
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Initial state, safe cells remain covered
    Continue,
    /// Every safe cell is uncovered
    Win,
    /// A mine was uncovered
    Loss,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Win | Self::Loss)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Continue
    }
}

/// A single-player session: one board played from start to a terminal state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GameParts", into = "GameParts")]
pub struct Game {
    board: Board,
    state: GameState,
    triggered_mine: Option<Coord2>,
}

impl Game {
    pub fn new(board: Board) -> Self {
        let state = board.evaluate();
        Self {
            board,
            state,
            triggered_mine: None,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.board.mine_count()
    }

    pub fn view_at(&self, coords: Coord2) -> CellView {
        self.board.view_at(coords)
    }

    /// The mine that ended the game, if it was lost.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        self.check_not_finished()?;

        let outcome = self.board.reveal(coords)?;
        let next_state = if outcome.is_mine_hit() {
            self.triggered_mine = Some(coords);
            GameState::Loss
        } else {
            self.board.evaluate()
        };

        if next_state != self.state {
            log::debug!("Game state {:?} -> {:?}", self.state, next_state);
        }
        self.state = next_state;

        Ok(outcome)
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

/// Serialized form of a [`Game`], the state is derived again from the board.
#[derive(Serialize, Deserialize)]
#[serde(rename = "Game")]
struct GameParts {
    board: Board,
    triggered_mine: Option<Coord2>,
}

impl From<Game> for GameParts {
    fn from(game: Game) -> Self {
        Self {
            board: game.board,
            triggered_mine: game.triggered_mine,
        }
    }
}

impl TryFrom<GameParts> for Game {
    type Error = GameError;

    fn try_from(parts: GameParts) -> Result<Self> {
        let GameParts {
            board,
            triggered_mine,
        } = parts;
        let state = board.evaluate();

        if let Some(coords) = triggered_mine {
            let coords = board.validate_coords(coords)?;
            if !board.cell_at(coords).is_mine() || state != GameState::Loss {
                return Err(GameError::InvalidBoardContent);
            }
        }

        Ok(Self {
            board,
            state,
            triggered_mine,
        })
    }
}
