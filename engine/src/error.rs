use std::fmt;

use crate::mark::Mark;

/// Why a move was refused by [`crate::GameState::apply_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    OutOfBounds,
    Occupied,
    NotAdjacent,
    GameOver,
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MoveRejection::OutOfBounds => "cell is outside the grid",
            MoveRejection::Occupied => "cell is already marked",
            MoveRejection::NotAdjacent => "cell is not next to any marked cell",
            MoveRejection::GameOver => "game is already over",
        };
        f.write_str(text)
    }
}

/// Errors raised by grid and state construction, move application and search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("dimension must be at least 3, got {0}")]
    InvalidDimension(usize),

    #[error("invalid grid size: expected {expected} cells, got {actual}")]
    InvalidSize { expected: usize, actual: usize },

    #[error("invalid cell value {0:?}: expected 'X', 'O' or ' '")]
    InvalidCellValue(char),

    #[error("run length must be between 3 and {dimension}, got {run_length}")]
    InvalidRunLength { run_length: usize, dimension: usize },

    #[error("invalid game state: {0}")]
    InvalidGameState(String),

    #[error("invalid move to cell {position}: {reason}")]
    InvalidMove {
        position: usize,
        reason: MoveRejection,
    },

    #[error("no legal moves available")]
    NoLegalMoves,

    #[error("it is {expected}'s turn, not {actual}'s")]
    WrongTurn { expected: Mark, actual: Mark },

    #[error("invalid cell notation {0:?}")]
    InvalidNotation(String),

    #[error("failed to read input: {0}")]
    Input(String),
}

impl GameError {
    /// Move and input errors can be retried by an interactive caller;
    /// everything else means the state itself is unusable.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GameError::InvalidMove { .. } | GameError::InvalidNotation(_)
        )
    }
}
