use thiserror::Error;

use crate::types::Position;

/// Errors surfaced by the board, game and notation APIs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OthelloError {
    /// A coordinate outside the 8x8 grid.
    #[error("position ({row}, {col}) is outside the board")]
    OutOfBounds { row: i32, col: i32 },

    /// The move is not in the current player's legal-move set.
    #[error("illegal move at {0}")]
    InvalidMove(Position),

    /// Numeric player identity other than 1 (black) or 2 (white).
    #[error("invalid player value: {0}")]
    InvalidPlayer(u8),

    /// Move text that is not a column letter A-H followed by a row digit 1-8.
    #[error("invalid move notation: {0:?}")]
    InvalidNotation(String),

    /// A raw cell array that cannot be turned into a board.
    #[error("invalid board: {0}")]
    InvalidBoard(String),

    #[error("game is already over")]
    GameOver,
}

pub type Result<T> = std::result::Result<T, OthelloError>;
