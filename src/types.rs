use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{OthelloError, Result};

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// One of the two sides. The discriminants match the cell numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Player {
    Black = 1,
    White = 2,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    pub fn number(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Player {
    type Error = OthelloError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Self::Black),
            2 => Ok(Self::White),
            other => Err(OthelloError::InvalidPlayer(other)),
        }
    }
}

/// A board coordinate, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    /// Checked constructor for coordinates coming from outside the core.
    pub fn new(row: i32, col: i32) -> Result<Self> {
        if in_bounds(row, col) {
            Ok(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            Err(OthelloError::OutOfBounds { row, col })
        }
    }

    /// Position for a row-major square index (0..=63).
    pub fn from_index(idx: usize) -> Self {
        debug_assert!(idx < NUM_SQUARES, "square index out of range: {idx}");
        Self {
            row: (idx / BOARD_SIZE) as u8,
            col: (idx % BOARD_SIZE) as u8,
        }
    }

    pub fn index(self) -> usize {
        debug_assert!(self.is_valid(), "position out of range: {self:?}");
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    pub fn is_valid(self) -> bool {
        (self.row as usize) < BOARD_SIZE && (self.col as usize) < BOARD_SIZE
    }

    /// Next square one step along `dir`, if still on the board.
    pub fn step(self, dir: Direction) -> Option<Self> {
        let row = self.row as i32 + dir.dr as i32;
        let col = self.col as i32 + dir.dc as i32;
        Self::new(row, col).ok()
    }

    pub fn is_corner(self) -> bool {
        let last = (BOARD_SIZE - 1) as u8;
        (self.row == 0 || self.row == last) && (self.col == 0 || self.col == last)
    }

    /// Border square that is not a corner.
    pub fn is_edge(self) -> bool {
        let last = (BOARD_SIZE - 1) as u8;
        let on_border = self.row == 0 || self.row == last || self.col == 0 || self.col == last;
        on_border && !self.is_corner()
    }
}

/// Parses move text such as `d3`: column letter A-H, then row digit 1-8.
impl FromStr for Position {
    type Err = OthelloError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || OthelloError::InvalidNotation(s.to_string());
        let mut chars = s.trim().chars();
        let (Some(col), Some(row), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };

        let col = col.to_ascii_uppercase();
        if !('A'..='H').contains(&col) || !('1'..='8').contains(&row) {
            return Err(invalid());
        }

        Ok(Self {
            row: row as u8 - b'1',
            col: col as u8 - b'A',
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'A' + self.col) as char, self.row + 1)
    }
}

/// Unit step in one of the eight neighbouring directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction {
    pub dr: i8,
    pub dc: i8,
}

pub const DIRECTIONS: [Direction; 8] = [
    Direction { dr: -1, dc: -1 },
    Direction { dr: -1, dc: 0 },
    Direction { dr: -1, dc: 1 },
    Direction { dr: 0, dc: -1 },
    Direction { dr: 0, dc: 1 },
    Direction { dr: 1, dc: -1 },
    Direction { dr: 1, dc: 0 },
    Direction { dr: 1, dc: 1 },
];

/// Disc counts, derived from a board on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Score {
    pub black: u32,
    pub white: u32,
}

impl Score {
    /// Black minus white.
    pub fn margin(self) -> i32 {
        self.black as i32 - self.white as i32
    }

    pub fn total(self) -> u32 {
        self.black + self.white
    }
}

/// Who acts after a turn has been played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Next(Player),
    Finished,
}

impl Turn {
    /// Numeric form used by text clients: 1, 2, or 0 once the game is over.
    pub fn code(self) -> u8 {
        match self {
            Self::Next(player) => player.number(),
            Self::Finished => 0,
        }
    }
}

/// Serializable view of a game, handed to WASM hosts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    /// Row-major cells: 0=empty, 1=black, 2=white, 3=legal move for `current_player`.
    pub board: Vec<u8>,
    pub current_player: u8,
    pub black_count: u32,
    pub white_count: u32,
    pub is_game_over: bool,
    /// Contract:
    /// - `true` when the opponent had no reply and the mover keeps the turn.
    /// - `false` otherwise.
    pub is_pass: bool,
    /// Square indices (0..=63) flipped by the last move.
    pub flipped: Vec<u8>,
    pub legal_moves: Vec<Position>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// 1 or 2 for the side with more discs, 0 on a draw.
    pub winner: u8,
    pub black_count: u32,
    pub white_count: u32,
}

pub(crate) fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notation_parses_column_letter_then_row_digit() {
        assert_eq!("A1".parse::<Position>().unwrap(), Position { row: 0, col: 0 });
        assert_eq!("e3".parse::<Position>().unwrap(), Position { row: 2, col: 4 });
        assert_eq!(" H8 ".parse::<Position>().unwrap(), Position { row: 7, col: 7 });
    }

    #[test]
    fn notation_rejects_malformed_text() {
        for text in ["", "A", "A0", "I1", "A9", "1A", "A10"] {
            let err = text.parse::<Position>().unwrap_err();
            assert!(matches!(err, OthelloError::InvalidNotation(_)), "{text}");
        }
    }

    #[test]
    fn display_matches_notation() {
        let pos = Position { row: 5, col: 3 };
        assert_eq!(pos.to_string(), "D6");
        assert_eq!(pos.to_string().parse::<Position>().unwrap(), pos);
    }

    #[test]
    fn checked_constructor_reports_out_of_bounds() {
        assert!(Position::new(7, 7).is_ok());
        assert_eq!(
            Position::new(8, 0).unwrap_err(),
            OthelloError::OutOfBounds { row: 8, col: 0 }
        );
        assert_eq!(
            Position::new(0, -1).unwrap_err(),
            OthelloError::OutOfBounds { row: 0, col: -1 }
        );
    }

    #[test]
    fn corners_and_edges_are_disjoint() {
        let corners = (0..NUM_SQUARES)
            .map(Position::from_index)
            .filter(|p| p.is_corner())
            .count();
        let edges = (0..NUM_SQUARES)
            .map(Position::from_index)
            .filter(|p| p.is_edge())
            .count();

        assert_eq!(corners, 4);
        assert_eq!(edges, 24);
        assert!(!Position { row: 0, col: 0 }.is_edge());
    }

    #[test]
    fn player_conversion_rejects_unknown_values() {
        assert_eq!(Player::try_from(1).unwrap(), Player::Black);
        assert_eq!(Player::try_from(2).unwrap(), Player::White);
        assert_eq!(Player::try_from(0).unwrap_err(), OthelloError::InvalidPlayer(0));
        assert_eq!(Player::Black.opponent(), Player::White);
    }

    #[test]
    fn turn_codes_follow_client_convention() {
        assert_eq!(Turn::Next(Player::Black).code(), 1);
        assert_eq!(Turn::Next(Player::White).code(), 2);
        assert_eq!(Turn::Finished.code(), 0);
    }
}
