use std::fmt;

use once_cell::sync::Lazy;
use rand::Rng;

use crate::error::{OthelloError, Result};
use crate::types::{BOARD_SIZE, Direction, NUM_SQUARES, Player, Position, Score};

/// The four corner squares, row-major.
pub(crate) static CORNERS: Lazy<Vec<Position>> = Lazy::new(|| {
    (0..NUM_SQUARES)
        .map(Position::from_index)
        .filter(|pos| pos.is_corner())
        .collect()
});

/// Border squares excluding the corners, row-major.
pub(crate) static EDGES: Lazy<Vec<Position>> = Lazy::new(|| {
    (0..NUM_SQUARES)
        .map(Position::from_index)
        .filter(|pos| pos.is_edge())
        .collect()
});

/// State of a single square.
///
/// `PossibleMove` is a display annotation only; it is never material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty = 0,
    Black = 1,
    White = 2,
    PossibleMove = 3,
}

impl Cell {
    /// Unknown numbers map to `Empty`.
    pub fn from_number(value: u8) -> Self {
        match value {
            1 => Self::Black,
            2 => Self::White,
            3 => Self::PossibleMove,
            _ => Self::Empty,
        }
    }

    pub fn number(self) -> u8 {
        self as u8
    }

    /// Two-column glyph used by the text grid.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Empty => "  ",
            Self::Black => "⚫",
            Self::White => "⚪",
            Self::PossibleMove => "🔹",
        }
    }

    /// True for squares a disc may be placed on.
    pub fn is_vacant(self) -> bool {
        matches!(self, Self::Empty | Self::PossibleMove)
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::Black => Self::Black,
            Player::White => Self::White,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

/// 8x8 grid stored as a flat row-major array, so copies are a plain memcpy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; NUM_SQUARES],
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [Cell::Empty; NUM_SQUARES],
        }
    }

    /// Opening position: d4=black, e4=white, d5=white, e5=black.
    pub fn standard_start() -> Self {
        let mut board = Self::empty();
        board.place_opening_block(3, 3);
        board
    }

    /// Opening block of four discs at a random spot anywhere on the board.
    ///
    /// The block's top-left square is drawn from rows and columns 0..7, with
    /// black on the block's main diagonal like the standard opening.
    pub fn random_start<R: Rng>(rng: &mut R) -> Self {
        let row = rng.random_range(0..BOARD_SIZE as u8 - 1);
        let col = rng.random_range(0..BOARD_SIZE as u8 - 1);
        let mut board = Self::empty();
        board.place_opening_block(row, col);
        board
    }

    /// Builds a board from 64 row-major cell numbers (0..=3).
    pub fn from_cells(cells: &[u8]) -> Result<Self> {
        if cells.len() != NUM_SQUARES {
            return Err(OthelloError::InvalidBoard(format!(
                "expected {NUM_SQUARES} cells, got {}",
                cells.len()
            )));
        }

        let mut board = Self::empty();
        for (idx, &value) in cells.iter().enumerate() {
            if value > Cell::PossibleMove.number() {
                return Err(OthelloError::InvalidBoard(format!(
                    "cell {idx} has unknown value {value}"
                )));
            }
            board.cells[idx] = Cell::from_number(value);
        }
        Ok(board)
    }

    /// Converts board to `[u8; 64]` using the cell numbering.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        self.cells.map(Cell::number)
    }

    pub fn cell(&self, pos: Position) -> Cell {
        self.cells[pos.index()]
    }

    pub fn set_cell(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.index()] = cell;
    }

    /// Bounds-checked read for coordinates from outside the core.
    pub fn try_cell(&self, row: i32, col: i32) -> Result<Cell> {
        Position::new(row, col).map(|pos| self.cell(pos))
    }

    /// Bounds-checked write for coordinates from outside the core.
    pub fn try_set_cell(&mut self, row: i32, col: i32, cell: Cell) -> Result<()> {
        let pos = Position::new(row, col)?;
        self.set_cell(pos, cell);
        Ok(())
    }

    /// Squares met walking from `pos` along `dir`, excluding `pos` itself,
    /// until the walk leaves the board.
    pub fn trace_line(&self, pos: Position, dir: Direction) -> Line<'_> {
        Line {
            board: self,
            next: pos.step(dir),
            dir,
        }
    }

    /// Replaces every `PossibleMove` annotation with `Empty`.
    pub fn clear_transient_marks(&mut self) {
        for cell in &mut self.cells {
            if *cell == Cell::PossibleMove {
                *cell = Cell::Empty;
            }
        }
    }

    pub fn count(&self, cell: Cell) -> u32 {
        self.cells.iter().filter(|&&c| c == cell).count() as u32
    }

    pub fn score(&self) -> Score {
        Score {
            black: self.count(Cell::Black),
            white: self.count(Cell::White),
        }
    }

    /// No square is left to play on.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_vacant())
    }

    /// Counts of black and white discs on `squares`.
    pub(crate) fn count_on(&self, squares: &[Position]) -> (u32, u32) {
        squares
            .iter()
            .fold((0, 0), |(black, white), &pos| match self.cell(pos) {
                Cell::Black => (black + 1, white),
                Cell::White => (black, white + 1),
                _ => (black, white),
            })
    }

    fn place_opening_block(&mut self, row: u8, col: u8) {
        self.set_cell(Position { row, col }, Cell::Black);
        self.set_cell(Position { row: row + 1, col: col + 1 }, Cell::Black);
        self.set_cell(Position { row, col: col + 1 }, Cell::White);
        self.set_cell(Position { row: row + 1, col }, Cell::White);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard_start()
    }
}

/// Renders the grid with an `A`..`H` header and 1-based row labels.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "    A  B  C  D  E  F  G  H")?;
        for (row, cells) in self.cells.chunks(BOARD_SIZE).enumerate() {
            write!(f, "{} |", row + 1)?;
            for cell in cells {
                write!(f, "{cell}|")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Single-use walk produced by [`Board::trace_line`].
pub struct Line<'a> {
    board: &'a Board,
    next: Option<Position>,
    dir: Direction,
}

impl Iterator for Line<'_> {
    type Item = (Cell, Position);

    fn next(&mut self) -> Option<Self::Item> {
        let pos = self.next?;
        self.next = pos.step(self.dir);
        Some((self.board.cell(pos), pos))
    }
}
