use log::warn;

use crate::board::{Board, CORNERS, Cell, EDGES};
use crate::error::{OthelloError, Result};
use crate::rules;
use crate::types::{GameResult, GameSnapshot, Player, Position, Score, Turn};

/// A board plus the side to move.
///
/// The board held here never carries `PossibleMove` annotations; the legal
/// moves of the side to move are cached next to it and overlaid only when
/// the position is rendered or snapshotted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    is_game_over: bool,
    legal: Vec<Position>,
    /// `true` when the last move left the opponent without a reply.
    is_pass: bool,
    flipped: Vec<Position>,
}

impl GameState {
    /// Wraps `board` with `player` to move. Annotations on `board` are dropped.
    pub fn new(mut board: Board, player: Player) -> Self {
        board.clear_transient_marks();
        let mut state = Self {
            board,
            current_player: player,
            is_game_over: false,
            legal: Vec::new(),
            is_pass: false,
            flipped: Vec::new(),
        };
        state.is_game_over = state.compute_game_over();
        state.refresh_legal_moves();
        state
    }

    /// Standard opening, black to move.
    pub fn standard() -> Self {
        Self::new(Board::standard_start(), Player::Black)
    }

    /// Plays `mv` for the side to move and advances the turn.
    ///
    /// A move outside the current legal-move set changes nothing and the
    /// current turn is returned unchanged.
    pub fn next_turn(&mut self, mv: Position) -> Turn {
        match self.try_next_turn(mv) {
            Ok(turn) => turn,
            Err(err) => {
                warn!("ignoring move {mv}: {err}");
                self.turn()
            }
        }
    }

    /// Like [`GameState::next_turn`], but reports moves that cannot be played.
    pub fn try_next_turn(&mut self, mv: Position) -> Result<Turn> {
        if self.is_game_over {
            return Err(OthelloError::GameOver);
        }
        if !mv.is_valid() {
            return Err(OthelloError::OutOfBounds {
                row: mv.row as i32,
                col: mv.col as i32,
            });
        }
        if !self.legal.contains(&mv) {
            return Err(OthelloError::InvalidMove(mv));
        }

        let player = self.current_player;
        let flipped = rules::flips_for(&self.board, player, mv);
        let count = rules::apply_move(&mut self.board, player, mv);
        debug_assert_eq!(count, flipped.len());
        self.flipped = flipped;

        self.advance();
        Ok(self.turn())
    }

    /// Hands the turn to the opponent when the side to move has no legal
    /// move. Does nothing otherwise.
    pub fn pass(&mut self) -> Turn {
        if !self.is_game_over && self.legal.is_empty() {
            self.current_player = self.current_player.opponent();
            self.flipped.clear();
            self.refresh_legal_moves();
        }
        self.turn()
    }

    pub fn turn(&self) -> Turn {
        if self.is_game_over {
            Turn::Finished
        } else {
            Turn::Next(self.current_player)
        }
    }

    /// Legal moves for `player` on the current board, row-major.
    pub fn legal_moves(&self, player: Player) -> Vec<Position> {
        if player == self.current_player && !self.is_game_over {
            self.legal.clone()
        } else {
            rules::legal_moves(&self.board, player)
        }
    }

    /// Legal moves of the side to move; empty once the game is over.
    pub fn current_legal_moves(&self) -> &[Position] {
        &self.legal
    }

    /// Board full, or neither side can move.
    pub fn is_finished(&self) -> bool {
        self.is_game_over
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn is_pass(&self) -> bool {
        self.is_pass
    }

    /// Discs flipped by the last move.
    pub fn flipped(&self) -> &[Position] {
        &self.flipped
    }

    pub fn score(&self) -> Score {
        self.board.score()
    }

    /// Side with more discs, `None` on equal counts.
    pub fn winner(&self) -> Option<Player> {
        let margin = self.score().margin();
        if margin > 0 {
            Some(Player::Black)
        } else if margin < 0 {
            Some(Player::White)
        } else {
            None
        }
    }

    /// `(black, white)` discs on the four corners.
    pub fn corner_counts(&self) -> (u32, u32) {
        self.board.count_on(&CORNERS)
    }

    /// `(black, white)` discs on border squares other than corners.
    pub fn edge_counts(&self) -> (u32, u32) {
        self.board.count_on(&EDGES)
    }

    /// Copy of the board with the side to move's legal moves marked.
    pub fn marked_board(&self) -> Board {
        let mut board = self.board;
        for &mv in &self.legal {
            board.set_cell(mv, Cell::PossibleMove);
        }
        board
    }

    /// Text grid with legal moves marked.
    pub fn render(&self) -> String {
        self.marked_board().to_string()
    }

    pub fn to_snapshot(&self) -> GameSnapshot {
        let score = self.score();
        GameSnapshot {
            board: self.marked_board().to_array().to_vec(),
            current_player: self.current_player.number(),
            black_count: score.black,
            white_count: score.white,
            is_game_over: self.is_game_over,
            is_pass: self.is_pass,
            flipped: self.flipped.iter().map(|p| p.index() as u8).collect(),
            legal_moves: self.legal.clone(),
        }
    }

    pub fn to_game_result(&self) -> GameResult {
        let score = self.score();
        GameResult {
            winner: self.winner().map_or(0, Player::number),
            black_count: score.black,
            white_count: score.white,
        }
    }

    /// Opponent moves next if it can; otherwise the mover keeps the turn,
    /// unless neither side can move or the board is full.
    fn advance(&mut self) {
        let mover = self.current_player;
        let opponent = mover.opponent();
        self.is_pass = false;

        if self.board.is_full() {
            self.is_game_over = true;
        } else if rules::has_legal_move(&self.board, opponent) {
            self.current_player = opponent;
        } else if rules::has_legal_move(&self.board, mover) {
            self.is_pass = true;
        } else {
            self.is_game_over = true;
        }

        self.refresh_legal_moves();
    }

    fn compute_game_over(&self) -> bool {
        self.board.is_full()
            || (!rules::has_legal_move(&self.board, Player::Black)
                && !rules::has_legal_move(&self.board, Player::White))
    }

    fn refresh_legal_moves(&mut self) {
        self.legal = if self.is_game_over {
            Vec::new()
        } else {
            rules::legal_moves(&self.board, self.current_player)
        };
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::standard()
    }
}
