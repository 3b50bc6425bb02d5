//! Othello capture rule: legal-move generation and flipping.

use crate::board::{Board, Cell, Line};
use crate::types::{DIRECTIONS, NUM_SQUARES, Player, Position};

/// Legal moves for `player` in row-major order.
///
/// A vacant square is legal when some direction from it crosses one or more
/// opponent discs and then lands on one of `player`'s discs.
pub fn legal_moves(board: &Board, player: Player) -> Vec<Position> {
    let opponent = Cell::from(player.opponent());

    (0..NUM_SQUARES)
        .map(Position::from_index)
        .filter(|&pos| board.cell(pos).is_vacant())
        // Only squares touching an opponent disc can capture anything.
        .filter(|&pos| {
            DIRECTIONS
                .iter()
                .any(|&dir| pos.step(dir).is_some_and(|n| board.cell(n) == opponent))
        })
        .filter(|&pos| is_legal(board, player, pos))
        .collect()
}

pub fn has_legal_move(board: &Board, player: Player) -> bool {
    (0..NUM_SQUARES)
        .map(Position::from_index)
        .any(|pos| is_legal(board, player, pos))
}

pub fn is_legal(board: &Board, player: Player, pos: Position) -> bool {
    board.cell(pos).is_vacant()
        && DIRECTIONS
            .iter()
            .any(|&dir| capture_run(board.trace_line(pos, dir), player) > 0)
}

/// Squares that playing `pos` would flip, grouped by direction in
/// [`DIRECTIONS`] order. Empty when the move captures nothing.
pub fn flips_for(board: &Board, player: Player, pos: Position) -> Vec<Position> {
    if !board.cell(pos).is_vacant() {
        return Vec::new();
    }

    DIRECTIONS
        .iter()
        .flat_map(|&dir| {
            let run = capture_run(board.trace_line(pos, dir), player);
            board.trace_line(pos, dir).take(run).map(|(_, p)| p)
        })
        .collect()
}

/// Places a disc for `player` on `pos` and flips every bracketed run.
///
/// Returns the number of discs flipped. A move that captures nothing
/// leaves the board untouched and returns 0.
pub fn apply_move(board: &mut Board, player: Player, pos: Position) -> usize {
    let flips = flips_for(board, player, pos);
    if flips.is_empty() {
        return 0;
    }

    let own = Cell::from(player);
    board.set_cell(pos, own);
    for &square in &flips {
        board.set_cell(square, own);
    }
    flips.len()
}

/// Length of the leading run of opponent discs on `line`, or 0 unless the
/// run is non-empty and closed by one of `player`'s discs.
fn capture_run(line: Line<'_>, player: Player) -> usize {
    let own = Cell::from(player);
    let opponent = Cell::from(player.opponent());
    let mut run = 0;

    for (cell, _) in line {
        if cell == opponent {
            run += 1;
        } else if cell == own {
            return run;
        } else {
            return 0;
        }
    }

    0
}
