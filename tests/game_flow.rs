//! Whole-game scenarios driven through the public API.

use othello::{Board, Cell, GameState, Heuristic, Player, Position, SearchEngine, Turn};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn pos(row: u8, col: u8) -> Position {
    Position { row, col }
}

#[test]
fn black_opening_capture_hands_turn_to_white() {
    let mut game = GameState::new(Board::standard_start(), Player::Black);

    let turn = game.next_turn("E3".parse().unwrap());

    assert_eq!(turn, Turn::Next(Player::White));
    assert_eq!(turn.code(), 2);
    let board = game.board();
    for black in [pos(2, 4), pos(3, 3), pos(3, 4), pos(4, 4)] {
        assert_eq!(board.cell(black), Cell::Black);
    }
    assert_eq!(board.cell(pos(4, 3)), Cell::White);
    assert_eq!(board.count(Cell::White), 1);
}

#[test]
fn opponent_without_reply_keeps_turn_with_mover() {
    let mut board = Board::empty();
    board.set_cell(pos(0, 0), Cell::Black);
    board.set_cell(pos(0, 1), Cell::White);
    board.set_cell(pos(7, 0), Cell::Black);
    board.set_cell(pos(7, 1), Cell::White);
    let mut game = GameState::new(board, Player::Black);

    let turn = game.next_turn(pos(0, 2));

    assert_eq!(turn, Turn::Next(Player::Black));
    assert!(game.is_pass());
    assert!(game.legal_moves(Player::White).is_empty());
    assert_eq!(game.current_legal_moves(), &[pos(7, 2)]);
}

#[test]
fn filling_the_board_finishes_the_game() {
    let mut cells = [Cell::White.number(); 64];
    cells[0] = Cell::Empty.number();
    cells[2] = Cell::Black.number();
    let mut game = GameState::new(Board::from_cells(&cells).unwrap(), Player::Black);
    assert!(!game.is_finished());

    let turn = game.next_turn(pos(0, 0));

    assert_eq!(turn.code(), 0);
    assert!(game.is_finished());
    let score = game.score();
    assert_eq!((score.black, score.white), (3, 61));
    assert_eq!(score.total(), 64);
    assert_eq!(game.to_game_result().winner, 2);
}

#[test]
fn finished_iff_full_or_both_sides_stuck() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut game = GameState::new(Board::random_start(&mut rng), Player::Black);
    let mut black = SearchEngine::new(Player::Black, 1, Heuristic::Edges);
    let mut white = SearchEngine::new(Player::White, 1, Heuristic::Material);

    while !game.is_finished() {
        let board = game.board();
        let stuck = game.legal_moves(Player::Black).is_empty()
            && game.legal_moves(Player::White).is_empty();
        assert!(!board.is_full() && !stuck);

        let engine = match game.current_player() {
            Player::Black => &mut black,
            Player::White => &mut white,
        };
        match engine.choose_move_for_state(&game) {
            Some(mv) => {
                game.next_turn(mv);
            }
            None => {
                game.pass();
            }
        }
    }

    let board = game.board();
    assert!(
        board.is_full()
            || (game.legal_moves(Player::Black).is_empty()
                && game.legal_moves(Player::White).is_empty())
    );
}

#[test]
fn engine_battle_runs_to_completion() {
    let mut game = GameState::standard();
    let mut black = SearchEngine::new(Player::Black, 2, Heuristic::Edges);
    let mut white = SearchEngine::new(Player::White, 2, Heuristic::Inverted);
    let mut plies = 0;

    while game.turn() != Turn::Finished {
        let engine = if game.current_player() == black.player() {
            &mut black
        } else {
            &mut white
        };
        match engine.choose_move_for_state(&game) {
            Some(mv) => {
                assert!(game.current_legal_moves().contains(&mv));
                game.next_turn(mv);
            }
            None => {
                game.pass();
            }
        }
        plies += 1;
        assert!(plies <= 120, "game did not terminate");
    }

    let score = game.score();
    assert!(score.total() <= 64);
    assert_eq!(score.total() + game.board().count(Cell::Empty), 64);
}

#[test]
fn replaying_the_same_battle_gives_the_same_game() {
    let play = || {
        let mut game = GameState::new(
            Board::random_start(&mut StdRng::seed_from_u64(2024)),
            Player::Black,
        );
        let mut engines = [
            SearchEngine::new(Player::Black, 2, Heuristic::Material),
            SearchEngine::new(Player::White, 2, Heuristic::Edges),
        ];
        let mut moves = Vec::new();
        while !game.is_finished() {
            let idx = (game.current_player().number() - 1) as usize;
            match engines[idx].choose_move_for_state(&game) {
                Some(mv) => {
                    moves.push(mv);
                    game.next_turn(mv);
                }
                None => {
                    game.pass();
                }
            }
        }
        (moves, game.score())
    };

    assert_eq!(play(), play());
}
