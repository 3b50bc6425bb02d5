//! JavaScript-facing wrapper around [`GameState`] and [`SearchEngine`].

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::ai::{SearchConfig, SearchEngine};
use crate::board::Board;
use crate::game::GameState;
use crate::types::{Player, Position};

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsError::new(&err.to_string()))
}

fn search_config(config: JsValue) -> Result<SearchConfig, JsError> {
    if config.is_undefined() || config.is_null() {
        return Ok(SearchConfig::default());
    }
    serde_wasm_bindgen::from_value(config).map_err(|err| JsError::new(&err.to_string()))
}

#[wasm_bindgen]
pub struct WasmGame {
    state: GameState,
}

#[wasm_bindgen]
impl WasmGame {
    /// Standard opening, black to move.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            state: GameState::standard(),
        }
    }

    /// Opening block at a seeded random spot, black to move.
    pub fn with_seed(seed: u64) -> Self {
        let board = Board::random_start(&mut StdRng::seed_from_u64(seed));
        Self {
            state: GameState::new(board, Player::Black),
        }
    }

    /// 64 row-major cells (0=empty, 1=black, 2=white, 3=mark) and the side to move.
    pub fn from_cells(cells: Vec<u8>, player: u8) -> Result<WasmGame, JsError> {
        let board = Board::from_cells(&cells)?;
        let player = Player::try_from(player)?;
        Ok(Self {
            state: GameState::new(board, player),
        })
    }

    /// Plays at `row`/`col`. Illegal moves are ignored.
    /// Returns 1 or 2 for the side to move next, 0 once the game is over.
    pub fn next_turn(&mut self, row: i32, col: i32) -> Result<u8, JsError> {
        let mv = Position::new(row, col)?;
        Ok(self.state.next_turn(mv).code())
    }

    /// Plays a move given as text such as `"d3"`, rejecting illegal moves.
    pub fn play(&mut self, notation: &str) -> Result<u8, JsError> {
        let mv: Position = notation.parse()?;
        Ok(self.state.try_next_turn(mv)?.code())
    }

    pub fn pass(&mut self) -> u8 {
        self.state.pass().code()
    }

    /// Lets the engine play for the side to move.
    ///
    /// `config` follows `SearchConfig` (`depth`, `heuristic`, `pruning`,
    /// `timeout_ms`); `undefined` uses the defaults. Returns the chosen
    /// position, or `null` when the side to move had to pass.
    pub fn ai_move(&mut self, config: JsValue) -> Result<JsValue, JsError> {
        let config = search_config(config)?;
        let mut engine = SearchEngine::from_config(self.state.current_player(), &config);

        let mv = engine.choose_move_for_state(&self.state);
        match mv {
            Some(mv) => {
                self.state.try_next_turn(mv)?;
            }
            None => {
                self.state.pass();
            }
        }
        to_js(&mv)
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        to_js(&self.state.to_snapshot())
    }

    pub fn legal_moves(&self) -> Result<JsValue, JsError> {
        to_js(self.state.current_legal_moves())
    }

    pub fn result(&self) -> Result<JsValue, JsError> {
        to_js(&self.state.to_game_result())
    }

    /// `[black, white]` disc counts.
    pub fn score(&self) -> Vec<u32> {
        let score = self.state.score();
        vec![score.black, score.white]
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn render(&self) -> String {
        self.state.render()
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use js_sys::Reflect;
    use wasm_bindgen_test::*;

    fn field(value: &JsValue, name: &str) -> JsValue {
        Reflect::get(value, &JsValue::from_str(name)).expect("field must exist")
    }

    #[wasm_bindgen_test]
    fn state_snapshot_exposes_counts_and_turn() {
        let mut game = WasmGame::new();
        assert_eq!(game.next_turn(2, 4).unwrap(), 2);

        let state = game.state().unwrap();

        assert_eq!(field(&state, "current_player").as_f64(), Some(2.0));
        assert_eq!(field(&state, "black_count").as_f64(), Some(4.0));
        assert_eq!(field(&state, "is_game_over").as_bool(), Some(false));
    }

    #[wasm_bindgen_test]
    fn notation_move_rejects_illegal_square() {
        let mut game = WasmGame::new();

        assert!(game.play("a1").is_err());
        assert_eq!(game.play("e3").unwrap(), 2);
    }

    #[wasm_bindgen_test]
    fn ai_move_reads_config_object() {
        let mut game = WasmGame::new();
        let config = js_sys::Object::new();
        Reflect::set(&config, &"depth".into(), &JsValue::from(2)).unwrap();
        Reflect::set(&config, &"heuristic".into(), &"edges".into()).unwrap();

        let mv = game.ai_move(config.into()).unwrap();

        assert!(!mv.is_null());
        assert_eq!(game.score().iter().sum::<u32>(), 5);
    }

    #[wasm_bindgen_test]
    fn from_cells_rejects_bad_player() {
        let cells = Board::standard_start().to_array().to_vec();

        assert!(WasmGame::from_cells(cells.clone(), 3).is_err());
        assert!(WasmGame::from_cells(cells, 2).is_ok());
    }
}
