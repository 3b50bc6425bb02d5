use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod error;
pub mod game;
pub mod rules;
pub mod types;
pub mod wasm;

pub use ai::{Heuristic, SearchConfig, SearchEngine};
pub use board::{Board, Cell};
pub use error::{OthelloError, Result};
pub use game::GameState;
pub use types::{Player, Position, Score, Turn};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
