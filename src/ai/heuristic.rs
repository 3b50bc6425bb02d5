use std::fmt;

use serde::Deserialize;

use crate::game::GameState;

const RESULT_WEIGHT: f64 = 0.5;
const CORNER_WEIGHT: f64 = 3.5;
const EDGE_WEIGHT: f64 = 2.0;

/// Leaf evaluation for the search. Positive values favour black.
#[derive(Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Heuristic {
    /// Black discs minus white discs.
    #[default]
    Material,
    /// Material, corners and non-corner border squares, weighted.
    Edges,
    /// White discs minus black discs.
    Inverted,
    /// Caller-supplied evaluation.
    #[serde(skip)]
    Custom(fn(&GameState) -> f64),
}

impl Heuristic {
    pub fn evaluate(&self, state: &GameState) -> f64 {
        match self {
            Self::Material => material(state),
            Self::Edges => edges(state),
            Self::Inverted => -material(state),
            Self::Custom(f) => f(state),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Material => "material",
            Self::Edges => "edges",
            Self::Inverted => "inverted",
            Self::Custom(_) => "custom",
        }
    }
}

impl fmt::Debug for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn material(state: &GameState) -> f64 {
    state.score().margin() as f64
}

fn edges(state: &GameState) -> f64 {
    let (black_corners, white_corners) = state.corner_counts();
    let (black_edges, white_edges) = state.edge_counts();

    material(state) * RESULT_WEIGHT
        + (black_corners as f64 - white_corners as f64) * CORNER_WEIGHT
        + (black_edges as f64 - white_edges as f64) * EDGE_WEIGHT
}
