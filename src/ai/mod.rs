pub mod heuristic;
pub mod search;

pub use heuristic::Heuristic;
pub use search::{SearchConfig, SearchEngine, SearchStats};
