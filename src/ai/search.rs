use std::time::Duration;

use log::{debug, trace, warn};
use serde::Deserialize;
use web_time::Instant;

use crate::ai::heuristic::Heuristic;
use crate::board::Board;
use crate::game::GameState;
use crate::types::{Player, Position, Score};

const DEFAULT_DEPTH: u8 = 3;
const MIN_SCORE: f64 = f64::NEG_INFINITY;
const MAX_SCORE: f64 = f64::INFINITY;

/// Search settings, as handed over by a host.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies to look ahead.
    pub depth: u8,
    pub heuristic: Heuristic,
    /// `false` runs plain minimax over the same tree.
    pub pruning: bool,
    /// Stop starting new root moves once this much time has passed.
    pub timeout_ms: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            heuristic: Heuristic::Material,
            pruning: true,
            timeout_ms: None,
        }
    }
}

/// Counters for the most recent search.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
    pub elapsed_ms: u64,
    pub score: f64,
    pub timed_out: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Evaluation {
    score: f64,
    best_move: Option<Position>,
}

impl Evaluation {
    fn leaf(score: f64) -> Self {
        Self {
            score,
            best_move: None,
        }
    }
}

/// Depth-limited minimax with alpha-beta pruning.
///
/// Black is always the maximizing side and white the minimizing side; the
/// heuristic decides which absolute outcome an engine is steered towards.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    player: Player,
    depth: u8,
    heuristic: Heuristic,
    pruning: bool,
    timeout: Option<Duration>,
    deadline: Option<Instant>,
    stats: SearchStats,
    moves_made: u32,
    total_time: Duration,
}

impl SearchEngine {
    pub fn new(player: Player, depth: u8, heuristic: Heuristic) -> Self {
        Self {
            player,
            depth,
            heuristic,
            pruning: true,
            timeout: None,
            deadline: None,
            stats: SearchStats::default(),
            moves_made: 0,
            total_time: Duration::ZERO,
        }
    }

    pub fn from_config(player: Player, config: &SearchConfig) -> Self {
        let engine = Self::new(player, config.depth, config.heuristic).with_pruning(config.pruning);
        match config.timeout_ms {
            Some(ms) => engine.with_timeout(Duration::from_millis(ms)),
            None => engine,
        }
    }

    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The side this engine plays for.
    pub fn player(&self) -> Player {
        self.player
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Mean wall time of the searches that produced a move.
    pub fn average_move_time(&self) -> Duration {
        if self.moves_made == 0 {
            Duration::ZERO
        } else {
            self.total_time / self.moves_made
        }
    }

    /// Best move for `to_move` on `board`, or `None` when it has no legal
    /// move (the caller then passes the turn).
    ///
    /// Annotations on `board` are ignored and the board itself is never
    /// modified.
    pub fn choose_move(&mut self, board: &Board, to_move: Player) -> Option<Position> {
        self.choose_move_for_state(&GameState::new(*board, to_move))
    }

    pub fn choose_move_for_state(&mut self, state: &GameState) -> Option<Position> {
        let start = Instant::now();
        self.stats = SearchStats::default();

        if state.is_finished() || state.current_legal_moves().is_empty() {
            debug!("{:?} has no legal move", state.current_player());
            return None;
        }

        // A root at depth 0 would only be scored, never expanded.
        let depth = self.depth.max(1);
        self.deadline = self.timeout.map(|timeout| start + timeout);
        let result = self.minimax(state, depth, 0, MIN_SCORE, MAX_SCORE);

        let elapsed = start.elapsed();
        self.stats.elapsed_ms = elapsed.as_millis() as u64;
        self.stats.score = result.score;
        self.moves_made += 1;
        self.total_time += elapsed;

        debug!(
            "{:?} engine ({:?}, depth {}) picked {:?} for {:?}: score {}, {} nodes, {} cutoffs, {} ms",
            self.player,
            self.heuristic,
            depth,
            result.best_move.map(|mv| mv.to_string()),
            state.current_player(),
            result.score,
            self.stats.nodes,
            self.stats.cutoffs,
            self.stats.elapsed_ms
        );

        result.best_move
    }

    fn minimax(
        &mut self,
        state: &GameState,
        depth: u8,
        ply: u8,
        alpha: f64,
        beta: f64,
    ) -> Evaluation {
        self.stats.nodes += 1;

        if state.is_finished() {
            return Evaluation::leaf(terminal_score(state.score()));
        }
        if depth == 0 {
            return Evaluation::leaf(self.heuristic.evaluate(state));
        }

        let moves = state.current_legal_moves();
        if moves.is_empty() {
            return Evaluation::leaf(self.heuristic.evaluate(state));
        }

        let maximizing = state.current_player() == Player::Black;
        let mut alpha = alpha;
        let mut beta = beta;
        let mut best: Option<(f64, Position)> = None;

        for (i, &mv) in moves.iter().enumerate() {
            // Only root siblings are cut short; the first always completes.
            if ply == 0 && i > 0 && self.deadline.is_some_and(|d| Instant::now() >= d) {
                warn!("search deadline hit after {i} of {} root moves", moves.len());
                self.stats.timed_out = true;
                break;
            }

            let mut child = state.clone();
            child.next_turn(mv);
            let score = self.minimax(&child, depth - 1, ply + 1, alpha, beta).score;
            if ply == 0 {
                trace!("root move {mv}: {score}");
            }

            if is_better_score(score, best.map(|(s, _)| s), maximizing) {
                best = Some((score, mv));
            }
            if maximizing {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }
            if self.pruning && beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        match best {
            Some((score, mv)) => Evaluation {
                score,
                best_move: Some(mv),
            },
            None => Evaluation::leaf(self.heuristic.evaluate(state)),
        }
    }
}

/// Strict improvement only, so the first move reaching the extreme wins ties.
fn is_better_score(score: f64, best: Option<f64>, maximizing: bool) -> bool {
    match best {
        None => true,
        Some(best) if maximizing => score > best,
        Some(best) => score < best,
    }
}

/// Finished games score as a certain win, loss or draw for black.
fn terminal_score(score: Score) -> f64 {
    match score.margin() {
        m if m > 0 => MAX_SCORE,
        m if m < 0 => MIN_SCORE,
        _ => 0.0,
    }
}
