//! Heuristic NODI Engine
//!
//! Weighted board evaluation with a pruned two-ply adversarial
//! lookahead. This is the default opponent the interactive layer plays
//! against, and the baseline-beating reference for engine comparisons.

mod eval;
mod search;

use nodi_core::{Board, Engine, Player, SearchLimits, SearchResult};

pub use eval::{evaluate, WIN_SCORE};
pub use search::{enumerate_actions, is_capturing, pick_with_lookahead};

/// Engine wrapper around [`pick_with_lookahead`].
///
/// Stateless between moves apart from node statistics; every decision
/// recomputes from the board snapshot it is handed.
#[derive(Debug, Clone, Default)]
pub struct HeuristicEngine {
    nodes: u64,
}

impl HeuristicEngine {
    pub fn new() -> Self {
        Self { nodes: 0 }
    }
}

impl Engine for HeuristicEngine {
    fn choose(&mut self, board: &Board, side: Player, limits: SearchLimits) -> SearchResult {
        self.nodes = 0;
        let best = pick_with_lookahead(board, side, &limits, &mut self.nodes);
        SearchResult {
            best,
            score: best.map(|sa| sa.score).unwrap_or(0),
            nodes: self.nodes,
        }
    }

    fn name(&self) -> &str {
        "Heuristic v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}
