//! Random NODI Engine
//!
//! Picks uniformly among all legal actions. Useful as a tournament
//! baseline (any real engine should crush it) and as a stress tester
//! for the legality engine.

use nodi_core::{all_actions, Board, Engine, Player, ScoredAction, SearchLimits, SearchResult};
use rand::seq::SliceRandom;
use rand::thread_rng;


/// A NODI engine with no evaluation at all.
#[derive(Debug, Clone, Default)]
pub struct RandomEngine {
    nodes: u64,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self { nodes: 0 }
    }
}

impl Engine for RandomEngine {
    fn choose(&mut self, board: &Board, side: Player, _limits: SearchLimits) -> SearchResult {
        let actions = all_actions(board, side);
        self.nodes = actions.len() as u64;

        let best = actions
            .choose(&mut thread_rng())
            .map(|&action| ScoredAction { action, score: 0 });

        SearchResult {
            best,
            score: 0,
            nodes: self.nodes,
        }
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}
