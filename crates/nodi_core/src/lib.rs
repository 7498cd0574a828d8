pub mod board;
pub mod limits;
pub mod movegen;
pub mod rays;
pub mod types;

// Re-export core game logic (not engine-specific)
pub use board::*;
pub use limits::*;
pub use movegen::*;
pub use rays::*;
pub use types::*;

// =============================================================================
// Engine trait — implemented by all NODI engines (heuristic, random, etc.)
// =============================================================================

/// An action together with the score the engine assigned to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredAction {
    pub action: Action,
    pub score: i32,
}

/// Result of asking an engine for a move.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The chosen action. `None` means the side has no legal actions at
    /// all — an explicit signal the turn-management layer must handle,
    /// never a silent pass.
    pub best: Option<ScoredAction>,
    /// Score of the chosen action from the acting side's perspective.
    pub score: i32,
    /// Positions evaluated while deciding (for stats).
    pub nodes: u64,
}

/// Trait every NODI engine implements, so match runners and callers can
/// swap opponents freely.
pub trait Engine: Send {
    /// Choose an action for `side` on `board` under the given limits.
    fn choose(&mut self, board: &Board, side: Player, limits: SearchLimits) -> SearchResult;

    /// Engine name for reports and leaderboards.
    fn name(&self) -> &str;

    /// Reset internal state for a new game.
    fn new_game(&mut self) {}
}
