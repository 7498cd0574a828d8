//! Playing games between two engines.

use nodi_core::{all_actions, apply_action, Board, Engine, Player, SearchLimits};
use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::elo::{GameResult, MatchResult};

/// Configuration for a match.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Number of games to play
    pub num_games: u32,
    /// First-ply candidate cap handed to the engines
    pub move_limit: usize,
    /// Opponent-reply cap handed to the engines
    pub reply_limit: usize,
    /// Maximum plies per game before declaring a draw
    pub max_plies: u32,
    /// Random plies played before the engines take over, so repeated
    /// games between the same pair do not all follow one line
    pub opening_plies: u32,
    /// Whether the engines swap sides each game
    pub alternate_sides: bool,
    /// Print progress during the match
    pub verbose: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            move_limit: 10,
            reply_limit: 6,
            max_plies: 200,
            opening_plies: 2,
            alternate_sides: true,
            verbose: true,
        }
    }
}

impl MatchConfig {
    fn search_limits(&self) -> SearchLimits {
        SearchLimits::new(self.move_limit, self.reply_limit)
    }
}

/// Runs matches between two engines.
pub struct MatchRunner {
    config: MatchConfig,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    /// Run a match. The result is from engine1's perspective.
    pub fn run_match(&self, engine1: &mut dyn Engine, engine2: &mut dyn Engine) -> MatchResult {
        let mut result = MatchResult::new();

        for game_num in 0..self.config.num_games {
            // Black moves first; alternate who gets it if configured.
            let engine1_black = !self.config.alternate_sides || game_num % 2 == 0;

            let game_result = if engine1_black {
                self.play_game(engine1, engine2)
            } else {
                self.play_game(engine2, engine1).flipped()
            };

            match game_result {
                GameResult::Win => result.wins += 1,
                GameResult::Loss => result.losses += 1,
                GameResult::Draw => result.draws += 1,
            }

            if self.config.verbose {
                let side = if engine1_black { "B" } else { "W" };
                let outcome = match game_result {
                    GameResult::Win => "1-0",
                    GameResult::Loss => "0-1",
                    GameResult::Draw => "1/2",
                };
                println!(
                    "Game {}/{}: {} ({}) - Score: {}-{}-{}",
                    game_num + 1,
                    self.config.num_games,
                    outcome,
                    side,
                    result.wins,
                    result.losses,
                    result.draws
                );
            }
        }

        result
    }

    /// Play one game; the result is from Black's perspective.
    ///
    /// A side whose engine reports no legal actions loses outright: the
    /// core surfaces "stuck" explicitly and the match layer rules it a
    /// loss rather than a pass.
    fn play_game(&self, black: &mut dyn Engine, white: &mut dyn Engine) -> GameResult {
        let mut board = Board::startpos();
        let mut side = Player::Black;
        black.new_game();
        white.new_game();

        for ply in 0..self.config.max_plies {
            let action = if ply < self.config.opening_plies {
                all_actions(&board, side)
                    .choose(&mut thread_rng())
                    .copied()
            } else {
                let limits = self.config.search_limits();
                let result = match side {
                    Player::Black => black.choose(&board, side, limits),
                    Player::White => white.choose(&board, side, limits),
                };
                result.best.map(|sa| sa.action)
            };

            let Some(action) = action else {
                return match side {
                    Player::Black => GameResult::Loss,
                    Player::White => GameResult::Win,
                };
            };

            board = apply_action(&board, action);

            if let Some(winner) = board.winner() {
                return match winner {
                    Player::Black => GameResult::Win,
                    Player::White => GameResult::Loss,
                };
            }

            side = side.other();
        }

        GameResult::Draw
    }
}

/// Quick utility to run a single match with default pacing.
pub fn quick_match(
    engine1: &mut dyn Engine,
    engine2: &mut dyn Engine,
    num_games: u32,
) -> MatchResult {
    let config = MatchConfig {
        num_games,
        verbose: false,
        ..Default::default()
    };
    MatchRunner::new(config).run_match(engine1, engine2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use heuristic_engine::HeuristicEngine;
    use random_engine::RandomEngine;

    #[test]
    fn self_play_completes() {
        let mut engine1 = RandomEngine::new();
        let mut engine2 = RandomEngine::new();

        let result = quick_match(&mut engine1, &mut engine2, 2);
        assert_eq!(result.total_games(), 2);
    }

    #[test]
    fn heuristic_beats_random_over_a_short_match() {
        let mut strong = HeuristicEngine::new();
        let mut weak = RandomEngine::new();

        let config = MatchConfig {
            num_games: 2,
            move_limit: 6,
            reply_limit: 4,
            max_plies: 120,
            verbose: false,
            ..Default::default()
        };

        let result = MatchRunner::new(config).run_match(&mut strong, &mut weak);
        assert_eq!(result.total_games(), 2);
        assert!(
            result.wins >= result.losses,
            "lookahead should not lose to uniform random: {}-{}-{}",
            result.wins,
            result.losses,
            result.draws
        );
    }
}
