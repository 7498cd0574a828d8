//! Match runner for NODI engines
//!
//! This crate provides infrastructure for:
//! - Playing head-to-head matches between engines
//! - Tracking Elo ratings across engine versions
//! - Saving results and generating text reports
//!
//! # Usage
//!
//! ```bash
//! # Ten games, heuristic against the random baseline
//! cargo run -p tournament -- match heuristic random --games 10
//!
//! # Gauntlet a challenger through every opponent
//! cargo run -p tournament -- gauntlet heuristic --games 20
//! ```

mod elo;
mod match_runner;
mod results;

pub use elo::*;
pub use match_runner::*;
pub use results::*;
