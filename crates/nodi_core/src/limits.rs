//! Search limits and cooperative cancellation for engines.
//!
//! The lookahead is a bounded two-ply computation, so there is no
//! timer; callers that move the search off-thread get a stop token
//! instead. A new request supersedes the old one by stopping its token
//! and issuing fresh limits.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Candidate caps for the two-ply lookahead: how many first-ply actions
/// survive pruning, and how many opponent replies each is tested
/// against. Captures are always kept on top of these caps.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    pub move_limit: usize,
    pub reply_limit: usize,
    pub stop: StopToken,
}

impl SearchLimits {
    pub fn new(move_limit: usize, reply_limit: usize) -> Self {
        Self {
            move_limit,
            reply_limit,
            stop: StopToken::new(),
        }
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.stop.is_stopped()
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::new(10, 6)
    }
}

/// Cheaply cloneable stop flag shared between a caller and a running
/// search. `is_stopped` is a relaxed atomic load, fine to poll per
/// candidate.
#[derive(Debug, Clone, Default)]
pub struct StopToken {
    stopped: Arc<AtomicBool>,
}

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }
}
