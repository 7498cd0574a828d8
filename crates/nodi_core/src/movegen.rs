//! Legality queries: everything a piece on a given square may do this
//! turn, gated by its ability value.
//!
//! All queries are pure. Values are computed against the unmodified
//! input board for the whole query; no partial application leaks into
//! the answer.

use crate::board::Board;
use crate::rays::{value_at, ValueMap};
use crate::types::*;

/// The legal options for one square, split by action type. Rotation has
/// no destination square, so it is a flag rather than a set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LegalActions {
    /// One-step and king-slide destinations onto empty squares.
    pub moves: Vec<u8>,
    /// Enemy squares this piece may take.
    pub captures: Vec<u8>,
    /// Friendly singles this single may merge onto.
    pub combines: Vec<u8>,
    /// Squares a scatter may originate from (kings, tier >= 2).
    pub scatter_bases: Vec<u8>,
    /// Whether the piece may rotate its arrow (kings, tier >= 2).
    pub can_rotate: bool,
}

impl LegalActions {
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
            && self.captures.is_empty()
            && self.combines.is_empty()
            && self.scatter_bases.is_empty()
            && !self.can_rotate
    }
}

/// Why a scatter is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScatterBlock {
    /// `from` does not hold an arrowed king.
    NotAKing,
    /// A landing square falls off the board.
    Offboard,
    /// A friendly piece sits on a landing square.
    AllyBlock,
    /// Combined value of the enemy occupants exceeds the king's value.
    CaptureSumExceeds,
}

/// Result of checking one scatter base: the two landing squares and
/// whether the split may go ahead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScatterCheck {
    pub l1: Option<u8>,
    pub l2: Option<u8>,
    pub can: bool,
    pub reason: Option<ScatterBlock>,
}

impl ScatterCheck {
    fn blocked(l1: Option<u8>, l2: Option<u8>, reason: ScatterBlock) -> ScatterCheck {
        ScatterCheck {
            l1,
            l2,
            can: false,
            reason: Some(reason),
        }
    }
}

/// Everything the piece at `from` may legally do. Empty result for an
/// empty or off-board square, or for a frozen piece (value 0).
pub fn legal_actions_for(board: &Board, from: u8) -> LegalActions {
    let mut acts = LegalActions::default();
    let Some(piece) = board.piece_at(from) else {
        return acts;
    };
    let values = ValueMap::compute(board);
    let v = values.get(from);
    if v == 0 {
        return acts;
    }

    // Step A: one step in all 8 directions.
    for dir in Dir::ALL {
        let Some(to) = offset(from, dir) else { continue };
        match board.piece_at(to) {
            None => acts.moves.push(to),
            Some(t) if t.owner() == piece.owner() => {
                // Only plain singles merge; keys never become kings.
                if piece.is_single()
                    && t.is_single()
                    && !piece.has_key()
                    && !t.has_key()
                {
                    acts.combines.push(to);
                }
            }
            // Ties favor the attacker.
            Some(_) => {
                if values.get(to) <= v {
                    acts.captures.push(to);
                }
            }
        }
    }

    // Step B: arrow actions for kings.
    if let (true, Some(dir)) = (piece.is_king(), piece.arrow) {
        if v == 2 {
            // Exactly two squares along the arrow, over an empty
            // intermediate. Friendly or over-value targets block
            // silently.
            if let Some(mid) = offset(from, dir) {
                if board.piece_at(mid).is_none() {
                    if let Some(to) = offset(mid, dir) {
                        match board.piece_at(to) {
                            None => acts.moves.push(to),
                            Some(t)
                                if t.owner() != piece.owner()
                                    && values.get(to) <= v =>
                            {
                                acts.captures.push(to)
                            }
                            _ => {}
                        }
                    }
                }
            }
        } else if v >= 3 {
            // Full slide. The first square is already covered by Step A,
            // so only record squares beyond it.
            let mut cur = from;
            let mut dist = 0u8;
            while let Some(next) = offset(cur, dir) {
                dist += 1;
                match board.piece_at(next) {
                    None => {
                        if dist > 1 {
                            acts.moves.push(next);
                        }
                        cur = next;
                    }
                    Some(t) => {
                        if dist > 1
                            && t.owner() != piece.owner()
                            && values.get(next) <= v
                        {
                            acts.captures.push(next);
                        }
                        break;
                    }
                }
            }
        }

        if v >= 2 {
            acts.can_rotate = true;
            acts.scatter_bases.push(from);
            if v >= 3 {
                // The king may pre-step to any empty slide square
                // before splitting.
                let mut cur = from;
                while let Some(next) = offset(cur, dir) {
                    if board.piece_at(next).is_some() {
                        break;
                    }
                    acts.scatter_bases.push(next);
                    cur = next;
                }
            }
        }
    }

    acts
}

/// Check the scatter of the king at `from` originating at `base`. The
/// landing squares are the next two squares past `base` along the
/// arrow. Enemy occupants are budgeted jointly: their summed values
/// must not exceed the king's ability value at `from`.
pub fn validate_scatter(board: &Board, from: u8, base: u8) -> ScatterCheck {
    let Some(king) = board.piece_at(from) else {
        return ScatterCheck::blocked(None, None, ScatterBlock::NotAKing);
    };
    let Some(dir) = king.arrow else {
        return ScatterCheck::blocked(None, None, ScatterBlock::NotAKing);
    };
    if !king.is_king() {
        return ScatterCheck::blocked(None, None, ScatterBlock::NotAKing);
    }

    let l1 = offset(base, dir);
    let l2 = l1.and_then(|s| offset(s, dir));
    let (Some(s1), Some(s2)) = (l1, l2) else {
        return ScatterCheck::blocked(l1, l2, ScatterBlock::Offboard);
    };

    let mut capture_sum = 0;
    for landing in [s1, s2] {
        if let Some(occupant) = board.piece_at(landing) {
            if occupant.owner() == king.owner() {
                return ScatterCheck::blocked(l1, l2, ScatterBlock::AllyBlock);
            }
            capture_sum += value_at(board, landing);
        }
    }
    if capture_sum > value_at(board, from) {
        return ScatterCheck::blocked(l1, l2, ScatterBlock::CaptureSumExceeds);
    }

    ScatterCheck {
        l1,
        l2,
        can: true,
        reason: None,
    }
}

/// Flatten the per-square legality sets of one side into actions.
///
/// Rotations are included only for kings at value 3 or more; tier-2
/// rotation is offered to interactive callers through `can_rotate` but
/// engines treat every listed action as consuming the turn, and a
/// tier-2 rotation spent that way is already covered by the flag.
pub fn all_actions(board: &Board, side: Player) -> Vec<Action> {
    let values = ValueMap::compute(board);
    let mut out = Vec::new();
    for from in board.squares_of(side) {
        let acts = legal_actions_for(board, from);
        for to in acts.moves {
            out.push(Action::Move { from, to });
        }
        for to in acts.captures {
            out.push(Action::Capture { from, to });
        }
        for to in acts.combines {
            out.push(Action::Combine { from, to });
        }
        for base in acts.scatter_bases {
            if validate_scatter(board, from, base).can {
                out.push(Action::Scatter { from, base });
            }
        }
        if acts.can_rotate && values.get(from) >= 3 {
            out.push(Action::Rotate {
                at: from,
                spin: Spin::Cw,
            });
            out.push(Action::Rotate {
                at: from,
                spin: Spin::Ccw,
            });
        }
    }
    out
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
