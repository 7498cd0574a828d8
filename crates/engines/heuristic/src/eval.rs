//! Static board evaluation.
//!
//! A weighted sum over every piece on the board, positive for the
//! perspective side: material, key presence, summed ability tiers, a
//! bonus for kings whose ray is live, and an adjacent-empty mobility
//! differential. Terminal positions short-circuit to the win sentinel.

use nodi_core::{offset, ray, Board, Dir, Player, ValueMap};

/// Terminal sentinel: returned outright when a side has no keys left,
/// and used by the search to short-circuit win-in-one actions.
pub const WIN_SCORE: i32 = 100_000;

const SINGLE_VALUE: i32 = 100;
const KING_VALUE: i32 = 260;
const KEY_BONUS: i32 = 450;
const ABILITY_WEIGHT: i32 = 12;
const RAY_BONUS: i32 = 8;
const MOBILITY_WEIGHT: i32 = 4;

pub fn evaluate(board: &Board, perspective: Player) -> i32 {
    if board.keys_remaining(perspective.other()) == 0 {
        return WIN_SCORE;
    }
    if board.keys_remaining(perspective) == 0 {
        return -WIN_SCORE;
    }

    let values = ValueMap::compute(board);
    let mut score = 0i32;
    for s in 0..64u8 {
        let Some(p) = board.piece_at(s) else { continue };

        let mut term = if p.is_king() { KING_VALUE } else { SINGLE_VALUE };
        term += KEY_BONUS * p.key_count() as i32;
        term += ABILITY_WEIGHT * values.get(s);
        if p.is_king() && !ray(board, s).is_empty() {
            term += RAY_BONUS;
        }
        term += MOBILITY_WEIGHT * adjacent_empties(board, s);

        score += if p.owner() == perspective { term } else { -term };
    }
    score
}

fn adjacent_empties(board: &Board, s: u8) -> i32 {
    Dir::ALL
        .iter()
        .filter(|&&d| offset(s, d).map_or(false, |n| board.piece_at(n).is_none()))
        .count() as i32
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
