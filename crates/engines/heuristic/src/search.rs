//! Action enumeration and the pruned two-ply lookahead.
//!
//! Every legal action is scored as the evaluation of the resulting
//! board plus tactical nudges, then the top candidates are tested
//! against the opponent's best replies. Captures are never pruned on
//! either ply.

use nodi_core::{
    all_actions, apply_action, col_of, legal_actions_for, row_of, validate_scatter, Action,
    Board, Dir, Player, ScoredAction, SearchLimits, offset,
};
use rand::Rng;

use crate::eval::{evaluate, WIN_SCORE};

const COMBINE_BONUS: i32 = 60;
const CAPTURE_BONUS: i32 = 90;
const KING_CAPTURE_BONUS: i32 = 250;
const KEY_CAPTURE_BONUS: i32 = 800;
const CENTER_NUDGE: i32 = 3;
const RECAPTURE_PENALTY: i32 = 45;
/// Candidates within this margin of the top score share a random
/// tie-break, so play is not fully deterministic.
const TIE_EPSILON: i32 = 15;
/// An opponent left with no reply at all is close to beaten.
const IMMOBILE_OPPONENT_BONUS: i32 = WIN_SCORE / 2;

/// All legal actions for `side`, each scored against the resulting
/// position, best first.
pub fn enumerate_actions(board: &Board, side: Player) -> Vec<ScoredAction> {
    let mut nodes = 0;
    enumerate_counted(board, side, &mut nodes)
}

fn enumerate_counted(board: &Board, side: Player, nodes: &mut u64) -> Vec<ScoredAction> {
    let mut out: Vec<ScoredAction> = all_actions(board, side)
        .into_iter()
        .map(|action| ScoredAction {
            action,
            score: score_action(board, action, side, nodes),
        })
        .collect();
    out.sort_by_key(|sa| std::cmp::Reverse(sa.score));
    out
}

fn score_action(board: &Board, action: Action, side: Player, nodes: &mut u64) -> i32 {
    let after = apply_action(board, action);
    *nodes += 1;
    let mut score = evaluate(&after, side);

    match action {
        Action::Combine { .. } => score += COMBINE_BONUS,
        Action::Capture { to, .. } => score += capture_worth(board, to),
        Action::Scatter { from, base } => {
            let check = validate_scatter(board, from, base);
            for landing in [check.l1, check.l2].into_iter().flatten() {
                if board.piece_at(landing).is_some() {
                    score += capture_worth(board, landing);
                }
            }
        }
        Action::Move { from, to } => {
            score += CENTER_NUDGE * (center_distance(from) - center_distance(to));
        }
        Action::Rotate { .. } => {}
    }

    // Immediate recapture risk: landing on a square the opponent can
    // take right back is discounted by what we would lose, softened by
    // nearby defenders.
    if let Some(dest) = destination_of(action) {
        if let Some(p) = after.piece_at(dest) {
            if p.owner() == side && threatened_at(&after, dest, side) {
                let importance = if p.has_key() {
                    4
                } else if p.is_king() {
                    2
                } else {
                    1
                };
                let defenders = adjacent_friends(&after, dest, side);
                score -= RECAPTURE_PENALTY * importance / (1 + defenders);
            }
        }
    }

    score
}

fn capture_worth(board: &Board, target: u8) -> i32 {
    let Some(victim) = board.piece_at(target) else {
        return 0;
    };
    CAPTURE_BONUS
        + if victim.has_key() {
            KEY_CAPTURE_BONUS
        } else if victim.is_king() {
            KING_CAPTURE_BONUS
        } else {
            0
        }
}

/// Half-step Manhattan distance from the board centre: 1 for the four
/// centre squares, 7 at the corners.
fn center_distance(s: u8) -> i32 {
    let dr = (2 * row_of(s) as i32 - 7).abs();
    let dc = (2 * col_of(s) as i32 - 7).abs();
    (dr + dc) / 2
}

fn destination_of(action: Action) -> Option<u8> {
    match action {
        Action::Move { to, .. } | Action::Capture { to, .. } | Action::Combine { to, .. } => {
            Some(to)
        }
        Action::Scatter { .. } | Action::Rotate { .. } => None,
    }
}

/// Whether any enemy piece has a legal capture targeting `sq`.
fn threatened_at(board: &Board, sq: u8, owner: Player) -> bool {
    board
        .squares_of(owner.other())
        .any(|from| legal_actions_for(board, from).captures.contains(&sq))
}

fn adjacent_friends(board: &Board, sq: u8, owner: Player) -> i32 {
    Dir::ALL
        .iter()
        .filter(|&&d| {
            offset(sq, d)
                .and_then(|n| board.piece_at(n))
                .map_or(false, |p| p.owner() == owner)
        })
        .count() as i32
}

/// Whether the action removes at least one enemy piece.
pub fn is_capturing(board: &Board, action: Action) -> bool {
    match action {
        Action::Capture { .. } => true,
        Action::Scatter { from, base } => {
            let check = validate_scatter(board, from, base);
            [check.l1, check.l2]
                .into_iter()
                .flatten()
                .any(|l| board.piece_at(l).is_some())
        }
        _ => false,
    }
}

/// Keep the `limit` best-scored actions, plus every capturing action
/// from the tail. Expects `actions` sorted best first.
fn keep_top_with_captures(
    board: &Board,
    mut actions: Vec<ScoredAction>,
    limit: usize,
) -> Vec<ScoredAction> {
    if actions.len() <= limit {
        return actions;
    }
    let tail = actions.split_off(limit);
    actions.extend(tail.into_iter().filter(|sa| is_capturing(board, sa.action)));
    actions
}

/// Two-ply adversarial pick: our action, the opponent's best retained
/// reply, minimax over the difference. Returns `None` only when the
/// side has no legal actions at all.
pub fn pick_with_lookahead(
    board: &Board,
    side: Player,
    limits: &SearchLimits,
    nodes: &mut u64,
) -> Option<ScoredAction> {
    let first = enumerate_counted(board, side, nodes);
    if first.is_empty() {
        return None;
    }

    // Win-in-one: taking the opponent's last key beats any heuristic.
    for sa in &first {
        let after = apply_action(board, sa.action);
        if after.keys_remaining(side.other()) == 0 {
            return Some(ScoredAction {
                action: sa.action,
                score: WIN_SCORE,
            });
        }
    }

    let opp = side.other();
    let candidates = keep_top_with_captures(board, first, limits.move_limit);

    let mut scored: Vec<ScoredAction> = Vec::with_capacity(candidates.len());
    for cand in candidates {
        if limits.should_stop() && !scored.is_empty() {
            break;
        }
        let after = apply_action(board, cand.action);
        *nodes += 1;
        let ours = evaluate(&after, side);

        let replies = enumerate_counted(&after, opp, nodes);
        let replies = keep_top_with_captures(&after, replies, limits.reply_limit);
        let best_reply = replies
            .iter()
            .map(|r| {
                *nodes += 1;
                evaluate(&apply_action(&after, r.action), opp)
            })
            .max();

        let score = match best_reply {
            Some(b) => ours - b,
            None => ours + IMMOBILE_OPPONENT_BONUS,
        };
        scored.push(ScoredAction {
            action: cand.action,
            score,
        });
    }

    let best = scored.iter().map(|sa| sa.score).max()?;
    let near: Vec<&ScoredAction> = scored
        .iter()
        .filter(|sa| best - sa.score <= TIE_EPSILON)
        .collect();
    let pick = near[rand::thread_rng().gen_range(0..near.len())];
    Some(*pick)
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
