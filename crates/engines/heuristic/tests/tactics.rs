//! Tactical behavior of the engine on hand-built positions.

use heuristic_engine::{HeuristicEngine, WIN_SCORE};
use nodi_core::*;

fn key(owner: Player) -> Piece {
    Piece::single(Counter::key(owner))
}

fn single(owner: Player) -> Piece {
    Piece::single(Counter::plain(owner))
}

fn king(owner: Player, arrow: Dir) -> Piece {
    Piece::king(Counter::plain(owner), Counter::plain(owner), arrow)
}

#[test]
fn engine_takes_the_game_winning_capture() {
    let attacker = sq(3, 4).unwrap();
    let target = sq(3, 3).unwrap();
    let board = Board::empty()
        .with_piece(attacker, single(Player::Black))
        .with_piece(target, key(Player::White))
        .with_piece(sq(7, 0).unwrap(), key(Player::Black))
        .with_piece(sq(0, 0).unwrap(), single(Player::Black));

    let mut engine = HeuristicEngine::new();
    let result = engine.choose(&board, Player::Black, SearchLimits::default());
    let best = result.best.expect("black has actions");
    assert_eq!(
        best.action,
        Action::Capture {
            from: attacker,
            to: target
        }
    );
    assert_eq!(best.score, WIN_SCORE);

    let after = apply_action(&board, best.action);
    assert_eq!(after.winner(), Some(Player::Black));
}

#[test]
fn engine_surfaces_a_stuck_side_explicitly() {
    let board = Board::empty()
        .with_piece(sq(4, 4).unwrap(), key(Player::Black))
        .with_piece(sq(4, 0).unwrap(), king(Player::White, Dir::E))
        .with_piece(sq(0, 4).unwrap(), king(Player::White, Dir::S))
        .with_piece(sq(7, 7).unwrap(), key(Player::White));

    let mut engine = HeuristicEngine::new();
    let result = engine.choose(&board, Player::Black, SearchLimits::default());
    assert!(result.best.is_none(), "frozen side must report no actions");
}

#[test]
fn engine_declines_a_losing_exchange() {
    // The black king may take the white single, but the white king
    // recaptures on the next ply; two-ply scoring should steer black
    // elsewhere.
    let bk = sq(4, 4).unwrap();
    let bait = sq(4, 5).unwrap();
    let board = Board::empty()
        .with_piece(bk, king(Player::Black, Dir::N))
        .with_piece(bait, single(Player::White))
        .with_piece(sq(4, 6).unwrap(), king(Player::White, Dir::S))
        .with_piece(sq(0, 0).unwrap(), single(Player::Black))
        .with_piece(sq(7, 0).unwrap(), key(Player::Black))
        .with_piece(sq(7, 7).unwrap(), key(Player::White));

    let mut engine = HeuristicEngine::new();
    let result = engine.choose(&board, Player::Black, SearchLimits::new(16, 8));
    let best = result.best.expect("black has actions");
    assert_ne!(
        best.action,
        Action::Capture { from: bk, to: bait },
        "taking the defended single loses the king to the recapture"
    );
}

#[test]
fn engine_builds_a_king_when_it_is_free() {
    let a = sq(5, 2).unwrap();
    let b = sq(5, 3).unwrap();
    let board = Board::empty()
        .with_piece(a, single(Player::Black))
        .with_piece(b, single(Player::Black))
        .with_piece(sq(7, 0).unwrap(), key(Player::Black))
        .with_piece(sq(0, 5).unwrap(), single(Player::White))
        .with_piece(sq(0, 7).unwrap(), key(Player::White));

    let mut engine = HeuristicEngine::new();
    let result = engine.choose(&board, Player::Black, SearchLimits::default());
    let best = result.best.expect("black has actions");
    let Action::Combine { from, to } = best.action else {
        panic!("expected a combine, got {:?}", best.action);
    };
    let after = apply_action(&board, best.action);
    let new_king = after.piece_at(to).unwrap();
    assert!(new_king.is_king());
    assert_eq!(new_king.arrow, Dir::between(from, to));
}
