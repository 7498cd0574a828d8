use std::fmt;

use crate::rays::value_at;
use crate::types::*;

/// An indivisible token. Key counters are the win condition: a side
/// with no key counters left on the board has lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Counter {
    pub owner: Player,
    pub is_key: bool,
}

impl Counter {
    pub fn plain(owner: Player) -> Counter {
        Counter {
            owner,
            is_key: false,
        }
    }
    pub fn key(owner: Player) -> Counter {
        Counter {
            owner,
            is_key: true,
        }
    }
}

/// A stack of one or two same-owner counters on a single square.
///
/// One counter is a "single"; two counters are a "king", which always
/// carries an arrow direction. Key singles never stack, so a king never
/// contains a key counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    bottom: Counter,
    top: Option<Counter>,
    pub arrow: Option<Dir>,
}

impl Piece {
    pub fn single(c: Counter) -> Piece {
        Piece {
            bottom: c,
            top: None,
            arrow: None,
        }
    }

    pub fn king(bottom: Counter, top: Counter, arrow: Dir) -> Piece {
        debug_assert_eq!(bottom.owner, top.owner);
        debug_assert!(!bottom.is_key && !top.is_key);
        Piece {
            bottom,
            top: Some(top),
            arrow: Some(arrow),
        }
    }

    pub fn owner(&self) -> Player {
        self.bottom.owner
    }
    pub fn counter_count(&self) -> u32 {
        1 + self.top.is_some() as u32
    }
    pub fn is_single(&self) -> bool {
        self.top.is_none()
    }
    pub fn is_king(&self) -> bool {
        self.top.is_some()
    }
    pub fn has_key(&self) -> bool {
        self.bottom.is_key || self.top.map_or(false, |c| c.is_key)
    }
    pub fn key_count(&self) -> u32 {
        self.bottom.is_key as u32 + self.top.map_or(0, |c| c.is_key as u32)
    }
}

/// Fixed opening layout. No two friendly pieces start adjacent, so the
/// opening offers only quiet one-step moves. Black holds the top rows
/// and moves first.
pub const START_LAYOUT: &str = "\
b.B..B.b
........
.b.b.b.b
........
........
.w.w.w.w
........
w.W..W.w";

/// The 8x8 grid. Each cell is empty or holds exactly one piece.
///
/// Boards are immutable values from the caller's point of view: every
/// `apply_*` function returns a fresh board and leaves its input
/// untouched, so old snapshots stay valid for history and for
/// hypothetical search lines exploring from the same parent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Piece>; 64],
}

impl Default for Board {
    fn default() -> Self {
        Board::startpos()
    }
}

impl Board {
    pub fn empty() -> Board {
        Board { cells: [None; 64] }
    }

    pub fn startpos() -> Board {
        Board::from_layout(START_LAYOUT)
    }

    /// Parse a textual grid: 8 rows of 8 symbols, top row first.
    /// `.` empty, `b`/`w` singles, `B`/`W` key singles.
    ///
    /// Panics on malformed input; layouts are fixed strings decided at
    /// compile time, not runtime data.
    pub fn from_layout(layout: &str) -> Board {
        let rows: Vec<&str> = layout.lines().map(str::trim).collect();
        assert!(rows.len() == 8, "layout must have 8 rows");
        let mut board = Board::empty();
        for (r, row) in rows.iter().enumerate() {
            assert!(row.len() == 8, "layout row {r} must have 8 columns");
            for (c, ch) in row.bytes().enumerate() {
                let piece = match ch {
                    b'.' => None,
                    b'b' => Some(Piece::single(Counter::plain(Player::Black))),
                    b'B' => Some(Piece::single(Counter::key(Player::Black))),
                    b'w' => Some(Piece::single(Counter::plain(Player::White))),
                    b'W' => Some(Piece::single(Counter::key(Player::White))),
                    _ => panic!("invalid layout symbol: {}", ch as char),
                };
                board.cells[r * 8 + c] = piece;
            }
        }
        board
    }

    /// Render the board back into layout form. Kings print as `k`
    /// (black) and `K` (white); kings never hold keys, so the symbols
    /// stay unambiguous.
    pub fn to_layout(&self) -> String {
        let mut out = String::with_capacity(72);
        for r in 0..8 {
            for c in 0..8 {
                let ch = match self.cells[r * 8 + c] {
                    None => '.',
                    Some(p) => match (p.owner(), p.is_king(), p.has_key()) {
                        (Player::Black, true, _) => 'k',
                        (Player::White, true, _) => 'K',
                        (Player::Black, false, true) => 'B',
                        (Player::Black, false, false) => 'b',
                        (Player::White, false, true) => 'W',
                        (Player::White, false, false) => 'w',
                    },
                };
                out.push(ch);
            }
            if r < 7 {
                out.push('\n');
            }
        }
        out
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        if sq < 64 {
            self.cells[sq as usize]
        } else {
            None
        }
    }

    /// Builder used by tests and setup code to drop a piece on a square.
    pub fn with_piece(mut self, sq: u8, piece: Piece) -> Board {
        if sq < 64 {
            self.cells[sq as usize] = Some(piece);
        }
        self
    }

    pub fn keys_remaining(&self, player: Player) -> u32 {
        self.cells
            .iter()
            .flatten()
            .filter(|p| p.owner() == player)
            .map(|p| p.key_count())
            .sum()
    }

    /// Winner, if either side has lost all key counters.
    pub fn winner(&self) -> Option<Player> {
        if self.keys_remaining(Player::Black) == 0 {
            Some(Player::White)
        } else if self.keys_remaining(Player::White) == 0 {
            Some(Player::Black)
        } else {
            None
        }
    }

    /// Squares occupied by the given player's pieces.
    pub fn squares_of(&self, player: Player) -> impl Iterator<Item = u8> + '_ {
        (0..64u8).filter(move |&s| {
            self.cells[s as usize].map_or(false, |p| p.owner() == player)
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.to_layout())
    }
}

/// Outcome of a rotation: the new board, plus whether the rotation
/// consumed the turn. Tier-2 orientation is an "instead of moving"
/// action; a king that resolves to tier 3 after the rotation re-orients
/// for free.
#[derive(Clone, Debug)]
pub struct RotateOutcome {
    pub board: Board,
    pub ends_turn: bool,
}

// Action application. Callers are expected to have consulted the
// legality engine first; on a precondition violation these return the
// input board unchanged instead of corrupting state, since hypothetical
// AI exploration reaches them with unchecked inputs too.

/// Move the piece at `from` onto the empty square `to`.
pub fn apply_move(board: &Board, from: u8, to: u8) -> Board {
    let mut next = board.clone();
    match (board.piece_at(from), board.piece_at(to)) {
        (Some(p), None) if from != to => {
            next.cells[to as usize] = Some(p);
            next.cells[from as usize] = None;
            next
        }
        _ => next,
    }
}

/// Capture the enemy piece at `to` with the piece at `from`.
pub fn apply_capture(board: &Board, from: u8, to: u8) -> Board {
    let mut next = board.clone();
    match (board.piece_at(from), board.piece_at(to)) {
        (Some(p), Some(t)) if t.owner() != p.owner() => {
            next.cells[to as usize] = Some(p);
            next.cells[from as usize] = None;
            next
        }
        _ => next,
    }
}

/// Merge two adjacent friendly non-key singles into a king at `to`.
/// The new king's arrow points in the direction of the combining move.
pub fn apply_combine(board: &Board, from: u8, to: u8) -> Board {
    let next = board.clone();
    let (Some(mover), Some(target)) = (board.piece_at(from), board.piece_at(to)) else {
        return next;
    };
    let Some(arrow) = Dir::between(from, to) else {
        return next;
    };
    if mover.owner() != target.owner()
        || !mover.is_single()
        || !target.is_single()
        || mover.has_key()
        || target.has_key()
    {
        return next;
    }
    let mut next = next;
    next.cells[to as usize] = Some(Piece::king(
        Counter::plain(target.owner()),
        Counter::plain(mover.owner()),
        arrow,
    ));
    next.cells[from as usize] = None;
    next
}

/// Split the king at `from` into two singles along its arrow beyond
/// `base`, removing any enemies on the landing squares. Scatter never
/// produces key pieces.
pub fn apply_scatter(board: &Board, from: u8, base: u8) -> Board {
    use crate::movegen::validate_scatter;

    let next = board.clone();
    let Some(king) = board.piece_at(from) else {
        return next;
    };
    let check = validate_scatter(board, from, base);
    if !check.can {
        return next;
    }
    let (Some(l1), Some(l2)) = (check.l1, check.l2) else {
        return next;
    };
    let owner = king.owner();
    let mut next = next;
    next.cells[from as usize] = None;
    // Enemy occupants of the landing squares were budgeted by the
    // validation; they are simply replaced.
    next.cells[l1 as usize] = Some(Piece::single(Counter::plain(owner)));
    next.cells[l2 as usize] = Some(Piece::single(Counter::plain(owner)));
    next
}

/// Rotate the king's arrow one compass point. The turn cost depends on
/// the ability value recomputed on the board *after* the rotation:
/// exactly 2 consumes the turn, 3 or more is free.
pub fn apply_rotate(board: &Board, at: u8, spin: Spin) -> RotateOutcome {
    let Some(piece) = board.piece_at(at) else {
        return RotateOutcome {
            board: board.clone(),
            ends_turn: false,
        };
    };
    let Some(arrow) = piece.arrow else {
        return RotateOutcome {
            board: board.clone(),
            ends_turn: false,
        };
    };
    if !piece.is_king() || value_at(board, at) < 2 {
        return RotateOutcome {
            board: board.clone(),
            ends_turn: false,
        };
    }
    let mut next = board.clone();
    next.cells[at as usize] = Some(Piece {
        arrow: Some(arrow.rotated(spin)),
        ..piece
    });
    let ends_turn = value_at(&next, at) < 3;
    RotateOutcome { board: next, ends_turn }
}

/// Dispatch one action. Every variant is handled; this is the single
/// board-transition point both the UI path and the search path go
/// through.
pub fn apply_action(board: &Board, action: Action) -> Board {
    match action {
        Action::Move { from, to } => apply_move(board, from, to),
        Action::Capture { from, to } => apply_capture(board, from, to),
        Action::Combine { from, to } => apply_combine(board, from, to),
        Action::Scatter { from, base } => apply_scatter(board, from, base),
        Action::Rotate { at, spin } => apply_rotate(board, at, spin).board,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_counts() {
        let b = Board::startpos();
        assert_eq!(b.keys_remaining(Player::Black), 2);
        assert_eq!(b.keys_remaining(Player::White), 2);
        assert_eq!(b.squares_of(Player::Black).count(), 8);
        assert_eq!(b.squares_of(Player::White).count(), 8);
        assert_eq!(b.winner(), None);
    }

    #[test]
    fn layout_roundtrip_for_singles() {
        let b = Board::startpos();
        assert_eq!(b.to_layout(), START_LAYOUT);
    }

    #[test]
    fn no_friendly_adjacency_at_setup() {
        let b = Board::startpos();
        for s in 0..64u8 {
            let Some(p) = b.piece_at(s) else { continue };
            for d in Dir::ALL {
                if let Some(n) = offset(s, d) {
                    if let Some(q) = b.piece_at(n) {
                        assert_ne!(
                            q.owner(),
                            p.owner(),
                            "friendly pieces adjacent at {} / {}",
                            sq_to_coord(s),
                            sq_to_coord(n)
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn combine_forms_arrowed_king() {
        let a = sq(4, 4).unwrap();
        let b = sq(4, 5).unwrap();
        let board = Board::empty()
            .with_piece(a, Piece::single(Counter::plain(Player::White)))
            .with_piece(b, Piece::single(Counter::plain(Player::White)));
        let next = apply_combine(&board, a, b);
        assert!(next.piece_at(a).is_none());
        let king = next.piece_at(b).unwrap();
        assert!(king.is_king());
        assert_eq!(king.counter_count(), 2);
        assert_eq!(king.arrow, Some(Dir::E));
        // input untouched
        assert!(board.piece_at(a).is_some());
    }

    #[test]
    fn combine_rejects_keys_and_kings() {
        let a = sq(4, 4).unwrap();
        let b = sq(4, 5).unwrap();
        let keyed = Board::empty()
            .with_piece(a, Piece::single(Counter::key(Player::White)))
            .with_piece(b, Piece::single(Counter::plain(Player::White)));
        assert_eq!(apply_combine(&keyed, a, b), keyed);

        let kinged = Board::empty()
            .with_piece(
                a,
                Piece::king(
                    Counter::plain(Player::White),
                    Counter::plain(Player::White),
                    Dir::N,
                ),
            )
            .with_piece(b, Piece::single(Counter::plain(Player::White)));
        assert_eq!(apply_combine(&kinged, a, b), kinged);
    }

    #[test]
    fn capture_requires_enemy_target() {
        let a = sq(3, 3).unwrap();
        let b = sq(3, 4).unwrap();
        let board = Board::empty()
            .with_piece(a, Piece::single(Counter::plain(Player::Black)))
            .with_piece(b, Piece::single(Counter::plain(Player::Black)));
        // friendly target: no-op
        assert_eq!(apply_capture(&board, a, b), board);

        let board = Board::empty()
            .with_piece(a, Piece::single(Counter::plain(Player::Black)))
            .with_piece(b, Piece::single(Counter::plain(Player::White)));
        let next = apply_capture(&board, a, b);
        assert!(next.piece_at(a).is_none());
        assert_eq!(next.piece_at(b).unwrap().owner(), Player::Black);
    }

    #[test]
    fn invalid_move_is_a_noop() {
        let board = Board::startpos();
        assert_eq!(apply_move(&board, 0, 0), board);
        // destination occupied
        let from = coord_to_sq("a8").unwrap();
        let to = coord_to_sq("c8").unwrap();
        assert_eq!(apply_move(&board, from, to), board);
    }

    #[test]
    fn winner_when_keys_gone() {
        let board = Board::empty()
            .with_piece(0, Piece::single(Counter::key(Player::Black)))
            .with_piece(63, Piece::single(Counter::plain(Player::White)));
        assert_eq!(board.winner(), Some(Player::Black));
    }
}
