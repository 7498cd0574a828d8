#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    Black,
    White,
}
impl Player {
    pub fn other(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Player::Black => 0,
            Player::White => 1,
        }
    }
}

/// The 8 compass points a king's arrow can take, clockwise from north.
/// Row 0 is the top of the board, so north steps toward smaller rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl Dir {
    pub const ALL: [Dir; 8] = [
        Dir::N,
        Dir::Ne,
        Dir::E,
        Dir::Se,
        Dir::S,
        Dir::Sw,
        Dir::W,
        Dir::Nw,
    ];

    /// (row, col) step for one square in this direction.
    pub fn delta(self) -> (i8, i8) {
        match self {
            Dir::N => (-1, 0),
            Dir::Ne => (-1, 1),
            Dir::E => (0, 1),
            Dir::Se => (1, 1),
            Dir::S => (1, 0),
            Dir::Sw => (1, -1),
            Dir::W => (0, -1),
            Dir::Nw => (-1, -1),
        }
    }

    /// One step clockwise around the compass (N -> NE -> E -> ...).
    pub fn cw(self) -> Dir {
        let i = Dir::ALL.iter().position(|&d| d == self).unwrap_or(0);
        Dir::ALL[(i + 1) % 8]
    }

    /// One step counter-clockwise.
    pub fn ccw(self) -> Dir {
        let i = Dir::ALL.iter().position(|&d| d == self).unwrap_or(0);
        Dir::ALL[(i + 7) % 8]
    }

    /// Direction from one square to an adjacent square, if they are
    /// exactly one king-step apart. This is what fixes a new king's
    /// arrow at combine time.
    pub fn between(from: u8, to: u8) -> Option<Dir> {
        let dr = row_of(to) - row_of(from);
        let dc = col_of(to) - col_of(from);
        Dir::ALL.iter().copied().find(|d| d.delta() == (dr, dc))
    }
}

/// Rotation sense for the rotate action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Spin {
    Cw,
    Ccw,
}

impl Dir {
    pub fn rotated(self, spin: Spin) -> Dir {
        match spin {
            Spin::Cw => self.cw(),
            Spin::Ccw => self.ccw(),
        }
    }
}

// Square helpers. Squares are indices 0..64, row-major with row 0 at
// the top of the board.
pub fn row_of(sq: u8) -> i8 {
    (sq / 8) as i8
}
pub fn col_of(sq: u8) -> i8 {
    (sq % 8) as i8
}
pub fn sq(row: i8, col: i8) -> Option<u8> {
    if (0..8).contains(&row) && (0..8).contains(&col) {
        Some((row as u8) * 8 + (col as u8))
    } else {
        None
    }
}

/// The adjacent square in the given direction, if on the board.
pub fn offset(from: u8, dir: Dir) -> Option<u8> {
    let (dr, dc) = dir.delta();
    sq(row_of(from) + dr, col_of(from) + dc)
}

/// Render a square as "a8".."h1" (file letter = column, rank 8 = row 0).
pub fn sq_to_coord(sq: u8) -> String {
    let f = (b'a' + (sq % 8)) as char;
    let r = (b'8' - (sq / 8)) as char;
    format!("{f}{r}")
}

pub fn coord_to_sq(c: &str) -> Option<u8> {
    let b = c.as_bytes();
    if b.len() != 2 {
        return None;
    }
    let f = b[0];
    let r = b[1];
    if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) {
        return None;
    }
    let col = f - b'a';
    let row = b'8' - r;
    Some(row * 8 + col)
}

/// One playable action. Legality and search both produce and consume
/// this closed set; `apply_action` matches it exhaustively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Step or slide onto an empty square.
    Move { from: u8, to: u8 },
    /// Remove the enemy piece at `to` and occupy its square.
    Capture { from: u8, to: u8 },
    /// Merge the single at `from` onto the friendly single at `to`,
    /// forming a king whose arrow points from -> to.
    Combine { from: u8, to: u8 },
    /// Split the king at `from` into two singles beyond `base` along
    /// its arrow, capturing any enemies on the landing squares.
    Scatter { from: u8, base: u8 },
    /// Step the king's arrow one compass point.
    Rotate { at: u8, spin: Spin },
}

impl Action {
    /// Square of the piece performing the action.
    pub fn origin(&self) -> u8 {
        match *self {
            Action::Move { from, .. }
            | Action::Capture { from, .. }
            | Action::Combine { from, .. }
            | Action::Scatter { from, .. } => from,
            Action::Rotate { at, .. } => at,
        }
    }
}
