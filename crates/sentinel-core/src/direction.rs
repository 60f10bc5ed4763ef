//! Grid offsets for every piece movement.
//!
//! Each offset is a constant added to a [`Square`](crate::Square) index. One rank is
//! [`GRID_WIDTH`](crate::square::GRID_WIDTH) cells.

use crate::color::Color;

/// The four diagonal rays: NE, NW, SE, SW.
pub const DIAGONALS: [i8; 4] = [13, 11, -11, -13];

/// The four orthogonal rays: E, W, N, S.
pub const ORTHOGONALS: [i8; 4] = [1, -1, 12, -12];

/// The eight knight jumps.
pub const KNIGHT_JUMPS: [i8; 8] = [14, 10, -10, -14, 25, 23, -23, -25];

/// King displacement for king-side castling.
pub const CASTLE_KING_SIDE: i8 = 2;

/// King displacement for queen-side castling.
pub const CASTLE_QUEEN_SIDE: i8 = -2;

/// Per-color pawn geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PawnDirections {
    /// Single forward step.
    pub push: i8,
    /// Double forward step from the starting rank.
    pub double_push: i8,
    /// The two diagonal captures.
    pub captures: [i8; 2],
    /// Lateral neighbour offsets paired with `captures` for en-passant.
    pub en_passant_sides: [i8; 2],
    /// Zero-based rank pawns start on.
    pub start_rank: u8,
    /// Zero-based rank pawns promote on.
    pub promotion_rank: u8,
}

const WHITE_PAWN: PawnDirections = PawnDirections {
    push: 12,
    double_push: 24,
    captures: [13, 11],
    en_passant_sides: [1, -1],
    start_rank: 1,
    promotion_rank: 7,
};

const BLACK_PAWN: PawnDirections = PawnDirections {
    push: -12,
    double_push: -24,
    captures: [-11, -13],
    en_passant_sides: [1, -1],
    start_rank: 6,
    promotion_rank: 0,
};

impl PawnDirections {
    /// Pawn geometry for `color`.
    #[inline]
    pub const fn of(color: Color) -> PawnDirections {
        match color {
            Color::White => WHITE_PAWN,
            Color::Black => BLACK_PAWN,
        }
    }
}

/// `true` if `delta` runs along a diagonal.
#[inline]
pub fn is_diagonal(delta: i8) -> bool {
    DIAGONALS.contains(&delta)
}
