//! Move representation and move text.

use std::fmt;
use std::str::FromStr;

use crate::error::NotationError;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// A move: origin square, signed grid offset to the destination, and an optional
/// promotion piece.
///
/// Castling is a king move with offset [`CASTLE_KING_SIDE`](crate::direction::CASTLE_KING_SIDE)
/// or [`CASTLE_QUEEN_SIDE`](crate::direction::CASTLE_QUEEN_SIDE); en passant is a pawn
/// capture offset onto an empty square. Neither needs a separate tag.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    delta: i8,
    promotion: Option<PieceKind>,
}

impl Move {
    /// A placeholder move used to fill fixed-size buffers.
    pub const NULL: Move = Move {
        from: Square::A1,
        delta: 0,
        promotion: None,
    };

    /// Create a move from an origin and an offset.
    #[inline]
    pub const fn new(from: Square, delta: i8) -> Move {
        Move {
            from,
            delta,
            promotion: None,
        }
    }

    /// Create a promoting move.
    #[inline]
    pub const fn with_promotion(from: Square, delta: i8, kind: PieceKind) -> Move {
        Move {
            from,
            delta,
            promotion: Some(kind),
        }
    }

    /// Create a move between two squares.
    #[inline]
    pub const fn between(from: Square, to: Square, promotion: Option<PieceKind>) -> Move {
        Move {
            from,
            delta: (to.index() as i16 - from.index() as i16) as i8,
            promotion,
        }
    }

    /// Origin square.
    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    /// Grid offset from origin to destination.
    #[inline]
    pub const fn delta(self) -> i8 {
        self.delta
    }

    /// Destination square.
    #[inline]
    pub const fn to(self) -> Square {
        self.from.offset(self.delta)
    }

    /// The promotion piece, if any.
    #[inline]
    pub const fn promotion(self) -> Option<PieceKind> {
        self.promotion
    }

    /// `true` for the placeholder move.
    #[inline]
    pub const fn is_null(self) -> bool {
        self.delta == 0
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to())?;
        if let Some(kind) = self.promotion {
            write!(f, "/{kind}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({self})")
    }
}

impl FromStr for Move {
    type Err = NotationError;

    /// Parse `<square>-<square>[/<N|B|R|Q>]`, case-insensitive.
    fn from_str(s: &str) -> Result<Move, NotationError> {
        let text = s.trim();
        let malformed = || NotationError::Malformed {
            text: text.to_string(),
        };

        let (squares, promotion) = match text.split_once('/') {
            Some((squares, letter)) => {
                let mut chars = letter.chars();
                let (Some(c), None) = (chars.next(), chars.next()) else {
                    return Err(malformed());
                };
                let kind = PieceKind::from_promotion_char(c)
                    .ok_or(NotationError::InvalidPromotion { letter: c })?;
                (squares, Some(kind))
            }
            None => (text, None),
        };

        let (from, to) = squares.split_once('-').ok_or_else(malformed)?;
        let parse_square = |s: &str| {
            Square::from_algebraic(s).ok_or_else(|| NotationError::InvalidSquare {
                square: s.to_string(),
            })
        };
        let from = parse_square(from)?;
        let to = parse_square(to)?;
        if from == to {
            return Err(malformed());
        }

        Ok(Move::between(from, to, promotion))
    }
}
