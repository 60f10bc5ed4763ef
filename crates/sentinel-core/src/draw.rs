//! Draw kinds and game outcomes.

use std::fmt;

use crate::color::Color;

/// Why a position is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DrawKind {
    /// The side to move has no legal move and is not in check.
    Stalemate = 1,
    /// Neither side has pawns and both are below the mating material threshold.
    InsufficientMaterial = 2,
    /// Fifty moves by each side without a pawn move or capture.
    FiftyMove = 3,
    /// The same piece placement appeared three times.
    Threefold = 4,
}

impl DrawKind {
    /// Decode the snapshot byte (0 means no draw).
    pub const fn from_code(code: u8) -> Option<Option<DrawKind>> {
        match code {
            0 => Some(None),
            1 => Some(Some(DrawKind::Stalemate)),
            2 => Some(Some(DrawKind::InsufficientMaterial)),
            3 => Some(Some(DrawKind::FiftyMove)),
            4 => Some(Some(DrawKind::Threefold)),
            _ => None,
        }
    }

    /// Snapshot byte for an optional draw kind.
    pub const fn code(kind: Option<DrawKind>) -> u8 {
        match kind {
            None => 0,
            Some(kind) => kind as u8,
        }
    }
}

impl fmt::Display for DrawKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DrawKind::Stalemate => "stalemate",
            DrawKind::InsufficientMaterial => "insufficient material",
            DrawKind::FiftyMove => "fifty-move rule",
            DrawKind::Threefold => "threefold repetition",
        };
        f.write_str(text)
    }
}

/// Where a game stands after the last move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The side to move has legal moves and no draw applies.
    Ongoing,
    /// The side to move is checkmated.
    Checkmate {
        /// The side that delivered mate.
        winner: Color,
    },
    /// The game is drawn.
    Draw(DrawKind),
}

impl Outcome {
    /// `true` once the game can no longer continue.
    #[inline]
    pub const fn is_over(self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ongoing => f.write_str("in progress"),
            Outcome::Checkmate { winner } => write!(f, "checkmate, {} wins", winner.name()),
            Outcome::Draw(kind) => write!(f, "draw by {kind}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DrawKind, Outcome};
    use crate::color::Color;

    #[test]
    fn code_roundtrip() {
        for kind in [
            None,
            Some(DrawKind::Stalemate),
            Some(DrawKind::InsufficientMaterial),
            Some(DrawKind::FiftyMove),
            Some(DrawKind::Threefold),
        ] {
            assert_eq!(DrawKind::from_code(DrawKind::code(kind)), Some(kind));
        }
        assert_eq!(DrawKind::from_code(9), None);
    }

    #[test]
    fn outcome_display() {
        assert_eq!(
            Outcome::Checkmate { winner: Color::Black }.to_string(),
            "checkmate, black wins"
        );
        assert_eq!(Outcome::Draw(DrawKind::Threefold).to_string(), "draw by threefold repetition");
        assert!(!Outcome::Ongoing.is_over());
    }
}
