//! Piece kinds and their material values.

use std::fmt;

/// The kind of a chess piece, without color information.
///
/// Discriminants are the 3-bit codes stored in the low bits of a [`Cell`](crate::Cell);
/// code 0 means "no piece" and code 1 is unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 2,
    King = 3,
    Knight = 4,
    Bishop = 5,
    Rook = 6,
    Queen = 7,
}

impl PieceKind {
    /// Total number of piece kinds.
    pub const COUNT: usize = 6;

    /// All piece kinds in code order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::King,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ];

    /// Kinds a pawn may promote to, in the order the generator emits them.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ];

    /// Return the 3-bit cell code.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Decode a 3-bit cell code. Codes 0 and 1 are not pieces.
    #[inline]
    pub const fn from_code(code: u8) -> Option<PieceKind> {
        match code {
            2 => Some(PieceKind::Pawn),
            3 => Some(PieceKind::King),
            4 => Some(PieceKind::Knight),
            5 => Some(PieceKind::Bishop),
            6 => Some(PieceKind::Rook),
            7 => Some(PieceKind::Queen),
            _ => None,
        }
    }

    /// Material value in pawns. The king counts for nothing.
    #[inline]
    pub const fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::King => 0,
            PieceKind::Knight | PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
        }
    }

    /// `true` for pieces that slide along diagonals (bishop, queen).
    #[inline]
    pub const fn slides_diagonally(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Queen)
    }

    /// `true` for pieces that slide along ranks and files (rook, queen).
    #[inline]
    pub const fn slides_orthogonally(self) -> bool {
        matches!(self, PieceKind::Rook | PieceKind::Queen)
    }

    /// Return the FEN character for this piece kind (lowercase).
    #[inline]
    pub const fn fen_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::King => 'k',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
        }
    }

    /// Parse a FEN character (case-insensitive) into a piece kind.
    #[inline]
    pub fn from_fen_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'k' => Some(PieceKind::King),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            _ => None,
        }
    }

    /// Parse a promotion letter (`N`, `B`, `R`, `Q`, any case).
    #[inline]
    pub fn from_promotion_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_uppercase() {
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            _ => None,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fen_char().to_ascii_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::PieceKind;

    #[test]
    fn code_roundtrip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(PieceKind::from_code(0), None);
        assert_eq!(PieceKind::from_code(1), None);
    }

    #[test]
    fn values() {
        let total: i32 = [
            (PieceKind::Pawn, 8),
            (PieceKind::Knight, 2),
            (PieceKind::Bishop, 2),
            (PieceKind::Rook, 2),
            (PieceKind::Queen, 1),
            (PieceKind::King, 1),
        ]
        .iter()
        .map(|&(kind, count)| kind.value() * count)
        .sum();
        assert_eq!(total, 39, "starting material per side");
    }

    #[test]
    fn slider_axes() {
        assert!(PieceKind::Queen.slides_diagonally());
        assert!(PieceKind::Queen.slides_orthogonally());
        assert!(PieceKind::Bishop.slides_diagonally());
        assert!(!PieceKind::Bishop.slides_orthogonally());
        assert!(!PieceKind::Rook.slides_diagonally());
        assert!(!PieceKind::Knight.slides_orthogonally());
    }

    #[test]
    fn promotion_chars() {
        assert_eq!(PieceKind::from_promotion_char('q'), Some(PieceKind::Queen));
        assert_eq!(PieceKind::from_promotion_char('N'), Some(PieceKind::Knight));
        assert_eq!(PieceKind::from_promotion_char('K'), None);
        assert_eq!(PieceKind::from_promotion_char('p'), None);
    }

    #[test]
    fn fen_char_roundtrip() {
        for kind in PieceKind::ALL {
            let c = kind.fen_char();
            assert_eq!(PieceKind::from_fen_char(c), Some(kind));
            assert_eq!(PieceKind::from_fen_char(c.to_ascii_uppercase()), Some(kind));
        }
        assert_eq!(PieceKind::from_fen_char('x'), None);
    }
}
